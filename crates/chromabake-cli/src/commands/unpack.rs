//! Unpack command implementation
//!
//! Splits a packed RGBA image into four greyscale PNGs, one per channel.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chromabake_backend_texture::png::{read_texture, write_rgba_to_vec_with_hash, PngConfig};
use chromabake_backend_texture::unpack;
use chromabake_spec::{Job, UnpackJob};

use super::json_output::JobReport;
use crate::output::OutputOptions;

/// Run the unpack command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(job: UnpackJob, opts: &OutputOptions, json_output: bool) -> Result<ExitCode> {
    super::run_jobs(vec![Job::Unpack(job)], opts, json_output)
}

/// Execute an unpack job and write the four channel PNGs.
pub fn execute(job: &UnpackJob, opts: &OutputOptions) -> Result<JobReport> {
    let mut report = JobReport::new("unpack", &job.name);

    let source = read_texture(Path::new(&job.source))
        .with_context(|| format!("Failed to read packed source: {}", job.source))?;
    let size = job
        .size
        .resolve([(source.width(), source.height())])
        .context("Invalid unpack size")?;

    let split = unpack(&source, size, job.filter);
    let config = PngConfig::default();
    for (channel, image) in split.iter() {
        let (bytes, hash) = write_rgba_to_vec_with_hash(image, &config)
            .with_context(|| format!("Failed to encode {} channel", channel))?;
        super::write_output(
            &mut report,
            channel.name(),
            &opts.unpacked_path(&job.name, channel),
            &bytes,
            hash,
            opts.overwrite,
        )?;
    }

    report.size = Some(size.into());
    Ok(report)
}
