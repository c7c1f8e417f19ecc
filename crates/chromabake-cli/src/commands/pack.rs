//! Pack command implementation
//!
//! Reads up to four source images, reduces each to one channel, and writes a
//! single RGBA PNG with one source per channel.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chromabake_backend_texture::png::{read_channel_image, write_rgba_to_vec_with_hash, PngConfig};
use chromabake_backend_texture::{pack, ChannelImage, PackInput};
use chromabake_spec::{
    Channel, ChannelSource, ColorComponent, Job, PackJob, PackedChannels, ResampleFilter,
    SizeSetting,
};
use tracing::debug;

use super::json_output::{warning_codes, JobReport, JsonWarning};
use crate::output::OutputOptions;

/// Command-line arguments of `chromabake pack`.
#[derive(Debug, Clone, Default)]
pub struct PackArgs {
    /// Source paths in R, G, B, A order.
    pub sources: [Option<String>; 4],
    /// Channels to invert, in R, G, B, A order.
    pub invert: [bool; 4],
    pub component: ColorComponent,
    pub size: SizeSetting,
    pub filter: ResampleFilter,
    pub name: String,
}

impl PackArgs {
    /// Build the equivalent job.
    pub fn to_job(&self) -> PackJob {
        let mut channels = PackedChannels::default();
        for channel in Channel::ALL {
            let i = channel.index();
            let source = self.sources[i].as_ref().map(|path| {
                if self.invert[i] || self.component != ColorComponent::default() {
                    ChannelSource::extended(path.clone(), Some(self.component), self.invert[i])
                } else {
                    ChannelSource::path(path.clone())
                }
            });
            channels.set(channel, source);
        }

        PackJob {
            name: self.name.clone(),
            size: self.size,
            filter: self.filter,
            channels,
        }
    }
}

/// Run the pack command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(args: &PackArgs, opts: &OutputOptions, json_output: bool) -> Result<ExitCode> {
    super::run_jobs(vec![Job::Pack(args.to_job())], opts, json_output)
}

/// Execute a pack job and write the packed PNG.
pub fn execute(job: &PackJob, opts: &OutputOptions) -> Result<JobReport> {
    let mut report = JobReport::new("pack", &job.name);

    let present = job.channels.present_count();
    if present < 2 {
        report.warnings.push(JsonWarning::new(
            warning_codes::FEW_PACK_SOURCES,
            format!(
                "only {} source channel(s) selected; missing channels are filled with constants",
                present
            ),
        ));
    }

    let mut images: [Option<(ChannelImage, bool)>; 4] = Default::default();
    for channel in Channel::ALL {
        if let Some(source) = job.channels.get(channel) {
            let path = Path::new(source.source_path());
            let image = read_channel_image(path, source.component()).with_context(|| {
                format!("Failed to read {} source: {}", channel, path.display())
            })?;
            debug!(
                %channel,
                width = image.width(),
                height = image.height(),
                component = ?source.component(),
                invert = source.is_inverted(),
                "loaded pack source"
            );
            images[channel.index()] = Some((image, source.is_inverted()));
        }
    }

    let size = job
        .size
        .resolve(
            images
                .iter()
                .flatten()
                .map(|(image, _)| (image.width(), image.height())),
        )
        .context("Invalid pack size")?;

    let inputs: [Option<PackInput<'_>>; 4] = std::array::from_fn(|i| {
        images[i]
            .as_ref()
            .map(|(image, invert)| PackInput {
                image,
                invert: *invert,
            })
    });
    let packed = pack(size, inputs, job.filter);

    let (bytes, hash) = write_rgba_to_vec_with_hash(&packed, &PngConfig::default())
        .context("Failed to encode packed image")?;
    super::write_output(
        &mut report,
        "packed",
        &opts.packed_path(&job.name),
        &bytes,
        hash,
        opts.overwrite,
    )?;

    report.size = Some(size.into());
    Ok(report)
}
