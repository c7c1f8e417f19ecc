//! Run command implementation
//!
//! Executes every job of a JSON job file in order. Relative paths in the
//! file (sources, meshes, outputs and `out_root`) are resolved against the
//! job file's directory.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chromabake_spec::{Channel, ChannelSource, Job, JobFile};
use colored::Colorize;

use super::json_output::{error_to_json, CommandOutput};
use crate::output::OutputOptions;

fn rebase(base: &Path, path: &str) -> String {
    let p = Path::new(path);
    if p.is_absolute() || base.as_os_str().is_empty() {
        path.to_string()
    } else {
        base.join(p).display().to_string()
    }
}

fn rebase_source(base: &Path, source: &mut ChannelSource) {
    match source {
        ChannelSource::Path(path) => *path = rebase(base, path),
        ChannelSource::Extended { path, .. } => *path = rebase(base, path),
    }
}

/// Resolve every relative path in `job` against `base`.
pub fn rebase_job(job: &mut Job, base: &Path) {
    match job {
        Job::Pack(pack) => {
            for channel in Channel::ALL {
                if let Some(mut source) = pack.channels.get(channel).cloned() {
                    rebase_source(base, &mut source);
                    pack.channels.set(channel, Some(source));
                }
            }
        }
        Job::Unpack(unpack) => unpack.source = rebase(base, &unpack.source),
        Job::Bake(bake) => {
            bake.mesh = rebase(base, &bake.mesh);
            bake.output = rebase(base, &bake.output);
        }
    }
}

/// Load a job file and resolve its paths.
pub fn load(job_path: &Path) -> Result<(JobFile, OutputOptions)> {
    let mut file = JobFile::from_path(job_path)
        .with_context(|| format!("Failed to load job file: {}", job_path.display()))?;

    let base = job_path.parent().map(Path::to_path_buf).unwrap_or_default();
    for job in &mut file.jobs {
        rebase_job(job, &base);
    }
    let out_root = PathBuf::from(rebase(&base, file.out_root()));
    let opts = OutputOptions::new(out_root, file.overwrite);
    Ok((file, opts))
}

/// Run the run command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(job_path: &str, json_output: bool) -> Result<ExitCode> {
    let loaded = load(Path::new(job_path));

    if json_output {
        let (file, opts) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                let errors = error_to_json(&e)
                    .into_iter()
                    .map(|err| err.with_file(job_path))
                    .collect();
                let output = CommandOutput::failure(errors, Vec::new());
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(ExitCode::from(1));
            }
        };
        return super::run_jobs(file.jobs, &opts, true);
    }

    let (file, opts) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            super::reporting::print_validation_failure(&e);
            return Err(e);
        }
    };

    println!("{} {}", "Running job file:".cyan().bold(), job_path);
    println!("{} {}", "Output root:".cyan().bold(), opts.out_root.display());
    println!("{} {}", "Jobs:".dimmed(), file.jobs.len());

    super::run_jobs(file.jobs, &opts, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromabake_spec::{BakeJob, BakeMode, GroupingPolicy};

    #[test]
    fn test_rebase_relative_and_absolute() {
        let base = Path::new("jobs");
        assert_eq!(rebase(base, "ao.png"), Path::new("jobs").join("ao.png").display().to_string());

        let abs = std::env::temp_dir().join("abs.png").display().to_string();
        assert_eq!(rebase(base, &abs), abs);
        assert_eq!(rebase(Path::new(""), "ao.png"), "ao.png");
    }

    #[test]
    fn test_rebase_bake_job() {
        let mut job = Job::Bake(BakeJob {
            mesh: "avatar.glb".into(),
            mode: BakeMode::AveragedNormalEncode,
            output: "out/avatar.json".into(),
            grouping: GroupingPolicy::Exact,
            renormalize: false,
        });
        rebase_job(&mut job, Path::new("assets"));
        let Job::Bake(bake) = job else {
            panic!("expected bake job");
        };
        assert_eq!(bake.mesh, Path::new("assets").join("avatar.glb").display().to_string());
        assert!(bake.output.ends_with("avatar.json"));
    }

    #[test]
    fn test_rebase_extended_source_keeps_options() {
        let mut source = ChannelSource::extended("gloss.png", None, true);
        rebase_source(Path::new("tex"), &mut source);
        assert!(source.is_inverted());
        assert_eq!(
            source.source_path(),
            Path::new("tex").join("gloss.png").display().to_string()
        );
    }
}
