//! CLI command implementations.

pub mod bake;
pub mod json_output;
pub mod pack;
pub mod presets;
pub mod reporting;
pub mod run;
pub mod unpack;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chromabake_spec::{validate_job_file, Job, JobError, JobFile, JOB_FILE_VERSION};
use colored::Colorize;
use tracing::debug;

use crate::output::{prepare_output_path, OutputOptions};
use json_output::{error_to_json, warning_codes, CommandOutput, JobReport, JsonWarning, OutputFile};

/// Execute one job.
pub fn execute_job(job: &Job, opts: &OutputOptions) -> Result<JobReport> {
    debug!(kind = job.kind(), "executing job");
    match job {
        Job::Pack(pack) => pack::execute(pack, opts),
        Job::Unpack(unpack) => unpack::execute(unpack, opts),
        Job::Bake(bake) => bake::execute(bake, opts.overwrite),
    }
}

/// Validate and execute jobs in order, printing results.
///
/// Execution stops at the first failing job. Returns exit code 1 if any job
/// failed in `--json` mode; in human mode the error is returned instead.
pub fn run_jobs(jobs: Vec<Job>, opts: &OutputOptions, json_output: bool) -> Result<ExitCode> {
    let file = JobFile {
        version: JOB_FILE_VERSION,
        out_root: Some(opts.out_root.display().to_string()),
        overwrite: opts.overwrite,
        jobs,
    };

    let validation = validate_job_file(&file);
    let checked: Result<()> = if validation.is_ok() {
        Ok(())
    } else {
        Err(JobError::Invalid(validation.errors).into())
    };

    if json_output {
        let mut reports = Vec::new();
        let outcome = checked.and_then(|()| {
            for job in &file.jobs {
                reports.push(execute_job(job, opts)?);
            }
            Ok(())
        });
        let output = match outcome {
            Ok(()) => CommandOutput::success(reports),
            Err(e) => CommandOutput::failure(error_to_json(&e), reports),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(if output.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    if let Err(e) = checked {
        reporting::print_validation_failure(&e);
        return Err(e);
    }

    for job in &file.jobs {
        let report = execute_job(job, opts)?;
        reporting::print_job_report(&report);
    }
    println!("\n{}", "Done.".green().bold());
    Ok(ExitCode::SUCCESS)
}

/// Write an output file and record it in the report.
///
/// With `overwrite` off, an existing file is left alone and a numbered
/// sibling is written instead.
pub(crate) fn write_output(
    report: &mut JobReport,
    kind: &str,
    requested: &Path,
    bytes: &[u8],
    hash: String,
    overwrite: bool,
) -> Result<()> {
    let path = prepare_output_path(requested, overwrite)?;
    if path != requested {
        report.warnings.push(JsonWarning::new(
            warning_codes::RENAMED_OUTPUT,
            format!(
                "{} already exists, wrote {} instead",
                requested.display(),
                path.display()
            ),
        ));
    }

    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin")
        .to_ascii_lowercase();
    report.outputs.push(OutputFile {
        kind: kind.to_string(),
        format,
        path: path.display().to_string(),
        hash,
    });
    Ok(())
}
