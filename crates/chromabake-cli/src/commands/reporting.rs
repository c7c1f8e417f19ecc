//! Human-readable job reports.

use chromabake_spec::JobError;
use colored::Colorize;

use super::json_output::JobReport;

/// Print one finished job.
pub fn print_job_report(report: &JobReport) {
    println!("\n{} {}", format!("{}:", report.kind).cyan().bold(), report.name);

    for warning in &report.warnings {
        println!(
            "  {} [{}]: {}",
            "!".yellow(),
            warning.code.yellow(),
            warning.message
        );
    }

    if let Some([w, h]) = report.size {
        println!("  {} {}x{}", "Size:".dimmed(), w, h);
    }
    if let Some(vertices) = report.vertices {
        println!("  {} {}", "Vertices:".dimmed(), vertices);
    }

    for output in &report.outputs {
        println!(
            "  {} {} {}",
            "✓".green(),
            output.path,
            format!("({})", &output.hash[..16.min(output.hash.len())]).dimmed()
        );
    }
}

/// Print the individual errors of a failed job file validation.
///
/// Other errors are left to `main`, which prints them once.
pub fn print_validation_failure(error: &anyhow::Error) {
    let Some(JobError::Invalid(errors)) = error.chain().find_map(|c| c.downcast_ref::<JobError>())
    else {
        return;
    };

    println!("\n{}", "Validation errors:".red().bold());
    for err in errors {
        let location = err
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "✗".red(),
            err.code.to_string().red(),
            location.dimmed(),
            err.message
        );
    }
}
