//! Presets command implementation
//!
//! Lists the square output sizes used by automatic size selection.

use std::process::ExitCode;

use anyhow::Result;
use chromabake_spec::SIZE_PRESETS;
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct PresetsOutput {
    presets: Vec<u32>,
}

/// Run the presets command
pub fn run(json_output: bool) -> Result<ExitCode> {
    if json_output {
        let output = PresetsOutput {
            presets: SIZE_PRESETS.to_vec(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Size presets:".cyan().bold());
    for edge in SIZE_PRESETS {
        println!("  {}x{}", edge, edge);
    }
    println!(
        "\n{}",
        "With --size auto, the smallest preset covering every source is used.".dimmed()
    );
    Ok(ExitCode::SUCCESS)
}
