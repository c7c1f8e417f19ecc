//! chromabake CLI - vertex color baking and texture channel packing
//!
//! This binary bakes mesh vertex attributes into vertex colors and packs or
//! unpacks texture channels, either one command at a time or from a JSON job
//! file.

use clap::{Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;

use chromabake_cli::commands;
use chromabake_cli::commands::pack::PackArgs;
use chromabake_cli::logging;
use chromabake_cli::output::OutputOptions;
use chromabake_spec::{
    BakeJob, BakeMode, ColorComponent, GroupingPolicy, ResampleFilter, SizeSetting, UnpackJob,
    DEFAULT_OUT_ROOT, DEFAULT_PACKED_NAME, DEFAULT_UNPACKED_NAME,
};

/// chromabake - Vertex Color Baking and Texture Channel Packing
#[derive(Parser)]
#[command(name = "chromabake")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bake positions or averaged normals of a mesh into vertex colors
    Bake {
        /// Mesh file (.glb, .gltf, or a JSON vertex stream)
        #[arg(short, long)]
        mesh: String,

        /// Encoding: positions or averaged-normals
        #[arg(long, default_value = "averaged-normals")]
        mode: BakeMode,

        /// Output JSON path (default: <mesh>.colors.json next to the mesh)
        #[arg(short, long)]
        output: Option<String>,

        /// Group positions on a grid of this spacing instead of exactly
        #[arg(long)]
        tolerance: Option<f32>,

        /// Rescale averaged normals to unit length
        #[arg(long)]
        renormalize: bool,

        /// Write a numbered sibling instead of replacing an existing output
        #[arg(long)]
        no_overwrite: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Pack up to four images into the channels of one RGBA PNG
    Pack {
        /// Source for the red channel
        #[arg(short, long)]
        red: Option<String>,

        /// Source for the green channel
        #[arg(short, long)]
        green: Option<String>,

        /// Source for the blue channel
        #[arg(short, long)]
        blue: Option<String>,

        /// Source for the alpha channel
        #[arg(short, long)]
        alpha: Option<String>,

        /// Invert the red source
        #[arg(long)]
        invert_red: bool,

        /// Invert the green source
        #[arg(long)]
        invert_green: bool,

        /// Invert the blue source
        #[arg(long)]
        invert_blue: bool,

        /// Invert the alpha source
        #[arg(long)]
        invert_alpha: bool,

        /// Component read from each source: r, g, b, a or luminance
        #[arg(long, default_value = "r")]
        component: ColorComponent,

        /// Output size: auto, an edge length, or WxH
        #[arg(long, default_value = "auto", value_parser = parse_size)]
        size: SizeSetting,

        /// Resampling filter: nearest or bilinear
        #[arg(long, default_value = "bilinear")]
        filter: ResampleFilter,

        /// Output file stem
        #[arg(long, default_value = DEFAULT_PACKED_NAME)]
        name: String,

        /// Output root directory
        #[arg(long, default_value = DEFAULT_OUT_ROOT)]
        out_root: String,

        /// Write a numbered sibling instead of replacing an existing output
        #[arg(long)]
        no_overwrite: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Split an RGBA image into four greyscale PNGs
    Unpack {
        /// Packed source image
        #[arg(short, long)]
        source: String,

        /// Output size: auto, an edge length, or WxH
        #[arg(long, default_value = "auto", value_parser = parse_size)]
        size: SizeSetting,

        /// Resampling filter: nearest or bilinear
        #[arg(long, default_value = "bilinear")]
        filter: ResampleFilter,

        /// Output file stem
        #[arg(long, default_value = DEFAULT_UNPACKED_NAME)]
        name: String,

        /// Output root directory
        #[arg(long, default_value = DEFAULT_OUT_ROOT)]
        out_root: String,

        /// Write a numbered sibling instead of replacing an existing output
        #[arg(long)]
        no_overwrite: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Run every job in a JSON job file
    Run {
        /// Path to the job file
        #[arg(short, long)]
        job: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the size presets used by automatic sizing
    Presets {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse `auto`, `N` or `WxH`.
fn parse_size(s: &str) -> Result<SizeSetting, String> {
    if s.eq_ignore_ascii_case("auto") {
        return Ok(SizeSetting::Auto);
    }
    let parse = |v: &str| {
        v.trim()
            .parse::<u32>()
            .map_err(|_| format!("invalid size '{}': expected auto, N or WxH", s))
    };
    match s.split_once(['x', 'X']) {
        Some((w, h)) => Ok(SizeSetting::Exact(parse(w)?, parse(h)?)),
        None => Ok(SizeSetting::Edge(parse(s)?)),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Bake {
            mesh,
            mode,
            output,
            tolerance,
            renormalize,
            no_overwrite,
            json,
        } => {
            let output = output.unwrap_or_else(|| {
                commands::bake::default_output_path(Path::new(&mesh))
                    .display()
                    .to_string()
            });
            let grouping = match tolerance {
                Some(step) => GroupingPolicy::Quantized { step },
                None => GroupingPolicy::Exact,
            };
            let job = BakeJob {
                mesh,
                mode,
                output,
                grouping,
                renormalize,
            };
            commands::bake::run(job, !no_overwrite, json)
        }
        Commands::Pack {
            red,
            green,
            blue,
            alpha,
            invert_red,
            invert_green,
            invert_blue,
            invert_alpha,
            component,
            size,
            filter,
            name,
            out_root,
            no_overwrite,
            json,
        } => {
            let args = PackArgs {
                sources: [red, green, blue, alpha],
                invert: [invert_red, invert_green, invert_blue, invert_alpha],
                component,
                size,
                filter,
                name,
            };
            let opts = OutputOptions::new(out_root, !no_overwrite);
            commands::pack::run(&args, &opts, json)
        }
        Commands::Unpack {
            source,
            size,
            filter,
            name,
            out_root,
            no_overwrite,
            json,
        } => {
            let job = UnpackJob {
                source,
                name,
                size,
                filter,
            };
            let opts = OutputOptions::new(out_root, !no_overwrite);
            commands::unpack::run(job, &opts, json)
        }
        Commands::Run { job, json } => commands::run::run(&job, json),
        Commands::Presets { json } => commands::presets::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
