//! Bake command implementation
//!
//! Reads every mesh of a mesh file, bakes positions or averaged normals into
//! vertex colors, and writes the colors as JSON, one entry per primitive.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chromabake_backend_mesh::{
    bake_stream, load_mesh_file, renormalize_colors, BakedMesh, BakedMeshSet,
};
use chromabake_spec::{BakeJob, BakeMode, Job};

use super::json_output::{warning_codes, JobReport, JsonWarning};
use crate::output::OutputOptions;

/// Default output path: `<mesh stem>.colors.json` next to the mesh.
pub fn default_output_path(mesh: &Path) -> PathBuf {
    let stem = mesh
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".to_string());
    mesh.with_file_name(format!("{}.colors.json", stem))
}

/// Run the bake command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(job: BakeJob, overwrite: bool, json_output: bool) -> Result<ExitCode> {
    // Bake writes to its own output path; the output root is unused.
    let opts = OutputOptions::new(".", overwrite);
    super::run_jobs(vec![Job::Bake(job)], &opts, json_output)
}

/// Execute a bake job and write the baked colors.
pub fn execute(job: &BakeJob, overwrite: bool) -> Result<JobReport> {
    let mut report = JobReport::new("bake", &job.mesh);

    let meshes = load_mesh_file(Path::new(&job.mesh))
        .with_context(|| format!("Failed to load mesh: {}", job.mesh))?;

    if job.renormalize && job.mode == BakeMode::PositionEncode {
        report.warnings.push(JsonWarning::new(
            warning_codes::IGNORED_OPTION,
            "renormalize has no effect on position encoding",
        ));
    }

    let mut set = BakedMeshSet::new();
    for mesh in &meshes {
        if mesh.has_vertex_colors() {
            report.warnings.push(JsonWarning::new(
                warning_codes::EXISTING_VERTEX_COLORS,
                format!(
                    "{} already has vertex colors; the baked colors replace them",
                    mesh.name
                ),
            ));
        }

        let mut colors = bake_stream(job.mode, &mesh.stream, job.grouping)
            .with_context(|| format!("Failed to bake {}", mesh.name))?;
        if job.renormalize && job.mode == BakeMode::AveragedNormalEncode {
            renormalize_colors(&mut colors);
        }

        for (name, part) in mesh.split(&colors) {
            set.push(BakedMesh {
                name: name.to_string(),
                mode: job.mode,
                colors: part.to_vec(),
            });
        }
    }

    let json = set.to_json_pretty()?;
    let hash = blake3::hash(json.as_bytes()).to_hex().to_string();
    super::write_output(
        &mut report,
        "colors",
        Path::new(&job.output),
        json.as_bytes(),
        hash,
        overwrite,
    )?;

    report.vertices = Some(set.vertex_count());
    Ok(report)
}
