//! Validation for resolutions, output names, and job files.

use std::collections::HashSet;

use crate::error::{CodecError, ErrorCode, ValidationError, ValidationResult};
use crate::job::{Job, JobFile, SizeSetting, JOB_FILE_VERSION};
use crate::mesh::GroupingPolicy;

/// Largest accepted edge length. Buffers are `width * height` RGBA `f32`s.
pub const MAX_DIMENSION: u32 = 16384;

/// Validate that a resolution is at least 1x1 and within [`MAX_DIMENSION`].
///
/// # Example
///
/// ```
/// use chromabake_spec::validation::validate_resolution;
///
/// assert!(validate_resolution(1024, 1024).is_ok());
/// assert!(validate_resolution(0, 100).is_err());
/// ```
pub fn validate_resolution(width: u32, height: u32) -> Result<(), CodecError> {
    if width == 0 || height == 0 {
        return Err(CodecError::invalid(format!(
            "resolution must be at least 1x1, got [{}, {}]",
            width, height
        )));
    }

    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(CodecError::invalid(format!(
            "resolution is too large: max is {}x{}, got [{}, {}]",
            MAX_DIMENSION, MAX_DIMENSION, width, height
        )));
    }

    Ok(())
}

/// Checks that an output file stem is a single, plain path segment.
pub fn is_safe_output_name(name: &str) -> bool {
    output_name_errors(name).is_empty()
}

fn output_name_errors(name: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push("output name cannot be empty".to_string());
        return errors;
    }

    if name.contains('/') || name.contains('\\') {
        errors.push(format!(
            "output name must not contain path separators: '{}'",
            name
        ));
    }

    if name == "." || name == ".." {
        errors.push(format!("output name must not be a relative directory: '{}'", name));
    }

    if name.len() >= 2 && name.chars().nth(1) == Some(':') {
        errors.push(format!("output name must not contain drive letter: '{}'", name));
    }

    errors
}

/// Validate a parsed job file, collecting every error.
pub fn validate_job_file(file: &JobFile) -> ValidationResult {
    let mut result = ValidationResult::new();

    if file.version != JOB_FILE_VERSION {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedVersion,
            format!(
                "unsupported job file version {}, expected {}",
                file.version, JOB_FILE_VERSION
            ),
            "version",
        ));
    }

    if file.jobs.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoJobs,
            "job file must declare at least one job",
            "jobs",
        ));
    }

    let mut packed_names = HashSet::new();
    let mut unpacked_names = HashSet::new();
    let mut bake_outputs = HashSet::new();

    for (i, job) in file.jobs.iter().enumerate() {
        match job {
            Job::Pack(pack) => {
                validate_name(&pack.name, &format!("jobs[{}].name", i), &mut result);
                validate_size(&pack.size, &format!("jobs[{}].size", i), &mut result);
                if !packed_names.insert(pack.name.as_str()) {
                    result.add_error(ValidationError::with_path(
                        ErrorCode::DuplicateOutputName,
                        format!("duplicate packed output name '{}'", pack.name),
                        format!("jobs[{}].name", i),
                    ));
                }
                for channel in crate::texture::Channel::ALL {
                    if let Some(source) = pack.channels.get(channel) {
                        if source.source_path().trim().is_empty() {
                            result.add_error(ValidationError::with_path(
                                ErrorCode::MissingInput,
                                format!("{} channel source path is empty", channel),
                                format!("jobs[{}].channels", i),
                            ));
                        }
                    }
                }
            }
            Job::Unpack(unpack) => {
                validate_name(&unpack.name, &format!("jobs[{}].name", i), &mut result);
                validate_size(&unpack.size, &format!("jobs[{}].size", i), &mut result);
                if unpack.source.trim().is_empty() {
                    result.add_error(ValidationError::with_path(
                        ErrorCode::MissingInput,
                        "unpack source path is empty",
                        format!("jobs[{}].source", i),
                    ));
                }
                if !unpacked_names.insert(unpack.name.as_str()) {
                    result.add_error(ValidationError::with_path(
                        ErrorCode::DuplicateOutputName,
                        format!("duplicate unpacked output name '{}'", unpack.name),
                        format!("jobs[{}].name", i),
                    ));
                }
            }
            Job::Bake(bake) => {
                if bake.mesh.trim().is_empty() {
                    result.add_error(ValidationError::with_path(
                        ErrorCode::MissingInput,
                        "bake mesh path is empty",
                        format!("jobs[{}].mesh", i),
                    ));
                }
                if bake.output.trim().is_empty() {
                    result.add_error(ValidationError::with_path(
                        ErrorCode::UnsafeOutputName,
                        "bake output path is empty",
                        format!("jobs[{}].output", i),
                    ));
                } else if !bake_outputs.insert(bake.output.as_str()) {
                    result.add_error(ValidationError::with_path(
                        ErrorCode::DuplicateOutputName,
                        format!("duplicate bake output '{}'", bake.output),
                        format!("jobs[{}].output", i),
                    ));
                }
                if let GroupingPolicy::Quantized { step } = bake.grouping {
                    if !step.is_finite() || step <= 0.0 {
                        result.add_error(ValidationError::with_path(
                            ErrorCode::InvalidGrouping,
                            format!("grouping step must be positive and finite, got {}", step),
                            format!("jobs[{}].grouping.step", i),
                        ));
                    }
                }
            }
        }
    }

    result
}

fn validate_name(name: &str, path: &str, result: &mut ValidationResult) {
    for message in output_name_errors(name) {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsafeOutputName,
            message,
            path,
        ));
    }
}

fn validate_size(size: &SizeSetting, path: &str, result: &mut ValidationResult) {
    if let Some((w, h)) = size.explicit() {
        if let Err(e) = validate_resolution(w, h) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidSize,
                e.to_string(),
                path,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{BakeJob, PackJob, UnpackJob};
    use crate::mesh::BakeMode;
    use crate::texture::{ChannelSource, PackedChannels, ResampleFilter};

    fn pack_job(name: &str, size: SizeSetting) -> Job {
        Job::Pack(PackJob {
            name: name.to_string(),
            size,
            filter: ResampleFilter::Bilinear,
            channels: PackedChannels {
                r: Some(ChannelSource::path("r.png")),
                ..Default::default()
            },
        })
    }

    fn file(jobs: Vec<Job>) -> JobFile {
        JobFile {
            version: JOB_FILE_VERSION,
            out_root: None,
            overwrite: true,
            jobs,
        }
    }

    #[test]
    fn test_validate_resolution_bounds() {
        assert!(validate_resolution(1, 1).is_ok());
        assert!(validate_resolution(MAX_DIMENSION, 1).is_ok());
        assert!(validate_resolution(MAX_DIMENSION + 1, 1).is_err());
        assert!(validate_resolution(4, 0).is_err());
    }

    #[test]
    fn test_safe_output_names() {
        assert!(is_safe_output_name("packed"));
        assert!(is_safe_output_name("body mask_01"));
        assert!(!is_safe_output_name(""));
        assert!(!is_safe_output_name("  "));
        assert!(!is_safe_output_name("../escape"));
        assert!(!is_safe_output_name("a\\b"));
        assert!(!is_safe_output_name(".."));
        assert!(!is_safe_output_name("C:stuff"));
    }

    #[test]
    fn test_valid_file_passes() {
        let result = validate_job_file(&file(vec![pack_job("packed", SizeSetting::Auto)]));
        assert!(result.is_ok(), "{:?}", result.errors);
    }

    #[test]
    fn test_version_and_empty_jobs() {
        let mut f = file(vec![]);
        f.version = 9;
        let result = validate_job_file(&f);
        let codes: Vec<_> = result.errors.iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![ErrorCode::UnsupportedVersion, ErrorCode::NoJobs]);
    }

    #[test]
    fn test_duplicate_names_and_bad_sizes() {
        let result = validate_job_file(&file(vec![
            pack_job("same", SizeSetting::Edge(0)),
            pack_job("same", SizeSetting::Auto),
        ]));
        let codes: Vec<_> = result.errors.iter().map(|e| e.code).collect();
        assert!(codes.contains(&ErrorCode::InvalidSize));
        assert!(codes.contains(&ErrorCode::DuplicateOutputName));
    }

    #[test]
    fn test_same_name_allowed_across_kinds() {
        let result = validate_job_file(&file(vec![
            pack_job("tex", SizeSetting::Auto),
            Job::Unpack(UnpackJob {
                source: "p.png".to_string(),
                name: "tex".to_string(),
                size: SizeSetting::Auto,
                filter: ResampleFilter::Bilinear,
            }),
        ]));
        assert!(result.is_ok(), "{:?}", result.errors);
    }

    #[test]
    fn test_bake_grouping_step_validated() {
        let result = validate_job_file(&file(vec![Job::Bake(BakeJob {
            mesh: "m.glb".to_string(),
            mode: BakeMode::AveragedNormalEncode,
            output: "out.json".to_string(),
            grouping: GroupingPolicy::Quantized { step: -1.0 },
            renormalize: false,
        })]));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::InvalidGrouping);
        assert_eq!(result.errors[0].path.as_deref(), Some("jobs[0].grouping.step"));
    }
}
