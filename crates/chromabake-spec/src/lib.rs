//! chromabake Shared Types
//!
//! This crate provides the types shared by the chromabake backends and CLI:
//! vertex streams and bake modes for the mesh backend, channel sources and
//! target sizes for the texture backend, job files, error types, and
//! validation.
//!
//! # Example
//!
//! ```
//! use chromabake_spec::{BakeMode, TargetSize, Vec3, VertexStream};
//!
//! let positions = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)];
//! let normals = vec![Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
//! let stream = VertexStream::new(positions, normals).unwrap();
//! assert_eq!(stream.len(), 2);
//!
//! let size = TargetSize::new(512, 512).unwrap();
//! assert_eq!(size.pixel_count(), 512 * 512);
//! assert_eq!("averaged-normals".parse::<BakeMode>().unwrap(), BakeMode::AveragedNormalEncode);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Core `CodecError`, the `BackendError` trait, and job validation errors
//! - [`math`]: `Vec3`
//! - [`mesh`]: Vertex stream, bake mode, baked colors, grouping policy
//! - [`texture`]: Channels, channel sources, resampling filters, target sizes and presets
//! - [`job`]: JSON job file types
//! - [`validation`]: Resolution, output name, and job file validation

pub mod error;
pub mod job;
pub mod math;
pub mod mesh;
pub mod texture;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{BackendError, CodecError, ErrorCode, JobError, ValidationError, ValidationResult};
pub use job::{
    BakeJob, Job, JobFile, PackJob, SizeSetting, UnpackJob, DEFAULT_OUT_ROOT, DEFAULT_PACKED_NAME,
    DEFAULT_UNPACKED_NAME, JOB_FILE_VERSION,
};
pub use math::Vec3;
pub use mesh::{BakeMode, BakedColor, GroupingPolicy, Vertex, VertexStream};
pub use texture::{
    auto_select_size, Channel, ChannelSource, ColorComponent, PackedChannels, ResampleFilter,
    TargetSize, SIZE_PRESETS,
};
pub use validation::{is_safe_output_name, validate_job_file, validate_resolution};
