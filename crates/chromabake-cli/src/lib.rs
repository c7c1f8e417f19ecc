//! chromabake CLI library.
//!
//! Command implementations for the `chromabake` binary: vertex color baking,
//! texture channel packing and unpacking, and batch job files.

pub mod commands;
pub mod logging;
pub mod output;
