//! Asset loading
//!
//! Shader sources are plain UTF-8 text files; this module reads them and
//! reports I/O failures together with the offending path.

pub mod shader_source;

pub use shader_source::{load_shader_source, AssetError, AssetResult};
