//! GLSL source file loading

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The file could not be read, or is not valid UTF-8
    #[error("Failed to load shader file {}: {source}", path.display())]
    Io {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

/// Result type for asset loading
pub type AssetResult<T> = Result<T, AssetError>;

/// Read a shader source file as UTF-8 text
pub fn load_shader_source<P: AsRef<Path>>(path: P) -> AssetResult<String> {
    let path_ref = path.as_ref();
    log::debug!("[ASSET] Loading shader source from: {:?}", path_ref);

    let source = std::fs::read_to_string(path_ref).map_err(|source| AssetError::Io {
        path: path_ref.to_path_buf(),
        source,
    })?;

    log::debug!("[ASSET] Read {} bytes from {:?}", source.len(), path_ref);
    Ok(source)
}
