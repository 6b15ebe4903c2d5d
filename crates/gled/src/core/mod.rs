//! # Core Module
//!
//! Shared configuration types used by the window, shader loading and the
//! application entry point.

pub mod config;

pub use config::{AppConfig, ShaderConfig, WindowConfig};
