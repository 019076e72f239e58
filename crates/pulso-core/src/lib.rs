//! Pulso Core - Shared functionality for Pulso tools
//!
//! Paths, configuration and the pt-BR number/currency conventions used
//! everywhere a figure is shown to, or typed in by, a business owner.

pub mod config;
pub mod format;
pub mod paths;

pub use config::{ColorMode, Config};
pub use paths::Paths;
