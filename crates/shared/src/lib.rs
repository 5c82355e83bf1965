//! Shared errors and configuration for Ledgerview.
//!
//! This crate provides the pieces every other crate agrees on:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, DatabaseConfig, ReportConfig, ServerConfig};
pub use error::{AppError, AppResult};
