//! Library exports for reuse in the binary and integration tests.
/// Application directory helpers.
pub mod app_dirs;
/// Persisted TOML settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Shared HTTP agent configuration.
pub mod http_client;
/// Tracing subscriber setup.
pub mod logging;
/// Prediction requests, normalization and export.
pub mod prediction;
