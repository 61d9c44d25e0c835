//! Connection configuration for a Matrix infrastructure provider.
//!
//! A configure cycle decodes the structured configuration, falls back to
//! `MATRIX_*` environment variables, validates the result in two passes, and
//! builds a single [`MatrixClient`] shared by every resource and data source.
//! Problems are collected into [`Diagnostics`] rather than returned as errors.

pub mod client;
pub mod config;
pub mod datasource;
pub mod diagnostics;
pub mod logging;
pub mod provider;
pub mod resource;
pub mod schema;

pub use client::{ClientFactory, HttpClientFactory, MatrixClient, SharedClient};
pub use diagnostics::{AttributePath, Diagnostic, Diagnostics, Severity};
pub use provider::{ConfigureRequest, ConfigureResponse, CycleStage, MatrixProvider};
