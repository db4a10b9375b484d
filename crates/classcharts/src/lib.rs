//! Client for the ClassCharts parent API.
//!
//! Logs in with a parent account, scopes every read to one pupil, and turns
//! the JSON responses into typed records, aligned text tables and CSV files.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod render;
pub mod reports;
pub mod text;

pub use client::{HttpTransport, Session, Transport};
pub use config::Config;
pub use error::{ClassChartsError, Result};
