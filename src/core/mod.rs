//! Core library modules: configuration, error types, data model, the
//! per-author classifier and the report builder.

pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
