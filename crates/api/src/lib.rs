//! HTTP API: configuration, routing, validation and error normalization.

pub mod app;
pub mod config;
pub mod middleware;
