//! Inspection-report PDF service.
//!
//! Accepts an inspection-report JSON document over HTTP, renders it through
//! a headless Chrome instance against a local HTML template and returns the
//! resulting PDF.

pub mod browser;
pub mod config;
pub mod http;
pub mod services;
