//! Smartsheet REST API (v2.0) implementation of the sheet client.

pub mod client;
pub mod request;

pub use client::{SmartsheetClient, SmartsheetSessions};

pub const DEFAULT_API_BASE: &str = "https://api.smartsheet.com/2.0";
