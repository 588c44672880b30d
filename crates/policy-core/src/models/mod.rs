//! Data models for records, reports and configuration.

pub mod config;
pub mod record;
pub mod report;
