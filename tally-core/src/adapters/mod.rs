//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - JSON file for the SnapshotStore port
//! - Remote backend HTTP client for DocumentStore and AuthProvider
//! - Gemini HTTP client for Advisor
//! - In-memory stores for tests and offline development

pub mod gemini;
pub mod json_snapshot;
pub mod memory;
pub mod remote;
