//! Shared utilities for gsmenv

pub mod tracing;
