//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Identity-keyed collections
//! - Frame timing
//! - Logging bootstrap

pub mod collections;
pub mod time;
pub mod logging;
