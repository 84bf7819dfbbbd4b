//! LifecycleTracker Test Suite
//!
//! ## Modules
//!
//! - `transitions`: validation, classification and timed reset
//! - `supersede`: a newer submission overriding one still in flight
