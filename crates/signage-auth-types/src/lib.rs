//! Session types shared by the signage services.
//!
//! Provides session-token signing and validation, the session cookie builders,
//! and the `AdminIdentity` extractor.

pub mod cookie;
pub mod identity;
pub mod token;
