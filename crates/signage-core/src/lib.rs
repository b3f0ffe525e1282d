//! Ambient building blocks shared by signage services: config loading, the common
//! error body, health handlers, request ids and tracing.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod tracing;
