//! HTTP bracket service for the esports festival platform.
//!
//! Exposes the bracket engine from `esports_brackets` over a REST API,
//! with gateway-header identity, Prometheus metrics, and structured logging.
//! The binary in `main.rs` wires configuration, the roster-seeded store,
//! and graceful shutdown around [`api::create_router`].

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
