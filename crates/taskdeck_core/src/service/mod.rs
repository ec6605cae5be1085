//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate gateway calls into use-case level APIs with auth gating,
//!   pre-flight validation and cached list reads.
//! - Keep presentation layers decoupled from storage details.
//!
//! # Invariants
//! - Every mutation invalidates the affected cached lists.
//! - Validation failures never reach the gateway.

pub mod project_service;
pub mod query_cache;
pub mod task_service;
