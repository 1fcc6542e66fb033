//! Unified domain model for the content corpus.
//!
//! # Responsibility
//! - Define canonical data structures shared by the whole pipeline.
//! - Keep one note-centric shape for validation, graph and stats views.
//!
//! # Invariants
//! - Every note is identified by a stable `slug`.
//! - Validation errors are advisory data, never control flow.

pub mod note;
pub mod validation;
