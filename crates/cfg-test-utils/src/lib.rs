//! Shared test utilities for the cfgsource workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures, fake and real
//! - [`repo`]: [`repo::ConfigRepo`] builder for a clonable repository of YAML files

pub mod git;
pub mod repo;
