//! core
//!
//! Core domain types and the pure transforms of schema reconciliation.
//!
//! # Modules
//!
//! - [`types`] - Strong types: EntityId, EntityStatus
//! - [`metadata`] - Canonical metadata and name-keyed annotations
//! - [`edit`] - The editable tree, rebuild and flatten
//! - [`validate`] - Structural validation of canonical metadata
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Canonical metadata is name-addressed; the editable tree is id-addressed
//! - Schemas are strict and self-describing
//! - Rebuild, flatten and validate are total and deterministic (given a seeded RNG)

pub mod config;
pub mod edit;
pub mod metadata;
pub mod types;
pub mod validate;
