//! # trowel-schema
//!
//! JSON Schema generation, validation, and registry for Trowel.
//!
//! This crate provides:
//! - `SchemaRegistry`: schemas for every input and output shape of the engine
//! - Validation of caller-supplied JSON before it reaches the engine
//! - Schema export for external tooling (`trowel schema` command)
//!
//! ## Architecture
//!
//! Boundary types are defined in the engine crates with `#[derive(JsonSchema)]`.
//! This crate imports those types and provides the registry and validation layer.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
