//! # lifematrix-domain
//!
//! Pure domain model for the LifeMatrix configuration adapter.
//!
//! ## Responsibilities
//! - Foundational types: component identifiers and kinds, error conventions, time periods
//! - Define the **schema** (a tree of field descriptors) and its recursive evaluation
//! - Define the **validated settings** (`LifeMatrixConfig`) produced from a schema pass
//! - Define **screens** and **styles** with their fixed numeric/label encodings
//! - Define the **wiring instructions** emitted for the generated component instance
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! Configuration mappings arrive as [`serde_json::Value`] trees; where they came
//! from (YAML file, test fixture, …) is an adapter concern.

pub mod error;
pub mod id;
pub mod time_period;

pub mod config;
pub mod instruction;
pub mod schema;
pub mod screen;
pub mod style;
pub mod value;
