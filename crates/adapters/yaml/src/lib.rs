//! # lifematrix-adapter-yaml
//!
//! Device-document loader using [serde_yaml](https://docs.rs/serde_yaml).
//!
//! ## Responsibilities
//! - Parse a device YAML document (merge keys applied, local tags stripped)
//! - Convert YAML values into the `serde_json::Value` trees the domain schema reads
//! - Extract the `life_matrix` configuration block
//! - Build an [`InMemoryRegistry`](lifematrix_app::registry::InMemoryRegistry)
//!   from the ids declared by sibling platform blocks
//!
//! ## Dependency rule
//! Depends on `lifematrix-app` (for the registry) and `lifematrix-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod convert;
pub mod document;
pub mod error;

pub use document::{DEFAULT_COMPONENT_KEY, DeviceDocument, load_path, load_str};
pub use error::DocumentError;
