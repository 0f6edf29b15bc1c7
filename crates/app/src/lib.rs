//! # lifematrix-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ComponentRegistry`: lookup of sibling components declared elsewhere in the device
//! - Define **driving/inbound** use-case structs:
//!   - `ConfigValidator`: schema validation into `LifeMatrixConfig`
//!   - `CodegenService`: reference resolution and ordered wiring emission
//! - Provide **in-process infrastructure** (an in-memory registry) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `lifematrix-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod registry;
pub mod services;
