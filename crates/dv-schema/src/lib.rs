//! # dv-schema
//!
//! JSON Schemas for the payloads the remote processing service returns.
//!
//! Payload types are defined in `dv-core` with `#[derive(JsonSchema)]`. This
//! crate builds their schemas once, validates raw JSON against them before it
//! enters the workflow, and exports them for the `dvz schema` command.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
