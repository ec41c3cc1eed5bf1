//! # dv-checks
//!
//! Schema-driven configuration for pluggable data-quality checks.
//!
//! - [`FieldKind`] is a tagged union over every configuration widget shape.
//!   Adding a check type needs a catalog entry plus, at most, one new variant
//!   handled in [`FieldSpec::render`], [`FieldSpec::validate`], and
//!   [`FieldSpec::parse_input`].
//! - [`CheckSchemaRegistry`] resolves the remote check catalog into typed
//!   [`CheckDescriptor`]s. Loading fails soft to an empty registry.
//! - [`CheckConfigModel`] is an immutable key → value mapping. Every mutation
//!   returns a new model and touches exactly one key.
//! - [`ConfigForm`] applies [`FieldEdit`]s with validation against the
//!   current [`ColumnSet`](dv_core::entities::ColumnSet).

mod catalog;
mod error;
mod field;
mod form;
mod model;
mod registry;
mod view;
mod wire;

pub use catalog::{builtin_field, humanize};
pub use error::{CatalogError, FieldError};
pub use field::{EnumOption, FieldKind, FieldSpec};
pub use form::{ConfigForm, FieldEdit, parse_json_map, parse_rules};
pub use model::{CheckConfigModel, FieldPath};
pub use registry::{CheckDescriptor, CheckSchemaRegistry};
pub use view::{ColumnOption, FieldView};
pub use wire::WireConfig;
