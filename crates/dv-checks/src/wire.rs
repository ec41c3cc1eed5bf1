//! Conversion between [`CheckConfigModel`] and the remote configuration format.

use serde_json::{Map, Value};

use crate::field::FieldSpec;
use crate::model::CheckConfigModel;
use crate::registry::CheckSchemaRegistry;

/// The JSON object sent to `POST /configure-checks` and returned by
/// `GET /config/default`.
pub type WireConfig = Map<String, Value>;

impl CheckConfigModel {
    /// Serialize for submission, dropping values equal to their kind's
    /// neutral default.
    ///
    /// Group children at their neutral value are dropped, and so is a group
    /// left empty. Keys without a known field are sent unchanged.
    #[must_use]
    pub fn to_wire_format(&self, registry: &CheckSchemaRegistry) -> WireConfig {
        let mut wire = WireConfig::new();
        for (key, value) in self.as_map() {
            let kept = match registry.field(key) {
                Some(spec) => strip_neutral(spec, value),
                None => Some(value.clone()),
            };
            if let Some(value) = kept {
                wire.insert(key.clone(), value);
            }
        }
        wire
    }

    /// Hydrate a model field-by-field from the remote format.
    #[must_use]
    pub fn from_wire_format(wire: &WireConfig) -> Self {
        wire.iter()
            .fold(Self::new(), |model, (key, value)| {
                model.set_scalar(key, value.clone())
            })
    }
}

fn strip_neutral(spec: &FieldSpec, value: &Value) -> Option<Value> {
    let children = spec.children();
    if children.is_empty() {
        return (*value != spec.kind.neutral_value()).then(|| value.clone());
    }

    let object = value.as_object()?;
    let kept: Map<String, Value> = object
        .iter()
        .filter(|(child_key, child_value)| {
            spec.child(child_key)
                .is_none_or(|child| **child_value != child.kind.neutral_value())
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    (!kept.is_empty()).then_some(Value::Object(kept))
}
