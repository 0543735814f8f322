//! Patch-operation protocol.
//!
//! Every partial edit the Platform API accepts is an ordered list of
//! `{operation, property, value}` triples sent as the sole body of a PATCH
//! request. The server applies the triples in sequence and neither reorders
//! nor deduplicates them, so a [`PatchDocument`] preserves insertion order.
//!
//! ```
//! use layer_client::domain::{PatchDocument, PatchOperation};
//!
//! let doc = PatchDocument::from(vec![
//!     PatchOperation::add("participants", "alice"),
//!     PatchOperation::delete("metadata.admin.name"),
//! ]);
//! let body = String::from_utf8(doc.to_body().unwrap()).unwrap();
//! assert_eq!(
//!     body,
//!     r#"[{"operation":"add","property":"participants","value":"alice"},{"operation":"delete","property":"metadata.admin.name"}]"#
//! );
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::errors::ValidationError;

/// Property name for conversation participant edits.
pub const PARTICIPANTS: &str = "participants";

/// Property name for block-list edits on a user.
pub const BLOCKS: &str = "blocks";

/// The four operations the patch format supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOperationKind {
    Add,
    Remove,
    Set,
    Delete,
}

impl PatchOperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchOperationKind::Add => "add",
            PatchOperationKind::Remove => "remove",
            PatchOperationKind::Set => "set",
            PatchOperationKind::Delete => "delete",
        }
    }

    /// Whether triples of this kind carry a value.
    pub fn takes_value(&self) -> bool {
        !matches!(self, PatchOperationKind::Delete)
    }
}

/// One atomic edit within a PATCH body.
///
/// Decoding rejects triples whose value does not match the operation:
/// add/remove/set must carry one (`null` counts), delete must not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireOperation")]
pub struct PatchOperation {
    operation: PatchOperationKind,
    property: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
}

#[derive(Deserialize)]
struct WireOperation {
    operation: PatchOperationKind,
    property: String,
    #[serde(default, deserialize_with = "present_value")]
    value: Option<Value>,
}

/// A `value` key that is present, even as `null`, is `Some`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl TryFrom<WireOperation> for PatchOperation {
    type Error = ValidationError;

    fn try_from(wire: WireOperation) -> Result<Self, Self::Error> {
        match (wire.operation.takes_value(), wire.value.is_some()) {
            (true, false) => Err(ValidationError::MissingPatchValue {
                operation: wire.operation.as_str(),
            }),
            (false, true) => Err(ValidationError::UnexpectedPatchValue),
            _ => Ok(Self {
                operation: wire.operation,
                property: wire.property,
                value: wire.value,
            }),
        }
    }
}

impl PatchOperation {
    /// Adds `value` to the collection at `property`.
    pub fn add(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(PatchOperationKind::Add, property, value.into())
    }

    /// Removes `value` from the collection at `property`.
    pub fn remove(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(PatchOperationKind::Remove, property, value.into())
    }

    /// Replaces whatever is at `property` with `value`.
    pub fn set(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(PatchOperationKind::Set, property, value.into())
    }

    /// Like [`PatchOperation::set`] for any serializable value.
    pub fn set_serialized<T: Serialize + ?Sized>(
        property: impl Into<String>,
        value: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::set(property, serde_json::to_value(value)?))
    }

    /// Deletes `property`. Carries no value.
    pub fn delete(property: impl Into<String>) -> Self {
        Self {
            operation: PatchOperationKind::Delete,
            property: property.into(),
            value: None,
        }
    }

    fn with_value(kind: PatchOperationKind, property: impl Into<String>, value: Value) -> Self {
        Self {
            operation: kind,
            property: property.into(),
            value: Some(value),
        }
    }

    pub fn operation(&self) -> PatchOperationKind {
        self.operation
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

/// Ordered sequence of patch operations, serialized as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(Vec<PatchOperation>);

impl PatchDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// One `kind` triple per value, all sharing `property`.
    pub fn each<I, V>(kind: PatchOperationKind, property: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self(
            values
                .into_iter()
                .map(|v| PatchOperation::with_value(kind, property, v.into()))
                .collect(),
        )
    }

    pub fn push(&mut self, op: PatchOperation) {
        self.0.push(op);
    }

    /// Appends every operation of `other`, keeping its order.
    pub fn extend(&mut self, other: PatchDocument) {
        self.0.extend(other.0);
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes the document as a PATCH request body.
    pub fn to_body(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.0)
    }
}

impl From<Vec<PatchOperation>> for PatchDocument {
    fn from(ops: Vec<PatchOperation>) -> Self {
        Self(ops)
    }
}

impl IntoIterator for PatchDocument {
    type Item = PatchOperation;
    type IntoIter = std::vec::IntoIter<PatchOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn delete_omits_value_field() {
        let body = serde_json::to_value(PatchOperation::delete("metadata.admin")).unwrap();
        assert_eq!(
            body,
            json!({"operation": "delete", "property": "metadata.admin"})
        );
    }

    #[test]
    fn set_carries_whole_collection() {
        let op = PatchOperation::set(PARTICIPANTS, vec!["a", "b"]);
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"operation": "set", "property": "participants", "value": ["a", "b"]})
        );
    }

    #[test]
    fn set_serialized_encodes_structs() {
        #[derive(Serialize)]
        struct Admin {
            name: &'static str,
        }
        let op = PatchOperation::set_serialized("metadata.admin", &Admin { name: "fred" }).unwrap();
        assert_eq!(op.value(), Some(&json!({"name": "fred"})));
    }

    #[test]
    fn each_emits_one_triple_per_value_in_order() {
        let doc = PatchDocument::each(PatchOperationKind::Remove, PARTICIPANTS, ["x", "y", "z"]);
        let values: Vec<_> = doc
            .operations()
            .iter()
            .map(|op| op.value().and_then(Value::as_str).unwrap().to_string())
            .collect();
        assert_eq!(values, vec!["x", "y", "z"]);
        assert!(doc
            .operations()
            .iter()
            .all(|op| op.operation() == PatchOperationKind::Remove && op.property() == PARTICIPANTS));
    }

    #[test]
    fn empty_document_is_empty_array() {
        assert_eq!(PatchDocument::new().to_body().unwrap(), b"[]");
    }

    #[test]
    fn decodes_regardless_of_field_order() {
        let doc: PatchDocument = serde_json::from_str(
            r#"[{"value":"u1","property":"blocks","operation":"add"},{"property":"blocks","operation":"remove","value":"u2"}]"#,
        )
        .unwrap();
        assert_eq!(
            doc,
            PatchDocument::from(vec![
                PatchOperation::add(BLOCKS, "u1"),
                PatchOperation::remove(BLOCKS, "u2"),
            ])
        );
    }

    #[test]
    fn null_value_survives_decoding() {
        let doc = PatchDocument::from(vec![PatchOperation::set("metadata.topic", Value::Null)]);
        let body = doc.to_body().unwrap();
        assert_eq!(
            body,
            br#"[{"operation":"set","property":"metadata.topic","value":null}]"#
        );

        let decoded: PatchDocument = serde_json::from_slice(&body).unwrap();
        assert_eq!(decoded, doc);
        assert_eq!(decoded.operations()[0].value(), Some(&Value::Null));
    }

    #[test]
    fn valued_operation_without_value_is_rejected() {
        let err = serde_json::from_str::<PatchOperation>(r#"{"operation":"add","property":"x"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("'add' patch operation requires a value"));
    }

    #[test]
    fn delete_with_value_is_rejected() {
        let result = serde_json::from_str::<PatchOperation>(
            r#"{"operation":"delete","property":"x","value":null}"#,
        );
        assert!(result.is_err());
        assert!(serde_json::from_str::<PatchOperation>(r#"{"operation":"delete","property":"x"}"#).is_ok());
    }

    #[test]
    fn only_delete_takes_no_value() {
        assert!(PatchOperationKind::Add.takes_value());
        assert!(PatchOperationKind::Remove.takes_value());
        assert!(PatchOperationKind::Set.takes_value());
        assert!(!PatchOperationKind::Delete.takes_value());
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "\\PC{0,12}".prop_map(Value::from),
            prop::collection::vec("[a-z0-9]{1,6}", 0..4).prop_map(Value::from),
        ]
    }

    fn arb_operation() -> impl Strategy<Value = PatchOperation> {
        let property = "[a-z]{1,8}(\\.[a-z]{1,8}){0,2}";
        prop_oneof![
            (property, "\\PC{0,12}").prop_map(|(p, v)| PatchOperation::add(p, v)),
            (property, "\\PC{0,12}").prop_map(|(p, v)| PatchOperation::remove(p, v)),
            (property, arb_value()).prop_map(|(p, v)| PatchOperation::set(p, v)),
            property.prop_map(|p| PatchOperation::delete(p)),
        ]
    }

    proptest! {
        #[test]
        fn wire_body_round_trips(ops in prop::collection::vec(arb_operation(), 0..16)) {
            let doc = PatchDocument::from(ops);
            let body = doc.to_body().unwrap();
            let decoded: PatchDocument = serde_json::from_slice(&body).unwrap();
            prop_assert_eq!(decoded, doc);
        }
    }
}
