use crate::catalog;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

/// A query-time reference to one entity instance, as supplied by a gateway in
/// the `representations` argument of `_entities`.
///
/// On the wire a representation is a free-form `_Any` object carrying a
/// `__typename` string plus the values of the named type's key fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Representation {
    typename: String,
    fields: Map<String, Value>,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RepresentationError {
    #[error("An entity representation must be an object value")]
    NotAnObject,

    #[error("An entity representation must carry a `__typename` key")]
    MissingTypename,

    #[error("The `__typename` of an entity representation must be a string")]
    NonStringTypename,
}

impl Representation {
    /// Parses a raw `_Any` value into a representation.
    pub fn from_value(value: &Value) -> Result<Self, RepresentationError> {
        let Value::Object(entries) = value else {
            return Err(RepresentationError::NotAnObject);
        };
        let typename = match entries.get(catalog::TYPENAME_FIELD_NAME) {
            Some(Value::String(typename)) => typename.clone(),
            Some(_) => return Err(RepresentationError::NonStringTypename),
            None => return Err(RepresentationError::MissingTypename),
        };

        let mut fields = entries.clone();
        fields.remove(catalog::TYPENAME_FIELD_NAME);
        Ok(Self { typename, fields })
    }

    /// The entity type this representation refers to.
    pub fn typename(&self) -> &str {
        &self.typename
    }

    /// The key-field values, with `__typename` stripped out.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
