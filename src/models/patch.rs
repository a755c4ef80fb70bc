use serde::{Serialize, Serializer};

/// One field of a partial update.
///
/// Pair with
/// `#[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]` so
/// that omitting a field, clearing it and setting it are three distinct
/// outcomes on the wire: key absent, `null`, or the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the backend value untouched.
    Omit,
    /// Explicitly null the backend value.
    Clear,
    /// Replace the backend value.
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Omit
    }
}

impl<T> FieldUpdate<T> {
    pub fn is_omitted(&self) -> bool {
        matches!(self, FieldUpdate::Omit)
    }

    /// `Some` sets, `None` omits. Never produces `Clear`.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Omit,
        }
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<T> for FieldUpdate<T> {
    fn from(value: T) -> Self {
        FieldUpdate::Set(value)
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldUpdate::Set(value) => value.serialize(serializer),
            FieldUpdate::Omit | FieldUpdate::Clear => serializer.serialize_none(),
        }
    }
}
