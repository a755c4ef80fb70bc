use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Presentational state of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Success,
    Warning,
    Danger,
}

impl FieldState {
    /// The CSS class carrying the state.
    pub fn class(&self) -> &'static str {
        match self {
            FieldState::Success => "is-success",
            FieldState::Warning => "is-warning",
            FieldState::Danger => "is-danger",
        }
    }

    pub(crate) fn of(valid: bool) -> Self {
        if valid {
            FieldState::Success
        } else {
            FieldState::Danger
        }
    }
}

impl Serialize for FieldState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.class())
    }
}

/// Result of a single-field validator.
///
/// Serialises as `{"valid": .., "<field>Classes": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValidation {
    pub valid: bool,
    /// Key of the state in the serialised form, e.g. `titleClasses`.
    pub classes_key: &'static str,
    pub state: FieldState,
}

impl FieldValidation {
    pub(crate) fn new(classes_key: &'static str, valid: bool) -> Self {
        Self {
            valid,
            classes_key,
            state: FieldState::of(valid),
        }
    }
}

impl Serialize for FieldValidation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldValidation", 2)?;
        state.serialize_field("valid", &self.valid)?;
        state.serialize_field(self.classes_key, &self.state)?;
        state.end()
    }
}

/// Result of the data source validator, which covers two fields at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSourceValidation {
    pub valid: bool,
    pub doi: FieldState,
    pub url: FieldState,
}

impl Serialize for DataSourceValidation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DataSourceValidation", 3)?;
        state.serialize_field("valid", &self.valid)?;
        state.serialize_field("dataSourceDOIClasses", &self.doi)?;
        state.serialize_field("dataSourceURLClasses", &self.url)?;
        state.end()
    }
}

/// A raw form value: text, a checkbox, or nothing yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput<'a> {
    Missing,
    Text(&'a str),
    Flag(bool),
}

impl<'a> From<&'a str> for FieldInput<'a> {
    fn from(value: &'a str) -> Self {
        FieldInput::Text(value)
    }
}

impl<'a> From<Option<&'a str>> for FieldInput<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(FieldInput::Missing, FieldInput::Text)
    }
}

impl From<bool> for FieldInput<'_> {
    fn from(value: bool) -> Self {
        FieldInput::Flag(value)
    }
}

impl From<Option<bool>> for FieldInput<'_> {
    fn from(value: Option<bool>) -> Self {
        value.map_or(FieldInput::Missing, FieldInput::Flag)
    }
}

pub const VALUE_REQUIRED_MESSAGE: &str = "A value must be provided.";

/// Any checkbox state or non-empty text counts as a value.
pub fn has_value_validator<'a>(value: impl Into<FieldInput<'a>>) -> Option<String> {
    match value.into() {
        FieldInput::Flag(_) => None,
        FieldInput::Text(text) if !text.is_empty() => None,
        _ => Some(VALUE_REQUIRED_MESSAGE.to_string()),
    }
}

fn has_value<'a>(value: impl Into<FieldInput<'a>>) -> bool {
    has_value_validator(value).is_none()
}

/// Exactly one of this field and `xor_field` must be filled.
pub fn xor_has_value_validator(
    value: Option<&str>,
    xor_field: &str,
    xor_value: Option<&str>,
) -> Option<String> {
    match (has_value(value), has_value(xor_value)) {
        (false, false) => Some(format!("This field must be filled if {} is empty", xor_field)),
        (true, true) => Some(format!("This field must be blank if {} is filled", xor_field)),
        _ => None,
    }
}

/// This field and `and_field` must both be filled. With `xnor`, both being
/// blank is accepted too.
pub fn both_have_value_validator(
    value: Option<&str>,
    and_field: &str,
    and_value: Option<&str>,
    xnor: bool,
) -> Option<String> {
    let first = has_value(value);
    let second = has_value(and_value);

    if (first && second) || (xnor && !first && !second) {
        return None;
    }
    if !first {
        Some(format!("This field must not be blank if '{}' has a value", and_field))
    } else {
        Some(format!("'{}' must not be blank if this field has a value", and_field))
    }
}

/// Text that is more than whitespace.
pub(crate) fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}
