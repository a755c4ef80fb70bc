use std::sync::LazyLock;

use regex::Regex;

use crate::validation::fields::FieldValidation;

/// Eleven digits, optionally grouped `NN NNN NNN NNN`, never starting with 0.
static ABN_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[1-9]\d\s?\d{3}\s?\d{3}\s?\d{3}$").ok());

pub fn is_abn(abn: &str) -> bool {
    ABN_PATTERN.as_ref().is_some_and(|pattern| pattern.is_match(abn))
}

pub fn abn_validator(abn: &str) -> FieldValidation {
    FieldValidation::new("abnClasses", is_abn(abn))
}

/// The ABN with its grouping spaces removed.
pub fn compact_abn(abn: &str) -> String {
    abn.chars().filter(|c| !c.is_whitespace()).collect()
}
