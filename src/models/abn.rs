use serde::{Deserialize, Serialize};

/// Result of an Australian Business Register lookup, relayed by the backend
/// in the register's own PascalCase shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AbnLookup {
    pub abn: String,
    pub abn_status: String,
    pub abn_status_effective_from: String,
    pub acn: String,
    pub address_date: Option<String>,
    pub address_postcode: String,
    pub address_state: String,
    pub business_name: Vec<String>,
    pub entity_name: String,
    pub entity_type_code: String,
    pub entity_type_name: String,
    pub gst: Option<String>,
    pub message: String,
    pub email: String,
}

impl AbnLookup {
    /// The register reports active numbers with status `Active`.
    pub fn is_active(&self) -> bool {
        self.abn_status.eq_ignore_ascii_case("active")
    }
}
