use serde::{Deserialize, Serialize};
use std::fmt;

/// Allow-listed recipient sources.
///
/// The HTTP request names one of these logical sources; the mapping to a
/// concrete table is fixed here, so no caller input ever reaches the SQL text.
/// Anything outside the list is rejected at request deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTable {
    Customers,
    Subscribers,
    Staff,
}

impl SourceTable {
    /// Table holding this source's numbers. The column is always
    /// `phone_number`.
    pub fn table_name(self) -> &'static str {
        match self {
            SourceTable::Customers => "customers",
            SourceTable::Subscribers => "subscribers",
            SourceTable::Staff => "staff",
        }
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}
