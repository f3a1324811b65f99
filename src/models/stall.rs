use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryField};

/// Server-reported availability of a single stall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StallStatus {
    #[default]
    Available,
    Booked,
    #[serde(alias = "locked")]
    LockedOther,
    // "blocked" and anything the backend invents later render as inactive
    #[serde(alias = "blocked", other)]
    Inactive,
}

impl StallStatus {
    /// Whether the stall can ever enter a user's selection.
    pub fn is_bookable(self) -> bool {
        matches!(self, StallStatus::Available)
    }
}

/// Stall as it arrives on the wire, category still in either shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StallRecord {
    pub stall_id: String,
    pub row: i32,
    pub column: i32,
    #[serde(default)]
    pub status: StallStatus,
    #[serde(default)]
    pub category: Option<CategoryField>,
}

impl StallRecord {
    /// Resolves the category against the event's catalog, producing the one
    /// in-memory shape the grid and the selection work with.
    pub fn resolve(self, catalog: &[Category]) -> Stall {
        Stall {
            stall_id: self.stall_id,
            row: self.row,
            column: self.column,
            status: self.status,
            category: self.category.and_then(|c| c.resolve(catalog)),
        }
    }
}

/// Canonical stall, addressed by 1-indexed grid coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stall {
    pub stall_id: String,
    pub row: i32,
    pub column: i32,
    pub status: StallStatus,
    pub category: Option<Category>,
}

impl Stall {
    /// Price in whole rupees; a stall without a priced category counts as 0.
    pub fn price(&self) -> i64 {
        self.category.as_ref().map(|c| c.price).unwrap_or(0)
    }
}

/// Grid bounds. Total cells = rows × columns, of which only a subset are
/// real stalls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub rows: i32,
    pub columns: i32,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            rows: 10,
            columns: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_parses_wire_aliases() {
        for (raw, want) in [
            ("available", StallStatus::Available),
            ("booked", StallStatus::Booked),
            ("locked-other", StallStatus::LockedOther),
            ("locked", StallStatus::LockedOther),
            ("blocked", StallStatus::Inactive),
            ("inactive", StallStatus::Inactive),
            ("something-new", StallStatus::Inactive),
        ] {
            let parsed: StallStatus = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(parsed, want, "raw status {raw:?}");
        }
    }

    #[test]
    fn missing_status_defaults_to_available() {
        let record: StallRecord =
            serde_json::from_value(json!({"stallId": "R1-C1", "row": 1, "column": 1})).unwrap();
        assert_eq!(record.status, StallStatus::Available);
    }
}
