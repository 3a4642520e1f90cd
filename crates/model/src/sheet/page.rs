use serde::{Deserialize, Serialize};

/// A row as reported by the sheet metadata query. Only the fields the
/// enrichment needs are kept; cells are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow {
    /// Stable row key assigned by the service.
    pub id: i64,
    /// 1-based position of the row in the sheet.
    pub row_number: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPage {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub total_row_count: Option<u64>,
    #[serde(default)]
    pub rows: Vec<SheetRow>,
}

impl SheetPage {
    /// Row ordinals in response order.
    pub fn row_numbers(&self) -> Vec<i64> {
        self.rows.iter().map(|row| row.row_number).collect()
    }
}
