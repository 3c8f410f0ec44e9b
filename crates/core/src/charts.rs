//! Aggregates behind the admin charts screen.

use serde::{Deserialize, Serialize};

/// Raw `GET /dashboard/charts` response (grouped aggregates from the server).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsResponse {
    #[serde(default)]
    pub category_summary: Vec<CategorySummary>,
    #[serde(default)]
    pub status_summary: Vec<StatusSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    #[serde(rename = "_sum", default)]
    pub sum: AmountSum,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AmountSum {
    /// Absent or null when the group has no rows.
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub status: String,
    #[serde(rename = "_count", default)]
    pub count: RowCount,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowCount {
    #[serde(rename = "_all", default)]
    pub all: u64,
}

/// One labelled value in a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

/// Chart-ready series: total amount per category and expense count per status.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    pub by_category: Vec<ChartPoint>,
    pub by_status: Vec<ChartPoint>,
}

impl ChartData {
    /// Largest category total, for scaling bars.
    pub fn max_category_value(&self) -> f64 {
        self.by_category
            .iter()
            .map(|p| p.value)
            .fold(0.0, f64::max)
    }

    pub fn total_status_count(&self) -> f64 {
        self.by_status.iter().map(|p| p.value).sum()
    }
}

impl From<ChartsResponse> for ChartData {
    fn from(raw: ChartsResponse) -> Self {
        Self {
            by_category: raw
                .category_summary
                .into_iter()
                .map(|c| ChartPoint {
                    name: c.category,
                    value: c.sum.amount.unwrap_or(0.0),
                })
                .collect(),
            by_status: raw
                .status_summary
                .into_iter()
                .map(|s| ChartPoint {
                    name: s.status,
                    value: s.count.all as f64,
                })
                .collect(),
        }
    }
}
