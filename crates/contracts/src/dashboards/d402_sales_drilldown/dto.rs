use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::shared::indicators::IndicatorValue;

/// Snapshot of the two dashboard widgets: category select box and
/// sub-category multi-select
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// `None` before the first render
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_categories: BTreeSet<String>,
}

impl SelectionState {
    pub fn new<I, S>(category: impl Into<String>, sub_categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: Some(category.into()),
            sub_categories: sub_categories.into_iter().map(Into::into).collect(),
        }
    }

    pub fn unselected() -> Self {
        Self::default()
    }
}

/// Values the widgets may offer for the current selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOptions {
    /// Distinct categories in first-appearance order
    pub categories: Vec<String>,
    /// Distinct sub-categories of the selected category, first-appearance order
    pub sub_categories: Vec<String>,
}

/// Totals of one category (bar chart keyed by category name)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub category: String,
    pub sales: f64,
    pub profit: f64,
    pub quantity: i64,
    pub record_count: usize,
}

/// One calendar-month bucket of a sales series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// First day of the month; the sort key
    pub month: NaiveDate,
    /// "2024-01"
    pub label: String,
    /// "January 2024"
    pub long_label: String,
    pub sales: f64,
    pub profit: f64,
    pub record_count: usize,
}

/// Profit metrics of a filtered subset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_sales: f64,
    pub total_profit: f64,
    /// Percent; 0 when `total_sales` is 0
    pub profit_margin: f64,
    /// `profit_margin` minus the dataset-wide margin, in percentage points
    pub profit_margin_delta: f64,
}

/// Per sub-category line of the drill-down breakdown table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategoryMetrics {
    pub sub_category: String,
    pub sales: f64,
    pub profit: f64,
    pub profit_margin: f64,
    pub profit_margin_delta: f64,
}

/// Unfiltered part of the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewView {
    pub record_count: usize,
    pub total_sales: f64,
    pub total_profit: f64,
    /// Dataset-wide profit margin, the baseline for every delta
    pub dataset_margin: f64,
    pub categories: Vec<CategoryTotals>,
    pub monthly_sales: Vec<MonthlyPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelectionReason {
    NoCategory,
    NoSubCategories,
}

/// Advisory shown in place of the drill-down charts and metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptySelectionWarning {
    pub reason: EmptySelectionReason,
    pub message: String,
}

impl EmptySelectionWarning {
    pub fn no_category() -> Self {
        Self {
            reason: EmptySelectionReason::NoCategory,
            message: "Please select a Category to view data.".to_string(),
        }
    }

    pub fn no_sub_categories() -> Self {
        Self {
            reason: EmptySelectionReason::NoSubCategories,
            message: "Please select at least one Sub-Category to view data.".to_string(),
        }
    }
}

/// Filtered part of the dashboard for a non-empty selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrilldownData {
    /// Selection after dropping sub-categories outside the category
    pub selection: SelectionState,
    pub record_count: usize,
    pub monthly_sales: Vec<MonthlyPoint>,
    pub metrics: MetricsSnapshot,
    pub cards: Vec<IndicatorValue>,
    pub breakdown: Vec<SubCategoryMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DrilldownView {
    Ready(DrilldownData),
    EmptySelection(EmptySelectionWarning),
}

impl DrilldownView {
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, DrilldownView::EmptySelection(_))
    }
}

/// Everything one render of the dashboard needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub overview: OverviewView,
    pub options: SelectionOptions,
    pub drilldown: DrilldownView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_serializes_with_state_tag() {
        let view = DrilldownView::EmptySelection(EmptySelectionWarning::no_sub_categories());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["state"], "empty_selection");
        assert_eq!(json["reason"], "no_sub_categories");
        assert!(json["message"].as_str().unwrap().contains("Sub-Category"));
    }

    #[test]
    fn test_selection_state_defaults_when_fields_missing() {
        let selection: SelectionState = serde_json::from_str("{}").unwrap();
        assert_eq!(selection, SelectionState::unselected());

        let selection: SelectionState =
            serde_json::from_str(r#"{"category":"Furniture","sub_categories":["Chairs","Chairs"]}"#)
                .unwrap();
        assert_eq!(selection.category.as_deref(), Some("Furniture"));
        assert_eq!(selection.sub_categories.len(), 1);
    }
}
