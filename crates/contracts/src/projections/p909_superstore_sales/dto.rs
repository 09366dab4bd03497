use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One normalized row of the Superstore sales file (P909)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub order_date: NaiveDate,

    // Dimensions
    pub category: String,
    pub sub_category: String,

    // Sums
    pub sales: f64,
    pub profit: f64,

    // Optional columns, present only when the file carries them
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl SalesRecord {
    pub fn new(
        order_date: NaiveDate,
        category: impl Into<String>,
        sub_category: impl Into<String>,
        sales: f64,
        profit: f64,
    ) -> Self {
        Self {
            order_date,
            category: category.into(),
            sub_category: sub_category.into(),
            sales,
            profit,
            order_id: None,
            quantity: None,
        }
    }
}

/// Summary of a finished load, returned alongside the dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub source: String,
    pub record_count: usize,
    pub category_count: usize,
    pub sub_category_count: usize,
    pub first_order_date: Option<NaiveDate>,
    pub last_order_date: Option<NaiveDate>,
}
