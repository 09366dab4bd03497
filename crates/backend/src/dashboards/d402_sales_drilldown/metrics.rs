use contracts::dashboards::d402_sales_drilldown::{MetricsSnapshot, SubCategoryMetrics};
use contracts::projections::p909_superstore_sales::SalesRecord;
use std::collections::BTreeMap;

use crate::projections::p909_superstore_sales::Dataset;

/// Profit as a percentage of sales; 0 when there are no sales
pub fn profit_margin(total_sales: f64, total_profit: f64) -> f64 {
    if total_sales == 0.0 {
        0.0
    } else {
        total_profit / total_sales * 100.0
    }
}

/// Summed sales and profit of a record set
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub sales: f64,
    pub profit: f64,
}

impl Totals {
    pub fn of<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        records.into_iter().fold(Self::default(), |acc, r| Self {
            sales: acc.sales + r.sales,
            profit: acc.profit + r.profit,
        })
    }

    pub fn margin(&self) -> f64 {
        profit_margin(self.sales, self.profit)
    }
}

/// Margin of the whole dataset, the baseline for every delta
pub fn dataset_margin(dataset: &Dataset) -> f64 {
    Totals::of(dataset).margin()
}

/// Metrics of `subset`, with the margin delta taken against `baseline_margin`
/// (the margin of the whole dataset, see [`dataset_margin`])
pub fn compute_metrics(subset: &[&SalesRecord], baseline_margin: f64) -> MetricsSnapshot {
    let totals = Totals::of(subset.iter().copied());
    let margin = totals.margin();

    MetricsSnapshot {
        total_sales: totals.sales,
        total_profit: totals.profit,
        profit_margin: margin,
        profit_margin_delta: margin - baseline_margin,
    }
}

/// Per sub-category metrics of `subset`, ordered by sub-category name
pub fn sub_category_breakdown(
    subset: &[&SalesRecord],
    baseline_margin: f64,
) -> Vec<SubCategoryMetrics> {
    let mut groups: BTreeMap<&str, Vec<&SalesRecord>> = BTreeMap::new();
    for &record in subset {
        groups
            .entry(record.sub_category.as_str())
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .map(|(sub_category, records)| {
            let totals = Totals::of(records);
            let margin = totals.margin();
            SubCategoryMetrics {
                sub_category: sub_category.to_string(),
                sales: totals.sales,
                profit: totals.profit,
                profit_margin: margin,
                profit_margin_delta: margin - baseline_margin,
            }
        })
        .collect()
}
