use contracts::dashboards::d402_sales_drilldown::{
    DashboardSnapshot, DrilldownData, DrilldownView, EmptySelectionWarning, OverviewView,
    SelectionOptions, SelectionState,
};

use super::{aggregation, filter, metrics};
use crate::projections::p909_superstore_sales::Dataset;
use crate::shared::indicators::{metadata, IndicatorRegistry};

/// Unfiltered overview: category bar chart and monthly line chart
pub fn get_overview(dataset: &Dataset) -> OverviewView {
    let totals = metrics::Totals::of(dataset);
    let categories = aggregation::category_totals(dataset);
    let monthly_sales = aggregation::monthly_sales(dataset);

    tracing::info!(
        "D402 Dashboard: overview with {} categories over {} months",
        categories.len(),
        monthly_sales.len()
    );

    OverviewView {
        record_count: dataset.len(),
        total_sales: totals.sales,
        total_profit: totals.profit,
        dataset_margin: totals.margin(),
        categories,
        monthly_sales,
    }
}

/// Options for the category select box and the sub-category multi-select
pub fn get_selection_options(dataset: &Dataset, category: Option<&str>) -> SelectionOptions {
    filter::selection_options(dataset, category)
}

/// Filtered drill-down for one selection snapshot
pub fn get_drilldown(dataset: &Dataset, selection: &SelectionState) -> DrilldownView {
    let selection = filter::sanitize_selection(dataset, selection);

    if selection.category.is_none() {
        tracing::info!("D402 Dashboard: no category selected");
        return DrilldownView::EmptySelection(EmptySelectionWarning::no_category());
    }

    let subset = filter::cascade(dataset, &selection);
    if subset.is_empty() {
        tracing::info!(
            "D402 Dashboard: no sub-categories selected in {:?}",
            selection.category
        );
        return DrilldownView::EmptySelection(EmptySelectionWarning::no_sub_categories());
    }

    let baseline = metrics::dataset_margin(dataset);
    let snapshot = metrics::compute_metrics(&subset, baseline);
    let cards = IndicatorRegistry::new().compute_set(&metadata::drilldown_set_id(), &snapshot);

    tracing::info!(
        "D402 Dashboard: {} records for {:?} / {:?}, margin {:.2}% (delta {:.2}%)",
        subset.len(),
        selection.category,
        selection.sub_categories,
        snapshot.profit_margin,
        snapshot.profit_margin_delta
    );

    DrilldownView::Ready(DrilldownData {
        record_count: subset.len(),
        monthly_sales: aggregation::monthly_sales(subset.iter().copied()),
        breakdown: metrics::sub_category_breakdown(&subset, baseline),
        metrics: snapshot,
        cards,
        selection,
    })
}

/// Overview, widget options and drill-down for one render
pub fn get_dashboard(dataset: &Dataset, selection: &SelectionState) -> DashboardSnapshot {
    DashboardSnapshot {
        overview: get_overview(dataset),
        options: get_selection_options(dataset, selection.category.as_deref()),
        drilldown: get_drilldown(dataset, selection),
    }
}
