use contracts::dashboards::d402_sales_drilldown::{
    DashboardSnapshot, DrilldownData, DrilldownView, MonthlyPoint, OverviewView, SelectionOptions,
};
use std::fmt::Write;

use crate::shared::format::{format_money, format_number, format_percent};

/// Plain-text rendering of a dashboard snapshot for the console
pub fn render_text(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    render_overview(&mut out, &snapshot.overview);
    render_options(&mut out, &snapshot.options);
    match &snapshot.drilldown {
        DrilldownView::Ready(data) => render_drilldown(&mut out, data),
        DrilldownView::EmptySelection(warning) => {
            let _ = writeln!(out, "\n⚠️ {}", warning.message);
        }
    }
    out
}

fn render_overview(out: &mut String, overview: &OverviewView) {
    let _ = writeln!(
        out,
        "=== Sales overview ({} records) ===",
        format_number(overview.record_count as u64)
    );
    let _ = writeln!(
        out,
        "Total sales {} | total profit {} | margin {}",
        format_money(overview.total_sales),
        format_money(overview.total_profit),
        format_percent(overview.dataset_margin, 2)
    );

    let _ = writeln!(out, "\n--- Sales by category ---");
    for row in &overview.categories {
        let _ = writeln!(
            out,
            "{:<20} {:>16} {:>16} {:>8}",
            row.category,
            format_money(row.sales),
            format_money(row.profit),
            row.quantity
        );
    }

    let _ = writeln!(out, "\n--- Sales by month ---");
    render_series(out, &overview.monthly_sales);
}

fn render_options(out: &mut String, options: &SelectionOptions) {
    let _ = writeln!(out, "\nCategories: {}", options.categories.join(", "));
    if !options.sub_categories.is_empty() {
        let _ = writeln!(out, "Sub-categories: {}", options.sub_categories.join(", "));
    }
}

fn render_drilldown(out: &mut String, data: &DrilldownData) {
    let category = data.selection.category.as_deref().unwrap_or_default();
    let subs: Vec<&str> = data.selection.sub_categories.iter().map(String::as_str).collect();

    let _ = writeln!(
        out,
        "\n=== {} / {} ({} records) ===",
        category,
        subs.join(", "),
        format_number(data.record_count as u64)
    );

    let _ = writeln!(out, "\n--- Sales over time for selected sub-categories ---");
    render_series(out, &data.monthly_sales);

    let _ = writeln!(out, "\n--- Key metrics ---");
    for card in &data.cards {
        match &card.delta_display {
            Some(delta) => {
                let _ = writeln!(out, "{:<20} {:>16}  ({})", card.label, card.display, delta);
            }
            None => {
                let _ = writeln!(out, "{:<20} {:>16}", card.label, card.display);
            }
        }
    }

    let _ = writeln!(out, "\n--- By sub-category ---");
    for row in &data.breakdown {
        let _ = writeln!(
            out,
            "{:<20} {:>16} {:>16} {:>10} {:>10}",
            row.sub_category,
            format_money(row.sales),
            format_money(row.profit),
            format_percent(row.profit_margin, 2),
            format_percent(row.profit_margin_delta, 2)
        );
    }
}

fn render_series(out: &mut String, series: &[MonthlyPoint]) {
    for point in series {
        let _ = writeln!(out, "{:<16} {:>16}", point.long_label, format_money(point.sales));
    }
}
