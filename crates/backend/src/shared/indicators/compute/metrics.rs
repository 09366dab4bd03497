use contracts::dashboards::d402_sales_drilldown::MetricsSnapshot;
use contracts::shared::indicators::*;

use crate::shared::format::{format_money, format_percent};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Render a value according to the indicator's format
pub fn format_value(format: &ValueFormat, value: f64) -> String {
    match format {
        ValueFormat::Money { currency } if currency == "$" => format_money(value),
        ValueFormat::Money { currency } => {
            format!("{} {}", format_money(value).replacen('$', "", 1), currency)
        }
        ValueFormat::Percent { decimals } => format_percent(value, *decimals),
    }
}

fn status_by_sign(value: f64) -> IndicatorStatus {
    if value > 0.0 {
        IndicatorStatus::Good
    } else if value < 0.0 {
        IndicatorStatus::Bad
    } else {
        IndicatorStatus::Neutral
    }
}

fn plain(meta: &IndicatorMeta, value: f64, status: IndicatorStatus) -> IndicatorValue {
    IndicatorValue {
        id: meta.id.clone(),
        label: meta.label.clone(),
        value,
        display: format_value(&meta.format, value),
        delta: None,
        delta_display: None,
        status,
    }
}

// ---------------------------------------------------------------------------
// Public compute functions
// ---------------------------------------------------------------------------

pub fn compute_total_sales(m: &MetricsSnapshot, meta: &IndicatorMeta) -> IndicatorValue {
    plain(meta, m.total_sales, IndicatorStatus::Neutral)
}

pub fn compute_total_profit(m: &MetricsSnapshot, meta: &IndicatorMeta) -> IndicatorValue {
    plain(meta, m.total_profit, status_by_sign(m.total_profit))
}

pub fn compute_profit_margin(m: &MetricsSnapshot, meta: &IndicatorMeta) -> IndicatorValue {
    let delta = m.profit_margin_delta;
    IndicatorValue {
        delta: Some(delta),
        delta_display: Some(format_value(&meta.format, delta)),
        ..plain(meta, m.profit_margin, status_by_sign(delta))
    }
}
