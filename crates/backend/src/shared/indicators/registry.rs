use contracts::dashboards::d402_sales_drilldown::MetricsSnapshot;
use contracts::shared::indicators::*;
use std::collections::HashMap;

use super::compute::metrics;
use super::metadata::{self, ids};

type ComputeFn = fn(&MetricsSnapshot, &IndicatorMeta) -> IndicatorValue;

/// Central registry: maps `IndicatorId` to its compute function.
pub struct IndicatorRegistry {
    catalog: IndicatorCatalog,
    fns: HashMap<String, ComputeFn>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        let mut fns: HashMap<String, ComputeFn> = HashMap::new();

        fns.insert(ids::total_sales().0, metrics::compute_total_sales);
        fns.insert(ids::total_profit().0, metrics::compute_total_profit);
        fns.insert(ids::profit_margin().0, metrics::compute_profit_margin);

        Self {
            catalog: metadata::build_catalog(),
            fns,
        }
    }

    /// Compute a batch of indicators, skipping unknown ids.
    pub fn compute(
        &self,
        ids: &[IndicatorId],
        snapshot: &MetricsSnapshot,
    ) -> Vec<IndicatorValue> {
        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            let compute_fn = self.fns.get(&id.0);
            let meta = metadata::find_meta(&self.catalog, id);
            match (compute_fn, meta) {
                (Some(compute_fn), Some(meta)) => results.push(compute_fn(snapshot, &meta)),
                _ => tracing::warn!("indicator {} not found in registry", id.0),
            }
        }

        results
    }

    /// Compute every indicator of a set, in set order.
    pub fn compute_set(
        &self,
        set_id: &IndicatorSetId,
        snapshot: &MetricsSnapshot,
    ) -> Vec<IndicatorValue> {
        match self.catalog.sets.iter().find(|s| &s.id == set_id) {
            Some(set) => self.compute(&set.indicators, snapshot),
            None => {
                tracing::warn!("indicator set {} not found", set_id.0);
                Vec::new()
            }
        }
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            total_sales: 1000.0,
            total_profit: 250.0,
            profit_margin: 25.0,
            profit_margin_delta: 5.0,
        }
    }

    #[test]
    fn test_drilldown_set_yields_three_cards_in_order() {
        let registry = IndicatorRegistry::new();
        let cards = registry.compute_set(&metadata::drilldown_set_id(), &snapshot());

        let labels: Vec<_> = cards.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Total Sales", "Total Profit", "Profit Margin (%)"]);
        assert_eq!(cards[0].display, "$1,000.00");
        assert_eq!(cards[2].delta_display.as_deref(), Some("5.00%"));
        assert_eq!(cards[2].status, IndicatorStatus::Good);
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let registry = IndicatorRegistry::new();
        let cards = registry.compute(
            &[IndicatorId::new("nope"), ids::total_profit()],
            &snapshot(),
        );
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, ids::total_profit());

        let none = registry.compute_set(&IndicatorSetId::new("nope"), &snapshot());
        assert!(none.is_empty());
    }
}
