use contracts::shared::indicators::*;

/// Well-known indicator IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub fn total_sales() -> IndicatorId {
        IndicatorId::new("total_sales")
    }
    pub fn total_profit() -> IndicatorId {
        IndicatorId::new("total_profit")
    }
    pub fn profit_margin() -> IndicatorId {
        IndicatorId::new("profit_margin")
    }
}

pub fn drilldown_set_id() -> IndicatorSetId {
    IndicatorSetId::new("drilldown_metrics")
}

/// Build the full catalogue of indicators + sets.
pub fn build_catalog() -> IndicatorCatalog {
    let indicators = vec![
        IndicatorMeta {
            id: ids::total_sales(),
            label: "Total Sales".into(),
            format: ValueFormat::Money {
                currency: "$".into(),
            },
            description: Some("Sum of Sales over the selected sub-categories".into()),
        },
        IndicatorMeta {
            id: ids::total_profit(),
            label: "Total Profit".into(),
            format: ValueFormat::Money {
                currency: "$".into(),
            },
            description: Some("Sum of Profit over the selected sub-categories".into()),
        },
        IndicatorMeta {
            id: ids::profit_margin(),
            label: "Profit Margin (%)".into(),
            format: ValueFormat::Percent { decimals: 2 },
            description: Some(
                "Total Profit / Total Sales; delta against the margin of the whole dataset"
                    .into(),
            ),
        },
    ];

    let sets = vec![IndicatorSetMeta {
        id: drilldown_set_id(),
        label: "Key Metrics".into(),
        indicators: vec![ids::total_sales(), ids::total_profit(), ids::profit_margin()],
        columns: 3,
    }];

    IndicatorCatalog { indicators, sets }
}

/// Metadata of one indicator
pub fn find_meta(catalog: &IndicatorCatalog, id: &IndicatorId) -> Option<IndicatorMeta> {
    catalog.indicators.iter().find(|m| &m.id == id).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_set_member_has_metadata() {
        let catalog = build_catalog();
        for set in &catalog.sets {
            for id in &set.indicators {
                assert!(find_meta(&catalog, id).is_some(), "no metadata for {}", id.0);
            }
            assert_eq!(set.columns as usize, set.indicators.len());
        }
    }
}
