use contracts::dashboards::d402_sales_drilldown::{SelectionOptions, SelectionState};
use contracts::projections::p909_superstore_sales::SalesRecord;
use std::collections::BTreeSet;

use crate::projections::p909_superstore_sales::Dataset;

/// Stage 1: records of the selected category.
///
/// An unset category selects nothing.
pub fn filter_by_category<'a>(
    dataset: &'a Dataset,
    category: Option<&str>,
) -> Vec<&'a SalesRecord> {
    match category {
        Some(category) => dataset.iter().filter(|r| r.category == category).collect(),
        None => Vec::new(),
    }
}

/// Stage 2: records of stage 1 whose sub-category is selected.
///
/// An empty selection selects nothing.
pub fn filter_by_sub_categories<'a>(
    records: &[&'a SalesRecord],
    selected: &BTreeSet<String>,
) -> Vec<&'a SalesRecord> {
    if selected.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .copied()
        .filter(|r| selected.contains(&r.sub_category))
        .collect()
}

/// Both stages in one call
pub fn cascade<'a>(dataset: &'a Dataset, selection: &SelectionState) -> Vec<&'a SalesRecord> {
    let by_category = filter_by_category(dataset, selection.category.as_deref());
    let filtered = filter_by_sub_categories(&by_category, &selection.sub_categories);

    tracing::debug!(
        "Cascade {:?}: {} records in category, {} after sub-category filter",
        selection.category,
        by_category.len(),
        filtered.len()
    );

    filtered
}

/// Drop sub-categories that do not belong to the selected category.
///
/// With no category selected, no sub-category can be selected either.
pub fn sanitize_selection(dataset: &Dataset, selection: &SelectionState) -> SelectionState {
    let Some(category) = selection.category.as_deref() else {
        return SelectionState::unselected();
    };

    let allowed: BTreeSet<&str> = dataset.sub_categories_of(category).into_iter().collect();
    let (kept, dropped): (BTreeSet<String>, BTreeSet<String>) = selection
        .sub_categories
        .iter()
        .cloned()
        .partition(|s| allowed.contains(s.as_str()));

    if !dropped.is_empty() {
        tracing::warn!(
            "Dropping sub-categories outside category '{}': {:?}",
            category,
            dropped
        );
    }

    SelectionState {
        category: Some(category.to_string()),
        sub_categories: kept,
    }
}

/// Widget domains: all categories, and the sub-categories of `category`
pub fn selection_options(dataset: &Dataset, category: Option<&str>) -> SelectionOptions {
    SelectionOptions {
        categories: dataset.categories().into_iter().map(str::to_string).collect(),
        sub_categories: category
            .map(|c| {
                dataset
                    .sub_categories_of(c)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Selection the select box shows before the user touches it: the first
/// category and no sub-categories
pub fn default_selection(dataset: &Dataset) -> SelectionState {
    SelectionState {
        category: dataset.categories().first().map(|c| c.to_string()),
        sub_categories: BTreeSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        let d = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        Dataset::from_records(vec![
            SalesRecord::new(d, "Furniture", "Chairs", 100.0, 10.0),
            SalesRecord::new(d, "Technology", "Phones", 300.0, 60.0),
            SalesRecord::new(d, "Furniture", "Tables", 50.0, -15.0),
            SalesRecord::new(d, "Office Supplies", "Paper", 20.0, 9.0),
            SalesRecord::new(d, "Furniture", "Chairs", 80.0, 4.0),
        ])
        .unwrap()
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_stage1_returns_only_the_category() {
        let dataset = dataset();
        let furniture = filter_by_category(&dataset, Some("Furniture"));
        assert_eq!(furniture.len(), 3);
        assert!(furniture.iter().all(|r| r.category == "Furniture"));
    }

    #[test]
    fn test_stage1_partitions_dataset_by_category() {
        let dataset = dataset();
        let total: usize = dataset
            .categories()
            .into_iter()
            .map(|c| filter_by_category(&dataset, Some(c)).len())
            .sum();
        assert_eq!(total, dataset.len());
    }

    #[test]
    fn test_stage1_unset_or_unknown_category_is_empty() {
        let dataset = dataset();
        assert!(filter_by_category(&dataset, None).is_empty());
        assert!(filter_by_category(&dataset, Some("Toys")).is_empty());
    }

    #[test]
    fn test_stage2_filters_by_membership() {
        let dataset = dataset();
        let furniture = filter_by_category(&dataset, Some("Furniture"));

        let chairs = filter_by_sub_categories(&furniture, &set(&["Chairs"]));
        assert_eq!(chairs.len(), 2);
        assert!(chairs.iter().all(|r| r.sub_category == "Chairs"));

        let both = filter_by_sub_categories(&furniture, &set(&["Chairs", "Tables"]));
        assert_eq!(both.len(), 3);
    }

    #[test]
    fn test_stage2_empty_selection_is_empty() {
        let dataset = dataset();
        let furniture = filter_by_category(&dataset, Some("Furniture"));
        assert!(!furniture.is_empty());
        assert!(filter_by_sub_categories(&furniture, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_cascade_leaves_dataset_untouched() {
        let dataset = dataset();
        let before = dataset.records().to_vec();

        let selection = SelectionState::new("Furniture", ["Tables"]);
        let filtered = cascade(&dataset, &selection);
        assert_eq!(filtered.len(), 1);
        assert!(std::ptr::eq(filtered[0], &dataset.records()[2]));

        assert_eq!(dataset.records(), before.as_slice());
    }

    #[test]
    fn test_sanitize_drops_foreign_sub_categories() {
        let dataset = dataset();
        let selection = SelectionState::new("Furniture", ["Chairs", "Phones", "Unknown"]);
        let clean = sanitize_selection(&dataset, &selection);
        assert_eq!(clean.category.as_deref(), Some("Furniture"));
        assert_eq!(clean.sub_categories, set(&["Chairs"]));

        let unset = SelectionState {
            category: None,
            sub_categories: set(&["Chairs"]),
        };
        assert_eq!(sanitize_selection(&dataset, &unset), SelectionState::unselected());
    }

    #[test]
    fn test_selection_options() {
        let dataset = dataset();
        let options = selection_options(&dataset, Some("Furniture"));
        assert_eq!(
            options.categories,
            vec!["Furniture", "Technology", "Office Supplies"]
        );
        assert_eq!(options.sub_categories, vec!["Chairs", "Tables"]);

        assert!(selection_options(&dataset, None).sub_categories.is_empty());
    }

    #[test]
    fn test_default_selection_picks_first_category() {
        let selection = default_selection(&dataset());
        assert_eq!(selection.category.as_deref(), Some("Furniture"));
        assert!(selection.sub_categories.is_empty());

        assert_eq!(default_selection(&Dataset::default()).category, None);
    }
}
