use contracts::projections::p909_superstore_sales::{DatasetSummary, SalesRecord};
use std::collections::HashMap;

use crate::shared::error::LoadError;

/// Read-only, ordered collection of normalized sales records.
///
/// Every sub-category belongs to exactly one category; construction fails
/// otherwise, so lookups below can rely on it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<SalesRecord>,
}

impl Dataset {
    /// Build a dataset, checking the sub-category → category mapping
    pub fn from_records(records: Vec<SalesRecord>) -> Result<Self, LoadError> {
        check_sub_category_owners(&records)?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct categories in first-appearance order
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.category.as_str()))
    }

    /// Distinct sub-categories of `category` in first-appearance order
    pub fn sub_categories_of(&self, category: &str) -> Vec<&str> {
        distinct(
            self.records
                .iter()
                .filter(|r| r.category == category)
                .map(|r| r.sub_category.as_str()),
        )
    }

    pub fn summary(&self, source: &str) -> DatasetSummary {
        DatasetSummary {
            source: source.to_string(),
            record_count: self.records.len(),
            category_count: self.categories().len(),
            sub_category_count: distinct(self.records.iter().map(|r| r.sub_category.as_str()))
                .len(),
            first_order_date: self.records.iter().map(|r| r.order_date).min(),
            last_order_date: self.records.iter().map(|r| r.order_date).max(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a SalesRecord;
    type IntoIter = std::slice::Iter<'a, SalesRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn check_sub_category_owners(records: &[SalesRecord]) -> Result<(), LoadError> {
    let mut owner: HashMap<&str, &str> = HashMap::new();

    for (idx, record) in records.iter().enumerate() {
        let category = *owner
            .entry(record.sub_category.as_str())
            .or_insert(record.category.as_str());
        if category != record.category {
            return Err(LoadError::schema(
                idx + 1,
                "Sub_Category",
                format!(
                    "'{}' belongs to category '{}' but is listed under '{}'",
                    record.sub_category, category, record.category
                ),
            ));
        }
    }

    Ok(())
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = std::collections::HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}
