use chrono::{Datelike, Days, NaiveDate};
use contracts::dashboards::d402_sales_drilldown::{CategoryTotals, MonthlyPoint};
use contracts::projections::p909_superstore_sales::SalesRecord;
use std::collections::BTreeMap;

/// Totals per category, ordered by category name
pub fn category_totals<'a, I>(records: I) -> Vec<CategoryTotals>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut groups: BTreeMap<&str, CategoryTotals> = BTreeMap::new();

    for record in records {
        let totals = groups
            .entry(record.category.as_str())
            .or_insert_with(|| CategoryTotals {
                category: record.category.clone(),
                sales: 0.0,
                profit: 0.0,
                quantity: 0,
                record_count: 0,
            });
        totals.sales += record.sales;
        totals.profit += record.profit;
        totals.quantity += record.quantity.unwrap_or(0);
        totals.record_count += 1;
    }

    groups.into_values().collect()
}

/// First day of the calendar month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Group records into calendar-month buckets keyed by month start.
///
/// Every record lands in exactly one bucket; months without records have
/// no entry.
pub fn group_by_month<'a, I, F>(
    records: I,
    date_of: F,
) -> BTreeMap<NaiveDate, Vec<&'a SalesRecord>>
where
    I: IntoIterator<Item = &'a SalesRecord>,
    F: Fn(&SalesRecord) -> NaiveDate,
{
    let mut buckets: BTreeMap<NaiveDate, Vec<&'a SalesRecord>> = BTreeMap::new();
    for record in records {
        buckets
            .entry(month_start(date_of(record)))
            .or_default()
            .push(record);
    }
    buckets
}

/// Monthly series over an arbitrary date field, ascending by month
pub fn monthly_series_by<'a, I, F>(records: I, date_of: F) -> Vec<MonthlyPoint>
where
    I: IntoIterator<Item = &'a SalesRecord>,
    F: Fn(&SalesRecord) -> NaiveDate,
{
    group_by_month(records, date_of)
        .into_iter()
        .map(|(month, bucket)| MonthlyPoint {
            month,
            label: month.format("%Y-%m").to_string(),
            long_label: month.format("%B %Y").to_string(),
            sales: bucket.iter().map(|r| r.sales).sum(),
            profit: bucket.iter().map(|r| r.profit).sum(),
            record_count: bucket.len(),
        })
        .collect()
}

/// Monthly series by order date
pub fn monthly_sales<'a, I>(records: I) -> Vec<MonthlyPoint>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    monthly_series_by(records, |r| r.order_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(order_date: NaiveDate, category: &str, sales: f64, profit: f64) -> SalesRecord {
        SalesRecord::new(order_date, category, format!("{category}-sub"), sales, profit)
    }

    fn sample() -> Vec<SalesRecord> {
        vec![
            record(date(2024, 3, 31), "Technology", 40.0, 4.0),
            record(date(2024, 1, 15), "Furniture", 100.0, 10.0),
            record(date(2024, 1, 31), "Office Supplies", 7.5, -1.0),
            record(date(2023, 12, 1), "Furniture", 20.0, 2.0),
            record(date(2024, 3, 1), "Furniture", 200.0, -20.0),
        ]
    }

    #[test]
    fn test_category_totals_preserve_grand_total() {
        let records = sample();
        let totals = category_totals(&records);

        let names: Vec<_> = totals.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(names, vec!["Furniture", "Office Supplies", "Technology"]);

        let furniture = &totals[0];
        assert_eq!(furniture.sales, 320.0);
        assert_eq!(furniture.profit, -8.0);
        assert_eq!(furniture.record_count, 3);

        let grand: f64 = totals.iter().map(|t| t.sales).sum();
        let direct: f64 = records.iter().map(|r| r.sales).sum();
        assert!((grand - direct).abs() < 1e-9);
    }

    #[test]
    fn test_category_totals_sum_quantity() {
        let mut records = sample();
        records[1].quantity = Some(2);
        records[4].quantity = Some(5);

        let totals = category_totals(&records);
        assert_eq!(totals[0].quantity, 7);
        assert_eq!(totals[1].quantity, 0);
    }

    #[test]
    fn test_empty_inputs_give_empty_aggregates() {
        let records: Vec<SalesRecord> = Vec::new();
        assert!(category_totals(&records).is_empty());
        assert!(monthly_sales(&records).is_empty());
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start(date(2024, 2, 29)), date(2024, 2, 1));
        assert_eq!(month_start(date(2024, 1, 1)), date(2024, 1, 1));
        assert_eq!(month_start(date(2023, 12, 31)), date(2023, 12, 1));
    }

    #[test]
    fn test_monthly_sales_are_calendar_buckets_without_zero_fill() {
        let records = sample();
        let series = monthly_sales(&records);

        let labels: Vec<_> = series.iter().map(|p| p.label.as_str()).collect();
        // February has no records and is omitted
        assert_eq!(labels, vec!["2023-12", "2024-01", "2024-03"]);

        assert_eq!(series[1].month, date(2024, 1, 1));
        assert_eq!(series[1].sales, 107.5);
        assert_eq!(series[1].profit, 9.0);
        assert_eq!(series[1].record_count, 2);
        assert_eq!(series[1].long_label, "January 2024");
        assert_eq!(series[2].sales, 240.0);
    }

    #[test]
    fn test_group_by_month_partitions_records() {
        let records = sample();
        let buckets = group_by_month(&records, |r| r.order_date);

        let mut seen = 0;
        for (month, bucket) in &buckets {
            for r in bucket {
                assert_eq!(month_start(r.order_date), *month);
                seen += 1;
            }
        }
        assert_eq!(seen, records.len());

        // Each input record appears in exactly one bucket
        for r in &records {
            let hits = buckets
                .values()
                .flatten()
                .filter(|b| std::ptr::eq(**b, r))
                .count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn test_month_order_follows_dates_not_labels() {
        let records = vec![
            record(date(2024, 9, 3), "Furniture", 1.0, 0.0),
            record(date(2024, 4, 3), "Furniture", 1.0, 0.0),
            record(date(2024, 12, 3), "Furniture", 1.0, 0.0),
        ];
        let long: Vec<_> = monthly_sales(&records)
            .into_iter()
            .map(|p| p.long_label)
            .collect();
        assert_eq!(long, vec!["April 2024", "September 2024", "December 2024"]);
    }

    #[test]
    fn test_monthly_series_by_other_date_field() {
        let records = sample();
        // Bucket by the month after the order date
        let series = monthly_series_by(&records, |r| {
            month_start(r.order_date) + Days::new(31)
        });
        assert_eq!(series.first().unwrap().label, "2024-01");
        assert_eq!(series.iter().map(|p| p.record_count).sum::<usize>(), 5);
    }
}
