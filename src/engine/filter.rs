use std::collections::HashSet;

use crate::models::{Dimension, Record, Selection};

/// The non-empty dimensions of a selection, each as a lookup set.
struct ActiveFilter<'s> {
    dimensions: Vec<(Dimension, HashSet<&'s str>)>,
}

impl<'s> ActiveFilter<'s> {
    fn new(selection: &'s Selection) -> Self {
        let dimensions = Dimension::ALL
            .iter()
            .filter_map(|dim| {
                let values = selection.values(*dim);
                if values.is_empty() {
                    None
                } else {
                    Some((*dim, values.iter().map(String::as_str).collect()))
                }
            })
            .collect();
        Self { dimensions }
    }

    fn accepts(&self, record: &Record) -> bool {
        self.dimensions
            .iter()
            .all(|(dim, allowed)| allowed.contains(dim.value(record)))
    }
}

/// Keep the records matching every non-empty dimension of `selection`.
///
/// Never mutates `records`; an empty selection returns a full copy.
pub fn apply(records: &[Record], selection: &Selection) -> Vec<Record> {
    let filter = ActiveFilter::new(selection);
    records
        .iter()
        .filter(|r| filter.accepts(r))
        .cloned()
        .collect()
}

/// True when `record` satisfies every non-empty dimension of `selection`.
pub fn matches(record: &Record, selection: &Selection) -> bool {
    ActiveFilter::new(selection).accepts(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn rec(month: &str, dept: &str, customer: &str, resp: &str, sum: i64) -> Record {
        Record {
            month: month.into(),
            department: dept.into(),
            customer: customer.into(),
            responsible: resp.into(),
            sum: Decimal::from(sum),
            exec_time: Some(3.0),
            payment_time: None,
            payment_date: None,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            rec("2024-01", "Ops", "Acme", "Ivanov", 100),
            rec("2024-01", "IT", "Acme", "Petrov", 200),
            rec("2024-02", "Ops", "Globex", "Ivanov", 300),
            rec("2024-02", "IT", "Initech", "Sidorov", 400),
            rec("2024-03", "Ops", "Globex", "Petrov", 500),
        ]
    }

    #[test]
    fn empty_selection_is_identity() {
        let records = sample();
        assert_eq!(apply(&records, &Selection::new()), records);
    }

    #[test]
    fn single_dimension_is_membership() {
        let records = sample();
        let out = apply(&records, &Selection::new().months(["2024-01", "2024-03"]));
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|r| r.month == "2024-01" || r.month == "2024-03"));
    }

    #[test]
    fn dimensions_combine_with_and() {
        let records = sample();
        let selection = Selection::new()
            .departments(["Ops"])
            .customers(["Globex"])
            .responsibles(["Ivanov", "Petrov"]);
        let out = apply(&records, &selection);
        let sums: Vec<Decimal> = out.iter().map(|r| r.sum).collect();
        assert_eq!(sums, vec![Decimal::from(300), Decimal::from(500)]);
    }

    #[test]
    fn included_iff_matches_every_dimension() {
        let records = sample();
        let selection = Selection::new().months(["2024-02"]).departments(["IT", "Ops"]);
        let out = apply(&records, &selection);
        for r in &records {
            assert_eq!(out.contains(r), matches(r, &selection));
        }
        assert!(out.iter().all(|r| records.contains(r)));
    }

    #[test]
    fn no_match_yields_empty() {
        let records = sample();
        let out = apply(&records, &Selection::new().customers(["Nobody"]));
        assert!(out.is_empty());
        assert!(apply(&[], &Selection::new().months(["2024-01"])).is_empty());
    }

    #[test]
    fn input_is_untouched() {
        let records = sample();
        let before = records.clone();
        let _ = apply(&records, &Selection::new().departments(["IT"]));
        assert_eq!(records, before);
    }
}
