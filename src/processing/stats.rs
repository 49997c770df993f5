//! Yearly rating statistics.

use std::collections::BTreeMap;

use crate::types::{Column, MovieRow, YearlyAverages};

use super::rounding::round_scaled;

/// Running compensated (Kahan) sum and count for one group.
#[derive(Debug, Clone, Copy, Default)]
struct MeanAccumulator {
    sum: f64,
    compensation: f64,
    count: usize,
}

impl MeanAccumulator {
    fn push(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Mean `imdb_rating` per distinct year, rounded to two decimals.
///
/// - Years are grouped by their raw text (`"1994"` and `"1994.0"` are different groups).
/// - Rows without a year, or whose rating is missing or not a finite number, do not contribute.
/// - A year whose rows all lack a usable rating gets no entry.
/// - Empty input yields an empty mapping.
pub fn yearly_average(rows: &[MovieRow]) -> YearlyAverages {
    let mut groups: BTreeMap<&str, MeanAccumulator> = BTreeMap::new();
    for row in rows {
        let Some(year) = row.raw(Column::Year).filter(|y| !y.trim().is_empty()) else {
            continue;
        };
        let Ok(rating) = row.imdb_rating() else {
            continue;
        };
        groups.entry(year).or_default().push(rating);
    }

    let mut out = YearlyAverages::new();
    for (year, acc) in groups {
        if let Some(mean) = acc.mean() {
            out.insert(year, round_scaled(mean, 2));
        }
    }
    out
}
