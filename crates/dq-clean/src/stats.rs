//! Order statistics used by the imputation and outlier stages.

use std::collections::HashMap;

use dq_model::CellValue;

/// Median of `values`; the mean of the two middle values for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(sorted[mid - 1] / 2.0 + sorted[mid] / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Quantile `q` in `[0, 1]` by linear interpolation between closest ranks,
/// with rank position `(n - 1) * q`.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(quantile_sorted(&sorted(values), q))
}

fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if sorted[lower] == sorted[upper] {
        return sorted[lower];
    }
    let fraction = pos - lower as f64;
    // Weighted sum; the difference of two large values can overflow.
    sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub q3: f64,
}

impl Quartiles {
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sorted = sorted(values);
        Some(Self {
            q1: quantile_sorted(&sorted, 0.25),
            q3: quantile_sorted(&sorted, 0.75),
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// `[q1 - k * iqr, q3 + k * iqr]`
    pub fn bounds(&self, multiplier: f64) -> (f64, f64) {
        let spread = self.iqr() * multiplier;
        (self.q1 - spread, self.q3 + spread)
    }
}

/// Most frequent value and whether another value shared its count.
#[derive(Debug, Clone, PartialEq)]
pub struct Mode<'a> {
    pub value: &'a CellValue,
    pub count: usize,
    pub tied: bool,
}

/// Mode over the non-missing values. Ties go to the value seen first.
pub fn mode<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> Option<Mode<'a>> {
    let mut counts: HashMap<&CellValue, (usize, usize)> = HashMap::new();
    for (order, value) in values.into_iter().filter(|v| !v.is_missing()).enumerate() {
        counts.entry(value).or_insert((0, order)).0 += 1;
    }
    let mut best: Option<(&CellValue, usize, usize)> = None;
    for (&value, &(count, first_seen)) in &counts {
        let better = match best {
            None => true,
            Some((_, best_count, best_seen)) => {
                count > best_count || (count == best_count && first_seen < best_seen)
            }
        };
        if better {
            best = Some((value, count, first_seen));
        }
    }
    best.map(|(value, count, _)| Mode {
        value,
        count,
        tied: counts
            .values()
            .filter(|(other_count, _)| *other_count == count)
            .count()
            > 1,
    })
}
