use crate::math::stats::StatsHelper;
use crate::source::table::{parse_table, SignalRow};
use crate::telemetry::log::LogManager;
use ndarray::{Array1, ArrayView1, CowArray, Ix1};

/// Immutable time / step / value columns of one chromatogram.
///
/// Samples keep the order they were provided in; nothing is re-sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalSource {
    times: Array1<f64>,
    steps: Array1<f64>,
    values: Array1<f64>,
}

impl SignalSource {
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = SignalRow>,
    {
        let rows: Vec<SignalRow> = rows.into_iter().collect();
        Self {
            times: rows.iter().map(|row| row.time).collect(),
            steps: rows.iter().map(|row| row.step).collect(),
            values: rows.iter().map(|row| row.value).collect(),
        }
    }

    /// Build a source from `time` / `value` pairs with a zero step column.
    pub fn from_series(times: &[f64], values: &[f64]) -> Self {
        Self::from_rows(
            times
                .iter()
                .zip(values)
                .map(|(&time, &value)| SignalRow {
                    time,
                    step: 0.0,
                    value,
                }),
        )
    }

    /// Parse the numeric table section of an export. Malformed rows are
    /// dropped with a warning; this never fails.
    pub fn parse_table(body: &str) -> Self {
        let table = parse_table(body);
        LogManager::new("chromacore::source").record(&format!(
            "loaded {} samples ({} rows skipped)",
            table.rows.len(),
            table.skipped
        ));
        Self::from_rows(table.rows)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> ArrayView1<'_, f64> {
        self.times.view()
    }

    pub fn steps(&self) -> ArrayView1<'_, f64> {
        self.steps.view()
    }

    /// Value column, optionally shifted so that its minimum is exactly 0.0.
    ///
    /// The minimum is recomputed over the full series on every call.
    pub fn values(&self, normalized: bool) -> CowArray<'_, f64, Ix1> {
        if normalized {
            CowArray::from(StatsHelper::normalize(self.values.view()))
        } else {
            CowArray::from(self.values.view())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_have_equal_length() {
        let source = SignalSource::parse_table("t\ts\tv\n0\t1\t2\n1\tn.a.\t3\n2\tx\t4\n");
        assert_eq!(source.len(), 2);
        assert_eq!(source.times().len(), source.steps().len());
        assert_eq!(source.steps().len(), source.values(false).len());
    }

    #[test]
    fn raw_values_are_returned_unchanged() {
        let source = SignalSource::from_series(&[0.0, 1.0, 2.0], &[-1.0, 2.0, 0.5]);
        assert_eq!(source.values(false).to_vec(), vec![-1.0, 2.0, 0.5]);
    }

    #[test]
    fn normalized_values_are_shifted_to_zero_minimum() {
        let source = SignalSource::from_series(&[0.0, 1.0, 2.0], &[-1.0, 2.0, 0.5]);
        assert_eq!(source.values(true).to_vec(), vec![0.0, 3.0, 1.5]);
        // the stored series is untouched
        assert_eq!(source.values(false)[0], -1.0);
    }

    #[test]
    fn order_is_preserved() {
        let source = SignalSource::from_series(&[3.0, 1.0, 2.0], &[0.0, 0.0, 0.0]);
        assert_eq!(source.times().to_vec(), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn empty_source() {
        let source = SignalSource::default();
        assert!(source.is_empty());
        assert_eq!(source.values(true).len(), 0);
    }
}
