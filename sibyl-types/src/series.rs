//! Chronological price and prediction series.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SibylError;

/// One closing price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation timestamp.
    pub ts: DateTime<Utc>,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(ts: DateTime<Utc>, close: f64) -> Self {
        Self { ts, close }
    }
}

fn ensure_strictly_increasing<I>(what: &str, timestamps: I) -> Result<(), SibylError>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut prev: Option<DateTime<Utc>> = None;
    for (i, ts) in timestamps.into_iter().enumerate() {
        if let Some(p) = prev
            && ts <= p
        {
            return Err(SibylError::InvalidInput(format!(
                "{what} timestamps must be strictly increasing: [{i}] {ts} follows {p}"
            )));
        }
        prev = Some(ts);
    }
    Ok(())
}

/// Ordered closing prices, strictly increasing by timestamp.
///
/// Non-finite closes are accepted here and rejected by normalization, where the
/// value is actually used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from points already in chronological order.
    ///
    /// # Errors
    /// Returns `InvalidInput` if timestamps are out of order or duplicated.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SibylError> {
        ensure_strictly_increasing("price series", points.iter().map(|p| p.ts))?;
        Ok(Self { points })
    }

    /// Build a series from points in any order.
    ///
    /// Points are sorted by timestamp; for a duplicated timestamp the first
    /// point seen wins.
    pub fn from_unordered<I>(points: I) -> Self
    where
        I: IntoIterator<Item = PricePoint>,
    {
        let mut map: BTreeMap<DateTime<Utc>, PricePoint> = BTreeMap::new();
        for p in points {
            if let Entry::Vacant(v) = map.entry(p.ts) {
                v.insert(p);
            }
        }
        Self {
            points: map.into_values().collect(),
        }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All observations, oldest first.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices, oldest first.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Timestamps, oldest first.
    #[must_use]
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.points.iter().map(|p| p.ts).collect()
    }

    /// The most recent `n` observations (fewer if the series is shorter).
    #[must_use]
    pub fn tail(&self, n: usize) -> &[PricePoint] {
        &self.points[self.points.len().saturating_sub(n)..]
    }

    /// Observations from index `offset` onwards (empty past the end).
    #[must_use]
    pub fn suffix(&self, offset: usize) -> &[PricePoint] {
        self.points.get(offset..).unwrap_or(&[])
    }

    /// Observation with exactly this timestamp, if any.
    #[must_use]
    pub fn at(&self, ts: DateTime<Utc>) -> Option<&PricePoint> {
        self.points
            .binary_search_by_key(&ts, |p| p.ts)
            .ok()
            .map(|i| &self.points[i])
    }

    /// Consume the series into its points.
    #[must_use]
    pub fn into_points(self) -> Vec<PricePoint> {
        self.points
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = SibylError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(s: PriceSeries) -> Self {
        s.points
    }
}

/// One predicted price, stamped with the observation it stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    /// Timestamp of the predicted observation.
    pub ts: DateTime<Utc>,
    /// Predicted price, in price units.
    pub predicted: f64,
}

/// Ordered predictions, strictly increasing by timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PredictionPoint>", into = "Vec<PredictionPoint>")]
pub struct PredictionSeries {
    points: Vec<PredictionPoint>,
}

impl PredictionSeries {
    /// Build a prediction series.
    ///
    /// # Errors
    /// Returns `InvalidInput` if timestamps are out of order or duplicated.
    pub fn new(points: Vec<PredictionPoint>) -> Result<Self, SibylError> {
        ensure_strictly_increasing("prediction series", points.iter().map(|p| p.ts))?;
        Ok(Self { points })
    }

    /// Number of predictions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no predictions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All predictions, oldest first.
    #[must_use]
    pub fn points(&self) -> &[PredictionPoint] {
        &self.points
    }

    /// Predicted prices, oldest first.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted).collect()
    }

    /// Pair every prediction with the actual close at the same timestamp.
    ///
    /// Predictions with no matching observation in `actual` are skipped.
    #[must_use]
    pub fn zip_actual(&self, actual: &PriceSeries) -> Vec<AlignedPoint> {
        self.points
            .iter()
            .filter_map(|p| {
                actual.at(p.ts).map(|a| AlignedPoint {
                    ts: p.ts,
                    actual: a.close,
                    predicted: p.predicted,
                })
            })
            .collect()
    }
}

impl TryFrom<Vec<PredictionPoint>> for PredictionSeries {
    type Error = SibylError;

    fn try_from(points: Vec<PredictionPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PredictionSeries> for Vec<PredictionPoint> {
    fn from(s: PredictionSeries) -> Self {
        s.points
    }
}

/// Actual and predicted price for one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedPoint {
    /// Observation timestamp.
    pub ts: DateTime<Utc>,
    /// Observed closing price.
    pub actual: f64,
    /// Predicted price.
    pub predicted: f64,
}

impl AlignedPoint {
    /// Signed prediction error (`predicted - actual`).
    #[must_use]
    pub fn error(&self) -> f64 {
        self.predicted - self.actual
    }
}
