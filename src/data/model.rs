use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// DataPoint – one named 2D sample
// ---------------------------------------------------------------------------

/// One `(name, x, y)` record. Points sharing a name form a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }
}

// ---------------------------------------------------------------------------
// Range / Range2D – the extent a graph has to cover
// ---------------------------------------------------------------------------

/// A closed interval `[min, max]` of finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "range bounds must be finite, got [{min}, {max}]"
            )));
        }
        if min > max {
            return Err(Error::InvalidArgument(format!(
                "range minimum {min} exceeds maximum {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    fn include(&mut self, v: f64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// The x and y extent of a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range2D {
    pub x: Range,
    pub y: Range,
}

impl Range2D {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        Ok(Self {
            x: Range::new(x_min, x_max)?,
            y: Range::new(y_min, y_max)?,
        })
    }
}

// ---------------------------------------------------------------------------
// DataSet – parsed points indexed by series
// ---------------------------------------------------------------------------

/// All parsed points plus a per-series index.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    /// Points in file order.
    pub points: Vec<DataPoint>,
    /// Series names in order of first appearance.
    pub series_names: Vec<String>,
    /// For each series the indices of its points within `points`.
    pub series: BTreeMap<String, Vec<usize>>,
}

impl DataSet {
    /// Build the series index from the parsed points.
    pub fn from_points(points: Vec<DataPoint>) -> Self {
        let mut series_names = Vec::new();
        let mut series: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (i, p) in points.iter().enumerate() {
            let indices = series.entry(p.name.clone()).or_insert_with(|| {
                series_names.push(p.name.clone());
                Vec::new()
            });
            indices.push(i);
        }

        DataSet {
            points,
            series_names,
            series,
        }
    }

    /// Points of one series, in file order.
    pub fn series_points<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a DataPoint> + 'a {
        self.series
            .get(name)
            .into_iter()
            .flatten()
            .map(move |&i| &self.points[i])
    }

    /// Extent of all points, `None` for an empty set or when any coordinate
    /// is not finite.
    pub fn bounds(&self) -> Option<Range2D> {
        let first = self.points.first()?;
        if self
            .points
            .iter()
            .any(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return None;
        }
        let mut x = Range {
            min: first.x,
            max: first.x,
        };
        let mut y = Range {
            min: first.y,
            max: first.y,
        };
        for p in &self.points[1..] {
            x.include(p.x);
            y.include(p.y);
        }
        Range2D::new(x.min, x.max, y.min, y.max).ok()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the data set is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
