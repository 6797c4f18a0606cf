use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

use crate::formatting::{format_distance_line, format_steps_line};

/// One of the two tracked shoes in an export document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShoeKey {
    ShoeOne,
    ShoeTwo,
}

impl ShoeKey {
    /// Both shoes in presentation order.
    pub const ALL: [ShoeKey; 2] = [ShoeKey::ShoeOne, ShoeKey::ShoeTwo];

    /// Top-level document key, also used as the row/series label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShoeKey::ShoeOne => "shoe_one",
            ShoeKey::ShoeTwo => "shoe_two",
        }
    }

    /// Human-readable name used in section headings.
    pub fn display_name(&self) -> &'static str {
        match self {
            ShoeKey::ShoeOne => "Shoe One",
            ShoeKey::ShoeTwo => "Shoe Two",
        }
    }
}

impl fmt::Display for ShoeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single stride event flattened out of its segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrideRow {
    /// Label of the shoe the stride belongs to (`"shoe_one"` / `"shoe_two"`).
    pub shoe: String,
    /// Mid-step timestamp in milliseconds.
    pub mid_step_time: f64,
    /// Stride velocity in cm/s.
    pub stride_velocity: f64,
    /// Stride length in cm.
    pub stride_length: f64,
}

/// Everything extracted for one shoe present in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoeData {
    pub key: ShoeKey,
    /// Step count exactly as written in the document (integer or float).
    pub total_steps: Number,
    pub distance_cm: f64,
    pub duration_ms: f64,
    /// Strides across all segments, in document order.
    pub rows: Vec<StrideRow>,
}

impl ShoeData {
    /// Scalar aggregates for display, without the row table.
    pub fn summary(&self) -> ShoeSummary {
        ShoeSummary {
            key: self.key,
            total_steps: self.total_steps.clone(),
            distance_cm: self.distance_cm,
            duration_ms: self.duration_ms,
            stride_count: self.rows.len(),
        }
    }
}

/// Per-shoe scalar aggregates shown in a summary section.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoeSummary {
    pub key: ShoeKey,
    pub total_steps: Number,
    pub distance_cm: f64,
    pub duration_ms: f64,
    /// Number of stride rows extracted for this shoe.
    pub stride_count: usize,
}

impl ShoeSummary {
    /// Distance converted from centimeters to meters.
    pub fn distance_m(&self) -> f64 {
        self.distance_cm / 100.0
    }

    /// Section heading, e.g. `"Shoe One Summary"`.
    pub fn heading(&self) -> String {
        format!("{} Summary", self.key.display_name())
    }

    /// `"Total Steps: N"`.
    pub fn steps_line(&self) -> String {
        format_steps_line(&self.total_steps)
    }

    /// `"Total Distance: D meters"`.
    pub fn distance_line(&self) -> String {
        format_distance_line(self.distance_cm)
    }
}

/// One line on a chart: all points for a single shoe.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// `(min, max)` of the x values, or `None` for an empty series.
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        bounds(self.points.iter().map(|p| p.0))
    }

    /// `(min, max)` of the y values, or `None` for an empty series.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        bounds(self.points.iter().map(|p| p.1))
    }
}

/// A line chart: titled axes and one series per shoe.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Combined x range across every series.
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        merge_bounds(self.series.iter().filter_map(Series::x_bounds))
    }

    /// Combined y range across every series.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        merge_bounds(self.series.iter().filter_map(Series::y_bounds))
    }

    /// Total number of points over all series.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn merge_bounds(ranges: impl Iterator<Item = (f64, f64)>) -> Option<(f64, f64)> {
    ranges.fold(None, |acc, (lo, hi)| match acc {
        None => Some((lo, hi)),
        Some((a, b)) => Some((a.min(lo), b.max(hi))),
    })
}
