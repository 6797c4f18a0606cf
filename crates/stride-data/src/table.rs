//! Combined stride table and per-shoe chart series.

use stride_core::models::{ChartSpec, Series, ShoeData, StrideRow};

/// X-axis label shared by both stride charts.
pub const TIME_AXIS_LABEL: &str = "Time (ms)";

/// The flat table of stride rows for every present shoe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrideTable {
    pub rows: Vec<StrideRow>,
}

impl StrideTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Which stride measurement a chart plots against time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrideMetric {
    Velocity,
    Length,
}

impl StrideMetric {
    pub fn title(&self) -> &'static str {
        match self {
            StrideMetric::Velocity => "Stride Velocity Over Time",
            StrideMetric::Length => "Stride Length Over Time",
        }
    }

    pub fn axis_label(&self) -> &'static str {
        match self {
            StrideMetric::Velocity => "Stride Velocity (cm/s)",
            StrideMetric::Length => "Stride Length (cm)",
        }
    }

    /// Base name used for exported chart files.
    pub fn file_stem(&self) -> &'static str {
        match self {
            StrideMetric::Velocity => "stride_velocity",
            StrideMetric::Length => "stride_length",
        }
    }

    fn value(&self, row: &StrideRow) -> f64 {
        match self {
            StrideMetric::Velocity => row.stride_velocity,
            StrideMetric::Length => row.stride_length,
        }
    }
}

/// Concatenate the present shoes' rows in the order given, keeping each
/// shoe's internal order. Absent shoes contribute nothing.
pub fn combine_tables<'a, I>(shoes: I) -> StrideTable
where
    I: IntoIterator<Item = &'a Option<ShoeData>>,
{
    let rows = shoes
        .into_iter()
        .flatten()
        .flat_map(|shoe| shoe.rows.iter().cloned())
        .collect();
    StrideTable { rows }
}

/// Group rows by shoe label into one series per shoe.
///
/// Groups appear in first-appearance order and keep row order within each
/// group.
pub fn group_by_shoe(table: &StrideTable, metric: StrideMetric) -> Vec<Series> {
    let mut groups: Vec<Series> = Vec::new();
    for row in &table.rows {
        let point = (row.mid_step_time, metric.value(row));
        match groups.iter_mut().find(|s| s.label == row.shoe) {
            Some(series) => series.points.push(point),
            None => groups.push(Series {
                label: row.shoe.clone(),
                points: vec![point],
            }),
        }
    }
    groups
}

/// Build the chart for `metric`, or `None` when there is nothing to plot.
pub fn build_chart(table: &StrideTable, metric: StrideMetric) -> Option<ChartSpec> {
    if table.is_empty() {
        return None;
    }
    Some(ChartSpec {
        title: metric.title().to_string(),
        x_label: TIME_AXIS_LABEL.to_string(),
        y_label: metric.axis_label().to_string(),
        series: group_by_shoe(table, metric),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;
    use stride_core::models::ShoeKey;

    fn row(shoe: &str, t: f64, v: f64, l: f64) -> StrideRow {
        StrideRow {
            shoe: shoe.to_string(),
            mid_step_time: t,
            stride_velocity: v,
            stride_length: l,
        }
    }

    fn shoe(key: ShoeKey, rows: Vec<StrideRow>) -> Option<ShoeData> {
        Some(ShoeData {
            key,
            total_steps: Number::from(0),
            distance_cm: 0.0,
            duration_ms: 0.0,
            rows,
        })
    }

    #[test]
    fn test_combine_both_shoes_in_order() {
        let one = shoe(
            ShoeKey::ShoeOne,
            vec![row("shoe_one", 2.0, 1.0, 1.0), row("shoe_one", 1.0, 1.0, 1.0)],
        );
        let two = shoe(ShoeKey::ShoeTwo, vec![row("shoe_two", 0.0, 1.0, 1.0)]);

        let table = combine_tables(&[one, two]);
        let labels: Vec<(&str, f64)> = table
            .rows
            .iter()
            .map(|r| (r.shoe.as_str(), r.mid_step_time))
            .collect();
        assert_eq!(
            labels,
            vec![("shoe_one", 2.0), ("shoe_one", 1.0), ("shoe_two", 0.0)]
        );
    }

    #[test]
    fn test_combine_only_second_shoe() {
        let two_rows = vec![row("shoe_two", 5.0, 2.0, 3.0)];
        let table = combine_tables(&[None, shoe(ShoeKey::ShoeTwo, two_rows.clone())]);
        assert_eq!(table.rows, two_rows);
    }

    #[test]
    fn test_combine_none_present_is_empty() {
        let table = combine_tables(&[None, None]);
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_group_by_shoe_first_appearance_order() {
        let table = StrideTable {
            rows: vec![
                row("shoe_two", 1.0, 10.0, 100.0),
                row("shoe_one", 2.0, 20.0, 200.0),
                row("shoe_two", 3.0, 30.0, 300.0),
            ],
        };
        let series = group_by_shoe(&table, StrideMetric::Velocity);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "shoe_two");
        assert_eq!(series[0].points, vec![(1.0, 10.0), (3.0, 30.0)]);
        assert_eq!(series[1].label, "shoe_one");
        assert_eq!(series[1].points, vec![(2.0, 20.0)]);
    }

    #[test]
    fn test_group_by_shoe_length_metric() {
        let table = StrideTable {
            rows: vec![row("shoe_one", 1.0, 10.0, 100.0)],
        };
        let series = group_by_shoe(&table, StrideMetric::Length);
        assert_eq!(series[0].points, vec![(1.0, 100.0)]);
    }

    #[test]
    fn test_build_chart_labels() {
        let table = StrideTable {
            rows: vec![row("shoe_one", 500.0, 350.0, 90.0)],
        };
        let velocity = build_chart(&table, StrideMetric::Velocity).unwrap();
        assert_eq!(velocity.title, "Stride Velocity Over Time");
        assert_eq!(velocity.x_label, "Time (ms)");
        assert_eq!(velocity.y_label, "Stride Velocity (cm/s)");

        let length = build_chart(&table, StrideMetric::Length).unwrap();
        assert_eq!(length.title, "Stride Length Over Time");
        assert_eq!(length.y_label, "Stride Length (cm)");
    }

    #[test]
    fn test_build_chart_empty_table_is_none() {
        assert!(build_chart(&StrideTable::default(), StrideMetric::Velocity).is_none());
    }
}
