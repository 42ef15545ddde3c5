use std::collections::{BTreeMap, BTreeSet};

use super::model::{AxisScale, Dataset, ScatterFigure, ScatterPoint, TimeSeries, YearValue};

// ---------------------------------------------------------------------------
// Scatter transform
// ---------------------------------------------------------------------------

/// Points of the cross-filter scatterplot for one year.
///
/// Inner join on geography: a geography contributes exactly one point when it
/// has both an `x_indicator` and a `y_indicator` observation in `year`, and
/// none otherwise. Points keep the order in which their geography first
/// appears among that year's rows. Duplicate observations keep the first.
pub fn scatter_series(
    dataset: &Dataset,
    x_indicator: &str,
    y_indicator: &str,
    year: i32,
) -> Vec<ScatterPoint> {
    let mut order: Vec<&str> = Vec::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut xs: BTreeMap<&str, f64> = BTreeMap::new();
    let mut ys: BTreeMap<&str, f64> = BTreeMap::new();

    for obs in dataset.observations().iter().filter(|o| o.time == year) {
        let geo = obs.geography.as_str();
        if seen.insert(geo) {
            order.push(geo);
        }
        if obs.indicator == x_indicator {
            xs.entry(geo).or_insert(obs.value);
        }
        if obs.indicator == y_indicator {
            ys.entry(geo).or_insert(obs.value);
        }
    }

    order
        .into_iter()
        .filter_map(|geo| {
            Some(ScatterPoint {
                geography: geo.to_string(),
                x: *xs.get(geo)?,
                y: *ys.get(geo)?,
            })
        })
        .collect()
}

impl ScatterFigure {
    /// Scatter points plus the axis titles and scale hints the panel needs.
    pub fn build(
        dataset: &Dataset,
        x_indicator: &str,
        y_indicator: &str,
        x_scale: AxisScale,
        y_scale: AxisScale,
        year: i32,
    ) -> Self {
        Self {
            points: scatter_series(dataset, x_indicator, y_indicator, year),
            x_title: x_indicator.to_string(),
            y_title: y_indicator.to_string(),
            x_scale,
            y_scale,
            year,
        }
    }
}

// ---------------------------------------------------------------------------
// Time-series transform
// ---------------------------------------------------------------------------

/// Yearly values of `indicator` for `geography`, ascending by year.
///
/// An unknown geography or indicator yields an empty series.
pub fn time_series(
    dataset: &Dataset,
    geography: &str,
    indicator: &str,
    scale: AxisScale,
) -> TimeSeries {
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for obs in dataset
        .observations()
        .iter()
        .filter(|o| o.geography == geography && o.indicator == indicator)
    {
        by_year.entry(obs.time).or_insert(obs.value);
    }

    TimeSeries {
        geography: geography.to_string(),
        indicator: indicator.to_string(),
        scale,
        points: by_year
            .into_iter()
            .map(|(year, value)| YearValue { year, value })
            .collect(),
    }
}

/// Annotation shown above the detail chart: geography on the first line,
/// indicator on the second.
pub fn time_series_title(geography: &str, indicator: &str) -> String {
    format!("{geography}\n{indicator}")
}
