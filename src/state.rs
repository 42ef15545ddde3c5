use std::collections::BTreeSet;

use crate::color::ColorMap;
use crate::data::catalog::Catalog;
use crate::data::model::{AxisScale, Dataset, ScatterFigure, TimeSeries};
use crate::data::transform::time_series;
use crate::signals::{affected_panels, Panel, Signal};

// ---------------------------------------------------------------------------
// Selection – current widget values
// ---------------------------------------------------------------------------

/// Values of every input widget. The x scale also drives the time-series
/// axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub x_indicator: String,
    pub y_indicator: String,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    pub year: i32,
    /// Geography of the last hovered scatter point.
    pub hovered_geography: String,
}

impl Selection {
    /// Widget values on first render.
    pub fn initial(catalog: &Catalog, fallback_geography: &str) -> Self {
        let (x_indicator, y_indicator) = catalog.default_indicators();
        Self {
            x_indicator,
            y_indicator,
            x_scale: AxisScale::Linear,
            y_scale: AxisScale::Linear,
            year: catalog.default_year(),
            hovered_geography: fallback_geography.to_string(),
        }
    }

    /// Signals whose value differs between `self` and `next`.
    pub fn changed_signals(&self, next: &Selection) -> BTreeSet<Signal> {
        let mut changed = BTreeSet::new();
        if self.x_indicator != next.x_indicator {
            changed.insert(Signal::XIndicator);
        }
        if self.y_indicator != next.y_indicator {
            changed.insert(Signal::YIndicator);
        }
        if self.x_scale != next.x_scale {
            changed.insert(Signal::XScale);
        }
        if self.y_scale != next.y_scale {
            changed.insert(Signal::YScale);
        }
        if self.year != next.year {
            changed.insert(Signal::Year);
        }
        if self.hovered_geography != next.hovered_geography {
            changed.insert(Signal::HoveredGeography);
        }
        changed
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Cleaned table, read-only for the lifetime of the process.
    pub dataset: Dataset,

    /// Widget options derived once from `dataset`.
    pub catalog: Catalog,

    pub selection: Selection,

    /// Current scatter panel payload.
    pub scatter: ScatterFigure,

    /// Current detail panel payload.
    pub time_series: TimeSeries,

    /// Per-geography colours.
    pub color_map: ColorMap,

    /// Recomputation counters, shown in the diagnostics window.
    pub scatter_refreshes: u64,
    pub time_series_refreshes: u64,
}

impl AppState {
    /// Build the state and compute both panels for the initial selection.
    pub fn new(dataset: Dataset, fallback_geography: &str) -> Self {
        let catalog = Catalog::from_dataset(&dataset);
        let selection = Selection::initial(&catalog, fallback_geography);
        let color_map = ColorMap::new(&catalog.geographies);
        let scatter = scatter_for(&dataset, &selection);
        let time_series = time_series_for(&dataset, &selection);

        Self {
            dataset,
            catalog,
            selection,
            scatter,
            time_series,
            color_map,
            scatter_refreshes: 1,
            time_series_refreshes: 1,
        }
    }

    /// Replace the widget values and recompute every panel bound to a signal
    /// that changed. Returns the panels that were refreshed.
    pub fn apply(&mut self, next: Selection) -> BTreeSet<Panel> {
        let changed = self.selection.changed_signals(&next);
        if changed.is_empty() {
            return BTreeSet::new();
        }
        self.selection = next;

        let panels = affected_panels(&changed);
        for panel in &panels {
            match panel {
                Panel::Scatter => {
                    self.scatter = scatter_for(&self.dataset, &self.selection);
                    self.scatter_refreshes += 1;
                }
                Panel::TimeSeries => {
                    self.time_series = time_series_for(&self.dataset, &self.selection);
                    self.time_series_refreshes += 1;
                }
            }
        }
        log::debug!("Signals {changed:?} refreshed {panels:?}");
        panels
    }

    /// Record a hover over the scatter point of `geography`.
    pub fn hover(&mut self, geography: &str) -> BTreeSet<Panel> {
        let mut next = self.selection.clone();
        next.hovered_geography = geography.to_string();
        self.apply(next)
    }
}

fn scatter_for(dataset: &Dataset, selection: &Selection) -> ScatterFigure {
    ScatterFigure::build(
        dataset,
        &selection.x_indicator,
        &selection.y_indicator,
        selection.x_scale,
        selection.y_scale,
        selection.year,
    )
}

fn time_series_for(dataset: &Dataset, selection: &Selection) -> TimeSeries {
    time_series(
        dataset,
        &selection.hovered_geography,
        &selection.x_indicator,
        selection.x_scale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Observation;

    fn obs(geography: &str, time: i32, indicator: &str, value: f64) -> Observation {
        Observation {
            geography: geography.into(),
            time,
            indicator: indicator.into(),
            unit: "Current prices, million euro".into(),
            value,
        }
    }

    fn state() -> AppState {
        let dataset = Dataset::from_observations(vec![
            obs("Belgium", 2015, "Exports", 320.0),
            obs("Belgium", 2015, "GDP", 416.0),
            obs("Belgium", 2016, "Exports", 325.0),
            obs("Belgium", 2016, "GDP", 430.0),
            obs("Spain", 2016, "Exports", 290.0),
            obs("Spain", 2016, "GDP", 1118.0),
        ]);
        AppState::new(dataset, "Belgium")
    }

    #[test]
    fn initial_render_uses_fallback_geography_and_latest_year() {
        let state = state();
        assert_eq!(state.selection.x_indicator, "Exports");
        assert_eq!(state.selection.y_indicator, "GDP");
        assert_eq!(state.selection.year, 2016);
        assert_eq!(state.scatter.points.len(), 2);
        assert_eq!(state.time_series.geography, "Belgium");
        assert_eq!(state.time_series.points.len(), 2);
    }

    #[test]
    fn year_change_refreshes_only_the_scatter() {
        let mut state = state();
        let mut next = state.selection.clone();
        next.year = 2015;

        let refreshed = state.apply(next);
        assert_eq!(refreshed.into_iter().collect::<Vec<_>>(), vec![Panel::Scatter]);
        assert_eq!(state.scatter.points.len(), 1);
        assert_eq!(state.scatter_refreshes, 2);
        assert_eq!(state.time_series_refreshes, 1);
    }

    #[test]
    fn hover_refreshes_only_the_time_series() {
        let mut state = state();
        let refreshed = state.hover("Spain");
        assert_eq!(refreshed.into_iter().collect::<Vec<_>>(), vec![Panel::TimeSeries]);
        assert_eq!(state.time_series.geography, "Spain");
        assert_eq!(state.time_series.points.len(), 1);
        assert_eq!(state.scatter_refreshes, 1);
    }

    #[test]
    fn repeated_hover_is_a_no_op() {
        let mut state = state();
        assert!(state.hover("Belgium").is_empty());
        assert_eq!(state.time_series_refreshes, 1);
    }

    #[test]
    fn x_scale_change_refreshes_both_panels() {
        let mut state = state();
        let mut next = state.selection.clone();
        next.x_scale = AxisScale::Log;

        let refreshed = state.apply(next);
        assert_eq!(refreshed.len(), 2);
        assert_eq!(state.scatter.x_scale, AxisScale::Log);
        assert_eq!(state.time_series.scale, AxisScale::Log);
    }

    #[test]
    fn hover_on_geography_without_series_gives_empty_chart() {
        let mut state = state();
        state.hover("Atlantis");
        assert!(state.time_series.is_empty());
    }
}
