use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Observation – one row of the cleaned table
// ---------------------------------------------------------------------------

/// A single cleaned measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Country or region name.
    pub geography: String,
    /// Year.
    pub time: i32,
    /// National-accounts item, e.g. "Gross domestic product at market prices".
    pub indicator: String,
    /// Pricing basis; always a current-prices unit after cleaning.
    pub unit: String,
    /// Always finite.
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the complete cleaned table
// ---------------------------------------------------------------------------

/// The cleaned table. Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// AxisScale – linear / log rendering hint
// ---------------------------------------------------------------------------

/// How a chart axis is rendered. Never changes which points a transform
/// produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
}

impl AxisScale {
    pub const ALL: [AxisScale; 2] = [AxisScale::Linear, AxisScale::Log];

    pub fn label(self) -> &'static str {
        match self {
            AxisScale::Linear => "Linear",
            AxisScale::Log => "Log",
        }
    }

    /// Map a data value into plot space. Log axes are drawn as log10 of the
    /// value; non-positive values come out as NaN / -inf and are not drawn.
    pub fn project(self, value: f64) -> f64 {
        match self {
            AxisScale::Linear => value,
            AxisScale::Log => value.log10(),
        }
    }

    /// Inverse of [`AxisScale::project`], used for axis tick labels.
    pub fn unproject(self, plotted: f64) -> f64 {
        match self {
            AxisScale::Linear => plotted,
            AxisScale::Log => 10f64.powf(plotted),
        }
    }
}

impl fmt::Display for AxisScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AxisScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Linear" | "linear" => Ok(AxisScale::Linear),
            "Log" | "log" => Ok(AxisScale::Log),
            other => Err(format!("unknown axis scale '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Chart payloads
// ---------------------------------------------------------------------------

/// One marker of the cross-filter scatterplot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub geography: String,
    pub x: f64,
    pub y: f64,
}

/// Everything the scatter panel needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub points: Vec<ScatterPoint>,
    pub x_title: String,
    pub y_title: String,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    pub year: i32,
}

/// A single `(year, value)` sample of a time series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

/// The detail chart for one geography and indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub geography: String,
    pub indicator: String,
    pub scale: AxisScale,
    /// Strictly increasing by year.
    pub points: Vec<YearValue>,
}

impl TimeSeries {
    pub fn title(&self) -> String {
        super::transform::time_series_title(&self.geography, &self.indicator)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
