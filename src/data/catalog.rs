use std::collections::BTreeSet;

use super::model::Dataset;

/// Distinct indicator names, sorted.
pub fn indicators(dataset: &Dataset) -> BTreeSet<String> {
    dataset
        .observations()
        .iter()
        .map(|o| o.indicator.clone())
        .collect()
}

/// Distinct years, sorted.
pub fn years(dataset: &Dataset) -> BTreeSet<i32> {
    dataset.observations().iter().map(|o| o.time).collect()
}

/// `(min, max)` year, or `None` for an empty dataset.
pub fn year_range(dataset: &Dataset) -> Option<(i32, i32)> {
    let years = years(dataset);
    Some((*years.first()?, *years.last()?))
}

/// Distinct geographies, sorted.
pub fn geographies(dataset: &Dataset) -> BTreeSet<String> {
    dataset
        .observations()
        .iter()
        .map(|o| o.geography.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Catalog – widget options computed once at startup
// ---------------------------------------------------------------------------

/// Options for the selection widgets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub indicators: Vec<String>,
    pub years: Vec<i32>,
    pub year_range: Option<(i32, i32)>,
    pub geographies: Vec<String>,
}

impl Catalog {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            indicators: indicators(dataset).into_iter().collect(),
            years: years(dataset).into_iter().collect(),
            year_range: year_range(dataset),
            geographies: geographies(dataset).into_iter().collect(),
        }
    }

    /// Initial `(x, y)` dropdown values: the first two indicators, or the
    /// only one twice.
    pub fn default_indicators(&self) -> (String, String) {
        let x = self.indicators.first().cloned().unwrap_or_default();
        let y = self.indicators.get(1).cloned().unwrap_or_else(|| x.clone());
        (x, y)
    }

    /// The slider starts on the latest year.
    pub fn default_year(&self) -> i32 {
        self.year_range.map(|(_, max)| max).unwrap_or_default()
    }
}
