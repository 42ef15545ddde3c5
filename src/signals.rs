use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Named input signals and the panels bound to them
// ---------------------------------------------------------------------------

/// A widget value the charts depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal {
    XIndicator,
    YIndicator,
    XScale,
    YScale,
    Year,
    HoveredGeography,
}

/// A chart panel whose payload is recomputed from signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Panel {
    Scatter,
    TimeSeries,
}

/// A panel and the signals that trigger its recomputation.
#[derive(Debug)]
pub struct Binding {
    pub panel: Panel,
    pub inputs: &'static [Signal],
}

/// The dashboard's wiring. Panels write disjoint outputs, so the order in
/// which they refresh does not matter.
pub const BINDINGS: &[Binding] = &[
    Binding {
        panel: Panel::Scatter,
        inputs: &[
            Signal::XIndicator,
            Signal::YIndicator,
            Signal::XScale,
            Signal::YScale,
            Signal::Year,
        ],
    },
    Binding {
        panel: Panel::TimeSeries,
        inputs: &[Signal::HoveredGeography, Signal::XIndicator, Signal::XScale],
    },
];

/// Panels that must be recomputed after `changed` signals fired. Each panel
/// appears at most once no matter how many of its inputs changed.
pub fn affected_panels(changed: &BTreeSet<Signal>) -> BTreeSet<Panel> {
    BINDINGS
        .iter()
        .filter(|b| b.inputs.iter().any(|s| changed.contains(s)))
        .map(|b| b.panel)
        .collect()
}
