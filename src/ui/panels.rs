use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{AxisScale, TimeSeries};
use crate::state::AppState;
use crate::ui::plot::format_value;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Title and a one-line summary of the loaded table.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("GDP Crossfilter");
        ui.separator();
        ui.label(format!(
            "{} observations, {} indicators, {} geographies",
            state.dataset.len(),
            state.catalog.indicators.len(),
            state.catalog.geographies.len(),
        ));
        if let Some((min, max)) = state.catalog.year_range {
            ui.separator();
            ui.label(format!("{min}–{max}"));
        }
    });
}

// ---------------------------------------------------------------------------
// Indicator dropdowns and scale toggles
// ---------------------------------------------------------------------------

/// Render the x/y indicator pickers and apply any change to the state.
pub fn controls(ui: &mut Ui, state: &mut AppState) {
    let mut next = state.selection.clone();
    let indicators = &state.catalog.indicators;

    ui.add_space(4.0);
    ui.columns(2, |cols| {
        indicator_picker(
            &mut cols[0],
            "x_indicator",
            "X axis",
            indicators,
            &mut next.x_indicator,
            &mut next.x_scale,
        );
        indicator_picker(
            &mut cols[1],
            "y_indicator",
            "Y axis",
            indicators,
            &mut next.y_indicator,
            &mut next.y_scale,
        );
    });
    ui.add_space(4.0);

    state.apply(next);
}

fn indicator_picker(
    ui: &mut Ui,
    id: &str,
    label: &str,
    indicators: &[String],
    indicator: &mut String,
    scale: &mut AxisScale,
) {
    ui.strong(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(indicator.as_str())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for name in indicators {
                ui.selectable_value(indicator, name.clone(), name.as_str());
            }
        });
    ui.horizontal(|ui: &mut Ui| {
        for option in AxisScale::ALL {
            ui.radio_value(scale, option, option.label());
        }
    });
}

// ---------------------------------------------------------------------------
// Year slider
// ---------------------------------------------------------------------------

/// Year slider over the catalog's range, with one clickable mark per year
/// present in the data.
pub fn year_slider(ui: &mut Ui, state: &mut AppState) {
    let Some((min, max)) = state.catalog.year_range else {
        return;
    };
    let mut next = state.selection.clone();

    ui.spacing_mut().slider_width = (ui.available_width() - 80.0).max(100.0);
    ui.add(egui::Slider::new(&mut next.year, min..=max).text("Year"));

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for &year in &state.catalog.years {
            if ui
                .selectable_label(next.year == year, year.to_string())
                .clicked()
            {
                next.year = year;
            }
        }
    });

    state.apply(next);
}

// ---------------------------------------------------------------------------
// Values table
// ---------------------------------------------------------------------------

/// The `(year, value)` pairs behind the detail chart.
pub fn series_table(ui: &mut Ui, series: &TimeSeries) {
    ui.heading("Values");
    ui.label(RichText::new(&series.geography).strong());
    ui.label(series.indicator.as_str());
    ui.separator();

    if series.is_empty() {
        ui.label(RichText::new("No data").weak());
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(48.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Year");
            });
            header.col(|ui| {
                ui.strong("Value");
            });
        })
        .body(|mut body| {
            for point in &series.points {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(point.year.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format_value(point.value));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Diagnostics (debug mode)
// ---------------------------------------------------------------------------

pub fn diagnostics(ctx: &egui::Context, state: &AppState) {
    egui::Window::new("Diagnostics")
        .default_open(false)
        .show(ctx, |ui: &mut Ui| {
            ui.label(format!("Scatter recomputed: {}", state.scatter_refreshes));
            ui.label(format!(
                "Time series recomputed: {}",
                state.time_series_refreshes
            ));
            ui.label(format!("Scatter points: {}", state.scatter.points.len()));
            ui.label(format!("Series points: {}", state.time_series.points.len()));
            ui.label(format!("Selection: {:#?}", state.selection));
        });
}
