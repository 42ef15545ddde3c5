use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
    /// Show the diagnostics window.
    debug: bool,
}

impl DashboardApp {
    pub fn new(state: AppState, debug: bool) -> Self {
        Self { state, debug }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Indicator dropdowns and scale toggles ----
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            panels::controls(ui, &mut self.state);
        });

        // ---- Right side panel: values behind the detail chart ----
        egui::SidePanel::right("series_values")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::series_table(ui, &self.state.time_series);
            });

        // ---- Central panel: scatter, year slider, time series ----
        let hovered = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let hovered = plot::scatter_plot(ui, &self.state);
                        ui.add_space(8.0);
                        panels::year_slider(ui, &mut self.state);
                        ui.separator();
                        plot::time_series_plot(ui, &self.state);
                        hovered
                    })
                    .inner
            })
            .inner;

        // The last hovered geography stays selected after the pointer leaves.
        if let Some(geography) = hovered {
            self.state.hover(&geography);
        }

        if self.debug {
            panels::diagnostics(ctx, &self.state);
        }
    }
}
