use eframe::egui::{Align2, Pos2, RichText, Ui};
use egui_plot::{Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::state::AppState;

/// Hovering selects the nearest point within this many screen pixels.
pub const HOVER_RADIUS: f32 = 20.0;

// ---------------------------------------------------------------------------
// Cross-filter scatterplot
// ---------------------------------------------------------------------------

/// Render the scatterplot. Returns the geography of the point under the
/// pointer, if any.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) -> Option<String> {
    let figure = &state.scatter;
    let hovered = state.selection.hovered_geography.as_str();
    let x_scale = figure.x_scale;
    let y_scale = figure.y_scale;

    ui.label(
        RichText::new(format!(
            "{}  vs  {}  ({})",
            figure.y_title, figure.x_title, figure.year
        ))
        .strong(),
    );

    let response = Plot::new("crossfilter_scatter")
        .height(450.0)
        .x_axis_label(figure.x_title.as_str())
        .y_axis_label(figure.y_title.as_str())
        .x_axis_formatter(move |mark, _range| format_compact(x_scale.unproject(mark.value)))
        .y_axis_formatter(move |mark, _range| format_compact(y_scale.unproject(mark.value)))
        .label_formatter(|name, _value| name.to_string())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for point in &figure.points {
                let is_hovered = point.geography == hovered;
                let color = state.color_map.color_for(&point.geography);
                let marker: PlotPoints = std::iter::once([
                    x_scale.project(point.x),
                    y_scale.project(point.y),
                ])
                .collect();

                plot_ui.points(
                    Points::new(marker)
                        .name(&point.geography)
                        .radius(if is_hovered { 9.0 } else { 6.0 })
                        .filled(true)
                        .color(if is_hovered {
                            color
                        } else {
                            color.gamma_multiply(0.5)
                        }),
                );

                if is_hovered {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(x_scale.project(point.x), y_scale.project(point.y)),
                            RichText::new(format!("  {}", point.geography)).strong(),
                        )
                        .anchor(Align2::LEFT_BOTTOM),
                    );
                }
            }
        });

    let pointer = response.response.hover_pos()?;
    let screen_positions = figure.points.iter().enumerate().map(|(i, point)| {
        let pos = response.transform.position_from_point(&PlotPoint::new(
            x_scale.project(point.x),
            y_scale.project(point.y),
        ));
        (i, pos)
    });
    let index = nearest_point(pointer, screen_positions, HOVER_RADIUS)?;
    Some(figure.points[index].geography.clone())
}

/// Index of the candidate closest to `pointer`, if it lies within
/// `max_distance`. Candidates with a non-finite position (log axis over a
/// non-positive value) are never picked.
pub fn nearest_point(
    pointer: Pos2,
    candidates: impl IntoIterator<Item = (usize, Pos2)>,
    max_distance: f32,
) -> Option<usize> {
    candidates
        .into_iter()
        .filter(|(_, pos)| pos.x.is_finite() && pos.y.is_finite())
        .map(|(i, pos)| (i, pos.distance(pointer)))
        .filter(|(_, d)| *d <= max_distance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

// ---------------------------------------------------------------------------
// Time-series detail chart
// ---------------------------------------------------------------------------

/// Render the detail chart for the hovered geography.
pub fn time_series_plot(ui: &mut Ui, state: &AppState) {
    let series = &state.time_series;
    let scale = series.scale;
    let color = state.color_map.color_for(&series.geography);

    let title = series.title();
    let mut lines = title.lines();
    if let Some(first) = lines.next() {
        ui.label(RichText::new(first).strong());
    }
    for line in lines {
        ui.label(line);
    }
    if series.is_empty() {
        ui.label(RichText::new("No data for this selection").weak());
    }

    Plot::new("time_series")
        .height(225.0)
        .show_grid([false, true])
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .y_axis_formatter(move |mark, _range| format_compact(scale.unproject(mark.value)))
        .show(ui, |plot_ui| {
            let line: PlotPoints = series
                .points
                .iter()
                .map(|p| [f64::from(p.year), scale.project(p.value)])
                .collect();
            let markers: PlotPoints = series
                .points
                .iter()
                .map(|p| [f64::from(p.year), scale.project(p.value)])
                .collect();

            plot_ui.line(Line::new(line).color(color).width(2.0));
            plot_ui.points(Points::new(markers).color(color).radius(3.5).filled(true));
        });
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Short axis label: 1234567.0 → "1.2M".
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}k", value / 1e3)
    } else if abs >= 1.0 || abs == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Table cell value: one decimal, like the source export.
pub fn format_value(value: f64) -> String {
    format!("{value:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_closest_point_within_radius() {
        let pointer = Pos2::new(100.0, 100.0);
        let candidates = vec![
            (0, Pos2::new(130.0, 100.0)),
            (1, Pos2::new(105.0, 104.0)),
            (2, Pos2::new(98.0, 90.0)),
        ];
        assert_eq!(nearest_point(pointer, candidates, HOVER_RADIUS), Some(1));
    }

    #[test]
    fn nothing_within_radius_means_no_hover() {
        let pointer = Pos2::new(0.0, 0.0);
        let candidates = vec![(0, Pos2::new(50.0, 50.0))];
        assert_eq!(nearest_point(pointer, candidates, HOVER_RADIUS), None);
    }

    #[test]
    fn non_finite_positions_are_skipped() {
        let pointer = Pos2::new(10.0, 10.0);
        let candidates = vec![
            (0, Pos2::new(f32::NAN, 10.0)),
            (1, Pos2::new(12.0, f32::NEG_INFINITY)),
            (2, Pos2::new(15.0, 10.0)),
        ];
        assert_eq!(nearest_point(pointer, candidates, HOVER_RADIUS), Some(2));
    }

    #[test]
    fn compact_format_scales_units() {
        assert_eq!(format_compact(2_932_470.0), "2.9M");
        assert_eq!(format_compact(4_500.0), "4.5k");
        assert_eq!(format_compact(1.5e9), "1.5B");
        assert_eq!(format_compact(42.0), "42");
        assert_eq!(format_compact(0.25), "0.25");
        assert_eq!(format_compact(f64::NAN), "");
        assert_eq!(format_value(1234.5), "1234.5");
    }
}
