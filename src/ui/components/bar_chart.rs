//! Grouped SVG bar chart with grid, axes, hover tooltip and legend.

use dioxus::prelude::*;

use crate::domain::{Platform, PriceRow, VendorRow};
use crate::ui::theme;

const WIDTH: f64 = 400.0;
const HEIGHT: f64 = 300.0;
const MARGIN_TOP: f64 = 12.0;
const MARGIN_RIGHT: f64 = 12.0;
const MARGIN_BOTTOM: f64 = 28.0;
const MARGIN_LEFT: f64 = 44.0;
const TICK_INTERVALS: usize = 4;
/// Share of each category band taken up by its bars.
const GROUP_FILL: f64 = 0.7;

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: &'static str,
    pub values: Vec<f64>,
}

/// Chart-agnostic shape: one value per category per series.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartData {
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|series| series.values.iter().copied())
            .filter(|value| value.is_finite())
            .fold(0.0, f64::max)
    }
}

impl From<&[VendorRow; 2]> for ChartData {
    fn from(rows: &[VendorRow; 2]) -> Self {
        ChartData {
            categories: rows.iter().map(|row| row.name.to_string()).collect(),
            series: vec![Series {
                name: "vendors".to_string(),
                color: theme::series_color(0),
                values: rows.iter().map(|row| row.vendors as f64).collect(),
            }],
        }
    }
}

impl From<&[PriceRow; 3]> for ChartData {
    fn from(rows: &[PriceRow; 3]) -> Self {
        let series = Platform::ALL
            .iter()
            .enumerate()
            .map(|(idx, platform)| Series {
                name: platform.key().to_string(),
                color: theme::series_color(idx),
                values: rows
                    .iter()
                    .map(|row| match platform {
                        Platform::Foodora => row.foodora,
                        Platform::Wolt => row.wolt,
                    })
                    .collect(),
            })
            .collect();
        ChartData {
            categories: rows.iter().map(|row| row.name.to_string()).collect(),
            series,
        }
    }
}

/// Evenly spaced ticks from zero on a 1/2/5 x 10^n step that reach at least `max`.
pub fn nice_ticks(max: f64, intervals: usize) -> Vec<f64> {
    let intervals = intervals.max(1);
    if !max.is_finite() || max <= 0.0 {
        return (0..=intervals).map(|i| i as f64).collect();
    }

    let raw_step = max / intervals as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = nice * magnitude;
    let count = (max / step).ceil().max(1.0) as usize;

    let mut ticks: Vec<f64> = (0..=count).map(|i| i as f64 * step).collect();
    if ticks.last().is_some_and(|top| *top < max) {
        ticks.push((count + 1) as f64 * step);
    }
    ticks
}

/// Integers print without decimals, fractions with up to two.
pub fn format_value(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value.round())
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
    pub category: usize,
    pub series: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabel {
    pub position: f64,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartGeometry {
    pub plot_left: f64,
    pub plot_right: f64,
    pub plot_top: f64,
    pub plot_bottom: f64,
    pub y_ticks: Vec<AxisLabel>,
    pub x_labels: Vec<AxisLabel>,
    pub bars: Vec<Bar>,
}

pub fn layout(data: &ChartData) -> ChartGeometry {
    let plot_left = MARGIN_LEFT;
    let plot_right = WIDTH - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let plot_bottom = HEIGHT - MARGIN_BOTTOM;
    let plot_height = plot_bottom - plot_top;

    let ticks = nice_ticks(data.max_value(), TICK_INTERVALS);
    let top = ticks.last().copied().unwrap_or(1.0).max(f64::EPSILON);
    let scale_y = |value: f64| plot_bottom - (value.max(0.0) / top) * plot_height;

    let y_ticks = ticks
        .iter()
        .map(|tick| AxisLabel {
            position: scale_y(*tick),
            text: format_value(*tick),
        })
        .collect();

    let band = (plot_right - plot_left) / data.categories.len().max(1) as f64;
    let series_count = data.series.len().max(1) as f64;
    let bar_width = band * GROUP_FILL / series_count;
    let group_offset = band * (1.0 - GROUP_FILL) / 2.0;

    let x_labels = data
        .categories
        .iter()
        .enumerate()
        .map(|(idx, name)| AxisLabel {
            position: plot_left + band * (idx as f64 + 0.5),
            text: name.clone(),
        })
        .collect();

    let mut bars = Vec::new();
    for category in 0..data.categories.len() {
        let group_left = plot_left + band * category as f64 + group_offset;
        for (series_idx, series) in data.series.iter().enumerate() {
            let value = series.values.get(category).copied().unwrap_or(0.0);
            let y = scale_y(value);
            bars.push(Bar {
                x: group_left + bar_width * series_idx as f64,
                y,
                width: bar_width,
                height: plot_bottom - y,
                color: series.color,
                category,
                series: series_idx,
            });
        }
    }

    ChartGeometry {
        plot_left,
        plot_right,
        plot_top,
        plot_bottom,
        y_ticks,
        x_labels,
        bars,
    }
}

#[component]
pub fn BarChart(data: ChartData) -> Element {
    let mut hovered = use_signal(|| None::<usize>);
    let geometry = layout(&data);

    let tooltip = hovered().and_then(|idx| {
        let bar = geometry.bars.get(idx)?;
        let category = data.categories.get(bar.category)?.clone();
        let series = data.series.get(bar.series)?;
        let value = series.values.get(bar.category).copied()?;
        Some((category, series.name.clone(), format_value(value), bar.color))
    });

    let view_box = format!("0 0 {WIDTH} {HEIGHT}");
    let ChartGeometry {
        plot_left,
        plot_right,
        plot_top,
        plot_bottom,
        y_ticks,
        x_labels,
        bars,
    } = geometry;
    let tick_label_x = plot_left - 6.0;
    let category_label_y = plot_bottom + 18.0;
    let grid: Vec<(f64, f64, String)> = y_ticks
        .into_iter()
        .map(|tick| (tick.position, tick.position + 4.0, tick.text))
        .collect();
    let legend: Vec<(String, &'static str)> = data
        .series
        .iter()
        .map(|series| (series.name.clone(), series.color))
        .collect();

    rsx! {
        div { class: "bar-chart",
            svg {
                view_box: "{view_box}",
                width: "{WIDTH}",
                height: "{HEIGHT}",
                for (y, label_y, tick_text) in grid {
                    line {
                        x1: "{plot_left}",
                        x2: "{plot_right}",
                        y1: "{y}",
                        y2: "{y}",
                        stroke: theme::GRID_COLOR,
                        stroke_dasharray: "3 3",
                    }
                    text {
                        x: "{tick_label_x}",
                        y: "{label_y}",
                        text_anchor: "end",
                        font_size: "11",
                        fill: theme::AXIS_COLOR,
                        "{tick_text}"
                    }
                }
                for (idx, bar) in bars.into_iter().enumerate() {
                    rect {
                        x: "{bar.x}",
                        y: "{bar.y}",
                        width: "{bar.width}",
                        height: "{bar.height}",
                        fill: bar.color,
                        onmouseenter: move |_| hovered.set(Some(idx)),
                        onmouseleave: move |_| hovered.set(None),
                    }
                }
                line {
                    x1: "{plot_left}",
                    x2: "{plot_right}",
                    y1: "{plot_bottom}",
                    y2: "{plot_bottom}",
                    stroke: theme::AXIS_COLOR,
                }
                line {
                    x1: "{plot_left}",
                    x2: "{plot_left}",
                    y1: "{plot_top}",
                    y2: "{plot_bottom}",
                    stroke: theme::AXIS_COLOR,
                }
                for label in x_labels {
                    text {
                        x: "{label.position}",
                        y: "{category_label_y}",
                        text_anchor: "middle",
                        font_size: "12",
                        fill: theme::AXIS_COLOR,
                        "{label.text}"
                    }
                }
            }
            if let Some((category, series, value, color)) = tooltip {
                div { class: "chart-tooltip",
                    p { class: "chart-tooltip-title", "{category}" }
                    p { style: "color: {color}", "{series} : {value}" }
                }
            }
            ul { class: "chart-legend",
                for (name, color) in legend {
                    li {
                        span { class: "legend-swatch", style: "background-color: {color}" }
                        span { style: "color: {color}", "{name}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChartData {
        ChartData::from(&[
            PriceRow { name: "$", foodora: 1.0, wolt: 4.0 },
            PriceRow { name: "$$", foodora: 2.0, wolt: 5.0 },
            PriceRow { name: "$$$", foodora: 3.0, wolt: 6.0 },
        ])
    }

    #[test]
    fn vendor_rows_become_single_series() {
        let data = ChartData::from(&[
            VendorRow { name: "Foodora", vendors: 10 },
            VendorRow { name: "Wolt", vendors: 7 },
        ]);
        assert_eq!(data.categories, vec!["Foodora", "Wolt"]);
        assert_eq!(data.series.len(), 1);
        assert_eq!(data.series[0].name, "vendors");
        assert_eq!(data.series[0].values, vec![10.0, 7.0]);
        assert_eq!(data.max_value(), 10.0);
    }

    #[test]
    fn price_rows_become_platform_series() {
        let data = sample();
        assert_eq!(data.categories, vec!["$", "$$", "$$$"]);
        let names: Vec<_> = data.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["foodora", "wolt"]);
        assert_eq!(data.series[1].values, vec![4.0, 5.0, 6.0]);
        assert_ne!(data.series[0].color, data.series[1].color);
    }

    #[test]
    fn ticks_cover_maximum() {
        assert_eq!(nice_ticks(10.0, 4), vec![0.0, 5.0, 10.0]);
        assert_eq!(nice_ticks(7.0, 4), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        assert_eq!(nice_ticks(100.0, 4), vec![0.0, 50.0, 100.0]);
        for max in [0.3, 1.0, 33.33, 150.0, 999.0, 12345.0] {
            let ticks = nice_ticks(max, 4);
            assert_eq!(ticks[0], 0.0);
            assert!(*ticks.last().unwrap() >= max, "ticks {ticks:?} miss {max}");
            assert!(ticks.windows(2).all(|w| w[1] > w[0]));
        }
    }

    #[test]
    fn zero_data_gets_unit_ticks() {
        assert_eq!(nice_ticks(0.0, 4), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(nice_ticks(f64::NAN, 2), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn formats_values() {
        assert_eq!(format_value(10.0), "10");
        assert_eq!(format_value(33.333333), "33.33");
        assert_eq!(format_value(16.5), "16.5");
        assert_eq!(format_value(0.0), "0");
    }

    #[test]
    fn layout_places_one_bar_per_value() {
        let geometry = layout(&sample());
        assert_eq!(geometry.bars.len(), 6);
        assert_eq!(geometry.x_labels.len(), 3);

        // The tallest value reaches the top tick.
        let top_tick = geometry.y_ticks.last().expect("ticks").position;
        let tallest = geometry
            .bars
            .iter()
            .map(|bar| bar.y)
            .fold(f64::INFINITY, f64::min);
        assert!((tallest - top_tick).abs() < 1e-9);

        for bar in &geometry.bars {
            assert!(bar.x >= geometry.plot_left && bar.x + bar.width <= geometry.plot_right);
            assert!((bar.y + bar.height - geometry.plot_bottom).abs() < 1e-9);
        }

        // Bars within a category sit side by side in series order.
        let first_group: Vec<_> = geometry.bars.iter().filter(|b| b.category == 0).collect();
        assert_eq!(first_group[0].series, 0);
        assert!((first_group[0].x + first_group[0].width - first_group[1].x).abs() < 1e-9);
    }
}
