//! Chart composition: render grouped bar charts to **PNG**.
//!
//! - Categories reordered by [`SortSpec`] before layout, labels and values move together
//! - One composer for vertical and horizontal bars, with or without share annotations
//! - Bar annotations and value-axis ticks share one [`NumberStyle`]
//! - Dashed value-axis grid, legend inside the plot, top/right borders hidden
//!
//! Every render owns its pixel buffer and drawing area; nothing mutable is shared
//! between calls.

pub mod fonts;
pub mod style;
pub mod text;
pub mod types;
pub mod util;

pub use style::ChartStyle;
pub use types::{LegendPosition, RasterBuffer};

use crate::align::{SortSpec, align};
use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::format::{self, FormattedLabel, NumberStyle, annotation_text};
use crate::layout::{BarGeometry, Geometry, LayoutPlanner, Orientation, TextAlign, ValueRange};
use crate::models::{CURRENT_PERIOD, DatasetPayload, DatasetView, PRIOR_PERIOD};
use crate::request::ChartRequest;

use image::{ImageFormat, RgbImage};
use log::debug;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use plotters_bitmap::BitMapBackend;
use std::io::Cursor;

use text::{max_text_width_px, truncate_to_width};
use util::{dashed_segments, gutter_px, value_ticks};

/// A fully resolved chart: aligned categories, geometry and annotation text.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    pub title: String,
    pub value_axis_label: String,
    pub orientation: Orientation,
    pub number_style: NumberStyle,
    /// Category labels in display order.
    pub categories: Vec<String>,
    /// Legend text per series, in series order.
    pub legend: Vec<String>,
    pub legend_position: LegendPosition,
    pub geometry: Geometry,
    pub bars: Vec<BarGeometry>,
    /// Annotation per bar, parallel to `bars`.
    pub annotations: Vec<FormattedLabel>,
    pub value_range: ValueRange,
}

/// Builds and rasterizes grouped bar charts.
#[derive(Debug, Clone, Default)]
pub struct ChartComposer {
    style: ChartStyle,
}

impl ChartComposer {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Validate, align, lay out and format. Nothing is drawn.
    pub fn prepare(
        &self,
        dataset: &DatasetView,
        config: &RenderConfig,
        sort_spec: &SortSpec,
    ) -> Result<ChartScene> {
        config.validate()?;
        let aligned = align(dataset, sort_spec)?;

        let planner = LayoutPlanner::new(config.headroom);
        let geometry = planner.plan(aligned.len(), aligned.series.len(), config.orientation);
        let bars = planner.place(&geometry, &aligned);
        let value_range = planner.value_range(&aligned);

        let series: Vec<_> = aligned.series.values().collect();
        let annotations = bars
            .iter()
            .map(|b| {
                let share = if config.annotate_shares {
                    series[b.series].share(b.category)
                } else {
                    None
                };
                annotation_text(b.value, share, config.number_style)
            })
            .collect();
        let legend = aligned
            .series
            .keys()
            .map(|id| legend_label(config, id))
            .collect();

        Ok(ChartScene {
            title: config.title(),
            value_axis_label: config.value_axis_label.clone(),
            orientation: config.orientation,
            number_style: config.number_style,
            categories: aligned.labels,
            legend,
            legend_position: config.legend_position,
            geometry,
            bars,
            annotations,
            value_range,
        })
    }

    /// Render `dataset` to a PNG. Either a complete image is returned or an error.
    pub fn compose(
        &self,
        dataset: &DatasetView,
        config: &RenderConfig,
        sort_spec: &SortSpec,
    ) -> Result<RasterBuffer> {
        let scene = self.prepare(dataset, config, sort_spec)?;
        let (w, h) = config.pixel_size();
        fonts::ensure_fonts_registered()?;
        debug!(
            "rendering {} categories x {} series, {:?}, {w}x{h}px",
            scene.geometry.n_categories, scene.geometry.n_series, scene.orientation
        );

        let mut buffer = vec![0u8; w as usize * h as usize * 3];
        {
            // The drawing area borrows `buffer` and is dropped at the end of this block,
            // on success and on every early return.
            let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            let painter = Painter {
                style: &self.style,
                px_per_pt: config.px_per_pt(),
            };
            painter.draw(&root, &scene)?;
            root.present().map_err(RenderError::backend)?;
        }
        encode_png(buffer, w, h)
    }
}

/// Render a typed payload using the default style and the payload's category order.
pub fn render(payload: &DatasetPayload, config: &RenderConfig) -> Result<RasterBuffer> {
    ChartComposer::default().compose(&payload.to_view(), config, &payload.sort_spec())
}

/// Render a request body with its kind's preset and overrides.
pub fn render_request<D: Into<DatasetPayload>>(request: ChartRequest<D>) -> Result<RasterBuffer> {
    let (payload, config) = request.into_parts();
    render(&payload, &config)
}

fn legend_label(config: &RenderConfig, id: &str) -> String {
    match id {
        CURRENT_PERIOD => config.series_label(&config.period_labels.current),
        PRIOR_PERIOD => config.series_label(&config.period_labels.previous),
        other => other.to_string(),
    }
}

fn encode_png(buffer: Vec<u8>, w: u32, h: u32) -> Result<RasterBuffer> {
    let img = RgbImage::from_raw(w, h, buffer)
        .ok_or_else(|| RenderError::Backend("pixel buffer does not match raster size".into()))?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(RasterBuffer::new(bytes, w, h))
}

/// Draws one scene. Sizes in the style are points, scaled by `px_per_pt`.
struct Painter<'s> {
    style: &'s ChartStyle,
    px_per_pt: f64,
}

impl Painter<'_> {
    fn px(&self, pt: f64) -> f64 {
        pt * self.px_per_pt
    }

    fn font(&self, pt: f64, bold: bool) -> FontDesc<'static> {
        let style = if bold {
            FontStyle::Bold
        } else {
            FontStyle::Normal
        };
        FontDesc::new(FontFamily::SansSerif, self.px(pt), style)
    }

    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>, scene: &ChartScene) -> Result<()>
    where
        DB: DrawingBackend,
    {
        root.fill(&WHITE).map_err(RenderError::backend)?;

        let orientation = scene.orientation;
        let (w_px, h_px) = root.dim_in_pixel();
        let tick_px = self.px(self.style.tick_pt);
        let desc_px = self.px(self.style.axis_label_pt);
        let pad = self.px(8.0);

        let ticks = value_ticks(scene.value_range, self.style.value_ticks);
        let tick_labels: Vec<String> = ticks
            .iter()
            .map(|t| format::format(*t, scene.number_style))
            .collect();
        let categories: Vec<String> = scene
            .categories
            .iter()
            .map(|c| truncate_to_width(c, tick_px, (w_px as f64 * 0.35) as u32))
            .collect();

        // ----------------------------
        // 1) Gutters
        // ----------------------------
        let line = (tick_px * 1.4).ceil() as u32;
        let widest_ticks = max_text_width_px(tick_labels.iter().map(String::as_str), tick_px);
        let widest_categories = max_text_width_px(categories.iter().map(String::as_str), tick_px);
        let (left, bottom) = match orientation {
            Orientation::Vertical => (
                gutter_px(widest_ticks, desc_px * 1.6, pad, w_px / 3),
                gutter_px(line, 0.0, pad, h_px / 3),
            ),
            Orientation::Horizontal => (
                gutter_px(widest_categories, 0.0, pad, w_px / 2),
                gutter_px(line, desc_px * 1.6, pad, h_px / 3),
            ),
        };

        // ----------------------------
        // 2) Chart frame
        // ----------------------------
        let (cat_lo, cat_hi) = scene.geometry.category_range();
        let (val_lo, val_hi) = (scene.value_range.min, scene.value_range.max);
        let (x_range, y_range) = match orientation {
            Orientation::Vertical => (cat_lo..cat_hi, val_lo..val_hi),
            Orientation::Horizontal => (val_lo..val_hi, cat_lo..cat_hi),
        };

        let mut builder = ChartBuilder::on(root);
        builder
            .margin(self.px(self.style.margin_pt).round() as u32)
            .set_label_area_size(LabelAreaPosition::Left, left)
            .set_label_area_size(LabelAreaPosition::Bottom, bottom);
        if !scene.title.is_empty() {
            builder.caption(&scene.title, self.font(self.style.title_pt, true));
        }
        let mut chart = builder
            .build_cartesian_2d(x_range, y_range)
            .map_err(RenderError::backend)?;

        // ----------------------------
        // 3) Axes and value tick labels (top/right borders are never drawn)
        // ----------------------------
        {
            let value_fmt = |v: &f64| format::format(*v, scene.number_style);
            let blank = |_: &f64| String::new();
            let mut mesh = chart.configure_mesh();
            mesh.disable_mesh()
                .label_style(self.font(self.style.tick_pt, false))
                .axis_desc_style(self.font(self.style.axis_label_pt, false));
            match orientation {
                Orientation::Vertical => {
                    mesh.x_labels(0)
                        .x_label_formatter(&blank)
                        .set_tick_mark_size(LabelAreaPosition::Bottom, 0)
                        .y_labels(self.style.value_ticks)
                        .y_label_formatter(&value_fmt)
                        .y_desc(scene.value_axis_label.as_str());
                }
                Orientation::Horizontal => {
                    mesh.y_labels(0)
                        .y_label_formatter(&blank)
                        .set_tick_mark_size(LabelAreaPosition::Left, 0)
                        .x_labels(self.style.value_ticks)
                        .x_label_formatter(&value_fmt)
                        .x_desc(scene.value_axis_label.as_str());
                }
            }
            mesh.draw().map_err(RenderError::backend)?;
        }

        // ----------------------------
        // 4) Dashed grid on the value axis only
        // ----------------------------
        let grid = self.style.grid_style();
        let (dash, gap) = (
            self.px(self.style.grid_dash_pt.0),
            self.px(self.style.grid_dash_pt.1),
        );
        for t in &ticks {
            let a = chart.backend_coord(&orientation.to_xy(cat_lo, *t));
            let b = chart.backend_coord(&orientation.to_xy(cat_hi, *t));
            for seg in dashed_segments(a, b, dash, gap) {
                root.draw(&PathElement::new(seg.to_vec(), grid))
                    .map_err(RenderError::backend)?;
            }
        }

        // ----------------------------
        // 5) Bars, one series per legend entry
        // ----------------------------
        let swatch = self.px(self.style.legend_pt * 0.45).round().max(2.0) as i32;
        for (series_idx, label) in scene.legend.iter().enumerate() {
            let color = self.style.series_color(series_idx);
            let rects = scene
                .bars
                .iter()
                .filter(|b| b.series == series_idx)
                .map(|b| {
                    let r = b.rect;
                    Rectangle::new(
                        [
                            orientation.to_xy(r.category_from, r.value_from),
                            orientation.to_xy(r.category_to, r.value_to),
                        ],
                        color.filled(),
                    )
                });
            chart
                .draw_series(rects)
                .map_err(RenderError::backend)?
                .label(label.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - swatch), (x + 2 * swatch, y + swatch)], color.filled())
                });
        }

        // ----------------------------
        // 6) Bar annotations
        // ----------------------------
        let annotation_font = self.font(self.style.annotation_pt, true);
        let line_h = self.px(self.style.annotation_pt) * 1.2;
        for (bar, label) in scene.bars.iter().zip(&scene.annotations) {
            let (px, py) =
                chart.backend_coord(&orientation.to_xy(bar.anchor.category, bar.anchor.value));
            let at = (
                px + self.px(bar.anchor.offset_pt.0).round() as i32,
                py - self.px(bar.anchor.offset_pt.1).round() as i32,
            );
            draw_lines(root, &label.lines(), at, bar.anchor.align, line_h, &annotation_font)?;
        }

        // ----------------------------
        // 7) Category tick labels
        // ----------------------------
        let tick_font = self.font(self.style.tick_pt, false);
        let gap_px = self.px(3.5).round() as i32;
        for (i, name) in categories.iter().enumerate() {
            let c = scene.geometry.category_position(i);
            let (px, py) = chart.backend_coord(&orientation.to_xy(c, val_lo));
            let (at, pos) = match orientation {
                Orientation::Vertical => ((px, py + gap_px), Pos::new(HPos::Center, VPos::Top)),
                Orientation::Horizontal => ((px - gap_px, py), Pos::new(HPos::Right, VPos::Center)),
            };
            root.draw(&Text::new(name.clone(), at, tick_font.color(&BLACK).pos(pos)))
                .map_err(RenderError::backend)?;
        }

        // ----------------------------
        // 8) Legend
        // ----------------------------
        chart
            .configure_series_labels()
            .position(scene.legend_position.into())
            .border_style(BLACK.mix(0.2))
            .background_style(WHITE.mix(0.8))
            .label_font(self.font(self.style.legend_pt, false))
            .draw()
            .map_err(RenderError::backend)?;

        Ok(())
    }
}

/// Draw stacked text lines relative to `at` according to `align`.
fn draw_lines<DB>(
    area: &DrawingArea<DB, Shift>,
    lines: &[&str],
    at: (i32, i32),
    align: TextAlign,
    line_h: f64,
    font: &FontDesc<'_>,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let n = lines.len() as f64;
    let y = at.1 as f64;
    let (pos, first_y) = match align {
        // last line sits on the anchor, earlier lines stack upward
        TextAlign::CenterBottom => (Pos::new(HPos::Center, VPos::Bottom), y - (n - 1.0) * line_h),
        TextAlign::CenterTop => (Pos::new(HPos::Center, VPos::Top), y),
        TextAlign::LeftCenter => (Pos::new(HPos::Left, VPos::Center), y - (n - 1.0) * line_h / 2.0),
        TextAlign::RightCenter => (Pos::new(HPos::Right, VPos::Center), y - (n - 1.0) * line_h / 2.0),
    };
    let style = font.color(&BLACK).pos(pos);
    for (i, line) in lines.iter().enumerate() {
        let ly = (first_y + i as f64 * line_h).round() as i32;
        area.draw(&Text::new(line.to_string(), (at.0, ly), style.clone()))
            .map_err(RenderError::backend)?;
    }
    Ok(())
}
