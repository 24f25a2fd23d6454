//! Turning triplets into coloured X/Z scatter layers and drawing them.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::columns::{assemble_triplets, select_columns, select_time_column, XyzTriplet};
use crate::config::{PlotConfig, Rgb, Subject};
use crate::error::{MocapError, Result};
use crate::grid::{Column, Grid};
use crate::header::HeaderLayout;
use crate::SensorFloat;

/// Darkest and lightest fraction of the base colour.
const GRADIENT_START: f64 = 0.2;
const GRADIENT_END: f64 = 0.8;

/// `n` colours, ramping linearly from 0.2 to 0.8 times `base`.
pub fn color_gradient(n: usize, base: Rgb) -> Vec<Rgb> {
    (0..n)
        .map(|k| {
            let t = if n > 1 {
                GRADIENT_START + (GRADIENT_END - GRADIENT_START) * k as f64 / (n - 1) as f64
            } else {
                GRADIENT_START
            };
            [t * base[0], t * base[1], t * base[2]]
        })
        .collect()
}

/// Converts a [0, 1] colour to 8 bits per channel.
pub fn to_rgb_color(c: &Rgb) -> RGBColor {
    let u = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    RGBColor(u(c[0]), u(c[1]), u(c[2]))
}

/// Parses the data part of a column, from `data_row` down.
fn parse_samples(column: &Column, data_row: usize) -> Result<Vec<SensorFloat>> {
    column
        .cells
        .iter()
        .enumerate()
        .skip(data_row)
        .map(|(row, cell)| {
            cell.trim()
                .parse::<SensorFloat>()
                .map_err(|_| MocapError::NonNumeric {
                    row,
                    column: column.index,
                    value: cell.clone(),
                })
        })
        .collect()
}

/// Numeric X/Y/Z samples of one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub xs: Vec<SensorFloat>,
    pub ys: Vec<SensorFloat>,
    pub zs: Vec<SensorFloat>,
}

impl Trajectory {
    pub fn from_triplet(triplet: &XyzTriplet, data_row: usize) -> Result<Trajectory> {
        Ok(Trajectory {
            xs: parse_samples(&triplet.x, data_row)?,
            ys: parse_samples(&triplet.y, data_row)?,
            zs: parse_samples(&triplet.z, data_row)?,
        })
    }

    pub fn num_samples(&self) -> usize {
        self.xs.len()
    }
}

/// One marker's points in the X/Z plane with a colour per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterLayer {
    pub subject: String,
    pub points: Vec<(SensorFloat, SensorFloat)>,
    pub colors: Vec<Rgb>,
}

impl ScatterLayer {
    pub fn from_trajectory(subject: &Subject, trajectory: &Trajectory) -> ScatterLayer {
        let n = trajectory.num_samples();
        ScatterLayer {
            subject: subject.label.clone(),
            points: trajectory
                .xs
                .iter()
                .copied()
                .zip(trajectory.zs.iter().copied())
                .collect(),
            colors: color_gradient(n, subject.color),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// First and last time stamp in the time column, if they parse.
pub fn time_span(time: &Column, data_row: usize) -> Option<(SensorFloat, SensorFloat)> {
    let first = time.cell(data_row).trim().parse().ok()?;
    let last = time.cells.last()?.trim().parse().ok()?;
    Some((first, last))
}

/// Select, assemble and convert, for every subject in turn.
pub fn build_layers(
    grid: &Grid,
    name_row: usize,
    layout: &HeaderLayout,
    subjects: &[Subject],
) -> Result<Vec<ScatterLayer>> {
    let data_row = layout.data_row(name_row);

    if let Some(time) = select_time_column(grid, name_row) {
        if let Some((t0, t1)) = time_span(&time, data_row) {
            info!("Time column {} spans {:.3} to {:.3}.", time.index, t0, t1);
        }
    }

    let mut layers = Vec::new();
    for subject in subjects {
        let columns = select_columns(grid, name_row, &subject.label);
        if columns.is_empty() {
            warn!("No columns labelled {:?}.", subject.label);
            continue;
        }
        let scan = assemble_triplets(&columns, name_row, layout);
        info!(
            "{}: {} columns, {} triplets, {} columns skipped.",
            subject.label,
            columns.len(),
            scan.triplets.len(),
            scan.skipped_columns
        );
        for triplet in &scan.triplets {
            let trajectory = Trajectory::from_triplet(triplet, data_row)?;
            let layer = ScatterLayer::from_trajectory(subject, &trajectory);
            debug!(
                "{}: layer from columns {}/{}/{} with {} points.",
                subject.label,
                triplet.x.index,
                triplet.y.index,
                triplet.z.index,
                layer.len()
            );
            layers.push(layer);
        }
    }

    Ok(layers)
}

fn plot_err<E: std::fmt::Display>(e: E) -> MocapError {
    MocapError::Plot(e.to_string())
}

/// Range covering `values` with a little margin, never empty.
fn padded_range<I: Iterator<Item = SensorFloat>>(values: I) -> std::ops::Range<SensorFloat> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() {
        return 0.0..1.0;
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - pad)..(hi + pad)
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

/// Draws all layers onto one chart and writes it to `config.output`.
pub fn render(layers: &[ScatterLayer], config: &PlotConfig, caption: Option<&str>) -> Result<()> {
    let size = config.pixel_size();
    info!("Writing {} ({}x{} px).", config.output.display(), size.0, size.1);
    if is_svg(&config.output) {
        let root = SVGBackend::new(&config.output, size).into_drawing_area();
        draw_chart(root, layers, config, caption)
    } else {
        let root = BitMapBackend::new(&config.output, size).into_drawing_area();
        draw_chart(root, layers, config, caption)
    }
}

fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    layers: &[ScatterLayer],
    config: &PlotConfig,
    caption: Option<&str>,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let x_range = padded_range(layers.iter().flat_map(|l| l.points.iter().map(|p| p.0)));
    let y_range = padded_range(layers.iter().flat_map(|l| l.points.iter().map(|p| p.1)));

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60);
    if let Some(caption) = caption {
        builder.caption(caption, ("sans-serif", 24));
    }
    let mut chart = builder
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .draw()
        .map_err(plot_err)?;

    // Layers stack in call order.
    for layer in layers {
        chart
            .draw_series(
                layer
                    .points
                    .iter()
                    .zip(layer.colors.iter())
                    .map(|(&p, c)| Circle::new(p, 3, to_rgb_color(c).filled())),
            )
            .map_err(plot_err)?;
    }

    // One dot per subject, in its base colour.
    for subject in &config.subjects {
        let color = to_rgb_color(&subject.color);
        chart
            .draw_series(std::iter::empty::<Circle<(SensorFloat, SensorFloat), i32>>())
            .map_err(plot_err)?
            .label(subject.legend.as_str())
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
