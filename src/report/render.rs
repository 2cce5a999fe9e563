use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use once_cell::sync::OnceCell;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};

use super::charts::{ChartBody, ChartSpec};
use crate::errors::{AppError, Result};

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 400;

static FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static FONT_READY: OnceCell<()> = OnceCell::new();

const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

fn render_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Render(e.to_string())
}

fn ensure_font() -> Result<()> {
    FONT_READY
        .get_or_try_init(|| {
            register_font("sans-serif", FontStyle::Normal, FONT_BYTES)
                .map_err(|_| AppError::Render("embedded font is not a valid TrueType file".into()))
        })
        .map(|_| ())
}

/// Draws the chart and returns it PNG-encoded.
pub fn render_png(spec: &ChartSpec) -> Result<Vec<u8>> {
    ensure_font()?;

    let mut pixels = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        // leave headroom above the tallest bar or point
        let y_max = (spec.max_value() * 1.1).max(1.0);

        match &spec.body {
            ChartBody::Line { points } => draw_line(&root, spec, points, y_max)?,
            ChartBody::Bars { categories, series } => {
                draw_bars(&root, spec, categories, series, y_max)?
            }
        }

        root.present().map_err(render_err)?;
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&pixels, WIDTH, HEIGHT, image::ExtendedColorType::Rgb8)
        .map_err(render_err)?;
    Ok(png)
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, plotters::coord::Shift>;

fn category_label(labels: &[String], x: f64) -> String {
    let index = x.round();
    if index < 0.0 || (x - index).abs() > 1e-6 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

fn draw_line(root: &Area<'_>, spec: &ChartSpec, points: &[(String, f64)], y_max: f64) -> Result<()> {
    let labels: Vec<String> = points.iter().map(|(label, _)| label.clone()).collect();
    let x_max = (points.len().max(2) - 1) as f64;

    let mut chart = ChartBuilder::on(root)
        .caption(spec.title, ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5f64..x_max + 0.5, 0f64..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|x| category_label(&labels, *x))
        .draw()
        .map_err(render_err)?;

    let series: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, (_, v))| (i as f64, *v))
        .collect();

    chart
        .draw_series(LineSeries::new(series.iter().copied(), &PALETTE[0]))
        .map_err(render_err)?;
    chart
        .draw_series(
            series
                .iter()
                .map(|&p| Circle::new(p, 4, PALETTE[0].filled())),
        )
        .map_err(render_err)?;

    Ok(())
}

fn draw_bars(
    root: &Area<'_>,
    spec: &ChartSpec,
    categories: &[String],
    series: &[super::charts::BarSeries],
    y_max: f64,
) -> Result<()> {
    let x_max = categories.len().max(1) as f64 - 0.5;

    let mut chart = ChartBuilder::on(root)
        .caption(spec.title, ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5f64..x_max, 0f64..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .x_labels(categories.len().max(1))
        .x_label_formatter(&|x| category_label(categories, *x))
        .draw()
        .map_err(render_err)?;

    // bars of one category share 80% of its slot
    let slot = 0.8 / series.len().max(1) as f64;

    for (s, bar_series) in series.iter().enumerate() {
        let color = PALETTE[s % PALETTE.len()];
        let offset = -0.4 + s as f64 * slot;

        let drawn = chart
            .draw_series(bar_series.values.iter().enumerate().map(|(c, &value)| {
                let x0 = c as f64 + offset;
                Rectangle::new([(x0, 0.0), (x0 + slot, value)], color.filled())
            }))
            .map_err(render_err)?;

        if series.len() > 1 {
            drawn
                .label(bar_series.name.clone())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;
    }

    Ok(())
}
