//! Four-panel SVG chart.
//!
//! Layout on a 2x2 grid under a common title:
//!
//! ```text
//! +------------------+------------------+
//! | box plot         | histogram        |
//! +------------------+------------------+
//! | observed measures| shape measures   |
//! +------------------+------------------+
//! ```

use crate::config::ChartConfig;
use crate::error::{ReportError, Result};
use crate::generator::ReportData;
use crate::sections::fmt_opt2;

use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

type DrawResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

const HIST_FILL: RGBColor = RGBColor(31, 119, 180);
const MEAN_COLOR: RGBColor = RGBColor(0, 128, 0);
const MEDIAN_COLOR: RGBColor = RGBColor(191, 191, 0);
const MEDIAN_MARK: RGBColor = RGBColor(255, 127, 14);

/// One equal-width histogram bin. The last bin is closed on the right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Split `[min, max]` into `bins` equal-width bins and count values.
///
/// A sample with a single distinct value is spread over `[v - 0.5, v + 0.5]`.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: lo + width * i as f64,
            end: if i + 1 == bins {
                hi
            } else {
                lo + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Box plot geometry: whiskers stop at the most extreme values inside the fences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub mean: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxGeometry {
    pub fn from_report(data: &ReportData) -> Self {
        let pos = &data.position;
        let values = data.dataset.values();

        let inside = values
            .iter()
            .copied()
            .filter(|v| *v >= pos.lower_fence && *v <= pos.upper_fence);
        let (lower_whisker, upper_whisker) = inside.fold((pos.q1, pos.q3), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        let outliers = values
            .into_iter()
            .filter(|v| *v < pos.lower_fence || *v > pos.upper_fence)
            .collect();

        Self {
            q1: pos.q1,
            median: pos.q2,
            q3: pos.q3,
            mean: data.central.mean,
            lower_whisker,
            upper_whisker,
            outliers,
        }
    }
}

/// Text lines of the "observed measures" panel.
pub fn observed_measure_lines(data: &ReportData) -> Vec<String> {
    let c = &data.central;
    let p = &data.position;
    vec![
        format!("Média: {:.2}", c.mean),
        format!("Mediana: {:.2}", c.median),
        format!("Distância: {}", c.distance_formatted()),
        format!("Menor valor: {}", p.min),
        format!("Limite inferior: {}", p.lower_fence),
        format!("Q1: {}", p.q1),
        format!("Q3: {}", p.q3),
        format!("Limite superior: {}", p.upper_fence),
        format!("Maior valor: {}", p.max),
        format!("Amplitude Total: {}", data.dispersion.range),
    ]
}

/// Text lines of the shape panel.
pub fn shape_measure_lines(data: &ReportData) -> Vec<String> {
    vec![
        format!("Assimetria: {}", fmt_opt2(data.shape.skewness)),
        format!("Curtose: {}", fmt_opt2(data.shape.kurtosis)),
    ]
}

/// Render the chart to an SVG string.
pub fn render_svg(data: &ReportData, config: &ChartConfig) -> Result<String> {
    if data.dataset.is_empty() {
        return Err(ReportError::MissingData("dataset is empty".to_string()));
    }
    if config.width == 0 || config.height == 0 || config.bins == 0 {
        return Err(ReportError::InvalidConfig(
            "chart width, height and bins must be positive".to_string(),
        ));
    }

    let mut buffer = String::new();
    {
        let backend = SVGBackend::with_string(&mut buffer, (config.width, config.height));
        draw_panels(backend, data, config.bins)
            .map_err(|e| ReportError::ChartError(e.to_string()))?;
    }
    debug!(bytes = buffer.len(), "Chart rendered");
    Ok(buffer)
}

/// Render the chart and write it to `config.path`.
pub fn write_chart(data: &ReportData, config: &ChartConfig) -> Result<()> {
    let svg = render_svg(data, config)?;
    write_svg(&config.path, &svg)?;
    info!(path = %config.path.display(), bytes = svg.len(), "Chart written");
    Ok(())
}

fn write_svg(path: &Path, svg: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, svg)?;
    Ok(())
}

fn draw_panels(backend: SVGBackend<'_>, data: &ReportData, bins: usize) -> DrawResult {
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(data.title(), ("sans-serif", 24))?;

    let panels = root.split_evenly((2, 2));
    draw_box_plot(&panels[0], data)?;
    draw_histogram(&panels[1], data, bins)?;
    draw_text_panel(&panels[2], "Medidas Observadas", &observed_measure_lines(data))?;
    draw_text_panel(
        &panels[3],
        "Impressão de Medidas Estatísticas",
        &shape_measure_lines(data),
    )?;

    root.present()?;
    Ok(())
}

/// Pad an axis range so nothing sits on the frame.
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
    (lo - pad, hi + pad)
}

fn draw_box_plot(area: &DrawingArea<SVGBackend<'_>, Shift>, data: &ReportData) -> DrawResult {
    let geom = BoxGeometry::from_report(data);
    let (x0, x1) = padded(data.position.min, data.position.max);

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption("Recuperação de Veículos", ("sans-serif", 18))
        .x_label_area_size(30)
        .y_label_area_size(10)
        .build_cartesian_2d(x0..x1, 0.0..1.0)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .disable_y_axis()
        .x_labels(8)
        .draw()?;

    let (lo, mid, hi) = (0.35, 0.5, 0.65);
    chart.draw_series(std::iter::once(Rectangle::new(
        [(geom.q1, lo), (geom.q3, hi)],
        BLACK.stroke_width(1),
    )))?;
    chart.draw_series([
        PathElement::new(vec![(geom.median, lo), (geom.median, hi)], MEDIAN_MARK.stroke_width(2)),
        PathElement::new(vec![(geom.lower_whisker, mid), (geom.q1, mid)], BLACK.stroke_width(1)),
        PathElement::new(vec![(geom.q3, mid), (geom.upper_whisker, mid)], BLACK.stroke_width(1)),
        PathElement::new(
            vec![(geom.lower_whisker, 0.42), (geom.lower_whisker, 0.58)],
            BLACK.stroke_width(1),
        ),
        PathElement::new(
            vec![(geom.upper_whisker, 0.42), (geom.upper_whisker, 0.58)],
            BLACK.stroke_width(1),
        ),
    ])?;
    chart.draw_series(
        geom.outliers
            .iter()
            .map(|v| Circle::new((*v, mid), 3, BLACK.stroke_width(1))),
    )?;
    chart.draw_series(std::iter::once(TriangleMarker::new(
        (geom.mean, mid),
        5,
        MEAN_COLOR.filled(),
    )))?;
    Ok(())
}

fn draw_histogram(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    data: &ReportData,
    bins: usize,
) -> DrawResult {
    let hist = histogram_bins(&data.dataset.values(), bins);
    let (x0, x1) = match (hist.first(), hist.last()) {
        (Some(first), Some(last)) => padded(first.start, last.end),
        _ => return Ok(()),
    };
    let peak = hist.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;
    let y1 = peak * 1.1;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption("Histograma Recuperação de Veículos", ("sans-serif", 18))
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x0..x1, 0.0..y1)?;

    chart.configure_mesh().disable_x_mesh().x_labels(8).draw()?;

    chart.draw_series(hist.iter().filter(|b| b.count > 0).map(|b| {
        Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], HIST_FILL.filled())
    }))?;
    chart.draw_series(hist.iter().filter(|b| b.count > 0).map(|b| {
        Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BLACK.stroke_width(1))
    }))?;

    let (mean, median) = (data.central.mean, data.central.median);
    chart.draw_series([
        PathElement::new(vec![(mean, 0.0), (mean, y1)], MEAN_COLOR.stroke_width(1)),
        PathElement::new(vec![(median, 0.0), (median, y1)], MEDIAN_COLOR.stroke_width(1)),
    ])?;
    Ok(())
}

fn draw_text_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    title: &str,
    lines: &[String],
) -> DrawResult {
    let area = area.titled(title, ("sans-serif", 18))?;
    let (w, h) = area.dim_in_pixel();
    let x = (w as f64 * 0.1) as i32;
    let step = (h as f64 * 0.85 / lines.len().max(1) as f64).min(28.0);
    for (i, line) in lines.iter().enumerate() {
        let y = (h as f64 * 0.05 + step * i as f64) as i32;
        area.draw(&Text::new(line.as_str(), (x, y), ("sans-serif", 16)))?;
    }
    Ok(())
}
