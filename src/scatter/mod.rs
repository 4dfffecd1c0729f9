//! Scatter plot of the latest year: documents vs citations on log-log axes,
//! point radius from the H-index, point color from the rank, dashed
//! reference lines at the latest-year averages.
//!
//! The chart always reflects the most recent year in the full record set; it
//! is not wired to the table's filter selection. [`Scene`] holds the complete
//! visual encoding in normalized coordinates so that the egui painter and the
//! plotters file renderer draw the same picture.

pub mod scale;

use crate::models::Record;
use anyhow::{Result, anyhow, bail};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use scale::{LinearScale, LogScale, decade_ticks, format_count, lerp_rgb};

/// Point radius range in pixels, smallest to largest H-index.
pub const RADIUS_RANGE: (f64, f64) = (5.0, 20.0);

/// Rank color ramp: best rank first.
const RANK_FIRST_COLOR: (u8, u8, u8) = (255, 0, 0); // red
const RANK_LAST_COLOR: (u8, u8, u8) = (0, 128, 0); // green

/// One-time registration for a fallback "sans-serif" font when using the
/// `ab_glyph` text path. Required because `ab_glyph` doesn't discover OS
/// fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    // Safe to call many times; only runs once.
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Fully encoded scatter point. `x`/`y` are normalized to `[0, 1]` with the
/// origin at the bottom-left; `radius` is in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: (u8, u8, u8),
    pub country: String,
    pub documents: u64,
    pub citations: u64,
}

/// The latest-year scatter, fully computed: points, mean reference lines and
/// decade ticks, everything in normalized coordinates plus the raw values the
/// plotters backend needs for its native log axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub year: i32,
    pub points: Vec<Point>,
    pub avg_documents: f64,
    pub avg_citations: f64,
    /// Normalized positions of the vertical/horizontal reference lines.
    pub avg_x: f64,
    pub avg_y: f64,
    pub max_documents: f64,
    pub max_citations: f64,
    /// (normalized position, value) pairs at powers of ten.
    pub x_ticks: Vec<(f64, f64)>,
    pub y_ticks: Vec<(f64, f64)>,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

impl Scene {
    /// Build the scene from the full record set.
    ///
    /// Only rows of the maximum year participate. Rows missing a plotted
    /// metric are skipped as points but still widen the rank color domain and
    /// the averages ignore only the missing values themselves. Errors rather
    /// than producing degenerate axes when there is nothing to draw.
    pub fn build(records: &[Record]) -> Result<Self> {
        let year = records
            .iter()
            .filter_map(|r| r.year)
            .max()
            .ok_or_else(|| anyhow!("no data to plot"))?;
        let latest: Vec<&Record> = records.iter().filter(|r| r.year == Some(year)).collect();

        let docs: Vec<f64> = latest.iter().filter_map(|r| r.documents).map(|v| v as f64).collect();
        let cites: Vec<f64> = latest.iter().filter_map(|r| r.citations).map(|v| v as f64).collect();
        if docs.is_empty() || cites.is_empty() {
            bail!("no numeric values to plot");
        }

        let max_documents = docs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let max_citations = cites.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let avg_documents = mean(&docs);
        let avg_citations = mean(&cites);

        let x = LogScale::new(1.0, max_documents);
        let y = LogScale::new(1.0, max_citations);

        let hs: Vec<f64> = latest.iter().filter_map(|r| r.h_index).map(|v| v as f64).collect();
        let h_domain = (
            hs.iter().cloned().fold(f64::INFINITY, f64::min),
            hs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        );
        let radius = LinearScale::new(h_domain, RADIUS_RANGE);
        let rank_ramp = LinearScale::new((1.0, latest.len() as f64), (0.0, 1.0));

        let points = latest
            .iter()
            .filter_map(|r| {
                let (rank, documents, citations, h_index) =
                    (r.rank?, r.documents?, r.citations?, r.h_index?);
                Some(Point {
                    x: x.map(documents as f64),
                    y: y.map(citations as f64),
                    radius: radius.map(h_index as f64),
                    color: lerp_rgb(
                        RANK_FIRST_COLOR,
                        RANK_LAST_COLOR,
                        rank_ramp.map(rank as f64),
                    ),
                    country: r.country.clone(),
                    documents,
                    citations,
                })
            })
            .collect();

        Ok(Self {
            year,
            points,
            avg_documents,
            avg_citations,
            avg_x: x.map(avg_documents),
            avg_y: y.map(avg_citations),
            max_documents,
            max_citations,
            x_ticks: decade_ticks(&x),
            y_ticks: decade_ticks(&y),
        })
    }
}

/// Render the latest-year scatter to an `.svg` or bitmap file (chosen by
/// extension); backs the GUI's export button and the CLI `--plot` flag.
pub fn plot_scatter<P: AsRef<Path>>(
    records: &[Record],
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    let scene = Scene::build(records)?;
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_scene(root, &scene)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_scene(root, &scene)?;
    }
    Ok(())
}

fn draw_scene<DB>(root: DrawingArea<DB, Shift>, scene: &Scene) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // Log domains must not collapse onto their lower bound.
    let x_max = scene.max_documents.max(10.0);
    let y_max = scene.max_citations.max(10.0);

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .caption(format!("Année {}", scene.year), (FontFamily::SansSerif, 24))
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 56)
        .build_cartesian_2d((1f64..x_max).log_scale(), (1f64..y_max).log_scale())
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .x_desc("Documents")
        .y_desc("Citations")
        .x_label_formatter(&|v| format_count(*v))
        .y_label_formatter(&|v| format_count(*v))
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    chart
        .draw_series(scene.points.iter().map(|p| {
            let color = RGBColor(p.color.0, p.color.1, p.color.2);
            Circle::new(
                (p.documents as f64, p.citations as f64),
                p.radius.round() as i32,
                color.mix(0.7).filled(),
            )
        }))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let grey = RGBColor(128, 128, 128);
    let avg_x = scene.avg_documents.clamp(1.0, x_max);
    let avg_y = scene.avg_citations.clamp(1.0, y_max);
    chart
        .draw_series(DashedLineSeries::new(
            vec![(avg_x, 1.0), (avg_x, y_max)].into_iter(),
            3,
            3,
            grey.stroke_width(1),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    chart
        .draw_series(DashedLineSeries::new(
            vec![(1.0, avg_y), (x_max, avg_y)].into_iter(),
            3,
            3,
            grey.stroke_width(1),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}
