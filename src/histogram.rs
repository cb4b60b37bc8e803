//! Ratings histogram rendering.
//!
//! `.svg` targets get a full chart with caption and axis labels. Bitmap
//! targets (PNG/JPEG/BMP, picked by extension) draw bars and the mesh only,
//! unless the crate is built with the `ttf` feature, which supplies the font
//! rasterizer bitmap text needs.

use crate::analytics::{RatingHistogram, HISTOGRAM_BINS};
use crate::error::{CatalogError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

pub const CHART_TITLE: &str = "Movie Ratings Histogram";
pub const CHART_SIZE: (u32, u32) = (1000, 600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Svg,
    Bitmap,
}

impl ImageKind {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ImageKind::Svg,
            _ => ImageKind::Bitmap,
        }
    }

    fn labelled(self) -> bool {
        match self {
            ImageKind::Svg => true,
            ImageKind::Bitmap => cfg!(feature = "ttf"),
        }
    }
}

/// Render `histogram` as a bar chart and write it to `path`.
pub fn save_histogram(histogram: &RatingHistogram, path: &Path) -> Result<()> {
    let kind = ImageKind::from_path(path);
    debug!(path = %path.display(), ?kind, total = histogram.total(), "rendering histogram");

    match kind {
        ImageKind::Svg => {
            let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
            draw_chart(&root, histogram, kind.labelled())
                .map_err(|e| CatalogError::Histogram(e.to_string()))
        }
        ImageKind::Bitmap => {
            let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
            draw_chart(&root, histogram, kind.labelled())
                .map_err(|e| CatalogError::Histogram(e.to_string()))
        }
    }
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    histogram: &RatingHistogram,
    labelled: bool,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let y_max = (histogram.max_count() + 1) as f64;
    let label_area = if labelled { 50 } else { 0 };

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(20)
        .x_label_area_size(label_area)
        .y_label_area_size(label_area);
    if labelled {
        builder.caption(CHART_TITLE, ("sans-serif", 30));
    }
    let mut chart = builder.build_cartesian_2d(0f64..10f64, 0f64..y_max)?;

    if labelled {
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(HISTOGRAM_BINS + 1)
            .x_desc("Rating")
            .y_desc("Number of Movies")
            .draw()?;
    } else {
        chart.configure_mesh().disable_x_mesh().draw()?;
    }

    let bars = histogram.counts().iter().enumerate().map(|(idx, &count)| {
        let (lo, hi) = RatingHistogram::bin_edges(idx);
        Rectangle::new([(lo, 0.0), (hi, count as f64)], BLUE.mix(0.7).filled())
    });
    chart.draw_series(bars)?;

    let outlines = histogram
        .counts()
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(idx, &count)| {
            let (lo, hi) = RatingHistogram::bin_edges(idx);
            Rectangle::new([(lo, 0.0), (hi, count as f64)], BLACK.stroke_width(1))
        });
    chart.draw_series(outlines)?;

    root.present()?;
    Ok(())
}
