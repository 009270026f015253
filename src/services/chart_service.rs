use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::PricePoint;

/// Dark background and trace colour of the dashboard chart
const BACKGROUND: RGBColor = RGBColor(17, 17, 17);
const GRID: RGBColor = RGBColor(40, 52, 66);
const TEXT: RGBColor = RGBColor(242, 245, 250);
const TRACE: RGBColor = RGBColor(99, 110, 250);

/// Where the chart for `symbol` is written inside `chart_dir`
pub fn chart_path(chart_dir: &Path, symbol: &str) -> PathBuf {
    let file_stem: String = symbol
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    chart_dir.join(format!("{}_history.png", file_stem))
}

/// Axis ranges for the chart: time on x, price on y, both padded so a single
/// point or a flat line still gets a drawable area
pub fn chart_bounds(points: &[PricePoint]) -> Option<((DateTime<Utc>, DateTime<Utc>), (f64, f64))> {
    let first = points.first()?;
    let last = points.last()?;

    let min_price = points.iter().map(|p| p.last_price).fold(f64::INFINITY, f64::min);
    let max_price = points.iter().map(|p| p.last_price).fold(f64::NEG_INFINITY, f64::max);

    let price_range = (max_price - min_price).max(max_price.abs() * 1e-3).max(1e-8);
    let padding = price_range * 0.1;
    let y_range = (min_price - padding, max_price + padding);

    let (mut x_min, mut x_max) = (first.fetched_at, last.fetched_at);
    if x_max <= x_min {
        x_min -= Duration::minutes(1);
        x_max = x_min + Duration::minutes(2);
    }

    Some(((x_min, x_max), y_range))
}

/// Draw `last_price` over time as a line with markers and write it as a PNG.
///
/// `points` must already be in time order.
pub fn render_price_chart(
    symbol: &str,
    points: &[PricePoint],
    path: &Path,
    width: u32,
    height: u32,
) -> Result<(), String> {
    let ((x_min, x_max), (y_min, y_max)) =
        chart_bounds(points).ok_or("No price data to chart")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create chart directory {}: {}", parent.display(), e))?;
    }

    let backend = BitMapBackend::new(path, (width, height));
    let root = backend.into_drawing_area();
    root.fill(&BACKGROUND)
        .map_err(|e| format!("Failed to fill canvas: {}", e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Last Price History — {}", symbol),
            ("sans-serif", 28.0).into_font().color(&TEXT),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| format!("Failed to build chart: {}", e))?;

    chart
        .configure_mesh()
        .bold_line_style(GRID)
        .light_line_style(BACKGROUND)
        .axis_style(GRID)
        .label_style(("sans-serif", 14).into_font().color(&TEXT))
        .x_labels(8)
        .x_label_formatter(&|t: &DateTime<Utc>| t.format("%m-%d %H:%M").to_string())
        .y_desc("Last Price")
        .x_desc("Time")
        .draw()
        .map_err(|e| format!("Failed to draw mesh: {}", e))?;

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (p.fetched_at, p.last_price)),
            TRACE.stroke_width(2),
        ))
        .map_err(|e| format!("Failed to draw line: {}", e))?;

    chart
        .draw_series(
            points
                .iter()
                .map(|p| Circle::new((p.fetched_at, p.last_price), 3, TRACE.filled())),
        )
        .map_err(|e| format!("Failed to draw points: {}", e))?;

    root.present()
        .map_err(|e| format!("Failed to render chart: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32, price: f64) -> PricePoint {
        PricePoint {
            fetched_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, minute, 0).unwrap(),
            last_price: price,
        }
    }

    #[test]
    fn test_bounds_pad_price_range() {
        let ((x_min, x_max), (y_min, y_max)) =
            chart_bounds(&[at(0, 100.0), at(5, 110.0), at(10, 105.0)]).unwrap();
        assert_eq!(x_min, at(0, 0.0).fetched_at);
        assert_eq!(x_max, at(10, 0.0).fetched_at);
        assert!((y_min - 99.0).abs() < 1e-9);
        assert!((y_max - 111.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_gets_a_drawable_area() {
        let ((x_min, x_max), (y_min, y_max)) = chart_bounds(&[at(30, 250.0)]).unwrap();
        assert!(x_min < at(30, 0.0).fetched_at && at(30, 0.0).fetched_at < x_max);
        assert!(y_min < 250.0 && 250.0 < y_max);
    }

    #[test]
    fn test_no_points_no_bounds() {
        assert!(chart_bounds(&[]).is_none());
        assert!(render_price_chart("NIFTY", &[], Path::new("unused.png"), 100, 100).is_err());
    }

    #[test]
    fn test_renders_png_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = chart_path(&dir.path().join("nested"), "NIFTY");

        render_price_chart("NIFTY", &[at(0, 100.0), at(5, 110.0)], &path, 320, 200).unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_chart_path_is_filesystem_safe() {
        let path = chart_path(Path::new("charts"), "M&M 50/X");
        assert_eq!(path, PathBuf::from("charts/M_M_50_X_history.png"));
    }
}
