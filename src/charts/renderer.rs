//! Static Chart Renderer
//! Draws the course ranking as a horizontal bar chart and saves it as an image.
//!
//! Layout:
//! 1. Title centered above the plot
//! 2. One bar per course, most preferred (lowest mean rank) at the top
//! 3. Course names on the y-axis, mean rank on the x-axis
//! 4. Mean value printed at the end of each bar

use crate::config::ChartStyle;
use crate::error::{RankerError, Result};
use crate::stats::RankingSummary;
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FONT: &str = "sans-serif";

// Viridis colormap stops (dark purple -> yellow)
const VIRIDIS: [(u8, u8, u8); 10] = [
    (68, 1, 84),
    (72, 40, 120),
    (62, 74, 137),
    (49, 104, 142),
    (38, 130, 142),
    (31, 158, 137),
    (53, 183, 121),
    (109, 205, 89),
    (180, 222, 44),
    (253, 231, 37),
];

const GRID: RGBColor = RGBColor(220, 220, 220);
const BAR_HALF_HEIGHT: f64 = 0.4;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the ranking chart to `output_path`, creating its directory if
    /// needed and replacing any existing file.
    pub fn render_ranking(
        summary: &RankingSummary,
        style: &ChartStyle,
        output_path: &Path,
    ) -> Result<PathBuf> {
        if let Some(dir) = output_path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let (width, height) = (style.width, style.height);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw_chart(&root, summary, style)
                .map_err(|e| RankerError::Render(e.to_string()))?;
            root.present()
                .map_err(|e| RankerError::Render(e.to_string()))?;
        }

        let img = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RankerError::Render("pixel buffer size mismatch".to_string()))?;
        img.save(output_path)
            .map_err(|e| RankerError::Render(format!("{}: {}", output_path.display(), e)))?;

        info!(path = %output_path.display(), bars = summary.len(), "chart saved");
        Ok(output_path.to_path_buf())
    }

    fn draw_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        summary: &RankingSummary,
        style: &ChartStyle,
    ) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let n = summary.len();
        let rows = n.max(1);
        let x_max = summary
            .max_mean()
            .map(|m| m * 1.1)
            .unwrap_or(1.0)
            .max(1.0);
        let labels: Vec<&str> = summary.courses();

        // Entry i sits at y = n - 1 - i so the first entry is drawn on top.
        let label_at = |y: &f64| -> String {
            let idx = y.round();
            if (y - idx).abs() > 1e-6 || idx < 0.0 || idx as usize >= n {
                return String::new();
            }
            labels[n - 1 - idx as usize].to_string()
        };
        let tick_at = |x: &f64| -> String { format!("{:.1}", x) };

        let mut chart = ChartBuilder::on(root)
            .caption(&style.title, (FONT, 26))
            .margin(20)
            .x_label_area_size(55)
            .y_label_area_size(Self::label_area_width(&labels))
            .build_cartesian_2d(0f64..x_max, -0.5f64..(rows as f64 - 0.5))?;

        let mut mesh = chart.configure_mesh();
        mesh.disable_y_mesh()
            .y_labels(rows)
            .y_label_formatter(&label_at)
            .x_label_formatter(&tick_at)
            .x_desc(style.x_label.as_str())
            .axis_desc_style((FONT, 17))
            .label_style((FONT, 14))
            .light_line_style(TRANSPARENT)
            .bold_line_style(GRID);
        if !style.x_gridlines {
            mesh.disable_x_mesh();
        }
        mesh.draw()?;

        chart.draw_series(summary.iter().enumerate().map(|(i, entry)| {
            let y = (n - 1 - i) as f64;
            let color = Self::bar_color(i, n);
            Rectangle::new(
                [
                    (0.0, y - BAR_HALF_HEIGHT),
                    (entry.mean_rank, y + BAR_HALF_HEIGHT),
                ],
                color.filled(),
            )
        }))?;

        let value_style =
            TextStyle::from((FONT, 13).into_font()).pos(Pos::new(HPos::Left, VPos::Center));
        let pad = x_max * 0.01;
        chart.draw_series(summary.iter().enumerate().map(|(i, entry)| {
            let y = (n - 1 - i) as f64;
            Text::new(
                format!("{:.2}", entry.mean_rank),
                (entry.mean_rank + pad, y),
                value_style.clone(),
            )
        }))?;

        debug!(bars = n, x_max, "drew ranking bars");
        Ok(())
    }

    /// Color of bar `idx` out of `count`, sampled along the viridis ramp.
    fn bar_color(idx: usize, count: usize) -> RGBColor {
        let t = if count > 1 {
            idx as f64 / (count - 1) as f64
        } else {
            0.0
        };
        let scaled = t * (VIRIDIS.len() - 1) as f64;
        let lower = scaled.floor() as usize;
        let upper = (lower + 1).min(VIRIDIS.len() - 1);
        let frac = scaled - lower as f64;

        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        let (a, b) = (VIRIDIS[lower], VIRIDIS[upper]);
        RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
    }

    /// Width reserved for course labels, from the longest label.
    fn label_area_width(labels: &[&str]) -> u32 {
        let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
        (longest * 8 + 20).clamp(80, 400)
    }
}
