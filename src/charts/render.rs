use std::{fmt::Display, path::Path};

use anyhow::{Result, bail};
use palette::{Hsl, IntoColor, Srgb};
use plotters::element::Pie;
use plotters::prelude::*;

use super::series::Bin;

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);
const FOREST_GREEN: RGBColor = RGBColor(0, 128, 0);
const CORAL: RGBColor = RGBColor(255, 127, 80);
const MEDIUM_PURPLE: RGBColor = RGBColor(147, 112, 219);

const SET2: [RGBColor; 8] = [
    RGBColor(102, 194, 165),
    RGBColor(252, 141, 98),
    RGBColor(141, 160, 203),
    RGBColor(231, 138, 195),
    RGBColor(166, 216, 84),
    RGBColor(255, 217, 47),
    RGBColor(229, 196, 148),
    RGBColor(179, 179, 179),
];

pub const FONT: &str = "sans-serif";
const CAPTION_SIZE: i32 = 28;

/// Whether the caption font can be loaded. Text drawing needs a system font.
pub fn font_available() -> bool {
    (FONT, CAPTION_SIZE).into_font().box_size("Salary").is_ok()
}

/// Caption and axis descriptions of a cartesian chart.
#[derive(Debug, Clone, Copy)]
pub struct Labels<'a> {
    pub title: &'a str,
    pub x: &'a str,
    pub y: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    SteelBlue,
    Coral,
    MediumPurple,
}

impl BarColor {
    fn rgb(self) -> RGBColor {
        match self {
            BarColor::SteelBlue => STEEL_BLUE,
            BarColor::Coral => CORAL,
            BarColor::MediumPurple => MEDIUM_PURPLE,
        }
    }
}

fn segment_label<T: Display>(value: &SegmentValue<T>) -> String {
    match value {
        SegmentValue::Exact(label) | SegmentValue::CenterOf(label) => label.to_string(),
        SegmentValue::Last => String::new(),
    }
}

/// Padded `[low, high)` range around the values, never zero-width.
fn padded_range(values: impl Iterator<Item = f64>, floor_at_zero: bool) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = if max > min { max - min } else { max.abs().max(1.0) };
    let low = if floor_at_zero { 0.0_f64.min(min) } else { min - span * 0.05 };
    (low, max + span * 0.1)
}

/// Evenly spaced pastel hues, one per slice.
fn pastel_palette(n: usize) -> Vec<RGBColor> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.6, 0.75);
            let rgb: Srgb = hsl.into_color();
            let (red, green, blue) = rgb.into_format::<u8>().into_components();
            RGBColor(red, green, blue)
        })
        .collect()
}

pub fn histogram(path: &Path, labels: Labels<'_>, bins: &[Bin]) -> Result<()> {
    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = bins.first().map_or(0.0, |bin| bin.lower);
    let x_max = bins.last().map_or(1.0, |bin| bin.upper);
    let (_, y_max) = padded_range(bins.iter().map(|bin| bin.count as f64), true);

    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, (FONT, CAPTION_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.3))
        .x_desc(labels.x)
        .y_desc(labels.y)
        .draw()?;

    chart.draw_series(bins.iter().map(|bin| {
        Rectangle::new(
            [(bin.lower, 0.0), (bin.upper, bin.count as f64)],
            SKY_BLUE.mix(0.7).filled(),
        )
    }))?;
    chart.draw_series(bins.iter().map(|bin| {
        Rectangle::new(
            [(bin.lower, 0.0), (bin.upper, bin.count as f64)],
            BLACK.stroke_width(1),
        )
    }))?;

    root.present()?;
    Ok(())
}

pub fn box_plot(path: &Path, labels: Labels<'_>, groups: &[(String, Vec<f64>)]) -> Result<()> {
    let groups = groups
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .collect::<Vec<_>>();
    if groups.is_empty() {
        bail!("No values to plot for '{}'", labels.title);
    }
    let keys = groups.iter().map(|(key, _)| key.clone()).collect::<Vec<_>>();
    let (low, high) = padded_range(
        groups.iter().flat_map(|(_, values)| values.iter().copied()),
        false,
    );

    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, (FONT, CAPTION_SIZE))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(keys[..].into_segmented(), (low as f32)..(high as f32))?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(keys.len().max(1))
        .x_label_formatter(&|value| segment_label(value))
        .x_desc(labels.x)
        .y_desc(labels.y)
        .draw()?;

    chart.draw_series(keys.iter().zip(groups.iter()).enumerate().map(
        |(idx, (key, (_, values)))| {
            let quartiles = Quartiles::new(values.as_slice());
            Boxplot::new_vertical(SegmentValue::CenterOf(key), &quartiles)
                .width(40)
                .whisker_width(0.5)
                .style(SET2[idx % SET2.len()].stroke_width(2))
        },
    ))?;

    root.present()?;
    Ok(())
}

pub fn vertical_bars(
    path: &Path,
    labels: Labels<'_>,
    bars: &[(String, f64)],
    color: BarColor,
) -> Result<()> {
    if bars.is_empty() {
        bail!("No values to plot for '{}'", labels.title);
    }
    let keys = bars.iter().map(|(key, _)| key.clone()).collect::<Vec<_>>();
    let (_, y_max) = padded_range(bars.iter().map(|(_, value)| *value), true);

    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, (FONT, CAPTION_SIZE))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(keys[..].into_segmented(), 0.0..y_max)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(keys.len().max(1))
        .x_label_formatter(&|value| segment_label(value))
        .x_desc(labels.x)
        .y_desc(labels.y)
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(color.rgb().filled())
            .margin(10)
            .data(keys.iter().zip(bars.iter()).map(|(key, (_, value))| (key, *value))),
    )?;

    root.present()?;
    Ok(())
}

pub fn horizontal_bars(
    path: &Path,
    labels: Labels<'_>,
    bars: &[(String, f64)],
    color: BarColor,
) -> Result<()> {
    if bars.is_empty() {
        bail!("No values to plot for '{}'", labels.title);
    }
    let keys = bars.iter().map(|(key, _)| key.clone()).collect::<Vec<_>>();
    let (_, x_max) = padded_range(bars.iter().map(|(_, value)| *value), true);

    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, (FONT, CAPTION_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(140)
        .build_cartesian_2d(0.0..x_max, keys[..].into_segmented())?;
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(keys.len().max(1))
        .y_label_formatter(&|value| segment_label(value))
        .x_desc(labels.x)
        .y_desc(labels.y)
        .draw()?;

    chart.draw_series(
        Histogram::horizontal(&chart)
            .style(color.rgb().filled())
            .margin(10)
            .data(keys.iter().zip(bars.iter()).map(|(key, (_, value))| (key, *value))),
    )?;

    root.present()?;
    Ok(())
}

pub fn scatter(path: &Path, labels: Labels<'_>, points: &[(f64, f64)]) -> Result<()> {
    let (x_low, x_high) = padded_range(points.iter().map(|(x, _)| *x), false);
    let (y_low, y_high) = padded_range(points.iter().map(|(_, y)| *y), false);

    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, (FONT, CAPTION_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_low..x_high, y_low..y_high)?;
    chart
        .configure_mesh()
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.3))
        .x_desc(labels.x)
        .y_desc(labels.y)
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 7, FOREST_GREEN.mix(0.6).filled())),
    )?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 7, BLACK.stroke_width(1))),
    )?;

    root.present()?;
    Ok(())
}

pub fn pie(path: &Path, title: &str, counts: &[(String, usize)]) -> Result<()> {
    let root = BitMapBackend::new(path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, (FONT, CAPTION_SIZE))?;

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;
    let sizes = counts.iter().map(|(_, count)| *count as f64).collect::<Vec<_>>();
    if sizes.is_empty() {
        bail!("No values to plot for '{title}'");
    }
    let slice_labels = counts.iter().map(|(label, _)| label.clone()).collect::<Vec<_>>();
    let colors = pastel_palette(counts.len());

    let mut pie = Pie::new(
        &center,
        &radius,
        sizes.as_slice(),
        colors.as_slice(),
        slice_labels.as_slice(),
    );
    pie.start_angle(90.0);
    pie.label_style((FONT, 18).into_font().color(&BLACK));
    pie.percentages((FONT, 16).into_font().color(&BLACK));
    root.draw(&pie)?;

    root.present()?;
    Ok(())
}
