//! Chart builders for the two report families.
//!
//! Each function renders one print into the prints directory and returns
//! the path it wrote. File names are the report identifiers the analysis
//! write-ups reference.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use crate::data::{
    counts_in_order, counts_sorted_ascending, histogram, mean_of, soc_neighborhoods,
    split_by_business, CafeRow, DOWNTOWN_REF,
};
use crate::style::{
    CAPTION_FONT, COMPETITOR_STEEL, DOWNTOWN_GOLD, FIG_SIZE, LABEL_FONT, NO_SOC_MAGENTA, SOC_BLUE,
    SOC_RED,
};
use crate::{render_err, ReportError};

const PRICE_CATEGORIES: [&str; 4] = ["budget", "moderate", "premium", "luxury"];
const LOCATION_ZONES: [&str; 4] = ["core", "inner", "outer", "peripheral"];

fn print_path(prints: &Path, name: &str) -> Result<PathBuf, ReportError> {
    if !prints.exists() {
        std::fs::create_dir_all(prints)?;
    }
    Ok(prints.join(name))
}

/// g21: cafe concentration by neighbourhood, horizontal bars coloured by
/// SOC presence.
pub fn g21_cafe_concentration(cafes: &[CafeRow], prints: &Path) -> Result<PathBuf, ReportError> {
    let out = print_path(prints, "g21_cafe_concentration.png")?;
    let counts = counts_sorted_ascending(cafes, |c| c.neighborhood.clone());
    let soc_hoods = soc_neighborhoods(cafes);
    let max = counts.iter().map(|(_, n)| *n).max().unwrap_or(0) as i32;
    let rows = counts.len() as i32;

    let root = BitMapBackend::new(&out, FIG_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Cafe Concentration Across Edmonton Neighborhoods", CAPTION_FONT)
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(260)
        .build_cartesian_2d(0..max + 1, 0..rows)
        .map_err(render_err)?;

    let names: Vec<String> = counts.iter().map(|(name, _)| name.clone()).collect();
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Number of Cafes")
        .y_desc("Neighborhood")
        .axis_desc_style(LABEL_FONT)
        .label_style(LABEL_FONT)
        .y_labels(counts.len())
        .y_label_formatter(&|idx| {
            names
                .get(*idx as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, (name, count))| {
            let color = if soc_hoods.contains(name) {
                SOC_BLUE
            } else {
                NO_SOC_MAGENTA
            };
            Rectangle::new([(0, i as i32), (*count as i32, i as i32 + 1)], color.filled())
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    drop(chart);
    drop(root);
    info!(path = %out.display(), "saved");
    Ok(out)
}

/// g22: geographic scatter with the downtown reference marker.
pub fn g22_geographic_map(cafes: &[CafeRow], prints: &Path) -> Result<PathBuf, ReportError> {
    let out = print_path(prints, "g22_geographic_map.png")?;
    let located: Vec<&CafeRow> = cafes
        .iter()
        .filter(|c| c.latitude.is_some() && c.longitude.is_some())
        .collect();

    let root = BitMapBackend::new(&out, FIG_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Edmonton Cafe Geographic Distribution", CAPTION_FONT)
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(110)
        .build_cartesian_2d(-113.72f64..-113.28f64, 53.38f64..53.72f64)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .axis_desc_style(LABEL_FONT)
        .label_style(LABEL_FONT)
        .draw()
        .map_err(render_err)?;

    let point = |c: &CafeRow| (c.longitude.unwrap_or(0.0), c.latitude.unwrap_or(0.0));
    chart
        .draw_series(
            located
                .iter()
                .filter(|c| !c.is_soc)
                .map(|c| Circle::new(point(c), 8, COMPETITOR_STEEL.filled())),
        )
        .map_err(render_err)?
        .label("Competitors")
        .legend(|(x, y)| Circle::new((x + 10, y), 6, COMPETITOR_STEEL.filled()));
    chart
        .draw_series(
            located
                .iter()
                .filter(|c| c.is_soc)
                .map(|c| TriangleMarker::new(point(c), 12, SOC_RED.filled())),
        )
        .map_err(render_err)?
        .label("Square One Coffee")
        .legend(|(x, y)| TriangleMarker::new((x + 10, y), 8, SOC_RED.filled()));
    chart
        .draw_series(std::iter::once(Circle::new(
            (DOWNTOWN_REF.1, DOWNTOWN_REF.0),
            14,
            DOWNTOWN_GOLD.filled(),
        )))
        .map_err(render_err)?
        .label("Downtown Core")
        .legend(|(x, y)| Circle::new((x + 10, y), 8, DOWNTOWN_GOLD.filled()));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.9))
        .label_font(LABEL_FONT)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    drop(chart);
    drop(root);
    info!(path = %out.display(), "saved");
    Ok(out)
}

/// g23: cafes per location zone, SOC and competitor bars side by side.
pub fn g23_location_zones(cafes: &[CafeRow], prints: &Path) -> Result<PathBuf, ReportError> {
    let out = print_path(prints, "g23_location_zones.png")?;
    let (soc, competitors) = split_by_business(cafes);
    let zone_of = |c: &CafeRow| c.location_zone.clone();
    let soc_rows: Vec<CafeRow> = soc.iter().map(|c| (*c).clone()).collect();
    let comp_rows: Vec<CafeRow> = competitors.iter().map(|c| (*c).clone()).collect();
    let soc_counts = counts_in_order(&soc_rows, &LOCATION_ZONES, zone_of);
    let comp_counts = counts_in_order(&comp_rows, &LOCATION_ZONES, zone_of);
    let max = soc_counts
        .iter()
        .chain(comp_counts.iter())
        .map(|(_, n)| *n)
        .max()
        .unwrap_or(0) as i32;

    let root = BitMapBackend::new(&out, FIG_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    // Three slots per zone: SOC bar, competitor bar, gap.
    let mut chart = ChartBuilder::on(&root)
        .caption("Cafe Distribution by Location Zone", CAPTION_FONT)
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(0..(LOCATION_ZONES.len() as i32) * 3, 0..max + 1)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Location Zone")
        .y_desc("Number of Cafes")
        .axis_desc_style(LABEL_FONT)
        .label_style(LABEL_FONT)
        .x_labels(LOCATION_ZONES.len())
        .x_label_formatter(&|x| {
            LOCATION_ZONES
                .get((*x / 3) as usize)
                .map(|z| z.to_string())
                .unwrap_or_default()
        })
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(soc_counts.iter().enumerate().map(|(i, (_, n))| {
            Rectangle::new(
                [(i as i32 * 3, 0), (i as i32 * 3 + 1, *n as i32)],
                SOC_RED.filled(),
            )
        }))
        .map_err(render_err)?
        .label("Square One Coffee")
        .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], SOC_RED.filled()));
    chart
        .draw_series(comp_counts.iter().enumerate().map(|(i, (_, n))| {
            Rectangle::new(
                [(i as i32 * 3 + 1, 0), (i as i32 * 3 + 2, *n as i32)],
                COMPETITOR_STEEL.filled(),
            )
        }))
        .map_err(render_err)?
        .label("Competitors")
        .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], COMPETITOR_STEEL.filled()));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.9))
        .label_font(LABEL_FONT)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    drop(chart);
    drop(root);
    info!(path = %out.display(), "saved");
    Ok(out)
}

/// g31: beverage-price histogram across the market.
pub fn g31_price_distribution(cafes: &[CafeRow], prints: &Path) -> Result<PathBuf, ReportError> {
    let out = print_path(prints, "g31_price_distribution.png")?;
    let prices: Vec<f64> = cafes.iter().filter_map(|c| c.avg_beverage_price).collect();
    const LO: f64 = 2.0;
    const HI: f64 = 8.0;
    const BUCKETS: usize = 12;
    let counts = histogram(&prices, LO, HI, BUCKETS);
    let width = (HI - LO) / BUCKETS as f64;
    let max = counts.iter().copied().max().unwrap_or(0) as i32;

    let root = BitMapBackend::new(&out, FIG_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Beverage Price Distribution", CAPTION_FONT)
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(LO..HI, 0..max + 1)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("Average Beverage Price (CAD)")
        .y_desc("Number of Cafes")
        .axis_desc_style(LABEL_FONT)
        .label_style(LABEL_FONT)
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, n)| {
            let x0 = LO + i as f64 * width;
            Rectangle::new([(x0, 0), (x0 + width, *n as i32)], SOC_BLUE.filled())
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    drop(chart);
    drop(root);
    info!(path = %out.display(), "saved");
    Ok(out)
}

/// g32: cafes per price category.
pub fn g32_price_categories(cafes: &[CafeRow], prints: &Path) -> Result<PathBuf, ReportError> {
    let out = print_path(prints, "g32_price_categories.png")?;
    let counts = counts_in_order(cafes, &PRICE_CATEGORIES, |c| c.price_category.clone());
    category_bars(
        &out,
        "Price Category Breakdown",
        "Price Category",
        &counts,
        SOC_BLUE,
    )?;
    info!(path = %out.display(), "saved");
    Ok(out)
}

/// g41: cafes per cafe type.
pub fn g41_cafe_type_distribution(
    cafes: &[CafeRow],
    prints: &Path,
) -> Result<PathBuf, ReportError> {
    let out = print_path(prints, "g41_cafe_type_distribution.png")?;
    let counts = counts_sorted_ascending(cafes, |c| c.cafe_type.clone());
    category_bars(
        &out,
        "Market Segmentation by Cafe Type",
        "Cafe Type",
        &counts,
        NO_SOC_MAGENTA,
    )?;
    info!(path = %out.display(), "saved");
    Ok(out)
}

/// Vertical labelled count bars shared by g32 and g41.
fn category_bars(
    out: &Path,
    title: &str,
    x_desc: &str,
    counts: &[(String, usize)],
    color: RGBColor,
) -> Result<(), ReportError> {
    let max = counts.iter().map(|(_, n)| *n).max().unwrap_or(0) as i32;
    let root = BitMapBackend::new(out, FIG_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(110)
        .y_label_area_size(90)
        .build_cartesian_2d(0..counts.len() as i32 * 2, 0..max + 1)
        .map_err(render_err)?;

    let labels: Vec<String> = counts.iter().map(|(name, _)| name.clone()).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc("Number of Cafes")
        .axis_desc_style(LABEL_FONT)
        .label_style(LABEL_FONT)
        .x_labels(counts.len())
        .x_label_formatter(&|x| {
            labels
                .get((*x / 2) as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, (_, n))| {
            Rectangle::new(
                [(i as i32 * 2, 0), (i as i32 * 2 + 1, *n as i32)],
                color.filled(),
            )
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// g51: SOC vs competitor means across the four key metrics, one panel
/// per metric.
pub fn g51_metrics_comparison(cafes: &[CafeRow], prints: &Path) -> Result<PathBuf, ReportError> {
    let out = print_path(prints, "g51_metrics_comparison.png")?;
    let (soc, competitors) = split_by_business(cafes);

    let metrics: [(&str, Option<f64>, Option<f64>); 4] = [
        (
            "Avg Price (CAD)",
            mean_of(&soc, |c| c.avg_beverage_price),
            mean_of(&competitors, |c| c.avg_beverage_price),
        ),
        (
            "Avg Rating",
            mean_of(&soc, |c| c.google_rating),
            mean_of(&competitors, |c| c.google_rating),
        ),
        (
            "Avg Quality Score",
            mean_of(&soc, |c| c.quality_score),
            mean_of(&competitors, |c| c.quality_score),
        ),
        (
            "Avg Reviews",
            mean_of(&soc, |c| c.review_count.map(|n| n as f64)),
            mean_of(&competitors, |c| c.review_count.map(|n| n as f64)),
        ),
    ];

    let root = BitMapBackend::new(&out, FIG_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let panels = root.split_evenly((2, 2));

    for (panel, (title, soc_value, comp_value)) in panels.iter().zip(metrics.iter()) {
        let soc_value = soc_value.unwrap_or(0.0);
        let comp_value = comp_value.unwrap_or(0.0);
        let top = (soc_value.max(comp_value) * 1.2).max(1.0);

        let mut chart = ChartBuilder::on(panel)
            .caption(*title, ("sans-serif", 32))
            .margin(15)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(0..5, 0f64..top)
            .map_err(render_err)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .label_style(("sans-serif", 20))
            .x_labels(2)
            .x_label_formatter(&|x| match *x {
                1 => "SOC".to_string(),
                3 => "Competitors".to_string(),
                _ => String::new(),
            })
            .draw()
            .map_err(render_err)?;
        chart
            .draw_series([
                Rectangle::new([(1, 0.0), (2, soc_value)], SOC_RED.filled()),
                Rectangle::new([(3, 0.0), (4, comp_value)], COMPETITOR_STEEL.filled()),
            ])
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    drop(panels);
    drop(root);
    info!(path = %out.display(), "saved");
    Ok(out)
}

/// g52: price / quality positioning matrix.
pub fn g52_positioning_matrix(cafes: &[CafeRow], prints: &Path) -> Result<PathBuf, ReportError> {
    let out = print_path(prints, "g52_positioning_matrix.png")?;
    let positioned: Vec<&CafeRow> = cafes
        .iter()
        .filter(|c| c.avg_beverage_price.is_some() && c.quality_score.is_some())
        .collect();
    let max_score = positioned
        .iter()
        .filter_map(|c| c.quality_score)
        .fold(0.0f64, f64::max)
        * 1.1;

    let root = BitMapBackend::new(&out, FIG_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Price-Quality Positioning Matrix", CAPTION_FONT)
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(2.0f64..8.0f64, 0f64..max_score.max(1.0))
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("Average Beverage Price (CAD)")
        .y_desc("Quality Score")
        .axis_desc_style(LABEL_FONT)
        .label_style(LABEL_FONT)
        .draw()
        .map_err(render_err)?;

    let point = |c: &CafeRow| {
        (
            c.avg_beverage_price.unwrap_or(0.0),
            c.quality_score.unwrap_or(0.0),
        )
    };
    chart
        .draw_series(
            positioned
                .iter()
                .filter(|c| !c.is_soc)
                .map(|c| Circle::new(point(c), 8, COMPETITOR_STEEL.filled())),
        )
        .map_err(render_err)?
        .label("Competitors")
        .legend(|(x, y)| Circle::new((x + 10, y), 6, COMPETITOR_STEEL.filled()));
    chart
        .draw_series(
            positioned
                .iter()
                .filter(|c| c.is_soc)
                .map(|c| TriangleMarker::new(point(c), 12, SOC_RED.filled())),
        )
        .map_err(render_err)?
        .label("Square One Coffee")
        .legend(|(x, y)| TriangleMarker::new((x + 10, y), 8, SOC_RED.filled()));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.9))
        .label_font(LABEL_FONT)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    drop(chart);
    drop(root);
    info!(path = %out.display(), "saved");
    Ok(out)
}

/// g61: rating distribution, SOC and competitors sharing each bin.
pub fn g61_rating_distribution(cafes: &[CafeRow], prints: &Path) -> Result<PathBuf, ReportError> {
    let out = print_path(prints, "g61_rating_distribution.png")?;
    let (soc, competitors) = split_by_business(cafes);
    const LO: f64 = 3.0;
    const HI: f64 = 5.0;
    const BUCKETS: usize = 8;
    let soc_ratings: Vec<f64> = soc.iter().filter_map(|c| c.google_rating).collect();
    let comp_ratings: Vec<f64> = competitors.iter().filter_map(|c| c.google_rating).collect();
    let soc_counts = histogram(&soc_ratings, LO, HI, BUCKETS);
    let comp_counts = histogram(&comp_ratings, LO, HI, BUCKETS);
    let width = (HI - LO) / BUCKETS as f64;
    let max = soc_counts
        .iter()
        .chain(comp_counts.iter())
        .copied()
        .max()
        .unwrap_or(0) as i32;

    let root = BitMapBackend::new(&out, FIG_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Google Rating Distribution", CAPTION_FONT)
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(LO..HI, 0..max + 1)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("Google Rating")
        .y_desc("Number of Cafes")
        .axis_desc_style(LABEL_FONT)
        .label_style(LABEL_FONT)
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(comp_counts.iter().enumerate().map(|(i, n)| {
            let x0 = LO + i as f64 * width;
            Rectangle::new(
                [(x0, 0), (x0 + width / 2.0, *n as i32)],
                COMPETITOR_STEEL.filled(),
            )
        }))
        .map_err(render_err)?
        .label("Competitors")
        .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], COMPETITOR_STEEL.filled()));
    chart
        .draw_series(soc_counts.iter().enumerate().map(|(i, n)| {
            let x0 = LO + i as f64 * width + width / 2.0;
            Rectangle::new([(x0, 0), (x0 + width / 2.0, *n as i32)], SOC_RED.filled())
        }))
        .map_err(render_err)?
        .label("Square One Coffee")
        .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], SOC_RED.filled()));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.9))
        .label_font(LABEL_FONT)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    drop(chart);
    drop(root);
    info!(path = %out.display(), "saved");
    Ok(out)
}

/// g62: mean quality score, SOC vs competitors.
pub fn g62_quality_score(cafes: &[CafeRow], prints: &Path) -> Result<PathBuf, ReportError> {
    let out = print_path(prints, "g62_quality_score.png")?;
    let (soc, competitors) = split_by_business(cafes);
    let counts = vec![
        (
            "Square One Coffee".to_string(),
            mean_of(&soc, |c| c.quality_score).unwrap_or(0.0).round() as usize,
        ),
        (
            "Competitors".to_string(),
            mean_of(&competitors, |c| c.quality_score)
                .unwrap_or(0.0)
                .round() as usize,
        ),
    ];
    category_bars(
        &out,
        "Average Quality Score Comparison",
        "",
        &counts,
        SOC_BLUE,
    )?;
    info!(path = %out.display(), "saved");
    Ok(out)
}
