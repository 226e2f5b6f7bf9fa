use image::GrayImage;
use imageproc::{
    contours::{BorderType, find_contours},
    point::Point,
};

use crate::Region;

/// Outer borders of top-level components only; hole borders and
/// components nested inside holes are skipped.
pub fn extract_regions(mask: &GrayImage) -> Vec<Region> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
        .filter_map(|contour| region_from_points(&contour.points))
        .collect()
}

/// Keeps regions whose area is strictly greater than `min_area`.
pub fn filter_by_area(regions: Vec<Region>, min_area: f64) -> Vec<Region> {
    regions.into_iter().filter(|r| r.area > min_area).collect()
}

fn region_from_points(points: &[Point<i32>]) -> Option<Region> {
    let min_x = points.iter().map(|p| p.x).min()?;
    let max_x = points.iter().map(|p| p.x).max()?;
    let min_y = points.iter().map(|p| p.y).min()?;
    let max_y = points.iter().map(|p| p.y).max()?;

    Some(Region {
        x: min_x as u32,
        y: min_y as u32,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
        area: polygon_area(points),
    })
}

pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let twice_area = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum::<i64>();

    twice_area.abs() as f64 / 2.0
}
