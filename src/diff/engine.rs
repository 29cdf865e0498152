// Difference detection: change mask -> merged regions -> annotated copies.

use image::{GrayImage, Luma, RgbImage};
use tracing::{debug, warn};

use super::contour::find_external_contours;
use super::draw::{fill_rect, stroke_rect};
use super::mask::change_mask;
use super::{
    BACKGROUND_MARGIN, DiffConfig, DiffResult, EXTEND_MARGIN, MERGE_ROUNDS, MIN_CONTOUR_AREA,
    Region,
};
use crate::page::Page;

/// Highlight the regions where two pages differ.
///
/// Pages of different shape (height, width or channel count) are returned
/// unchanged. Otherwise both pages are promoted to RGB and each receives an
/// outlined rectangle around every changed region, as judged against its own
/// pixels. The function is pure and never fails.
pub fn difference(left: &Page, right: &Page, config: &DiffConfig) -> DiffResult {
    if left.shape() != right.shape() {
        warn!(
            left = ?left.shape(),
            right = ?right.shape(),
            "page shapes differ, skipping difference detection"
        );
        return DiffResult {
            left: left.clone(),
            right: right.clone(),
        };
    }

    let left_rgb = left.to_rgb();
    let right_rgb = right.to_rgb();

    let mask = change_mask(&left_rgb, &right_rgb);
    let left_regions = merged_regions(&left_rgb, &mask, config);
    let right_regions = merged_regions(&right_rgb, &mask, config);
    debug!(
        left = left_regions.len(),
        right = right_regions.len(),
        "difference regions"
    );

    DiffResult {
        left: Page::Rgb(annotate(&left_rgb, &left_regions, config)),
        right: Page::Rgb(annotate(&right_rgb, &right_regions, config)),
    }
}

/// Extract changed regions for one side, merging neighbours over
/// [`MERGE_ROUNDS`] fill-and-reextract rounds.
fn merged_regions(src: &RgbImage, mask: &GrayImage, config: &DiffConfig) -> Vec<Region> {
    let mut contours = find_external_contours(mask);

    for _ in 0..MERGE_ROUNDS {
        let mut canvas = GrayImage::new(src.width(), src.height());
        for contour in &contours {
            if contour.area() < MIN_CONTOUR_AREA {
                continue;
            }
            if config.ignore_background_rects && is_background(src, &contour.bounds, config) {
                continue;
            }
            fill_rect(
                &mut canvas,
                contour.bounds.outset(EXTEND_MARGIN),
                Luma([255]),
            );
        }
        contours = find_external_contours(&canvas);
    }

    contours.into_iter().map(|c| c.bounds).collect()
}

/// Whether the margin-shrunk interior of `region` is entirely background.
///
/// An axis is only shrunk when the region is longer than twice the margin on
/// that axis.
fn is_background(src: &RgbImage, region: &Region, config: &DiffConfig) -> bool {
    let (mut x1, mut x2) = (region.x, region.x + region.width);
    let (mut y1, mut y2) = (region.y, region.y + region.height);
    if region.width > 2 * BACKGROUND_MARGIN {
        x1 += BACKGROUND_MARGIN;
        x2 -= BACKGROUND_MARGIN;
    }
    if region.height > 2 * BACKGROUND_MARGIN {
        y1 += BACKGROUND_MARGIN;
        y2 -= BACKGROUND_MARGIN;
    }

    (y1..y2).all(|y| (x1..x2).all(|x| *src.get_pixel(x, y) == config.background_color))
}

fn annotate(src: &RgbImage, regions: &[Region], config: &DiffConfig) -> RgbImage {
    let mut dst = src.clone();
    for region in regions {
        stroke_rect(
            &mut dst,
            region.outset(EXTEND_MARGIN),
            config.line_color,
            config.line_width,
        );
    }
    dst
}
