// Difference detection engine tests

use image::{GrayImage, Luma, Rgb, RgbImage};

use revview::diff::contour::find_external_contours;
use revview::diff::{DiffConfig, difference};
use revview::page::Page;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);
const GRAY: Rgb<u8> = Rgb([128, 128, 128]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

fn blank(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, WHITE)
}

fn paint(img: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.put_pixel(x, y, color);
        }
    }
}

fn thin_blue(ignore_background_rects: bool) -> DiffConfig {
    DiffConfig {
        line_color: BLUE,
        line_width: 1,
        background_color: WHITE,
        ignore_background_rects,
    }
}

fn rgb(page: &Page) -> &RgbImage {
    match page {
        Page::Rgb(img) => img,
        Page::Gray(_) => panic!("expected an RGB page"),
    }
}

/// Inclusive bounds of every drawn outline, one entry per separate outline.
fn outlines(page: &Page, color: Rgb<u8>) -> Vec<(u32, u32, u32, u32)> {
    let img = rgb(page);
    let mut mask = GrayImage::new(img.width(), img.height());
    for (x, y, px) in img.enumerate_pixels() {
        if *px == color {
            mask.put_pixel(x, y, Luma([255]));
        }
    }
    find_external_contours(&mask)
        .into_iter()
        .map(|c| {
            let b = c.bounds;
            (b.x, b.y, b.x + b.width - 1, b.y + b.height - 1)
        })
        .collect()
}

// ============================================================
// 1. Identity and guards
// ============================================================

#[test]
fn test_self_diff_has_no_regions() {
    let mut img = blank(120, 80);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = Rgb([(x * 2) as u8, (y * 3) as u8, ((x + y) % 256) as u8]);
    }
    let page = Page::Rgb(img);

    let result = difference(&page, &page, &thin_blue(false));
    assert_eq!(result.left, page);
    assert_eq!(result.right, page);
}

#[test]
fn test_size_mismatch_passes_inputs_through() {
    let mut big = blank(100, 100);
    paint(&mut big, 10, 10, 30, 30, RED);
    let p = Page::Rgb(big);
    let q = Page::Rgb(blank(50, 50));

    let result = difference(&p, &q, &thin_blue(false));
    assert_eq!(result.left, p);
    assert_eq!(result.right, q);
}

#[test]
fn test_channel_count_mismatch_passes_inputs_through() {
    let gray = Page::Gray(GrayImage::from_pixel(40, 40, Luma([255])));
    let color = Page::Rgb(blank(40, 40));

    let result = difference(&gray, &color, &thin_blue(false));
    assert_eq!(result.left, gray);
    assert_eq!(result.right, color);
}

#[test]
fn test_single_channel_pages_are_promoted() {
    let a = GrayImage::from_pixel(1, 64, Luma([200]));
    let mut b = a.clone();
    for y in 10..30 {
        b.put_pixel(0, y, Luma([0]));
    }

    let result = difference(&Page::Gray(a), &Page::Gray(b), &thin_blue(false));
    assert_eq!(result.left.channels(), 3);
    assert_eq!(result.right.channels(), 3);
    assert_eq!(result.left.shape(), (64, 1, 3));
}

#[test]
fn test_gray_self_diff_is_replicated_input() {
    let a = GrayImage::from_pixel(30, 20, Luma([77]));
    let result = difference(&Page::Gray(a.clone()), &Page::Gray(a), &thin_blue(false));
    assert!(rgb(&result.left).pixels().all(|p| p.0 == [77, 77, 77]));
}

// ============================================================
// 2. Noise suppression
// ============================================================

#[test]
fn test_single_pixel_change_is_ignored() {
    let left = blank(100, 100);
    let mut right = left.clone();
    right.put_pixel(50, 50, Rgb([0, 0, 0]));

    let result = difference(
        &Page::Rgb(left.clone()),
        &Page::Rgb(right.clone()),
        &thin_blue(false),
    );
    assert_eq!(result.left, Page::Rgb(left));
    assert_eq!(result.right, Page::Rgb(right));
}

#[test]
fn test_minimum_area_boundary() {
    // A 4x4 block encloses area 9, a 5x5 block area 16.
    let left = blank(100, 100);
    let mut small = left.clone();
    paint(&mut small, 40, 40, 4, 4, RED);
    let mut large = left.clone();
    paint(&mut large, 40, 40, 5, 5, RED);

    let config = thin_blue(false);
    let result = difference(&Page::Rgb(left.clone()), &Page::Rgb(small), &config);
    assert!(outlines(&result.right, BLUE).is_empty());

    let result = difference(&Page::Rgb(left), &Page::Rgb(large), &config);
    assert_eq!(outlines(&result.right, BLUE).len(), 1);
}

// ============================================================
// 3. Region geometry and background suppression
// ============================================================

#[test]
fn test_red_square_outlined_on_both_sides() {
    let left = blank(200, 200);
    let mut right = left.clone();
    paint(&mut right, 20, 20, 60, 60, RED);

    let result = difference(&Page::Rgb(left), &Page::Rgb(right), &thin_blue(false));

    // (20, 20, 60, 60) grows by one pixel per merge round, then the outline
    // sits one more pixel outside the merged box.
    let expected = vec![(17, 17, 85, 85)];
    assert_eq!(outlines(&result.left, BLUE), expected);
    assert_eq!(outlines(&result.right, BLUE), expected);

    // Interior untouched.
    assert_eq!(*rgb(&result.right).get_pixel(50, 50), RED);
    assert_eq!(*rgb(&result.left).get_pixel(50, 50), WHITE);
}

#[test]
fn test_background_regions_dropped_per_side() {
    let mut left = blank(200, 200);
    let mut right = left.clone();
    paint(&mut right, 20, 20, 60, 60, RED);
    // Present on the left only: on the right its interior is pure background.
    paint(&mut left, 120, 120, 50, 50, GRAY);

    let (left, right) = (Page::Rgb(left), Page::Rgb(right));

    let keep_all = difference(&left, &right, &thin_blue(false));
    assert_eq!(outlines(&keep_all.right, BLUE).len(), 2);
    assert_eq!(outlines(&keep_all.left, BLUE).len(), 2);

    let suppressed = difference(&left, &right, &thin_blue(true));
    assert_eq!(outlines(&suppressed.right, BLUE), vec![(17, 17, 85, 85)]);

    // On the left the red square's area is background; the gray block is not.
    let left_outlines = outlines(&suppressed.left, BLUE);
    assert_eq!(left_outlines.len(), 1);
    assert!(left_outlines[0].0 > 100);
}

#[test]
fn test_uniform_interior_with_background_border_is_dropped() {
    // Ring of content around a background-coloured interior: the margin-shrunk
    // interior is all white, so the region counts as background.
    let left = blank(200, 200);
    let mut right = left.clone();
    paint(&mut right, 20, 20, 100, 100, RED);
    paint(&mut right, 30, 30, 80, 80, WHITE);

    let result = difference(&Page::Rgb(left), &Page::Rgb(right), &thin_blue(true));
    assert!(outlines(&result.right, BLUE).is_empty());
}

#[test]
fn test_background_color_must_match_exactly() {
    let left = blank(200, 200);
    let mut right = left.clone();
    paint(&mut right, 20, 20, 60, 60, RED);

    let config = DiffConfig {
        background_color: Rgb([254, 255, 255]),
        ..thin_blue(true)
    };
    let result = difference(&Page::Rgb(left), &Page::Rgb(right), &config);
    // Left interior is white, not the configured background: kept.
    assert_eq!(outlines(&result.left, BLUE).len(), 1);
}

// ============================================================
// 4. Merge rounds
// ============================================================

#[test]
fn test_nearby_regions_merge() {
    let left = blank(200, 100);
    let mut right = left.clone();
    paint(&mut right, 20, 20, 10, 10, RED);
    // Five-pixel gap: still separate after one round, merged after two.
    paint(&mut right, 35, 20, 10, 10, RED);

    let result = difference(&Page::Rgb(left), &Page::Rgb(right), &thin_blue(false));
    let found = outlines(&result.right, BLUE);
    assert_eq!(found.len(), 1, "expected one merged region, got {found:?}");
}

#[test]
fn test_distant_regions_stay_separate() {
    let left = blank(200, 100);
    let mut right = left.clone();
    paint(&mut right, 20, 20, 10, 10, RED);
    paint(&mut right, 60, 20, 10, 10, RED);

    let result = difference(&Page::Rgb(left), &Page::Rgb(right), &thin_blue(false));
    assert_eq!(outlines(&result.right, BLUE).len(), 2);
}

#[test]
fn test_transitive_merge_of_chain() {
    let left = blank(300, 100);
    let mut right = left.clone();
    for x in [20, 35, 50, 65] {
        paint(&mut right, x, 20, 10, 10, RED);
    }

    let result = difference(&Page::Rgb(left), &Page::Rgb(right), &thin_blue(false));
    assert_eq!(outlines(&result.right, BLUE).len(), 1);
}

// ============================================================
// 5. Drawing options
// ============================================================

#[test]
fn test_filled_line_width() {
    let left = blank(200, 200);
    let mut right = left.clone();
    paint(&mut right, 20, 20, 60, 60, RED);

    let config = DiffConfig {
        line_width: -1,
        ..thin_blue(false)
    };
    let result = difference(&Page::Rgb(left), &Page::Rgb(right), &config);
    assert_eq!(*rgb(&result.right).get_pixel(50, 50), BLUE);
    assert_eq!(*rgb(&result.left).get_pixel(50, 50), BLUE);
    assert_eq!(*rgb(&result.right).get_pixel(150, 150), WHITE);
}

#[test]
fn test_thick_line_grows_outward() {
    let left = blank(200, 200);
    let mut right = left.clone();
    paint(&mut right, 20, 20, 60, 60, RED);

    let config = DiffConfig {
        line_width: 3,
        ..thin_blue(false)
    };
    let result = difference(&Page::Rgb(left), &Page::Rgb(right), &config);
    let img = rgb(&result.left);
    assert_eq!(*img.get_pixel(16, 50), BLUE);
    assert_eq!(*img.get_pixel(17, 50), BLUE);
    assert_eq!(*img.get_pixel(18, 50), BLUE);
    assert_eq!(*img.get_pixel(15, 50), WHITE);
    assert_eq!(*img.get_pixel(19, 50), WHITE);
}

#[test]
fn test_region_at_image_border_is_clipped() {
    let left = blank(100, 100);
    let mut right = left.clone();
    paint(&mut right, 0, 0, 30, 30, RED);

    let result = difference(&Page::Rgb(left), &Page::Rgb(right), &thin_blue(false));
    let found = outlines(&result.left, BLUE);
    assert_eq!(found.len(), 1);
    // Merge fills are clipped at the border, so the box only grows right and
    // down. Left and top strokes fall outside the image.
    let img = rgb(&result.left);
    assert_eq!(*img.get_pixel(0, 0), WHITE);
    assert_eq!(*img.get_pixel(35, 0), BLUE);
    assert_eq!(*img.get_pixel(0, 35), BLUE);
    assert_eq!(found[0], (0, 0, 35, 35));
}

#[test]
fn test_same_config_is_deterministic() {
    let mut left = blank(150, 150);
    paint(&mut left, 5, 5, 40, 20, GRAY);
    let mut right = blank(150, 150);
    paint(&mut right, 70, 90, 30, 30, RED);
    let (left, right) = (Page::Rgb(left), Page::Rgb(right));

    let config = DiffConfig::default();
    assert_eq!(
        difference(&left, &right, &config),
        difference(&left, &right, &config)
    );
}
