// Binary change mask between two same-sized RGB pages.

use image::{GrayImage, Luma, Rgb, RgbImage};

/// Fixed-point BT.601 luma (14-bit weights, rounded).
pub fn intensity(px: &Rgb<u8>) -> u8 {
    let [r, g, b] = px.0;
    ((r as u32 * 4899 + g as u32 * 9617 + b as u32 * 1868 + 8192) >> 14) as u8
}

/// Mark every pixel whose intensity differs between `a` and `b`.
///
/// Foreground pixels are 255, unchanged pixels 0. Any nonzero delta counts.
/// Both images must have the same dimensions.
pub fn change_mask(a: &RgbImage, b: &RgbImage) -> GrayImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());

    let (width, height) = a.dimensions();
    let mut mask = GrayImage::new(width, height);
    for ((pa, pb), out) in a.pixels().zip(b.pixels()).zip(mask.pixels_mut()) {
        let delta = (intensity(pa) as i32 - intensity(pb) as i32).unsigned_abs();
        let delta = delta.min(u8::MAX as u32) as u8;
        *out = Luma([if delta >= 1 { 255 } else { 0 }]);
    }
    mask
}
