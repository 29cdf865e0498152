// Rectangle rasterization with clipping, for masks and annotations.

use image::{ImageBuffer, Pixel};

/// Rectangle with inclusive corners. Corners may lie outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Rect {
    fn grow(&self, by: i64) -> Rect {
        Rect {
            left: self.left - by,
            top: self.top - by,
            right: self.right + by,
            bottom: self.bottom + by,
        }
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Paint every pixel of `rect` that lies inside the image.
pub fn fill_rect<P>(img: &mut ImageBuffer<P, Vec<P::Subpixel>>, rect: Rect, color: P)
where
    P: Pixel,
{
    let (width, height) = img.dimensions();
    let x0 = rect.left.max(0);
    let y0 = rect.top.max(0);
    let x1 = rect.right.min(width as i64 - 1);
    let y1 = rect.bottom.min(height as i64 - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Stroke the outline of `rect`, or fill it when `thickness` is negative.
///
/// A stroke of thickness `t` covers `t / 2` pixels outside the nominal edge
/// and `(t - 1) / 2` pixels inside it. A thickness of 0 is drawn as 1.
pub fn stroke_rect<P>(
    img: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    rect: Rect,
    color: P,
    thickness: i32,
) where
    P: Pixel,
{
    if thickness < 0 {
        fill_rect(img, rect, color);
        return;
    }

    let t = thickness.max(1) as i64;
    let outer = rect.grow(t / 2);
    let inner = rect.grow(-((t - 1) / 2) - 1);

    let (width, height) = img.dimensions();
    let x0 = outer.left.max(0);
    let y0 = outer.top.max(0);
    let x1 = outer.right.min(width as i64 - 1);
    let y1 = outer.bottom.min(height as i64 - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            if !inner.contains(x, y) {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}
