// External contour extraction on binary masks.
//
// Foreground is 8-connected, background 4-connected. A component is external
// when the background region touching its top-left pixel is the region
// connected to the image border; components sitting inside a hole of another
// component are skipped. Outer borders are traced with Suzuki-Abe border
// following so that the contour area matches a polygon through the border
// pixel centres.

use std::collections::VecDeque;

use image::GrayImage;

use super::Region;

/// Neighbour offsets in counter-clockwise order (screen coordinates, y down),
/// starting east.
const DIRECTIONS: [(i64, i64); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const WEST: usize = 4;

/// Outer border of one connected component.
#[derive(Debug, Clone)]
pub struct Contour {
    /// Border pixels in tracing order.
    pub points: Vec<(u32, u32)>,
    pub bounds: Region,
}

impl Contour {
    /// Area of the polygon through the border pixel centres (shoelace).
    ///
    /// A single pixel or a one-pixel-wide line has zero area; a filled
    /// `w x h` rectangle has `(w - 1) * (h - 1)`.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice: i64 = 0;
        for i in 0..n {
            let (x0, y0) = self.points[i];
            let (x1, y1) = self.points[(i + 1) % n];
            twice += x0 as i64 * y1 as i64 - x1 as i64 * y0 as i64;
        }
        twice.unsigned_abs() as f64 / 2.0
    }
}

struct Grid<'a> {
    mask: &'a GrayImage,
    width: i64,
    height: i64,
}

impl Grid<'_> {
    fn is_foreground(&self, x: i64, y: i64) -> bool {
        x >= 0
            && y >= 0
            && x < self.width
            && y < self.height
            && self.mask.get_pixel(x as u32, y as u32).0[0] != 0
    }

    fn index(&self, x: i64, y: i64) -> usize {
        (y * self.width + x) as usize
    }
}

/// Extract the outer contours of all external components of `mask`.
///
/// Contours are returned in raster order of each component's top-left pixel.
pub fn find_external_contours(mask: &GrayImage) -> Vec<Contour> {
    if mask.width() == 0 || mask.height() == 0 {
        return Vec::new();
    }
    let grid = Grid {
        mask,
        width: mask.width() as i64,
        height: mask.height() as i64,
    };
    let outer = outer_background(&grid);
    let mut labelled = vec![false; (grid.width * grid.height) as usize];
    let mut contours = Vec::new();

    for y in 0..grid.height {
        for x in 0..grid.width {
            if !grid.is_foreground(x, y) || labelled[grid.index(x, y)] {
                continue;
            }
            let bounds = label_component(&grid, &mut labelled, x, y);

            // (x, y) is the component's top-left pixel, so the pixel above it
            // is background (or outside the image).
            let external = y == 0 || outer[grid.index(x, y - 1)];
            if external {
                contours.push(Contour {
                    points: trace_outer_border(&grid, x, y),
                    bounds,
                });
            }
        }
    }

    contours
}

/// Background pixels 4-connected to the image border.
fn outer_background(grid: &Grid<'_>) -> Vec<bool> {
    let mut outer = vec![false; (grid.width * grid.height) as usize];
    let mut queue = VecDeque::new();

    let seed = |x: i64, y: i64, outer: &mut Vec<bool>, queue: &mut VecDeque<(i64, i64)>| {
        let i = grid.index(x, y);
        if !grid.is_foreground(x, y) && !outer[i] {
            outer[i] = true;
            queue.push_back((x, y));
        }
    };

    for x in 0..grid.width {
        seed(x, 0, &mut outer, &mut queue);
        seed(x, grid.height - 1, &mut outer, &mut queue);
    }
    for y in 0..grid.height {
        seed(0, y, &mut outer, &mut queue);
        seed(grid.width - 1, y, &mut outer, &mut queue);
    }

    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 || nx >= grid.width || ny >= grid.height {
                continue;
            }
            seed(nx, ny, &mut outer, &mut queue);
        }
    }

    outer
}

/// Flood-fill the 8-connected component at `(x, y)` and return its bounds.
fn label_component(grid: &Grid<'_>, labelled: &mut [bool], x: i64, y: i64) -> Region {
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);
    let mut stack = vec![(x, y)];
    labelled[grid.index(x, y)] = true;

    while let Some((cx, cy)) = stack.pop() {
        min_x = min_x.min(cx);
        max_x = max_x.max(cx);
        min_y = min_y.min(cy);
        max_y = max_y.max(cy);
        for (dx, dy) in DIRECTIONS {
            let (nx, ny) = (cx + dx, cy + dy);
            if grid.is_foreground(nx, ny) && !labelled[grid.index(nx, ny)] {
                labelled[grid.index(nx, ny)] = true;
                stack.push((nx, ny));
            }
        }
    }

    Region {
        x: min_x as u32,
        y: min_y as u32,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
    }
}

fn direction_between(from: (i64, i64), to: (i64, i64)) -> usize {
    let delta = (to.0 - from.0, to.1 - from.1);
    DIRECTIONS
        .iter()
        .position(|&d| d == delta)
        .unwrap_or(WEST)
}

/// Trace the outer border starting at a top-left pixel whose west neighbour
/// is background.
fn trace_outer_border(grid: &Grid<'_>, x: i64, y: i64) -> Vec<(u32, u32)> {
    let start = (x, y);
    let step = |p: (i64, i64), d: usize| (p.0 + DIRECTIONS[d].0, p.1 + DIRECTIONS[d].1);

    // Clockwise scan from the west neighbour for the first foreground pixel.
    let first = (0..8)
        .map(|k| (WEST + 8 - k) % 8)
        .map(|d| step(start, d))
        .find(|&(nx, ny)| grid.is_foreground(nx, ny));

    let Some(first) = first else {
        return vec![(x as u32, y as u32)];
    };

    let mut points = Vec::new();
    let mut prev = first;
    let mut current = start;
    loop {
        points.push((current.0 as u32, current.1 as u32));

        // Counter-clockwise scan starting just after the previous pixel. The
        // previous pixel itself closes the scan, so a hit always exists.
        let back = direction_between(current, prev);
        let next = (1..=8)
            .map(|k| step(current, (back + k) % 8))
            .find(|&(nx, ny)| grid.is_foreground(nx, ny))
            .unwrap_or(prev);

        if next == start && current == first {
            break;
        }
        prev = current;
        current = next;
    }

    points
}
