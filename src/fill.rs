use crate::surface::{PixelSurface, Rgba};
use std::fmt;

/// Fraction of the canvas a single fill may repaint before it is cut off.
/// A safety valve against runaway fills, not a behavioral guarantee; the
/// settings file can override it.
pub const DEFAULT_CAP_FRACTION: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillReport {
    pub pixels_filled: usize,
    pub saturated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillError {
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

impl fmt::Display for FillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "fill seed ({x}, {y}) outside surface bounds {width}x{height}"
            ),
        }
    }
}

impl std::error::Error for FillError {}

/// Two colors belong to the same fill region when their rgb channels agree,
/// except that full transparency is its own color: a transparent pixel only
/// ever matches another transparent pixel. This keeps a fill from leaking
/// across a transparent/opaque boundary while ignoring partial-alpha
/// differences among painted pixels.
pub fn colors_match(c1: Rgba, c2: Rgba) -> bool {
    if c1.a == 0 || c2.a == 0 {
        return c1.a == c2.a;
    }
    c1.r == c2.r && c1.g == c2.g && c1.b == c2.b
}

/// Repaint the 4-connected region of seed-colored pixels reachable from the
/// seed, capped at [`DEFAULT_CAP_FRACTION`] of the canvas.
pub fn fill(
    surface: &mut PixelSurface,
    seed_x: u32,
    seed_y: u32,
    fill_color: Rgba,
) -> Result<FillReport, FillError> {
    fill_with_cap(surface, seed_x, seed_y, fill_color, DEFAULT_CAP_FRACTION)
}

pub fn fill_with_cap(
    surface: &mut PixelSurface,
    seed_x: u32,
    seed_y: u32,
    fill_color: Rgba,
    cap_fraction: f32,
) -> Result<FillReport, FillError> {
    if seed_x >= surface.width() || seed_y >= surface.height() {
        return Err(FillError::OutOfBounds {
            x: seed_x,
            y: seed_y,
            width: surface.width(),
            height: surface.height(),
        });
    }

    let target = surface.pixel(seed_x, seed_y);
    // Filling a region with its own color is a no-op, not an error.
    if colors_match(target, fill_color) {
        return Ok(FillReport::default());
    }

    let width = surface.width() as i32;
    let height = surface.height() as i32;
    let cap = pixel_cap(surface.pixel_count(), cap_fraction);

    // Visited is tracked separately from pixel content so the traversal
    // stays correct even when the fill color matches neighbouring pixels.
    let mut visited = vec![false; surface.pixel_count()];
    let mut stack: Vec<(i32, i32)> = vec![(seed_x as i32, seed_y as i32)];
    let mut pixels_filled = 0usize;

    // The cap is part of the loop condition: once it trips, whatever is
    // still enqueued is abandoned.
    while pixels_filled < cap {
        let Some((x, y)) = stack.pop() else {
            break;
        };
        if x < 0 || x >= width || y < 0 || y >= height {
            continue;
        }
        let idx = y as usize * width as usize + x as usize;
        if visited[idx] {
            continue;
        }
        if !colors_match(surface.pixel(x as u32, y as u32), target) {
            continue;
        }

        visited[idx] = true;
        surface.set_pixel(
            x as u32,
            y as u32,
            Rgba::opaque(fill_color.r, fill_color.g, fill_color.b),
        );
        pixels_filled += 1;

        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }

    let saturated = pixels_filled >= cap;
    if saturated {
        tracing::warn!(pixels_filled, cap, "flood fill hit the safety cap");
    }

    Ok(FillReport {
        pixels_filled,
        saturated,
    })
}

fn pixel_cap(pixel_count: usize, cap_fraction: f32) -> usize {
    (pixel_count as f32 * cap_fraction) as usize
}
