use crate::model::{DrawObject, Geometry, StrokeStyle, Triangle};
use crate::surface::{PixelSurface, Rgba};

const VERTEX_DOT_RADIUS: i32 = 3;

/// Rasterize a committed or preview shape straight into the surface. Writes
/// are plain opaque overwrites of the stroke color, clipped at the bounds.
pub fn render_object(surface: &mut PixelSurface, object: &DrawObject) {
    let style = object.style;
    match &object.geometry {
        Geometry::Freehand { points } => draw_polyline(surface, points, style),
        Geometry::Line { start, end } => draw_segment(surface, *start, *end, style),
        Geometry::SnapLine { start, end } => {
            draw_segment(surface, *start, snap_end(*start, *end), style);
        }
        Geometry::Circle { center, edge } => draw_circle(surface, *center, *edge, style),
        Geometry::Ellipse { start, end } => draw_ellipse(surface, *start, *end, style),
        Geometry::Triangle { anchor, drag } => {
            draw_triangle(surface, &Triangle::from_drag(*anchor, *drag), style);
        }
        Geometry::Square { anchor, drag } => draw_square(surface, *anchor, *drag, style),
        Geometry::Rect { start, end } => draw_rect(surface, *start, *end, style),
        Geometry::PolygonEdge { from, to } => draw_segment(surface, *from, *to, style),
    }
}

/// Square brush stamp centered on the point, clipped at the surface bounds.
pub fn draw_brush(surface: &mut PixelSurface, point: (i32, i32), style: StrokeStyle) {
    let width = style.width.max(1) as i32;
    let lo = -(width - 1) / 2;
    let hi = width / 2;
    for dy in lo..=hi {
        for dx in lo..=hi {
            let x = point.0 + dx;
            let y = point.1 + dy;
            if surface.contains(x, y) {
                surface.set_pixel(x as u32, y as u32, style.color);
            }
        }
    }
}

/// Bresenham segment stamped with the stroke-width brush.
pub fn draw_segment(
    surface: &mut PixelSurface,
    start: (i32, i32),
    end: (i32, i32),
    style: StrokeStyle,
) {
    let (mut x0, mut y0) = start;
    let (x1, y1) = end;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        draw_brush(surface, (x0, y0), style);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

pub fn draw_polyline(surface: &mut PixelSurface, points: &[(i32, i32)], style: StrokeStyle) {
    match points {
        [] => {}
        [single] => draw_brush(surface, *single, style),
        _ => {
            for pair in points.windows(2) {
                draw_segment(surface, pair[0], pair[1], style);
            }
        }
    }
}

pub fn draw_rect(
    surface: &mut PixelSurface,
    start: (i32, i32),
    end: (i32, i32),
    style: StrokeStyle,
) {
    let (x0, x1) = (start.0.min(end.0), start.0.max(end.0));
    let (y0, y1) = (start.1.min(end.1), start.1.max(end.1));

    draw_segment(surface, (x0, y0), (x1, y0), style);
    draw_segment(surface, (x1, y0), (x1, y1), style);
    draw_segment(surface, (x1, y1), (x0, y1), style);
    draw_segment(surface, (x0, y1), (x0, y0), style);
}

/// Square outline anchored at the drag origin. The side is the larger drag
/// extent and follows the drag direction on both axes.
pub fn draw_square(
    surface: &mut PixelSurface,
    anchor: (i32, i32),
    drag: (i32, i32),
    style: StrokeStyle,
) {
    let dx = drag.0 - anchor.0;
    let dy = drag.1 - anchor.1;
    let side = dx.abs().max(dy.abs());
    let end = (
        anchor.0 + if dx >= 0 { side } else { -side },
        anchor.1 + if dy >= 0 { side } else { -side },
    );
    draw_rect(surface, anchor, end, style);
}

/// Circle of radius `|edge - center|` walked parametrically; the step count
/// scales with the circumference so the outline stays closed.
pub fn draw_circle(
    surface: &mut PixelSurface,
    center: (i32, i32),
    edge: (i32, i32),
    style: StrokeStyle,
) {
    let dx = (edge.0 - center.0) as f32;
    let dy = (edge.1 - center.1) as f32;
    let radius = (dx * dx + dy * dy).sqrt();
    draw_parametric_oval(
        surface,
        (center.0 as f32, center.1 as f32),
        radius,
        radius,
        style,
    );
}

/// Ellipse inscribed in the drag rectangle.
pub fn draw_ellipse(
    surface: &mut PixelSurface,
    start: (i32, i32),
    end: (i32, i32),
    style: StrokeStyle,
) {
    let min_x = start.0.min(end.0);
    let max_x = start.0.max(end.0);
    let min_y = start.1.min(end.1);
    let max_y = start.1.max(end.1);

    let rx = ((max_x - min_x).max(1) as f32) * 0.5;
    let ry = ((max_y - min_y).max(1) as f32) * 0.5;
    let cx = (min_x + max_x) as f32 * 0.5;
    let cy = (min_y + max_y) as f32 * 0.5;
    draw_parametric_oval(surface, (cx, cy), rx, ry, style);
}

fn draw_parametric_oval(
    surface: &mut PixelSurface,
    center: (f32, f32),
    rx: f32,
    ry: f32,
    style: StrokeStyle,
) {
    let circumference = std::f32::consts::TAU * rx.max(ry);
    let steps = circumference.max(12.0) as usize;

    for step in 0..=steps {
        let t = (step as f32 / steps as f32) * std::f32::consts::TAU;
        let x = (center.0 + rx * t.cos()).round() as i32;
        let y = (center.1 + ry * t.sin()).round() as i32;
        draw_brush(surface, (x, y), style);
    }
}

pub fn draw_triangle(surface: &mut PixelSurface, triangle: &Triangle, style: StrokeStyle) {
    let [a, b, c] = triangle.vertices().map(|(x, y)| (x.round() as i32, y.round() as i32));
    draw_segment(surface, a, b, style);
    draw_segment(surface, b, c, style);
    draw_segment(surface, c, a, style);
}

/// Small filled disc marking a clicked polygon vertex.
pub fn draw_vertex_dot(surface: &mut PixelSurface, point: (i32, i32), color: Rgba) {
    let r = VERTEX_DOT_RADIUS;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let x = point.0 + dx;
            let y = point.1 + dy;
            if surface.contains(x, y) {
                surface.set_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// 45-degree snapping for the snap-line tool: horizontal when the drag is
/// clearly wider than tall, vertical when clearly taller, exact diagonal
/// otherwise.
pub fn snap_end(start: (i32, i32), end: (i32, i32)) -> (i32, i32) {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let abs_dx = dx.abs();
    let abs_dy = dy.abs();

    if abs_dx > abs_dy * 2 {
        (end.0, start.1)
    } else if abs_dy > abs_dx * 2 {
        (start.0, end.1)
    } else {
        let diagonal = abs_dx.max(abs_dy);
        (
            start.0 + if dx >= 0 { diagonal } else { -diagonal },
            start.1 + if dy >= 0 { diagonal } else { -diagonal },
        )
    }
}
