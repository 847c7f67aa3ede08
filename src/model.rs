use crate::surface::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Freehand,
    Line,
    SnapLine,
    Circle,
    Ellipse,
    Triangle,
    Square,
    Rect,
    Polygon,
    Fill,
}

impl Tool {
    /// Drag-to-draw tools start geometry on pointer-down; polygon and fill
    /// are click-driven instead.
    pub fn is_drag_tool(self) -> bool {
        !matches!(self, Tool::Polygon | Tool::Fill)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeStyle {
    pub width: u32,
    pub color: Rgba,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 2,
            color: Rgba::BLACK,
        }
    }
}

/// Shape being drawn or already committed. Drag shapes keep their anchor and
/// the latest pointer position; derived vertices (square corners, the third
/// triangle vertex, snapped line ends) are computed at raster time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Geometry {
    Freehand { points: Vec<(i32, i32)> },
    Line { start: (i32, i32), end: (i32, i32) },
    SnapLine { start: (i32, i32), end: (i32, i32) },
    Circle { center: (i32, i32), edge: (i32, i32) },
    Ellipse { start: (i32, i32), end: (i32, i32) },
    Triangle { anchor: (i32, i32), drag: (i32, i32) },
    Square { anchor: (i32, i32), drag: (i32, i32) },
    Rect { start: (i32, i32), end: (i32, i32) },
    PolygonEdge { from: (i32, i32), to: (i32, i32) },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawObject {
    pub style: StrokeStyle,
    pub geometry: Geometry,
}

/// Triangle tracked for affine transforms, in float coordinates so repeated
/// scales and rotations do not accumulate rounding drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: (f32, f32),
    pub b: (f32, f32),
    pub c: (f32, f32),
}

impl Triangle {
    pub fn centroid(&self) -> (f32, f32) {
        (
            (self.a.0 + self.b.0 + self.c.0) / 3.0,
            (self.a.1 + self.b.1 + self.c.1) / 3.0,
        )
    }

    pub fn vertices(&self) -> [(f32, f32); 3] {
        [self.a, self.b, self.c]
    }

    /// The triangle the drag-tool produces: anchor, drag point, and the
    /// anchor's mirror across the drag point's column.
    pub fn from_drag(anchor: (i32, i32), drag: (i32, i32)) -> Self {
        let width = drag.0 - anchor.0;
        Self {
            a: (anchor.0 as f32, anchor.1 as f32),
            b: (drag.0 as f32, drag.1 as f32),
            c: ((anchor.0 - width) as f32, drag.1 as f32),
        }
    }
}
