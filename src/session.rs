use crate::fill::{self, FillError, FillReport};
use crate::history::SnapshotHistory;
use crate::model::{DrawObject, Geometry, StrokeStyle, Tool, Triangle};
use crate::raster;
use crate::surface::{PixelSurface, Rgba};
use crate::transform::{self, TransformError, TriangleTransform};
use std::fmt;

/// Pointer jitter below this squared distance is dropped from freehand
/// strokes.
const MIN_POINT_DIST_SQ: i64 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    NoTrackedTriangle,
    Transform(TransformError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoTrackedTriangle => {
                write!(f, "draw a triangle before applying a transform")
            }
            SessionError::Transform(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<TransformError> for SessionError {
    fn from(err: TransformError) -> Self {
        SessionError::Transform(err)
    }
}

/// Owns the canvas, the history and the in-flight drawing state, and decides
/// when a mutation becomes a history commit.
///
/// In-flight geometry never touches the committed surface; it is composed
/// over a copy for display and rasterized for real on pointer-up. Polygon
/// edges are the exception: they are painted incrementally as vertices are
/// clicked and only committed when the polygon closes.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    surface: PixelSurface,
    history: SnapshotHistory,
    tool: Tool,
    style: StrokeStyle,
    active_geometry: Option<Geometry>,
    polygon_points: Vec<(i32, i32)>,
    tracked_triangle: Option<Triangle>,
    cap_fraction: f32,
    revision: u64,
}

impl DrawingSession {
    pub fn new(width: u32, height: u32) -> Self {
        let surface = PixelSurface::blank(width, height);
        let history = SnapshotHistory::new(&surface);
        Self {
            surface,
            history,
            tool: Tool::Freehand,
            style: StrokeStyle::default(),
            active_geometry: None,
            polygon_points: Vec::new(),
            tracked_triangle: None,
            cap_fraction: fill::DEFAULT_CAP_FRACTION,
            revision: 0,
        }
    }

    pub fn with_cap_fraction(mut self, cap_fraction: f32) -> Self {
        self.cap_fraction = cap_fraction;
        self
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn tracked_triangle(&self) -> Option<Triangle> {
        self.tracked_triangle
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_cursor(&self) -> usize {
        self.history.cursor()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Bumped on every visible surface change; lets the UI know when to
    /// re-upload the canvas texture.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pending_polygon_len(&self) -> usize {
        self.polygon_points.len()
    }

    /// Switching tools abandons any in-flight geometry and pending polygon
    /// vertices.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.active_geometry = None;
        self.polygon_points.clear();
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.style.color = color;
    }

    pub fn set_stroke_width(&mut self, width: u32) {
        self.style.width = width.max(1);
    }

    pub fn pointer_down(&mut self, point: (i32, i32)) {
        if !self.tool.is_drag_tool() {
            return;
        }
        self.active_geometry = Some(match self.tool {
            Tool::Freehand => Geometry::Freehand {
                points: vec![point],
            },
            Tool::Line => Geometry::Line {
                start: point,
                end: point,
            },
            Tool::SnapLine => Geometry::SnapLine {
                start: point,
                end: point,
            },
            Tool::Circle => Geometry::Circle {
                center: point,
                edge: point,
            },
            Tool::Ellipse => Geometry::Ellipse {
                start: point,
                end: point,
            },
            Tool::Triangle => Geometry::Triangle {
                anchor: point,
                drag: point,
            },
            Tool::Square => Geometry::Square {
                anchor: point,
                drag: point,
            },
            Tool::Rect => Geometry::Rect {
                start: point,
                end: point,
            },
            Tool::Polygon | Tool::Fill => unreachable!(),
        });
    }

    pub fn pointer_move(&mut self, point: (i32, i32)) {
        match self.active_geometry.as_mut() {
            Some(Geometry::Freehand { points }) => {
                if should_append_point(points.last().copied(), point) {
                    points.push(point);
                }
            }
            Some(Geometry::Line { end, .. })
            | Some(Geometry::SnapLine { end, .. })
            | Some(Geometry::Ellipse { end, .. })
            | Some(Geometry::Rect { end, .. }) => *end = point,
            Some(Geometry::Circle { edge, .. }) => *edge = point,
            Some(Geometry::Triangle { drag, .. }) | Some(Geometry::Square { drag, .. }) => {
                *drag = point;
            }
            Some(Geometry::PolygonEdge { .. }) | None => {}
        }
    }

    /// Finish the in-flight shape: rasterize it onto the surface and commit.
    pub fn pointer_up(&mut self, point: (i32, i32)) {
        self.pointer_move(point);
        let Some(geometry) = self.active_geometry.take() else {
            return;
        };

        if let Geometry::Triangle { anchor, drag } = geometry {
            self.tracked_triangle = Some(Triangle::from_drag(anchor, drag));
        }

        raster::render_object(
            &mut self.surface,
            &DrawObject {
                style: self.style,
                geometry,
            },
        );
        self.commit();
        tracing::debug!(tool = ?self.tool, "committed shape");
    }

    /// Polygon tool click: record the vertex, paint the connecting edge and
    /// a vertex dot straight onto the surface. Nothing is committed until
    /// the polygon closes.
    pub fn add_polygon_vertex(&mut self, point: (i32, i32)) {
        if self.tool != Tool::Polygon {
            return;
        }
        if let Some(&previous) = self.polygon_points.last() {
            raster::draw_segment(&mut self.surface, previous, point, self.style);
        }
        raster::draw_vertex_dot(&mut self.surface, point, self.style.color);
        self.polygon_points.push(point);
        self.revision += 1;
    }

    /// Close the polygon (double-click). Needs at least three vertices;
    /// draws the closing edge and commits. Returns whether a commit happened.
    pub fn finish_polygon(&mut self) -> bool {
        if self.tool != Tool::Polygon || self.polygon_points.len() < 3 {
            return false;
        }
        let first = self.polygon_points[0];
        let last = self.polygon_points[self.polygon_points.len() - 1];
        raster::draw_segment(&mut self.surface, last, first, self.style);
        self.polygon_points.clear();
        self.commit();
        true
    }

    /// Flood-fill with the current color. Commits only when pixels actually
    /// changed; a self-color no-op leaves the history alone.
    pub fn fill(&mut self, x: u32, y: u32) -> Result<FillReport, FillError> {
        let report =
            fill::fill_with_cap(&mut self.surface, x, y, self.style.color, self.cap_fraction)?;
        if report.pixels_filled > 0 {
            self.commit();
        }
        Ok(report)
    }

    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        self.history.restore(&mut self.surface);
        self.revision += 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        self.history.restore(&mut self.surface);
        self.revision += 1;
        true
    }

    /// Blank the canvas, drop the tracked triangle and any pending polygon,
    /// and commit the blank state as an undoable step.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.tracked_triangle = None;
        self.polygon_points.clear();
        self.active_geometry = None;
        self.commit();
    }

    /// Apply a transform to the tracked triangle: the canvas is cleared and
    /// only the transformed triangle remains, as in the original tool.
    pub fn transform_triangle(
        &mut self,
        transform: TriangleTransform,
    ) -> Result<(), SessionError> {
        let triangle = self
            .tracked_triangle
            .ok_or(SessionError::NoTrackedTriangle)?;
        transform.validate()?;

        let transformed = transform::apply(&triangle, transform);
        self.surface.clear();
        raster::draw_triangle(&mut self.surface, &transformed, self.style);
        self.tracked_triangle = Some(transformed);
        self.commit();
        Ok(())
    }

    /// Committed surface with the in-flight shape drawn on top, for display.
    pub fn compose_preview(&self) -> PixelSurface {
        let mut composed = self.surface.clone();
        if let Some(geometry) = &self.active_geometry {
            raster::render_object(
                &mut composed,
                &DrawObject {
                    style: self.style,
                    geometry: geometry.clone(),
                },
            );
        }
        composed
    }

    pub fn has_active_geometry(&self) -> bool {
        self.active_geometry.is_some()
    }

    fn commit(&mut self) {
        self.history.commit(&self.surface);
        self.revision += 1;
    }
}

fn should_append_point(last: Option<(i32, i32)>, point: (i32, i32)) -> bool {
    let Some((last_x, last_y)) = last else {
        return true;
    };
    let dx = point.0 as i64 - last_x as i64;
    let dy = point.1 as i64 - last_y as i64;
    dx * dx + dy * dy >= MIN_POINT_DIST_SQ
}

#[cfg(test)]
mod tests {
    use super::{DrawingSession, SessionError};
    use crate::surface::Rgba;
    use crate::model::Tool;
    use crate::transform::{TransformError, TriangleTransform};

    const RED: Rgba = Rgba::opaque(255, 0, 0);

    fn session() -> DrawingSession {
        DrawingSession::new(32, 32)
    }

    #[test]
    fn finished_stroke_paints_and_commits_once() {
        let mut s = session();
        s.set_color(RED);
        s.pointer_down((2, 2));
        s.pointer_move((8, 2));
        s.pointer_up((14, 2));

        assert_eq!(s.history_len(), 2);
        assert_eq!(s.surface().pixel(8, 2), RED);
        assert!(s.can_undo());
        assert!(!s.can_redo());
    }

    #[test]
    fn preview_does_not_touch_committed_surface() {
        let mut s = session();
        s.set_color(RED);
        s.set_tool(Tool::Line);
        s.pointer_down((0, 0));
        s.pointer_move((10, 10));

        assert_eq!(s.history_len(), 1);
        assert_eq!(s.surface().pixel(5, 5), Rgba::TRANSPARENT);
        let preview = s.compose_preview();
        assert_eq!(preview.pixel(5, 5), RED);
    }

    #[test]
    fn switching_tools_abandons_polygon_and_active_geometry() {
        let mut s = session();
        s.set_tool(Tool::Polygon);
        s.add_polygon_vertex((5, 5));
        s.add_polygon_vertex((10, 5));
        assert_eq!(s.pending_polygon_len(), 2);

        s.set_tool(Tool::Line);
        assert_eq!(s.pending_polygon_len(), 0);
        assert!(!s.has_active_geometry());
    }

    #[test]
    fn polygon_needs_three_vertices_to_close() {
        let mut s = session();
        s.set_tool(Tool::Polygon);
        s.add_polygon_vertex((5, 5));
        s.add_polygon_vertex((15, 5));
        assert!(!s.finish_polygon());
        assert_eq!(s.history_len(), 1);

        s.add_polygon_vertex((10, 15));
        assert!(s.finish_polygon());
        assert_eq!(s.history_len(), 2);
        assert_eq!(s.pending_polygon_len(), 0);
    }

    #[test]
    fn fill_commits_only_when_pixels_changed() {
        let mut s = DrawingSession::new(8, 8).with_cap_fraction(1.0);
        s.set_color(RED);

        let report = s.fill(3, 3).unwrap();
        assert_eq!(report.pixels_filled, 64);
        assert_eq!(s.history_len(), 2);

        // Same color again: no-op, no commit.
        let report = s.fill(3, 3).unwrap();
        assert_eq!(report.pixels_filled, 0);
        assert_eq!(s.history_len(), 2);
    }

    #[test]
    fn undo_and_redo_restore_surface_bytes() {
        let mut s = session();
        s.set_color(RED);
        let blank = s.surface().as_bytes().to_vec();

        s.pointer_down((4, 4));
        s.pointer_up((12, 12));
        let drawn = s.surface().as_bytes().to_vec();

        assert!(s.undo());
        assert_eq!(s.surface().as_bytes(), blank.as_slice());
        assert!(s.redo());
        assert_eq!(s.surface().as_bytes(), drawn.as_slice());
        assert!(!s.redo());
    }

    #[test]
    fn triangle_tool_tracks_the_last_triangle() {
        let mut s = session();
        s.set_tool(Tool::Triangle);
        assert!(s.tracked_triangle().is_none());

        s.pointer_down((10, 10));
        s.pointer_up((14, 20));
        let tri = s.tracked_triangle().expect("tracked triangle");
        assert_eq!(tri.a, (10.0, 10.0));
        assert_eq!(tri.b, (14.0, 20.0));
        assert_eq!(tri.c, (6.0, 20.0));
    }

    #[test]
    fn transform_without_triangle_is_rejected() {
        let mut s = session();
        let err = s
            .transform_triangle(TriangleTransform::FlipHorizontal)
            .unwrap_err();
        assert_eq!(err, SessionError::NoTrackedTriangle);
        assert_eq!(s.history_len(), 1);
    }

    #[test]
    fn invalid_transform_leaves_canvas_and_history_alone() {
        let mut s = session();
        s.set_tool(Tool::Triangle);
        s.pointer_down((10, 10));
        s.pointer_up((20, 20));
        let before = s.surface().as_bytes().to_vec();
        let entries = s.history_len();

        let err = s
            .transform_triangle(TriangleTransform::Scale { sx: 0.0, sy: 1.0 })
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::Transform(TransformError::ZeroScaleFactor)
        );
        assert_eq!(s.surface().as_bytes(), before.as_slice());
        assert_eq!(s.history_len(), entries);
    }

    #[test]
    fn transform_replaces_canvas_with_transformed_triangle() {
        let mut s = session();
        s.set_color(RED);
        s.set_tool(Tool::Triangle);
        s.pointer_down((8, 8));
        s.pointer_up((16, 24));

        s.transform_triangle(TriangleTransform::Translate { dx: 2.0, dy: 0.0 })
            .unwrap();

        let tri = s.tracked_triangle().expect("tracked triangle");
        assert_eq!(tri.a, (10.0, 8.0));
        assert_eq!(s.history_len(), 3);
        // Old triangle anchor is gone; canvas only holds the new outline.
        assert_eq!(s.surface().pixel(8, 8), Rgba::TRANSPARENT);
        assert_eq!(s.surface().pixel(10, 8), RED);
    }

    #[test]
    fn clear_commits_blank_state_and_drops_tracking() {
        let mut s = session();
        s.set_tool(Tool::Triangle);
        s.pointer_down((5, 5));
        s.pointer_up((15, 15));
        assert!(s.tracked_triangle().is_some());

        s.clear();
        assert!(s.tracked_triangle().is_none());
        assert_eq!(s.history_len(), 3);
        assert!(s.surface().as_bytes().iter().all(|&b| b == 0));

        // Clear is undoable like any other committed mutation.
        assert!(s.undo());
        assert!(s.surface().as_bytes().iter().any(|&b| b != 0));
    }
}
