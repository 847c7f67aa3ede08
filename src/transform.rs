use crate::model::Triangle;
use std::fmt;

/// Shear inputs are percentages of the opposing coordinate.
const SHEAR_SCALE: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriangleTransform {
    Translate { dx: f32, dy: f32 },
    Scale { sx: f32, sy: f32 },
    Rotate { degrees: f32 },
    FlipHorizontal,
    FlipVertical,
    Shear { sx: f32, sy: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    ZeroScaleFactor,
    NoOpTranslation,
    NoOpRotation,
    NoOpShear,
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::ZeroScaleFactor => write!(f, "scale factors must be non-zero"),
            TransformError::NoOpTranslation => write!(f, "translation needs a non-zero x or y"),
            TransformError::NoOpRotation => write!(f, "rotation needs a non-zero angle"),
            TransformError::NoOpShear => write!(f, "shear needs a non-zero x or y factor"),
        }
    }
}

impl std::error::Error for TransformError {}

impl TriangleTransform {
    /// Reject inputs the tool treats as user mistakes rather than identity
    /// transforms: zero scale factors and all-zero parameter sets.
    pub fn validate(self) -> Result<(), TransformError> {
        match self {
            TriangleTransform::Translate { dx, dy } if dx == 0.0 && dy == 0.0 => {
                Err(TransformError::NoOpTranslation)
            }
            TriangleTransform::Scale { sx, sy } if sx == 0.0 || sy == 0.0 => {
                Err(TransformError::ZeroScaleFactor)
            }
            TriangleTransform::Rotate { degrees } if degrees == 0.0 => {
                Err(TransformError::NoOpRotation)
            }
            TriangleTransform::Shear { sx, sy } if sx == 0.0 && sy == 0.0 => {
                Err(TransformError::NoOpShear)
            }
            _ => Ok(()),
        }
    }
}

/// Apply a transform to the tracked triangle. Scale, rotate and the flips
/// pivot about the centroid so the shape stays put while changing.
pub fn apply(triangle: &Triangle, transform: TriangleTransform) -> Triangle {
    let mut out = *triangle;
    match transform {
        TriangleTransform::Translate { dx, dy } => {
            for p in [&mut out.a, &mut out.b, &mut out.c] {
                p.0 += dx;
                p.1 += dy;
            }
        }
        TriangleTransform::Scale { sx, sy } => {
            let (cx, cy) = triangle.centroid();
            for p in [&mut out.a, &mut out.b, &mut out.c] {
                p.0 = cx + (p.0 - cx) * sx;
                p.1 = cy + (p.1 - cy) * sy;
            }
        }
        TriangleTransform::Rotate { degrees } => {
            let angle = degrees.to_radians();
            let (sin, cos) = angle.sin_cos();
            let (cx, cy) = triangle.centroid();
            for p in [&mut out.a, &mut out.b, &mut out.c] {
                let dx = p.0 - cx;
                let dy = p.1 - cy;
                p.0 = cx + dx * cos - dy * sin;
                p.1 = cy + dx * sin + dy * cos;
            }
        }
        TriangleTransform::FlipHorizontal => {
            let (cx, _) = triangle.centroid();
            for p in [&mut out.a, &mut out.b, &mut out.c] {
                p.0 = 2.0 * cx - p.0;
            }
        }
        TriangleTransform::FlipVertical => {
            let (_, cy) = triangle.centroid();
            for p in [&mut out.a, &mut out.b, &mut out.c] {
                p.1 = 2.0 * cy - p.1;
            }
        }
        TriangleTransform::Shear { sx, sy } => {
            // The horizontal pass runs first, and the vertical pass reads the
            // already-sheared x, matching the original tool.
            for p in [&mut out.a, &mut out.b, &mut out.c] {
                if sx != 0.0 {
                    p.0 += p.1 * sx * SHEAR_SCALE;
                }
                if sy != 0.0 {
                    p.1 += p.0 * sy * SHEAR_SCALE;
                }
            }
        }
    }
    out
}
