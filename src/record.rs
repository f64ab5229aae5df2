//! Detection record served to the tracker.

/// A single detection: a corner-form bounding box with a confidence score.
///
/// Coordinates are absolute pixel positions of the top-left corner
/// `(x1, y1)` and the bottom-right corner `(x2, y2)`. The score is carried
/// through exactly as the source file supplied it; no range is enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub score: f32,
}

impl Detection {
    /// Create a detection from corner coordinates.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, score: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            score,
        }
    }

    /// Create a detection from the MOT file form: top-left corner plus
    /// width and height.
    ///
    /// The second corner is `(x + w, y + h)`. Arguments are `f64` because
    /// detection files are parsed at double precision; each field is
    /// narrowed to `f32` exactly once, after the corner sums.
    pub fn from_tlwh(x: f64, y: f64, w: f64, h: f64, score: f64) -> Self {
        Self {
            x1: x as f32,
            y1: y as f32,
            x2: (x + w) as f32,
            y2: (y + h) as f32,
            score: score as f32,
        }
    }

    /// Box width (`x2 - x1`). Negative if the source row had a negative width.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Box height (`y2 - y1`).
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// The record as one array row: `[x1, y1, x2, y2, score]`.
    pub fn to_row(&self) -> [f32; 5] {
        [self.x1, self.y1, self.x2, self.y2, self.score]
    }
}
