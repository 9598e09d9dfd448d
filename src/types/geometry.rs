use serde::{Deserialize, Serialize};

/// Pixel measurements of a rendered block.
///
/// Recomputed by the rendering layer whenever layout changes; the engine
/// only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementGeometry {
    /// Left edge relative to the document (`offset().left`)
    pub offset_left: f64,
    /// Left edge relative to the offset parent (`position().left`)
    pub position_left: f64,
    /// Width including padding and border (`outerWidth()`)
    pub outer_width: f64,
}

impl ElementGeometry {
    pub fn new(offset_left: f64, position_left: f64, outer_width: f64) -> Self {
        Self {
            offset_left,
            position_left,
            outer_width,
        }
    }

    /// Right edge relative to the document.
    pub fn offset_right(&self) -> f64 {
        self.offset_left + self.outer_width
    }
}
