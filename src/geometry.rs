use crate::layer::KeycapLayer;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in whatever space the caller works in: keycap
/// units for layout geometry, container-local pixels for drag selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a rect from two arbitrary corner points, ordering each axis.
    pub fn from_corners(ax: f32, ay: f32, bx: f32, by: f32) -> Self {
        Self {
            left: ax.min(bx),
            top: ay.min(by),
            right: ax.max(bx),
            bottom: ay.max(by),
        }
    }

    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Strict open-interval overlap: any shared area counts, a shared edge
    /// does not.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// A degenerate rect (no area on either axis) is a click, not a drag.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Render hint for keys whose physical silhouette is not their bounding
/// rectangle. The core only stores the bounding rect; drawing the actual
/// path is the renderer's problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyShape {
    #[default]
    Rect,
    IsoEnter,
}

impl KeyShape {
    pub fn is_rect(&self) -> bool {
        matches!(self, KeyShape::Rect)
    }
}

/// One physical key: position and size in keycap units, base colors, and
/// the ordered legend layer stack (later layers paint on top).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeycapConfig {
    pub id: String,
    pub row: u32,
    pub col: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "KeyShape::is_rect")]
    pub shape: KeyShape,
    pub color: String,
    pub text_color: String,
    pub layers: Vec<KeycapLayer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl KeycapConfig {
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.x, self.y, self.width, self.height)
    }

    pub fn layer(&self, layer_id: &str) -> Option<&KeycapLayer> {
        self.layers.iter().find(|l| l.id == layer_id)
    }
}

/// A complete named arrangement of keycaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardLayout {
    pub id: String,
    pub name: String,
    pub keys: Vec<KeycapConfig>,
    pub total_keys: usize,
    pub width: f32,
    pub height: f32,
}

impl KeyboardLayout {
    pub fn key(&self, key_id: &str) -> Option<&KeycapConfig> {
        self.keys.iter().find(|k| k.id == key_id)
    }

    /// True bounding box of every key rectangle. Layout dimensions are
    /// derived from this, never hand-picked, so row math changes cannot
    /// clip the render surface.
    pub fn bounding_box(keys: &[KeycapConfig]) -> (f32, f32) {
        let width = keys
            .iter()
            .map(|k| k.x + k.width)
            .fold(0.0f32, |a, b| a.max(b));
        let height = keys
            .iter()
            .map(|k| k.y + k.height)
            .fold(0.0f32, |a, b| a.max(b));
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_orders_axes() {
        let r = Rect::from_corners(10.0, 20.0, 4.0, 2.0);
        assert_eq!(r.left, 4.0);
        assert_eq!(r.top, 2.0);
        assert_eq!(r.right, 10.0);
        assert_eq!(r.bottom, 20.0);
    }

    #[test]
    fn test_edge_touch_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(!a.overlaps(&b), "Shared edge must not count as overlap");
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_partial_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.5, 9.5, 20.0, 20.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }
}
