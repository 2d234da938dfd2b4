use crate::geometry::{KeyboardLayout, Rect};
use std::collections::HashMap;

/// Capability supplying the current on-screen rectangle of a key, in the
/// same container-local space as the drag points. The renderer owns the
/// real measurements; tests hand in plain maps.
pub trait KeyRectSource {
    fn key_rect(&self, key_id: &str) -> Option<Rect>;
}

impl KeyRectSource for HashMap<String, Rect> {
    fn key_rect(&self, key_id: &str) -> Option<Rect> {
        self.get(key_id).copied()
    }
}

/// Keys whose rendered rectangle overlaps the drag rectangle, in layout
/// order. The test is strict: any shared area selects, a touched edge does
/// not. Keys the source cannot measure (not currently rendered) are
/// skipped.
pub fn intersecting_keys(
    drag: &Rect,
    layout: &KeyboardLayout,
    source: &dyn KeyRectSource,
) -> Vec<String> {
    layout
        .keys
        .iter()
        .filter(|key| {
            source
                .key_rect(&key.id)
                .is_some_and(|rect| rect.overlaps(drag))
        })
        .map(|key| key.id.clone())
        .collect()
}

/// Outcome of releasing (or leaving) a drag session.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// A real drag: the committed selection is the last computed preview.
    Select(Vec<String>),
    /// No motion worth of area; the caller falls back to the click rules.
    Click,
}

/// One pointer-driven rubber-band selection, from pointer-down to
/// pointer-up. The caller is responsible for not starting a session when
/// the pointer went down on an interactive control.
#[derive(Debug, Clone)]
pub struct DragSelect {
    start: (f32, f32),
    current: (f32, f32),
    preview: Vec<String>,
}

impl DragSelect {
    pub fn begin(x: f32, y: f32) -> Self {
        Self {
            start: (x, y),
            current: (x, y),
            preview: Vec::new(),
        }
    }

    /// Normalized drag rectangle for the current pointer position.
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.start.0, self.start.1, self.current.0, self.current.1)
    }

    /// Recomputes the live preview for a new pointer position. Only the
    /// most recent position matters; superseded previews are discarded.
    pub fn update(
        &mut self,
        x: f32,
        y: f32,
        layout: &KeyboardLayout,
        source: &dyn KeyRectSource,
    ) -> &[String] {
        self.current = (x, y);
        self.preview = intersecting_keys(&self.rect(), layout, source);
        &self.preview
    }

    pub fn preview(&self) -> &[String] {
        &self.preview
    }

    /// Ends the session. Pointer-leave is handled identically: the last
    /// computed preview is committed rather than dropped. A degenerate
    /// (zero-area) rectangle never selects; it degrades to a click.
    pub fn finish(self) -> DragOutcome {
        if self.rect().is_degenerate() {
            DragOutcome::Click
        } else {
            DragOutcome::Select(self.preview)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::{generate_layout, LayoutType};

    fn unit_rects(layout: &KeyboardLayout, px_per_unit: f32) -> HashMap<String, Rect> {
        layout
            .keys
            .iter()
            .map(|k| {
                (
                    k.id.clone(),
                    Rect::from_origin_size(
                        k.x * px_per_unit,
                        k.y * px_per_unit,
                        k.width * px_per_unit,
                        k.height * px_per_unit,
                    ),
                )
            })
            .collect()
    }

    #[test]
    fn test_preview_follows_latest_position() {
        let layout = generate_layout(LayoutType::Sixty);
        let rects = unit_rects(&layout, 48.0);

        let mut drag = DragSelect::begin(0.0, 0.0);
        drag.update(2000.0, 2000.0, &layout, &rects);
        let all = drag.preview().len();
        assert_eq!(all, layout.total_keys, "Full-surface drag selects all keys");

        drag.update(20.0, 20.0, &layout, &rects);
        assert_eq!(
            drag.preview().len(),
            1,
            "Shrinking the drag must shrink the preview to the overlapped key"
        );
    }

    #[test]
    fn test_zero_area_drag_degrades_to_click() {
        let layout = generate_layout(LayoutType::Sixty);
        let rects = unit_rects(&layout, 48.0);

        let mut drag = DragSelect::begin(25.0, 25.0);
        drag.update(25.0, 25.0, &layout, &rects);
        assert_eq!(drag.finish(), DragOutcome::Click);
    }
}
