//! `EditorSession` is the single owner of the mutable editor state. UI
//! collaborators hold read-only snapshots and call back into the session,
//! which performs each transition as one atomic replace of the store.

use crate::config::EditorConfig;
use crate::error::CfResult;
use crate::layer::{LayerKind, LayerPatch, StyleToggle};
use crate::layouts::LayoutType;
use crate::selection::{DragOutcome, DragSelect, KeyRectSource};
use crate::store::{KeyboardConfig, ReorderDirection};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Coalesces slider-driven layer updates. Sliders emit a value per pixel
/// of pointer travel; committing each one would flood the store, so the
/// window restarts on every submission and only the last value within it
/// is committed.
///
/// Timestamps are plain `Duration`s since an epoch the caller picks
/// (the session uses its start instant), which keeps the debouncer pure
/// and testable without sleeping.
#[derive(Debug, Clone)]
pub struct SliderDebouncer {
    window: Duration,
    pending: Option<LayerPatch>,
    deadline: Option<Duration>,
}

impl SliderDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            deadline: None,
        }
    }

    /// Replaces any pending patch and restarts the window.
    pub fn submit(&mut self, patch: LayerPatch, at: Duration) {
        self.pending = Some(patch);
        self.deadline = Some(at + self.window);
    }

    /// Yields the pending patch once the window has elapsed.
    pub fn poll(&mut self, at: Duration) -> Option<LayerPatch> {
        match self.deadline {
            Some(deadline) if at >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

pub struct EditorSession {
    config: KeyboardConfig,
    defaults: EditorConfig,
    debounce: SliderDebouncer,
    drag: Option<DragSelect>,
    started: Instant,
}

impl EditorSession {
    pub fn new(defaults: EditorConfig) -> Self {
        info!(
            debounce_ms = defaults.slider_debounce_ms,
            "starting editor session"
        );
        let debounce = SliderDebouncer::new(Duration::from_millis(defaults.slider_debounce_ms));
        Self {
            config: KeyboardConfig::new(&defaults),
            defaults,
            debounce,
            drag: None,
            started: Instant::now(),
        }
    }

    /// Read-only view of the full editor state; also the export snapshot.
    pub fn snapshot(&self) -> &KeyboardConfig {
        &self.config
    }

    pub fn defaults(&self) -> &EditorConfig {
        &self.defaults
    }

    /// Serializes the full configuration for the external export
    /// collaborator. The wire shape mirrors the editor's own state.
    pub fn export_json(&self, pretty: bool) -> CfResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(&self.config)?
        } else {
            serde_json::to_string(&self.config)?
        };
        Ok(json)
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    // === Layout & selection ===

    pub fn change_layout(&mut self, ty: LayoutType) {
        self.config = self.config.change_layout(ty, &self.defaults);
    }

    /// Pointer click on a key. A plain click selects exactly that key and
    /// enters edit mode on it, with its first layer active; a
    /// modifier-click (ctrl/cmd) only toggles membership in the existing
    /// selection.
    pub fn click_key(&mut self, key_id: &str, modifier: bool) {
        if modifier {
            self.config = self.config.select_key(key_id, true);
        } else {
            self.config = self.config.select_key(key_id, false).start_editing(key_id);
        }
    }

    /// Plain click on empty background: the selection empties, edit mode
    /// is left as-is.
    pub fn click_background(&mut self) {
        self.config = self.config.clear_selection();
    }

    pub fn double_click_key(&mut self, key_id: &str) {
        self.config = self.config.start_editing(key_id);
    }

    pub fn stop_editing(&mut self) {
        self.config = self.config.stop_editing();
    }

    pub fn select_layer(&mut self, layer_id: Option<&str>) {
        self.config = self.config.select_layer(layer_id);
    }

    // === Drag selection ===

    /// Starts a rubber-band selection. The input layer must not call this
    /// for pointer-downs on interactive controls; that suppression is part
    /// of this API's contract.
    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.drag = Some(DragSelect::begin(x, y));
    }

    /// Advances the live preview to the latest pointer position.
    pub fn update_drag(&mut self, x: f32, y: f32, source: &dyn KeyRectSource) -> Vec<String> {
        match self.drag.as_mut() {
            Some(drag) => drag.update(x, y, &self.config.layout, source).to_vec(),
            None => Vec::new(),
        }
    }

    pub fn drag_preview(&self) -> &[String] {
        self.drag.as_ref().map(DragSelect::preview).unwrap_or(&[])
    }

    /// Pointer release — and equally pointer leave — commits the last
    /// computed preview. A drag that never grew an area degrades to the
    /// plain-click rule and clears the selection.
    pub fn end_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        match drag.finish() {
            DragOutcome::Select(keys) => {
                debug!(keys = keys.len(), "drag selection committed");
                self.config = self.config.select_keys(keys);
            }
            DragOutcome::Click => self.config = self.config.clear_selection(),
        }
    }

    // === Colors ===

    /// Base color for every key in the selection; no selection, no-op.
    pub fn set_keycap_color(&mut self, color: &str) {
        if !self.config.selected_keys.is_empty() {
            let ids = self.config.selected_keys.clone();
            self.config = self.config.update_keycap_color(&ids, color);
        }
    }

    pub fn set_keycap_text_color(&mut self, color: &str) {
        if !self.config.selected_keys.is_empty() {
            let ids = self.config.selected_keys.clone();
            self.config = self.config.update_keycap_text_color(&ids, color);
        }
    }

    /// Color shown in the picker: the single selected key's, otherwise the
    /// configured default.
    pub fn current_color(&self) -> &str {
        self.config
            .single_selected()
            .map(|key| key.color.as_str())
            .unwrap_or(&self.defaults.default_keycap_color)
    }

    pub fn current_text_color(&self) -> &str {
        self.config
            .single_selected()
            .map(|key| key.text_color.as_str())
            .unwrap_or(&self.defaults.default_legend_color)
    }

    // === Layer management (scoped to the editing key) ===

    /// Adds a layer to the editing key and makes it the active layer.
    pub fn add_layer(&mut self, kind: LayerKind) -> Option<String> {
        let key_id = self.config.editing_key_id.clone()?;
        let (next, layer_id) = self.config.add_layer(&self.defaults, &key_id, kind);
        self.config = next;
        if let Some(id) = &layer_id {
            self.config = self.config.select_layer(Some(id));
        }
        layer_id
    }

    pub fn delete_layer(&mut self, layer_id: &str) {
        if let Some(key_id) = self.config.editing_key_id.clone() {
            self.config = self.config.delete_layer(&key_id, layer_id);
        }
    }

    pub fn reorder_layer(&mut self, layer_id: &str, direction: ReorderDirection) {
        if let Some(key_id) = self.config.editing_key_id.clone() {
            self.config = self.config.reorder_layer(&key_id, layer_id, direction);
        }
    }

    // === Property application ===

    pub fn apply_patch(&mut self, patch: &LayerPatch) {
        self.config = self.config.apply_patch(patch);
    }

    /// Writes the same literal text to every targeted first layer.
    pub fn apply_text(&mut self, text: &str) {
        self.apply_patch(&LayerPatch::content(text));
    }

    /// Installs the same image reference (switching targets to the image
    /// kind) on every targeted first layer.
    pub fn apply_image(&mut self, reference: &str) {
        self.apply_patch(&LayerPatch::image(reference));
    }

    pub fn apply_toggle(&mut self, toggle: StyleToggle) {
        self.config = self.config.apply_toggle(toggle);
    }

    // === Debounced slider commits ===

    /// Queues a slider-driven patch; the commit happens on a later `pump`
    /// once the debounce window has elapsed without newer values.
    pub fn queue_slider_patch(&mut self, patch: LayerPatch) {
        let at = self.elapsed();
        self.queue_slider_patch_at(patch, at);
    }

    pub fn queue_slider_patch_at(&mut self, patch: LayerPatch, at: Duration) {
        self.debounce.submit(patch, at);
    }

    /// Commits the pending slider patch if its window has elapsed.
    pub fn pump(&mut self) {
        let at = self.elapsed();
        self.pump_at(at);
    }

    pub fn pump_at(&mut self, at: Duration) {
        if let Some(patch) = self.debounce.poll(at) {
            self.apply_patch(&patch);
        }
    }

    // === Groups ===

    pub fn save_group(&mut self, name: &str) {
        let ids = self.config.selected_keys.clone();
        self.config = self.config.save_group(name, ids);
    }

    pub fn load_group(&mut self, name: &str) {
        self.config = self.config.load_group(name);
    }

    pub fn delete_group(&mut self, name: &str) {
        self.config = self.config.delete_group(name);
    }
}
