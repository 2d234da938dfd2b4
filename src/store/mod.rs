//! The single source of truth for the editor: the active layout, per-key
//! layer stacks, selection, editing pointers and saved groups.
//!
//! Every mutation is a functional update: it consumes nothing and returns
//! a full replacement value. A reader therefore always observes either the
//! pre- or post-mutation state, never a partial write, and an undo stack
//! can later be layered on without touching the mutation paths.

mod apply;
mod layers;

pub use apply::{broadcast_targets, ApplyTarget};
pub use layers::ReorderDirection;

use crate::config::EditorConfig;
use crate::geometry::{KeyboardLayout, KeycapConfig};
use crate::layer::KeycapLayer;
use crate::layouts::{generate_all_layouts, generate_layout_with, LayoutType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    pub theme: String,
    pub font: String,
}

/// Whole-application editor state.
///
/// `layout` is the live working copy; `all_layouts[current_layout_type]`
/// is the per-layout-type cache that lets users switch layouts and back
/// without losing edits. Every mutation that touches keys must write both,
/// or the cache goes stale — `with_keys` is the single funnel for that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardConfig {
    pub layout: KeyboardLayout,
    pub global_settings: GlobalSettings,
    pub selected_keys: Vec<String>,
    pub groups: HashMap<String, Vec<String>>,
    pub all_layouts: HashMap<LayoutType, KeyboardLayout>,
    pub current_layout_type: LayoutType,
    pub editing_key_id: Option<String>,
    pub selected_layer_id: Option<String>,
}

impl KeyboardConfig {
    /// Session-start state: every catalog layout generated, 60% active.
    pub fn new(cfg: &EditorConfig) -> Self {
        let all_layouts = generate_all_layouts(cfg);
        let layout = all_layouts[&LayoutType::Sixty].clone();
        Self {
            layout,
            global_settings: GlobalSettings {
                theme: cfg.theme.clone(),
                font: cfg.default_font.clone(),
            },
            selected_keys: Vec::new(),
            groups: HashMap::new(),
            all_layouts,
            current_layout_type: LayoutType::Sixty,
            editing_key_id: None,
            selected_layer_id: None,
        }
    }

    /// Replaces the active layout's key set, writing through to both the
    /// live view and the per-type cache.
    pub(crate) fn with_keys(&self, keys: Vec<KeycapConfig>) -> Self {
        let layout = KeyboardLayout {
            keys,
            ..self.layout.clone()
        };
        let mut next = self.clone();
        next.all_layouts
            .insert(next.current_layout_type, layout.clone());
        next.layout = layout;
        next
    }

    /// Activates another layout type, restoring its last-edited state (or
    /// the canonical generated layout on first visit). Key identity does
    /// not carry across layout types, so selection and editing pointers
    /// are cleared.
    pub fn change_layout(&self, ty: LayoutType, cfg: &EditorConfig) -> Self {
        debug!(layout = %ty, "switching layout");
        let mut next = self.clone();
        let layout = next
            .all_layouts
            .entry(ty)
            .or_insert_with(|| generate_layout_with(ty, cfg))
            .clone();
        next.layout = layout;
        next.current_layout_type = ty;
        next.selected_keys.clear();
        next.editing_key_id = None;
        next.selected_layer_id = None;
        next
    }

    /// Single-select replaces the selection; multi-select toggles the
    /// key's membership without touching the rest.
    pub fn select_key(&self, key_id: &str, multi_select: bool) -> Self {
        let mut next = self.clone();
        if multi_select {
            if let Some(pos) = next.selected_keys.iter().position(|id| id == key_id) {
                next.selected_keys.remove(pos);
            } else {
                next.selected_keys.push(key_id.to_string());
            }
        } else {
            next.selected_keys = vec![key_id.to_string()];
        }
        next
    }

    /// Verbatim selection replacement (drag commit, group load).
    pub fn select_keys(&self, key_ids: Vec<String>) -> Self {
        let mut next = self.clone();
        next.selected_keys = key_ids;
        next
    }

    pub fn clear_selection(&self) -> Self {
        let mut next = self.clone();
        next.selected_keys.clear();
        next
    }

    /// Marks a key active for layer editing and re-resolves the active
    /// layer to the key's first one (none for a blank key). The active
    /// layer is always scoped to the editing key, so it must be recomputed
    /// whenever the editing key changes.
    pub fn start_editing(&self, key_id: &str) -> Self {
        let mut next = self.clone();
        next.editing_key_id = Some(key_id.to_string());
        next.selected_layer_id = self
            .layout
            .key(key_id)
            .and_then(|key| key.layers.first())
            .map(|layer| layer.id.clone());
        next
    }

    pub fn stop_editing(&self) -> Self {
        let mut next = self.clone();
        next.editing_key_id = None;
        next.selected_layer_id = None;
        next
    }

    /// Selects a layer of the editing key for property editing. Ids not
    /// found in the editing key's stack clear the pointer instead.
    pub fn select_layer(&self, layer_id: Option<&str>) -> Self {
        let mut next = self.clone();
        next.selected_layer_id = layer_id.and_then(|id| {
            self.editing_keycap()
                .and_then(|key| key.layer(id))
                .map(|layer| layer.id.clone())
        });
        next
    }

    /// Uniformly recolors every listed key. Unknown ids are inert.
    pub fn update_keycap_color(&self, key_ids: &[String], color: &str) -> Self {
        self.recolor(key_ids, |key| key.color = color.to_string())
    }

    pub fn update_keycap_text_color(&self, key_ids: &[String], color: &str) -> Self {
        self.recolor(key_ids, |key| key.text_color = color.to_string())
    }

    fn recolor(&self, key_ids: &[String], mut write: impl FnMut(&mut KeycapConfig)) -> Self {
        let keys = self
            .layout
            .keys
            .iter()
            .map(|key| {
                let mut key = key.clone();
                if key_ids.contains(&key.id) {
                    write(&mut key);
                }
                key
            })
            .collect();
        self.with_keys(keys)
    }

    /// Saves the id set under a name, overwriting any previous group.
    /// Blank names and empty sets are rejected upstream; the store treats
    /// them as no-ops rather than errors.
    pub fn save_group(&self, name: &str, key_ids: Vec<String>) -> Self {
        if name.trim().is_empty() || key_ids.is_empty() {
            return self.clone();
        }
        debug!(group = name, keys = key_ids.len(), "saving group");
        let mut next = self.clone();
        next.groups.insert(name.to_string(), key_ids);
        next
    }

    /// Restores a saved group as the selection, verbatim. Ids that no
    /// longer exist in the active layout stay in the selection but match
    /// nothing — stale membership is deliberately inert.
    pub fn load_group(&self, name: &str) -> Self {
        match self.groups.get(name) {
            Some(key_ids) => self.select_keys(key_ids.clone()),
            None => self.clone(),
        }
    }

    pub fn delete_group(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.groups.remove(name);
        next
    }

    // === Read-side accessors ===

    pub fn selected_keycaps(&self) -> Vec<&KeycapConfig> {
        self.layout
            .keys
            .iter()
            .filter(|key| self.selected_keys.contains(&key.id))
            .collect()
    }

    pub fn editing_keycap(&self) -> Option<&KeycapConfig> {
        self.editing_key_id
            .as_deref()
            .and_then(|id| self.layout.key(id))
    }

    /// The editing key's active layer, if both pointers resolve.
    pub fn active_layer(&self) -> Option<&KeycapLayer> {
        let key = self.editing_keycap()?;
        let layer_id = self.selected_layer_id.as_deref()?;
        key.layer(layer_id)
    }

    pub fn key_layers(&self, key_id: &str) -> &[KeycapLayer] {
        self.layout
            .key(key_id)
            .map(|key| key.layers.as_slice())
            .unwrap_or(&[])
    }

    /// The key selected on its own, if the selection is a singleton.
    pub fn single_selected(&self) -> Option<&KeycapConfig> {
        match self.selected_keys.as_slice() {
            [only] => self.layout.key(only),
            _ => None,
        }
    }
}
