use crate::config::EditorConfig;
use crate::geometry::KeycapConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerKind {
    Text,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// Kind-specific payload of a layer. Text styling lives only on the text
/// variant, so style flags on an image layer are inexpressible rather than
/// silently ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayerContent {
    #[serde(rename_all = "camelCase")]
    Text {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_size: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(default, skip_serializing_if = "is_false")]
        bold: bool,
        #[serde(default, skip_serializing_if = "is_false")]
        italic: bool,
        #[serde(default, skip_serializing_if = "is_false")]
        underline: bool,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        /// Opaque reference produced by the host (e.g. a data URL).
        /// Empty or whitespace means "no image yet".
        content: String,
    },
}

/// One visual element stacked on a keycap. Order within the key's layer
/// list is the paint order; later entries draw on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeycapLayer {
    pub id: String,
    #[serde(flatten)]
    pub content: LayerContent,
    #[serde(default)]
    pub offset_x: f32,
    #[serde(default)]
    pub offset_y: f32,
    #[serde(default)]
    pub alignment: HorizontalAlign,
    #[serde(default)]
    pub vertical_alignment: VerticalAlign,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub mirror_x: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub mirror_y: bool,
}

/// Unique id for a runtime-created layer. Generated keys use predictable
/// "layer-<key>-0" seeds instead; this is only for user-added layers.
pub fn generate_layer_id() -> String {
    format!("layer-{:016x}", fastrand::u64(..))
}

impl KeycapLayer {
    /// A plain text layer with default geometry, as synthesized by the
    /// layout generators.
    pub fn text(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: LayerContent::Text {
                content: content.into(),
                font: None,
                font_size: None,
                color: None,
                bold: false,
                italic: false,
                underline: false,
            },
            offset_x: 0.0,
            offset_y: 0.0,
            alignment: HorizontalAlign::Center,
            vertical_alignment: VerticalAlign::Center,
            rotation: 0.0,
            mirror_x: false,
            mirror_y: false,
        }
    }

    /// A freshly added layer: placeholder content for text, empty source
    /// for image, font size pinned to the configured default.
    pub fn fresh(kind: LayerKind, cfg: &EditorConfig) -> Self {
        let content = match kind {
            LayerKind::Text => LayerContent::Text {
                content: cfg.text_placeholder.clone(),
                font: None,
                font_size: Some(cfg.default_font_size),
                color: None,
                bold: false,
                italic: false,
                underline: false,
            },
            LayerKind::Image => LayerContent::Image {
                content: String::new(),
            },
        };
        Self {
            id: generate_layer_id(),
            content,
            offset_x: 0.0,
            offset_y: 0.0,
            alignment: HorizontalAlign::Center,
            vertical_alignment: VerticalAlign::Center,
            rotation: 0.0,
            mirror_x: false,
            mirror_y: false,
        }
    }

    pub fn kind(&self) -> LayerKind {
        match self.content {
            LayerContent::Text { .. } => LayerKind::Text,
            LayerContent::Image { .. } => LayerKind::Image,
        }
    }

    /// The literal content string: legend text or image reference.
    pub fn content_str(&self) -> &str {
        match &self.content {
            LayerContent::Text { content, .. } => content,
            LayerContent::Image { content } => content,
        }
    }

    /// Whether an image layer actually references an image.
    pub fn has_image(&self) -> bool {
        matches!(&self.content, LayerContent::Image { content } if !content.trim().is_empty())
    }

    pub fn effective_color<'a>(&'a self, key: &'a KeycapConfig) -> &'a str {
        match &self.content {
            LayerContent::Text {
                color: Some(c), ..
            } => c,
            _ => &key.text_color,
        }
    }

    pub fn effective_font<'a>(&'a self, cfg: &'a EditorConfig) -> &'a str {
        match &self.content {
            LayerContent::Text { font: Some(f), .. } => f,
            _ => &cfg.default_font,
        }
    }

    pub fn effective_font_size(&self, cfg: &EditorConfig) -> f32 {
        match &self.content {
            LayerContent::Text {
                font_size: Some(s), ..
            } => *s,
            _ => cfg.default_font_size,
        }
    }

    /// Current value of a toggleable flag. Text-only flags read as unset on
    /// image layers.
    pub fn toggle_state(&self, toggle: StyleToggle) -> bool {
        match toggle {
            StyleToggle::MirrorX => self.mirror_x,
            StyleToggle::MirrorY => self.mirror_y,
            StyleToggle::Bold | StyleToggle::Italic | StyleToggle::Underline => {
                match &self.content {
                    LayerContent::Text {
                        bold,
                        italic,
                        underline,
                        ..
                    } => match toggle {
                        StyleToggle::Bold => *bold,
                        StyleToggle::Italic => *italic,
                        _ => *underline,
                    },
                    LayerContent::Image { .. } => false,
                }
            }
        }
    }

    /// Writes an explicit flag value. Text-only flags are inert on image
    /// layers; mirrors apply to both kinds.
    pub fn with_toggle(&self, toggle: StyleToggle, value: bool) -> Self {
        let mut layer = self.clone();
        match toggle {
            StyleToggle::MirrorX => layer.mirror_x = value,
            StyleToggle::MirrorY => layer.mirror_y = value,
            StyleToggle::Bold | StyleToggle::Italic | StyleToggle::Underline => {
                if let LayerContent::Text {
                    bold,
                    italic,
                    underline,
                    ..
                } = &mut layer.content
                {
                    match toggle {
                        StyleToggle::Bold => *bold = value,
                        StyleToggle::Italic => *italic = value,
                        _ => *underline = value,
                    }
                }
            }
        }
        layer
    }

    /// Shallow merge: fields present in the patch replace the layer's,
    /// everything else is untouched. A `kind` switch re-wraps the content
    /// string (patched content wins, otherwise the current string carries
    /// over); attributes of the abandoned kind do not survive the switch.
    pub fn merged(&self, patch: &LayerPatch) -> Self {
        let mut layer = self.clone();

        let target_kind = patch.kind.unwrap_or_else(|| self.kind());
        if target_kind != self.kind() {
            let carried = patch
                .content
                .clone()
                .unwrap_or_else(|| self.content_str().to_string());
            layer.content = match target_kind {
                LayerKind::Text => LayerContent::Text {
                    content: carried,
                    font: patch.font.clone(),
                    font_size: patch.font_size,
                    color: patch.color.clone(),
                    bold: patch.bold.unwrap_or(false),
                    italic: patch.italic.unwrap_or(false),
                    underline: patch.underline.unwrap_or(false),
                },
                LayerKind::Image => LayerContent::Image { content: carried },
            };
        } else {
            match &mut layer.content {
                LayerContent::Text {
                    content,
                    font,
                    font_size,
                    color,
                    bold,
                    italic,
                    underline,
                } => {
                    if let Some(c) = &patch.content {
                        *content = c.clone();
                    }
                    if let Some(f) = &patch.font {
                        *font = Some(f.clone());
                    }
                    if let Some(s) = patch.font_size {
                        *font_size = Some(s);
                    }
                    if let Some(c) = &patch.color {
                        *color = Some(c.clone());
                    }
                    if let Some(b) = patch.bold {
                        *bold = b;
                    }
                    if let Some(i) = patch.italic {
                        *italic = i;
                    }
                    if let Some(u) = patch.underline {
                        *underline = u;
                    }
                }
                LayerContent::Image { content } => {
                    if let Some(c) = &patch.content {
                        *content = c.clone();
                    }
                }
            }
        }

        if let Some(v) = patch.offset_x {
            layer.offset_x = v;
        }
        if let Some(v) = patch.offset_y {
            layer.offset_y = v;
        }
        if let Some(v) = patch.alignment {
            layer.alignment = v;
        }
        if let Some(v) = patch.vertical_alignment {
            layer.vertical_alignment = v;
        }
        if let Some(v) = patch.rotation {
            layer.rotation = v;
        }
        if let Some(v) = patch.mirror_x {
            layer.mirror_x = v;
        }
        if let Some(v) = patch.mirror_y {
            layer.mirror_y = v;
        }

        layer
    }
}

/// Flags whose "apply" semantics are read-negate-broadcast rather than
/// set-to-value (see the apply policy in the store).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleToggle {
    Bold,
    Italic,
    Underline,
    MirrorX,
    MirrorY,
}

/// Partial layer update as emitted by toolbar controls. `None` means
/// "leave the field alone".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerPatch {
    pub kind: Option<LayerKind>,
    pub content: Option<String>,
    pub font: Option<String>,
    pub font_size: Option<f32>,
    pub color: Option<String>,
    pub offset_x: Option<f32>,
    pub offset_y: Option<f32>,
    pub alignment: Option<HorizontalAlign>,
    pub vertical_alignment: Option<VerticalAlign>,
    pub rotation: Option<f32>,
    pub mirror_x: Option<bool>,
    pub mirror_y: Option<bool>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
}

impl LayerPatch {
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            ..Default::default()
        }
    }

    /// An image upload: switches the layer to the image kind and installs
    /// the reference in one update.
    pub fn image(reference: impl Into<String>) -> Self {
        Self {
            kind: Some(LayerKind::Image),
            content: Some(reference.into()),
            ..Default::default()
        }
    }
}
