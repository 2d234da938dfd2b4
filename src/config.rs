use clap::Args;
use serde::{Deserialize, Serialize};

/// Editor-wide defaults applied wherever a key or layer does not carry its
/// own value. Every field is overridable from the CLI and from a serialized
/// config blob.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Base color painted on freshly generated keycaps.
    #[arg(long, default_value = "#2D3748")]
    pub default_keycap_color: String,

    /// Legend color used when a text layer does not set its own.
    #[arg(long, default_value = "#FFFFFF")]
    pub default_legend_color: String,

    /// Font used when a text layer does not set its own.
    #[arg(long, default_value = "Arial")]
    pub default_font: String,

    #[arg(long, default_value_t = 14.0)]
    pub default_font_size: f32,

    /// Seed content for newly added text layers.
    #[arg(long, default_value = "New Text")]
    pub text_placeholder: String,

    // Generated legends sit slightly above the geometric center; keycap
    // sculpting makes a perfectly centered legend look low.
    #[arg(long, default_value_t = -2.0)]
    pub legend_nudge_y: f32,

    /// Window for coalescing slider-driven layer updates, in milliseconds.
    #[arg(long, default_value_t = 10)]
    pub slider_debounce_ms: u64,

    /// Pixels per keycap unit. Render-time concern; the core stores units.
    #[arg(long, default_value_t = 48.0)]
    pub unit_px: f32,

    #[arg(long, default_value = "dark")]
    pub theme: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_keycap_color: "#2D3748".to_string(),
            default_legend_color: "#FFFFFF".to_string(),
            default_font: "Arial".to_string(),
            default_font_size: 14.0,
            text_placeholder: "New Text".to_string(),
            legend_nudge_y: -2.0,
            slider_debounce_ms: 10,
            unit_px: 48.0,
            theme: "dark".to_string(),
        }
    }
}
