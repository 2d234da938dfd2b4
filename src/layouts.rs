use crate::config::EditorConfig;
use crate::error::{CapForgeError, CfResult};
use crate::geometry::{KeyShape, KeyboardLayout, KeycapConfig};
use crate::layer::KeycapLayer;
use std::collections::HashMap;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// The registered layout identifiers. Generation is total over this enum;
/// the only failure mode is parsing an unknown identifier string, which is
/// a programming error at the boundary and fails fast.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum LayoutType {
    #[strum(serialize = "60%")]
    #[serde(rename = "60%")]
    Sixty,
    #[strum(serialize = "ISO-60%")]
    #[serde(rename = "ISO-60%")]
    Iso60,
    #[strum(serialize = "TKL")]
    #[serde(rename = "TKL")]
    Tkl,
    #[strum(serialize = "Full")]
    #[serde(rename = "Full")]
    Full,
}

impl LayoutType {
    pub fn parse(s: &str) -> CfResult<Self> {
        Self::from_str(s).map_err(|_| CapForgeError::UnsupportedLayout(s.to_string()))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Sixty => "60% Compact",
            Self::Iso60 => "ISO 60%",
            Self::Tkl => "Tenkeyless",
            Self::Full => "Full Size",
        }
    }
}

/// Catalog entry for layout pickers.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOption {
    pub id: LayoutType,
    pub name: String,
    pub description: String,
    pub key_count: usize,
}

pub fn layout_options() -> Vec<LayoutOption> {
    LayoutType::iter()
        .map(|ty| {
            let description = match ty {
                LayoutType::Sixty => "61 keys - Perfect for minimalists",
                LayoutType::Iso60 => "62 keys - ISO Enter and split left Shift",
                LayoutType::Tkl => "87 keys - Function keys without numpad",
                LayoutType::Full => "104 keys - Complete layout with numpad",
            };
            LayoutOption {
                id: ty,
                name: ty.display_name().to_string(),
                description: description.to_string(),
                key_count: generate_layout(ty).total_keys,
            }
        })
        .collect()
}

pub fn generate_layout(ty: LayoutType) -> KeyboardLayout {
    generate_layout_with(ty, &EditorConfig::default())
}

/// Deterministically builds the canonical layout for `ty`. Keys are laid
/// out from row tables of (legend, width) pairs; `x` is the running sum of
/// preceding widths. Layout dimensions are the computed bounding box.
pub fn generate_layout_with(ty: LayoutType, cfg: &EditorConfig) -> KeyboardLayout {
    let mut b = LayoutBuilder::new(cfg);
    match ty {
        LayoutType::Sixty => sixty_block(&mut b),
        LayoutType::Iso60 => iso_sixty_block(&mut b),
        LayoutType::Tkl => tkl_block(&mut b, cfg),
        LayoutType::Full => {
            tkl_block(&mut b, cfg);
            numpad_block(&mut b);
        }
    }
    b.finish(ty)
}

pub fn generate_all_layouts(cfg: &EditorConfig) -> HashMap<LayoutType, KeyboardLayout> {
    let mut map = HashMap::new();
    for ty in LayoutType::iter() {
        map.insert(ty, generate_layout_with(ty, cfg));
    }
    map
}

// === Row tables (widths in keycap units) ===

const ROW_NUM: &[(&str, f32)] = &[
    ("`", 1.0),
    ("1", 1.0),
    ("2", 1.0),
    ("3", 1.0),
    ("4", 1.0),
    ("5", 1.0),
    ("6", 1.0),
    ("7", 1.0),
    ("8", 1.0),
    ("9", 1.0),
    ("0", 1.0),
    ("*", 1.0),
    ("-", 1.0),
    ("Backspace", 2.0),
];

const ROW_TAB: &[(&str, f32)] = &[
    ("Tab", 1.5),
    ("Q", 1.0),
    ("W", 1.0),
    ("E", 1.0),
    ("R", 1.0),
    ("T", 1.0),
    ("Y", 1.0),
    ("U", 1.0),
    ("I", 1.0),
    ("O", 1.0),
    ("P", 1.0),
    ("Ğ", 1.0),
    ("Ü", 1.0),
    ("\\", 1.5),
];

const ROW_HOME: &[(&str, f32)] = &[
    ("Caps", 1.75),
    ("A", 1.0),
    ("S", 1.0),
    ("D", 1.0),
    ("F", 1.0),
    ("G", 1.0),
    ("H", 1.0),
    ("J", 1.0),
    ("K", 1.0),
    ("L", 1.0),
    ("Ş", 1.0),
    ("İ", 1.0),
    ("Enter", 2.25),
];

const ROW_SHIFT: &[(&str, f32)] = &[
    ("Shift", 2.25),
    ("Z", 1.0),
    ("X", 1.0),
    ("C", 1.0),
    ("V", 1.0),
    ("B", 1.0),
    ("N", 1.0),
    ("M", 1.0),
    ("Ö", 1.0),
    ("Ç", 1.0),
    (":", 1.0),
    ("Shift", 2.75),
];

const ROW_BOTTOM: &[(&str, f32)] = &[
    ("Ctrl", 1.25),
    ("Win", 1.25),
    ("Alt", 1.25),
    ("Space", 6.25),
    ("Alt", 1.25),
    ("Fn", 1.0),
    ("Menu", 1.0),
    ("Ctrl", 1.25),
];

// ISO alternations: the tab row loses the backslash to the ISO Enter's
// upper half, the home row gains a 1u key, the shift row splits the left
// Shift around the extra `<` key.

const ROW_HOME_ISO: &[(&str, f32)] = &[
    ("Caps", 1.75),
    ("A", 1.0),
    ("S", 1.0),
    ("D", 1.0),
    ("F", 1.0),
    ("G", 1.0),
    ("H", 1.0),
    ("J", 1.0),
    ("K", 1.0),
    ("L", 1.0),
    ("Ş", 1.0),
    ("İ", 1.0),
    (",", 1.0),
];

const ROW_SHIFT_ISO: &[(&str, f32)] = &[
    ("Shift", 1.25),
    ("<", 1.0),
    ("Z", 1.0),
    ("X", 1.0),
    ("C", 1.0),
    ("V", 1.0),
    ("B", 1.0),
    ("N", 1.0),
    ("M", 1.0),
    ("Ö", 1.0),
    ("Ç", 1.0),
    (":", 1.0),
    ("Shift", 2.75),
];

const FUNC_ROW: &[&str] = &[
    "Esc", "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12", "PrtSc",
    "ScrLk", "Pause",
];

const NAV_CLUSTER: &[(&str, f32, f32)] = &[
    ("Ins", 15.5, 1.5),
    ("Home", 16.5, 1.5),
    ("PgUp", 17.5, 1.5),
    ("Del", 15.5, 2.5),
    ("End", 16.5, 2.5),
    ("PgDn", 17.5, 2.5),
    ("↑", 16.5, 4.5),
    ("←", 15.5, 5.5),
    ("↓", 16.5, 5.5),
    ("→", 17.5, 5.5),
];

const NUMPAD: &[(&str, f32, f32, f32, f32)] = &[
    ("NumLk", 19.5, 1.5, 1.0, 1.0),
    ("/", 20.5, 1.5, 1.0, 1.0),
    ("*", 21.5, 1.5, 1.0, 1.0),
    ("-", 22.5, 1.5, 1.0, 1.0),
    ("7", 19.5, 2.5, 1.0, 1.0),
    ("8", 20.5, 2.5, 1.0, 1.0),
    ("9", 21.5, 2.5, 1.0, 1.0),
    ("+", 22.5, 2.5, 1.0, 2.0),
    ("4", 19.5, 3.5, 1.0, 1.0),
    ("5", 20.5, 3.5, 1.0, 1.0),
    ("6", 21.5, 3.5, 1.0, 1.0),
    ("1", 19.5, 4.5, 1.0, 1.0),
    ("2", 20.5, 4.5, 1.0, 1.0),
    ("3", 21.5, 4.5, 1.0, 1.0),
    ("Enter", 22.5, 4.5, 1.0, 2.0),
    ("0", 19.5, 5.5, 2.0, 1.0),
    (".", 21.5, 5.5, 1.0, 1.0),
];

fn sixty_block(b: &mut LayoutBuilder) {
    b.unit_row(0, ROW_NUM);
    b.unit_row(1, ROW_TAB);
    b.unit_row(2, ROW_HOME);
    b.unit_row(3, ROW_SHIFT);
    b.unit_row(4, ROW_BOTTOM);
}

fn iso_sixty_block(b: &mut LayoutBuilder) {
    b.unit_row(0, ROW_NUM);
    // Tab row without the backslash; the ISO Enter hangs off its end and
    // spans down into the home row.
    b.unit_row(1, &ROW_TAB[..ROW_TAB.len() - 1]);
    b.key_shaped("Enter", 1, 13, 13.5, 1.0, 1.5, 2.0, KeyShape::IsoEnter);
    b.unit_row(2, ROW_HOME_ISO);
    b.unit_row(3, ROW_SHIFT_ISO);
    b.unit_row(4, ROW_BOTTOM);
}

fn tkl_block(b: &mut LayoutBuilder, cfg: &EditorConfig) {
    // Function row with half-unit gaps after F4, F8 and F12.
    for (i, legend) in FUNC_ROW.iter().enumerate() {
        let gaps = [3usize, 7, 11].iter().filter(|&&g| i > g).count();
        let x = i as f32 + gaps as f32 * 0.5;
        b.key(legend, 0, i as u32, x, 0.0, 1.0, 1.0);
    }

    // The alpha block is the 60% layout verbatim, pushed below the gap row.
    let mut alpha = LayoutBuilder::new(cfg);
    sixty_block(&mut alpha);
    b.embed(alpha.keys, 0.0, 1.5);

    for (legend, x, y) in NAV_CLUSTER {
        b.key(legend, *y as u32, *x as u32, *x, *y, 1.0, 1.0);
    }
}

fn numpad_block(b: &mut LayoutBuilder) {
    for (legend, x, y, w, h) in NUMPAD {
        b.key(legend, *y as u32, *x as u32, *x, *y, *w, *h);
    }
}

struct LayoutBuilder<'a> {
    cfg: &'a EditorConfig,
    keys: Vec<KeycapConfig>,
    next_id: usize,
}

impl<'a> LayoutBuilder<'a> {
    fn new(cfg: &'a EditorConfig) -> Self {
        Self {
            cfg,
            keys: Vec::new(),
            next_id: 0,
        }
    }

    fn key(&mut self, legend: &str, row: u32, col: u32, x: f32, y: f32, w: f32, h: f32) {
        self.key_shaped(legend, row, col, x, y, w, h, KeyShape::Rect);
    }

    #[allow(clippy::too_many_arguments)]
    fn key_shaped(
        &mut self,
        legend: &str,
        row: u32,
        col: u32,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        shape: KeyShape,
    ) {
        let n = self.next_id;
        self.next_id += 1;

        let mut layer = KeycapLayer::text(format!("layer-{}-0", n), legend);
        layer.offset_y = self.cfg.legend_nudge_y;

        self.keys.push(KeycapConfig {
            id: format!("key-{}", n),
            row,
            col,
            x,
            y,
            width: w,
            height: h,
            shape,
            color: self.cfg.default_keycap_color.clone(),
            text_color: self.cfg.default_legend_color.clone(),
            layers: vec![layer],
            group: None,
        });
    }

    /// Lays out one row of (legend, width) cells with a running x cursor.
    fn unit_row(&mut self, row: u32, cells: &[(&str, f32)]) {
        let mut x = 0.0;
        for (col, (legend, width)) in cells.iter().enumerate() {
            self.key(legend, row, col as u32, x, row as f32, *width, 1.0);
            x += width;
        }
    }

    /// Adopts a sub-layout's keys, re-offsetting their positions and
    /// renumbering key and layer ids into this builder's sequence.
    fn embed(&mut self, sub: Vec<KeycapConfig>, dx: f32, dy: f32) {
        for mut key in sub {
            let n = self.next_id;
            self.next_id += 1;

            key.id = format!("key-{}", n);
            key.x += dx;
            key.y += dy;
            for (i, layer) in key.layers.iter_mut().enumerate() {
                layer.id = format!("layer-{}-{}", n, i);
            }
            self.keys.push(key);
        }
    }

    fn finish(self, ty: LayoutType) -> KeyboardLayout {
        let (width, height) = KeyboardLayout::bounding_box(&self.keys);
        KeyboardLayout {
            id: ty.to_string(),
            name: ty.display_name().to_string(),
            total_keys: self.keys.len(),
            width,
            height,
            keys: self.keys,
        }
    }
}
