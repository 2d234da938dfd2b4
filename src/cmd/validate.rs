use crate::reports::{self, AuditRow};
use capforge::config::EditorConfig;
use capforge::geometry::KeyboardLayout;
use capforge::layouts::{generate_layout_with, LayoutType};
use clap::Args;
use std::collections::HashSet;
use std::process;
use strum::IntoEnumIterator;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: EditorConfig,

    /// Only audit layouts whose identifier contains this filter.
    #[arg(short, long)]
    pub layout: Option<String>,
}

pub fn run(args: ValidateArgs) {
    println!("\n🔎 === LAYOUT AUDIT === 🔎");

    let mut rows = Vec::new();
    let sixty = generate_layout_with(LayoutType::Sixty, &args.config);

    for ty in LayoutType::iter() {
        let name = ty.to_string();
        if let Some(ref filter) = args.layout {
            if !name.to_lowercase().contains(&filter.to_lowercase()) {
                continue;
            }
        }

        let layout = generate_layout_with(ty, &args.config);
        let mut problems = audit_layout(&layout);
        if matches!(ty, LayoutType::Tkl | LayoutType::Full) {
            problems.extend(audit_alpha_block(&layout, &sixty));
        }
        rows.push(AuditRow {
            layout: name,
            keys: layout.total_keys,
            problems,
        });
    }

    reports::print_audit(&rows);

    if rows.iter().any(|row| !row.problems.is_empty()) {
        eprintln!("❌ Audit failed.");
        process::exit(1);
    }
    println!("✅ All audited layouts are consistent.");
}

fn audit_layout(layout: &KeyboardLayout) -> Vec<String> {
    let mut problems = Vec::new();

    if layout.total_keys != layout.keys.len() {
        problems.push(format!(
            "totalKeys {} != actual {}",
            layout.total_keys,
            layout.keys.len()
        ));
    }

    let mut ids = HashSet::new();
    for key in &layout.keys {
        if !ids.insert(key.id.as_str()) {
            problems.push(format!("duplicate key id {}", key.id));
        }
        if key.width <= 0.0 || key.height <= 0.0 {
            problems.push(format!("key {} has a degenerate size", key.id));
        }
        let mut layer_ids = HashSet::new();
        for layer in &key.layers {
            if !layer_ids.insert(layer.id.as_str()) {
                problems.push(format!("key {} repeats layer id {}", key.id, layer.id));
            }
        }
    }

    let (width, height) = KeyboardLayout::bounding_box(&layout.keys);
    if (width - layout.width).abs() > 1e-3 || (height - layout.height).abs() > 1e-3 {
        problems.push(format!(
            "declared {}x{} != bounding box {}x{}",
            layout.width, layout.height, width, height
        ));
    }

    problems
}

/// The composite layouts embed the 60% alpha block shifted down by the
/// gap row; each embedded key must keep its standalone rectangle.
fn audit_alpha_block(layout: &KeyboardLayout, sixty: &KeyboardLayout) -> Vec<String> {
    let mut problems = Vec::new();
    for alpha in &sixty.keys {
        let legend = alpha.layers.first().map(|l| l.content_str()).unwrap_or("");
        let matched = layout.keys.iter().any(|key| {
            key.row == alpha.row
                && key.col == alpha.col
                && key.layers.first().map(|l| l.content_str()) == Some(legend)
                && (key.x - alpha.x).abs() < 1e-3
                && (key.y - (alpha.y + 1.5)).abs() < 1e-3
                && (key.width - alpha.width).abs() < 1e-3
                && (key.height - alpha.height).abs() < 1e-3
        });
        if !matched {
            problems.push(format!("alpha key '{}' lost its 60% geometry", legend));
        }
    }
    problems
}
