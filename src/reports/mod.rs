use capforge::config::EditorConfig;
use capforge::geometry::{KeyboardLayout, KeycapConfig};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Buckets keys into visual rows by their y coordinate, left to right.
fn visual_rows(layout: &KeyboardLayout) -> Vec<(f32, Vec<&KeycapConfig>)> {
    let mut rows: Vec<(f32, Vec<&KeycapConfig>)> = Vec::new();
    for key in &layout.keys {
        match rows.iter_mut().find(|(y, _)| (*y - key.y).abs() < 1e-3) {
            Some((_, row)) => row.push(key),
            None => rows.push((key.y, vec![key])),
        }
    }
    rows.sort_by(|a, b| a.0.total_cmp(&b.0));
    for (_, row) in &mut rows {
        row.sort_by(|a, b| a.x.total_cmp(&b.x));
    }
    rows
}

pub fn print_layout_grid(layout: &KeyboardLayout) {
    println!("\nLayout: {} ({} keys)", layout.name, layout.total_keys);

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for (_, row) in visual_rows(layout) {
        let cells: Vec<Cell> = row
            .iter()
            .map(|key| {
                let legend = key
                    .layers
                    .first()
                    .map(|layer| layer.content_str())
                    .unwrap_or(" ");
                Cell::new(legend).set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}

pub fn print_layout_summary(layouts: &[KeyboardLayout], cfg: &EditorConfig) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Layout").add_attribute(Attribute::Bold),
        Cell::new("Name"),
        Cell::new("Keys").fg(Color::Cyan),
        Cell::new("Width (u)"),
        Cell::new("Height (u)"),
        Cell::new("Surface (px)"),
    ]);

    for i in 2..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for layout in layouts {
        table.add_row(vec![
            Cell::new(&layout.id).add_attribute(Attribute::Bold),
            Cell::new(&layout.name),
            Cell::new(layout.total_keys).fg(Color::Cyan),
            Cell::new(format!("{:.2}", layout.width)),
            Cell::new(format!("{:.2}", layout.height)),
            Cell::new(format!(
                "{:.0}x{:.0}",
                layout.width * cfg.unit_px,
                layout.height * cfg.unit_px
            )),
        ]);
    }
    println!("{}", table);
}

pub struct AuditRow {
    pub layout: String,
    pub keys: usize,
    pub problems: Vec<String>,
}

pub fn print_audit(rows: &[AuditRow]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Layout").add_attribute(Attribute::Bold),
        Cell::new("Keys"),
        Cell::new("Status"),
        Cell::new("Problems"),
    ]);

    for row in rows {
        let status = if row.problems.is_empty() {
            Cell::new("OK").fg(Color::Green)
        } else {
            Cell::new("FAIL").fg(Color::Red).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(&row.layout).add_attribute(Attribute::Bold),
            Cell::new(row.keys),
            status,
            Cell::new(row.problems.join("; ")),
        ]);
    }
    println!("{}", table);
}
