use crate::reports;
use capforge::config::EditorConfig;
use capforge::layouts::{generate_layout_with, LayoutType};
use clap::Args;
use strum::IntoEnumIterator;

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub config: EditorConfig,

    /// Only show layouts whose identifier contains this filter.
    #[arg(short, long)]
    pub layout: Option<String>,
}

pub fn run(args: ShowArgs) {
    let mut shown = Vec::new();

    for ty in LayoutType::iter() {
        let name = ty.to_string();
        if let Some(ref filter) = args.layout {
            if !name.to_lowercase().contains(&filter.to_lowercase()) {
                continue;
            }
        }

        let layout = generate_layout_with(ty, &args.config);
        reports::print_layout_grid(&layout);
        shown.push(layout);
    }

    if shown.is_empty() {
        println!("No layout matches the filter.");
        return;
    }
    reports::print_layout_summary(&shown, &args.config);
}
