use clap::{Parser, Subcommand};
use std::process;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the generated layouts as legend grids.
    Show(cmd::show::ShowArgs),
    /// Audit the generated layouts for internal consistency.
    Validate(cmd::validate::ValidateArgs),
    /// Emit a default editor configuration as JSON.
    Export(cmd::export::ExportArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    // Logs go to stderr so `export` can stream JSON on stdout.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Show(args) => cmd::show::run(args),
        Commands::Validate(args) => cmd::validate::run(args),
        Commands::Export(args) => {
            if let Err(e) = cmd::export::run(args) {
                eprintln!("❌ Export failed: {}", e);
                process::exit(1);
            }
        }
    }
}
