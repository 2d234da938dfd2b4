use capforge::api::EditorSession;
use capforge::config::EditorConfig;
use capforge::error::CfResult;
use capforge::layouts::LayoutType;
use clap::Args;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub config: EditorConfig,

    /// Layout identifier to export (60%, ISO-60%, TKL, Full).
    #[arg(short, long, default_value = "60%")]
    pub layout: String,

    /// Destination file; stdout when omitted.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

pub fn run(args: ExportArgs) -> CfResult<()> {
    let ty = LayoutType::parse(&args.layout)?;

    let mut session = EditorSession::new(args.config.clone());
    session.change_layout(ty);

    let json = session.export_json(args.pretty)?;
    match &args.out {
        Some(path) => {
            fs::write(path, &json)?;
            println!("💾 Exported '{}' configuration to {}", ty, path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
