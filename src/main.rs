use clap::Parser;
use docview::core::config;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "docview", about = "Terminal viewer for single-page documentation sites")]
struct Args {
    /// Base URL of the documentation server
    #[arg(short, long)]
    url: Option<String>,

    /// Fragment to open on startup (a deep link), e.g. `large_json.html`
    route: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to docview.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("docview.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().map_err(std::io::Error::other)?;
    let resolved = config::resolve(&file_config, args.url.as_deref(), args.route);

    log::info!("Docview starting up against {}", resolved.base_url);

    docview::tui::run(resolved).await
}
