use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::process::ExitCode;

use atlas::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to atlas.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("atlas.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Atlas starting up: {:?}", cli.command);

    cli::run(cli).await
}
