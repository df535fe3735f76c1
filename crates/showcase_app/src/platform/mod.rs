use std::path::PathBuf;
use std::process::ExitCode;

use showcase_logging::showcase_debug;

mod config;
mod demo;
mod logging;
mod mirror;
mod presets;

use logging::LogDestination;

const USAGE: &str = "\
usage: showcase_app           mirror COMMON_MD_DIR into MD_ASSET_DIR
       showcase_app demo [presets.ron]
                              run the interactive harness in the terminal";

pub fn run(args: Vec<String>) -> ExitCode {
    match args.first().map(String::as_str) {
        None | Some("mirror") => {
            logging::initialize(LogDestination::Terminal);
            report(mirror::run())
        }
        Some("demo") => {
            logging::initialize(LogDestination::File);
            report(demo::run(args.get(1).map(PathBuf::from)))
        }
        Some("-h" | "--help") => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Some(other) => {
            eprintln!("unknown command `{other}`\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn report(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            showcase_debug!("{:?}", err);
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
