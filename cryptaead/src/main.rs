use std::process::exit;

use clap::Parser;
use log::error;

use cryptaead::cli::CliArgs;

pub fn main() {
    let args = CliArgs::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if let Some(level) = args.get_log_level() {
        logger.filter_level(level);
    }
    logger.init();

    if let Err(e) = args.run(&mut std::io::stdout().lock()) {
        error!("{e:#}");
        exit(1);
    }
}
