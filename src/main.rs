//! bogie's main application entry point.
//! Parses arguments, configures logging and runs the configured applications.

use bogie::{
    cli::{get_args, Args},
    config::load_config,
    decrypt::PlaintextDecryptor,
    error::{default_error_handler, Result},
    logger::init_logger,
    pipeline,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args.config)?;
    args.apply_to(&mut config)?;
    pipeline::run(&config, &PlaintextDecryptor::new())
}
