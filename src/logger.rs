/// Initializes `env_logger`.
///
/// Warnings stay visible by default so missing env and values sources are
/// reported; `verbose` enables debug output.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();
}
