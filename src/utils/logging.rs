use log::LevelFilter;

/// Initialize logging using env_logger.
/// `RUST_LOG` wins when set; otherwise `verbose` picks debug over warn.
/// e.g., `RUST_LOG=multi_account=debug multi-account resolve 'https://app.example.co/'`
pub fn init_logging(verbose: bool) {
    let fallback = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(fallback);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    let _ = builder.try_init();
}
