use tracing_subscriber::EnvFilter;

/// Level directive for a `-v` count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber. The filter comes from the verbosity count
/// only; `RUST_LOG` is not consulted.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::new(format!("investment_scorecard={0},scorecard={0}", level_for(verbosity)));

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();
}
