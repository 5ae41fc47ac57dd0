use tabshift::cli;

fn main() {
    // Parse CLI arguments first so --log-level can steer logging
    let cli = cli::parse();

    // Route all log::info!() etc. to /tmp/tabshift_debug.log.
    // When RUST_LOG is set, also mirrors to stderr.
    // CLI --log-level takes highest precedence, then RUST_LOG, then DEBUG_LEVEL,
    // then the config `debug` flag (applied once the config is loaded).
    tabshift::debug::init_log_bridge(cli.log_level.map(|l| l.to_level_filter()));

    log::info!("Starting tabshift {}", tabshift::VERSION);

    let code = cli::run(cli);
    log::logger().flush();
    std::process::exit(code);
}
