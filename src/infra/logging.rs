pub fn init() {
    // stdout carries MCP frames, so logs go to stderr.
    // Default to info level; allow override via RUST_LOG (e.g., "debug").
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
