/// Initialize logging for the hosting process.
pub fn init_logging() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pontoon_service=debug"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    // ignore the error when a test harness installed one already
    let _ = tracing::subscriber::set_global_default(subscriber);
}
