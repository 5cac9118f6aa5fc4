//! Logging initialization and utilities

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable, e.g.
/// `RUST_LOG=voxedit::voxel=trace` to follow copy-on-write copies.
///
/// Calling it again keeps the logger that is already installed.
///
/// # Example
/// ```
/// voxedit::core::logging::init();
/// log::info!("Editor started");
/// ```
pub fn init() {
    if let Err(err) = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init() {
        log::debug!("Logger already installed: {}", err);
    }
}
