pub mod context;
pub mod lifecycle;
pub mod logging;

pub use lifecycle::{run_pass, run_with_config};

pub async fn run() -> anyhow::Result<()> {
    let logging = logging::init_logging();
    let config = monitor_infrastructure::AppConfig::load().await?;
    let _guard = config
        .log_dir
        .as_deref()
        .and_then(|dir| logging.attach_log_dir(dir));
    run_with_config(&config).await
}
