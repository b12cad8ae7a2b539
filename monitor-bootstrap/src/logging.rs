use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Layer, Registry};

const LOG_FILE_PREFIX: &str = "alliance-monitor";

type FileLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Lets the log file be attached once the configuration is known.
pub struct LoggingHandle {
    file: reload::Handle<Option<FileLayer>, Registry>,
}

/// Logs go to stderr so the report on stdout stays clean. Installed before
/// the configuration is read so config warnings are not lost.
pub fn init_logging() -> LoggingHandle {
    let (file_layer, file) = reload::Layer::new(None::<FileLayer>);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if installed.is_err() {
        eprintln!("logging already initialised");
    }
    LoggingHandle { file }
}

impl LoggingHandle {
    /// Adds a daily rolling file under `dir`. Keep the returned guard alive
    /// until exit or buffered lines are lost.
    pub fn attach_log_dir(&self, dir: &str) -> Option<WorkerGuard> {
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer: FileLayer = fmt::layer().with_writer(writer).with_ansi(false).boxed();
        match self.file.reload(Some(layer)) {
            Ok(()) => Some(guard),
            Err(err) => {
                eprintln!("failed to attach log file in {}: {}", dir, err);
                None
            }
        }
    }
}
