//! Logging hooks for the rowperm core.
//!
//! The `log_metric!` macro emits a structured key/value line through the `log`
//! facade. It is compiled out of release builds. `enable_verbose_logging`
//! installs an `env_logger` backend for hosts that have not set one up.

use log::LevelFilter;
use std::fs::OpenOptions;
use std::sync::Once;

#[doc(hidden)]
pub use log as __log;

/// Logs a structured key-value metric line at debug level, only in debug builds.
///
/// # Example
/// ```
/// use rowperm::log_metric;
/// let n = 4;
/// log_metric!("event"="update_permutation", "outcome"="unchanged", "n"=&n);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+

            $crate::observability::__log::debug!("ROWPERM_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` backend at `level`, once per process.
///
/// If `log_file` is given, output is appended to that file instead of stderr.
/// Later calls are no-ops, as is the first call if the host already installed
/// a logger.
pub fn enable_verbose_logging(level: LevelFilter, log_file: Option<&str>) -> std::io::Result<()> {
    let mut result = Ok(());

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(level);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(filename) = log_file {
            match OpenOptions::new().append(true).create(true).open(filename) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                }
                Err(e) => {
                    result = Err(e);
                    return;
                }
            }
        }

        let _ = builder.try_init();
    });
    result
}
