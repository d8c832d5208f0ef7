//! Logging setup.

use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

/// Setup logging with the given level.
///
/// `RUST_LOG` takes precedence over `level`. With `file`, output goes through
/// a non-blocking writer; keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn setup_logging(level: &str, json: bool, file: Option<&Path>) -> io::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let (writer, guard) = match file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_appender(path)?);
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(io::stdout), None),
    };
    let ansi = file.is_none();

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(writer))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_ansi(ansi).with_writer(writer))
            .init();
    }

    Ok(guard)
}

fn open_appender(path: &Path) -> io::Result<tracing_appender::rolling::RollingFileAppender> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("log file path has no file name: {}", path.display()),
        )
    })?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    Ok(tracing_appender::rolling::never(dir, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appender_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("dashboard.log");

        open_appender(&path).unwrap();
        assert!(dir.path().join("logs").is_dir());
    }

    #[test]
    fn test_appender_needs_file_name() {
        let err = open_appender(Path::new("/")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
