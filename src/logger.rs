//! Sink for the build console messages produced while publishing.

use std::io::Write;

/// Receives the human readable messages of a publisher run.
pub trait PluginLogger {
    fn log(&mut self, message: &str);

    fn log_lines(&mut self, lines: &[String]) {
        for line in lines {
            self.log(line);
        }
    }
}

/// Writes each message on its own line with a `[DRY] ` prefix.
///
/// Write failures are dropped: losing console output must not fail a build.
pub struct ConsoleLogger<W: Write> {
    prefix: String,
    out: W,
}

impl<W: Write> ConsoleLogger<W> {
    pub fn new(out: W) -> Self {
        Self::with_prefix(out, "DRY")
    }

    pub fn with_prefix(out: W, plugin_name: &str) -> Self {
        Self {
            prefix: format!("[{plugin_name}] "),
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PluginLogger for ConsoleLogger<W> {
    fn log(&mut self, message: &str) {
        tracing::trace!(target: "dry_guard::console", "{message}");
        let _ = writeln!(self.out, "{}{}", self.prefix, message);
    }
}

/// Discards everything (used with `--quiet`).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl PluginLogger for NullLogger {
    fn log(&mut self, _message: &str) {}
}
