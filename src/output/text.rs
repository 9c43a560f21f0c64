use std::fmt::Write;

use crate::error::Result;
use crate::health::BuildStatus;
use crate::model::{DuplicateCode, Priority};

use super::{OutputFormatter, Report};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    const fn priority_icon(priority: Priority) -> &'static str {
        match priority {
            Priority::High => "✗",
            Priority::Normal => "⚠",
            Priority::Low => "·",
        }
    }

    const fn priority_color(priority: Priority) -> &'static str {
        match priority {
            Priority::High => ansi::RED,
            Priority::Normal => ansi::YELLOW,
            Priority::Low => ansi::CYAN,
        }
    }

    const fn status_color(status: BuildStatus) -> &'static str {
        match status {
            BuildStatus::Success => ansi::GREEN,
            BuildStatus::Unstable => ansi::YELLOW,
            BuildStatus::Failure => ansi::RED,
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_warning(&self, warning: &DuplicateCode, output: &mut String) {
        let icon = Self::priority_icon(warning.priority);
        let label = warning.priority.as_str().to_uppercase();
        let colored = self.colorize(&label, Self::priority_color(warning.priority));

        let _ = writeln!(
            output,
            "{icon} {colored}: {}:{}-{}",
            warning.file_name(),
            warning.start_line(),
            warning.end_line()
        );

        let mut size = format!("   Lines: {}", warning.line_count);
        if let Some(tokens) = warning.tokens {
            let _ = write!(size, ", tokens: {tokens}");
        }
        if let Some(module) = &warning.module_name {
            let _ = write!(size, ", module: {module}");
        }
        let _ = writeln!(output, "{size}");

        if !warning.links.is_empty() {
            let links: Vec<String> = warning.links.iter().map(ToString::to_string).collect();
            let _ = writeln!(output, "   Duplicated in: {}", links.join(", "));
        }

        if self.verbose >= 2
            && let Some(fragment) = &warning.code_fragment
        {
            for line in fragment.lines() {
                let _ = writeln!(output, "   | {line}");
            }
        }
    }

    fn format_summary(&self, report: &Report<'_>, output: &mut String) {
        let result = report.result;
        let counts = result.counts();
        let high = self.colorize(&counts.high.to_string(), ansi::RED);
        let normal = self.colorize(&counts.normal.to_string(), ansi::YELLOW);
        let low = self.colorize(&counts.low.to_string(), ansi::CYAN);

        let _ = writeln!(
            output,
            "Summary: {} duplicate code warnings in {} files ({high} high, {normal} normal, {low} low)",
            counts.total(),
            result.project().number_of_files()
        );

        let mut delta = format!(
            "New: {}, fixed: {}",
            result.new_warnings().len(),
            result.fixed_warnings().len()
        );
        match result.reference_build() {
            Some(number) => {
                let _ = write!(delta, " (reference build #{number})");
            }
            None => delta.push_str(" (no reference build)"),
        }
        let _ = writeln!(output, "{delta}");

        let modules: Vec<&str> = result.project().modules().collect();
        if !modules.is_empty() {
            let _ = writeln!(output, "Modules: {}", modules.join(", "));
        }

        if let Some(health) = report.health {
            let _ = writeln!(output, "Health: {}% - {}", health.score, health.description);
        }

        let status = report.stability.status;
        let colored = self.colorize(status.as_str(), Self::status_color(status));
        let _ = writeln!(output, "Status: {colored}");
        for reason in &report.stability.reasons {
            let _ = writeln!(output, "   {reason}");
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report<'_>) -> Result<String> {
        let mut output = String::new();
        let result = report.result;

        // Highest priority first; low priority warnings only in verbose mode
        for priority in Priority::ALL {
            if priority == Priority::Low && self.verbose == 0 {
                continue;
            }
            for warning in result.project().annotations().filter(|w| w.priority == priority) {
                self.format_warning(warning, &mut output);
                output.push('\n');
            }
        }

        if result.project().has_errors() {
            let _ = writeln!(output, "Errors:");
            for error in result.project().errors() {
                let _ = writeln!(output, "   {error}");
            }
            output.push('\n');
        }

        self.format_summary(report, &mut output);
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
