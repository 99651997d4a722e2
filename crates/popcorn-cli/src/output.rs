use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

/// Where command results go: colored lines for people, one JSON value per
/// line (or pretty-printed) for scripts.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Bold section heading, human mode only
    pub fn heading(&self, msg: impl AsRef<str>) {
        if !self.quiet && self.is_human() {
            println!("{}", msg.as_ref().bold());
        }
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message("success", msg.as_ref(), || format!("{} {}", "✓".green(), msg.as_ref()));
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.message("info", msg.as_ref(), || msg.as_ref().to_string());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message("warning", msg.as_ref(), || format!("{} {}", "⚠".yellow(), msg.as_ref()));
    }

    /// Tables and other preformatted text. Dropped in JSON modes, where the
    /// command emits its data through [`Output::json`] instead.
    pub fn println(&self, msg: impl AsRef<str>) {
        if !self.quiet && self.is_human() {
            println!("{}", msg.as_ref());
        }
    }

    /// Shown even in quiet mode; human errors go to stderr.
    pub fn error(&self, msg: impl AsRef<str>) {
        if self.is_human() {
            eprintln!("{} {}", "✗".red(), msg.as_ref());
        } else if let Some(line) = self.render_json(&envelope("error", msg.as_ref())) {
            println!("{}", line);
        }
    }

    pub fn json(&self, data: &Value) {
        if self.quiet {
            return;
        }
        if let Some(line) = self.render_json(data) {
            println!("{}", line);
        }
    }

    fn message(&self, kind: &str, msg: &str, human: impl FnOnce() -> String) {
        if self.quiet {
            return;
        }
        if self.is_human() {
            println!("{}", human());
        } else {
            self.json(&envelope(kind, msg));
        }
    }

    fn render_json(&self, data: &Value) -> Option<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string(data).ok(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(data).ok(),
            OutputFormat::Human => None,
        }
    }
}

fn envelope(kind: &str, msg: &str) -> Value {
    json!({ "type": kind, "message": msg })
}
