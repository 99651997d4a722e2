use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown while a lookup is in flight.
///
/// Without a terminal the spinner stays hidden and progress goes to the log.
pub struct LookupSpinner {
    bar: Option<ProgressBar>,
}

impl LookupSpinner {
    pub fn start(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        if !is_interactive() {
            tracing::info!(operation = "lookup", mode = "non_interactive", message = %msg, "Lookup started");
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
        {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        bar.set_message(msg);
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar: Some(bar) }
    }

    pub fn finish(self) {
        match self.bar {
            Some(bar) => bar.finish_and_clear(),
            None => tracing::info!(operation = "lookup", "Lookup settled"),
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
