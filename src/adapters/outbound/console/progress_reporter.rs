use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;
use std::time::Duration;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with CSV on stdout.
/// Uses an indicatif spinner while BOMs are being expanded.
pub struct StderrProgressReporter {
    spinner: RefCell<Option<ProgressBar>>,
    verbose: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
            verbose: false,
        }
    }

    /// Also prints per-component detail lines
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn get_or_create_spinner(&self) -> ProgressBar {
        let mut spinner_option = self.spinner.borrow_mut();
        if let Some(spinner) = spinner_option.as_ref() {
            return spinner.clone();
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("   {spinner:.green} {pos} BOM(s) expanded - {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));
        *spinner_option = Some(spinner.clone());
        spinner
    }

    /// Prints a line without tearing the spinner
    fn print(&self, line: &str) {
        match self.spinner.borrow().as_ref() {
            Some(spinner) => spinner.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }

    fn finish_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.print(message);
    }

    fn report_detail(&self, message: &str) {
        if self.verbose {
            self.print(&format!("{}", message.dimmed()));
        }
    }

    fn report_progress(&self, boms_expanded: usize, message: Option<&str>) {
        let spinner = self.get_or_create_spinner();
        spinner.set_position(boms_expanded as u64);
        if let Some(msg) = message {
            spinner.set_message(msg.to_string());
        }
    }

    fn report_warning(&self, message: &str) {
        self.print(&format!("{}", message.bright_yellow()));
    }

    fn report_completion(&self, message: &str) {
        self.finish_spinner();
        eprintln!();
        eprintln!("{}", message.bright_green().bold());
    }
}
