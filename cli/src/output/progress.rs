//! Spinner for waits on `aws` calls.

#![allow(clippy::expect_used)] // Templates are compile-time constants

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Start a steadily ticking spinner.
///
/// # Panics
///
/// Never in practice; the template is a constant.
#[must_use]
pub fn spinner(msg: &str) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .tick_strings(TICKS)
        .template("  {spinner:.cyan} {msg}")
        .expect("valid template");
    let pb = ProgressBar::new_spinner().with_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Replace the spinner with a `✗ {msg}` line.
pub fn finish_error(pb: &ProgressBar, msg: &str) {
    pb.set_style(
        ProgressStyle::with_template("  ✗ {msg}").expect("valid template"),
    );
    pb.finish_with_message(msg.to_string());
}

/// Await `work` behind a spinner when `enabled`. The spinner vanishes on
/// success and leaves `failure` behind on error.
pub async fn while_spinning<T, E>(
    enabled: bool,
    msg: &str,
    failure: &str,
    work: impl Future<Output = Result<T, E>>,
) -> Result<T, E> {
    if !enabled {
        return work.await;
    }
    let pb = spinner(msg);
    let result = work.await;
    match &result {
        Ok(_) => pb.finish_and_clear(),
        Err(_) => finish_error(&pb, failure),
    }
    result
}
