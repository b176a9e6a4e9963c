//! Terminal progress for both commands.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner counting processed files; the walk does not know the total.
pub fn upload_progress() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} Uploading files [{pos}] {elapsed} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// Bar for clearing; the length is set once the listing is complete.
pub fn clear_progress() -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("Clearing {wide_bar} {pos}/{len} {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}
