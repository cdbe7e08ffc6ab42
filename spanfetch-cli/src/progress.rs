//! Terminal progress rendering for segmented downloads.

use indicatif::{ProgressBar, ProgressStyle};

use spanfetch::{ProgressCallback, ProgressSnapshot};

/// Build a byte-level progress bar and the callback that drives it.
///
/// The bar's length is unknown until the first snapshot arrives, so it
/// is set lazily from the snapshot's total.
pub fn progress_bar() -> (ProgressBar, ProgressCallback) {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template(
            "{bar:40} {bytes}/{total_bytes} ({percent}%) {msg}",
        )
        .expect("progress bar template is valid")
        .progress_chars("=> "),
    );

    let updater = bar.clone();
    let callback: ProgressCallback = Box::new(move |snapshot: ProgressSnapshot| {
        if updater.length() != Some(snapshot.total) {
            updater.set_length(snapshot.total);
        }
        updater.set_position(snapshot.downloaded);
        updater.set_message(format!(
            "{}/{} parts",
            snapshot.finished_parts, snapshot.total_parts
        ));
    });

    (bar, callback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_sets_length_and_position() {
        let (bar, callback) = progress_bar();

        callback(ProgressSnapshot {
            downloaded: 250,
            total: 1000,
            finished_parts: 1,
            total_parts: 4,
        });

        assert_eq!(bar.length(), Some(1000));
        assert_eq!(bar.position(), 250);
    }
}
