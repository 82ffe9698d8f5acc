//! Progress bar coordination for the download mode.
//!
//! # Examples
//!
//! ```rust
//! use spelunk::progress::{ProgressDisplay, StyleOptions};
//!
//! let display = ProgressDisplay::new(StyleOptions::hidden(), 3);
//!
//! let child = display.start_leaf("a.pdf", Some(1024));
//! child.inc(512);
//! display.finish_leaf(child);
//!
//! display.finish();
//! ```

use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};

/// Main bar counting leaves plus one byte bar per transfer.
pub struct ProgressDisplay {
    multi: MultiProgress,
    main: ProgressBar,
    style_options: StyleOptions,
}

impl ProgressDisplay {
    /// Create a display for `total_leaves` transfers.
    pub fn new(style_options: StyleOptions, total_leaves: usize) -> Self {
        let multi = match style_options.is_enabled() {
            true => MultiProgress::new(),
            false => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        };

        let main = multi.add(
            style_options
                .main()
                .clone()
                .to_progress_bar(total_leaves as u64),
        );
        main.tick();

        Self {
            multi,
            main,
            style_options,
        }
    }

    /// Get the main progress bar.
    pub fn main(&self) -> &ProgressBar {
        &self.main
    }

    /// Add the byte bar for one leaf; the length is the size estimate, or
    /// set later from the response.
    pub fn start_leaf(&self, name: &str, estimate: Option<u64>) -> ProgressBar {
        self.main.set_message(name.to_string());
        let pb = self
            .multi
            .add(self.style_options.child().clone().to_progress_bar(estimate.unwrap_or(0)));
        pb.set_message(name.to_string());
        pb
    }

    /// Finish a leaf's byte bar and advance the main bar.
    pub fn finish_leaf(&self, pb: ProgressBar) {
        if self.style_options.child().clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
        self.main.inc(1);
    }

    /// Finish the main bar, clearing or keeping it based on configuration.
    pub fn finish(self) {
        if self.style_options.main().clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }
}
