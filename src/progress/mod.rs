//! Terminal progress bars for the download mode.
//!
//! - `style` - progress bar styling options and templates
//! - `display` - the main and per-leaf bars of one download run
//!
//! Bars are hidden unless a caller passes visible [`StyleOptions`]:
//!
//! ```rust
//! use spelunk::harvest::Harvester;
//! use spelunk::policy::PolicyBuilder;
//! use spelunk::progress::StyleOptions;
//!
//! # fn example() -> spelunk::Result<()> {
//! let harvester = Harvester::new(PolicyBuilder::new().build()?)?
//!     .style_options(StyleOptions::default());
//! # Ok(())
//! # }
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
