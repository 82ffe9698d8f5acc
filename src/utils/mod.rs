//! Shared utility functions.
//!
//! Header parsing used by the size estimator and the root probe, and the
//! byte formatting used in per-item download messages.
//!
//! - [`cancel`] - racing network operations against a cancellation token
//! - [`content_length`] - `Content-Length` and `Content-Range` parsing
//! - [`disposition`] - `Content-Disposition` filename extraction
//! - [`human`] - human readable byte counts
//!
//! # Examples
//!
//! ```rust
//! use spelunk::utils::{human_bytes, parse_content_disposition, parse_content_range_total};
//!
//! let total = parse_content_range_total("bytes 0-0/2048").unwrap_or(0);
//! println!("Total file size: {}", human_bytes(total));
//!
//! let name = parse_content_disposition(r#"attachment; filename="a.pdf""#);
//! assert_eq!(name.as_deref(), Some("a.pdf"));
//! ```

pub mod cancel;
pub mod content_length;
pub mod disposition;
pub mod human;

pub use cancel::until_cancelled;
pub use content_length::{content_range_total, declared_content_length, parse_content_range_total};
pub use disposition::{disposition_filename, parse_content_disposition};
pub use human::human_bytes;
