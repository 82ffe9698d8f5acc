//! Policy module: the limits, allow-list and transport options of a crawl.
//!
//! - `config` - the immutable [`Policy`] and its documented defaults
//! - `builder` - [`PolicyBuilder`] for validated construction
//!
//! # Examples
//!
//! ```rust
//! use spelunk::policy::{PolicyBuilder, DEFAULT_MAX_FILES};
//!
//! # fn example() -> spelunk::Result<()> {
//! let policy = PolicyBuilder::new().allowed_extensions(["pdf"]).build()?;
//! assert_eq!(policy.max_files(), DEFAULT_MAX_FILES);
//! assert!(!policy.is_allowed_extension("exe"));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;

pub use builder::PolicyBuilder;
pub use config::{
    normalize_extension, parse_extension_list, Policy, DEFAULT_ALLOWED_EXTENSIONS,
    DEFAULT_MAX_BYTES, DEFAULT_MAX_DEPTH, DEFAULT_MAX_FILES, DEFAULT_RETRIES, DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT,
};
