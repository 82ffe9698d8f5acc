//! Aggregate reports of the harvest modes.

use crate::classify::LeafResource;
use crate::fetch::Summary;
use crate::utils::human_bytes;

use reqwest::Url;
use std::fmt;
use std::path::{Path, PathBuf};

/// Number of per-item messages a [`DownloadReport`] keeps.
pub const MESSAGE_TAIL: usize = 50;

/// Allowed leaves of a crawl, truncated to a limit.
#[derive(Debug, Clone)]
pub struct ListReport {
    pub(crate) root: Url,
    pub(crate) total: usize,
    pub(crate) allowed: usize,
    pub(crate) leaves: Vec<LeafResource>,
}

impl ListReport {
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Gets the number of leaves discovered, allowed or not.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Gets the number of leaves the allow-list admits.
    pub fn allowed(&self) -> usize {
        self.allowed
    }

    /// Gets the listed leaves, in discovery order.
    pub fn leaves(&self) -> &[LeafResource] {
        &self.leaves
    }

    /// Allowed leaves left out by the limit.
    pub fn remaining(&self) -> usize {
        self.allowed.saturating_sub(self.leaves.len())
    }
}

/// Allowed leaves counted, optionally for one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountReport {
    pub(crate) total: usize,
    pub(crate) allowed: usize,
    pub(crate) extension: Option<String>,
    pub(crate) matching: usize,
    pub(crate) by_extension: Vec<(String, usize)>,
}

impl CountReport {
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn allowed(&self) -> usize {
        self.allowed
    }

    /// Gets the normalized extension filter.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Allowed leaves matching the filter; all allowed leaves without one.
    pub fn matching(&self) -> usize {
        self.matching
    }

    /// Allowed leaves per extension, most frequent first, ties by name.
    pub fn by_extension(&self) -> &[(String, usize)] {
        &self.by_extension
    }
}

impl fmt::Display for CountReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extension {
            Some(ext) => write!(f, "Found {} file(s) with .{}", self.matching, ext),
            None => {
                write!(f, "Found {} file(s)", self.matching)?;
                for (ext, n) in &self.by_extension {
                    write!(f, "\n.{}: {}", ext, n)?;
                }
                Ok(())
            }
        }
    }
}

/// Estimated size of the allowed leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeReport {
    pub(crate) total: usize,
    pub(crate) allowed: usize,
    pub(crate) known_bytes: u64,
    pub(crate) unknown: usize,
}

impl SizeReport {
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn allowed(&self) -> usize {
        self.allowed
    }

    /// Sum of the sizes that could be estimated.
    pub fn known_bytes(&self) -> u64 {
        self.known_bytes
    }

    /// Number of allowed leaves whose size is unknown.
    pub fn unknown(&self) -> usize {
        self.unknown
    }
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Files: {}/{} | Total known size: {} | Unknown sizes: {}",
            self.allowed,
            self.total,
            human_bytes(self.known_bytes),
            self.unknown
        )
    }
}

/// Outcome of downloading every allowed leaf.
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub(crate) total: usize,
    pub(crate) allowed: usize,
    pub(crate) downloaded: usize,
    pub(crate) skipped: usize,
    pub(crate) failed: usize,
    pub(crate) destination: PathBuf,
    pub(crate) summaries: Vec<Summary>,
}

impl DownloadReport {
    pub(crate) fn new(total: usize, allowed: usize, destination: PathBuf) -> Self {
        Self {
            total,
            allowed,
            downloaded: 0,
            skipped: 0,
            failed: 0,
            destination,
            summaries: Vec::with_capacity(allowed),
        }
    }

    pub(crate) fn record(&mut self, summary: Summary) {
        let outcome = summary.outcome();
        if outcome.is_downloaded() {
            self.downloaded += 1;
        } else if outcome.is_skipped() {
            self.skipped += 1;
        } else {
            self.failed += 1;
        }
        self.summaries.push(summary);
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn allowed(&self) -> usize {
        self.allowed
    }

    pub fn downloaded(&self) -> usize {
        self.downloaded
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Gets the destination root.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Gets every summary, in BFS order.
    pub fn summaries(&self) -> &[Summary] {
        &self.summaries
    }

    /// The last [`MESSAGE_TAIL`] per-item messages.
    pub fn messages(&self) -> Vec<String> {
        let skip = self.summaries.len().saturating_sub(MESSAGE_TAIL);
        self.summaries
            .iter()
            .skip(skip)
            .map(Summary::message)
            .collect()
    }
}

impl fmt::Display for DownloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Allowed files: {}/{} | Downloaded: {} | Skipped: {} | Failed: {}\nSaved to: {}",
            self.allowed,
            self.total,
            self.downloaded,
            self.skipped,
            self.failed,
            self.destination.display()
        )?;
        for line in self.messages() {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchOutcome;

    fn summary(i: usize, outcome: FetchOutcome) -> Summary {
        let url = Url::parse(&format!("http://example.com/{}.pdf", i)).unwrap();
        Summary::new(LeafResource::from_url(&url), PathBuf::from("out"), None, outcome)
    }

    #[test]
    fn test_download_report_counts() {
        let mut report = DownloadReport::new(4, 3, PathBuf::from("out"));
        report.record(summary(0, FetchOutcome::Downloaded(10)));
        report.record(summary(1, FetchOutcome::SkippedLimitExceededMidTransfer));
        report.record(summary(2, FetchOutcome::Failed("reset".into())));

        assert_eq!(
            (report.downloaded(), report.skipped(), report.failed()),
            (1, 1, 1)
        );
        assert_eq!(
            report.to_string(),
            "Allowed files: 3/4 | Downloaded: 1 | Skipped: 1 | Failed: 1\nSaved to: out\n\
             OK 0.pdf (10 B)\nSKIP exceeded limit: 1.pdf\nFAIL 2.pdf: reset"
        );
    }

    #[test]
    fn test_message_tail_is_bounded() {
        let mut report = DownloadReport::new(60, 60, PathBuf::from("out"));
        for i in 0..60 {
            report.record(summary(i, FetchOutcome::Downloaded(1)));
        }
        let messages = report.messages();
        assert_eq!(messages.len(), MESSAGE_TAIL);
        assert_eq!(messages[0], "OK 10.pdf (1 B)");
        assert_eq!(report.summaries().len(), 60);
    }

    #[test]
    fn test_count_report_display() {
        let report = CountReport {
            total: 5,
            allowed: 4,
            extension: None,
            matching: 4,
            by_extension: vec![("pdf".into(), 3), ("zip".into(), 1)],
        };
        assert_eq!(report.to_string(), "Found 4 file(s)\n.pdf: 3\n.zip: 1");
    }
}
