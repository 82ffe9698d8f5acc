//! Human readable byte counts.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with 1024-based units.
///
/// Plain bytes are printed as an integer, larger units with two decimals.
///
/// ```rust
/// use spelunk::utils::human_bytes;
///
/// assert_eq!(human_bytes(512), "512 B");
/// assert_eq!(human_bytes(1536), "1.50 KB");
/// ```
pub fn human_bytes(n: u64) -> String {
    let mut value = n as f64;
    for (i, unit) in UNITS.iter().enumerate() {
        let last = i == UNITS.len() - 1;
        if value < 1024.0 || last {
            return if i == 0 {
                format!("{} {}", n, unit)
            } else {
                format!("{:.2} {}", value, unit)
            };
        }
        value /= 1024.0;
    }
    format!("{} B", n)
}
