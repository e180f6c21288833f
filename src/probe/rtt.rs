//! Round-trip time extraction from probe output.

use std::sync::LazyLock;

use regex::Regex;

static TIME_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"time=(\d+(?:\.\d+)?)").expect("time pattern is a valid regex"));

/// Returns the first `time=<ms>` value in `output`.
///
/// `time<1 ms` style sub-millisecond reports and missing fields give `None`.
pub fn parse_rtt(output: &str) -> Option<f64> {
    TIME_FIELD
        .captures(output)
        .and_then(|captures| captures[1].parse().ok())
}
