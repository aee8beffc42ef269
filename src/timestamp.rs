use crate::constants::{LABEL_FORMAT, TIMESTAMP_FORMATS};
use chrono::NaiveDateTime;

/// Derive a filename label from the first recognizable timestamp on a line.
///
/// The candidate is the text between the first `[` and the next `]`. Lines
/// without such a pair fall back to their leading text up to the first comma.
/// Returns `None` when no candidate exists or no known format parses it.
pub fn extract_label(line: &str) -> Option<String> {
    let candidate = timestamp_candidate(line)?;
    let moment = parse_timestamp(candidate)?;
    Some(moment.format(LABEL_FORMAT).to_string())
}

/// Parse a candidate with the first matching entry of [`TIMESTAMP_FORMATS`].
pub fn parse_timestamp(candidate: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(candidate, format).ok())
}

fn timestamp_candidate(line: &str) -> Option<&str> {
    if let Some(bracketed) = bracketed_segment(line) {
        return Some(bracketed);
    }
    let (leading, _) = line.trim_start().split_once(',')?;
    Some(leading)
}

fn bracketed_segment(line: &str) -> Option<&str> {
    let start = line.find('[')? + 1;
    let end = line[start..].find(']')? + start;
    Some(&line[start..end])
}
