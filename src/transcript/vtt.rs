//! WebVTT to plain text.

use regex::Regex;
use std::sync::OnceLock;

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}:\d{2}:\d{2}\.\d{3} -->").expect("Invalid regex"))
}

/// Decode subtitle bytes as UTF-8, dropping invalid sequences.
pub fn decode_subtitles(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect()
}

/// Strip header, cue indices and timing lines from a subtitle document.
///
/// Remaining non-empty lines are trimmed and joined with newlines.
pub fn normalize(raw: &str) -> String {
    let timestamp = timestamp_regex();

    raw.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty()
                || trimmed.starts_with("WEBVTT")
                || trimmed.chars().all(|c| c.is_ascii_digit())
                || timestamp.is_match(line)
            {
                None
            } else {
                Some(trimmed)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_header_index_and_timing() {
        let doc = "WEBVTT\n\n1\n00:00:00.000 --> 00:00:02.500\nFirst line\n\nSecond line\n";
        assert_eq!(normalize(doc), "First line\nSecond line");
    }

    #[test]
    fn test_dropped_line_order_does_not_matter() {
        let orders = [
            "WEBVTT\n1\n00:00:01.000 --> 00:00:02.000\nalpha\nbeta",
            "1\n00:00:01.000 --> 00:00:02.000\nWEBVTT\nalpha\nbeta",
            "00:00:01.000 --> 00:00:02.000\nalpha\n1\nWEBVTT\nbeta",
            "alpha\nWEBVTT\nbeta\n00:00:01.000 --> 00:00:02.000\n1",
        ];
        for doc in orders {
            assert_eq!(normalize(doc), "alpha\nbeta", "input: {:?}", doc);
        }
    }

    #[test]
    fn test_trims_kept_lines() {
        let doc = "WEBVTT Kind: captions\r\n\r\n   spaced out   \r\n\ttabbed\t\r\n";
        assert_eq!(normalize(doc), "spaced out\ntabbed");
    }

    #[test]
    fn test_timing_with_cue_settings() {
        let doc = "WEBVTT\n\n00:01:02.003 --> 00:01:04.000 align:start position:0%\nspoken text";
        assert_eq!(normalize(doc), "spoken text");
    }

    #[test]
    fn test_numbers_inside_text_are_kept() {
        let doc = "WEBVTT\n\n2\n00:00:03.000 --> 00:00:04.000\nproblem 5 of 2024\n42 is the answer";
        assert_eq!(normalize(doc), "problem 5 of 2024\n42 is the answer");
    }

    #[test]
    fn test_decode_drops_invalid_bytes() {
        let raw = b"WEBVTT\n\nna\xffive caf\xc3\xa9\n";
        assert_eq!(decode_subtitles(raw), "WEBVTT\n\nnaive caf\u{e9}\n");
        assert_eq!(normalize(&decode_subtitles(raw)), "naive caf\u{e9}");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("WEBVTT\n\n"), "");
    }
}
