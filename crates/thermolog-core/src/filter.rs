//! Line filter: picks the record-shaped lines out of raw console text.
//!
//! The box's serial console interleaves JSON records with boot banners and
//! debug chatter. A line is kept iff it looks like a complete JSON object
//! (`{` ... `}`); everything else is dropped without comment. Whether a kept
//! line actually decodes is the decoder's business, not ours.

/// One retained line of log text, borrowed from the in-memory source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// 1-based line number in the source text, for error reporting.
    pub number: usize,
    pub text: &'a str,
}

/// The record-shape predicate: a non-empty line spanning `{` to `}`.
pub fn is_record_shaped(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('{') && line.ends_with('}')
}

/// Lazily yield the record-shaped lines of `text` in original order.
///
/// The iterator borrows `text`, so filtering is restartable: call again to
/// walk the same lines a second time (the export sink and the decoder each
/// take their own pass).
pub fn record_lines(text: &str) -> impl Iterator<Item = RawLine<'_>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| is_record_shaped(line))
        .map(|(i, line)| RawLine {
            number: i + 1,
            text: line,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOISY: &str = "\
Temperated Box v2.1 booting...
{\"ms\":1000,\"sensors\":[{\"sensor00\":20.0,\"sensor01\":21.0}],\"sensorMean\":20.5,\"fan\":127,\"heatingElement\":0}
calibrating fan PWM
{\"ms\":2000,\"sensors\":[{\"sensor00\":20.1,\"sensor01\":21.1}],\"sensorMean\":20.6,\"fan\":127,\"heatingElement\":0}

{not quite json but shaped}";

    #[test]
    fn keeps_only_brace_delimited_lines() {
        let kept: Vec<_> = record_lines(NOISY).collect();
        assert_eq!(kept.len(), 3);
        for line in &kept {
            assert!(is_record_shaped(line.text));
        }
    }

    #[test]
    fn preserves_order_and_line_numbers() {
        let kept: Vec<_> = record_lines(NOISY).collect();
        assert_eq!(kept[0].number, 2);
        assert_eq!(kept[1].number, 4);
        assert_eq!(kept[2].number, 6);
    }

    #[test]
    fn output_never_longer_than_input() {
        for text in [NOISY, "", "plain\nlines\nonly", "{}\n{}\n{}"] {
            let lines = text.lines().count();
            assert!(record_lines(text).count() <= lines);
        }
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert_eq!(record_lines("").count(), 0);
    }

    #[test]
    fn restartable_over_the_same_text() {
        let first: Vec<_> = record_lines(NOISY).collect();
        let second: Vec<_> = record_lines(NOISY).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn shape_predicate_edge_cases() {
        assert!(is_record_shaped("{}"));
        assert!(is_record_shaped("{\"a\":1}"));
        assert!(!is_record_shaped("{"));
        assert!(!is_record_shaped("}"));
        assert!(!is_record_shaped(""));
        assert!(!is_record_shaped("  {\"a\":1}"));
        assert!(!is_record_shaped("{\"a\":1} "));
    }

    #[test]
    fn crlf_lines_are_still_matched() {
        // str::lines strips the \r, so CRLF logs filter the same as LF logs.
        let text = "{\"a\":1}\r\nnoise\r\n{\"b\":2}\r\n";
        assert_eq!(record_lines(text).count(), 2);
    }
}
