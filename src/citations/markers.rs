//! Citation marker recognition inside generated answers.
//!
//! A marker is a maximal substring of the exact shape `[<digits>]`. The
//! splitter keeps markers as their own pieces and everything between them
//! verbatim, so concatenating the pieces reproduces the input.

use std::sync::LazyLock;

use regex::Regex;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\d+\]").unwrap());
static EXACT_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(\d+)\]$").unwrap());

/// Splits `answer` into alternating plain-text and marker pieces, in order.
///
/// Zero-length pieces (adjacent markers, a marker at either edge) are
/// dropped; nothing else is.
pub fn split_markers(answer: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut cursor = 0;
    for found in MARKER_RE.find_iter(answer) {
        if found.start() > cursor {
            pieces.push(&answer[cursor..found.start()]);
        }
        pieces.push(found.as_str());
        cursor = found.end();
    }
    if cursor < answer.len() {
        pieces.push(&answer[cursor..]);
    }
    pieces
}

/// Parses a piece that is exactly one marker, yielding its 1-based number.
///
/// Anything else returns `None`, including digit runs too large to
/// represent; callers keep such pieces as literal text.
pub fn marker_number(piece: &str) -> Option<usize> {
    let caps = EXACT_MARKER_RE.captures(piece)?;
    caps.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_markers_out_of_surrounding_text() {
        let pieces = split_markers("Stealing is punished. [1] Combat trials exist too.[2]");
        assert_eq!(
            pieces,
            vec![
                "Stealing is punished. ",
                "[1]",
                " Combat trials exist too.",
                "[2]",
            ]
        );
    }

    #[test]
    fn adjacent_markers_produce_no_empty_pieces() {
        assert_eq!(split_markers("[1][2]"), vec!["[1]", "[2]"]);
        assert_eq!(split_markers("[3]"), vec!["[3]"]);
    }

    #[test]
    fn concatenation_reproduces_the_input() {
        let answer = "a[1]b[12][3]c [x] [] [4.5] tail";
        assert_eq!(split_markers(answer).concat(), answer);
    }

    #[test]
    fn malformed_brackets_stay_in_plain_text() {
        assert_eq!(split_markers("see [] and [1a] here"), vec!["see [] and [1a] here"]);
    }

    #[test]
    fn nested_brackets_still_yield_the_inner_marker() {
        assert_eq!(split_markers("[[1]]"), vec!["[", "[1]", "]"]);
    }

    #[test]
    fn empty_input_yields_no_pieces() {
        assert!(split_markers("").is_empty());
    }

    #[test]
    fn marker_number_requires_the_exact_shape() {
        assert_eq!(marker_number("[1]"), Some(1));
        assert_eq!(marker_number("[42]"), Some(42));
        assert_eq!(marker_number("[0]"), Some(0));
        assert_eq!(marker_number(" [1]"), None);
        assert_eq!(marker_number("[1] "), None);
        assert_eq!(marker_number("[1a]"), None);
        assert_eq!(marker_number("[]"), None);
        assert_eq!(marker_number("plain"), None);
    }

    #[test]
    fn oversized_digit_runs_are_rejected() {
        assert_eq!(marker_number("[99999999999999999999999999]"), None);
    }
}
