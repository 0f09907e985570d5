//! Output sanitization: color-code stripping and line-ending normalization.

use std::sync::LazyLock;

use regex::Regex;

/// SGR color sequences removed by [`OutputSanitizer::strip_colors`].
///
/// Matches exactly:
/// - `ESC[<mode>;<class><color>m` with mode `0`-`5`, class `3` (foreground)
///   or `4` (background) and color `0`-`7`
/// - the bare reset `ESC[0m`
///
/// Every other escape sequence is left in place.
static COLOR_SEQUENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[(?:[0-5];[34][0-7]|0)m").expect("Invalid color sequence regex")
});

/// Same set, anchored at the end of the text.
static TRAILING_COLOR_SEQUENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[(?:[0-5];[34][0-7]|0)m$").expect("Invalid color sequence regex")
});

/// Longest sequence in the set, in bytes (`ESC[1;31m`).
const MAX_SEQUENCE_LEN: usize = 7;

/// Stateless helpers applied to captured process output.
pub struct OutputSanitizer;

impl OutputSanitizer {
    /// Remove the enumerated SGR color sequences from `input`.
    ///
    /// Removing one sequence can join its neighbours into a new one
    /// (`ESC[` + `ESC[0m` + `0;31m`); those are removed too. Characters
    /// are appended one by one and a sequence completed at the tail is cut
    /// at once, so the result never contains a strippable sequence and
    /// the function is idempotent. Runs in linear time.
    pub fn strip_colors(input: &str) -> String {
        let mut output = String::with_capacity(input.len());

        for c in input.chars() {
            output.push(c);
            // Every sequence ends with `m` and holds no other `m` or ESC,
            // so text before the tail never needs a second look
            if c != 'm' {
                continue;
            }

            let mut tail = output.len().saturating_sub(MAX_SEQUENCE_LEN);
            while !output.is_char_boundary(tail) {
                tail += 1;
            }
            if let Some(found) = TRAILING_COLOR_SEQUENCE_RE.find(&output[tail..]) {
                output.truncate(tail + found.start());
            }
        }

        output
    }

    /// Whether `input` contains at least one sequence [`strip_colors`](Self::strip_colors) removes.
    pub fn has_colors(input: &str) -> bool {
        COLOR_SEQUENCE_RE.is_match(input)
    }

    /// Replace every `\r\n` with `\n`. A lone `\r` is kept.
    pub fn normalize_line_endings(input: &str) -> String {
        input.replace("\r\n", "\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(OutputSanitizer::strip_colors("hello world"), "hello world");
    }

    #[test]
    fn test_strip_foreground_color() {
        let input = "\x1b[0;31mred\x1b[0m";
        assert_eq!(OutputSanitizer::strip_colors(input), "red");
    }

    #[test]
    fn test_strip_background_color() {
        let input = "\x1b[1;42mgreen background\x1b[0m";
        assert_eq!(OutputSanitizer::strip_colors(input), "green background");
    }

    #[test]
    fn test_unicode_escape_is_same_char() {
        let input = "\u{1b}[5;37mwhite\u{001b}[0m";
        assert_eq!(OutputSanitizer::strip_colors(input), "white");
    }

    #[test]
    fn test_every_enumerated_sequence_is_stripped() {
        for mode in 0..=5 {
            for class in [3, 4] {
                for color in 0..=7 {
                    let input = format!("a\x1b[{mode};{class}{color}mb");
                    assert_eq!(OutputSanitizer::strip_colors(&input), "ab", "{input:?}");
                }
            }
        }
    }

    #[test]
    fn test_other_sequences_untouched() {
        let inputs = [
            "\x1b[31mshort form",
            "\x1b[6;31mmode out of range",
            "\x1b[1;38mcolor out of range",
            "\x1b[1;51mclass out of range",
            "\x1b[1mbold",
            "\x1b[2J\x1b[Hcursor",
            "\x1b]0;title\x07",
            "[0;31mno escape",
        ];
        for input in inputs {
            assert_eq!(OutputSanitizer::strip_colors(input), input, "{input:?}");
        }
    }

    #[test]
    fn test_only_reset_removed_from_short_form() {
        assert_eq!(
            OutputSanitizer::strip_colors("\x1b[31mshort form\x1b[0m"),
            "\x1b[31mshort form"
        );
    }

    #[test]
    fn test_sequence_joined_by_removal_is_stripped() {
        assert_eq!(
            OutputSanitizer::strip_colors("\x1b[\x1b[0;32m0;31m nested"),
            " nested"
        );
    }

    #[test]
    fn test_deep_nesting_stripped_in_one_pass() {
        let depth = 20_000;
        let input = format!("before{}{}after", "\x1b[".repeat(depth), "0m".repeat(depth));

        let output = OutputSanitizer::strip_colors(&input);

        assert_eq!(output, "beforeafter");
        assert!(!OutputSanitizer::has_colors(&output));
    }

    #[test]
    fn test_non_ascii_text_around_sequences() {
        let input = "héllo \x1b[0;35mwörld\x1b[0m ✓ m";
        assert_eq!(OutputSanitizer::strip_colors(input), "héllo wörld ✓ m");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let inputs = [
            "\x1b[0;31mred\x1b[0m plain",
            "\x1b[\x1b[0;32m0;31m nested",
            "\x1b\x1b[0m[0m",
            "no colors at all",
            "",
        ];
        for input in inputs {
            let once = OutputSanitizer::strip_colors(input);
            let twice = OutputSanitizer::strip_colors(&once);
            assert_eq!(once, twice, "{input:?}");
        }
    }

    #[test]
    fn test_has_colors() {
        assert!(OutputSanitizer::has_colors("\x1b[0;34mblue"));
        assert!(OutputSanitizer::has_colors("reset\x1b[0m"));
        assert!(!OutputSanitizer::has_colors("\x1b[1mbold"));
        assert!(!OutputSanitizer::has_colors("plain"));
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(
            OutputSanitizer::normalize_line_endings("line1\r\nline2\r\n"),
            "line1\nline2\n"
        );
    }

    #[test]
    fn test_normalize_keeps_lone_carriage_return() {
        assert_eq!(
            OutputSanitizer::normalize_line_endings("progress\rdone\n"),
            "progress\rdone\n"
        );
    }

    #[test]
    fn test_normalize_unix_text_unchanged() {
        let input = "already\nunix\n";
        assert_eq!(OutputSanitizer::normalize_line_endings(input), input);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(OutputSanitizer::strip_colors(""), "");
        assert_eq!(OutputSanitizer::normalize_line_endings(""), "");
    }
}
