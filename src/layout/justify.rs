//! Fixed-width justification primitives.
//!
//! Every width here is measured in characters, not bytes, because the MFD
//! renders one glyph per cell.

/// A run of `count` copies of `fill`. Non-positive counts yield an empty string.
#[must_use]
pub fn fill_chars(count: isize, fill: char) -> String {
    usize::try_from(count).map_or_else(|_| String::new(), |n| std::iter::repeat_n(fill, n).collect())
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Spread `segments` across `width` columns, padding the gaps with `fill`.
///
/// - Total length at or over `width`: the plain concatenation, never truncated.
/// - One segment: left-justified, padded on the right.
/// - Otherwise the padding is split evenly across the gaps and the remainder
///   goes to the rightmost gaps, one extra cell each.
#[must_use]
pub fn fill_between<S: AsRef<str>>(segments: &[S], width: usize, fill: char) -> String {
    let total: usize = segments.iter().map(|s| char_len(s.as_ref())).sum();
    let mut out = String::with_capacity(width.max(total));

    if total >= width || segments.is_empty() {
        for segment in segments {
            out.push_str(segment.as_ref());
        }
        return out;
    }

    let pad = width - total;
    let gaps = segments.len() - 1;
    if gaps == 0 {
        out.push_str(segments[0].as_ref());
        out.extend(std::iter::repeat_n(fill, pad));
        return out;
    }

    let base = pad / gaps;
    let extra = pad % gaps;
    for (idx, segment) in segments.iter().enumerate() {
        out.push_str(segment.as_ref());
        if idx < gaps {
            let widened = usize::from(idx >= gaps - extra);
            out.extend(std::iter::repeat_n(fill, base + widened));
        }
    }
    out
}

/// [`fill_between`] with single spaces.
#[must_use]
pub fn space_between<S: AsRef<str>>(segments: &[S], width: usize) -> String {
    fill_between(segments, width, ' ')
}

/// Center `text` in `width` columns using `fill`; the odd cell goes right.
#[must_use]
pub fn surround(text: &str, width: usize, fill: char) -> String {
    let len = char_len(text);
    if len >= width {
        return text.to_string();
    }
    let pad = width - len;
    let left = pad / 2;
    let right = pad - left;
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat_n(fill, left));
    out.push_str(text);
    out.extend(std::iter::repeat_n(fill, right));
    out
}

/// [`surround`] with spaces.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    surround(text, width, ' ')
}

/// `label`, then at least `min_gap` spaces, then `value`, filling `width` when it fits.
#[must_use]
pub fn right_justify(label: &str, value: &str, width: usize, min_gap: usize) -> String {
    let used = char_len(label) + char_len(value);
    let gap = width.saturating_sub(used).max(min_gap);
    let mut out = String::with_capacity(used + gap);
    out.push_str(label);
    out.extend(std::iter::repeat_n(' ', gap));
    out.push_str(value);
    out
}

/// Format an integer with `,` thousands separators.
#[must_use]
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (idx, digit) in digits.chars().enumerate() {
        if idx != 0 && idx % 3 == lead % 3 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

/// Credit amount as shown on the MFD, e.g. `1,234cr`.
#[must_use]
pub fn credits(value: i64) -> String {
    format!("{}cr", group_thousands(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn two_segments_split_evenly() {
        assert_eq!(space_between(&["Hello", "World"], 16), "Hello      World");
    }

    #[test]
    fn lopsided_segments_fill_single_gap() {
        assert_eq!(space_between(&["DST:", "CloseLand22"], 16), "DST: CloseLand22");
    }

    #[test]
    fn remainder_goes_to_rightmost_gaps() {
        assert_eq!(
            fill_between(&["J:2", "P:47", "X:4", "E:1"], 16, ' '),
            "J:2 P:47 X:4 E:1"
        );
        // 11 cells over 2 gaps: the right gap takes the odd one.
        assert_eq!(fill_between(&["a", "bb", "ccc"], 17, '.'), "a.....bb......ccc");
    }

    #[test]
    fn single_segment_is_left_justified() {
        assert_eq!(fill_between(&["CARGO"], 8, '#'), "CARGO###");
    }

    #[test]
    fn overflow_concatenates_without_truncation() {
        assert_eq!(
            space_between(&["Valuable Bodies:", "12,000,000cr"], 16),
            "Valuable Bodies:12,000,000cr"
        );
    }

    #[test]
    fn empty_segment_list_is_empty() {
        let none: [&str; 0] = [];
        assert_eq!(fill_between(&none, 16, ' '), "");
    }

    #[test]
    fn empty_trailing_segment_pushes_first_left() {
        assert_eq!(space_between(&["CLS:K", ""], 8), "CLS:K   ");
    }

    #[test]
    fn surround_biases_odd_cell_right() {
        assert_eq!(surround("abc", 8, '#'), "##abc###");
        assert_eq!(center("abcd", 8), "  abcd  ");
        assert_eq!(center("too long for it", 4), "too long for it");
    }

    #[test]
    fn fill_chars_handles_non_positive() {
        assert_eq!(fill_chars(3, '#'), "###");
        assert_eq!(fill_chars(0, '#'), "");
        assert_eq!(fill_chars(-4, '#'), "");
    }

    #[test]
    fn right_justify_respects_min_gap() {
        assert_eq!(right_justify("Gold", "12", 16, 1), "Gold          12");
        assert_eq!(
            right_justify("Sol ABCDEFGH 1", "123,456cr", 16, 1),
            "Sol ABCDEFGH 1 123,456cr"
        );
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_000), "-45,000");
        assert_eq!(credits(12_500), "12,500cr");
    }

    proptest! {
        #[test]
        fn fitting_segments_fill_exact_width(
            segments in prop::collection::vec("[a-zA-Z0-9:]{0,4}", 1..5),
            slack in 0usize..12,
        ) {
            let total: usize = segments.iter().map(String::len).sum();
            let width = total + slack;
            let out = fill_between(&segments, width, ' ');
            prop_assert_eq!(out.chars().count(), width);
        }

        #[test]
        fn overflowing_segments_concatenate(
            segments in prop::collection::vec("[a-z]{1,6}", 1..5),
        ) {
            let joined: String = segments.concat();
            let width = joined.len().saturating_sub(1);
            prop_assert_eq!(fill_between(&segments, width, '.'), joined);
        }

        #[test]
        fn gap_sizes_never_decrease_left_to_right(
            segments in prop::collection::vec("[a-z]{1,3}", 2..5),
            width in 12usize..24,
        ) {
            let out = fill_between(&segments, width, '.');
            let gaps: Vec<usize> = out
                .split(|c: char| c != '.')
                .filter(|run| !run.is_empty())
                .map(str::len)
                .collect();
            prop_assert!(gaps.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }
}
