//! Word wrapping of a status into platform-sized segments.
//!
//! Lengths are counted in Unicode scalar values.

/// Continuation marker appended to the first segment and prepended to the rest.
pub const ELLIPSIS: char = '\u{2026}';

/// Characters the lead message gives up when it carries an image.
pub const IMAGE_RESERVATION: usize = 25;

/// Room kept free in every wrapped segment for the continuation marker.
pub const CONTINUATION_RESERVE: usize = 2;

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Greedy wrap on whitespace. The first chunk is at most `first_width` long,
/// later ones at most `width`. Whitespace runs collapse to one space. A word
/// longer than the width is kept whole in a chunk of its own.
pub fn wrap_words(text: &str, first_width: usize, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = char_len(word);
        let limit = if chunks.is_empty() { first_width } else { width };

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= limit {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn mark_continuation(mut chunks: Vec<String>) -> Vec<String> {
    if chunks.len() < 2 {
        return chunks;
    }
    chunks[0].push(ELLIPSIS);
    for chunk in chunks.iter_mut().skip(1) {
        chunk.insert(0, ELLIPSIS);
    }
    chunks
}

/// Split `status` for a platform whose messages hold `budget` characters.
///
/// A blank status yields no segments.
pub fn segment_status(status: &str, budget: usize, has_image: bool) -> Vec<String> {
    if status.trim().is_empty() {
        return Vec::new();
    }
    let lead_budget = if has_image {
        budget.saturating_sub(IMAGE_RESERVATION)
    } else {
        budget
    };
    if char_len(status) <= lead_budget {
        return vec![status.to_string()];
    }

    let chunks = wrap_words(
        status,
        lead_budget.saturating_sub(CONTINUATION_RESERVE),
        budget.saturating_sub(CONTINUATION_RESERVE),
    );
    mark_continuation(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strip_markers(segment: &str) -> &str {
        let s = segment.strip_prefix(ELLIPSIS).unwrap_or(segment);
        s.strip_suffix(ELLIPSIS).unwrap_or(s)
    }

    #[test]
    fn short_status_is_one_untouched_segment() {
        let status = "Tweenies (s1e4) starting shortly!\n\u{201c}Bella bakes.\u{201d}";
        assert_eq!(segment_status(status, 280, false), vec![status.to_string()]);
    }

    #[test]
    fn status_at_exact_budget_is_not_split() {
        let status = "a".repeat(20);
        assert_eq!(segment_status(&status, 20, false).len(), 1);
    }

    #[test]
    fn long_status_gets_continuation_markers() {
        let status = "one two three four five six seven eight nine ten";
        let segments = segment_status(status, 20, false);
        assert!(segments.len() > 1);
        assert!(segments[0].ends_with(ELLIPSIS));
        assert!(!segments[0].starts_with(ELLIPSIS));
        for segment in &segments[1..] {
            assert!(segment.starts_with(ELLIPSIS));
            assert!(!segment.ends_with(ELLIPSIS));
        }
        for segment in &segments {
            assert!(char_len(segment) <= 20, "{:?} too long", segment);
        }
    }

    #[test]
    fn image_shrinks_only_the_lead_segment() {
        let status = "word ".repeat(20);
        let status = status.trim();
        assert_eq!(segment_status(status, 120, false).len(), 1);

        let segments = segment_status(status, 120, true);
        assert_eq!(segments.len(), 2);
        assert!(char_len(strip_markers(&segments[0])) <= 120 - IMAGE_RESERVATION - 2);
    }

    #[test]
    fn blank_status_has_no_segments() {
        assert!(segment_status(&" ".repeat(40), 30, false).is_empty());
        assert!(segment_status("", 30, true).is_empty());
        assert!(segment_status("\n\t ", 30, false).is_empty());
    }

    #[test]
    fn never_breaks_inside_a_word() {
        let chunks = wrap_words("tiny supercalifragilistic end", 10, 10);
        assert_eq!(chunks, vec!["tiny", "supercalifragilistic", "end"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let status = "\u{00e9}t\u{00e9} ".repeat(5);
        let status = status.trim();
        assert_eq!(char_len(status), 19);
        assert_eq!(segment_status(status, 19, false).len(), 1);
    }

    proptest! {
        #[test]
        fn wrapping_preserves_words_and_width(
            words in prop::collection::vec("[a-zA-Z0-9,.!]{1,12}", 1..80),
            budget in 20usize..300,
        ) {
            let status = words.join(" ");
            let segments = segment_status(&status, budget, false);

            let rejoined: Vec<String> = segments
                .iter()
                .flat_map(|s| strip_markers(s).split_whitespace().map(str::to_string).collect::<Vec<_>>())
                .collect();
            prop_assert_eq!(&rejoined, &words);

            if segments.len() > 1 {
                for segment in &segments {
                    prop_assert!(char_len(strip_markers(segment)) <= budget - CONTINUATION_RESERVE);
                }
            } else {
                prop_assert!(char_len(&segments[0]) <= budget);
            }
        }
    }
}
