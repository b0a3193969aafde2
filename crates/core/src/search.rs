//! Local full-text filter over an already-fetched chat history.
//!
//! Matching is a case-insensitive substring test against each record's
//! searchable text. Results preserve the input order — no relevance ranking —
//! and are truncated to the first `limit` matches scanning from the start of
//! the provided sequence. Callers decide what "start" means by pre-slicing
//! the history. Empty or whitespace-only queries are handled by the caller
//! (the engine is bypassed entirely); here they match nothing.

use crate::types::HistoryRecord;

/// A fragment of display text, marked if it is an occurrence of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub text: String,
    pub is_match: bool,
}

/// Filter `history` down to records whose searchable text contains `query`
/// case-insensitively, keeping relative order, at most `limit` results.
pub fn search<'a>(
    history: &'a [HistoryRecord],
    query: &str,
    limit: usize,
) -> Vec<&'a HistoryRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }
    history
        .iter()
        .filter(|record| record.searchable_text().to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

/// Split `text` into spans on case-insensitive occurrences of the literal
/// `query`, so the view can render matches distinctly without re-implementing
/// the match rule. With no occurrences (or an empty query) the whole text is
/// one unmatched span.
pub fn highlight(text: &str, query: &str) -> Vec<HighlightSpan> {
    let needle = query.trim().to_lowercase();
    if text.is_empty() {
        return Vec::new();
    }
    if needle.is_empty() {
        return vec![HighlightSpan {
            text: text.to_string(),
            is_match: false,
        }];
    }

    // Lowercasing can change byte and char counts, so matches are found in a
    // lowered copy and mapped back to byte ranges of the original text.
    let index = LoweredIndex::new(text);
    let mut spans = Vec::new();
    let mut cursor = 0usize;
    for (start, end) in index.occurrences(&needle) {
        if start > cursor {
            spans.push(HighlightSpan {
                text: text[cursor..start].to_string(),
                is_match: false,
            });
        }
        spans.push(HighlightSpan {
            text: text[start..end].to_string(),
            is_match: true,
        });
        cursor = end;
    }
    if cursor < text.len() {
        spans.push(HighlightSpan {
            text: text[cursor..].to_string(),
            is_match: false,
        });
    }
    spans
}

/// Lowercased view of a string with a byte-offset map back to the original.
struct LoweredIndex {
    lowered: String,
    /// For each char of `lowered`: (byte offset in `lowered`, byte range of
    /// the originating char in the original text).
    map: Vec<(usize, usize, usize)>,
}

impl LoweredIndex {
    fn new(text: &str) -> Self {
        let mut lowered = String::with_capacity(text.len());
        let mut map = Vec::new();
        for (orig_start, ch) in text.char_indices() {
            let orig_end = orig_start + ch.len_utf8();
            for lc in ch.to_lowercase() {
                map.push((lowered.len(), orig_start, orig_end));
                lowered.push(lc);
            }
        }
        Self { lowered, map }
    }

    /// Non-overlapping occurrences of `needle` (already lowercased) as byte
    /// ranges into the original text. A match boundary that falls inside a
    /// multi-char lowering expands to cover the whole originating char.
    fn occurrences(&self, needle: &str) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (pos, _) in self.lowered.match_indices(needle) {
            let last = pos + needle.len() - 1;
            let start = self.entry_at(pos).1;
            let end = self.entry_at(last).2;
            // Skip overlaps introduced by boundary expansion.
            if out.last().is_none_or(|&(_, prev_end)| start >= prev_end) {
                out.push((start, end));
            }
        }
        out
    }

    fn entry_at(&self, lowered_byte: usize) -> (usize, usize, usize) {
        match self
            .map
            .binary_search_by_key(&lowered_byte, |&(off, _, _)| off)
        {
            Ok(i) => self.map[i],
            Err(i) => self.map[i.saturating_sub(1)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentKind, HistoryRecord};

    fn record(sender: &str, text: &str, time: &str) -> HistoryRecord {
        HistoryRecord {
            sender: sender.to_string(),
            time: time.to_string(),
            text_body: text.to_string(),
            extracted_content: None,
            content_type: ContentKind::Text,
            local_resource_path: None,
        }
    }

    #[test]
    fn matches_case_insensitively_and_preserves_order() {
        let history = vec![
            record("A", "Hello World", "t1"),
            record("B", "goodbye", "t2"),
            record("C", "HELLO again", "t3"),
        ];
        let results = search(&history, "hello", 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].sender, "A");
        assert_eq!(results[1].sender, "C");
    }

    #[test]
    fn result_count_never_exceeds_limit() {
        let history: Vec<_> = (0..20).map(|i| record("A", "hit", &format!("t{i}"))).collect();
        assert_eq!(search(&history, "hit", 5).len(), 5);
        assert!(search(&history, "hit", 0).is_empty());
    }

    #[test]
    fn every_result_contains_the_query() {
        let history = vec![
            record("A", "alpha beta", "t1"),
            record("B", "gamma", "t2"),
            record("C", "BETA max", "t3"),
        ];
        for result in search(&history, "beta", 10) {
            assert!(result.searchable_text().to_lowercase().contains("beta"));
        }
    }

    #[test]
    fn extracted_content_is_searched_too() {
        let mut doc = record("A", "see attached", "t1");
        doc.extracted_content = Some("quarterly numbers".to_string());
        let history = vec![doc, record("B", "unrelated", "t2")];
        assert_eq!(search(&history, "quarterly", 10).len(), 1);
    }

    #[test]
    fn whitespace_only_query_matches_nothing() {
        let history = vec![record("A", "hello", "t1")];
        assert!(search(&history, "   ", 10).is_empty());
    }

    #[test]
    fn highlight_splits_hello_world_scenario() {
        let spans = highlight("hello world", "hello");
        assert_eq!(
            spans,
            vec![
                HighlightSpan {
                    text: "hello".to_string(),
                    is_match: true
                },
                HighlightSpan {
                    text: " world".to_string(),
                    is_match: false
                },
            ]
        );
    }

    #[test]
    fn highlight_marks_all_occurrences_regardless_of_case() {
        let spans = highlight("Abba and ABBA", "abba");
        let matched: Vec<_> = spans.iter().filter(|s| s.is_match).collect();
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].text, "Abba");
        assert_eq!(matched[1].text, "ABBA");
        let rebuilt: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(rebuilt, "Abba and ABBA");
    }

    #[test]
    fn highlight_without_match_returns_single_unmatched_span() {
        let spans = highlight("nothing here", "zzz");
        assert_eq!(spans.len(), 1);
        assert!(!spans[0].is_match);
    }

    #[test]
    fn highlight_handles_multibyte_text() {
        let spans = highlight("报告 Report 已发送", "report");
        let rebuilt: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(rebuilt, "报告 Report 已发送");
        assert!(spans.iter().any(|s| s.is_match && s.text == "Report"));
    }
}
