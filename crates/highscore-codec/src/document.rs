use tracing::debug;

use crate::checksum::Checksummer;
use crate::entry::EntryCodec;
use crate::error::CodecError;

/// A line that was dropped while decoding a document.
#[derive(Debug, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number in the input.
    pub line_no: usize,
    /// The line after trimming.
    pub content: String,
    pub error: CodecError,
}

/// Result of decoding a document with per-line diagnostics.
#[derive(Debug)]
pub struct DocumentReport<E> {
    /// Valid records, in input order.
    pub entries: Vec<E>,
    pub rejected: Vec<RejectedLine>,
}

impl<E> DocumentReport<E> {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Strip line framing: a trailing `\r`/`\n` and surrounding ASCII spaces.
///
/// Other whitespace is part of the record and is left alone.
pub fn trim_line(raw: &str) -> &str {
    raw.trim_end_matches(&['\r', '\n'][..]).trim_matches(' ')
}

/// Encode records as newline-terminated lines, in order.
pub fn encode_document<'a, E, I>(entries: I, checksummer: &Checksummer) -> String
where
    E: EntryCodec + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.encode(checksummer));
        out.push('\n');
    }
    out
}

/// Decode a document, silently dropping lines that fail to decode.
///
/// Never fails: an empty or all-garbage input yields an empty vector.
pub fn decode_document<E: EntryCodec>(text: &str, checksummer: &Checksummer) -> Vec<E> {
    let report = inspect_document(text, checksummer);
    if !report.is_clean() {
        debug!(
            accepted = report.entries.len(),
            rejected = report.rejected.len(),
            "dropped invalid document lines"
        );
    }
    report.entries
}

/// Decode a document, keeping a record of every rejected line.
pub fn inspect_document<E: EntryCodec>(text: &str, checksummer: &Checksummer) -> DocumentReport<E> {
    let mut entries = Vec::new();
    let mut rejected = Vec::new();

    for (idx, raw) in text.split('\n').enumerate() {
        let line = trim_line(raw);
        if line.is_empty() {
            continue;
        }
        match E::decode(line, checksummer) {
            Ok(entry) => entries.push(entry),
            Err(error) => {
                debug!(line_no = idx + 1, %error, "skipping invalid line");
                rejected.push(RejectedLine {
                    line_no: idx + 1,
                    content: line.to_string(),
                    error,
                });
            }
        }
    }

    DocumentReport { entries, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use highscore_types::{LeaderboardEntry, PackEntry};

    const C: Checksummer = Checksummer::DEFAULT;

    fn lb(name: &str, score: i32) -> LeaderboardEntry {
        LeaderboardEntry::new(name, score).unwrap()
    }

    #[test]
    fn trim_line_only_strips_framing() {
        assert_eq!(trim_line("  abc \r\n"), "abc");
        assert_eq!(trim_line("abc\t"), "abc\t");
        assert_eq!(trim_line("abc\u{a0}\n"), "abc\u{a0}");
        assert_eq!(trim_line("\tabc"), "\tabc");
    }

    #[test]
    fn pack_text_with_trailing_tab_survives_document() {
        let entries = vec![PackEntry::new("tab\t").unwrap()];
        let doc = encode_document(&entries, &C);
        assert_eq!(decode_document::<PackEntry>(&doc, &C), entries);
    }

    #[test]
    fn encode_terminates_every_line() {
        let entries = vec![lb("a", 3), lb("b", 2)];
        let doc = encode_document(&entries, &C);
        assert_eq!(doc.lines().count(), 2);
        assert!(doc.ends_with('\n'));
        assert!(doc.starts_with("3~a~"));
    }

    #[test]
    fn empty_document() {
        let entries: Vec<LeaderboardEntry> = Vec::new();
        assert_eq!(encode_document(&entries, &C), "");
        assert!(decode_document::<LeaderboardEntry>("", &C).is_empty());
    }

    #[test]
    fn roundtrip_preserves_order() {
        let entries = vec![lb("c", 1), lb("a", 9), lb("b", 5)];
        let doc = encode_document(&entries, &C);
        assert_eq!(decode_document::<LeaderboardEntry>(&doc, &C), entries);
    }

    #[test]
    fn garbage_line_is_dropped() {
        let valid = lb("alice", 10).encode(&C);
        let doc = format!("{valid}\nthis is not an entry\n");
        let decoded = decode_document::<LeaderboardEntry>(&doc, &C);
        assert_eq!(decoded, vec![lb("alice", 10)]);
    }

    #[test]
    fn whitespace_and_blank_lines_are_tolerated() {
        let a = lb("alice", 10).encode(&C);
        let b = lb("bob", 5).encode(&C);
        let doc = format!("\n   {a}  \r\n\n{b}");
        let decoded = decode_document::<LeaderboardEntry>(&doc, &C);
        assert_eq!(decoded, vec![lb("alice", 10), lb("bob", 5)]);
    }

    #[test]
    fn all_invalid_yields_empty() {
        let doc = "1~a~2\nxyz\n~~\n";
        assert!(decode_document::<LeaderboardEntry>(doc, &C).is_empty());
    }

    #[test]
    fn inspect_reports_line_numbers() {
        let good = PackEntry::new("hi").unwrap();
        let doc = format!("{}\n\nbroken\n", good.encode(&C));
        let report = inspect_document::<PackEntry>(&doc, &C);
        assert_eq!(report.entries, vec![good]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].line_no, 3);
        assert_eq!(report.rejected[0].content, "broken");
        assert!(!report.is_clean());
    }

    #[test]
    fn pack_lines_do_not_decode_as_leaderboard() {
        let doc = encode_document(&[PackEntry::new("text").unwrap()], &C);
        assert!(decode_document::<LeaderboardEntry>(&doc, &C).is_empty());
    }
}
