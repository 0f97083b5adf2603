use highscore_types::{
    LeaderboardEntry, PackEntry, DELIMITER, ENTRY_MAX_ENCODED_LEN, PACK_ENTRY_MAX_ENCODED_LEN,
};

use crate::checksum::Checksummer;
use crate::error::{CodecError, CodecResult};

/// Line codec for a single record.
pub trait EntryCodec: Sized {
    /// Upper bound of an encoded line, excluding the newline.
    const MAX_ENCODED_LEN: usize;

    /// Checksum of this record under the given secret.
    fn checksum(&self, checksummer: &Checksummer) -> u64;

    /// Encode to one line (no trailing newline). The checksum is always recomputed.
    fn encode(&self, checksummer: &Checksummer) -> String;

    /// Decode one line, verifying field bounds and the checksum.
    fn decode(line: &str, checksummer: &Checksummer) -> CodecResult<Self>;
}

impl EntryCodec for LeaderboardEntry {
    const MAX_ENCODED_LEN: usize = ENTRY_MAX_ENCODED_LEN;

    fn checksum(&self, checksummer: &Checksummer) -> u64 {
        checksummer.leaderboard(self)
    }

    fn encode(&self, checksummer: &Checksummer) -> String {
        format!(
            "{}{DELIMITER}{}{DELIMITER}{}",
            self.score(),
            self.name(),
            self.checksum(checksummer)
        )
    }

    fn decode(line: &str, checksummer: &Checksummer) -> CodecResult<Self> {
        let [score, name, checksum] = split_fields::<3>(line, Self::MAX_ENCODED_LEN)?;
        let score = parse_score(score)?;
        let entry = LeaderboardEntry::new(name, score)?;
        verify(entry, parse_checksum(checksum)?, checksummer)
    }
}

impl EntryCodec for PackEntry {
    const MAX_ENCODED_LEN: usize = PACK_ENTRY_MAX_ENCODED_LEN;

    fn checksum(&self, checksummer: &Checksummer) -> u64 {
        checksummer.pack(self)
    }

    fn encode(&self, checksummer: &Checksummer) -> String {
        format!("{}{DELIMITER}{}", self.checksum(checksummer), self.text())
    }

    fn decode(line: &str, checksummer: &Checksummer) -> CodecResult<Self> {
        let [checksum, text] = split_fields::<2>(line, Self::MAX_ENCODED_LEN)?;
        let stored = parse_checksum(checksum)?;
        let entry = PackEntry::new(text)?;
        verify(entry, stored, checksummer)
    }
}

fn verify<E: EntryCodec>(entry: E, stored: u64, checksummer: &Checksummer) -> CodecResult<E> {
    let computed = entry.checksum(checksummer);
    if computed != stored {
        return Err(CodecError::ChecksumMismatch { stored, computed });
    }
    Ok(entry)
}

/// Split a line into exactly `N` delimiter-separated fields.
fn split_fields<const N: usize>(line: &str, max_len: usize) -> CodecResult<[&str; N]> {
    if line.len() > max_len {
        return Err(CodecError::LineTooLong {
            len: line.len(),
            max: max_len,
        });
    }
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    let actual = fields.len();
    fields
        .try_into()
        .map_err(|_| CodecError::FieldCount { expected: N, actual })
}

/// Score field: optional `-` followed by decimal digits, nothing else.
fn parse_score(field: &str) -> CodecResult<i32> {
    let digits = field.strip_prefix('-').unwrap_or(field);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_number("score", field));
    }
    field.parse().map_err(|_| invalid_number("score", field))
}

/// Checksum field: decimal digits only.
fn parse_checksum(field: &str) -> CodecResult<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_number("checksum", field));
    }
    field.parse().map_err(|_| invalid_number("checksum", field))
}

fn invalid_number(field: &'static str, value: &str) -> CodecError {
    CodecError::InvalidNumber {
        field,
        value: value.to_string(),
    }
}
