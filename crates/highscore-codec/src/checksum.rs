use highscore_types::{LeaderboardEntry, PackEntry};

use crate::error::{CodecError, CodecResult};

/// Secret-seeded, non-cryptographic checksum over an entry's fields.
///
/// The accumulator starts at the secret. For a leaderboard entry it is first
/// multiplied by the score (sign-extended to 64 bits), then every byte of the
/// name is folded in with `acc = acc * 33 + byte`. A pack entry skips the
/// score step and folds its text. All arithmetic wraps modulo 2^64.
///
/// The formula is part of the storage format: documents written by one build
/// must verify in another build that shares the secret.
///
/// The secret must be odd. Multiplying by an even secret loses the high bits
/// of the score (and zero loses all of them), so distinct scores would share
/// a checksum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checksummer {
    secret: u64,
}

impl Checksummer {
    /// Secret used when none is configured.
    pub const DEFAULT_SECRET: u64 = 0x2545_F491_4F6C_DD1D;

    /// Checksummer seeded with [`Self::DEFAULT_SECRET`].
    pub const DEFAULT: Self = Self {
        secret: Self::DEFAULT_SECRET,
    };

    /// Checksummer for a configured secret. Even secrets (including zero)
    /// are rejected.
    pub fn new(secret: u64) -> CodecResult<Self> {
        if secret % 2 == 0 {
            return Err(CodecError::WeakSecret { secret });
        }
        Ok(Self { secret })
    }

    pub fn secret(&self) -> u64 {
        self.secret
    }

    /// Checksum of a leaderboard entry (score, then name).
    pub fn leaderboard(&self, entry: &LeaderboardEntry) -> u64 {
        let acc = self.secret.wrapping_mul(i64::from(entry.score()) as u64);
        fold(acc, entry.name().as_bytes())
    }

    /// Checksum of a pack entry (text only).
    pub fn pack(&self, entry: &PackEntry) -> u64 {
        fold(self.secret, entry.text().as_bytes())
    }
}

impl Default for Checksummer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn fold(acc: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(acc, |acc, &b| acc.wrapping_mul(33).wrapping_add(u64::from(b)))
}
