//! Decoding statistics.

use crate::coding::secded::Status;

/// Tracks the outcome of decoding each codeword in a message.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
pub struct DecodeStats {
    /// Total number of received codewords.
    words: usize,
    /// Number of codewords with a corrected bit error.
    fixed: usize,
    /// Number of codewords with an uncorrectable error.
    err: usize,
}

impl DecodeStats {
    /// Record the outcome of decoding a codeword.
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Clean => {}
            Status::Corrected => self.fixed += 1,
            Status::Uncorrectable => self.err += 1,
        }

        self.words += 1;
    }

    /// Merge in the stats from the given object and clear the other stats.
    pub fn merge(&mut self, other: &mut DecodeStats) {
        self.words += other.words;
        self.fixed += other.fixed;
        self.err += other.err;

        other.clear();
    }

    /// Clear all stats.
    pub fn clear(&mut self) {
        *self = DecodeStats::default();
    }

    /// Total number of received codewords.
    pub fn words(&self) -> usize { self.words }
    /// Number of codewords with a corrected bit error.
    pub fn fixed(&self) -> usize { self.fixed }
    /// Number of codewords with an uncorrectable error.
    pub fn unrecoverable(&self) -> usize { self.err }
    /// Number of codewords with any detected error, corrected or not.
    pub fn errors(&self) -> usize { self.fixed + self.err }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_record() {
        let mut s = DecodeStats::default();

        s.record(Status::Clean);
        s.record(Status::Corrected);
        s.record(Status::Corrected);
        s.record(Status::Uncorrectable);

        assert_eq!(s.words(), 4);
        assert_eq!(s.fixed(), 2);
        assert_eq!(s.unrecoverable(), 1);
        assert_eq!(s.errors(), 3);
    }

    #[test]
    fn test_merge() {
        let mut a = DecodeStats::default();
        let mut b = DecodeStats::default();

        a.record(Status::Corrected);
        b.record(Status::Clean);
        b.record(Status::Uncorrectable);

        a.merge(&mut b);

        assert_eq!(a.words(), 3);
        assert_eq!(a.errors(), 2);
        assert_eq!(b, DecodeStats::default());
    }
}
