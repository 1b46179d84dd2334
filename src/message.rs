//! Coding of arbitrary-length byte messages as a sequence of SEC-DED codewords.
//!
//! A message is split into groups of 8 bytes, and each group is followed by its check
//! byte. A final group of fewer than 8 bytes is coded as if zero-padded to a full data
//! word, but the padding is never transmitted. Since every group carries exactly one
//! check byte, the decoded length is recovered from the encoded length alone.

use log::{debug, trace};
use num::Integer;

use crate::coding::secded;
use crate::consts::{CHECK_BYTES, CODEWORD_BYTES, DATA_BYTES};
use crate::error::{FecError, Result};
use crate::stats::DecodeStats;
use crate::util::div_ceil;

/// Options that control message decoding.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DecodeOptions {
    /// Whether to correct single bit errors. If disabled, data bytes are passed through
    /// as received, but each codeword is still checked and counted.
    pub correct: bool,
}

impl DecodeOptions {
    /// Options for passing data through without correction.
    pub fn lazy() -> Self {
        DecodeOptions { correct: false }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions { correct: true }
    }
}

/// A decoded message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Decoded {
    /// Decoded message bytes.
    pub data: Vec<u8>,
    /// Outcome of decoding each codeword.
    pub stats: DecodeStats,
}

impl Decoded {
    /// Length of the decoded message in bytes.
    pub fn len(&self) -> usize { self.data.len() }

    /// Check if the decoded message is empty.
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Number of codewords with a detected error, corrected or not.
    pub fn num_errors(&self) -> usize { self.stats.errors() }
}

/// Compute the encoded length of a message with the given length in bytes.
pub fn enc_length(len: usize) -> usize {
    len + div_ceil(len, DATA_BYTES) * CHECK_BYTES
}

/// Recover the original message length from the given encoded length.
///
/// Fail with `FecError::MalformedLength` if the final group would hold only a check
/// byte.
pub fn dec_length(len: usize) -> Result<usize> {
    let (groups, rem) = len.div_rem(&CODEWORD_BYTES);

    match rem {
        0 => Ok(groups * DATA_BYTES),
        1 => Err(FecError::MalformedLength(len)),
        _ => Ok(groups * DATA_BYTES + rem - CHECK_BYTES),
    }
}

/// Encode the given message.
pub fn encode(msg: &[u8]) -> Vec<u8> {
    let mut out = vec![0; enc_length(msg.len())];
    encode_groups(msg, &mut out);
    out
}

/// Encode the given message into the given buffer and return the encoded length.
///
/// Fail with `FecError::BufferTooSmall` if the buffer can't hold `enc_length(msg.len())`
/// bytes.
pub fn encode_into(msg: &[u8], out: &mut [u8]) -> Result<usize> {
    let len = enc_length(msg.len());
    let out = fit(out, len)?;

    encode_groups(msg, out);

    Ok(len)
}

/// Decode the given encoded message, correcting errors.
pub fn decode(enc: &[u8]) -> Result<Decoded> {
    decode_with(enc, DecodeOptions::default())
}

/// Decode the given encoded message using the given options.
pub fn decode_with(enc: &[u8], opts: DecodeOptions) -> Result<Decoded> {
    let mut data = vec![0; dec_length(enc.len())?];
    let stats = decode_groups(enc, &mut data, opts);

    Ok(Decoded { data, stats })
}

/// Decode the given encoded message into the given buffer.
///
/// On success, return `(len, stats)`, where `len` is the number of decoded bytes written
/// to the start of `out`.
pub fn decode_into(enc: &[u8], out: &mut [u8], opts: DecodeOptions)
    -> Result<(usize, DecodeStats)>
{
    let len = dec_length(enc.len())?;
    let out = fit(out, len)?;

    Ok((len, decode_groups(enc, out, opts)))
}

/// Get the first `len` bytes of the given buffer.
fn fit(buf: &mut [u8], len: usize) -> Result<&mut [u8]> {
    let have = buf.len();

    buf.get_mut(..len).ok_or(FecError::BufferTooSmall { need: len, have })
}

/// Encode each group of the message into the given buffer, which must be exactly the
/// encoded length.
fn encode_groups(msg: &[u8], out: &mut [u8]) {
    debug_assert_eq!(out.len(), enc_length(msg.len()));

    for (group, dest) in msg.chunks(DATA_BYTES).zip(out.chunks_mut(CODEWORD_BYTES)) {
        let n = group.len();

        let mut data = [0; DATA_BYTES];
        data[..n].copy_from_slice(group);

        dest[..n].copy_from_slice(group);
        dest[n] = secded::parity(&data);
    }
}

/// Decode each group of the encoded message into the given buffer, which must be exactly
/// the decoded length.
fn decode_groups(enc: &[u8], out: &mut [u8], opts: DecodeOptions) -> DecodeStats {
    let mut stats = DecodeStats::default();

    for (idx, (group, dest)) in enc.chunks(CODEWORD_BYTES)
        .zip(out.chunks_mut(DATA_BYTES))
        .enumerate()
    {
        let n = dest.len();
        debug_assert_eq!(group.len(), n + CHECK_BYTES);

        // Untransmitted padding is rebuilt as zeros.
        let mut word = [0; CODEWORD_BYTES];
        word[..n].copy_from_slice(&group[..n]);
        word[DATA_BYTES] = group[n];

        let (data, status) = if opts.correct {
            secded::decode(&word)
        } else {
            (secded::data_bytes(&word), secded::check(&word))
        };

        if status.is_err() {
            trace!("codeword {}: {:?}", idx, status);
        }

        dest.copy_from_slice(&data[..n]);
        stats.record(status);
    }

    debug!("decoded {} bytes from {} codewords: {} fixed, {} unrecoverable",
           out.len(), stats.words(), stats.fixed(), stats.unrecoverable());

    stats
}

#[cfg(test)]
mod test {
    use super::*;

    const TEXT: &[u8] = b"this is some text that is test data\n";

    #[test]
    fn test_lengths() {
        assert_eq!(enc_length(0), 0);
        assert_eq!(enc_length(1), 2);
        assert_eq!(enc_length(7), 8);
        assert_eq!(enc_length(8), 9);
        assert_eq!(enc_length(9), 11);
        assert_eq!(enc_length(16), 18);
        assert_eq!(enc_length(36), 41);
        assert_eq!(enc_length(37), 42);

        for n in 0..100 {
            assert_eq!(enc_length(n), n + n / 8 + if n % 8 != 0 { 1 } else { 0 });
            assert_eq!(dec_length(enc_length(n)), Ok(n));
        }

        assert_eq!(dec_length(1), Err(FecError::MalformedLength(1)));
        assert_eq!(dec_length(10), Err(FecError::MalformedLength(10)));
        assert_eq!(dec_length(19), Err(FecError::MalformedLength(19)));
    }

    #[test]
    fn test_empty() {
        assert_eq!(encode(&[]), Vec::<u8>::new());

        let d = decode(&[]).unwrap();
        assert!(d.is_empty());
        assert_eq!(d.num_errors(), 0);
        assert_eq!(d.stats.words(), 0);
    }

    #[test]
    fn test_groups() {
        let full = encode(b"abcdefgh");
        assert_eq!(full.len(), 9);
        assert_eq!(&full[..], &secded::encode(b"abcdefgh")[..]);

        // Short group carries only its own bytes plus the padded word's check byte.
        let short = encode(b"abcdefghi");
        assert_eq!(short.len(), 11);
        assert_eq!(&short[..9], &full[..]);
        assert_eq!(short[9], b'i');
        assert_eq!(short[10], secded::parity(b"i\0\0\0\0\0\0\0"));

        assert_eq!(decode(&full).unwrap().data, b"abcdefgh");
        assert_eq!(decode(&short).unwrap().data, b"abcdefghi");
    }

    #[test]
    fn test_roundtrip() {
        let msg: Vec<u8> = (0..200u32).map(|i| (i * 37 + 11) as u8).collect();

        for n in 0..msg.len() {
            let d = decode(&encode(&msg[..n])).unwrap();
            assert_eq!(d.data, &msg[..n]);
            assert_eq!(d.num_errors(), 0);
            assert_eq!(d.stats.words(), div_ceil(n, 8));
        }
    }

    #[test]
    fn test_scenario() {
        let mut msg = TEXT.to_vec();
        msg.insert(35, b'.');
        assert_eq!(msg.len(), 37);

        let mut enc = encode(&msg);
        assert_eq!(enc.len(), 42);

        enc[6] ^= 0x04;
        enc[14] ^= 0x20;
        enc[21] ^= 0x40;

        let d = decode(&enc).unwrap();
        assert_eq!(d.len(), 37);
        assert_eq!(d.data, msg);
        assert_eq!(d.num_errors(), 3);
        assert_eq!(d.stats.fixed(), 3);
    }

    #[test]
    fn test_double() {
        let mut enc = encode(TEXT);
        assert_eq!(enc.len(), 41);

        enc[6] ^= 0x04;
        enc[14] ^= 0x20;
        enc[21] ^= 0x41;

        let d = decode(&enc).unwrap();
        assert_eq!(d.len(), 36);
        assert_eq!(d.num_errors(), 3);
        assert_eq!(d.stats.fixed(), 2);
        assert_eq!(d.stats.unrecoverable(), 1);

        // Double error is passed through as received.
        assert_eq!(&d.data[..19], &TEXT[..19]);
        assert_eq!(d.data[19], b'h' ^ 0x41);
        assert_eq!(&d.data[20..], &TEXT[20..]);
    }

    #[test]
    fn test_lazy() {
        let mut enc = encode(TEXT);
        enc[6] ^= 0x04;

        let d = decode_with(&enc, DecodeOptions::lazy()).unwrap();
        assert_eq!(d.data[6], TEXT[6] ^ 0x04);
        assert_eq!(d.stats.fixed(), 1);
        assert_eq!(d.num_errors(), 1);

        let d = decode_with(&enc, DecodeOptions::default()).unwrap();
        assert_eq!(d.data, TEXT);
    }

    #[test]
    fn test_padding_error() {
        // Single data byte followed by its check byte.
        let mut enc = encode(b"z");
        assert_eq!(enc.len(), 2);

        // Corrupt the check byte with the syndrome of an error in the second (padding)
        // byte, which decodes as a fix to a byte that's never emitted.
        enc[1] ^= 0x0d;

        let d = decode(&enc).unwrap();
        assert_eq!(d.data, b"z");
        assert_eq!(d.num_errors(), 1);
    }

    #[test]
    fn test_malformed() {
        assert_eq!(decode(&[0]), Err(FecError::MalformedLength(1)));
        assert_eq!(decode(&[0; 10]), Err(FecError::MalformedLength(10)));
    }

    #[test]
    fn test_buffers() {
        let mut enc = [0; 64];
        assert_eq!(encode_into(TEXT, &mut enc), Ok(41));
        assert_eq!(&enc[..41], &encode(TEXT)[..]);

        let mut short = [0; 40];
        assert_eq!(encode_into(TEXT, &mut short),
                   Err(FecError::BufferTooSmall { need: 41, have: 40 }));

        let mut dec = [0; 36];
        let (len, stats) = decode_into(&enc[..41], &mut dec, DecodeOptions::default())
            .unwrap();
        assert_eq!(len, 36);
        assert_eq!(&dec[..], TEXT);
        assert_eq!(stats.errors(), 0);

        assert_eq!(decode_into(&enc[..41], &mut dec[..35], DecodeOptions::default()),
                   Err(FecError::BufferTooSmall { need: 36, have: 35 }));
    }
}
