//! Encoding and decoding of the (72, 64, 4) SEC-DED code.
//!
//! The code is the (71, 64, 3) Hamming code extended with an overall parity bit. Each
//! 64-bit data word is transmitted unchanged, followed by a check byte whose 7 LSBs
//! hold the Hamming parity and whose MSB holds the parity over the other 71 bits.
//!
//! Folding the overall parity into the parity matrix gives every column of the
//! parity-check matrix odd weight, so the parity of a syndrome's weight equals the
//! parity of the number of flipped bits. An odd-weight syndrome therefore locates a
//! single bit error, and a nonzero even-weight syndrome flags a double bit error.
//!
//! Codeword bits are numbered from the MSB of the first byte, so bits 0 to 63 are
//! the data bits and bits 64 to 71 are the check bits.

use binfield_matrix::matrix_mul;

use crate::consts::{CODEWORD_BITS, CODEWORD_BYTES, DATA_BYTES};

/// Outcome of decoding a single codeword.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
pub enum Status {
    /// No errors were detected.
    Clean,
    /// A single bit error was detected and corrected.
    Corrected,
    /// A double bit error was detected. The received data bytes are passed through
    /// uncorrected.
    Uncorrectable,
}

impl Status {
    /// Numeric class of the outcome: 0 for no error, 1 for a corrected error, and 2 for
    /// an uncorrectable error.
    pub fn class(&self) -> u8 {
        match *self {
            Status::Clean => 0,
            Status::Corrected => 1,
            Status::Uncorrectable => 2,
        }
    }

    /// Check if any error was detected in the codeword.
    pub fn is_err(&self) -> bool {
        *self != Status::Clean
    }
}

/// Compute the check byte for the given 8 data bytes.
pub fn parity(data: &[u8; DATA_BYTES]) -> u8 {
    check_bits(u64::from_be_bytes(*data))
}

/// Encode the given 8 data bytes into a 9-byte codeword.
pub fn encode(data: &[u8; DATA_BYTES]) -> [u8; CODEWORD_BYTES] {
    let mut word = [0; CODEWORD_BYTES];

    word[..DATA_BYTES].copy_from_slice(data);
    word[DATA_BYTES] = parity(data);

    word
}

/// Compute the syndrome of the given codeword, which is zero if and only if all parity
/// equations are satisfied.
pub fn syndrome(word: &[u8; CODEWORD_BYTES]) -> u8 {
    word[DATA_BYTES] ^ check_bits(data_word(word))
}

/// Classify the errors in the given codeword without correcting them.
pub fn check(word: &[u8; CODEWORD_BYTES]) -> Status {
    diagnose(syndrome(word)).0
}

/// Try to decode the given 9-byte codeword, correcting up to 1 bit error and detecting
/// up to 2.
///
/// Return `(data, status)`, where `data` is the 8 data bytes. If `status` is
/// `Status::Uncorrectable`, `data` holds the data bytes as received.
pub fn decode(word: &[u8; CODEWORD_BYTES]) -> ([u8; DATA_BYTES], Status) {
    let (status, loc) = diagnose(syndrome(word));

    let mut fixed = *word;

    if let Some(loc) = loc {
        flip(&mut fixed, loc);
    }

    (data_bytes(&fixed), status)
}

/// Extract the 8 data bytes of the given codeword.
pub fn data_bytes(word: &[u8; CODEWORD_BYTES]) -> [u8; DATA_BYTES] {
    data_word(word).to_be_bytes()
}

/// Flip the codeword bit at the given location.
pub fn flip(word: &mut [u8; CODEWORD_BYTES], loc: usize) {
    assert!(loc < CODEWORD_BITS);
    word[loc / 8] ^= 0x80u8 >> (loc % 8);
}

/// Classify the given syndrome and locate the bit in error, if correctable.
fn diagnose(s: u8) -> (Status, Option<usize>) {
    if s == 0 {
        return (Status::Clean, None);
    }

    // Even number of flipped bits.
    if s.count_ones() % 2 == 0 {
        return (Status::Uncorrectable, None);
    }

    // Odd-weight syndromes outside the table can only come from 3 or more errors.
    match LOCATIONS[s as usize] {
        NO_LOCATION => (Status::Uncorrectable, None),
        loc => (Status::Corrected, Some(loc as usize)),
    }
}

fn check_bits(data: u64) -> u8 {
    matrix_mul(data, PAR)
}

fn data_word(word: &[u8; CODEWORD_BYTES]) -> u64 {
    word[..DATA_BYTES]
        .iter()
        .fold(0, |w, &b| w << 8 | b as u64)
}

/// Parity matrix over the data word, with the first row generating the MSB of the check
/// byte.
const PAR: &[u64] = &[
    0xed3a65b4cb4b34e9,
    0x000000000000007f,
    0x0000003fffffff80,
    0x001fffc0007fff80,
    0x0fe03fc07f807f80,
    0x71e3c3c78787878f,
    0xb66cccd9999999b3,
    0xdab5556aaaaaaad5,
];

/// Syndrome produced by an error at each codeword bit location. The data columns are the
/// non-power-of-two Hamming positions 3 to 71, with the MSB set where needed to give
/// odd weight.
const SYNDROMES: [u8; CODEWORD_BITS] = [
    0x83, 0x85, 0x86, 0x07, 0x89, 0x8a, 0x0b, 0x8c,
    0x0d, 0x0e, 0x8f, 0x91, 0x92, 0x13, 0x94, 0x15,
    0x16, 0x97, 0x98, 0x19, 0x1a, 0x9b, 0x1c, 0x9d,
    0x9e, 0x1f, 0xa1, 0xa2, 0x23, 0xa4, 0x25, 0x26,
    0xa7, 0xa8, 0x29, 0x2a, 0xab, 0x2c, 0xad, 0xae,
    0x2f, 0xb0, 0x31, 0x32, 0xb3, 0x34, 0xb5, 0xb6,
    0x37, 0x38, 0xb9, 0xba, 0x3b, 0xbc, 0x3d, 0x3e,
    0xbf, 0xc1, 0xc2, 0x43, 0xc4, 0x45, 0x46, 0xc7,
    0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01,
];

/// Marks syndromes that don't correspond to any single bit error.
const NO_LOCATION: u8 = 0xff;

/// Maps 8-bit syndrome values to bit error locations.
static LOCATIONS: [u8; 256] = invert(&SYNDROMES);

const fn invert(syndromes: &[u8; CODEWORD_BITS]) -> [u8; 256] {
    let mut locs = [NO_LOCATION; 256];
    let mut loc = 0;

    while loc < CODEWORD_BITS {
        locs[syndromes[loc] as usize] = loc as u8;
        loc += 1;
    }

    locs
}
