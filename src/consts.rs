/// Number of data bytes protected by each codeword.
pub const DATA_BYTES: usize = 8;
/// Number of check bytes following each group of data bytes.
pub const CHECK_BYTES: usize = 1;
/// Number of bytes in a full codeword.
pub const CODEWORD_BYTES: usize = DATA_BYTES + CHECK_BYTES;
/// Number of data bits in a codeword.
pub const DATA_BITS: usize = DATA_BYTES * 8;
/// Number of bits in a full codeword.
pub const CODEWORD_BITS: usize = CODEWORD_BYTES * 8;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validate_params() {
        assert_eq!(DATA_BITS, 64);
        assert_eq!(CODEWORD_BITS, 72);
        // The check byte must hold one bit per parity equation.
        assert_eq!(CHECK_BYTES * 8, CODEWORD_BITS - DATA_BITS);
    }
}
