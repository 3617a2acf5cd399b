use crate::Symbol;

/// Number of bits in a basic block of an `IntBuf`.
pub(crate) const BASIC_BLOCK_SIZE: u32 = u64::BITS;

/// Power of 2 of the basic block size.
pub(crate) const BASIC_BLOCK_BITS: u32 = BASIC_BLOCK_SIZE.ilog2();

/// Block index of the block containing the `n`-th bit
pub(crate) const fn basic_block_index(n: usize) -> usize {
    n >> BASIC_BLOCK_BITS
}

/// Bit index of the `n`-th bit within its block (masking off the high bits)
pub(crate) const fn basic_block_offset(n: usize) -> u32 {
    (n & (BASIC_BLOCK_SIZE as usize - 1)) as u32
}

/// Return a block with the low `n` bits set.
pub(crate) fn one_mask(n: u32) -> u64 {
    debug_assert!(n <= BASIC_BLOCK_SIZE);
    if n == 0 {
        0
    } else {
        u64::MAX >> (BASIC_BLOCK_SIZE - n)
    }
}

/// Number of bits needed to represent every value in `0..=n`.
/// Zero needs zero bits, since a buffer of zero-width values can only hold zeros.
pub(crate) const fn bit_width(n: usize) -> u32 {
    usize::BITS - n.leading_zeros()
}

/// Split point of the closed symbol interval `[low, high]`, rounding towards `low`.
/// Symbols `<= midpoint` belong to the lower half.
///
/// Computed in 64 bits so that spans covering the entire `i32` range do not overflow.
pub(crate) fn midpoint(low: Symbol, high: Symbol) -> Symbol {
    debug_assert!(low <= high);
    let (low, high) = (i64::from(low), i64::from(high));
    // the result lies in [low, high], so the narrowing cast is lossless
    (low + (high - low) / 2) as Symbol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_mask() {
        for n in 0..64 {
            assert_eq!(one_mask(n), 2u64.pow(n) - 1);
        }
        assert_eq!(one_mask(64), u64::MAX);
    }

    #[test]
    fn test_bit_width() {
        assert_eq!(bit_width(0), 0);
        assert_eq!(bit_width(1), 1);
        assert_eq!(bit_width(2), 2);
        assert_eq!(bit_width(3), 2);
        assert_eq!(bit_width(4), 3);
        assert_eq!(bit_width(255), 8);
        assert_eq!(bit_width(256), 9);
        assert_eq!(bit_width(usize::MAX), usize::BITS);
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(midpoint(1, 3), 2);
        assert_eq!(midpoint(1, 2), 1);
        assert_eq!(midpoint(5, 5), 5);

        // rounds towards low, also for negative spans
        assert_eq!(midpoint(-3, 0), -2);
        assert_eq!(midpoint(-4, -1), -3);
        assert_eq!(midpoint(-1, 0), -1);

        // full range does not overflow
        assert_eq!(midpoint(Symbol::MIN, Symbol::MAX), -1);
        assert_eq!(midpoint(Symbol::MAX - 1, Symbol::MAX), Symbol::MAX - 1);
    }

    #[test]
    fn test_block_index_and_offset() {
        // zero should always be zero
        assert_eq!(basic_block_index(0), 0);
        assert_eq!(basic_block_offset(0), 0);

        // values less than a block size should map to the 0th block
        assert_eq!(basic_block_index(15), 0);
        assert_eq!(basic_block_index(63), 0);
        assert_eq!(basic_block_offset(63), 63);

        // multiples of the block size start a new block
        assert_eq!(basic_block_index(64), 1);
        assert_eq!(basic_block_offset(64), 0);
        assert_eq!(basic_block_index(2 * 64 + 31), 2);
        assert_eq!(basic_block_offset(2 * 64 + 31), 31);
    }
}
