use crate::bits::{basic_block_index, basic_block_offset, one_mask, BASIC_BLOCK_SIZE};

/// Fixed-size buffer of fixed-width integers. Designed to be written once and read many times.
/// A newly constructed IntBuf will have the specified length and all elements will be initialized to zero.
/// Elements can be added by pushing them onto the vector, which will add that element from the front at the lowest available index.
/// In typical use, the vector will be initialized and then precisely `length` elements will be pushed.
#[derive(Debug, Clone)]
pub(crate) struct IntBuf {
    blocks: Box<[u64]>,
    length: usize,
    bit_width: u32,
    low_bit_mask: u64,
    write_cursor: usize, // in bits
}

impl IntBuf {
    pub(crate) fn new(length: usize, bit_width: u32) -> Self {
        // The bit width cannot exceed BASIC_BLOCK_SIZE, since then a
        // single value could span more than two contiguous blocks and
        // our algorithms assume this cannot happen.
        assert!(bit_width <= BASIC_BLOCK_SIZE);

        let length_in_bits = length * bit_width as usize;
        let num_blocks = length_in_bits.div_ceil(BASIC_BLOCK_SIZE as usize);
        Self {
            blocks: vec![0; num_blocks].into(),
            length,
            bit_width,
            low_bit_mask: one_mask(bit_width),
            write_cursor: 0,
        }
    }

    /// Push a value into the IntBuf.
    /// Will panic if there is no room to store the value.
    /// Note that as a special case, this means that any number of
    /// zeros can be pushed to a IntBuf with bit width zero.
    pub(crate) fn push(&mut self, value: u64) {
        assert!(
            value <= self.low_bit_mask,
            "value {} does not fit in {} bits",
            value,
            self.bit_width
        );
        // If we have zero bit width, only allow writing zeros (and there's no need to write them!)
        if self.bit_width == 0 {
            return;
        }
        let index = basic_block_index(self.write_cursor);
        let offset = basic_block_offset(self.write_cursor);
        self.blocks[index] |= value << offset;

        // Number of bits available in the current block
        let num_available_bits = BASIC_BLOCK_SIZE - offset;

        // If needed, write any remaining bits into the next block.
        if num_available_bits < self.bit_width {
            self.blocks[index + 1] = value >> num_available_bits;
        }
        self.write_cursor += self.bit_width as usize;
    }

    pub(crate) fn get(&self, index: usize) -> u64 {
        assert!(
            index < self.length,
            "index {} out of bounds for length {}",
            index,
            self.length
        );

        // If the bit width is zero, our vector is entirely full of zeros.
        if self.bit_width == 0 {
            return 0;
        }

        let bit_index = index * self.bit_width as usize;
        let block_index = basic_block_index(bit_index);
        let offset = basic_block_offset(bit_index);

        let mut value = self.blocks[block_index] >> offset;

        // Number of bits available in the current block
        let num_available_bits = BASIC_BLOCK_SIZE - offset;

        // If needed, extract the remaining bits from the bottom of the next block
        if num_available_bits < self.bit_width {
            value |= self.blocks[block_index + 1] << num_available_bits;
        }

        value & self.low_bit_mask
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panics;

    #[test]
    fn test_intbuf() {
        // every bit width, with enough values to straddle several block boundaries
        for bit_width in 1..=BASIC_BLOCK_SIZE {
            let length = 200;
            let mask = one_mask(bit_width);
            let values: Vec<u64> = (0..length as u64)
                .map(|i| i.wrapping_mul(0x9e37_79b9_7f4a_7c15) & mask)
                .collect();
            let mut buf = IntBuf::new(length, bit_width);
            for &v in &values {
                buf.push(v);
            }
            assert_eq!(buf.len(), length);
            for (i, &v) in values.iter().enumerate() {
                assert_eq!(buf.get(i), v, "bit_width {} index {}", bit_width, i);
            }
        }
    }

    #[test]
    fn test_zero_width() {
        let mut buf = IntBuf::new(3, 0);
        buf.push(0);
        buf.push(0);
        buf.push(0);
        assert_eq!(buf.get(0), 0);
        assert_eq!(buf.get(2), 0);
    }

    #[test]
    fn test_panics() {
        {
            // value too wide
            let mut buf = IntBuf::new(4, 2);
            assert!(panics(move || buf.push(4)));
        }
        {
            // out of bounds
            let mut buf = IntBuf::new(1, 3);
            buf.push(5);
            assert!(panics(move || buf.get(1)));
        }
    }
}
