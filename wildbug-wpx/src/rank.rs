//! Adaptive order-1 byte-rank table.
//!
//! One move-to-front list per context byte. The context is the output byte
//! one pixel element behind the cursor, and the decoded code-table symbol is
//! the rank of the literal within that context's list.

const CONTEXTS: usize = 256;

/// 256 contexts of 256 ranked bytes each.
#[derive(Debug, Clone)]
pub struct RankTable {
    table: Box<[u8]>,
}

impl RankTable {
    /// Create the initial table.
    ///
    /// Context `i` starts as the descending byte run beginning at `0xFF - i`.
    pub fn new() -> Self {
        let mut table = vec![0u8; CONTEXTS * 256].into_boxed_slice();
        for (i, row) in table.chunks_exact_mut(256).enumerate() {
            for (j, slot) in row.iter_mut().enumerate() {
                *slot = 0xFFu8.wrapping_sub(i as u8).wrapping_sub(j as u8);
            }
        }
        Self { table }
    }

    /// Return the byte at `rank` in `context` and move it to the front.
    pub fn lookup_and_promote(&mut self, context: u8, rank: u8) -> u8 {
        let base = usize::from(context) * 256;
        let rank = usize::from(rank);
        let value = self.table[base + rank];

        if rank != 0 {
            self.table.copy_within(base..base + rank, base + 1);
            self.table[base] = value;
        }

        value
    }

    /// Rank of `byte` in `context`, without promoting it.
    pub fn rank_of(&self, context: u8, byte: u8) -> u8 {
        let base = usize::from(context) * 256;
        // Every row is a permutation of 0..=255.
        self.table[base..base + 256]
            .iter()
            .position(|&b| b == byte)
            .map_or(0, |pos| pos as u8)
    }
}

impl Default for RankTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_rows() {
        let table = RankTable::new();
        assert_eq!(&table.table[..3], &[0xFF, 0xFE, 0xFD]);
        assert_eq!(table.table[255], 0x00);
        // Context 1 starts one lower and wraps.
        assert_eq!(table.table[256], 0xFE);
        assert_eq!(table.table[511], 0xFF);
        assert_eq!(table.table[256 * 0x80], 0x7F);
    }

    #[test]
    fn test_rank_zero_does_not_move() {
        let mut table = RankTable::new();
        assert_eq!(table.lookup_and_promote(0, 0), 0xFF);
        assert_eq!(table.lookup_and_promote(0, 0), 0xFF);
        assert_eq!(table.lookup_and_promote(0, 1), 0xFE);
    }

    #[test]
    fn test_promote_to_front() {
        let mut table = RankTable::new();
        assert_eq!(table.lookup_and_promote(5, 10), 0xF0);
        assert_eq!(table.lookup_and_promote(5, 0), 0xF0);
        // The entries in front of it moved up by one.
        assert_eq!(table.lookup_and_promote(5, 1), 0xFA);
        assert_eq!(table.lookup_and_promote(5, 1), 0xF0);
    }

    #[test]
    fn test_contexts_are_independent() {
        let mut table = RankTable::new();
        table.lookup_and_promote(3, 200);
        assert_eq!(table.lookup_and_promote(4, 0), 0xFB);
        assert_eq!(table.rank_of(3, 0xFC), 1);
    }

    #[test]
    fn test_last_rank() {
        let mut table = RankTable::new();
        let value = table.lookup_and_promote(0, 255);
        assert_eq!(value, 0x00);
        assert_eq!(table.rank_of(0, 0x00), 0);
        assert_eq!(table.rank_of(0, 0x01), 255);
    }
}
