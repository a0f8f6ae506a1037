// Checkpoint and basepoint tables
// Hard-coded (height, hash) anchors used to reject alternate history

use bitcoin::BlockHash;

/// An ordered table of hard-coded block anchors.
///
/// The same shape backs both the checkpoint table and the basepoint table;
/// the two are kept as independent fields on `ChainParams` because they feed
/// different validation paths. Heights are strictly increasing and height 0
/// (the genesis block) is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoints {
    entries: Vec<(u32, BlockHash)>,
}

impl Checkpoints {
    /// Build a table from (height, hash) pairs.
    ///
    /// Panics if the heights are not strictly increasing or if the table does
    /// not anchor height 0; a malformed table is a build defect, not a
    /// runtime condition.
    pub fn new(entries: Vec<(u32, BlockHash)>) -> Self {
        assert!(
            matches!(entries.first(), Some((0, _))),
            "checkpoint table must anchor height 0"
        );
        assert!(
            entries.windows(2).all(|pair| pair[0].0 < pair[1].0),
            "checkpoint heights must be strictly increasing"
        );
        Self { entries }
    }

    /// The recorded hash at `height`, if one exists.
    pub fn hash_at(&self, height: u32) -> Option<&BlockHash> {
        self.entries
            .binary_search_by_key(&height, |(h, _)| *h)
            .ok()
            .map(|idx| &self.entries[idx].1)
    }

    /// True if a block at `height` disagrees with a recorded anchor.
    /// Heights without an anchor never conflict.
    pub fn conflicts_with(&self, height: u32, hash: &BlockHash) -> bool {
        self.hash_at(height).is_some_and(|anchor| anchor != hash)
    }

    /// Height of the highest anchor in the table.
    pub fn highest(&self) -> u32 {
        // new() guarantees at least the height-0 entry
        self.entries.last().map(|(h, _)| *h).unwrap_or(0)
    }

    /// All anchors in ascending height order.
    pub fn entries(&self) -> &[(u32, BlockHash)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::hashes::Hash;

    fn hash(byte: u8) -> BlockHash {
        BlockHash::from_byte_array([byte; 32])
    }

    #[test]
    fn test_lookup_and_conflicts() {
        let table = Checkpoints::new(vec![(0, hash(1)), (100, hash(2))]);

        assert_eq!(table.hash_at(0), Some(&hash(1)));
        assert_eq!(table.hash_at(100), Some(&hash(2)));
        assert_eq!(table.hash_at(50), None);
        assert_eq!(table.highest(), 100);

        assert!(table.conflicts_with(100, &hash(9)));
        assert!(!table.conflicts_with(100, &hash(2)));
        // No anchor recorded, so nothing to disagree with
        assert!(!table.conflicts_with(50, &hash(9)));
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn test_rejects_unsorted_heights() {
        Checkpoints::new(vec![(0, hash(1)), (100, hash(2)), (100, hash(3))]);
    }

    #[test]
    #[should_panic(expected = "anchor height 0")]
    fn test_rejects_missing_genesis_entry() {
        Checkpoints::new(vec![(10, hash(1))]);
    }
}
