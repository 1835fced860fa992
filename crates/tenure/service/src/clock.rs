use std::sync::atomic::{AtomicU64, Ordering};

use tenure_types::BlockHeight;

/// Source of the height every call is stamped with.
#[derive(Debug)]
pub struct BlockClock {
    height: AtomicU64,
}

impl BlockClock {
    pub fn new(genesis: BlockHeight) -> Self {
        Self {
            height: AtomicU64::new(genesis.get()),
        }
    }

    pub fn current(&self) -> BlockHeight {
        BlockHeight(self.height.load(Ordering::SeqCst))
    }

    /// Move forward by `blocks` and return the new height.
    ///
    /// Saturates at `u64::MAX`; the height never wraps.
    pub fn advance(&self, blocks: u64) -> BlockHeight {
        let previous = self
            .height
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |height| {
                Some(height.saturating_add(blocks))
            })
            .unwrap_or_else(|height| height);
        BlockHeight(previous.saturating_add(blocks))
    }

    pub fn tick(&self) -> BlockHeight {
        self.advance(1)
    }
}

impl Default for BlockClock {
    fn default() -> Self {
        Self::new(BlockHeight::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_advances_monotonically() {
        let clock = BlockClock::new(BlockHeight(123));
        assert_eq!(clock.current(), BlockHeight(123));
        assert_eq!(clock.tick(), BlockHeight(124));
        assert_eq!(clock.advance(30), BlockHeight(154));
        assert_eq!(clock.current(), BlockHeight(154));
    }

    #[test]
    fn clock_saturates_instead_of_wrapping() {
        let clock = BlockClock::new(BlockHeight(u64::MAX - 1));
        assert_eq!(clock.advance(5), BlockHeight(u64::MAX));
        assert_eq!(clock.current(), BlockHeight(u64::MAX));
        assert_eq!(clock.tick(), BlockHeight(u64::MAX));
        assert_eq!(clock.current(), BlockHeight(u64::MAX));
    }
}
