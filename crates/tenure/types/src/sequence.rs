use serde::{Deserialize, Serialize};

use crate::{TenureError, TenureResult};

/// Monotonic id counter for one table.
///
/// Allocation is split in two so a caller can store the record under the
/// candidate id before persisting the counter. Ids are never handed out twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    last: u64,
}

impl Sequence {
    /// A counter that has issued nothing yet; the first id is 1.
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// A counter whose last issued id is `last`.
    pub const fn resume(last: u64) -> Self {
        Self { last }
    }

    /// Last id issued, 0 if none.
    pub const fn last(&self) -> u64 {
        self.last
    }

    /// Id the next allocation will use.
    pub fn peek_next(&self) -> TenureResult<u64> {
        self.last
            .checked_add(1)
            .ok_or(TenureError::SequenceExhausted)
    }

    /// Persist `id` as issued. Must be the value returned by `peek_next`.
    pub fn commit(&mut self, id: u64) {
        debug_assert_eq!(Ok(id), self.peek_next(), "sequence must advance by one");
        self.last = id;
    }

    /// Peek and commit in one step.
    pub fn advance(&mut self) -> TenureResult<u64> {
        let id = self.peek_next()?;
        self.commit(id);
        Ok(id)
    }
}
