use std::collections::VecDeque;

use scree_blocks::MaterialId;
use scree_geom::BlockPos;

/// A deferred rendering operation. FIFO application order is the contract:
/// the latest op enqueued for a coordinate decides its final visual state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingOp {
    Show(BlockPos, MaterialId),
    Hide(BlockPos),
}

impl PendingOp {
    #[inline]
    pub fn pos(&self) -> BlockPos {
        match self {
            PendingOp::Show(pos, _) => *pos,
            PendingOp::Hide(pos) => *pos,
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct DeferredQueue {
    ops: VecDeque<PendingOp>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self {
            ops: VecDeque::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, op: PendingOp) {
        self.ops.push_back(op);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<PendingOp> {
        self.ops.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
