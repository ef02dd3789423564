use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies an expanded ledger in a search run's trace arena.
    pub struct LedgerId;
}

/// Identifies a resource kind in the catalog. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub u32);

/// Identifies a producer type in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProducerId(pub u32);

/// A key drawn from a closed, densely numbered set.
///
/// Implemented by the catalog ids so that [`Counter`](crate::counter::Counter)
/// can store one cell per key in declaration order.
pub trait DenseKey: Copy + Eq {
    fn index(self) -> usize;
    fn from_index(index: usize) -> Self;
}

impl DenseKey for ResourceId {
    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(index: usize) -> Self {
        ResourceId(index as u32)
    }
}

impl DenseKey for ProducerId {
    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(index: usize) -> Self {
        ProducerId(index as u32)
    }
}
