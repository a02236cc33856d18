//! Ordering for asynchronous render completions.
//!
//! Every text change issues a new [`RequestId`]. Conversions may finish in
//! any order; only the completion carrying the latest id is applied.

/// Identifier of one render request. Ids increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RenderSequencer {
    latest: u64,
}

impl RenderSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestId {
        self.latest += 1;
        RequestId(self.latest)
    }

    /// Whether `id` is the most recently issued request.
    pub fn is_current(&self, id: RequestId) -> bool {
        id.0 == self.latest
    }
}
