//! Request fencing for views that fetch repeatedly.

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FenceToken(u64);

/// Issues monotonically increasing tokens; only the latest is current.
#[derive(Debug, Default)]
pub struct RequestFence {
    latest: u64,
}

impl RequestFence {
    #[must_use]
    pub const fn new() -> Self {
        Self { latest: 0 }
    }

    /// Issue a token, superseding every earlier one.
    pub const fn issue(&mut self) -> FenceToken {
        self.latest += 1;
        FenceToken(self.latest)
    }

    /// Whether `token` is the most recently issued.
    #[must_use]
    pub const fn is_current(&self, token: FenceToken) -> bool {
        token.0 == self.latest
    }
}
