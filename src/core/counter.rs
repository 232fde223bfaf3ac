//! A counter that owns its state explicitly

/// Signed counter starting at zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    count: i64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a given value
    pub fn starting_at(count: i64) -> Self {
        Self { count }
    }

    /// Add one and return the new value
    pub fn increment(&mut self) -> i64 {
        self.count += 1;
        self.count
    }

    /// Subtract one and return the new value
    pub fn decrement(&mut self) -> i64 {
        self.count -= 1;
        self.count
    }

    pub fn get(&self) -> i64 {
        self.count
    }
}
