//! Fresh-name allocation for synthetic aliases (`$0`, `$1`, ...).
//!
//! One generator lives for the duration of a single [`crate::compile`] call;
//! callers composing multiple compilations can thread a shared generator in
//! to keep the minted names disjoint across them.

/// A deterministic source of fresh symbol names. The default implementation
/// yields the sequence `"0", "1", "2", ...`; the compiler renders each as
/// `$N`.
pub trait IdGenerator {
    fn next(&mut self) -> String;
}

#[derive(Debug, Default)]
pub struct Counter {
    next: u64,
}

impl Counter {
    pub fn new() -> Self {
        Counter { next: 0 }
    }
}

impl IdGenerator for Counter {
    fn next(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        id.to_string()
    }
}

/// Returns the default `IdGenerator`, a plain counter starting at `0`.
pub fn default_id_generator() -> Counter {
    Counter::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_increasing_decimal_strings() {
        let mut gen = Counter::new();
        assert_eq!(gen.next(), "0");
        assert_eq!(gen.next(), "1");
        assert_eq!(gen.next(), "2");
    }
}
