//! Unique ids for generated markup (clip paths, gradients).

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Next process-wide unique id with the given prefix, e.g. `clip-7`.
pub fn next_markup_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = next_markup_id("clip");
        let b = next_markup_id("clip");
        assert_ne!(a, b);
        assert!(a.starts_with("clip-"));
    }
}
