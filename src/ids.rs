//! Identifier allocation for clip regions and animation targets.
//!
//! Ids from one allocator never repeat. Ids from two different allocators
//! may, so fragments merged into one document should share an allocator.

use uuid::Uuid;

pub trait IdAllocator {
    fn next_id(&mut self) -> String;
}

/// 32 lowercase hex digits from a v4 UUID.
pub fn random_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdAllocator for RandomIds {
    fn next_id(&mut self) -> String {
        random_id()
    }
}

/// `prefix-0`, `prefix-1`, ... scoped to one assembly.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("heart")
    }
}

impl IdAllocator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_id_shape() {
        let id = random_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sequential_ids_count_up() {
        let mut ids = SequentialIds::new("clip");
        assert_eq!(ids.next_id(), "clip-0");
        assert_eq!(ids.next_id(), "clip-1");
        assert_eq!(ids.next_id(), "clip-2");
    }
}
