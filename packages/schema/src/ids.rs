//! Identifier sources for blocks and nested entities.

/// Produces fresh, unique identifiers
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs (production default)
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic `<prefix>-<n>` identifiers for tests and reproducible output
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    counter: u32,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Number of identifiers handed out so far
    pub fn issued(&self) -> u32 {
        self.counter
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("{}-{}", self.prefix, self.counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("blk");
        assert_eq!(ids.next_id(), "blk-1");
        assert_eq!(ids.next_id(), "blk-2");
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let mut ids = UuidIds;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
