//! Insertion log.

/// Ordered identifiers inserted since the previous flush.
///
/// Owned by exactly one [`crate::StyleCache`]; every mutation goes through
/// `&mut self`, so a log cannot be drained by two flushes at once.
///
/// # Invariants
///
/// - An identifier is appended only if the owning cache did not already know
///   it, so it appears at most once over the life of the log.
/// - [`InsertionLog::drain`] returns the identifiers in insertion order and
///   leaves the log empty.
#[derive(Debug, Default)]
pub struct InsertionLog {
    pending: Vec<String>,
}

impl InsertionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    /// Record an insertion event.
    ///
    /// `known` is whether the cache already stores `id`. Returns `true` if the
    /// identifier was queued for the next flush.
    pub fn on_insert(&mut self, id: &str, known: bool) -> bool {
        if known {
            return false;
        }
        self.pending.push(id.to_owned());
        true
    }

    /// Take every pending identifier, leaving the log empty.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    /// Identifiers waiting for the next flush.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Number of identifiers waiting for the next flush.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is waiting for the next flush.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_are_queued_in_order() {
        let mut log = InsertionLog::new();
        assert!(log.on_insert("b", false));
        assert!(log.on_insert("a", false));

        assert_eq!(log.pending(), ["b", "a"]);
    }

    #[test]
    fn known_ids_are_skipped() {
        let mut log = InsertionLog::new();
        assert!(!log.on_insert("a", true));
        assert!(log.is_empty());
    }

    #[test]
    fn drain_empties_the_log() {
        let mut log = InsertionLog::new();
        log.on_insert("a", false);
        log.on_insert("b", false);

        assert_eq!(log.drain(), vec!["a".to_string(), "b".to_string()]);
        assert!(log.is_empty());
        assert!(log.drain().is_empty());
    }
}
