use sift_core::query::Predicate;

/// A compiled predicate plus listing options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackQuery {
    pub predicate: Predicate,
    pub limit: Option<usize>,
}

impl TrackQuery {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for TrackQuery {
    fn default() -> Self {
        Self::new(Predicate::True)
    }
}
