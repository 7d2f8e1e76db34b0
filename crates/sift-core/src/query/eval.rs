use crate::query::ast::Predicate;

/// Read access to the fields a predicate can test.
pub trait Record {
    fn title(&self) -> &str;
    fn artist(&self) -> Option<&str>;
    fn album(&self) -> Option<&str>;
    fn year(&self) -> Option<i32>;
    fn explicit(&self) -> bool;
    /// Tag names attached to the record, in any case.
    fn tags(&self) -> Vec<&str>;
}

impl Predicate {
    /// Evaluates the tree against one record.
    ///
    /// Substring and tag comparisons ignore case. A record without a year
    /// never satisfies a year criterion, and a missing artist or album
    /// never contains anything.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        match self {
            Predicate::True => true,
            Predicate::And(left, right) => left.matches(record) && right.matches(record),
            Predicate::Or(left, right) => left.matches(record) || right.matches(record),
            Predicate::TitleContains(text) => contains(Some(record.title()), text),
            Predicate::ArtistContains(text) => contains(record.artist(), text),
            Predicate::AlbumContains(text) => contains(record.album(), text),
            Predicate::YearEquals(year) => record.year() == Some(*year),
            Predicate::YearRange { min, max } => match record.year() {
                Some(year) => {
                    min.map_or(true, |min| year >= min) && max.map_or(true, |max| year <= max)
                }
                None => false,
            },
            Predicate::ExplicitIs(flag) => record.explicit() == *flag,
            Predicate::TagIncluded(name) => has_tag(record, name),
            Predicate::TagExcluded(name) => !has_tag(record, name),
            Predicate::FreeText(text) => Predicate::free_text(text).matches(record),
        }
    }
}

fn contains(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|value| value.to_lowercase().contains(&needle.to_lowercase()))
}

fn has_tag<R: Record + ?Sized>(record: &R, name: &str) -> bool {
    let wanted = name.to_lowercase();
    record
        .tags()
        .into_iter()
        .any(|tag| tag.to_lowercase() == wanted)
}
