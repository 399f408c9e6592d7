//! Domain primitives for the movie catalog.
//!
//! Newtypes keep movie ids and page numbers from being mixed up with the
//! other integers flowing through the service.

use std::fmt;

/// Number of movies returned per page by the paginated listing.
pub const PAGE_SIZE: u64 = 10;

/// Largest offset the store accepts; SQL offsets are signed 64-bit.
const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

/// Case-folded form of a name, stored next to it for case-insensitive
/// uniqueness and search.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Unique identifier for a Movie.
///
/// # Examples
///
/// ```rust
/// use moviedb::domain::MovieId;
///
/// let id = MovieId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MovieId(i32);

impl MovieId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Parses a path segment into an id. Only positive integers are accepted.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim()
            .parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-based page number for the movie listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(u64);

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}

impl Page {
    /// Returns `None` for page zero and for pages whose offset the store
    /// cannot represent.
    #[must_use]
    pub const fn new(number: u64) -> Option<Self> {
        if number == 0 {
            return None;
        }
        match (number - 1).checked_mul(PAGE_SIZE) {
            Some(offset) if offset <= MAX_OFFSET => Some(Self(number)),
            _ => None,
        }
    }

    /// Parses an optional query value; absent or blank means the first page.
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim) {
            None | Some("") => Some(Self::default()),
            Some(value) => value.parse().ok().and_then(Self::new),
        }
    }

    #[must_use]
    pub const fn number(&self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        PAGE_SIZE
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.0 - 1) * PAGE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_id_parse_accepts_positive_integers() {
        assert_eq!(MovieId::parse("1"), Some(MovieId::new(1)));
        assert_eq!(MovieId::parse(" 17 "), Some(MovieId::new(17)));
        assert_eq!(MovieId::parse("0"), None);
        assert_eq!(MovieId::parse("-3"), None);
        assert_eq!(MovieId::parse("abc"), None);
        assert_eq!(MovieId::parse("1.5"), None);
    }

    #[test]
    fn name_key_folds_non_ascii_case() {
        assert_eq!(name_key("ÉPOPÉE"), name_key("Épopée"));
        assert_eq!(name_key("Die Hard"), "die hard");
    }

    #[test]
    fn page_defaults_to_first() {
        assert_eq!(Page::from_query(None), Some(Page::default()));
        assert_eq!(Page::from_query(Some("")), Some(Page::default()));
        assert_eq!(Page::default().offset(), 0);
    }

    #[test]
    fn page_offsets() {
        let page = Page::from_query(Some("2")).unwrap();
        assert_eq!(page.number(), 2);
        assert_eq!(page.limit(), 10);
        assert_eq!(page.offset(), 10);
        assert_eq!(Page::new(5).unwrap().offset(), 40);
    }

    #[test]
    fn page_rejects_zero_and_garbage() {
        assert_eq!(Page::from_query(Some("0")), None);
        assert_eq!(Page::from_query(Some("-1")), None);
        assert_eq!(Page::from_query(Some("two")), None);
    }

    #[test]
    fn page_rejects_offsets_beyond_signed_range() {
        assert_eq!(Page::from_query(Some("18446744073709551615")), None);
        assert_eq!(Page::from_query(Some("1000000000000000000")), None);
        assert_eq!(Page::new(u64::MAX), None);

        let last = MAX_OFFSET / PAGE_SIZE + 1;
        assert_eq!(Page::new(last).unwrap().offset(), MAX_OFFSET / PAGE_SIZE * PAGE_SIZE);
        assert_eq!(Page::new(last + 1), None);
    }
}
