use std::collections::HashSet;

/// One discovered feed.
///
/// The URL is the identity. `title` is `None` until the title resolver has
/// looked at the feed body (or forever, if the feed has no channel title).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub url: String,
    pub title: Option<String>,
    /// Contributed by a site rule rather than found by parsing or probing.
    pub from_rule: bool,
}

/// Insertion-ordered set of feeds for a single lookup, keyed by URL.
///
/// Writes are first-wins: once a URL is present, later inserts are ignored,
/// so a rule-provided title can never be replaced by a parser hit for the
/// same URL.
#[derive(Debug, Default)]
pub struct FeedsMap {
    entries: Vec<FeedEntry>,
    keys: HashSet<String>,
}

impl FeedsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry` unless its URL is already present. Returns whether it was added.
    pub fn insert(&mut self, entry: FeedEntry) -> bool {
        if self.keys.contains(&entry.url) {
            return false;
        }
        self.keys.insert(entry.url.clone());
        self.entries.push(entry);
        true
    }

    /// Inserts a titled, rule-contributed feed.
    pub fn insert_rule(&mut self, url: impl Into<String>, title: impl Into<String>) -> bool {
        self.insert(FeedEntry {
            url: url.into(),
            title: Some(title.into()),
            from_rule: true,
        })
    }

    /// Inserts an untitled feed found by HTML parsing or path probing.
    pub fn insert_discovered(&mut self, url: impl Into<String>) -> bool {
        self.insert(FeedEntry {
            url: url.into(),
            title: None,
            from_rule: false,
        })
    }

    pub fn contains(&self, url: &str) -> bool {
        self.keys.contains(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<FeedEntry> {
        self.entries
    }
}
