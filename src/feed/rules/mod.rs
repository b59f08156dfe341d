//! Site-specific feed rules.
//!
//! A rule owns a set of hostnames and contributes feeds for them without
//! fetching anything: either a fixed catalogue (news outlets whose feed list
//! is known up front) or feeds derived from the URL's path and query.
//!
//! Rules are tried in registry order and every matching rule runs. Because
//! [`FeedsMap`] is first-write-wins, when two rules produce the same URL the
//! one registered earlier keeps its title.

mod catalogues;
mod github;
mod reddit;
mod stack_exchange;
mod steam;
mod youtube;

use std::fmt;

use url::Url;

use super::map::FeedsMap;
use super::recovered::{Recovered, Stage};
use crate::util::clean_url;

/// A feed with a fixed URL and title, listed in a catalogue rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogueFeed {
    pub url: &'static str,
    pub title: &'static str,
}

pub(crate) const fn feed(url: &'static str, title: &'static str) -> CatalogueFeed {
    CatalogueFeed { url, title }
}

/// Which hostnames a rule answers for.
#[derive(Debug, Clone, Copy)]
pub enum HostMatch {
    /// Exact hostname comparison.
    Exact(&'static [&'static str]),
    /// `suffix` itself, any subdomain of it, or one of `also`.
    Suffix {
        suffix: &'static str,
        also: &'static [&'static str],
    },
}

impl HostMatch {
    pub fn matches(&self, hostname: &str) -> bool {
        match self {
            HostMatch::Exact(hosts) => hosts.contains(&hostname),
            HostMatch::Suffix { suffix, also } => {
                also.contains(&hostname)
                    || hostname == *suffix
                    || hostname
                        .strip_suffix(suffix)
                        .is_some_and(|rest| rest.ends_with('.'))
            }
        }
    }
}

/// Signature of a rule that computes feeds from the URL structure.
pub type DeriveFn = fn(&RuleContext<'_>, &mut FeedsMap) -> Result<(), Recovered>;

/// How a rule produces feeds.
#[derive(Clone, Copy)]
pub enum Extractor {
    Catalogue(&'static [CatalogueFeed]),
    Derived(DeriveFn),
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extractor::Catalogue(feeds) => write!(f, "Catalogue({} feeds)", feeds.len()),
            Extractor::Derived(_) => f.write_str("Derived"),
        }
    }
}

/// A hostname-scoped feed source.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub hosts: HostMatch,
    pub extractor: Extractor,
}

impl Rule {
    pub fn matches_hostname(&self, hostname: &str) -> bool {
        self.hosts.matches(hostname)
    }

    /// Adds this rule's feeds for `ctx` to `feeds`.
    pub fn extract_feeds(&self, ctx: &RuleContext<'_>, feeds: &mut FeedsMap) -> Result<(), Recovered> {
        match self.extractor {
            Extractor::Catalogue(catalogue) => {
                for item in catalogue {
                    feeds.insert_rule(item.url, item.title);
                }
                Ok(())
            }
            Extractor::Derived(derive) => derive(ctx, feeds),
        }
    }
}

/// What a rule gets to look at.
///
/// `pathname` and `origin` come from the cleaned URL, so they never carry a
/// query or fragment. `query` holds the decoded pairs of the full URL.
#[derive(Debug)]
pub struct RuleContext<'a> {
    pub full_url: &'a str,
    pub cleaned_url: &'a str,
    pub hostname: &'a str,
    pub pathname: &'a str,
    pub origin: &'a str,
    pub query: &'a [(String, String)],
}

impl RuleContext<'_> {
    /// First value of the query parameter `name` in the full URL.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

const BUILTIN_RULES: &[Rule] = &[
    reddit::RULE,
    youtube::RULE,
    github::RULE,
    stack_exchange::RULE,
    steam::RULE,
    catalogues::NYTIMES,
    catalogues::CNN,
    catalogues::FOX_NEWS,
    catalogues::BBC,
    catalogues::NY_POST,
    catalogues::CNBC,
    catalogues::CBS_NEWS,
    catalogues::WASHINGTON_POST,
    catalogues::WSJ,
];

/// Ordered list of rules applied before the target page is fetched.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleRegistry {
    /// The built-in site rules.
    pub fn builtin() -> Self {
        Self::with_rules(BUILTIN_RULES.to_vec())
    }

    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Runs every rule matching `hostname` against `full_url`.
    ///
    /// A failing rule is logged and skipped; the others still run. Returns the
    /// number of feeds added to `feeds`.
    pub fn apply(&self, full_url: &str, hostname: &str, feeds: &mut FeedsMap) -> usize {
        let cleaned = clean_url(full_url);
        if cleaned.is_empty() {
            return 0;
        }
        let Ok(parsed) = Url::parse(&cleaned) else {
            return 0;
        };

        let query: Vec<(String, String)> = Url::parse(full_url)
            .map(|url| url.query_pairs().into_owned().collect())
            .unwrap_or_default();
        let origin = parsed.origin().ascii_serialization();

        let ctx = RuleContext {
            full_url,
            cleaned_url: &cleaned,
            hostname,
            pathname: parsed.path(),
            origin: &origin,
            query: &query,
        };

        let before = feeds.len();
        for rule in self.rules.iter().filter(|r| r.matches_hostname(hostname)) {
            let added_before = feeds.len();
            match rule.extract_feeds(&ctx, feeds) {
                Ok(()) => tracing::debug!(
                    rule = rule.name,
                    added = feeds.len() - added_before,
                    "Applied site rule"
                ),
                Err(recovered) => recovered.log(),
            }
        }
        feeds.len() - before
    }
}

/// Builds a [`Recovered`] for a rule that could not run on `ctx`.
pub(crate) fn rule_failure(rule: &str, ctx: &RuleContext<'_>, reason: &str) -> Recovered {
    Recovered::new(Stage::Rule, ctx.full_url, format!("{rule}: {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::map::FeedEntry;
    use pretty_assertions::assert_eq;

    fn run(url: &str) -> Vec<FeedEntry> {
        let host = Url::parse(url).unwrap().host_str().unwrap().to_owned();
        let mut feeds = FeedsMap::new();
        RuleRegistry::builtin().apply(url, &host, &mut feeds);
        feeds.into_entries()
    }

    fn always_fails(ctx: &RuleContext<'_>, _: &mut FeedsMap) -> Result<(), Recovered> {
        Err(rule_failure("broken", ctx, "boom"))
    }

    fn adds_one(_: &RuleContext<'_>, feeds: &mut FeedsMap) -> Result<(), Recovered> {
        feeds.insert_rule("https://example.com/feed", "Example");
        Ok(())
    }

    #[test]
    fn test_suffix_match_requires_label_boundary() {
        let hosts = HostMatch::Suffix {
            suffix: "stackexchange.com",
            also: &["stackoverflow.com"],
        };
        assert!(hosts.matches("math.stackexchange.com"));
        assert!(hosts.matches("stackexchange.com"));
        assert!(hosts.matches("stackoverflow.com"));
        assert!(!hosts.matches("notstackexchange.com"));
        assert!(!hosts.matches("meta.stackoverflow.com"));
    }

    #[test]
    fn test_failing_rule_does_not_block_others() {
        let hosts = HostMatch::Exact(&["example.com"]);
        let registry = RuleRegistry::with_rules(vec![
            Rule { name: "broken", hosts, extractor: Extractor::Derived(always_fails) },
            Rule { name: "works", hosts, extractor: Extractor::Derived(adds_one) },
        ]);

        let mut feeds = FeedsMap::new();
        let added = registry.apply("https://example.com/", "example.com", &mut feeds);

        assert_eq!(added, 1);
        assert!(feeds.contains("https://example.com/feed"));
    }

    #[test]
    fn test_no_rule_for_unknown_host() {
        assert!(run("https://example.com/blog").is_empty());
    }

    #[test]
    fn test_garbage_url_contributes_nothing() {
        let mut feeds = FeedsMap::new();
        assert_eq!(RuleRegistry::builtin().apply("::nope", "github.com", &mut feeds), 0);
        assert_eq!(RuleRegistry::builtin().apply("", "github.com", &mut feeds), 0);
    }

    #[test]
    fn test_every_rule_entry_is_titled_and_flagged() {
        for url in [
            "https://www.reddit.com/r/rust",
            "https://www.youtube.com/channel/UCabc123",
            "https://github.com/rust-lang/rust",
            "https://stackoverflow.com/questions/tagged/rust",
            "https://store.steampowered.com/app/620/Portal_2/",
            "https://www.bbc.co.uk/news",
        ] {
            let entries = run(url);
            assert!(!entries.is_empty(), "{url} produced no feeds");
            for entry in entries {
                assert!(entry.from_rule);
                assert!(entry.title.is_some());
            }
        }
    }

    #[test]
    fn test_catalogue_ignores_path() {
        let front = run("https://www.cnn.com/");
        let article = run("https://cnn.com/2024/01/01/politics/some-story/index.html");
        assert_eq!(front.len(), 13);
        assert_eq!(front, article);
    }

    #[test]
    fn test_builtin_order() {
        let names: Vec<_> = RuleRegistry::builtin().rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "Reddit",
                "YouTube",
                "GitHub",
                "Stack Exchange",
                "Steam",
                "NYTimes",
                "CNN",
                "Fox News",
                "BBC",
                "NY Post",
                "CNBC",
                "CBS News",
                "Washington Post",
                "WSJ",
            ]
        );
    }
}
