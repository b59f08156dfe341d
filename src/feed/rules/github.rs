use std::sync::LazyLock;

use regex::Regex;

use super::{Extractor, HostMatch, Rule, RuleContext};
use crate::feed::map::FeedsMap;
use crate::feed::recovered::Recovered;

pub(super) const RULE: Rule = Rule {
    name: "GitHub",
    hosts: HostMatch::Exact(&["github.com"]),
    extractor: Extractor::Derived(extract),
};

// Repository root only; subpages such as /issues have more segments
static REPO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/([a-zA-Z0-9_.-]+)/([a-zA-Z0-9_.-]+)$").expect("valid regex")
});

fn extract(ctx: &RuleContext<'_>, feeds: &mut FeedsMap) -> Result<(), Recovered> {
    let Some(caps) = REPO.captures(ctx.pathname) else {
        return Ok(());
    };
    let repo = format!("{}/{}", &caps[1], &caps[2]);

    for (file, kind) in [("commits", "Commits"), ("releases", "Releases"), ("tags", "Tags")] {
        feeds.insert_rule(
            format!("{}/{file}.atom", ctx.cleaned_url),
            format!("{repo} - {kind}"),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::feed::map::FeedsMap;
    use crate::feed::rules::RuleRegistry;
    use pretty_assertions::assert_eq;

    fn feeds_for(url: &str, host: &str) -> Vec<(String, String)> {
        let mut feeds = FeedsMap::new();
        RuleRegistry::builtin().apply(url, host, &mut feeds);
        feeds
            .into_entries()
            .into_iter()
            .map(|e| (e.url, e.title.unwrap_or_default()))
            .collect()
    }

    #[test]
    fn test_repository_feeds() {
        assert_eq!(
            feeds_for("https://github.com/facebook/react/", "github.com"),
            vec![
                (
                    "https://github.com/facebook/react/commits.atom".to_owned(),
                    "facebook/react - Commits".to_owned()
                ),
                (
                    "https://github.com/facebook/react/releases.atom".to_owned(),
                    "facebook/react - Releases".to_owned()
                ),
                (
                    "https://github.com/facebook/react/tags.atom".to_owned(),
                    "facebook/react - Tags".to_owned()
                ),
            ]
        );
    }

    #[test]
    fn test_subpages_and_profiles_ignored() {
        assert!(feeds_for("https://github.com/facebook/react/issues", "github.com").is_empty());
        assert!(feeds_for("https://github.com/facebook", "github.com").is_empty());
    }

    #[test]
    fn test_www_host_not_matched() {
        assert!(feeds_for("https://www.github.com/a/b", "www.github.com").is_empty());
    }
}
