use std::sync::LazyLock;

use regex::Regex;

use super::{Extractor, HostMatch, Rule, RuleContext};
use crate::feed::map::FeedsMap;
use crate::feed::recovered::Recovered;

pub(super) const RULE: Rule = Rule {
    name: "Reddit",
    hosts: HostMatch::Exact(&["www.reddit.com", "reddit.com"]),
    extractor: Extractor::Derived(extract),
};

static SUBREDDIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/r/([A-Za-z0-9_]+)").expect("valid regex"));

/// Reddit serves a feed for any listing by appending `.rss` to its path.
fn extract(ctx: &RuleContext<'_>, feeds: &mut FeedsMap) -> Result<(), Recovered> {
    if ctx.pathname == "/" {
        feeds.insert_rule(format!("{}/.rss", ctx.cleaned_url), "Reddit RSS Feed");
        return Ok(());
    }

    let title = match SUBREDDIT.captures(ctx.pathname) {
        Some(caps) => format!("r/{} RSS Feed", &caps[1]),
        None => "Reddit RSS Feed".to_owned(),
    };
    feeds.insert_rule(format!("{}.rss", ctx.cleaned_url), title);
    Ok(())
}
