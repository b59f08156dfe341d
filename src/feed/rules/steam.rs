use std::sync::LazyLock;

use regex::Regex;

use super::{Extractor, HostMatch, Rule, RuleContext};
use crate::feed::map::FeedsMap;
use crate::feed::recovered::Recovered;

pub(super) const RULE: Rule = Rule {
    name: "Steam",
    hosts: HostMatch::Exact(&["store.steampowered.com"]),
    extractor: Extractor::Derived(extract),
};

// Store pages (/app/ID/Name/) and news pages (/news/app/ID)
static APP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(news/)?app/(\d+)(/|$)").expect("valid regex"));
static APP_WITH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(news/)?app/(\d+)/([a-zA-Z0-9_-]+)(/|$)").expect("valid regex")
});

fn extract(ctx: &RuleContext<'_>, feeds: &mut FeedsMap) -> Result<(), Recovered> {
    let Some(caps) = APP.captures(ctx.pathname) else {
        return Ok(());
    };
    let app_id = &caps[2];

    let title = match APP_WITH_NAME.captures(ctx.pathname) {
        Some(named) => format!("{} Updates", named[3].replace('_', " ")),
        None => "Game Updates".to_owned(),
    };
    feeds.insert_rule(
        format!("https://store.steampowered.com/feeds/news/app/{app_id}/"),
        title,
    );
    Ok(())
}
