use std::sync::LazyLock;

use regex::Regex;

use super::{rule_failure, Extractor, HostMatch, Rule, RuleContext};
use crate::feed::map::FeedsMap;
use crate::feed::recovered::Recovered;

pub(super) const RULE: Rule = Rule {
    name: "Stack Exchange",
    hosts: HostMatch::Suffix {
        suffix: "stackexchange.com",
        also: &[
            "stackoverflow.com",
            "serverfault.com",
            "superuser.com",
            "askubuntu.com",
            "stackapps.com",
        ],
    },
    extractor: Extractor::Derived(extract),
};

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/questions/tagged/([A-Za-z0-9_.+-]+)").expect("valid regex"));
static QUESTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/questions/(\d+)").expect("valid regex"));
static USER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/users/(\d+)").expect("valid regex"));

fn extract(ctx: &RuleContext<'_>, feeds: &mut FeedsMap) -> Result<(), Recovered> {
    if ctx.origin == "null" {
        return Err(rule_failure("Stack Exchange", ctx, "URL has no origin"));
    }
    let site = site_name(ctx.hostname);
    let origin = ctx.origin;

    if let Some(caps) = TAG.captures(ctx.pathname) {
        let tag = &caps[1];
        feeds.insert_rule(
            format!("{origin}/feeds/tag/{tag}"),
            format!("{site} - [{tag}] Questions"),
        );
    }
    if let Some(caps) = QUESTION.captures(ctx.pathname) {
        let id = &caps[1];
        feeds.insert_rule(
            format!("{origin}/feeds/question/{id}"),
            format!("{site} - Question #{id}"),
        );
    }
    if let Some(caps) = USER.captures(ctx.pathname) {
        feeds.insert_rule(
            format!("{origin}/feeds/user/{}", &caps[1]),
            format!("{site} - User Activity"),
        );
    }
    Ok(())
}

/// `math.stackexchange.com` -> `math.stackexchange`, `www.superuser.com` -> `superuser`.
fn site_name(hostname: &str) -> String {
    hostname.replacen(".com", "", 1).replacen("www.", "", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::rules::RuleRegistry;
    use pretty_assertions::assert_eq;

    fn feeds_for(url: &str) -> Vec<(String, String)> {
        let host = url::Url::parse(url).unwrap().host_str().unwrap().to_owned();
        let mut feeds = FeedsMap::new();
        RuleRegistry::builtin().apply(url, &host, &mut feeds);
        feeds
            .into_entries()
            .into_iter()
            .map(|e| (e.url, e.title.unwrap_or_default()))
            .collect()
    }

    #[test]
    fn test_site_name() {
        assert_eq!(site_name("math.stackexchange.com"), "math.stackexchange");
        assert_eq!(site_name("stackoverflow.com"), "stackoverflow");
        assert_eq!(site_name("www.superuser.com"), "superuser");
    }

    #[test]
    fn test_tag_feed() {
        assert_eq!(
            feeds_for("https://stackoverflow.com/questions/tagged/c++?tab=Newest"),
            vec![(
                "https://stackoverflow.com/feeds/tag/c++".to_owned(),
                "stackoverflow - [c++] Questions".to_owned()
            )]
        );
    }

    #[test]
    fn test_question_feed() {
        assert_eq!(
            feeds_for("https://math.stackexchange.com/questions/12345/why-is-this-true"),
            vec![(
                "https://math.stackexchange.com/feeds/question/12345".to_owned(),
                "math.stackexchange - Question #12345".to_owned()
            )]
        );
    }

    #[test]
    fn test_user_feed() {
        assert_eq!(
            feeds_for("https://askubuntu.com/users/42/someone"),
            vec![(
                "https://askubuntu.com/feeds/user/42".to_owned(),
                "askubuntu - User Activity".to_owned()
            )]
        );
    }

    #[test]
    fn test_front_page_has_no_feed() {
        assert!(feeds_for("https://serverfault.com/").is_empty());
    }
}
