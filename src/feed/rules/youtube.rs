use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::{Extractor, HostMatch, Rule, RuleContext};
use crate::feed::map::FeedsMap;
use crate::feed::recovered::Recovered;

pub(super) const RULE: Rule = Rule {
    name: "YouTube",
    hosts: HostMatch::Exact(&["www.youtube.com", "youtube.com"]),
    extractor: Extractor::Derived(extract),
};

const FEED_BASE: &str = "https://www.youtube.com/feeds/videos.xml";

/// Uploads playlists YouTube keeps for every channel, keyed by the prefix that
/// replaces the channel id's leading `UC`.
const CHANNEL_PLAYLISTS: [(&str, &str); 3] =
    [("UULF", "Videos"), ("UULV", "Live Streams"), ("UUSH", "Shorts")];

static CHANNEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/channel/(UC[A-Za-z0-9_-]+)").expect("valid regex"));
static USER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/user/([A-Za-z0-9_-]+)").expect("valid regex"));

fn extract(ctx: &RuleContext<'_>, feeds: &mut FeedsMap) -> Result<(), Recovered> {
    if let Some(caps) = CHANNEL.captures(ctx.pathname) {
        feeds.insert_rule(
            format!("{FEED_BASE}?channel_id={}", &caps[1]),
            "YouTube Channel Feed",
        );
    }

    if let Some(caps) = USER.captures(ctx.pathname) {
        let user = &caps[1];
        feeds.insert_rule(format!("{FEED_BASE}?user={user}"), format!("YouTube - {user}"));
    }

    if let Some(list) = ctx.query_param("list").filter(|id| id.starts_with("PL")) {
        feeds.insert_rule(
            format!("{FEED_BASE}?playlist_id={list}"),
            "YouTube Playlist Feed",
        );
    }

    // Second pass over whatever is in the map now, including the channel feed above
    derive_channel_playlists(feeds);
    Ok(())
}

fn derive_channel_playlists(feeds: &mut FeedsMap) {
    let channel_ids: Vec<String> = feeds
        .iter()
        .filter_map(|entry| Url::parse(&entry.url).ok())
        .filter_map(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "channel_id")
                .map(|(_, value)| value.into_owned())
        })
        .filter(|id| id.starts_with("UC"))
        .collect();

    for channel_id in channel_ids {
        let base = &channel_id[2..];
        for (prefix, title) in CHANNEL_PLAYLISTS {
            feeds.insert_rule(format!("{FEED_BASE}?playlist_id={prefix}{base}"), title);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::feed::map::FeedsMap;
    use crate::feed::rules::RuleRegistry;
    use pretty_assertions::assert_eq;

    fn feeds_for(url: &str) -> Vec<(String, String)> {
        let mut feeds = FeedsMap::new();
        RuleRegistry::builtin().apply(url, "www.youtube.com", &mut feeds);
        feeds
            .into_entries()
            .into_iter()
            .map(|e| (e.url, e.title.unwrap_or_default()))
            .collect()
    }

    fn pair(url: &str, title: &str) -> (String, String) {
        (url.to_owned(), title.to_owned())
    }

    #[test]
    fn test_channel_derives_upload_playlists() {
        assert_eq!(
            feeds_for("https://www.youtube.com/channel/UCxyz_1-2/videos"),
            vec![
                pair(
                    "https://www.youtube.com/feeds/videos.xml?channel_id=UCxyz_1-2",
                    "YouTube Channel Feed"
                ),
                pair("https://www.youtube.com/feeds/videos.xml?playlist_id=UULFxyz_1-2", "Videos"),
                pair(
                    "https://www.youtube.com/feeds/videos.xml?playlist_id=UULVxyz_1-2",
                    "Live Streams"
                ),
                pair("https://www.youtube.com/feeds/videos.xml?playlist_id=UUSHxyz_1-2", "Shorts"),
            ]
        );
    }

    #[test]
    fn test_legacy_user_url() {
        assert_eq!(
            feeds_for("https://www.youtube.com/user/LinusTechTips"),
            vec![pair(
                "https://www.youtube.com/feeds/videos.xml?user=LinusTechTips",
                "YouTube - LinusTechTips"
            )]
        );
    }

    #[test]
    fn test_playlist_from_query() {
        assert_eq!(
            feeds_for("https://www.youtube.com/watch?v=abc&list=PLabc123"),
            vec![pair(
                "https://www.youtube.com/feeds/videos.xml?playlist_id=PLabc123",
                "YouTube Playlist Feed"
            )]
        );
    }

    #[test]
    fn test_non_pl_list_ignored() {
        assert!(feeds_for("https://www.youtube.com/watch?v=abc&list=RDabc").is_empty());
    }

    #[test]
    fn test_handle_url_has_no_rule_feed() {
        assert!(feeds_for("https://www.youtube.com/@somebody").is_empty());
    }
}
