//! `<link rel="alternate">` extraction from fetched HTML, built on `lol_html`.

use lol_html::{element, HtmlRewriter, OutputSink, Settings};
use url::Url;

use super::map::FeedsMap;
use super::recovered::{Recovered, Stage};

/// `type` values that mark a link as a feed. Compared lower-cased.
///
/// The `&#re;` spellings are a known breakage on some sites that serialise the
/// `+` as a bogus entity. They are matched literally and the pattern is not
/// generalised to other entity spellings.
pub const FEED_MIME_TYPES: [&str; 4] = [
    "application/rss+xml",
    "application/atom+xml",
    "application/rss&#re;xml",
    "application/atom&#re;xml",
];

fn is_feed_mime_type(value: &str) -> bool {
    let lowered = value.to_ascii_lowercase();
    FEED_MIME_TYPES.contains(&lowered.as_str())
}

/// Adds every feed link in `html` to `feeds`, resolving hrefs against `base`.
///
/// `base` must be the final URL after redirects. Hrefs that do not resolve
/// are dropped; URLs already in the map keep their existing entry. Returns
/// the number of feeds added. If the parser gives up part way, the links
/// found before that point are still inserted and the failure is returned.
pub fn parse_html_for_feeds(html: &[u8], base: &Url, feeds: &mut FeedsMap) -> Result<usize, Recovered> {
    let mut hrefs: Vec<String> = Vec::new();

    let handler = element!("link[href]", |el| {
        let is_alternate = el
            .get_attribute("rel")
            .is_some_and(|rel| decode_entities(&rel) == "alternate");
        let is_feed = el
            .get_attribute("type")
            .is_some_and(|t| is_feed_mime_type(&decode_entities(&t)));
        if let (true, true, Some(href)) = (is_alternate, is_feed, el.get_attribute("href")) {
            if !href.is_empty() {
                hrefs.push(href);
            }
        }
        Ok(())
    });

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![handler],
            ..Settings::default()
        },
        NoopSink,
    );

    let parsed = rewriter.write(html).and_then(|()| rewriter.end());

    // Links seen before a parser failure still count
    let mut added = 0;
    for href in hrefs {
        let href = decode_entities(&href);
        match base.join(&href) {
            Ok(resolved) => {
                if feeds.insert_discovered(resolved.to_string()) {
                    added += 1;
                }
            }
            Err(e) => Recovered::new(Stage::HtmlParse, href.as_str(), e).log(),
        }
    }

    parsed
        .map(|()| added)
        .map_err(|e| Recovered::new(Stage::HtmlParse, base.as_str(), e))
}

/// `lol_html` hands back attribute values verbatim, so `&amp;` in an href
/// is still escaped. Values that are not valid XML escapes pass through as-is.
fn decode_entities(raw: &str) -> String {
    quick_xml::escape::unescape(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_owned())
}

struct NoopSink;

impl OutputSink for NoopSink {
    fn handle_chunk(&mut self, _chunk: &[u8]) {}
}
