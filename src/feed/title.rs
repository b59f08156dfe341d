use quick_xml::events::Event;
use quick_xml::Reader;
use url::Url;

use super::http::{is_usable_status, may_fetch, read_limited_bytes};
use super::recovered::{Recovered, Stage};
use crate::util::strip_control_chars;

/// Fetches `feed_url` and returns its channel-level title.
///
/// Never fails: an unusable status, network error, oversized body, or a feed
/// without a channel title all yield `None`.
pub async fn fetch_feed_title(
    client: &reqwest::Client,
    feed_url: &str,
    max_bytes: usize,
    allow_private_hosts: bool,
) -> Option<String> {
    match try_fetch_title(client, feed_url, max_bytes, allow_private_hosts).await {
        Ok(title) => title,
        Err(recovered) => {
            recovered.log();
            None
        }
    }
}

async fn try_fetch_title(
    client: &reqwest::Client,
    feed_url: &str,
    max_bytes: usize,
    allow_private_hosts: bool,
) -> Result<Option<String>, Recovered> {
    let fail = |reason: &dyn ToString| Recovered::new(Stage::Title, feed_url, reason.to_string());

    let url = Url::parse(feed_url).map_err(|e| fail(&e))?;
    if !may_fetch(allow_private_hosts, &url) {
        return Err(fail(&"host not allowed"));
    }

    let response = client.get(url).send().await.map_err(|e| fail(&e))?;
    if !is_usable_status(response.status()) {
        return Err(fail(&format!("status {}", response.status().as_u16())));
    }

    let body = read_limited_bytes(response, max_bytes)
        .await
        .map_err(|e| fail(&e))?;

    Ok(parse_feed_title(&body).map(|t| strip_control_chars(&t).into_owned()))
}

/// Where the reader is inside the feed document.
#[derive(Default)]
struct Regions {
    channel: bool,
    feed: bool,
    item: bool,
    entry: bool,
}

impl Regions {
    fn set(&mut self, name: &[u8], open: bool) {
        let lowered = name.to_ascii_lowercase();
        match lowered.as_slice() {
            b"channel" => self.channel = open,
            b"feed" => self.feed = open,
            b"item" => self.item = open,
            b"entry" => self.entry = open,
            _ => {}
        }
    }

    fn title_qualifies(&self) -> bool {
        (self.channel || self.feed) && !self.item && !self.entry
    }
}

/// Text of the first `<title>` directly under an RSS `<channel>` or Atom
/// `<feed>`, ignoring item and entry titles.
///
/// Tag names compare case-insensitively and mismatched end tags are
/// tolerated. A title element with no text at all does not count, so a later
/// channel title can still win. Returns `None` for a missing or blank title.
pub fn parse_feed_title(xml: &[u8]) -> Option<String> {
    // No DTD processing: quick-xml 0.37 never expands custom entities
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().check_end_names = false;

    let mut regions = Regions::default();
    let mut capture: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(error = %e, "Feed XML parse stopped early");
                return finish(capture);
            }
        };

        match event {
            Event::Start(e) => {
                let name = e.name();
                if name.as_ref().eq_ignore_ascii_case(b"title") {
                    if capture.is_none() && regions.title_qualifies() {
                        capture = Some(String::new());
                    }
                } else {
                    regions.set(name.as_ref(), true);
                }
            }
            Event::End(e) => {
                let name = e.name();
                if name.as_ref().eq_ignore_ascii_case(b"title") {
                    match capture.take() {
                        Some(text) if !text.is_empty() => return finish(Some(text)),
                        // `<title></title>` leaves the slot open
                        _ => {}
                    }
                } else {
                    regions.set(name.as_ref(), false);
                }
            }
            Event::Text(t) => {
                if let Some(text) = capture.as_mut() {
                    match t.unescape() {
                        Ok(s) => text.push_str(&s),
                        // Undeclared HTML entities such as &nbsp; are kept literally
                        Err(_) => text.push_str(&String::from_utf8_lossy(&t)),
                    }
                }
            }
            Event::CData(c) => {
                if let Some(text) = capture.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::Eof => return finish(capture),
            _ => {}
        }
        buf.clear();
    }
}

fn finish(capture: Option<String>) -> Option<String> {
    capture
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Example Blog</title>
    <item><title>First Post</title></item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry><title>Entry first</title></entry>
  <title type="text">  Atom Blog  </title>
</feed>"#;

    fn parse(xml: &str) -> Option<String> {
        parse_feed_title(xml.as_bytes())
    }

    #[test]
    fn test_rss_channel_title() {
        assert_eq!(parse(RSS).as_deref(), Some("Example Blog"));
    }

    #[test]
    fn test_atom_title_after_entry_is_trimmed() {
        assert_eq!(parse(ATOM).as_deref(), Some("Atom Blog"));
    }

    #[test]
    fn test_item_title_never_used() {
        let xml = "<rss><channel><item><title>Only item</title></item></channel></rss>";
        assert_eq!(parse(xml), None);
    }

    #[test]
    fn test_cdata_and_entities() {
        assert_eq!(
            parse("<rss><channel><title><![CDATA[Q&A <Weekly>]]></title></channel></rss>").as_deref(),
            Some("Q&A <Weekly>")
        );
        assert_eq!(
            parse("<rss><channel><title>Tom &amp; Jerry</title></channel></rss>").as_deref(),
            Some("Tom & Jerry")
        );
    }

    #[test]
    fn test_uppercase_tags() {
        assert_eq!(
            parse("<RSS><CHANNEL><TITLE>Shouting</TITLE></CHANNEL></RSS>").as_deref(),
            Some("Shouting")
        );
    }

    #[test]
    fn test_empty_title_element_does_not_block_later_title() {
        let xml = "<rss><channel><title></title><title>Second</title></channel></rss>";
        assert_eq!(parse(xml).as_deref(), Some("Second"));
    }

    #[test]
    fn test_blank_title_is_none() {
        assert_eq!(parse("<rss><channel><title>   </title></channel></rss>"), None);
    }

    #[test]
    fn test_not_xml() {
        assert_eq!(parse("<html><head><title>Page</title></head></html>"), None);
        assert_eq!(parse("{\"json\": true}"), None);
    }

    #[test]
    fn test_truncated_document_keeps_title_text() {
        assert_eq!(parse("<rss><channel><title>Cut off").as_deref(), Some("Cut off"));
    }

    #[tokio::test]
    async fn test_fetch_feed_title() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(RSS, "application/rss+xml"))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let title =
            fetch_feed_title(&client, &format!("{}/feed.xml", server.uri()), 1 << 20, true).await;
        assert_eq!(title.as_deref(), Some("Example Blog"));
    }

    #[tokio::test]
    async fn test_fetch_feed_title_error_status_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string(RSS))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        assert_eq!(fetch_feed_title(&client, &server.uri(), 1 << 20, true).await, None);
    }

    #[tokio::test]
    async fn test_fetch_feed_title_oversized_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RSS))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        assert_eq!(fetch_feed_title(&client, &server.uri(), 16, true).await, None);
    }

    #[tokio::test]
    async fn test_fetch_feed_title_strips_escape_sequences() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<rss><channel><title>Evil\x1b[31m Feed</title></channel></rss>",
            ))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let title = fetch_feed_title(&client, &server.uri(), 1 << 20, true).await;
        assert_eq!(title.as_deref(), Some("Evil Feed"));
    }

    #[tokio::test]
    async fn test_private_host_not_fetched_when_disallowed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RSS))
            .expect(0)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        assert_eq!(fetch_feed_title(&client, &server.uri(), 1 << 20, false).await, None);
    }
}
