//! RSS matcher: fetches an RSS 2.0 document over HTTP and scans each item's
//! title and description for the search pattern.
//!
//! Results come out in document order: for every `<item>`, a `Title` match
//! (if any) followed by a `Description` match (if any).
//!
//! Decoding walks the XML event stream and matches elements by their full
//! qualified name, so `<atom:link>` or `<itunes:title>` never collide with
//! the plain RSS elements. Unknown elements are skipped, a repeated element
//! keeps its last value, and markup nested inside a text field contributes
//! its character data.

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;
use regex::Regex;
use reqwest::{StatusCode, Url};

use feedscan_core::config::HttpConfig;
use feedscan_core::{FeedDescriptor, Matcher, SearchError, SearchResult};

/// Type tag RSS feeds are registered under.
pub const FEED_TYPE: &str = "rss";

// ---------------------------------------------------------------------------
// Document model
// ---------------------------------------------------------------------------

/// `<rss>` root element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RssDocument {
    pub channel: Channel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Channel {
    pub title: String,
    pub description: String,
    pub link: String,
    pub pub_date: String,
    pub last_build_date: String,
    pub ttl: String,
    pub language: String,
    pub managing_editor: String,
    pub web_master: String,
    pub image: Option<Image>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub description: String,
    pub link: String,
    pub guid: String,
    pub pub_date: String,
    /// `<georss:point>`, "lat lon".
    pub geo_point: String,
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode an RSS document from raw XML.
pub fn decode(uri: &str, body: &[u8]) -> Result<RssDocument, SearchError> {
    let decode_error = |reason: String| SearchError::Decode {
        uri: uri.to_string(),
        reason,
    };
    let text = std::str::from_utf8(body).map_err(|err| decode_error(err.to_string()))?;

    let mut reader = Reader::from_str(text);
    let mut document = RssDocument::default();
    let mut open: Vec<String> = Vec::new();
    // Depth of the text field being captured, and its text so far.
    let mut capture: Option<(usize, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => {
                let name = qualified(element.name());
                check_root(&open, &name).map_err(decode_error)?;
                open.push(name);
                if capture.is_none() && enter(&mut document, &open) {
                    capture = Some((open.len(), String::new()));
                }
            }
            Ok(Event::Empty(element)) => {
                let name = qualified(element.name());
                check_root(&open, &name).map_err(decode_error)?;
                if open.is_empty() {
                    return Ok(document);
                }
                open.push(name);
                if capture.is_none() && enter(&mut document, &open) {
                    store(&mut document, &open, String::new());
                }
                open.pop();
            }
            Ok(Event::Text(chunk)) => {
                if let Some((_, text)) = capture.as_mut() {
                    // Undeclared entities are kept verbatim.
                    let unescaped = chunk
                        .unescape()
                        .unwrap_or_else(|_| String::from_utf8_lossy(&chunk));
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(chunk)) => {
                if let Some((_, text)) = capture.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&chunk.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                if matches!(capture, Some((depth, _)) if depth == open.len()) {
                    if let Some((_, text)) = capture.take() {
                        store(&mut document, &open, text);
                    }
                }
                open.pop();
                if open.is_empty() {
                    return Ok(document);
                }
            }
            Ok(Event::Eof) => {
                let reason = if open.is_empty() {
                    "no <rss> element found"
                } else {
                    "unexpected end of document"
                };
                return Err(decode_error(reason.to_string()));
            }
            Ok(_) => {}
            Err(err) => {
                return Err(decode_error(format!(
                    "{err} (at byte {})",
                    reader.buffer_position()
                )))
            }
        }
    }
}

fn qualified(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.as_ref()).into_owned()
}

fn check_root(open: &[String], name: &str) -> Result<(), String> {
    if open.is_empty() && name != "rss" {
        return Err(format!("expected <rss> root element, found <{name}>"));
    }
    Ok(())
}

/// Prepare `document` for the element just opened at `path`. Returns true
/// when the element is a text field whose content should be captured.
fn enter(document: &mut RssDocument, path: &[String]) -> bool {
    let path: Vec<&str> = path.iter().map(String::as_str).collect();
    match path.as_slice() {
        ["rss", "channel", "item"] => {
            document.channel.items.push(Item::default());
            false
        }
        ["rss", "channel", "image"] => {
            document.channel.image = Some(Image::default());
            false
        }
        _ => field(document, &path).is_some(),
    }
}

fn store(document: &mut RssDocument, path: &[String], text: String) {
    let path: Vec<&str> = path.iter().map(String::as_str).collect();
    if let Some(slot) = field(document, &path) {
        *slot = text.trim().to_string();
    }
}

/// The text field addressed by an element path, if it is one we keep.
fn field<'a>(document: &'a mut RssDocument, path: &[&str]) -> Option<&'a mut String> {
    let channel = &mut document.channel;
    match path {
        ["rss", "channel", name] => match *name {
            "title" => Some(&mut channel.title),
            "description" => Some(&mut channel.description),
            "link" => Some(&mut channel.link),
            "pubDate" => Some(&mut channel.pub_date),
            "lastBuildDate" => Some(&mut channel.last_build_date),
            "ttl" => Some(&mut channel.ttl),
            "language" => Some(&mut channel.language),
            "managingEditor" => Some(&mut channel.managing_editor),
            "webMaster" => Some(&mut channel.web_master),
            _ => None,
        },
        ["rss", "channel", "image", name] => {
            let image = channel.image.as_mut()?;
            match *name {
                "url" => Some(&mut image.url),
                "title" => Some(&mut image.title),
                "link" => Some(&mut image.link),
                _ => None,
            }
        }
        ["rss", "channel", "item", name] => {
            let item = channel.items.last_mut()?;
            match *name {
                "title" => Some(&mut item.title),
                "description" => Some(&mut item.description),
                "link" => Some(&mut item.link),
                "guid" => Some(&mut item.guid),
                "pubDate" => Some(&mut item.pub_date),
                "georss:point" => Some(&mut item.geo_point),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Scan `items` in order, emitting one result per matching field.
pub fn scan(feed: &str, items: &[Item], pattern: &Regex) -> Vec<SearchResult> {
    let mut results = Vec::new();
    for item in items {
        if pattern.is_match(&item.title) {
            results.push(SearchResult::new(feed, "Title", item.title.as_str()));
        }
        if pattern.is_match(&item.description) {
            results.push(SearchResult::new(feed, "Description", item.description.as_str()));
        }
    }
    results
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// [`Matcher`] for feeds of type [`FEED_TYPE`].
#[derive(Debug, Clone)]
pub struct RssMatcher {
    client: reqwest::Client,
}

impl RssMatcher {
    pub fn new(http: &HttpConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(http.user_agent.as_str())
            .connect_timeout(http.connect_timeout())
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn retrieve(&self, uri: Url) -> Result<RssDocument, SearchError> {
        let transport_error = |err: reqwest::Error| SearchError::Transport {
            uri: uri.to_string(),
            reason: err.to_string(),
        };

        let response = self
            .client
            .get(uri.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SearchError::Status {
                uri: uri.to_string(),
                status: status.as_u16(),
            });
        }

        // Read the whole body so the connection is released before decoding.
        let body = response.bytes().await.map_err(transport_error)?;
        tracing::debug!(uri = %uri, bytes = body.len(), "fetched rss document");
        decode(uri.as_str(), &body)
    }
}

#[async_trait]
impl Matcher for RssMatcher {
    async fn search(
        &self,
        feed: &FeedDescriptor,
        term: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let uri = location(feed)?;
        let pattern = Regex::new(term).map_err(|err| SearchError::Pattern {
            pattern: term.to_string(),
            reason: err.to_string(),
        })?;

        let document = self.retrieve(uri).await?;
        let results = scan(&feed.name, &document.channel.items, &pattern);
        tracing::debug!(
            feed = %feed.name,
            items = document.channel.items.len(),
            results = results.len(),
            "scanned rss document"
        );
        Ok(results)
    }
}

fn location(feed: &FeedDescriptor) -> Result<Url, SearchError> {
    let configuration_error = |reason: String| SearchError::Configuration {
        feed: feed.name.clone(),
        reason,
    };
    if feed.uri.trim().is_empty() {
        return Err(configuration_error("no rss feed uri provided".into()));
    }
    Url::parse(feed.uri.trim()).map_err(|err| configuration_error(format!("invalid uri: {err}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
