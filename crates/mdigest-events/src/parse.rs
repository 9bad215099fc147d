//! Targeted tag extraction for RSS 2.0 and Atom feeds.
//!
//! This is deliberately not an XML parser. It locates `<item>` (or, failing
//! that, `<entry>`) blocks with non-greedy regex matches and pulls out the
//! handful of tags the pipeline needs. Well-formed feeds of the known shapes
//! extract cleanly; malformed or deeply nested documents may yield partial
//! items, never an error.

use std::sync::LazyLock;

use regex::Regex;

/// One feed entry reduced to the fields the pipeline is allowed to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Date text exactly as it appeared in the feed (possibly empty).
    pub published_raw: String,
}

fn tag_regex(tag: &str) -> Regex {
    let t = regex::escape(tag);
    Regex::new(&format!(r"(?is)<{t}\b[^>]*>(.*?)</{t}>")).expect("valid tag regex")
}

static RSS_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<item\b.*?</item>").expect("valid item regex"));
static ATOM_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<entry\b.*?</entry>").expect("valid entry regex"));
static ATOM_LINK_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<link\b[^>]*?\bhref\s*=\s*["']([^"']+)["']"#).expect("valid href regex")
});
static CDATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("valid cdata regex"));

static TITLE: LazyLock<Regex> = LazyLock::new(|| tag_regex("title"));
static LINK: LazyLock<Regex> = LazyLock::new(|| tag_regex("link"));
static PUB_DATE: LazyLock<Regex> = LazyLock::new(|| tag_regex("pubDate"));
static DC_DATE: LazyLock<Regex> = LazyLock::new(|| tag_regex("dc:date"));
static UPDATED: LazyLock<Regex> = LazyLock::new(|| tag_regex("updated"));
static PUBLISHED: LazyLock<Regex> = LazyLock::new(|| tag_regex("published"));

/// Unwrap CDATA sections, then decode the five standard XML entities.
///
/// `&amp;` is decoded first, so `&amp;lt;` becomes `<`.
#[must_use]
pub fn decode_entities(s: &str) -> String {
    CDATA
        .replace_all(s, "$1")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

fn extract(block: &str, re: &Regex) -> String {
    re.captures(block)
        .and_then(|c| c.get(1))
        .map(|m| decode_entities(m.as_str().trim()).trim().to_string())
        .unwrap_or_default()
}

fn or_else_extract(first: String, block: &str, re: &Regex) -> String {
    if first.is_empty() {
        extract(block, re)
    } else {
        first
    }
}

fn accept(title: String, link: String, published_raw: String) -> Option<FeedItem> {
    if title.is_empty() || link.is_empty() {
        return None;
    }
    Some(FeedItem {
        title,
        link,
        published_raw,
    })
}

fn rss_items(xml: &str) -> impl Iterator<Item = FeedItem> + '_ {
    RSS_ITEM.find_iter(xml).filter_map(|m| {
        let block = m.as_str();
        let published = or_else_extract(extract(block, &PUB_DATE), block, &DC_DATE);
        accept(extract(block, &TITLE), extract(block, &LINK), published)
    })
}

fn atom_items(xml: &str) -> impl Iterator<Item = FeedItem> + '_ {
    ATOM_ENTRY.find_iter(xml).filter_map(|m| {
        let block = m.as_str();
        let link = ATOM_LINK_HREF
            .captures(block)
            .and_then(|c| c.get(1))
            .map(|h| decode_entities(h.as_str().trim()).trim().to_string())
            .unwrap_or_default();
        let link = or_else_extract(link, block, &LINK);
        let published = or_else_extract(extract(block, &UPDATED), block, &PUBLISHED);
        accept(extract(block, &TITLE), link, published)
    })
}

/// Lazily extract items from an RSS or Atom document, in feed order.
///
/// RSS `<item>` blocks are tried first. Only when none of them yields an
/// accepted item are Atom `<entry>` blocks considered. Items without both a
/// title and a link are skipped. Text with neither shape yields nothing.
pub fn parse_feed(xml: &str) -> impl Iterator<Item = FeedItem> + '_ {
    let mut rss = rss_items(xml).peekable();
    let atom = if rss.peek().is_none() {
        Some(atom_items(xml))
    } else {
        None
    };
    rss.chain(atom.into_iter().flatten())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>농림축산식품부 보도자료</title>
    <item>
      <title><![CDATA[아프리카돼지열병(ASF) 추가 확진, 긴급 방역]]></title>
      <link>https://www.mafra.go.kr/bbs/view?id=1&amp;page=2</link>
      <pubDate>Mon, 04 Mar 2024 09:00:00 +0900</pubDate>
      <description>본문은 저장하지 않습니다</description>
    </item>
    <item>
      <title>한우 경매가 &quot;소폭&quot; 상승</title>
      <link>https://www.mafra.go.kr/bbs/view?id=2</link>
      <dc:date>2024-03-03T10:00:00+09:00</dc:date>
    </item>
    <item>
      <title>링크 없는 항목</title>
    </item>
  </channel>
</rss>"#;

    const SAMPLE_ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Poultry wire</title>
  <entry>
    <title type="html">HPAI outbreak confirmed in Jeolla</title>
    <link rel="alternate" href="https://news.example.com/hpai?a=1&amp;b=2"/>
    <updated>2024-03-05T01:02:03Z</updated>
  </entry>
  <entry>
    <title>Egg prices steady</title>
    <link>https://news.example.com/eggs</link>
    <published>2024-03-01T00:00:00Z</published>
  </entry>
</feed>"#;

    #[test]
    fn parses_rss_items_in_feed_order() {
        let items: Vec<FeedItem> = parse_feed(SAMPLE_RSS).collect();
        assert_eq!(items.len(), 2, "item without link must be skipped");
        assert_eq!(items[0].title, "아프리카돼지열병(ASF) 추가 확진, 긴급 방역");
        assert_eq!(
            items[0].link,
            "https://www.mafra.go.kr/bbs/view?id=1&page=2"
        );
        assert_eq!(items[0].published_raw, "Mon, 04 Mar 2024 09:00:00 +0900");
        assert_eq!(items[1].title, "한우 경매가 \"소폭\" 상승");
    }

    #[test]
    fn rss_falls_back_to_dublin_core_date() {
        let items: Vec<FeedItem> = parse_feed(SAMPLE_RSS).collect();
        assert_eq!(items[1].published_raw, "2024-03-03T10:00:00+09:00");
    }

    #[test]
    fn channel_title_is_not_an_item() {
        let items: Vec<FeedItem> = parse_feed(SAMPLE_RSS).collect();
        assert!(items.iter().all(|i| i.title != "농림축산식품부 보도자료"));
    }

    #[test]
    fn parses_atom_entries_when_no_rss_items() {
        let items: Vec<FeedItem> = parse_feed(SAMPLE_ATOM).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].link, "https://news.example.com/hpai?a=1&b=2");
        assert_eq!(items[0].published_raw, "2024-03-05T01:02:03Z");
        assert_eq!(items[1].link, "https://news.example.com/eggs");
        assert_eq!(items[1].published_raw, "2024-03-01T00:00:00Z");
    }

    #[test]
    fn rss_wins_over_atom_when_both_present() {
        let mixed = format!("{SAMPLE_RSS}\n{SAMPLE_ATOM}");
        let items: Vec<FeedItem> = parse_feed(&mixed).collect();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.link.contains("mafra.go.kr")));
    }

    #[test]
    fn missing_date_yields_empty_raw_date() {
        let xml = "<rss><channel><item><title>t</title><link>https://a/1</link></item></channel></rss>";
        let items: Vec<FeedItem> = parse_feed(xml).collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].published_raw.is_empty());
    }

    #[test]
    fn unrecognized_text_yields_no_items() {
        assert_eq!(parse_feed("<html><body>maintenance</body></html>").count(), 0);
        assert_eq!(parse_feed("").count(), 0);
    }

    #[test]
    fn truncated_document_degrades_without_error() {
        let xml = "<rss><channel><item><title>Unclosed";
        assert_eq!(parse_feed(xml).count(), 0);
    }

    #[test]
    fn take_stops_after_cap() {
        let items: Vec<FeedItem> = parse_feed(SAMPLE_RSS).take(1).collect();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn decode_entities_handles_all_five_and_cdata() {
        assert_eq!(
            decode_entities("<![CDATA[a]]> &amp; &lt;b&gt; &quot;c&quot; &#39;d&#39;"),
            "a & <b> \"c\" 'd'"
        );
    }

    #[test]
    fn items_tag_is_not_an_item() {
        let xml = "<items><title>x</title><link>https://a</link></items>";
        assert_eq!(parse_feed(xml).count(), 0);
    }
}
