//! Static RSS documents used across harnesses.
//!
//! `SOURCE_A` and `SOURCE_B` back the two-feed end-to-end scenario: a
//! search for "president" finds one title and one description in A and
//! nothing in B.

/// Two matches for "president": item 1's title, item 2's description.
pub const SOURCE_A: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Source A</title>
    <link>http://a/</link>
    <description>Headlines from A</description>
    <item>
      <title>The president visits the coast</title>
      <description>Officials toured storm damage on Tuesday.</description>
      <link>http://a/1</link>
    </item>
    <item>
      <title>Budget talks resume</title>
      <description>Lawmakers met with the president's staff.</description>
      <link>http://a/2</link>
    </item>
    <item>
      <title>Local team wins</title>
      <description>A late goal sealed the title.</description>
      <link>http://a/3</link>
    </item>
  </channel>
</rss>
"#;

/// No matches for "president".
pub const SOURCE_B: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Source B</title>
    <item>
      <title>Weather turns cold</title>
      <description>Snow expected overnight.</description>
    </item>
  </channel>
</rss>
"#;

/// Not an RSS document at all.
pub const MALFORMED: &str = "<rss><channel><item><title>cut off";

pub const A_TITLE_MATCH: &str = "The president visits the coast";
pub const A_DESCRIPTION_MATCH: &str = "Lawmakers met with the president's staff.";

/// Laid out like the NPR and BBC feeds: `atom:link`, `itunes:*` and
/// `media:*` elements alongside the plain RSS ones, plus inline markup in a
/// description. One title match and one description match for "president".
pub const SOURCE_NAMESPACED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom"
     xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd"
     xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>News</title>
    <link>http://n/</link>
    <atom:link href="http://n/rss" rel="self" type="application/rss+xml"/>
    <description>Namespaced source</description>
    <item>
      <title>The president arrives in Ohio</title>
      <itunes:title>Morning briefing</itunes:title>
      <description>Crowds gathered early.</description>
      <media:description>Photo caption</media:description>
      <link>http://n/1</link>
    </item>
    <item>
      <title>Senate schedules vote</title>
      <description><![CDATA[Aides to the <b>president</b> expect a close count.]]></description>
      <media:title>Capitol at dusk</media:title>
      <link>http://n/2</link>
    </item>
  </channel>
</rss>
"#;

pub const NAMESPACED_TITLE_MATCH: &str = "The president arrives in Ohio";
pub const NAMESPACED_DESCRIPTION_MATCH: &str = "Aides to the <b>president</b> expect a close count.";
