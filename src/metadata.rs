use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    config::SiteConfig,
    date::to_iso_string,
    front_matter::{self, Attributes},
};

pub(crate) const UNTITLED: &str = "Untitled";
pub(crate) const EXCERPT_CHARS: usize = 150;
pub(crate) const EXCERPT_MARKER: &str = "...";

/// One post as it appears in `blog-data.json`. `content` only ever reaches the generated page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct PostMetadata {
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub slug: String,
    pub author: String,

    #[serde(skip)]
    pub content: String,
}

/// Fills the defaults for whatever the front-matter leaves out.
///
/// `body` is the raw Markdown, which is what the excerpt is cut from, and
/// `content` is its rendered HTML. `now` stands in for a missing `date`
/// unless the site requires explicit dates.
pub(crate) fn build_metadata(
    slug: &str,
    attributes: &Attributes,
    body: &str,
    content: String,
    site: &SiteConfig,
    now: DateTime<Utc>,
) -> anyhow::Result<PostMetadata> {
    let date = match front_matter::text(attributes, "date") {
        Some(date) => date,
        None if site.require_dates => bail!("post {slug:?} has no date"),
        None => to_iso_string(now),
    };

    Ok(PostMetadata {
        title: front_matter::text(attributes, "title").unwrap_or_else(|| UNTITLED.to_string()),
        date,
        excerpt: front_matter::text(attributes, "excerpt").unwrap_or_else(|| excerpt(body)),
        slug: slug.to_string(),
        author: front_matter::text(attributes, "author")
            .unwrap_or_else(|| site.author().to_string()),
        content,
    })
}

/// First characters of the raw body plus the marker, which is appended even to short bodies.
pub(crate) fn excerpt(body: &str) -> String {
    let mut excerpt: String = body.chars().take(EXCERPT_CHARS).collect();
    excerpt.push_str(EXCERPT_MARKER);
    excerpt
}
