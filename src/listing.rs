use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use log::debug;
use maud::html;

use crate::{context::POSTS_OUT_DIR, date::format_short, metadata::PostMetadata};

pub(crate) const NO_POSTS: &str = r#"<p class="no-posts">No posts yet.</p>"#;

pub(crate) fn load_index(index_path: &Path) -> anyhow::Result<Vec<PostMetadata>> {
    let fd = File::open(index_path).with_context(|| format!("while opening {index_path:?}"))?;
    let reader = BufReader::new(fd);
    serde_json::from_reader(reader).with_context(|| format!("while parsing {index_path:?}"))
}

/// Renders the post list the way the browser does: entries in stored order, or the
/// placeholder when the index is empty or could not be loaded.
pub(crate) fn render_listing(index: anyhow::Result<Vec<PostMetadata>>) -> String {
    let posts = match index {
        Ok(posts) if !posts.is_empty() => posts,
        Ok(_) => return NO_POSTS.to_string(),
        Err(e) => {
            debug!("post index unavailable: {e:#}");
            return NO_POSTS.to_string();
        }
    };

    html! {
        @for post in &posts {
            div.blog-item {
                a href=(format!("{POSTS_OUT_DIR}/{}.html", post.slug)) { (post.title) }
                span.date { (format_short(&post.date)) }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(slug: &str, title: &str, date: &str) -> PostMetadata {
        PostMetadata {
            title: title.to_string(),
            date: date.to_string(),
            excerpt: String::new(),
            slug: slug.to_string(),
            author: String::new(),
            content: String::new(),
        }
    }

    #[test]
    fn renders_entries_in_stored_order() {
        let html = render_listing(Ok(vec![
            entry("a", "Alpha", "2024-01-01"),
            entry("b", "Beta", "2025-06-01"),
        ]));
        assert_eq!(
            html,
            concat!(
                r#"<div class="blog-item"><a href="blogs/a.html">Alpha</a><span class="date">Jan 1, 2024</span></div>"#,
                r#"<div class="blog-item"><a href="blogs/b.html">Beta</a><span class="date">Jun 1, 2025</span></div>"#,
            )
        );
    }

    #[test]
    fn empty_index_shows_placeholder() {
        assert_eq!(render_listing(Ok(vec![])), NO_POSTS);
    }

    #[test]
    fn unreadable_index_shows_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(render_listing(load_index(&dir.path().join("missing.json"))), NO_POSTS);

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "[{").unwrap();
        assert_eq!(render_listing(load_index(&broken)), NO_POSTS);
    }

    #[test]
    fn loads_index_written_by_the_builder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blog-data.json");
        std::fs::write(
            &path,
            r#"[{"title":"Beta","date":"2025-06-01","excerpt":"b...","slug":"b","author":"Jane"}]"#,
        )
        .unwrap();

        let posts = load_index(&path).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "b");
        assert!(posts[0].content.is_empty());
    }
}
