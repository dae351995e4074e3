use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::{config::SiteConfig, date::format_long, metadata::PostMetadata};

/// Post pages live one level below the site root, so site-relative links need a prefix.
fn from_post_dir(href: &str) -> String {
    if href.contains("://") || href.starts_with('/') || href.starts_with('#') {
        href.to_string()
    } else {
        format!("../{href}")
    }
}

fn footer(site: &SiteConfig) -> Markup {
    html! {
        footer {
            @if !site.social.is_empty() {
                div.social-icons {
                    @for link in &site.social {
                        a href=(link.href) title=(link.title) {
                            @match &link.icon {
                                Some(svg) => { (PreEscaped(svg)) }
                                None => { (link.title) }
                            }
                        }
                    }
                }
            }
            p {
                "© "
                @if let Some(year) = site.copyright_year {
                    (year) " "
                }
                (site.owner)
            }
        }
    }
}

/// Wraps a rendered post in the site's page shell. `post.content` is embedded verbatim.
pub(crate) fn render_post_page(site: &SiteConfig, post: &PostMetadata) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="author" content=(post.author);
                title { (post.title) " - " (site.owner) }
                link rel="stylesheet" href="../styles.css";
            }
            body {
                main.container {
                    header {
                        nav {
                            @for link in site.nav.iter() {
                                a href=(from_post_dir(&link.href)) { (link.label) }
                            }
                            @for link in site.social.iter() {
                                a href=(link.href) { (link.title) }
                            }
                        }
                    }

                    a.back-link href="../blog.html" { "← Back to Blog" }

                    article {
                        h1.page-title { (post.title) }
                        p.blog-meta { (format_long(&post.date)) }
                        div.blog-post-content {
                            (PreEscaped(&post.content))
                        }
                    }

                    hr;

                    (footer(site))
                }
            }
        }
    }
    .into_string()
}
