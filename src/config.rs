use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use log::info;
use serde::Deserialize;

pub(crate) const OWNER_ENV: &str = "BLOG_OWNER";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct SocialLink {
    pub title: String,
    pub href: String,
    /// Inline SVG markup, embedded as is.
    #[serde(default)]
    pub icon: Option<String>,
}

/// What to do with raw HTML found in post bodies.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RawHtml {
    #[default]
    Trusted,
    Escape,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub(crate) struct MarkdownConfig {
    pub hard_breaks: bool,
    pub raw_html: RawHtml,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct SiteConfig {
    pub owner: String,
    pub default_author: Option<String>,
    pub nav: Vec<Link>,
    pub social: Vec<SocialLink>,
    pub copyright_year: Option<i32>,
    pub static_pages: Vec<String>,
    pub require_dates: bool,
    pub markdown: MarkdownConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let link = |label: &str, href: &str| Link {
            label: label.to_string(),
            href: href.to_string(),
        };
        Self {
            owner: "Anonymous".to_string(),
            default_author: None,
            nav: vec![
                link("Home", "index.html"),
                link("Blog", "blog.html"),
                link("Contact", "contact.html"),
            ],
            social: vec![],
            copyright_year: None,
            static_pages: ["index.html", "blog.html", "contact.html"]
                .map(String::from)
                .to_vec(),
            require_dates: false,
            markdown: MarkdownConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Author used for posts whose front-matter names none.
    pub fn author(&self) -> &str {
        self.default_author.as_deref().unwrap_or(&self.owner)
    }

    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        if let Some(owner) = owner.filter(|o| !o.is_empty()) {
            self.owner = owner;
        }
        self
    }
}

pub(crate) fn load_config(config_file_path: &Path) -> anyhow::Result<SiteConfig> {
    let config: SiteConfig = if config_file_path.exists() {
        let fd = File::open(config_file_path)
            .with_context(|| format!("while opening {config_file_path:?}"))?;
        let reader = BufReader::new(fd);
        serde_json::from_reader(reader)
            .with_context(|| format!("while parsing {config_file_path:?}"))?
    } else {
        info!("Config file({config_file_path:?}) does not exist. using defaults...");
        SiteConfig::default()
    };

    Ok(config.with_owner(std::env::var(OWNER_ENV).ok()))
}
