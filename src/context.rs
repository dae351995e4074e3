use std::path::PathBuf;

use crate::config::SiteConfig;

pub(crate) const STYLESHEET: &str = "styles.css";
pub(crate) const CLIENT_SCRIPT: &str = "script.js";
pub(crate) const INDEX_FILE: &str = "blog-data.json";
pub(crate) const POSTS_OUT_DIR: &str = "blogs";
pub(crate) const ASSETS_OUT_DIR: &str = "assets";
pub(crate) const MARKDOWN_EXTENSION: &str = ".md";

/// Everything one build needs to know. Built once in `main` and passed down by reference.
#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub posts_dir: PathBuf,
    pub source_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub out_dir: PathBuf,

    pub site: SiteConfig,
}

impl Context {
    pub fn new(
        posts_dir: PathBuf,
        source_dir: PathBuf,
        assets_dir: PathBuf,
        out_dir: PathBuf,
        site: SiteConfig,
    ) -> Self {
        Self {
            posts_dir,
            source_dir,
            assets_dir,
            out_dir,
            site,
        }
    }

    pub fn posts_out_dir(&self) -> PathBuf {
        self.out_dir.join(POSTS_OUT_DIR)
    }

    pub fn assets_out_dir(&self) -> PathBuf {
        self.out_dir.join(ASSETS_OUT_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.out_dir.join(INDEX_FILE)
    }
}
