use std::path::PathBuf;

use log::info;

use crate::metadata::PostMetadata;

/// A Markdown file found in the posts directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PostSource {
    pub slug: String,
    pub path: PathBuf,
}

/// Outcome of one build step. Only `Fatal` stops the build.
#[derive(Debug)]
pub(super) enum Step<T> {
    Done(T),
    Skipped(String),
    Fatal(anyhow::Error),
}

impl<T> Step<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Step<U> {
        match self {
            Step::Done(value) => Step::Done(f(value)),
            Step::Skipped(reason) => Step::Skipped(reason),
            Step::Fatal(e) => Step::Fatal(e),
        }
    }

    /// Logs a skip and falls back to `fallback`. `Fatal` becomes the error.
    pub fn or_skip(self, fallback: T) -> anyhow::Result<T> {
        match self {
            Step::Done(value) => Ok(value),
            Step::Skipped(reason) => {
                info!("{reason}");
                Ok(fallback)
            }
            Step::Fatal(e) => Err(e),
        }
    }
}

#[derive(Debug)]
pub(crate) struct BuildReport {
    pub static_pages: usize,
    pub assets_copied: bool,
    /// Newest first, as persisted.
    pub posts: Vec<PostMetadata>,
}
