use std::{borrow::Borrow, cmp::Ordering};

use crate::{context::MARKDOWN_EXTENSION, date::parse_date, metadata::PostMetadata};

// ordering by date(descending). unparseable dates go last, ties keep their input order.
pub(super) fn sort_posts<T: Borrow<PostMetadata>>(a: &T, b: &T) -> Ordering {
    match (parse_date(&a.borrow().date), parse_date(&b.borrow().date)) {
        (Some(ref a_date), Some(ref b_date)) => b_date.cmp(a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `hello.md` -> `hello`. Anything else is not a post.
pub(super) fn slug_of(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(MARKDOWN_EXTENSION)
        .filter(|slug| !slug.is_empty())
}
