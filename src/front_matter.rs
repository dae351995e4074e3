use std::sync::OnceLock;

use anyhow::Context;
use log::warn;
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};
use serde_yaml::Value as Yaml;

pub(crate) type Attributes = Map<String, Value>;

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Document {
    pub attributes: Attributes,
    pub body: String,
}

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // opening fence, optional block, closing fence, body
        RegexBuilder::new(
            r"\A\x{FEFF}?---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)(.*)\z",
        )
        .dot_matches_new_line(true)
        .build()
        .expect("front-matter pattern is valid")
    })
}

/// Splits a post into its `---` delimited YAML block and the body that follows.
///
/// A block that is not valid YAML is an error; one that is valid but not a
/// mapping yields no attributes.
pub(crate) fn parse(raw: &str) -> anyhow::Result<Document> {
    let Some(caps) = header_pattern().captures(raw) else {
        return Ok(Document {
            attributes: Attributes::new(),
            body: raw.to_string(),
        });
    };

    let attributes = match caps.get(1).map(|m| m.as_str()) {
        Some(header) if !is_blank(header) => {
            // block scalars expect their closing line break
            let yaml: Yaml =
                serde_yaml::from_str(&format!("{header}\n")).context("Invalid front-matter")?;
            to_attributes(yaml)?
        }
        _ => Attributes::new(),
    };

    Ok(Document {
        attributes,
        body: caps.get(2).map_or("", |m| m.as_str()).to_string(),
    })
}

fn is_blank(header: &str) -> bool {
    header
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'))
}

fn to_attributes(yaml: Yaml) -> anyhow::Result<Attributes> {
    let mapping = match yaml {
        Yaml::Mapping(mapping) => mapping,
        Yaml::Null => return Ok(Attributes::new()),
        other => {
            warn!("Ignoring front-matter that is not a mapping: {other:?}");
            return Ok(Attributes::new());
        }
    };

    let mut attributes = Attributes::new();
    for (key, value) in mapping {
        let key = match key {
            Yaml::String(s) => s,
            Yaml::Number(n) => n.to_string(),
            Yaml::Bool(b) => b.to_string(),
            other => {
                warn!("Ignoring front-matter key {other:?}");
                continue;
            }
        };
        let value = serde_json::to_value(&value)
            .with_context(|| format!("front-matter value of {key:?}"))?;
        attributes.insert(key, value);
    }
    Ok(attributes)
}

/// Reads an attribute as text, treating falsy values (`""`, `false`, `0`, null) as absent.
pub(crate) fn text(attributes: &Attributes, key: &str) -> Option<String> {
    match attributes.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(raw: &str) -> Document {
        parse(raw).unwrap()
    }

    #[test]
    fn splits_header_and_body() {
        let doc = parse_ok("---\ntitle: Alpha\ndate: 2024-01-01\n---\n# Hello\n\nworld\n");
        assert_eq!(doc.attributes["title"], "Alpha");
        assert_eq!(doc.attributes["date"], "2024-01-01");
        assert_eq!(doc.body, "# Hello\n\nworld\n");
    }

    #[test]
    fn document_without_fence_is_all_body() {
        let doc = parse_ok("just text\n---\nnot: metadata\n");
        assert!(doc.attributes.is_empty());
        assert_eq!(doc.body, "just text\n---\nnot: metadata\n");
    }

    #[test]
    fn empty_block_is_allowed() {
        let doc = parse_ok("---\n---\nbody");
        assert!(doc.attributes.is_empty());
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn stops_at_first_closing_fence() {
        let doc = parse_ok("---\ntitle: A\n---\nintro\n\n---\n\nafter rule\n");
        assert_eq!(doc.attributes.len(), 1);
        assert_eq!(doc.body, "intro\n\n---\n\nafter rule\n");
    }

    #[test]
    fn handles_crlf() {
        let doc = parse_ok("---\r\ntitle: Windows\r\n---\r\nbody\r\n");
        assert_eq!(doc.attributes["title"], "Windows");
        assert_eq!(doc.body, "body\r\n");
    }

    #[test]
    fn keeps_colons_inside_values() {
        let doc = parse_ok("---\ndate: 2025-01-05T10:30:00Z\ntitle: \"Rust: a story\"\n---\n");
        assert_eq!(doc.attributes["date"], "2025-01-05T10:30:00Z");
        assert_eq!(doc.attributes["title"], "Rust: a story");
        assert_eq!(doc.body, "");
    }

    #[test]
    fn infers_scalars() {
        let doc = parse_ok(
            "---\ndraft: false\ncount: 3\nratio: 0.5\nnothing: ~\n# comment\n---\n",
        );
        assert_eq!(doc.attributes["draft"], Value::Bool(false));
        assert_eq!(doc.attributes["count"], 3);
        assert_eq!(doc.attributes["ratio"], 0.5);
        assert_eq!(doc.attributes["nothing"], Value::Null);
        assert_eq!(doc.attributes.len(), 4);
    }

    #[test]
    fn text_follows_truthiness() {
        let doc = parse_ok("---\na: ''\nb: false\nc: 0\nd: 42\ne: yes\nf: true\n---\n");
        assert_eq!(text(&doc.attributes, "a"), None);
        assert_eq!(text(&doc.attributes, "b"), None);
        assert_eq!(text(&doc.attributes, "c"), None);
        assert_eq!(text(&doc.attributes, "d").as_deref(), Some("42"));
        assert_eq!(text(&doc.attributes, "e").as_deref(), Some("yes"));
        assert_eq!(text(&doc.attributes, "f").as_deref(), Some("true"));
        assert_eq!(text(&doc.attributes, "missing"), None);
    }

    #[test]
    fn folded_block_scalar_is_one_value() {
        let doc =
            parse_ok("---\ntitle: 'It''s here'\nexcerpt: >\n  Rust: why I like it\n---\nbody\n");
        assert_eq!(doc.attributes.len(), 2);
        assert_eq!(doc.attributes["title"], "It's here");
        assert_eq!(doc.attributes["excerpt"], "Rust: why I like it\n");
        assert_eq!(doc.body, "body\n");
    }

    #[test]
    fn literal_block_keeps_newlines() {
        let doc = parse_ok("---\nexcerpt: |\n  line one\n  line two\n---\n");
        assert_eq!(doc.attributes["excerpt"], "line one\nline two\n");
    }

    #[test]
    fn double_quoted_escapes_are_decoded() {
        let doc = parse_ok("---\ntitle: \"Say \\\"hi\\\" twice\"\n---\n");
        assert_eq!(doc.attributes["title"], "Say \"hi\" twice");
    }

    #[test]
    fn nested_values_survive() {
        let doc = parse_ok("---\ntags:\n  - rust\n  - web\n---\n");
        assert_eq!(doc.attributes["tags"], serde_json::json!(["rust", "web"]));
    }

    #[test]
    fn non_mapping_block_has_no_attributes() {
        let doc = parse_ok("---\n- just\n- a list\n---\nbody");
        assert!(doc.attributes.is_empty());
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn comment_only_block_has_no_attributes() {
        let doc = parse_ok("---\n# nothing yet\n---\nbody");
        assert!(doc.attributes.is_empty());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(parse("---\ntitle: [unclosed\n---\nbody").is_err());
        assert!(parse("---\ntitle: A\nbogus line\n---\n").is_err());
    }
}
