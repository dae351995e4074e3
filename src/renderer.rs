use pulldown_cmark::{html, Event, Options, Parser};

use crate::config::{MarkdownConfig, RawHtml};

pub(crate) trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

#[derive(Debug, Clone)]
pub(crate) struct CmarkRenderer {
    options: Options,
    hard_breaks: bool,
    raw_html: RawHtml,
}

impl CmarkRenderer {
    pub fn new(config: &MarkdownConfig) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);

        Self {
            options,
            hard_breaks: config.hard_breaks,
            raw_html: config.raw_html,
        }
    }

    fn map_event<'a>(&self, event: Event<'a>) -> Event<'a> {
        match event {
            Event::SoftBreak if self.hard_breaks => Event::HardBreak,
            Event::Html(raw) | Event::InlineHtml(raw) if self.raw_html == RawHtml::Escape => {
                Event::Text(raw)
            }
            _ => event,
        }
    }
}

impl Default for CmarkRenderer {
    fn default() -> Self {
        Self::new(&MarkdownConfig::default())
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options).map(|event| self.map_event(event));

        let mut body_html = String::new();
        html::push_html(&mut body_html, parser);
        body_html
    }
}
