//! HTML to text conversion

use html2text::render::text_renderer::{TaggedLine, TextDecorator};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

/// Tag openings and character references the HTML parser would act on
static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<+[A-Za-z!/?]|&+(?:#[0-9]+|#[xX][0-9A-Fa-f]+|[A-Za-z][A-Za-z0-9]*);")
        .expect("Markup pattern must compile")
});

/// Decorator that renders only the text content
///
/// Links, emphasis, code, list bullets and header markers produce nothing.
/// Images produce nothing either, not even their alt or title text.
#[derive(Debug, Clone, Default)]
pub struct PlainTextDecorator;

impl TextDecorator for PlainTextDecorator {
    type Annotation = ();

    fn decorate_link_start(&mut self, _url: &str) -> (String, Self::Annotation) {
        (String::new(), ())
    }

    fn decorate_link_end(&mut self) -> String {
        String::new()
    }

    fn decorate_em_start(&self) -> (String, Self::Annotation) {
        (String::new(), ())
    }

    fn decorate_em_end(&self) -> String {
        String::new()
    }

    fn decorate_strong_start(&self) -> (String, Self::Annotation) {
        (String::new(), ())
    }

    fn decorate_strong_end(&self) -> String {
        String::new()
    }

    fn decorate_strikeout_start(&self) -> (String, Self::Annotation) {
        (String::new(), ())
    }

    fn decorate_strikeout_end(&self) -> String {
        String::new()
    }

    fn decorate_code_start(&self) -> (String, Self::Annotation) {
        (String::new(), ())
    }

    fn decorate_code_end(&self) -> String {
        String::new()
    }

    fn decorate_preformat_first(&self) -> Self::Annotation {}

    fn decorate_preformat_cont(&self) -> Self::Annotation {}

    fn decorate_image(&mut self, _src: &str, _title: &str) -> (String, Self::Annotation) {
        (String::new(), ())
    }

    fn header_prefix(&self, _level: usize) -> String {
        String::new()
    }

    fn quote_prefix(&self) -> String {
        String::new()
    }

    fn unordered_item_prefix(&self) -> String {
        String::new()
    }

    fn ordered_item_prefix(&self, _i: i64) -> String {
        String::new()
    }

    fn finalise(&mut self, _links: Vec<String>) -> Vec<TaggedLine<()>> {
        Vec::new()
    }

    fn make_subblock_decorator(&self) -> Self {
        PlainTextDecorator
    }
}

/// Render HTML as plain text, dropping links, images and emphasis markup
///
/// `width` is the wrap column of the renderer. Keep it wide so paragraphs
/// stay on one line for the line filter.
pub fn html_to_text(html: &str, width: usize) -> String {
    html2text::from_read_with_decorator(html.as_bytes(), width, PlainTextDecorator)
}

/// Whether the text holds a tag or character reference
pub fn looks_like_markup(text: &str) -> bool {
    MARKUP.is_match(text)
}

/// Drop the `<` and `&` that would make rendered text parse as markup again
///
/// Text such as `&lt;b&gt;` renders to a literal `<b>`. Removing the leading
/// delimiter keeps the words while making the output plain text.
pub fn defuse_markup(text: &str) -> String {
    let mut text = text.to_string();
    while MARKUP.is_match(&text) {
        text = MARKUP
            .replace_all(&text, |caps: &regex::Captures| {
                caps[0].trim_start_matches(['<', '&']).to_string()
            })
            .into_owned();
    }
    text
}

/// Strip tags from a short inline fragment such as a result title
pub fn strip_tags(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    parsed
        .root_element()
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
