//! Markdown to HTML conversion and the post-processing passes.
//!
//! Rendering uses `pulldown-cmark` with the common extensions enabled. Fenced
//! code blocks whose language `syntect` recognizes are replaced by
//! syntax-highlighted HTML (inline styles from the configured theme); other
//! code blocks keep the plain `<pre><code class="language-x">` form.
//!
//! Two string passes then run on the rendered HTML, in this order:
//!
//! 1. **Extension rewrite**: every `.md` becomes `.html`. This is a blunt text
//!    replacement over the whole document, not a link rewriter, so prose such
//!    as "see readme.md" and words like `foo.mdx` are rewritten too.
//! 2. **Image placeholders**: a paragraph whose only content is
//!    `{IMAGE <path>}` becomes `<img src="<asset_prefix><path>">`.
//!
//! ```text
//! {IMAGE shots/home.png}   →   <img src="../.github/shots/home.png">
//! ```
//!
//! Placeholders with surrounding text are left alone. The image pass matches
//! rendered HTML, so markdown inside the path is rendered first and lands in
//! the attribute as-is: `{IMAGE a/*b*.png}` gives `src="../.github/a/<em>b</em>.png"`.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html as md_html};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

static IMAGE_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p>\{IMAGE ([^}]+)\}</p>").unwrap());

/// Syntect's bundled syntaxes and themes, loaded on first use.
static HIGHLIGHTER: LazyLock<Highlighter> = LazyLock::new(Highlighter::load);

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

struct Highlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl Highlighter {
    fn load() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    /// Highlighted HTML, or `None` when the language or theme is unknown.
    fn highlight(&self, code: &str, lang: &str, theme: &str) -> Option<String> {
        if lang.is_empty() {
            return None;
        }
        let syntax = self.syntaxes.find_syntax_by_token(lang)?;
        let theme = self.themes.themes.get(theme)?;
        highlighted_html_for_string(code, &self.syntaxes, syntax, theme).ok()
    }
}

/// Whether `name` is one of syntect's bundled themes.
pub fn has_theme(name: &str) -> bool {
    HIGHLIGHTER.themes.themes.contains_key(name)
}

/// Settings for [`to_html`], resolved from the site config.
#[derive(Debug, Clone)]
pub struct MarkupOptions {
    /// Source document extension without the dot (`md`).
    pub source_extension: String,
    /// Output page extension without the dot (`html`).
    pub output_extension: String,
    /// Prefix prepended to every `{IMAGE ...}` path.
    pub asset_prefix: String,
    /// Theme for code block highlighting; `None` leaves code blocks plain.
    pub highlight_theme: Option<String>,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            source_extension: "md".to_string(),
            output_extension: "html".to_string(),
            asset_prefix: "../.github/".to_string(),
            highlight_theme: Some(DEFAULT_THEME.to_string()),
        }
    }
}

/// Render markdown and apply both post-processing passes.
pub fn to_html(markdown: &str, options: &MarkupOptions) -> String {
    let html = render_markdown(markdown, options.highlight_theme.as_deref());
    let html = rewrite_extensions(&html, &options.source_extension, &options.output_extension);
    replace_image_placeholders(&html, &options.asset_prefix)
}

pub fn render_markdown(markdown: &str, highlight_theme: Option<&str>) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, opts);
    let mut html = String::new();
    match highlight_theme {
        Some(theme) => {
            md_html::push_html(&mut html, highlight_code_blocks(parser, theme).into_iter())
        }
        None => md_html::push_html(&mut html, parser),
    }
    html
}

/// Swap each fenced code block with a known language for one raw HTML event.
///
/// Blocks are buffered from `Start(CodeBlock)` to `End(CodeBlock)`; when the
/// language is unknown the buffered events are passed through untouched.
fn highlight_code_blocks<'a>(parser: Parser<'a>, theme: &str) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut block: Option<(String, Vec<Event<'a>>)> = None;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref info))) if block.is_none() => {
                // info strings like "rust,ignore" or "rust title" name the language first
                let lang = info
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .next()
                    .unwrap_or_default()
                    .to_string();
                block = Some((lang, vec![event]));
            }
            Event::End(TagEnd::CodeBlock) if block.is_some() => {
                let Some((lang, mut buffered)) = block.take() else {
                    continue;
                };
                let code: String = buffered
                    .iter()
                    .filter_map(|e| match e {
                        Event::Text(text) => Some(text.as_ref()),
                        _ => None,
                    })
                    .collect();
                match HIGHLIGHTER.highlight(&code, &lang, theme) {
                    Some(highlighted) => events.push(Event::Html(highlighted.into())),
                    None => {
                        buffered.push(event);
                        events.append(&mut buffered);
                    }
                }
            }
            event => match block.as_mut() {
                Some((_, buffered)) => buffered.push(event),
                None => events.push(event),
            },
        }
    }
    events
}

/// Replace every `.{from}` with `.{to}`, anywhere in the text.
pub fn rewrite_extensions(html: &str, from: &str, to: &str) -> String {
    html.replace(&format!(".{from}"), &format!(".{to}"))
}

pub fn replace_image_placeholders(html: &str, asset_prefix: &str) -> String {
    IMAGE_PARAGRAPH
        .replace_all(html, |caps: &Captures| {
            format!("<img src=\"{asset_prefix}{}\">", &caps[1])
        })
        .into_owned()
}
