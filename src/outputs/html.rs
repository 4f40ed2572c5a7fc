//! A minimal typed HTML builder.
//!
//! [`Markup`] can only be produced by escaping text or by rendering an
//! [`Element`], so extracted content cannot reach the page unescaped. Anchors
//! are only emitted for absolute `http`/`https` URLs.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;
use url::Url;

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
// Only absolute http(s) links become anchors.
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\((https?://(?:[^()\s]|\([^()\s]*\))+)\)").unwrap());

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Already-safe HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    /// Escaped text.
    pub fn text(s: &str) -> Self {
        Markup(escape(s))
    }

    /// Escaped text with `**bold**` and `[text](url)` turned into tags.
    pub fn inline(s: &str) -> Self {
        let escaped = escape(s);
        let linked = LINK_RE.replace_all(&escaped, r#"<a href="$2" target="_blank" rel="noopener">$1</a>"#);
        let bolded = BOLD_RE.replace_all(&linked, "<strong>$1</strong>");
        Markup(bolded.into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Element> for Markup {
    fn from(element: Element) -> Self {
        element.render()
    }
}

/// An HTML element with escaped attributes and markup children.
#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Markup>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: &str) -> Self {
        self.attrs.push((name, escape(value)));
        self
    }

    pub fn class(self, value: &str) -> Self {
        self.attr("class", value)
    }

    pub fn id(self, value: &str) -> Self {
        self.attr("id", value)
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, M>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Markup>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append escaped text.
    pub fn text(self, s: &str) -> Self {
        self.child(Markup::text(s))
    }

    /// Append escaped text with inline bold/link markup.
    pub fn inline(self, s: &str) -> Self {
        self.child(Markup::inline(s))
    }

    pub fn render(&self) -> Markup {
        let mut out = String::new();
        write!(out, "<{}", self.tag).unwrap();
        for (name, value) in &self.attrs {
            write!(out, " {}=\"{}\"", name, value).unwrap();
        }
        out.push('>');
        for child in &self.children {
            out.push_str(child.as_str());
        }
        write!(out, "</{}>", self.tag).unwrap();
        Markup(out)
    }
}

/// `<strong>label：</strong>` followed by inline text, wrapped in `tag`.
pub fn labeled(tag: &'static str, label: &str, value: &str) -> Element {
    Element::new(tag)
        .child(Element::new("strong").text(&format!("{}：", label)))
        .inline(value)
}

/// Whether `url` is an absolute `http` or `https` URL.
pub fn is_web_url(url: &str) -> bool {
    Url::parse(url.trim()).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

/// An anchor opening in a new tab, or `None` for any non-web URL.
pub fn link(url: &str, text: &str) -> Option<Element> {
    if !is_web_url(url) {
        return None;
    }
    Some(
        Element::new("a")
            .attr("href", url.trim())
            .attr("target", "_blank")
            .attr("rel", "noopener")
            .text(text),
    )
}
