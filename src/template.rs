//! `{{placeholder}}` substitution for the header and footer templates.
//!
//! This is string substitution, not a template language: no escaping, no
//! conditionals, no loops, no nested expansion. A template is parsed once into
//! literal and placeholder segments and can then be rendered against any
//! number of [`Context`]s.
//!
//! ## Lookup Rules
//!
//! | Template      | Context                   | Output          |
//! |---------------|---------------------------|-----------------|
//! | `{{title}}`   | `title = "Home"`          | `Home`          |
//! | `{{title}}`   | `title` present, no value | *(empty)*       |
//! | `{{title}}`   | no `title` entry          | `{{title}}`     |
//!
//! The last row is deliberate: a placeholder whose key the caller never
//! supplied passes through untouched, so incomplete page metadata shows up as
//! literal `{{...}}` text in the output. `retreat-site check` reports those
//! placeholders per page.
//!
//! ## Identifiers
//!
//! A placeholder name is one or more ASCII letters, digits, `_` or `-`, with
//! nothing else between the braces. `{{ title }}` is plain text.
//!
//! Values are inserted verbatim and never re-scanned, so a value containing
//! `{{other}}` or `$1` comes out exactly as written.

use std::collections::BTreeMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Placeholder values for one render.
///
/// Each key maps to an optional value. `Some("")` and `None` both render as
/// the empty string; the distinction only matters for [`Context::get`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: BTreeMap<String, Option<String>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a key with a value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), Some(value.into()));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.values.insert(key.into(), value);
    }

    /// `None` if the key is absent, `Some(None)` if present without a value.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.values.get(key).map(|v| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = Context::new();
        for (k, v) in iter {
            ctx.insert(k, Some(v.into()));
        }
        ctx
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Split `source` into literal runs and placeholders. Never fails: anything
    /// that is not a well-formed placeholder is literal text.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(pos) = rest.find(OPEN) {
            literal.push_str(&rest[..pos]);
            let after_open = &rest[pos + OPEN.len()..];
            match placeholder_name(after_open) {
                Some(name) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(name.to_string()));
                    rest = &after_open[name.len() + CLOSE.len()..];
                }
                None => {
                    // Keep one brace and rescan from the second, so `{{{x}}}`
                    // still finds `{{x}}`.
                    literal.push('{');
                    rest = &rest[pos + 1..];
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Substitute every placeholder that has an entry in `context`.
    pub fn render(&self, context: &Context) -> String {
        let mut out = String::with_capacity(self.len_hint());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => match context.get(name) {
                    Some(value) => out.push_str(value.unwrap_or("")),
                    None => {
                        out.push_str(OPEN);
                        out.push_str(name);
                        out.push_str(CLOSE);
                    }
                },
            }
        }
        out
    }

    /// Placeholder names in order of first appearance, without duplicates.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(name) = segment {
                if !seen.contains(&name.as_str()) {
                    seen.push(name.as_str());
                }
            }
        }
        seen
    }

    /// Placeholders this context would leave unrendered.
    pub fn unresolved(&self, context: &Context) -> Vec<&str> {
        self.placeholders()
            .into_iter()
            .filter(|name| !context.contains_key(name))
            .collect()
    }

    fn len_hint(&self) -> usize {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(t) => t.len(),
                Segment::Placeholder(n) => n.len() + OPEN.len() + CLOSE.len(),
            })
            .sum()
    }
}

/// Parse and render in one step.
pub fn render(template: &str, context: &Context) -> String {
    Template::parse(template).render(context)
}

/// If `s` starts with `name}}` for a valid identifier, return `name`.
fn placeholder_name(s: &str) -> Option<&str> {
    let end = s
        .find(|c: char| !is_ident_char(c))
        .unwrap_or(s.len());
    if end == 0 || !s[end..].starts_with(CLOSE) {
        return None;
    }
    Some(&s[..end])
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
