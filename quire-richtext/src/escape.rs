//! Markup escaping used by the serializer.
//!
//! Every string taken from content (text runs, link targets, media sources
//! and alt texts) passes through an [`Escaper`] exactly once before it is
//! placed into a rendered unit. The serializer never escapes its own output
//! again.
use std::borrow::Cow;

/// Escapes untrusted text for inclusion in markup, both as element content
/// and as a double- or single-quoted attribute value.
pub trait Escaper: Send + Sync {
  fn escape<'a>(&self, input: &'a str) -> Cow<'a, str>;
}

/// HTML escaping of `&`, `<`, `>`, `"` and `'`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscaper;

impl Escaper for HtmlEscaper {
  fn escape<'a>(&self, input: &'a str) -> Cow<'a, str> {
    html_escape::encode_quoted_attribute(input)
  }
}

impl<F> Escaper for F
where
  F: Fn(&str) -> String + Send + Sync,
{
  fn escape<'a>(&self, input: &'a str) -> Cow<'a, str> {
    Cow::Owned(self(input))
  }
}
