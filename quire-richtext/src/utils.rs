//! Document-level helpers: heading extraction, titles and plain text.
use std::collections::HashSet;

use crate::{
  node::{ContentNode, ElementNode, ElementTag, HeadingLevel},
  types::Heading,
};

/// Slugify a string for use as an anchor ID.
/// Converts to lowercase, replaces non-alphanumeric characters with dashes,
/// and trims leading/trailing dashes.
#[must_use]
pub fn slugify(text: &str) -> String {
  text
    .to_lowercase()
    .replace(|c: char| !c.is_alphanumeric() && c != '-' && c != '_', "-")
    .trim_matches('-')
    .to_string()
}

/// Anchor IDs handed out within one document.
#[derive(Debug, Default)]
pub(crate) struct SlugSet {
  taken: HashSet<String>,
}

impl SlugSet {
  /// Claim `slug`, suffixing `-1`, `-2`, ... while it is already taken.
  /// Empty slugs are returned unchanged and never recorded.
  pub(crate) fn claim(&mut self, slug: String) -> String {
    if slug.is_empty() {
      return slug;
    }

    let mut id = slug.clone();
    let mut suffix = 0;
    while self.taken.contains(&id) {
      suffix += 1;
      id = format!("{slug}-{suffix}");
    }
    self.taken.insert(id.clone());
    id
  }
}

/// Concatenate the text runs below `content`, collapsing whitespace.
#[must_use]
pub fn inline_text(content: &[Option<ContentNode>]) -> String {
  let mut text = String::new();
  let mut stack: Vec<&ContentNode> = content.iter().rev().flatten().collect();

  while let Some(node) = stack.pop() {
    match node {
      ContentNode::Text(run) => text.push_str(&run.text),
      ContentNode::Element(element) => {
        stack.extend(element.children.iter().rev().flatten());
      },
    }
  }

  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Heading elements in document order. Headings are not searched for nested
/// headings.
fn heading_elements(
  content: &[Option<ContentNode>],
) -> impl Iterator<Item = (HeadingLevel, &ElementNode)> {
  let mut stack: Vec<&ContentNode> = content.iter().rev().flatten().collect();

  std::iter::from_fn(move || {
    while let Some(node) = stack.pop() {
      let ContentNode::Element(element) = node else {
        continue;
      };
      if let ElementTag::Heading(level) = element.tag {
        return Some((level, element));
      }
      stack.extend(element.children.iter().rev().flatten());
    }
    None
  })
}

/// Collect every heading in document order, with unique slug IDs.
///
/// This walks the tree only. [`crate::Serializer::render_document`] reports
/// the headings that were actually rendered, which differs when overrides or
/// the depth bound are involved.
#[must_use]
pub fn extract_headings(content: &[Option<ContentNode>]) -> Vec<Heading> {
  let mut slugs = SlugSet::default();
  heading_elements(content)
    .map(|(level, element)| {
      let text = inline_text(&element.children);
      Heading {
        id: slugs.claim(slugify(&text)),
        text,
        level: level.as_u8(),
      }
    })
    .collect()
}

/// Text of the first `h1`, if any.
#[must_use]
pub fn extract_title(content: &[Option<ContentNode>]) -> Option<String> {
  heading_elements(content)
    .find(|(level, _)| *level == HeadingLevel::H1)
    .map(|(_, element)| inline_text(&element.children))
}

/// Convert content to plain text while preserving block structure.
///
/// - Blocks are separated by a blank line, `br` and empty runs by a newline
/// - Whitespace within lines is normalized to single spaces
/// - Multiple consecutive blank lines are collapsed
#[must_use]
pub fn plain_text(content: &[Option<ContentNode>]) -> String {
  let mut raw = String::new();
  write_plain(content, &mut raw);

  let mut result: Vec<String> = Vec::new();
  let mut prev_empty = false;

  for line in raw.lines() {
    let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.is_empty() {
      if !prev_empty && !result.is_empty() {
        result.push(line);
      }
      prev_empty = true;
    } else {
      result.push(line);
      prev_empty = false;
    }
  }

  result.join("\n").trim().to_string()
}

fn write_plain(content: &[Option<ContentNode>], out: &mut String) {
  for node in content.iter().flatten() {
    match node {
      ContentNode::Text(run) if run.text.is_empty() => out.push('\n'),
      ContentNode::Text(run) => out.push_str(&run.text),
      ContentNode::Element(element) => {
        match element.tag {
          ElementTag::Br => out.push('\n'),
          ElementTag::Upload => {},
          ElementTag::Link => write_plain(&element.children, out),
          _ => {
            out.push('\n');
            write_plain(&element.children, out);
            out.push('\n');
          },
        }
      },
    }
  }
}
