#![allow(clippy::print_stdout, reason = "Demo output")]
use quire_richtext::{
  Element,
  Overrides,
  RenderOptionsBuilder,
  Serializer,
  parse_content,
  utils::plain_text,
};

const ABOUT_PAGE: &str = r#"{
  "title": "About the Journal",
  "content": [
    { "type": "h1", "children": [{ "text": "About the Journal" }] },
    { "children": [
      { "text": "Published " },
      { "text": "twice a year", "italic": true },
      { "text": " since 2009." }
    ] },
    { "type": "h2", "children": [{ "text": "Indexing" }] },
    { "type": "ul", "children": [
      { "type": "li", "children": [{ "text": "Scopus" }] },
      { "type": "li", "children": [
        { "type": "link", "url": "https://doaj.org", "newTab": true,
          "children": [{ "text": "DOAJ" }] }
      ] }
    ] },
    { "type": "callout", "children": [{ "text": "Submissions open", "bold": true }] },
    { "type": "upload", "value": { "url": "/media/cover.png", "alt": "Cover" } }
  ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  println!("quire-richtext demo");
  println!("===================\n");

  let content = parse_content(ABOUT_PAGE, None)?;

  let serializer =
    Serializer::new(RenderOptionsBuilder::new().heading_anchors(true).build());
  let overrides = Overrides::new().with("callout", |args| {
    Element::new("aside")
      .class("border-l-4 pl-3")
      .children(args.render.render(Some(&args.node.children)))
      .into()
  });

  let result = serializer.render_document(&content, Some(&overrides));

  println!("Title: {:?}", result.title);
  println!("Headings:");
  for heading in &result.headings {
    println!("  h{} {} -> #{}", heading.level, heading.text, heading.id);
  }

  println!("\nHTML:\n{}\n", result.html);
  println!("Plain text:\n{}", plain_text(&content));

  Ok(())
}
