#![allow(clippy::expect_used, clippy::panic, reason = "Fine in tests")]
use quire_richtext::{
  Element,
  Overrides,
  RenderOptions,
  RenderedUnit,
  Serializer,
  Theme,
  parse_content,
  render,
};

fn plain() -> Serializer {
  Serializer::new(RenderOptions {
    theme: Theme::plain(),
    ..Default::default()
  })
}

fn render_json(serializer: &Serializer, json: &str) -> String {
  let content = parse_content(json, None).expect("content should parse");
  serializer.render_html(Some(&content), None)
}

#[test]
fn test_guideline_page() {
  let json = r#"{
    "title": "Author Guidelines",
    "content": [
      { "type": "h1", "children": [{ "text": "Author Guidelines" }] },
      { "children": [
        { "text": "Submit via the " },
        { "type": "link", "url": "/submit", "children": [{ "text": "portal", "bold": true }] },
        { "text": "." }
      ] },
      { "type": "ul", "children": [
        { "type": "li", "children": [{ "text": "APA style", "italic": true }] }
      ] }
    ]
  }"#;

  assert_eq!(
    render_json(&plain(), json),
    concat!(
      "<h1>Author Guidelines</h1>",
      "<p>Submit via the <a href=\"/submit\"><strong>portal</strong></a>.</p>",
      "<ul><li><span>•</span><em>APA style</em></li></ul>",
    )
  );
}

#[test]
fn test_wire_shape_with_nulls_and_junk() {
  let json = r#"[
    { "text": "a" },
    null,
    42,
    { "type": "h2" },
    { "type": "quote", "children": null },
    { "text": "b", "bold": false, "italic": null }
  ]"#;

  assert_eq!(
    render_json(&plain(), json),
    "a<p></p><h2></h2><blockquote></blockquote>b"
  );
}

#[test]
fn test_falsy_entries_are_skipped() {
  for falsy in ["false", "0", "\"\""] {
    let json = format!(r#"[{{ "text": "a" }}, {falsy}, {{ "text": "b" }}]"#);
    let content = parse_content(&json, None).expect("content should parse");
    let units = plain().render(Some(&content), None);
    assert_eq!(units.len(), 2, "{falsy} should be skipped");
    assert_eq!(quire_richtext::units_to_html(&units), "ab");
  }
}

#[test]
fn test_truthy_flags() {
  let json = r#"[
    { "text": "x", "bold": 1, "italic": "yes", "code": 0 },
    { "type": "link", "url": "/u", "newTab": 1, "children": [{ "text": "l" }] }
  ]"#;

  assert_eq!(
    render_json(&plain(), json),
    concat!(
      "<em><strong>x</strong></em>",
      "<a href=\"/u\" target=\"_blank\" rel=\"noopener noreferrer\">l</a>",
    )
  );
}

#[test]
fn test_mark_order_ignores_key_order() {
  let forwards = r#"[{ "text": "x", "bold": true, "italic": true, "code": true }]"#;
  let backwards = r#"[{ "code": true, "italic": true, "bold": true, "text": "x" }]"#;

  let serializer = plain();
  assert_eq!(
    render_json(&serializer, forwards),
    "<em><code><strong>x</strong></code></em>"
  );
  assert_eq!(
    render_json(&serializer, forwards),
    render_json(&serializer, backwards)
  );
}

#[test]
fn test_script_injection_in_text_and_url() {
  let json = r#"[
    { "text": "<script>alert('xss')</script>", "underline": true },
    { "type": "link", "url": "\"><script>alert(1)</script>", "children": [{ "text": "x" }] }
  ]"#;

  let html = render_json(&plain(), json);
  assert!(!html.contains("<script>"));
  assert!(html.contains("&lt;script&gt;"));
  assert!(html.contains("href=\"&quot;&gt;&lt;script&gt;"));
}

#[test]
fn test_all_heading_levels_get_their_class() {
  let serializer = Serializer::default();
  let theme = Theme::default();

  for level in 1..=6 {
    let json = format!(r#"[{{ "type": "h{level}", "children": [{{ "text": "t" }}] }}]"#);
    let expected = format!(
      r#"<h{level} class="{}">t</h{level}>"#,
      theme.headings[level - 1]
    );
    assert_eq!(render_json(&serializer, &json), expected);
  }
}

#[test]
fn test_override_receives_positions_and_recurses() {
  let overrides = Overrides::new().with("li", |args| {
    Element::new("li")
      .attr("value", (args.index + 1).to_string())
      .children(args.render.render(Some(&args.node.children)))
      .into()
  });
  let content = parse_content(
    r#"[{ "type": "ol", "children": [
      { "type": "li", "children": [{ "text": "first" }] },
      null,
      { "type": "li", "children": [{ "text": "third", "bold": true }] }
    ] }]"#,
    None,
  )
  .expect("content should parse");

  assert_eq!(
    plain().render_html(Some(&content), Some(&overrides)),
    concat!(
      "<ol>",
      r#"<li value="1">first</li>"#,
      r#"<li value="3"><strong>third</strong></li>"#,
      "</ol>"
    )
  );
}

#[test]
fn test_override_may_return_fragments() {
  let overrides = Overrides::new().with("indent", |args| {
    RenderedUnit::Fragment(args.render.render(Some(&args.node.children)))
  });
  let content = parse_content(
    r#"[{ "type": "indent", "children": [{ "text": "a" }, { "text": "" }, { "text": "b" }] }]"#,
    None,
  )
  .expect("content should parse");

  let units = render(Some(&content), Some(&overrides));
  assert_eq!(units.len(), 1);
  assert_eq!(units[0].to_html(), "a<br>b");
}

#[test]
fn test_override_context_tracks_depth() {
  let overrides = Overrides::new().with("probe", |args| {
    RenderedUnit::Text(args.render.depth().to_string())
  });
  let content = parse_content(
    r#"[{ "type": "probe" }, { "type": "quote", "children": [{ "type": "probe" }] }]"#,
    None,
  )
  .expect("content should parse");

  assert_eq!(
    plain().render_html(Some(&content), Some(&overrides)),
    "1<blockquote>2</blockquote>"
  );
}

#[test]
fn test_serializer_is_shareable_across_threads() {
  let serializer = std::sync::Arc::new(Serializer::default());
  let overrides = std::sync::Arc::new(
    Overrides::new().with("x", |_| RenderedUnit::Text("x".to_string())),
  );

  let handles: Vec<_> = (0..4)
    .map(|i| {
      let serializer = std::sync::Arc::clone(&serializer);
      let overrides = std::sync::Arc::clone(&overrides);
      std::thread::spawn(move || {
        let json = format!(r#"[{{ "text": "doc {i}" }}, {{ "type": "x" }}]"#);
        let content = parse_content(&json, None).expect("content should parse");
        serializer.render_html(Some(&content), Some(&overrides))
      })
    })
    .collect();

  for (i, handle) in handles.into_iter().enumerate() {
    assert_eq!(handle.join().expect("thread should finish"), format!("doc {i}x"));
  }
}
