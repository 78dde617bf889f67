//! JSON document format tests

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use pulse_schema::*;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_default_document_round_trips() {
    let doc = Newsletter::with_defaults(&mut SequentialIds::new("rt"), now());
    let json = doc.to_json_pretty().unwrap();
    let parsed = Newsletter::import_json(&json).unwrap();
    assert_eq!(parsed, doc);
}

#[test]
fn test_every_variant_round_trips() {
    let mut ids = SequentialIds::new("v");
    let mut doc = Newsletter::empty(&mut ids, now());
    for block_type in BlockType::ALL {
        doc.push_block(block_type.create(&mut ids, now()));
    }

    let parsed = Newsletter::from_json(&doc.to_json_pretty().unwrap()).unwrap();
    assert_eq!(parsed, doc);
}

#[test]
fn test_optional_fields_survive_round_trip() {
    let mut ids = SequentialIds::new("o");
    let mut doc = Newsletter::empty(&mut ids, now());

    let mut humor = BlockType::Humor.create(&mut ids, now());
    if let Block::Humor(h) = &mut humor {
        h.image_height = Some(240);
        h.image_fit = None;
    }
    let mut sidebar = BlockType::RssSidebar.create(&mut ids, now());
    if let Block::RssSidebar(s) = &mut sidebar {
        s.enable_scroll = Some(false);
        s.items.push(SidebarItem {
            title: "Unicode ✓ & <tags>".into(),
            url: "https://example.org/a".into(),
            source: "Example".into(),
            pub_date: "Mon, 03 Mar 2025 10:00:00 GMT".into(),
        });
    }
    doc.push_block(humor);
    doc.push_block(sidebar);

    let json = doc.to_json_pretty().unwrap();
    assert!(!json.contains("imageFit"));
    assert_eq!(Newsletter::import_json(&json).unwrap(), doc);
}

#[test]
fn test_pretty_output_is_stable() {
    let doc = Newsletter::with_defaults(&mut SequentialIds::new("s"), now());
    let first = doc.to_json_pretty().unwrap();
    let second = Newsletter::from_json(&first).unwrap().to_json_pretty().unwrap();
    assert_eq!(first, second);
    assert!(first.starts_with("{\n  \"meta\""));
}

#[test]
fn test_loads_document_written_by_browser_editor() {
    let json = r##"{
      "meta": {"id": "m1", "title": "Issue", "issueNumber": "7",
               "createdAt": "2025-01-02T03:04:05.000Z", "updatedAt": "2025-01-02T03:04:05.000Z"},
      "theme": {"id": "professional", "name": "Professional Blue", "primary": "#003087",
                "secondary": "#0057A8", "accent": "#009CDE", "background": "#F0F4FA",
                "surface": "#FFFFFF", "border": "#C8D9EE", "text": "#1A2B4A", "muted": "#5A789A",
                "fontDisplay": "Georgia, serif", "fontBody": "Arial, sans-serif",
                "fontMono": "monospace"},
      "blockOrder": ["s1"],
      "blocks": {"s1": {"id": "s1", "type": "spacer", "height": 12, "showLine": true,
                        "lineStyle": "dashed"}}
    }"##;

    let doc = Newsletter::import_json(json).unwrap();
    assert_eq!(doc.issue_slug(), "7");
    match doc.block("s1") {
        Some(Block::Spacer(s)) => {
            assert_eq!(s.height, 12);
            assert_eq!(s.line_style, LineStyle::Dashed);
        }
        _ => panic!("expected spacer"),
    }
}

#[test]
fn test_unknown_block_type_in_document_is_structural_error() {
    let doc = Newsletter::with_defaults(&mut SequentialIds::new("u"), now());
    let mut value = serde_json::to_value(&doc).unwrap();
    let first = doc.block_order[0].clone();
    value["blocks"][&first]["type"] = serde_json::json!("carousel");

    let err = Newsletter::import_json(&value.to_string()).unwrap_err();
    assert!(matches!(err, SchemaError::Json(_)));
}
