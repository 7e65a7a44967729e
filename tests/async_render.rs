//! The async and callback render forms agree with the sync form

use layouts::{LayoutDefinition, LayoutError, LayoutRef, Layouts};
use pretty_assertions::assert_eq;

fn engine() -> Layouts {
    let mut engine = Layouts::new();
    engine
        .set_layout(LayoutDefinition::with_parent("base", LayoutRef::Unset, "<html>{{ body }}</html>"))
        .unwrap();
    engine
        .set_layout(LayoutDefinition::with_parent("post", "base", "<p>{{ body }}</p>"))
        .unwrap();
    engine
        .set_layout(LayoutDefinition::with_parent("loop", "loop", "{{ body }}"))
        .unwrap();
    engine
        .set_layout(LayoutDefinition::with_parent("orphan", "missing", "{{ body }}"))
        .unwrap();
    engine
}

#[tokio::test]
async fn test_async_matches_sync() {
    let engine = engine();
    for layout in [None, Some("post"), Some("base"), Some("nil"), Some("unregistered")] {
        let sync = engine.render("hi", layout);
        let deferred = engine.render_async("hi", layout).await;
        assert_eq!(deferred, sync, "layout {layout:?}");
    }
}

#[tokio::test]
async fn test_async_surfaces_errors() {
    let engine = engine();
    let err = engine.render_async("hi", Some("loop")).await.unwrap_err();
    assert!(matches!(err, LayoutError::Cycle { .. }));

    let err = engine.render_async("hi", Some("orphan")).await.unwrap_err();
    assert!(matches!(err, LayoutError::Unresolved { .. }));

    let out = engine.render_async("hi", Some("unregistered")).await.unwrap();
    assert_eq!(out.content, "hi");
}

#[test]
fn test_callback_receives_errors() {
    let engine = engine();
    let mut seen = None;
    engine.render_with("hi", Some("loop"), |res| seen = Some(res.map(|r| r.content)));
    assert!(matches!(seen, Some(Err(LayoutError::Cycle { .. }))));
}
