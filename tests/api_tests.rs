use capforge::api::{EditorSession, SliderDebouncer};
use capforge::config::EditorConfig;
use capforge::geometry::Rect;
use capforge::layer::{LayerKind, LayerPatch};
use capforge::layouts::LayoutType;
use std::collections::HashMap;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn session() -> EditorSession {
    EditorSession::new(EditorConfig::default())
}

fn screen_rects(session: &EditorSession, px_per_unit: f32) -> HashMap<String, Rect> {
    session
        .snapshot()
        .layout
        .keys
        .iter()
        .map(|k| {
            (
                k.id.clone(),
                Rect::from_origin_size(
                    k.x * px_per_unit,
                    k.y * px_per_unit,
                    k.width * px_per_unit,
                    k.height * px_per_unit,
                ),
            )
        })
        .collect()
}

#[test]
fn test_debouncer_commits_only_after_quiet_window() {
    let mut debounce = SliderDebouncer::new(ms(10));

    debounce.submit(LayerPatch::content("a"), ms(0));
    assert_eq!(debounce.poll(ms(5)), None, "window still open");
    assert!(debounce.is_pending());

    let patch = debounce.poll(ms(10)).expect("window elapsed");
    assert_eq!(patch.content.as_deref(), Some("a"));
    assert_eq!(debounce.poll(ms(20)), None, "commit drains the pending patch");
}

#[test]
fn test_debouncer_restarts_window_and_keeps_last_value() {
    let mut debounce = SliderDebouncer::new(ms(10));

    // A slider drag: values arrive faster than the window closes.
    debounce.submit(LayerPatch::content("1"), ms(0));
    debounce.submit(LayerPatch::content("2"), ms(6));
    debounce.submit(LayerPatch::content("3"), ms(12));

    assert_eq!(debounce.poll(ms(15)), None, "restarted window is still open");
    let patch = debounce.poll(ms(22)).expect("quiet since the last value");
    assert_eq!(
        patch.content.as_deref(),
        Some("3"),
        "only the last value within the window is committed"
    );
}

#[test]
fn test_session_pump_applies_debounced_patch() {
    let mut session = session();
    let key_id = session.snapshot().layout.keys[0].id.clone();
    session.click_key(&key_id, false);

    session.queue_slider_patch_at(
        LayerPatch {
            rotation: Some(30.0),
            ..Default::default()
        },
        ms(100),
    );

    session.pump_at(ms(105));
    assert_eq!(
        session.snapshot().layout.keys[0].layers[0].rotation, 0.0,
        "nothing commits inside the window"
    );

    session.pump_at(ms(110));
    assert_eq!(session.snapshot().layout.keys[0].layers[0].rotation, 30.0);
}

#[test]
fn test_drag_wiring_commits_selection() {
    let mut session = session();
    let rects = screen_rects(&session, 48.0);

    session.begin_drag(0.0, 0.0);
    let preview = session.update_drag(100.0, 100.0, &rects);
    assert!(!preview.is_empty());

    session.end_drag();
    let config = session.snapshot();
    assert_eq!(config.selected_keys, preview);
    assert!(session.drag_preview().is_empty(), "the session is over");
}

#[test]
fn test_degenerate_drag_clears_selection() {
    let mut session = session();
    let rects = screen_rects(&session, 48.0);
    let key_id = session.snapshot().layout.keys[0].id.clone();

    session.click_key(&key_id, false);
    assert!(!session.snapshot().selected_keys.is_empty());

    // Pointer down and up on the same background point.
    session.begin_drag(2000.0, 2000.0);
    session.update_drag(2000.0, 2000.0, &rects);
    session.end_drag();
    assert!(session.snapshot().selected_keys.is_empty());
}

#[test]
fn test_end_drag_without_begin_is_noop() {
    let mut session = session();
    let before = session.snapshot().clone();
    session.end_drag();
    assert_eq!(session.snapshot(), &before);
}

#[test]
fn test_add_layer_becomes_active() {
    let mut session = session();
    let key_id = session.snapshot().layout.keys[0].id.clone();
    session.click_key(&key_id, false);

    let layer_id = session
        .add_layer(LayerKind::Text)
        .expect("editing key accepts a new layer");
    assert_eq!(
        session.snapshot().selected_layer_id.as_deref(),
        Some(layer_id.as_str()),
        "a freshly added layer is selected for editing"
    );
}

#[test]
fn test_add_layer_without_editing_key_is_noop() {
    let mut session = session();
    let before = session.snapshot().clone();
    assert!(session.add_layer(LayerKind::Image).is_none());
    assert_eq!(session.snapshot(), &before);
}

#[test]
fn test_export_json_shape() {
    let mut session = session();
    session.change_layout(LayoutType::Iso60);

    let json = session.export_json(false).expect("serializable snapshot");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["currentLayoutType"], "ISO-60%");
    assert_eq!(value["layout"]["totalKeys"], 62);
    assert!(value["allLayouts"]["60%"].is_object());
    assert!(value["globalSettings"]["font"].is_string());

    let key = &value["layout"]["keys"][0];
    assert!(key["textColor"].is_string(), "fields are camelCased");
    let layer = &key["layers"][0];
    assert_eq!(layer["type"], "text");
    assert!(layer["content"].is_string());
    assert!(
        layer.get("bold").is_none(),
        "default style flags stay off the wire"
    );
}
