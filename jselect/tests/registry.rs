mod common;

use common::{count_events, locales, option, source};
use formdom::{Document, DomError, Element, Key, UiEvent};
use jselect::{
    CREATE_EVENT, DropdownConfig, EventResult, JselectError, LocaleTable, RELOAD_EVENT, Registry,
    class,
};

/// Two marked selects and one unmarked select.
fn page() -> (Document, Vec<formdom::NodeId>) {
    let mut doc = Document::new();
    let mut sources = Vec::new();
    for (name, marked) in [("colour", true), ("plain", false), ("size", true)] {
        let select = source(&mut doc, name, &DropdownConfig::new());
        if marked {
            doc.get_mut(select)
                .unwrap()
                .set_attr("data-replace", "jselect");
        }
        option(&mut doc, select, "One", "1");
        option(&mut doc, select, "Two", "2");
        sources.push(select);
    }
    (doc, sources)
}

// ============================================================================
// Scanning
// ============================================================================

#[test]
fn test_scan_replaces_marked_selects_only() {
    let (mut doc, sources) = page();
    let mut registry = Registry::new(locales());

    assert_eq!(registry.scan(&mut doc).unwrap(), 2);

    assert_eq!(registry.len(), 2);
    assert!(registry.get("colour").is_some());
    assert!(registry.get("size").is_some());
    assert!(registry.get("plain").is_none());
    assert_eq!(registry.by_source(sources[2]).unwrap().name(), "size");
    assert_eq!(count_events(&doc, CREATE_EVENT), 2);
}

#[test]
fn test_scan_fails_on_missing_locale() {
    let (mut doc, _) = page();
    let mut registry = Registry::new(LocaleTable::new());

    let err = registry.scan(&mut doc).unwrap_err();
    assert!(matches!(err, JselectError::UnknownLocale(_)));
}

#[test]
fn test_scan_twice_leaves_managed_sources_alone() {
    let (mut doc, sources) = page();
    let mut registry = Registry::new(locales());

    assert_eq!(registry.scan(&mut doc).unwrap(), 2);
    let root = registry.get("colour").unwrap().nodes().root;
    assert_eq!(registry.scan(&mut doc).unwrap(), 0);

    assert_eq!(registry.len(), 2);
    assert!(registry.get("_colour").is_none());
    assert_eq!(registry.get("colour").unwrap().nodes().root, root);
    assert_eq!(doc.get(sources[0]).unwrap().name.as_deref(), Some("_colour"));
    assert_eq!(count_events(&doc, CREATE_EVENT), 2);

    let body = doc.root();
    let carriers: Vec<Option<String>> = doc
        .descendants(body)
        .into_iter()
        .filter_map(|n| doc.get(n))
        .filter(|el| el.has_class(class::HIDDEN))
        .map(|el| el.name.clone())
        .collect();
    assert_eq!(carriers, vec![Some("colour".to_string()), Some("size".to_string())]);
}

#[test]
fn test_attach_managed_source_returns_existing_instance() {
    let (mut doc, sources) = page();
    let mut registry = Registry::new(locales());
    let root = registry.attach(&mut doc, sources[0]).unwrap().nodes().root;

    let again = registry.attach(&mut doc, sources[0]).unwrap();

    assert_eq!(again.name(), "colour");
    assert_eq!(again.nodes().root, root);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_attach_same_name_replaces_instance() {
    let mut doc = Document::new();
    let mut registry = Registry::new(locales());
    let a = source(&mut doc, "dup", &DropdownConfig::new());
    let b = source(&mut doc, "dup", &DropdownConfig::new());

    registry.attach(&mut doc, a).unwrap();
    registry.attach(&mut doc, b).unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("dup").unwrap().source(), b);
    let root_b = registry.get("dup").unwrap().nodes().root;
    let body = doc.root();
    assert_eq!(doc.children(body), &[a, root_b, b]);
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_keyboard_reaches_only_open_instances() {
    let (mut doc, _) = page();
    let mut registry = Registry::new(locales());
    registry.scan(&mut doc).unwrap();
    registry.get_mut("colour").unwrap().open(&mut doc).unwrap();

    let result = registry.dispatch(&mut doc, &UiEvent::key(Key::Down)).unwrap();

    assert_eq!(result, EventResult::Consumed);
    assert_eq!(registry.get("colour").unwrap().value(), "2");
    assert_eq!(registry.get("size").unwrap().value(), "");
}

#[test]
fn test_pointer_down_closes_every_open_instance() {
    let (mut doc, _) = page();
    let mut registry = Registry::new(locales());
    registry.scan(&mut doc).unwrap();
    registry.get_mut("colour").unwrap().open(&mut doc).unwrap();
    registry.get_mut("size").unwrap().open(&mut doc).unwrap();
    let root = doc.root();
    let outside = doc.create(Element::new("p"));
    doc.append_child(root, outside).unwrap();

    registry
        .dispatch(&mut doc, &UiEvent::PointerDown { target: Some(outside) })
        .unwrap();

    assert!(registry.iter().all(|d| !d.is_open()));
}

#[test]
fn test_failing_instance_does_not_block_the_others() {
    let (mut doc, _) = page();
    let mut registry = Registry::new(locales());
    registry.scan(&mut doc).unwrap();
    registry.get_mut("colour").unwrap().open(&mut doc).unwrap();
    registry.get_mut("size").unwrap().open(&mut doc).unwrap();
    // Pull the colour widget out from under its instance.
    let broken = registry.get("colour").unwrap().nodes().root;
    doc.destroy(broken).unwrap();

    let err = registry
        .dispatch(&mut doc, &UiEvent::key(Key::Escape))
        .unwrap_err();

    assert!(matches!(err, JselectError::Dom(DomError::UnknownNode(_))));
    assert!(!registry.get("size").unwrap().is_open());
}

#[test]
fn test_reload_event_rebuilds_target_instance() {
    let (mut doc, sources) = page();
    let mut registry = Registry::new(locales());
    registry.scan(&mut doc).unwrap();
    option(&mut doc, sources[0], "Three", "3");

    let event = UiEvent::Custom {
        target: sources[0],
        name: RELOAD_EVENT.to_string(),
    };
    assert_eq!(registry.dispatch(&mut doc, &event).unwrap(), EventResult::Consumed);

    assert_eq!(registry.get("colour").unwrap().state().options().len(), 3);
    assert_eq!(registry.get("size").unwrap().state().options().len(), 2);
    assert_eq!(
        doc.find_by_id("jselect-colour"),
        Some(registry.get("colour").unwrap().nodes().root)
    );
}

#[test]
fn test_unrelated_custom_event_is_ignored() {
    let (mut doc, sources) = page();
    let mut registry = Registry::new(locales());
    registry.scan(&mut doc).unwrap();

    let event = UiEvent::Custom {
        target: sources[0],
        name: "something-else".to_string(),
    };
    assert_eq!(registry.dispatch(&mut doc, &event).unwrap(), EventResult::Ignored);
}

#[test]
fn test_reload_by_name() {
    let (mut doc, sources) = page();
    let mut registry = Registry::new(locales());
    registry.scan(&mut doc).unwrap();
    doc.get_mut(sources[2])
        .unwrap()
        .set_attr("data-search", "true");

    registry.reload(&mut doc, "size").unwrap();
    assert!(registry.get("size").unwrap().nodes().search.is_some());

    let err = registry.reload(&mut doc, "nope").unwrap_err();
    assert!(matches!(err, JselectError::UnknownInstance(ref n) if n == "nope"));
}
