mod common;

use common::{add, fruit, locales, source};
use formdom::{Document, Element, Key, Modifiers, UiEvent};
use jselect::{Dropdown, DropdownConfig, EventResult, class};

fn open_fruit(config: DropdownConfig) -> (Document, Dropdown) {
    let (mut doc, select) = fruit(config);
    let mut dropdown = Dropdown::attach(&mut doc, select, &locales()).unwrap();
    dropdown.open(&mut doc).unwrap();
    (doc, dropdown)
}

fn press(doc: &mut Document, dropdown: &mut Dropdown, key: Key) -> EventResult {
    dropdown.handle_event(doc, &UiEvent::key(key)).unwrap()
}

fn focused_rows(doc: &Document, dropdown: &Dropdown) -> Vec<usize> {
    dropdown
        .nodes()
        .option_rows()
        .iter()
        .filter(|(_, node)| doc.get(*node).is_some_and(|el| el.has_class(class::FOCUS)))
        .map(|(key, _)| *key)
        .collect()
}

// ============================================================================
// Enter / Escape
// ============================================================================

#[test]
fn test_enter_ignored_without_focus_in_widget() {
    let (mut doc, select) = fruit(DropdownConfig::new());
    let mut dropdown = Dropdown::attach(&mut doc, select, &locales()).unwrap();

    assert_eq!(press(&mut doc, &mut dropdown, Key::Enter), EventResult::Ignored);
    assert!(!dropdown.is_open());
}

#[test]
fn test_enter_opens_then_commits_and_closes() {
    let (mut doc, select) = fruit(DropdownConfig::new());
    let mut dropdown = Dropdown::attach(&mut doc, select, &locales()).unwrap();
    doc.focus(dropdown.nodes().display);

    assert_eq!(press(&mut doc, &mut dropdown, Key::Enter), EventResult::Consumed);
    assert!(dropdown.is_open());
    assert_eq!(dropdown.state().current_key(), Some(1));

    press(&mut doc, &mut dropdown, Key::Enter);
    assert!(!dropdown.is_open());
    assert_eq!(dropdown.value(), "apple");
}

#[test]
fn test_enter_does_not_open_disabled_widget() {
    let mut doc = Document::new();
    let select = source(&mut doc, "off", &DropdownConfig::new());
    doc.get_mut(select).unwrap().disabled = true;
    add(&mut doc, select, Element::new("option").text("A").value("a"));
    let mut dropdown = Dropdown::attach(&mut doc, select, &locales()).unwrap();
    doc.focus(dropdown.nodes().display);

    press(&mut doc, &mut dropdown, Key::Enter);
    assert!(!dropdown.is_open());
}

#[test]
fn test_escape_closes_only_when_open() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new());

    assert_eq!(press(&mut doc, &mut dropdown, Key::Escape), EventResult::Consumed);
    assert!(!dropdown.is_open());
    assert_eq!(press(&mut doc, &mut dropdown, Key::Escape), EventResult::Ignored);
}

// ============================================================================
// Arrow / page navigation
// ============================================================================

#[test]
fn test_nav_keys_ignored_while_closed() {
    let (mut doc, select) = fruit(DropdownConfig::new());
    let mut dropdown = Dropdown::attach(&mut doc, select, &locales()).unwrap();

    for key in [Key::Up, Key::Down, Key::PageUp, Key::PageDown] {
        assert_eq!(press(&mut doc, &mut dropdown, key), EventResult::Ignored);
    }
    assert_eq!(dropdown.value(), "");
}

#[test]
fn test_arrow_down_previews_selection_in_single_mode() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new());

    press(&mut doc, &mut dropdown, Key::Down);

    assert_eq!(dropdown.state().current_key(), Some(2));
    assert_eq!(dropdown.value(), "banana");
    assert!(dropdown.is_open());
    assert_eq!(focused_rows(&doc, &dropdown), vec![2]);
    assert_eq!(
        doc.get(dropdown.nodes().display)
            .unwrap()
            .get_attr("aria-activedescendant"),
        Some("jselect-fruit--2")
    );
}

#[test]
fn test_arrow_down_at_last_is_clamped() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new());
    press(&mut doc, &mut dropdown, Key::PageDown);
    assert_eq!(dropdown.state().current_key(), Some(3));

    assert_eq!(press(&mut doc, &mut dropdown, Key::Down), EventResult::Consumed);

    assert_eq!(dropdown.state().current_key(), Some(3));
    assert_eq!(dropdown.value(), "cherry");
}

#[test]
fn test_arrow_up_at_first_is_clamped() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new());
    press(&mut doc, &mut dropdown, Key::Up);
    assert_eq!(dropdown.state().current_key(), Some(1));
    assert_eq!(dropdown.value(), "");
}

#[test]
fn test_page_keys_jump_to_ends() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new());

    press(&mut doc, &mut dropdown, Key::PageDown);
    assert_eq!(dropdown.state().current_key(), Some(3));
    press(&mut doc, &mut dropdown, Key::PageUp);
    assert_eq!(dropdown.state().current_key(), Some(1));
    assert_eq!(dropdown.value(), "apple");
}

#[test]
fn test_multi_navigation_does_not_select() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new().multiple(true));

    press(&mut doc, &mut dropdown, Key::Down);
    press(&mut doc, &mut dropdown, Key::Down);

    assert_eq!(dropdown.state().current_key(), Some(3));
    assert_eq!(dropdown.value(), "");
}

#[test]
fn test_navigation_stays_within_filtered_set() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new().search(true));
    dropdown.filter(&mut doc, "an").unwrap();
    assert_eq!(dropdown.state().current_key(), Some(2));

    press(&mut doc, &mut dropdown, Key::Down);
    press(&mut doc, &mut dropdown, Key::Up);

    assert_eq!(dropdown.state().current_key(), Some(2));
}

#[test]
fn test_modified_keys_are_ignored() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new());
    let event = UiEvent::Key {
        key: Key::Down,
        modifiers: Modifiers::ctrl(),
    };

    let result = dropdown.handle_event(&mut doc, &event).unwrap();

    assert_eq!(result, EventResult::Ignored);
    assert_eq!(dropdown.state().current_key(), Some(1));
}

// ============================================================================
// Pointer
// ============================================================================

#[test]
fn test_pointer_down_outside_closes() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new());
    let root = doc.root();
    let outside = add(&mut doc, root, Element::new("p"));

    let inside = UiEvent::PointerDown {
        target: Some(dropdown.nodes().list),
    };
    dropdown.handle_event(&mut doc, &inside).unwrap();
    assert!(dropdown.is_open());

    let event = UiEvent::PointerDown {
        target: Some(outside),
    };
    dropdown.handle_event(&mut doc, &event).unwrap();
    assert!(!dropdown.is_open());
}

#[test]
fn test_pointer_down_without_target_closes() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new());
    dropdown
        .handle_event(&mut doc, &UiEvent::PointerDown { target: None })
        .unwrap();
    assert!(!dropdown.is_open());
}

#[test]
fn test_display_click_toggles_open() {
    let (mut doc, select) = fruit(DropdownConfig::new());
    let mut dropdown = Dropdown::attach(&mut doc, select, &locales()).unwrap();
    let click = UiEvent::Click {
        target: doc.children(dropdown.nodes().display)[0],
    };

    dropdown.handle_event(&mut doc, &click).unwrap();
    assert!(dropdown.is_open());
    assert_eq!(doc.active_element(), Some(dropdown.nodes().display));

    let click = UiEvent::Click {
        target: dropdown.nodes().display,
    };
    dropdown.handle_event(&mut doc, &click).unwrap();
    assert!(!dropdown.is_open());
}

#[test]
fn test_click_option_selects_and_closes() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new());
    let row = dropdown.nodes().option_node(3).unwrap();
    // Click lands on the title span inside the row body
    let body = doc.children(row)[0];
    let title = doc.children(body)[0];

    let result = dropdown
        .handle_event(&mut doc, &UiEvent::Click { target: title })
        .unwrap();

    assert_eq!(result, EventResult::Consumed);
    assert_eq!(dropdown.value(), "cherry");
    assert!(!dropdown.is_open());
}

#[test]
fn test_click_disabled_option_is_ignored() {
    let mut doc = Document::new();
    let select = source(&mut doc, "fruit", &DropdownConfig::new());
    add(&mut doc, select, Element::new("option").text("A").value("a").disabled(true));
    let mut dropdown = Dropdown::attach(&mut doc, select, &locales()).unwrap();
    dropdown.open(&mut doc).unwrap();
    let row = dropdown.nodes().option_node(1).unwrap();

    let result = dropdown
        .handle_event(&mut doc, &UiEvent::Click { target: row })
        .unwrap();

    assert_eq!(result, EventResult::Ignored);
    assert!(!dropdown.is_selected(1));
    assert!(dropdown.is_open());
}

#[test]
fn test_hover_moves_focus_marker() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new());
    let row = dropdown.nodes().option_node(2).unwrap();

    dropdown
        .handle_event(&mut doc, &UiEvent::Hover { target: row })
        .unwrap();

    assert_eq!(dropdown.state().current_key(), Some(2));
    assert_eq!(focused_rows(&doc, &dropdown), vec![2]);
    // Hover never selects
    assert_eq!(dropdown.value(), "");
}

#[test]
fn test_hover_after_keyboard_scroll_is_suppressed_once() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new().multiple(true));
    press(&mut doc, &mut dropdown, Key::Down);
    let first = dropdown.nodes().option_node(1).unwrap();

    let hover = UiEvent::Hover { target: first };
    assert_eq!(
        dropdown.handle_event(&mut doc, &hover).unwrap(),
        EventResult::Ignored
    );
    assert_eq!(dropdown.state().current_key(), Some(2));

    let first = dropdown.nodes().option_node(1).unwrap();
    let hover = UiEvent::Hover { target: first };
    dropdown.handle_event(&mut doc, &hover).unwrap();
    assert_eq!(dropdown.state().current_key(), Some(1));
}

// ============================================================================
// Search input
// ============================================================================

#[test]
fn test_input_on_search_filters() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new().search(true));
    let search = dropdown.nodes().search.unwrap();

    let event = UiEvent::Input {
        target: search,
        value: "err".to_string(),
    };
    assert_eq!(
        dropdown.handle_event(&mut doc, &event).unwrap(),
        EventResult::Consumed
    );

    let keys: Vec<usize> = dropdown.state().shown().map(|o| o.key).collect();
    assert_eq!(keys, vec![3]);
}

#[test]
fn test_input_elsewhere_is_ignored() {
    let (mut doc, mut dropdown) = open_fruit(DropdownConfig::new().search(true));
    let event = UiEvent::Input {
        target: dropdown.nodes().hidden,
        value: "err".to_string(),
    };
    assert_eq!(
        dropdown.handle_event(&mut doc, &event).unwrap(),
        EventResult::Ignored
    );
    assert_eq!(dropdown.state().shown_len(), 3);
}
