#![allow(dead_code)]

use formdom::{Document, Element, NodeId};
use jselect::{DropdownConfig, LocaleTable};

/// A `<select>` appended to the body, configured through `data-*` attributes.
pub fn source(doc: &mut Document, name: &str, config: &DropdownConfig) -> NodeId {
    let mut element = Element::new("select").name(name);
    config.apply_to(&mut element);
    let node = doc.create(element);
    let root = doc.root();
    doc.append_child(root, node).unwrap();
    node
}

pub fn option(doc: &mut Document, parent: NodeId, title: &str, value: &str) -> NodeId {
    add(doc, parent, Element::new("option").text(title).value(value))
}

pub fn add(doc: &mut Document, parent: NodeId, element: Element) -> NodeId {
    let node = doc.create(element);
    doc.append_child(parent, node).unwrap();
    node
}

pub fn group(doc: &mut Document, parent: NodeId, label: &str) -> NodeId {
    add(doc, parent, Element::new("optgroup").attr("label", label))
}

/// `fruit` select with three plain options: Apple, Banana, Cherry.
pub fn fruit(config: DropdownConfig) -> (Document, NodeId) {
    let mut doc = Document::new();
    let select = source(&mut doc, "fruit", &config);
    option(&mut doc, select, "Apple", "apple");
    option(&mut doc, select, "Banana", "banana");
    option(&mut doc, select, "Cherry", "cherry");
    (doc, select)
}

pub fn locales() -> LocaleTable {
    LocaleTable::with_defaults()
}

/// Class lists of the list rows, in render order.
pub fn list_rows(doc: &Document, list: NodeId) -> Vec<Vec<String>> {
    doc.children(list)
        .iter()
        .filter_map(|&n| doc.get(n))
        .map(|el| el.classes.clone())
        .collect()
}

pub fn count_events(doc: &Document, name: &str) -> usize {
    doc.events().iter().filter(|e| e.name == name).count()
}
