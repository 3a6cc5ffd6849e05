//! Option records and their extraction from a source `<select>`.

use formdom::{Document, Element, NodeId};

/// One selectable entry.
///
/// Keys are 1-based and assigned in extraction order. They are only stable
/// until the next extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropOption {
    pub key: usize,
    pub title: String,
    pub value: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub group: Option<String>,
    pub disabled: bool,
    pub selected: bool,
}

impl DropOption {
    fn from_element(key: usize, element: &Element, group: Option<&str>) -> Self {
        let attr = |name: &str| {
            element
                .dataset(name)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            key,
            title: element.text.trim().to_string(),
            value: element.value.clone(),
            image: attr("img"),
            description: attr("desc"),
            group: group.filter(|g| !g.is_empty()).map(str::to_string),
            disabled: element.disabled,
            selected: element.selected,
        }
    }

    /// Case-insensitive substring match on title, value, description and
    /// group. `needle` must already be lowercased and trimmed.
    pub fn matches(&self, needle: &str) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(needle);
        contains(&self.title)
            || contains(&self.value)
            || contains(self.description.as_deref().unwrap_or(""))
            || contains(self.group.as_deref().unwrap_or(""))
    }
}

/// Read the options of `source` in key order: every option nested in an
/// `<optgroup>` first, then the top-level options.
pub fn extract_options(doc: &Document, source: NodeId) -> Vec<DropOption> {
    let mut options = Vec::new();

    for group in doc.children_by_tag(source, "optgroup") {
        let label = doc.get(group).and_then(|g| g.get_attr("label"));
        for node in doc.children_by_tag(group, "option") {
            if let Some(element) = doc.get(node) {
                options.push(DropOption::from_element(options.len() + 1, element, label));
            }
        }
    }

    for node in doc.children_by_tag(source, "option") {
        if let Some(element) = doc.get(node) {
            options.push(DropOption::from_element(options.len() + 1, element, None));
        }
    }

    log::debug!("[extract] {} options from {source}", options.len());
    options
}
