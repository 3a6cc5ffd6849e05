//! Builds and refreshes the widget subtree.

use formdom::{Document, DomError, Element, NodeId};

use crate::dropdown::Dropdown;
use crate::option::DropOption;

/// Class and id prefix of every generated node.
pub const PREFIX: &str = "jselect";

pub mod class {
    pub const DISPLAY: &str = "jselect__display";
    pub const PLACEHOLDER: &str = "jselect__placeholder";
    pub const HIDDEN: &str = "jselect__hidden";
    pub const MENU: &str = "jselect__menu";
    pub const SEARCH: &str = "jselect__search";
    pub const LIST: &str = "jselect__list";
    pub const GROUP: &str = "jselect__group";
    pub const NO_RESULT: &str = "jselect__noresult";
    pub const OPTION: &str = "jselect--option";
    pub const OPTION_BODY: &str = "jselect--option__body";
    pub const OPTION_IMG: &str = "jselect--option__img";

    // State markers
    pub const OPEN: &str = "open";
    pub const SELECTED: &str = "selected";
    pub const DISABLED: &str = "disabled";
    pub const FOCUS: &str = "focus";
}

/// Nodes generated for one instance, captured once per build.
#[derive(Debug, Clone)]
pub struct WidgetNodes {
    pub root: NodeId,
    pub display: NodeId,
    pub hidden: NodeId,
    pub menu: NodeId,
    pub search: Option<NodeId>,
    pub list: NodeId,
    /// Rows of the last list render, by option key.
    options: Vec<(usize, NodeId)>,
}

impl WidgetNodes {
    /// Create the empty skeleton: root > [display, hidden, menu > [search?, list]].
    pub(crate) fn create(doc: &mut Document, id: &str, with_search: bool) -> Result<Self, DomError> {
        let root = doc.create(Element::new("div").class(PREFIX).id(id));
        let display = doc.create(
            Element::new("button")
                .class(class::DISPLAY)
                .attr("type", "button"),
        );
        let hidden = doc.create(Element::new("input").class(class::HIDDEN));
        let menu = doc.create(
            Element::new("div")
                .class(class::MENU)
                .id(format!("{id}_menu")),
        );
        let search = with_search.then(|| {
            doc.create(
                Element::new("input")
                    .class(class::SEARCH)
                    .attr("type", "search"),
            )
        });
        let list = doc.create(
            Element::new("ul")
                .class(class::LIST)
                .id(format!("{id}_list")),
        );

        doc.append_child(root, display)?;
        doc.append_child(root, hidden)?;
        if let Some(search) = search {
            doc.append_child(menu, search)?;
        }
        doc.append_child(menu, list)?;
        doc.append_child(root, menu)?;

        Ok(Self {
            root,
            display,
            hidden,
            menu,
            search,
            list,
            options: Vec::new(),
        })
    }

    /// The row rendered for `key`, if it is currently in the list.
    pub fn option_node(&self, key: usize) -> Option<NodeId> {
        self.options
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, node)| *node)
    }

    /// Key of the option row containing `target`.
    pub fn option_at(&self, doc: &Document, target: NodeId) -> Option<usize> {
        self.options
            .iter()
            .find(|(_, node)| doc.contains(*node, target))
            .map(|(key, _)| *key)
    }

    pub fn option_rows(&self) -> &[(usize, NodeId)] {
        &self.options
    }
}

pub(crate) fn node_mut(doc: &mut Document, node: NodeId) -> Result<&mut Element, DomError> {
    doc.get_mut(node).ok_or(DomError::UnknownNode(node))
}

impl Dropdown {
    /// Render everything: static attributes, current value and the list.
    pub(crate) fn render(&mut self, doc: &mut Document) -> Result<(), DomError> {
        self.render_shell(doc)?;
        self.render_value(doc)?;
        self.render_list(doc)
    }

    fn render_shell(&self, doc: &mut Document) -> Result<(), DomError> {
        let nodes = self.nodes();
        let list_id = format!("{}_list", self.id());
        let active = self.state().current_key().map(|key| self.option_id(key));

        let display = node_mut(doc, nodes.display)?;
        display.set_attr("role", "combobox");
        display.set_attr("aria-multiselectable", self.state().is_multiple());
        display.set_attr("aria-label", self.name());
        display.set_attr("aria-disabled", self.is_disabled());
        display.set_attr("aria-expanded", self.is_open());
        display.set_attr("aria-owns", &list_id);
        if let Some(active) = &active {
            display.set_attr("aria-activedescendant", active);
        }
        display.tab_index = 0;

        let hidden = node_mut(doc, nodes.hidden)?;
        hidden.set_attr("aria-hidden", true);
        hidden.tab_index = -1;
        hidden.read_only = true;
        hidden.name = Some(self.name().to_string());
        hidden.disabled = self.is_disabled();

        if let Some(search) = nodes.search {
            let search_label = &self.locale().search;
            let search = node_mut(doc, search)?;
            search.set_attr("role", "searchbox");
            search.set_attr("aria-label", search_label);
            search.set_attr("aria-autocomplete", "list");
            search.set_attr("aria-controls", &list_id);
            search.set_attr("placeholder", search_label);
            search.set_attr("autocapitalize", "none");
            search.set_attr("autocomplete", "off");
            search.set_attr("spellcheck", false);
            if let Some(active) = &active {
                search.set_attr("aria-activedescendant", active);
            }
        }

        let list = node_mut(doc, nodes.list)?;
        list.set_attr("role", "listbox");
        list.set_attr("aria-label", self.name());
        list.set_attr("aria-expanded", self.is_open());
        Ok(())
    }

    /// Refresh the display text and the hidden value.
    pub(crate) fn render_value(&self, doc: &mut Document) -> Result<(), DomError> {
        let display = self.nodes().display;
        doc.destroy_children(display)?;

        match self.state().selected_titles() {
            Some(titles) => node_mut(doc, display)?.text = titles,
            None => {
                node_mut(doc, display)?.text.clear();
                let placeholder = doc.create(
                    Element::new("span")
                        .class(class::PLACEHOLDER)
                        .text(self.placeholder()),
                );
                doc.append_child(display, placeholder)?;
            }
        }

        node_mut(doc, self.nodes().hidden)?.value = self.state().value();
        Ok(())
    }

    /// Bring the list in line with the shown set.
    ///
    /// When the rendered rows already match the shown set their markers are
    /// updated in place. Otherwise the list is rebuilt: grouped options first
    /// under one header per group, in order of first appearance, then the
    /// ungrouped ones. An empty shown set renders a single no-result row.
    pub(crate) fn render_list(&mut self, doc: &mut Document) -> Result<(), DomError> {
        if self.rows_match_shown() {
            return self.refresh_rows(doc);
        }

        let list = self.nodes().list;
        doc.destroy_children(list)?;

        if self.state().shown_len() == 0 {
            let row = doc.create(
                Element::new("li")
                    .class(class::NO_RESULT)
                    .attr("aria-live", "polite")
                    .text(&self.locale().no_result),
            );
            doc.append_child(list, row)?;
            self.nodes_mut().options.clear();
            return Ok(());
        }

        let mut groups: Vec<&str> = Vec::new();
        for option in self.state().shown() {
            if let Some(group) = option.group.as_deref()
                && !groups.contains(&group)
            {
                groups.push(group);
            }
        }

        let mut rows = Vec::with_capacity(self.state().shown_len());
        for group in groups {
            let header = doc.create(
                Element::new("li")
                    .class(class::GROUP)
                    .attr("aria-label", group)
                    .attr("role", "none")
                    .text(group),
            );
            doc.append_child(list, header)?;

            for option in self
                .state()
                .shown()
                .filter(|o| o.group.as_deref() == Some(group))
            {
                let row = self.build_option(doc, option)?;
                doc.append_child(list, row)?;
                rows.push((option.key, row));
            }
        }

        for option in self.state().shown().filter(|o| o.group.is_none()) {
            let row = self.build_option(doc, option)?;
            doc.append_child(list, row)?;
            rows.push((option.key, row));
        }

        self.nodes_mut().options = rows;
        Ok(())
    }

    /// True if the current rows are exactly the shown options.
    fn rows_match_shown(&self) -> bool {
        let rows = self.nodes().option_rows();
        !rows.is_empty()
            && rows.len() == self.state().shown_len()
            && rows.iter().all(|&(key, _)| self.state().is_shown(key))
    }

    fn refresh_rows(&self, doc: &mut Document) -> Result<(), DomError> {
        for &(key, node) in self.nodes().option_rows() {
            if let Some(option) = self.state().option(key) {
                self.mark_option(node_mut(doc, node)?, option);
            }
        }
        Ok(())
    }

    /// Selected, disabled and focus markers of one row.
    fn mark_option(&self, item: &mut Element, option: &DropOption) {
        item.toggle_class(class::SELECTED, option.selected);
        item.toggle_class(class::DISABLED, option.disabled);
        item.toggle_class(class::FOCUS, self.state().current_key() == Some(option.key));
        set_flag_attr(item, "aria-selected", option.selected);
        set_flag_attr(item, "aria-disabled", option.disabled);
    }

    fn build_option(&self, doc: &mut Document, option: &DropOption) -> Result<NodeId, DomError> {
        let mut item = Element::new("li")
            .class(class::OPTION)
            .id(self.option_id(option.key))
            .attr("role", "option");
        self.mark_option(&mut item, option);
        let item = doc.create(item);

        if let Some(src) = &option.image {
            let img = doc.create(
                Element::new("img")
                    .class(class::OPTION_IMG)
                    .attr("src", src)
                    .attr("alt", &option.title),
            );
            doc.append_child(item, img)?;
        }

        let body = doc.create(Element::new("div").class(class::OPTION_BODY));
        let title = doc.create(Element::new("span").text(&option.title));
        doc.append_child(body, title)?;
        if let Some(desc) = &option.description {
            let desc = doc.create(Element::new("small").text(desc));
            doc.append_child(body, desc)?;
        }
        doc.append_child(item, body)?;

        Ok(item)
    }

    /// Move the focus marker between existing rows without rebuilding.
    pub(crate) fn render_focus(&self, doc: &mut Document) -> Result<(), DomError> {
        let current = self.state().current_key();
        for &(key, node) in self.nodes().option_rows() {
            node_mut(doc, node)?.toggle_class(class::FOCUS, Some(key) == current);
        }
        self.render_active_descendant(doc)
    }

    /// Point `aria-activedescendant` at the cursor row, or drop it when
    /// nothing is focused.
    pub(crate) fn render_active_descendant(&self, doc: &mut Document) -> Result<(), DomError> {
        let active = self.state().current_key().map(|key| self.option_id(key));
        let targets = [Some(self.nodes().display), self.nodes().search];
        for node in targets.into_iter().flatten() {
            let element = node_mut(doc, node)?;
            match &active {
                Some(id) => element.set_attr("aria-activedescendant", id),
                None => {
                    element.remove_attr("aria-activedescendant");
                }
            }
        }
        Ok(())
    }
}

fn set_flag_attr(element: &mut Element, key: &str, on: bool) {
    if on {
        element.set_attr(key, true);
    } else {
        element.remove_attr(key);
    }
}
