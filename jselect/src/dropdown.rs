//! The dropdown widget bound to one source `<select>`.

use formdom::{Document, DomError, Element, EventTarget, NodeId};

use crate::config::DropdownConfig;
use crate::error::{JselectError, Result};
use crate::events::{CHANGE_EVENT, CREATE_EVENT};
use crate::locale::{Locale, LocaleTable};
use crate::option::extract_options;
use crate::render::{PREFIX, WidgetNodes, class, node_mut};
use crate::state::{DropdownState, Nav};

/// A custom dropdown replacing a native `<select>`.
///
/// The widget subtree is inserted right before the source control, which is
/// hidden but kept in the document. The generated hidden `<input>` carries
/// the comma-joined selected values under the source's name.
///
/// # Example
///
/// ```ignore
/// let mut doc = Document::new();
/// let source = doc.create(Element::new("select").name("fruit").data("search", "true"));
/// let body = doc.root();
/// doc.append_child(body, source)?;
///
/// let mut dropdown = Dropdown::attach(&mut doc, source, &LocaleTable::with_defaults())?;
/// dropdown.open(&mut doc)?;
/// ```
#[derive(Debug)]
pub struct Dropdown {
    source: NodeId,
    name: String,
    id: String,
    config: DropdownConfig,
    locale: Locale,
    placeholder: String,
    disabled: bool,
    state: DropdownState,
    nodes: WidgetNodes,
    /// Set by keyboard navigation so the hover caused by the resulting
    /// scroll does not steal the focus cursor. Cleared by the next hover.
    suppress_hover: bool,
}

impl Dropdown {
    /// Build a dropdown for `source` and mount it into the document.
    pub fn attach(doc: &mut Document, source: NodeId, locales: &LocaleTable) -> Result<Self> {
        let name = source_element(doc, source)?
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(generate_name);
        Self::build(doc, source, name, locales)
    }

    /// Discard all state and rebuild from the (possibly changed) source.
    pub fn reload(&mut self, doc: &mut Document, locales: &LocaleTable) -> Result<()> {
        let name = source_element(doc, self.source)?
            .name
            .as_deref()
            .map(|name| name.strip_prefix('_').unwrap_or(name))
            .filter(|name| !name.is_empty())
            .map_or_else(|| self.name.clone(), str::to_string);

        log::debug!("[dropdown] reload {} as {}", self.name, name);
        let rebuilt = Self::build(doc, self.source, name, locales)?;
        // A same-name build already destroyed the old subtree, whose ids may
        // now belong to the new one.
        if rebuilt.id != self.id
            && let Some(old) = doc.find_by_id(&self.id)
        {
            doc.destroy(old)?;
        }
        *self = rebuilt;
        Ok(())
    }

    fn build(doc: &mut Document, source: NodeId, name: String, locales: &LocaleTable) -> Result<Self> {
        let element = source_element(doc, source)?;
        let config = DropdownConfig::from_source(element);
        let disabled = element.disabled;
        let locale = locales.require(&config.locale)?.clone();
        let placeholder = config
            .placeholder
            .clone()
            .unwrap_or_else(|| locale.placeholder(config.multiple).to_string());
        let id = format!("{PREFIX}-{name}");

        // Mounting needs a parent. Fail before touching any existing subtree.
        if doc.parent(source).is_none() {
            return Err(DomError::Detached(source).into());
        }
        // The previous subtree must go before a new one with the same id lands.
        if let Some(existing) = doc.find_by_id(&id) {
            doc.destroy(existing)?;
        }

        let mut state = DropdownState::new(extract_options(doc, source), config.multiple);
        if let Some(values) = &config.default_value
            && state.select_values(values.as_slice()) == 0
        {
            log::warn!("[dropdown] {name}: default value {values:?} matches no option");
        }

        let nodes = WidgetNodes::create(doc, &id, config.search)?;
        let mut dropdown = Self {
            source,
            name,
            id,
            config,
            locale,
            placeholder,
            disabled,
            state,
            nodes,
            suppress_hover: false,
        };
        dropdown.render(doc)?;
        dropdown.mount(doc)?;

        log::debug!(
            "[dropdown] created {} ({} options, multiple={}, search={})",
            dropdown.id,
            dropdown.state.options().len(),
            dropdown.config.multiple,
            dropdown.config.search
        );
        doc.dispatch(EventTarget::Window, CREATE_EVENT);
        Ok(dropdown)
    }

    /// Insert the subtree before the source and hide the source.
    fn mount(&self, doc: &mut Document) -> Result<()> {
        doc.insert_before(self.nodes.root, self.source)?;

        let source = node_mut(doc, self.source)?;
        // Keep the source out of form submission under our name.
        if source.name.as_deref() == Some(self.name.as_str()) {
            source.name = Some(format!("_{}", self.name));
        }
        source.hidden = true;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the root node, `jselect-<name>`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the row for option `key`.
    pub fn option_id(&self, key: usize) -> String {
        format!("{}--{key}", self.id)
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn config(&self) -> &DropdownConfig {
        &self.config
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn state(&self) -> &DropdownState {
        &self.state
    }

    pub fn nodes(&self) -> &WidgetNodes {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut WidgetNodes {
        &mut self.nodes
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_selected(&self, key: usize) -> bool {
        self.state.is_selected(key)
    }

    /// Comma-joined values of the selected options.
    pub fn value(&self) -> String {
        self.state.value()
    }

    /// Text shown on the display button.
    pub fn display_text(&self) -> String {
        self.state.display_text(&self.placeholder)
    }

    pub(crate) fn suppress_hover(&mut self) {
        self.suppress_hover = true;
    }

    /// Consume the one-shot hover suppression. Returns true if it was set.
    pub(crate) fn take_hover_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_hover)
    }

    // -------------------------------------------------------------------------
    // Open/close
    // -------------------------------------------------------------------------

    pub fn open(&mut self, doc: &mut Document) -> Result<()> {
        self.state.set_open(true);
        node_mut(doc, self.nodes.root)?.add_class(class::OPEN);
        node_mut(doc, self.nodes.list)?.set_attr("aria-expanded", true);

        let display = node_mut(doc, self.nodes.display)?;
        display.set_attr("aria-expanded", true);
        match self.nodes.search {
            Some(search) => {
                display.tab_index = -1;
                doc.focus(search);
            }
            None => {
                doc.focus(self.nodes.display);
            }
        }

        if let Some(first) = self.state.nav_target(Nav::First) {
            self.focus_option(doc, first)?;
        }
        log::debug!("[dropdown] open {}", self.id);
        Ok(())
    }

    pub fn close(&mut self, doc: &mut Document) -> Result<()> {
        let display = node_mut(doc, self.nodes.display)?;
        display.remove_attr("aria-activedescendant");
        display.set_attr("aria-expanded", false);
        display.tab_index = 0;

        node_mut(doc, self.nodes.root)?.remove_class(class::OPEN);
        node_mut(doc, self.nodes.list)?.set_attr("aria-expanded", false);

        if self.nodes.search.is_some() && doc.active_element() == self.nodes.search {
            doc.focus(self.nodes.display);
        }

        if self.state.set_open(false) {
            log::debug!("[dropdown] close {}", self.id);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Focus cursor
    // -------------------------------------------------------------------------

    /// Move the focus cursor to `key` and re-render the list.
    ///
    /// Returns false when `key` is not in the shown set.
    pub fn focus_option(&mut self, doc: &mut Document, key: usize) -> Result<bool> {
        if !self.state.set_current(key) {
            return Ok(false);
        }
        self.render_list(doc)?;
        self.render_active_descendant(doc)?;
        if let Some(row) = self.nodes.option_node(key) {
            doc.scroll_into_view(self.nodes.list, row);
        }
        Ok(true)
    }

    /// Keyboard navigation within the shown set.
    ///
    /// Single-select widgets also select the option the cursor lands on.
    pub fn navigate(&mut self, doc: &mut Document, nav: Nav) -> Result<()> {
        self.suppress_hover();
        let Some(key) = self.state.nav_target(nav) else {
            return Ok(());
        };
        self.focus_option(doc, key)?;
        if !self.state.is_multiple() && !self.state.is_selected(key) {
            self.toggle(doc, key)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggle option `key` and fire the change notification.
    ///
    /// Returns false (and fires nothing) for unknown or disabled options.
    pub fn toggle(&mut self, doc: &mut Document, key: usize) -> Result<bool> {
        if !self.state.toggle(key) {
            return Ok(false);
        }
        log::debug!("[dropdown] {} toggle {key} -> value {:?}", self.id, self.state.value());

        if self.state.is_multiple() {
            doc.focus(self.nodes.search.unwrap_or(self.nodes.display));
        }
        self.render_value(doc)?;
        doc.dispatch(EventTarget::Node(self.nodes.hidden), CHANGE_EVENT);
        self.render_list(doc)?;
        Ok(true)
    }

    /// Toggle, then close unless this is a multi-select.
    pub fn toggle_and_close(&mut self, doc: &mut Document, key: usize) -> Result<bool> {
        let changed = self.toggle(doc, key)?;
        if !self.state.is_multiple() {
            self.close(doc)?;
        }
        Ok(changed)
    }

    /// Select `key` unless it already is.
    pub fn select(&mut self, doc: &mut Document, key: usize) -> Result<bool> {
        if self.state.is_selected(key) {
            return Ok(false);
        }
        self.toggle(doc, key)
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Filter the shown set and re-render the list. Returns the shown count.
    pub fn filter(&mut self, doc: &mut Document, query: &str) -> Result<usize> {
        let shown = self.state.filter(query);
        log::debug!("[dropdown] {} filter {query:?}: {shown} shown", self.id);
        if let Some(search) = self.nodes.search {
            node_mut(doc, search)?.value = query.to_string();
        }
        self.render_list(doc)?;
        self.render_active_descendant(doc)?;
        Ok(shown)
    }

    pub(crate) fn set_current(&mut self, key: usize) -> bool {
        self.state.set_current(key)
    }
}

fn source_element(doc: &Document, source: NodeId) -> Result<&Element> {
    let element = doc.get(source).ok_or(DomError::UnknownNode(source))?;
    if !element.is("select") {
        return Err(JselectError::NotASelect {
            node: source,
            tag: element.tag.clone(),
        });
    }
    Ok(element)
}

/// Name for a source control that has none.
fn generate_name() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
