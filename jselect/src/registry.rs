//! Registry of dropdown instances owned by the embedding application.

use formdom::{Document, NodeId, UiEvent};

use crate::dropdown::Dropdown;
use crate::error::{JselectError, Result};
use crate::events::{EventResult, RELOAD_EVENT};
use crate::locale::LocaleTable;
use crate::render::PREFIX;

/// Attribute marking a `<select>` for replacement: `data-replace="jselect"`.
pub const TRIGGER_ATTR: &str = "data-replace";

/// All dropdown instances on a page, plus the locale table they share.
///
/// Instances are keyed by name. Attaching a source whose name is already
/// registered replaces the older instance.
#[derive(Debug, Default)]
pub struct Registry {
    locales: LocaleTable,
    instances: Vec<Dropdown>,
}

impl Registry {
    pub fn new(locales: LocaleTable) -> Self {
        Self {
            locales,
            instances: Vec::new(),
        }
    }

    pub fn locales(&self) -> &LocaleTable {
        &self.locales
    }

    pub fn locales_mut(&mut self) -> &mut LocaleTable {
        &mut self.locales
    }

    /// Replace every source control marked with [`TRIGGER_ATTR`] that has no
    /// instance yet.
    ///
    /// Returns the number of instances created.
    pub fn scan(&mut self, doc: &mut Document) -> Result<usize> {
        let sources: Vec<NodeId> = doc
            .query_attr(TRIGGER_ATTR, PREFIX)
            .into_iter()
            .filter(|&source| self.by_source(source).is_none())
            .collect();
        for &source in &sources {
            self.attach(doc, source)?;
        }
        log::debug!("[registry] scan created {} instances", sources.len());
        Ok(sources.len())
    }

    /// Build a dropdown for `source` and register it.
    ///
    /// A source that already has an instance is not replaced twice; the
    /// existing instance is returned.
    pub fn attach(&mut self, doc: &mut Document, source: NodeId) -> Result<&mut Dropdown> {
        if let Some(index) = self.instances.iter().position(|d| d.source() == source) {
            log::debug!("[registry] {source} already managed by {}", self.instances[index].name());
            return Ok(&mut self.instances[index]);
        }

        let dropdown = Dropdown::attach(doc, source, &self.locales)?;
        self.instances.retain(|d| d.name() != dropdown.name());
        self.instances.push(dropdown);
        let index = self.instances.len() - 1;
        Ok(&mut self.instances[index])
    }

    pub fn get(&self, name: &str) -> Option<&Dropdown> {
        self.instances.iter().find(|d| d.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Dropdown> {
        self.instances.iter_mut().find(|d| d.name() == name)
    }

    /// The instance built from `source`.
    pub fn by_source(&self, source: NodeId) -> Option<&Dropdown> {
        self.instances.iter().find(|d| d.source() == source)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dropdown> + '_ {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Rebuild the named instance from its source.
    pub fn reload(&mut self, doc: &mut Document, name: &str) -> Result<()> {
        let dropdown = self
            .instances
            .iter_mut()
            .find(|d| d.name() == name)
            .ok_or_else(|| JselectError::UnknownInstance(name.to_string()))?;
        dropdown.reload(doc, &self.locales)
    }

    /// Deliver a host event to every instance.
    ///
    /// A [`RELOAD_EVENT`] custom event rebuilds the instance whose source is
    /// the target. Everything else is offered to all instances, since
    /// keyboard and pointer-down listeners are global.
    ///
    /// A failing instance does not stop delivery to the others. The first
    /// error is returned once every instance has seen the event.
    pub fn dispatch(&mut self, doc: &mut Document, event: &UiEvent) -> Result<EventResult> {
        let mut result = EventResult::Ignored;
        let mut first_error = None;

        for dropdown in &mut self.instances {
            let handled = match event {
                UiEvent::Custom { target, name } => {
                    if name != RELOAD_EVENT || dropdown.source() != *target {
                        continue;
                    }
                    dropdown
                        .reload(doc, &self.locales)
                        .map(|()| EventResult::Consumed)
                }
                _ => dropdown.handle_event(doc, event),
            };
            match handled {
                Ok(handled) => result = result.or(handled),
                Err(err) => {
                    log::warn!("[registry] {} failed to handle {event:?}: {err}", dropdown.name());
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(result),
        }
    }
}
