//! Dropdown interaction and selection state, independent of the document.

use crate::option::DropOption;

/// Focus cursor movement requested by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Up,
    Down,
    First,
    Last,
}

/// Options, filtered view, focus cursor and open flag of one dropdown.
///
/// `shown` holds indices into `options` in ascending order, so it is always
/// an order-preserving subset. `current` is always the key of a shown option.
#[derive(Debug, Clone, Default)]
pub struct DropdownState {
    options: Vec<DropOption>,
    shown: Vec<usize>,
    current: Option<usize>,
    is_open: bool,
    multiple: bool,
}

impl DropdownState {
    /// Start closed, with every option shown and the cursor on the first
    /// enabled option.
    pub fn new(options: Vec<DropOption>, multiple: bool) -> Self {
        let shown = (0..options.len()).collect();
        let current = options.iter().find(|o| !o.disabled).map(|o| o.key);
        let mut state = Self {
            options,
            shown,
            current,
            is_open: false,
            multiple,
        };
        state.normalize();
        state
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn options(&self) -> &[DropOption] {
        &self.options
    }

    pub fn option(&self, key: usize) -> Option<&DropOption> {
        self.index_of(key).map(|i| &self.options[i])
    }

    /// The options passing the active filter, in original order.
    pub fn shown(&self) -> impl Iterator<Item = &DropOption> + '_ {
        self.shown.iter().map(|&i| &self.options[i])
    }

    pub fn shown_len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_shown(&self, key: usize) -> bool {
        self.shown_position(key).is_some()
    }

    pub fn current(&self) -> Option<&DropOption> {
        self.current.and_then(|key| self.option(key))
    }

    pub fn current_key(&self) -> Option<usize> {
        self.current
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn is_selected(&self, key: usize) -> bool {
        self.option(key).is_some_and(|o| o.selected)
    }

    pub fn selected(&self) -> impl Iterator<Item = &DropOption> + '_ {
        self.options.iter().filter(|o| o.selected)
    }

    /// Comma-joined values of the selected options.
    pub fn value(&self) -> String {
        self.selected()
            .map(|o| o.value.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Comma-joined titles of the selected options, or `None` when nothing
    /// is selected.
    pub fn selected_titles(&self) -> Option<String> {
        let titles: Vec<&str> = self.selected().map(|o| o.title.as_str()).collect();
        if titles.is_empty() {
            None
        } else {
            Some(titles.join(", "))
        }
    }

    /// Text for the display button.
    pub fn display_text(&self, placeholder: &str) -> String {
        self.selected_titles()
            .unwrap_or_else(|| placeholder.to_string())
    }

    fn index_of(&self, key: usize) -> Option<usize> {
        // Keys are assigned 1..=N, so the direct slot is almost always right.
        match self.options.get(key.wrapping_sub(1)) {
            Some(o) if o.key == key => Some(key - 1),
            _ => self.options.iter().position(|o| o.key == key),
        }
    }

    fn shown_position(&self, key: usize) -> Option<usize> {
        let index = self.index_of(key)?;
        self.shown.binary_search(&index).ok()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggle the option with `key`.
    ///
    /// Single-select: every other option is deselected and the target is
    /// selected. Multi-select: the target is flipped. Unknown keys and
    /// disabled targets leave the state untouched and return false.
    pub fn toggle(&mut self, key: usize) -> bool {
        let Some(index) = self.index_of(key) else {
            return false;
        };
        if self.options[index].disabled {
            return false;
        }

        if self.multiple {
            let option = &mut self.options[index];
            option.selected = !option.selected;
        } else {
            for (i, option) in self.options.iter_mut().enumerate() {
                option.selected = i == index;
            }
        }
        true
    }

    /// Replace the selection with the options whose value is in `values`.
    pub fn select_values<S: AsRef<str>>(&mut self, values: &[S]) -> usize {
        for option in &mut self.options {
            option.selected = values.iter().any(|v| v.as_ref() == option.value);
        }
        self.normalize();
        self.selected().count()
    }

    /// Drop selection from disabled options and, for single-select, keep
    /// only the first selected option.
    fn normalize(&mut self) {
        let mut seen = false;
        for option in &mut self.options {
            if option.disabled {
                option.selected = false;
            }
            if option.selected && !self.multiple {
                option.selected = !seen;
                seen = true;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Open/close and cursor
    // -------------------------------------------------------------------------

    /// Returns true if the flag changed.
    pub fn set_open(&mut self, open: bool) -> bool {
        let changed = self.is_open != open;
        self.is_open = open;
        changed
    }

    /// Move the cursor to a shown option. Returns false if `key` is not shown.
    pub fn set_current(&mut self, key: usize) -> bool {
        if !self.is_shown(key) {
            return false;
        }
        self.current = Some(key);
        true
    }

    /// Resolve the key the cursor should move to.
    ///
    /// Up and Down step one position and stop at the ends (returning `None`).
    /// First and Last always resolve while something is shown.
    pub fn nav_target(&self, nav: Nav) -> Option<usize> {
        let position = self.current.and_then(|key| self.shown_position(key));
        let last = self.shown.len().checked_sub(1)?;

        let target = match (nav, position) {
            (Nav::First, _) => 0,
            (Nav::Last, _) => last,
            (Nav::Up, Some(p)) if p > 0 => p - 1,
            (Nav::Up, _) => return None,
            (Nav::Down, None) => 0,
            (Nav::Down, Some(p)) if p < last => p + 1,
            (Nav::Down, Some(_)) => return None,
        };
        Some(self.options[self.shown[target]].key)
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Recompute the shown set for `query`.
    ///
    /// Never touches options or selection. If the cursor's option is filtered
    /// out, the cursor moves to the first shown option.
    pub fn filter(&mut self, query: &str) -> usize {
        let needle = query.trim().to_lowercase();
        self.shown = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.matches(&needle))
            .map(|(i, _)| i)
            .collect();

        if !self.current.is_some_and(|key| self.is_shown(key)) {
            self.current = self.shown.first().map(|&i| self.options[i].key);
        }
        self.shown.len()
    }
}
