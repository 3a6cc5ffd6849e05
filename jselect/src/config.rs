//! Per-instance configuration read from the source control.

use formdom::Element;

/// Locale used when the source control names none.
pub const DEFAULT_LOCALE: &str = "en";

/// How a dropdown instance behaves.
///
/// Usually parsed from the `data-*` attributes of the source control with
/// [`DropdownConfig::from_source`]:
///
/// | attribute          | field           |
/// |--------------------|-----------------|
/// | `data-locale`      | `locale`        |
/// | `data-multiple`    | `multiple`      |
/// | `data-search`      | `search`        |
/// | `data-value`       | `default_value` |
/// | `data-placeholder` | `placeholder`   |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownConfig {
    pub locale: String,
    pub multiple: bool,
    pub search: bool,
    /// Values to select at init, replacing the source's own selection.
    pub default_value: Option<Vec<String>>,
    /// Overrides the locale's placeholder.
    pub placeholder: Option<String>,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            multiple: false,
            search: false,
            default_value: None,
            placeholder: None,
        }
    }
}

impl DropdownConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_source(source: &Element) -> Self {
        let non_empty = |key: &str| source.dataset(key).filter(|v| !v.is_empty());

        Self {
            locale: non_empty("locale").unwrap_or(DEFAULT_LOCALE).to_string(),
            multiple: flag(source.dataset("multiple")),
            search: flag(source.dataset("search")),
            default_value: non_empty("value")
                .map(|csv| csv.split(',').map(str::to_string).collect()),
            placeholder: non_empty("placeholder").map(str::to_string),
        }
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn search(mut self, search: bool) -> Self {
        self.search = search;
        self
    }

    pub fn default_value<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_value = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Write this configuration back as `data-*` attributes.
    pub fn apply_to(&self, source: &mut Element) {
        source.set_attr("data-locale", &self.locale);
        set_flag(source, "data-multiple", self.multiple);
        set_flag(source, "data-search", self.search);
        match &self.default_value {
            Some(values) => source.set_attr("data-value", values.join(",")),
            None => {
                source.remove_attr("data-value");
            }
        }
        match &self.placeholder {
            Some(text) => source.set_attr("data-placeholder", text),
            None => {
                source.remove_attr("data-placeholder");
            }
        }
    }
}

/// A flag attribute is on when present, non-empty and not `"false"`.
fn flag(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !v.is_empty() && v != "false")
}

fn set_flag(source: &mut Element, key: &str, on: bool) {
    if on {
        source.set_attr(key, "true");
    } else {
        source.remove_attr(key);
    }
}
