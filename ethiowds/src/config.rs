//! Toolkit and per-widget configuration.
//!
//! Every record deserializes with serde defaults, so a caller-supplied JSON
//! object only needs the keys it wants to override. Configuration is read
//! once at construction and never mutated afterwards.

use serde::Deserialize;

use crate::error::WidgetError;

const DEFAULT_CSS_URL: &str = "./css/ethio-wds.css";
const DEFAULT_ETHIOPIC_FONT: &str =
    "https://fonts.googleapis.com/css2?family=Noto+Sans+Ethiopic:wght@400;500;600;700&display=swap";
const DEFAULT_SANS_FONT: &str =
    "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap";

/// Accordion behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccordionOptions {
    /// Allow more than one item to be expanded at a time.
    pub multiple: bool,
}

impl AccordionOptions {
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }
}

/// Modal dismissal behavior.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalOptions {
    pub close_on_backdrop: bool,
    pub close_on_escape: bool,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            close_on_backdrop: true,
            close_on_escape: true,
        }
    }
}

impl ModalOptions {
    pub fn close_on_backdrop(mut self, enabled: bool) -> Self {
        self.close_on_backdrop = enabled;
        self
    }

    pub fn close_on_escape(mut self, enabled: bool) -> Self {
        self.close_on_escape = enabled;
        self
    }
}

/// Custom select behavior.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectOptions {
    /// Render a search box that filters options by text.
    pub searchable: bool,
    /// Label shown when the native element has no selected option text.
    pub placeholder: String,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            searchable: false,
            placeholder: "Select an option".to_string(),
        }
    }
}

impl SelectOptions {
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

/// Tabs behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TabsOptions {
    /// Index of the tab activated on construction.
    pub default_tab: usize,
}

impl TabsOptions {
    pub fn default_tab(mut self, index: usize) -> Self {
        self.default_tab = index;
        self
    }
}

/// Font stylesheet locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FontUrls {
    pub ethiopic: String,
    pub sans: String,
}

impl Default for FontUrls {
    fn default() -> Self {
        Self {
            ethiopic: DEFAULT_ETHIOPIC_FONT.to_string(),
            sans: DEFAULT_SANS_FONT.to_string(),
        }
    }
}

/// Orchestrator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WdsConfig {
    /// Written to `data-theme` on the root element unless it is "default".
    pub theme: String,
    /// Right-to-left text direction.
    pub rtl: bool,
    /// Written to the root element's `lang` attribute.
    pub language: String,
    #[serde(rename = "loadCSS")]
    pub load_css: bool,
    pub css_url: String,
    pub load_fonts: bool,
    pub fonts: FontUrls,
    /// Run [`EthioWds::init`](crate::EthioWds::init) from the constructor.
    pub auto_init: bool,
    /// Fall back to direct class manipulation for markup that predates the
    /// widget attributes.
    pub legacy_compat: bool,

    // Options applied to auto-discovered widgets
    pub accordion: AccordionOptions,
    pub modal: ModalOptions,
    pub select: SelectOptions,
    pub tabs: TabsOptions,
}

impl Default for WdsConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            rtl: false,
            language: "am".to_string(),
            load_css: true,
            css_url: DEFAULT_CSS_URL.to_string(),
            load_fonts: true,
            fonts: FontUrls::default(),
            auto_init: true,
            legacy_compat: false,
            accordion: AccordionOptions::default(),
            modal: ModalOptions::default(),
            select: SelectOptions::default(),
            tabs: TabsOptions::default(),
        }
    }
}

impl WdsConfig {
    /// Parse a partial JSON object over the defaults.
    pub fn from_json(json: &str) -> Result<Self, WidgetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn load_css(mut self, load: bool) -> Self {
        self.load_css = load;
        self
    }

    pub fn css_url(mut self, url: impl Into<String>) -> Self {
        self.css_url = url.into();
        self
    }

    pub fn load_fonts(mut self, load: bool) -> Self {
        self.load_fonts = load;
        self
    }

    pub fn auto_init(mut self, auto_init: bool) -> Self {
        self.auto_init = auto_init;
        self
    }

    pub fn legacy_compat(mut self, enabled: bool) -> Self {
        self.legacy_compat = enabled;
        self
    }

    pub fn accordion(mut self, options: AccordionOptions) -> Self {
        self.accordion = options;
        self
    }

    pub fn modal(mut self, options: ModalOptions) -> Self {
        self.modal = options;
        self
    }

    pub fn select(mut self, options: SelectOptions) -> Self {
        self.select = options;
        self
    }

    pub fn tabs(mut self, options: TabsOptions) -> Self {
        self.tabs = options;
        self
    }
}
