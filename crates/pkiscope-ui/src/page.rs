//! Element registry for the page.
//!
//! Built once from `PageConfig`: anchors are addressed by `LinkId`, content
//! sections by identifier. Controllers mutate the registry instead of
//! querying the page by role on every event.

use std::collections::HashMap;

use pkiscope_common::PageConfig;

use crate::regions::{ResultRegion, SharedResult, SharedStructure, StructureView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRole {
    /// Carries the navigation-link role; takes part in active-link exclusivity.
    Nav,
    /// Any other anchor, e.g. a call-to-action button.
    Plain,
}

#[derive(Debug, Clone)]
pub struct Anchor {
    pub href: String,
    pub role: LinkRole,
    active: bool,
}

impl Anchor {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The in-page target, when the href is a fragment reference.
    pub fn fragment(&self) -> Option<&str> {
        self.href.strip_prefix('#')
    }
}

#[derive(Debug, Default)]
pub struct ElementRegistry {
    home: String,
    anchors: Vec<Anchor>,
    sections: HashMap<String, bool>,
    /// Target of the most recent smooth scroll.
    last_scroll: Option<String>,
}

impl ElementRegistry {
    pub fn new(home: impl Into<String>) -> Self {
        Self { home: home.into(), ..Default::default() }
    }

    pub fn from_config(config: &PageConfig) -> Self {
        let mut registry = Self::new(config.home_section.clone());
        for section in &config.sections {
            registry.add_section(section);
        }
        for link in &config.links {
            let role = if link.nav { LinkRole::Nav } else { LinkRole::Plain };
            registry.add_anchor(&link.href, role);
        }
        registry
    }

    pub fn add_anchor(&mut self, href: &str, role: LinkRole) -> LinkId {
        self.anchors.push(Anchor { href: href.to_string(), role, active: false });
        LinkId(self.anchors.len() - 1)
    }

    pub fn add_section(&mut self, id: &str) {
        self.sections.entry(id.to_string()).or_insert(false);
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn anchors(&self) -> impl Iterator<Item = (LinkId, &Anchor)> {
        self.anchors.iter().enumerate().map(|(i, a)| (LinkId(i), a))
    }

    pub fn anchor(&self, id: LinkId) -> Option<&Anchor> {
        self.anchors.get(id.0)
    }

    pub fn has_section(&self, id: &str) -> bool {
        self.sections.contains_key(id)
    }

    pub fn is_section_active(&self, id: &str) -> bool {
        self.sections.get(id).copied().unwrap_or(false)
    }

    pub fn active_nav_links(&self) -> Vec<LinkId> {
        self.anchors()
            .filter(|(_, a)| a.role == LinkRole::Nav && a.active)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn active_sections(&self) -> Vec<&str> {
        let mut active: Vec<&str> = self
            .sections
            .iter()
            .filter(|(_, on)| **on)
            .map(|(id, _)| id.as_str())
            .collect();
        active.sort_unstable();
        active
    }

    /// At most one navigation link and at most one section carry the marker.
    pub fn is_consistent(&self) -> bool {
        self.active_nav_links().len() <= 1 && self.active_sections().len() <= 1
    }

    pub(crate) fn clear_nav_links(&mut self) {
        for anchor in self.anchors.iter_mut().filter(|a| a.role == LinkRole::Nav) {
            anchor.active = false;
        }
    }

    pub(crate) fn set_link_active(&mut self, id: LinkId) -> bool {
        match self.anchors.get_mut(id.0) {
            Some(anchor) => {
                anchor.active = true;
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear_sections(&mut self) {
        for active in self.sections.values_mut() {
            *active = false;
        }
    }

    /// Returns false when no section has this identifier.
    pub(crate) fn set_section_active(&mut self, id: &str) -> bool {
        match self.sections.get_mut(id) {
            Some(active) => {
                *active = true;
                true
            }
            None => false,
        }
    }

    /// Smooth-scroll the element with this identifier into view. Unknown
    /// targets are ignored.
    pub(crate) fn scroll_into_view(&mut self, id: &str) -> bool {
        if !self.sections.contains_key(id) {
            return false;
        }
        self.last_scroll = Some(id.to_string());
        true
    }

    pub fn last_scroll(&self) -> Option<&str> {
        self.last_scroll.as_deref()
    }
}

/// The submission form and the two regions it writes to.
#[derive(Debug)]
pub struct PredictionForm {
    pub input: String,
    pub result: SharedResult,
    pub structure: SharedStructure,
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self {
            input: String::new(),
            result: ResultRegion::shared(),
            structure: StructureView::shared(),
        }
    }
}

/// Everything the two controllers consume.
#[derive(Debug)]
pub struct Page {
    pub registry: ElementRegistry,
    pub form: PredictionForm,
}

impl Page {
    pub fn from_config(config: &PageConfig) -> Self {
        Self {
            registry: ElementRegistry::from_config(config),
            form: PredictionForm::default(),
        }
    }
}
