//! In-page anchor navigation.
//!
//! Every anchor whose href starts with `#` gets a click handler. A click
//! moves the active marker to the clicked link and to the section named by
//! the fragment, then smooth-scrolls to that section. Missing targets are
//! absorbed without error or log output.

use tracing::{debug, info};

use pkiscope_common::{PkiscopeError, Result};

use crate::page::{ElementRegistry, LinkId, LinkRole};

/// What happened to a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The anchor has no in-page handler; the click is left to the browser.
    NotIntercepted,
    /// Default jump prevented and markers updated.
    Navigated {
        link: LinkId,
        /// Section that now carries the marker, if the fragment named one.
        section: Option<String>,
        scrolled: bool,
    },
}

pub struct NavigationController {
    registry: ElementRegistry,
    bound: Vec<bool>,
}

impl NavigationController {
    /// Bind click handlers and mark the home section active.
    pub fn bind(mut registry: ElementRegistry) -> Result<Self> {
        let home = registry.home().to_string();
        if !registry.set_section_active(&home) {
            return Err(PkiscopeError::MissingElement(home));
        }

        let bound: Vec<bool> = registry
            .anchors()
            .map(|(_, a)| a.fragment().is_some())
            .collect();
        info!(
            "Navigation bound: {} of {} anchors, home section '{}'",
            bound.iter().filter(|b| **b).count(),
            bound.len(),
            home
        );

        Ok(Self { registry, bound })
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn click(&mut self, link: LinkId) -> Result<ClickOutcome> {
        let anchor = self
            .registry
            .anchor(link)
            .ok_or(PkiscopeError::UnknownLink(link.0))?;
        if !self.bound[link.0] {
            return Ok(ClickOutcome::NotIntercepted);
        }
        let target = anchor.fragment().unwrap_or_default().to_string();

        self.registry.clear_nav_links();
        self.registry.set_link_active(link);

        self.registry.clear_sections();
        let section = self
            .registry
            .set_section_active(&target)
            .then(|| target.clone());

        let scrolled = self.registry.scroll_into_view(&target);
        if let Some(section) = &section {
            debug!(link = link.0, section = %section, "anchor click");
        }

        Ok(ClickOutcome::Navigated { link, section, scrolled })
    }

    /// Click the first bound anchor with this href.
    pub fn click_href(&mut self, href: &str) -> Result<ClickOutcome> {
        let link = self
            .registry
            .anchors()
            .find(|(id, a)| a.href == href && self.bound[id.0])
            .map(|(id, _)| id)
            .ok_or_else(|| PkiscopeError::MissingElement(href.to_string()))?;
        self.click(link)
    }

    pub fn active_link(&self) -> Option<LinkId> {
        self.registry.active_nav_links().first().copied()
    }

    pub fn active_section(&self) -> Option<&str> {
        self.registry.active_sections().first().copied()
    }

    pub fn last_scroll(&self) -> Option<&str> {
        self.registry.last_scroll()
    }

    /// Anchors without the navigation role that carry the marker.
    pub fn active_plain_links(&self) -> Vec<LinkId> {
        self.registry
            .anchors()
            .filter(|(_, a)| a.role == LinkRole::Plain && a.is_active())
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkiscope_common::PageConfig;
    use tracing_test::traced_test;

    fn default_nav() -> NavigationController {
        NavigationController::bind(ElementRegistry::from_config(&PageConfig::default())).unwrap()
    }

    #[test]
    fn test_home_active_on_bind() {
        let nav = default_nav();
        assert_eq!(nav.active_section(), Some("home"));
        assert_eq!(nav.active_link(), None);
    }

    #[test]
    fn test_bind_without_home_fails() {
        let mut registry = ElementRegistry::new("home");
        registry.add_section("about");
        let err = NavigationController::bind(registry).err().unwrap();
        assert!(matches!(err, PkiscopeError::MissingElement(ref id) if id == "home"));
    }

    #[test]
    fn test_click_moves_both_markers() {
        let mut nav = default_nav();
        let outcome = nav.click_href("#predict").unwrap();
        assert_eq!(
            outcome,
            ClickOutcome::Navigated { link: LinkId(1), section: Some("predict".into()), scrolled: true }
        );
        assert_eq!(nav.active_link(), Some(LinkId(1)));
        assert_eq!(nav.active_section(), Some("predict"));
        assert!(!nav.registry().is_section_active("home"));
        assert_eq!(nav.last_scroll(), Some("predict"));
    }

    #[test]
    fn test_every_click_sequence_keeps_one_active_pair() {
        let links: Vec<LinkId> = (0..3).map(LinkId).collect();
        for a in &links {
            for b in &links {
                for c in &links {
                    let mut nav = default_nav();
                    for link in [a, b, c] {
                        nav.click(*link).unwrap();
                        assert_eq!(nav.registry().active_nav_links(), vec![*link]);
                        assert_eq!(nav.registry().active_sections().len(), 1);
                        assert!(nav.registry().is_consistent());
                    }
                }
            }
        }
    }

    #[test]
    #[traced_test]
    fn test_fragment_without_section_is_silent() {
        let mut registry = ElementRegistry::from_config(&PageConfig::default());
        let orphan = registry.add_anchor("#contact", LinkRole::Nav);
        let mut nav = NavigationController::bind(registry).unwrap();

        let outcome = nav.click(orphan).unwrap();
        assert_eq!(outcome, ClickOutcome::Navigated { link: orphan, section: None, scrolled: false });
        assert_eq!(nav.active_link(), Some(orphan));
        assert_eq!(nav.active_section(), None);
        assert!(nav.last_scroll().is_none());
        assert!(!logs_contain("contact"));
        assert!(!logs_contain("anchor click"));
    }

    #[test]
    #[traced_test]
    fn test_click_on_existing_section_is_traced() {
        let mut nav = default_nav();
        nav.click_href("#about").unwrap();
        assert!(logs_contain("anchor click"));
        assert!(logs_contain("section=about"));
    }

    #[test]
    fn test_duplicate_hrefs_activate_only_clicked_link() {
        let mut registry = ElementRegistry::from_config(&PageConfig::default());
        let footer = registry.add_anchor("#about", LinkRole::Nav);
        let mut nav = NavigationController::bind(registry).unwrap();

        nav.click(footer).unwrap();
        assert_eq!(nav.registry().active_nav_links(), vec![footer]);

        nav.click(LinkId(2)).unwrap();
        assert_eq!(nav.registry().active_nav_links(), vec![LinkId(2)]);
        assert_eq!(nav.active_section(), Some("about"));
    }

    #[test]
    fn test_external_anchor_not_intercepted() {
        let mut registry = ElementRegistry::from_config(&PageConfig::default());
        let external = registry.add_anchor("https://example.org/docs", LinkRole::Nav);
        let mut nav = NavigationController::bind(registry).unwrap();
        nav.click_href("#about").unwrap();

        assert_eq!(nav.click(external).unwrap(), ClickOutcome::NotIntercepted);
        assert_eq!(nav.active_section(), Some("about"));
        assert!(nav.click_href("https://example.org/docs").is_err());
    }

    #[test]
    fn test_plain_anchor_clears_nav_links() {
        let mut registry = ElementRegistry::from_config(&PageConfig::default());
        let cta = registry.add_anchor("#predict", LinkRole::Plain);
        let mut nav = NavigationController::bind(registry).unwrap();
        nav.click_href("#home").unwrap();

        nav.click(cta).unwrap();
        assert_eq!(nav.active_link(), None);
        assert_eq!(nav.active_plain_links(), vec![cta]);
        assert_eq!(nav.active_section(), Some("predict"));
    }

    #[test]
    fn test_unknown_link() {
        let mut nav = default_nav();
        assert!(matches!(nav.click(LinkId(99)), Err(PkiscopeError::UnknownLink(99))));
    }
}
