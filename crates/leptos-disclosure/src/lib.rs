//! Leptos Disclosure Utilities
//!
//! Expand/collapse state for sections that get fully re-rendered.
//! Open state is read back from the live DOM right before a re-render
//! and handed to the new sections as their initial state.

use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Inline `display` value of an open section
pub const DISPLAY_VISIBLE: &str = "block";
/// Inline `display` value of a closed section
pub const DISPLAY_HIDDEN: &str = "none";

/// Snapshot of which sections were open, keyed by element id
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpandedSections {
    open: HashMap<String, bool>,
}

impl ExpandedSections {
    /// Build a snapshot from `(element id, inline display value)` pairs.
    /// Only sections displayed as `block` count as open.
    pub fn from_sections<I, S, D>(sections: I) -> Self
    where
        I: IntoIterator<Item = (S, D)>,
        S: Into<String>,
        D: AsRef<str>,
    {
        let mut open = HashMap::new();
        for (id, display) in sections {
            if display.as_ref() == DISPLAY_VISIBLE {
                open.insert(id.into(), true);
            }
        }
        Self { open }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.open.get(id).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

/// Scan every element with `section_class` in the current document and
/// record which of them are open.
pub fn capture_expanded(section_class: &str) -> ExpandedSections {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return ExpandedSections::default();
    };
    let Ok(nodes) = doc.query_selector_all(&format!(".{}", section_class)) else {
        return ExpandedSections::default();
    };

    let mut sections = Vec::with_capacity(nodes.length() as usize);
    for idx in 0..nodes.length() {
        let Some(el) = nodes.item(idx).and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok()) else {
            continue;
        };
        let display = el.style().get_property_value("display").unwrap_or_default();
        sections.push((el.id(), display));
    }
    ExpandedSections::from_sections(sections)
}

/// Inline `display` value for a section in the given state
pub fn display_for(open: bool) -> &'static str {
    if open { DISPLAY_VISIBLE } else { DISPLAY_HIDDEN }
}

/// Next `display` value when a header is clicked.
/// Anything other than `none` collapses.
pub fn flip_display(current: &str) -> &'static str {
    if current == DISPLAY_HIDDEN { DISPLAY_VISIBLE } else { DISPLAY_HIDDEN }
}

/// Open/closed signals for one section
#[derive(Clone, Copy)]
pub struct DisclosureSignals {
    pub open_read: ReadSignal<bool>,
    pub open_write: WriteSignal<bool>,
}

impl DisclosureSignals {
    /// `display` value to bind on the section body
    pub fn display(&self) -> &'static str {
        display_for(self.open_read.get())
    }
}

pub fn create_disclosure(initially_open: bool) -> DisclosureSignals {
    let (open_read, open_write) = signal(initially_open);
    DisclosureSignals { open_read, open_write }
}

/// Create click handler for a section header
pub fn make_on_toggle(disclosure: DisclosureSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        let current = display_for(disclosure.open_read.get_untracked());
        disclosure.open_write.set(flip_display(current) == DISPLAY_VISIBLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_block_sections_are_expanded() {
        let snapshot = ExpandedSections::from_sections(vec![
            ("yard-A", "block"),
            ("yard-B", "none"),
            ("yard-C", ""),
        ]);

        assert!(snapshot.is_expanded("yard-A"));
        assert!(!snapshot.is_expanded("yard-B"));
        assert!(!snapshot.is_expanded("yard-C"));
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_unknown_section_defaults_to_hidden() {
        let snapshot = ExpandedSections::default();
        assert!(snapshot.is_empty());
        assert!(!snapshot.is_expanded("yard-Missing"));
        assert_eq!(display_for(snapshot.is_expanded("yard-Missing")), DISPLAY_HIDDEN);
    }

    #[test]
    fn test_snapshot_restores_same_display() {
        // Render from a snapshot, then capture again: nothing changes
        let before = ExpandedSections::from_sections(vec![("yard-A", "block"), ("yard-B", "none")]);
        let rendered: Vec<(&str, &str)> = ["yard-A", "yard-B"]
            .iter()
            .map(|id| (*id, display_for(before.is_expanded(id))))
            .collect();
        let after = ExpandedSections::from_sections(rendered);
        assert_eq!(before, after);
    }

    #[test]
    fn test_flip_display() {
        assert_eq!(flip_display("none"), "block");
        assert_eq!(flip_display("block"), "none");
        // Empty inline style is treated as open, like the browser shows it
        assert_eq!(flip_display(""), "none");
    }
}
