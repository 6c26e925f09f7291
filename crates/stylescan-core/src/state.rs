//! Interaction state: scan mode, pinning, hovered and selected elements.

use crate::dom::ElementHandle;
use crate::style::ElementInfo;

/// What a click did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickEffect {
    /// Scan mode is off; nothing changed.
    Ignored,
    /// The hovered element became selected and the hover was pinned.
    Selected,
    /// The selection was cleared and the hover unpinned.
    Deselected,
}

/// Single owner of the inspector's mutable state.
///
/// Fields change only through the transition methods below, which keep
/// these invariants:
/// - `element_info` is `Some` only while something is hovered or selected;
/// - `pinned` is only true while the scan is active;
/// - deactivating the scan clears pin, hover, selection and info.
#[derive(Debug, Clone)]
pub struct InteractionState<E> {
    scan_active: bool,
    pinned: bool,
    hovered: Option<E>,
    selected: Option<E>,
    button_visible: bool,
    element_info: Option<ElementInfo>,
}

impl<E> Default for InteractionState<E> {
    fn default() -> Self {
        Self {
            scan_active: false,
            pinned: false,
            hovered: None,
            selected: None,
            button_visible: false,
            element_info: None,
        }
    }
}

impl<E: ElementHandle> InteractionState<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_button_visible(mut self, visible: bool) -> Self {
        self.button_visible = visible;
        self
    }

    pub fn scan_active(&self) -> bool {
        self.scan_active
    }

    pub fn pinned(&self) -> bool {
        self.pinned
    }

    pub fn hovered(&self) -> Option<&E> {
        self.hovered.as_ref()
    }

    pub fn selected(&self) -> Option<&E> {
        self.selected.as_ref()
    }

    pub fn button_visible(&self) -> bool {
        self.button_visible
    }

    pub fn element_info(&self) -> Option<&ElementInfo> {
        self.element_info.as_ref()
    }

    /// The element the info panel describes: hovered, else selected.
    pub fn inspected(&self) -> Option<&E> {
        self.hovered.as_ref().or(self.selected.as_ref())
    }

    /// Clear everything except button visibility.
    pub fn reset(&mut self) {
        self.scan_active = false;
        self.pinned = false;
        self.hovered = None;
        self.selected = None;
        self.element_info = None;
    }

    /// Set scan mode, or flip it when `value` is `None`. Returns the new value.
    pub fn toggle_scan(&mut self, value: Option<bool>) -> bool {
        let active = value.unwrap_or(!self.scan_active);
        if active {
            self.scan_active = true;
        } else {
            self.reset();
        }
        log::info!("Element scan {}", if active { "enabled" } else { "disabled" });
        active
    }

    /// Set or flip the pin. It can only become true while scanning.
    pub fn toggle_pin(&mut self, value: Option<bool>) -> bool {
        let pinned = value.unwrap_or(!self.pinned);
        self.pinned = pinned && self.scan_active;
        self.pinned
    }

    /// Replace the hovered element. Ignored while pinned.
    ///
    /// Returns whether the hovered element changed.
    pub fn set_hovered(&mut self, element: Option<E>) -> bool {
        if self.pinned || self.hovered == element {
            return false;
        }
        self.hovered = element;
        self.enforce_info_invariant();
        true
    }

    /// Drop the hover if `element` is the hovered one and nothing is pinned.
    pub fn clear_hovered_if(&mut self, element: &E) -> bool {
        if self.pinned || self.hovered.as_ref() != Some(element) {
            return false;
        }
        self.set_hovered(None)
    }

    pub fn set_selected(&mut self, element: Option<E>) {
        self.selected = element;
        self.enforce_info_invariant();
    }

    /// Set or flip the toggle button visibility. Returns the new value.
    pub fn toggle_button_visible(&mut self, value: Option<bool>) -> bool {
        self.button_visible = value.unwrap_or(!self.button_visible);
        self.button_visible
    }

    /// Store the extracted info. Dropped when nothing is tracked.
    pub fn set_element_info(&mut self, info: Option<ElementInfo>) {
        self.element_info = info;
        self.enforce_info_invariant();
    }

    /// Click on a page element while scanning.
    ///
    /// With nothing hovered the target becomes hovered first. Then the
    /// selection toggles and the pin follows it.
    pub fn click(&mut self, target: E) -> ClickEffect {
        if !self.scan_active {
            return ClickEffect::Ignored;
        }
        if self.hovered.is_none() {
            self.hovered = Some(target);
        }

        if self.selected.is_none() {
            self.selected = self.hovered.clone();
            self.pinned = true;
            ClickEffect::Selected
        } else {
            self.selected = None;
            self.pinned = false;
            self.enforce_info_invariant();
            ClickEffect::Deselected
        }
    }

    fn enforce_info_invariant(&mut self) {
        if self.hovered.is_none() && self.selected.is_none() {
            self.element_info = None;
        }
    }
}
