//! StyleScan Core Library
//!
//! Platform-agnostic style extraction, overlay geometry and interaction state
//! for the StyleScan element inspector.

pub mod color;
pub mod config;
pub mod dom;
pub mod edit;
pub mod input;
pub mod inspector;
pub mod overlay;
pub mod protocol;
pub mod state;
pub mod style;

pub use config::{OverlayTheme, ScanConfig, SerializableColor, ZIndexLayers, element_id};
pub use dom::{DomError, DomResult, ElementHandle, MemoryElement};
pub use edit::{BulkApplyReport, EditSession, StyleEditor, apply_bulk};
pub use input::{KeyInput, Modifiers, ScanCommand, ShortcutRegistry};
pub use inspector::{ClickOutcome, Inspector};
pub use overlay::{Highlight, OverlayFrame, Side, SpacingIndicator, Viewport};
pub use protocol::ExtensionMessage;
pub use state::{ClickEffect, InteractionState};
pub use style::{ElementInfo, StyleGroup, StyleGroupName, StyleMap, to_css_text, to_css_text_grouped};
