//! Live style editing on the inspected element.

use crate::dom::{DomError, DomResult, ElementHandle};
use crate::style::{ElementInfo, StyleGroupName, parse_declarations};

/// The declaration currently being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub group: StyleGroupName,
    pub property: String,
    /// Latest value typed, including empty input that was not applied.
    pub value: String,
}

/// Owns at most one open edit session.
#[derive(Debug, Clone, Default)]
pub struct StyleEditor {
    session: Option<EditSession>,
}

impl StyleEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Whether `property` in `group` is the one being edited.
    pub fn is_editing_property(&self, group: StyleGroupName, property: &str) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.group == group && s.property == property)
    }

    /// Open a session, replacing any previous one.
    pub fn begin_edit(&mut self, group: StyleGroupName, property: &str, current: &str) {
        log::debug!("Editing {} in {}", property, group);
        self.session = Some(EditSession {
            group,
            property: property.to_string(),
            value: current.to_string(),
        });
    }

    /// Apply `value` to the live element and the displayed info together.
    ///
    /// Returns the updated info when the value was applied. Returns `Ok(None)`
    /// when there is no session, no live target, or the value is empty. On a
    /// rejected write the displayed info is left as it was.
    pub fn update_edit<E: ElementHandle>(
        &mut self,
        value: &str,
        target: Option<&E>,
        info: Option<&ElementInfo>,
    ) -> DomResult<Option<ElementInfo>> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        session.value = value.to_string();

        if value.is_empty() {
            return Ok(None);
        }
        let Some(target) = target.filter(|t| t.is_connected()) else {
            return Ok(None);
        };

        target.set_style_property(&session.property, value)?;
        Ok(info.map(|info| info.update_style(session.group, &session.property, value)))
    }

    /// Close the session. Returns it so the caller can report what changed.
    pub fn commit_edit(&mut self) -> Option<EditSession> {
        self.session.take()
    }
}

/// Outcome of applying one declaration from a pasted block.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedDeclaration {
    pub property: String,
    pub value: String,
    pub result: DomResult<()>,
}

impl AppliedDeclaration {
    pub fn is_applied(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-declaration results of [`apply_bulk`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkApplyReport {
    pub results: Vec<AppliedDeclaration>,
}

impl BulkApplyReport {
    /// At least one declaration stuck.
    pub fn success(&self) -> bool {
        self.results.iter().any(|r| r.is_applied())
    }

    pub fn applied_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_applied()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &AppliedDeclaration> {
        self.results.iter().filter(|r| !r.is_applied())
    }
}

/// Apply every declaration in `css_text` as inline style on `element`.
///
/// A declaration counts as applied when the element reports a non-empty
/// inline value for it afterwards.
pub fn apply_bulk<E: ElementHandle>(element: &E, css_text: &str) -> DomResult<BulkApplyReport> {
    if !element.is_connected() {
        return Err(DomError::Detached);
    }

    let declarations = parse_declarations(css_text);
    if declarations.is_empty() {
        log::warn!("No CSS declarations found to apply");
    }

    let results = declarations
        .into_iter()
        .map(|d| {
            let result = element.set_style_property(&d.property, &d.value).and_then(|()| {
                match element.style_property(&d.property) {
                    Some(applied) if !applied.is_empty() => Ok(()),
                    _ => Err(DomError::StyleRejected {
                        property: d.property.clone(),
                        value: d.value.clone(),
                    }),
                }
            });
            if let Err(err) = &result {
                log::warn!("{}", err);
            }
            AppliedDeclaration {
                property: d.property,
                value: d.value,
                result,
            }
        })
        .collect();

    Ok(BulkApplyReport { results })
}
