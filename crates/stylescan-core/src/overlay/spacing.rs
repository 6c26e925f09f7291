//! Spacing indicators between the selected and the hovered element.

use kurbo::{Point, Rect};

use super::Viewport;
use crate::dom::ElementHandle;

/// Side of the hovered element a gap touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Lowercase name used in overlay node ids.
    pub fn name(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }

    /// Whether the gap for this side is drawn as a vertical line.
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

/// How the two elements relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingRelation {
    /// One element contains the other.
    ParentChild,
    /// Neither element contains the other.
    Disjoint,
}

/// One measured gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingIndicator {
    pub side: Side,
    /// Line start in document coordinates (top or left end).
    pub start: Point,
    /// Line end in document coordinates (bottom or right end).
    pub end: Point,
    /// Rounded length shown on the label.
    pub label: u32,
    /// Where the label is centered, before the renderer's own offset.
    pub label_anchor: Point,
}

impl SpacingIndicator {
    fn new(side: Side, start: Point, end: Point) -> Self {
        let length = (end - start).hypot();
        Self {
            side,
            start,
            end,
            label: length.round() as u32,
            label_anchor: start.midpoint(end),
        }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }
}

/// Measure the gaps between `selected` and `hovered`.
///
/// Nothing is measured when either element is missing or detached, when they
/// are the same node, or when the hovered element is the scan root.
pub fn spacing_indicators<E: ElementHandle>(
    selected: Option<&E>,
    hovered: Option<&E>,
    viewport: &Viewport,
    scan_root_id: &str,
) -> Vec<SpacingIndicator> {
    let (Some(selected), Some(hovered)) = (selected, hovered) else {
        return Vec::new();
    };
    if selected == hovered || !selected.is_connected() || !hovered.is_connected() {
        return Vec::new();
    }
    if hovered.id() == scan_root_id {
        return Vec::new();
    }

    let selected_rect = viewport.to_document(selected.bounding_rect());
    let hovered_rect = viewport.to_document(hovered.bounding_rect());

    if selected.contains(hovered) {
        spacing_between(hovered_rect, selected_rect, SpacingRelation::ParentChild)
    } else if hovered.contains(selected) {
        spacing_between(selected_rect, hovered_rect, SpacingRelation::ParentChild)
    } else {
        spacing_between(selected_rect, hovered_rect, SpacingRelation::Disjoint)
    }
}

/// Gaps between two document-space rects.
///
/// For [`SpacingRelation::ParentChild`] `a` is the child and `b` the parent.
/// For [`SpacingRelation::Disjoint`] `a` is the selected rect and `b` the
/// hovered one.
pub fn spacing_between(a: Rect, b: Rect, relation: SpacingRelation) -> Vec<SpacingIndicator> {
    let candidates = match relation {
        SpacingRelation::ParentChild => parent_child(a, b),
        SpacingRelation::Disjoint => disjoint(a, b),
    };
    candidates
        .into_iter()
        .filter(|s| s.length() > 0.0)
        .collect()
}

fn parent_child(child: Rect, parent: Rect) -> Vec<SpacingIndicator> {
    let center = child.center();
    let vertical = |side, y0: f64, y1: f64| {
        SpacingIndicator::new(side, Point::new(center.x, y0.min(y1)), Point::new(center.x, y0.max(y1)))
    };
    let horizontal = |side, x0: f64, x1: f64| {
        SpacingIndicator::new(side, Point::new(x0.min(x1), center.y), Point::new(x0.max(x1), center.y))
    };

    vec![
        vertical(Side::Top, parent.y0, child.y0),
        horizontal(Side::Right, child.x1, parent.x1),
        vertical(Side::Bottom, child.y1, parent.y1),
        horizontal(Side::Left, parent.x0, child.x0),
    ]
}

fn disjoint(selected: Rect, hovered: Rect) -> Vec<SpacingIndicator> {
    let from = selected.center();
    let delta = hovered.center() - from;
    let mut gaps = Vec::new();

    // Hovered below: the gap touches its top edge.
    if delta.y > 0.0 && hovered.y0 > selected.y1 {
        gaps.push(SpacingIndicator::new(
            Side::Top,
            Point::new(from.x, selected.y1),
            Point::new(from.x, hovered.y0),
        ));
    } else if delta.y < 0.0 && selected.y0 > hovered.y1 {
        gaps.push(SpacingIndicator::new(
            Side::Bottom,
            Point::new(from.x, hovered.y1),
            Point::new(from.x, selected.y0),
        ));
    }

    if delta.x > 0.0 && hovered.x0 > selected.x1 {
        gaps.push(SpacingIndicator::new(
            Side::Left,
            Point::new(selected.x1, from.y),
            Point::new(hovered.x0, from.y),
        ));
    } else if delta.x < 0.0 && selected.x0 > hovered.x1 {
        gaps.push(SpacingIndicator::new(
            Side::Right,
            Point::new(hovered.x1, from.y),
            Point::new(selected.x0, from.y),
        ));
    }

    gaps
}
