//! Pointer interaction: hover highlight, tooltip follow, click hit-testing.

use super::DonutChart;
use crate::draw::TextStyle;
use crate::store::Record;
use kurbo::Point;

/// Gap between the pointer and the bottom of the tooltip.
pub const TOOLTIP_MARGIN: f64 = 15.0;

const TOOLTIP_PADDING: f64 = 5.0;

/// The hover tooltip: contents plus the pointer position it follows.
#[derive(Debug, Clone)]
pub struct Tooltip {
    visible: bool,
    name: String,
    cost: f64,
    position: Point,
    height: f64,
}

impl Tooltip {
    pub(super) fn hidden() -> Self {
        Self {
            visible: false,
            name: String::new(),
            cost: 0.0,
            position: Point::ZERO,
            height: 0.0,
        }
    }

    pub(super) fn show(&mut self, record: &Record, style: &TextStyle) {
        self.visible = true;
        self.name = record.name.clone();
        self.cost = record.cost;
        // two text lines with padding above, between and below
        self.height = 2.0 * style.font_size + 3.0 * TOOLTIP_PADDING;
    }

    pub(super) fn follow(&mut self, position: Point) {
        self.position = position;
    }

    pub(super) fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub(super) fn padding(&self) -> f64 {
        TOOLTIP_PADDING
    }

    /// Top-center of the tooltip box: horizontally centered on the pointer,
    /// raised above it by the tooltip's own height plus a fixed margin.
    pub fn anchor(&self) -> Point {
        Point::new(self.position.x, self.position.y - self.height - TOOLTIP_MARGIN)
    }
}

impl DonutChart {
    /// The id of the slice under `position`, if any.
    pub fn slice_at(&self, position: Point) -> Option<&str> {
        let local = position - self.dimensions.center();
        self.scene
            .hit(local, self.dimensions.inner_radius(), self.dimensions.radius)
            .map(|slice| slice.record.id.as_str())
    }

    /// Drive the hover state machine from a pointer position.
    ///
    /// Entering a slice darkens it toward the highlight color and shows the
    /// tooltip; moving keeps the tooltip on the pointer; leaving restores the
    /// slice's own color and hides the tooltip.
    pub fn pointer_moved(&mut self, position: Point) {
        let hit = self.slice_at(position).map(str::to_owned);
        if hit != self.hovered {
            if let Some(id) = self.hovered.take() {
                // hover-exit: back to the exact palette color
                if let Some(slice) = self.scene.slice_mut(&id) {
                    let base = slice.base_fill;
                    slice.tween_fill(base);
                }
                self.tooltip.hide();
            }
            if let Some(id) = &hit {
                let highlight = self.style.highlight_color;
                if let Some(slice) = self.scene.slice_mut(id) {
                    slice.tween_fill(highlight);
                    self.tooltip.show(&slice.record, &self.style.tooltip_label);
                }
            }
            self.hovered = hit;
        }
        if self.hovered.is_some() {
            self.tooltip.follow(position);
        }
    }
}
