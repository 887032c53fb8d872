//! Drawing the reconciled scene: slices, legend and tooltip.

use super::DonutChart;
use crate::color::{Color, OrdinalScale};
use crate::draw::{Drawer, FillStyle, StrokeStyle};
use kurbo::{Affine, Circle, CircleSegment, Point, Rect, Shape};
use std::f64::consts::FRAC_PI_2;

/// Tolerance used when flattening arcs.
const TOLERANCE: f64 = 1e-3;
/// Padding between legend rows and around tooltip text.
const PADDING: f64 = 5.0;

#[derive(Debug, Clone)]
pub(super) struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// One legend row per distinct name, in domain order.
pub(super) fn legend_entries(scale: &OrdinalScale) -> Vec<LegendEntry> {
    scale
        .domain()
        .iter()
        .map(|name| LegendEntry {
            label: name.clone(),
            color: scale.color(name),
        })
        .collect()
}

impl DonutChart {
    /// Draw the current scene. Transitions mid-flight draw at their current
    /// interpolated angles and fills.
    pub fn draw<D: Drawer>(&self, drawer: &mut D) {
        if self.style.background_color.a > 0 {
            drawer.draw_shape(
                self.dimensions.surface().to_rect(),
                None,
                Some(FillStyle {
                    color: self.style.background_color,
                }),
            );
        }

        self.draw_slices(drawer);
        self.draw_legend(drawer);
        self.draw_tooltip(drawer);
    }

    fn draw_slices<D: Drawer>(&self, drawer: &mut D) {
        let to_center = Affine::translate(self.dimensions.center().to_vec2());
        for slice in self.scene.slices() {
            let sweep = slice.angles.span();
            if sweep <= 0.0 {
                continue;
            }
            // our angles run clockwise from twelve; kurbo measures from the
            // positive x axis
            let segment = CircleSegment {
                center: Point::ZERO,
                outer_radius: self.dimensions.radius,
                inner_radius: self.dimensions.inner_radius(),
                start_angle: slice.angles.start - FRAC_PI_2,
                sweep_angle: sweep,
            };
            drawer.draw_shape(
                to_center * segment.to_path(TOLERANCE),
                Some(StrokeStyle::new(
                    self.style.slice_stroke_color,
                    self.style.slice_stroke_width,
                )),
                Some(FillStyle { color: slice.fill }),
            );
        }
    }

    fn draw_legend<D: Drawer>(&self, drawer: &mut D) {
        let origin = self.dimensions.legend_origin();
        let label = &self.style.legend_label;
        let marker_radius = label.font_size / 2.0;
        let row_height = label.font_size + PADDING;

        let mut top = origin.y;
        for entry in &self.legend {
            let marker = Circle::new(
                (origin.x + marker_radius, top + marker_radius),
                marker_radius,
            );
            drawer.draw_shape(marker, None, Some(FillStyle { color: entry.color }));
            drawer.draw_text(
                &entry.label,
                Point::new(origin.x + 2.0 * marker_radius + PADDING, top),
                label,
            );
            top += row_height;
        }
    }

    fn draw_tooltip<D: Drawer>(&self, drawer: &mut D) {
        if !self.tooltip.is_visible() {
            return;
        }
        let label = &self.style.tooltip_label;
        let cost = format_cost(self.tooltip.cost());
        let padding = self.tooltip.padding();

        // no text measurement here; estimate width from the longer line
        let chars = self.tooltip.name().chars().count().max(cost.chars().count());
        let width = chars as f64 * label.font_size * 0.6 + 2.0 * padding;

        let anchor = self.tooltip.anchor();
        let bx = anchor.x - width / 2.0;
        let rect = Rect::new(bx, anchor.y, bx + width, anchor.y + self.tooltip.height());
        drawer.draw_shape(
            rect,
            None,
            Some(FillStyle {
                color: self.style.slice_stroke_color,
            }),
        );
        drawer.draw_text(
            self.tooltip.name(),
            Point::new(bx + padding, anchor.y + padding),
            label,
        );
        drawer.draw_text(
            &cost,
            Point::new(bx + padding, anchor.y + 2.0 * padding + label.font_size),
            label,
        );
    }
}

/// Costs print the way the backend stores them: no forced decimals.
fn format_cost(cost: f64) -> String {
    if cost.fract() == 0.0 && cost.is_finite() {
        format!("{cost:.0}")
    } else {
        format!("{cost}")
    }
}
