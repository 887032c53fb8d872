//! Angular layout: partitions the circle proportionally to record cost.

use crate::store::Record;
use std::f64::consts::TAU;

/// A slice's angular extent, in radians clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcAngles {
    pub start: f64,
    pub end: f64,
}

impl ArcAngles {
    pub fn collapsed(at: f64) -> Self {
        Self { start: at, end: at }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn lerp(self, other: ArcAngles, t: f64) -> ArcAngles {
        let t = t.clamp(0.0, 1.0);
        ArcAngles {
            start: self.start + (other.start - self.start) * t,
            end: self.end + (other.end - self.end) * t,
        }
    }
}

/// A record's layout weight. Malformed costs (NaN, infinite, negative) count
/// as zero so they produce an empty slice instead of a numeric error.
fn weight(cost: f64) -> f64 {
    if cost.is_finite() && cost > 0.0 {
        cost
    } else {
        0.0
    }
}

/// Lay the records out around the full circle, in input order (no sorting).
///
/// Each slice's span is `2π * cost / total`. A zero total yields all-zero
/// spans.
pub fn layout(records: &[Record]) -> Vec<ArcAngles> {
    let total: f64 = records.iter().map(|r| weight(r.cost)).sum();
    let mut start = 0.0;
    records
        .iter()
        .map(|record| {
            let sweep = if total > 0.0 {
                TAU * weight(record.cost) / total
            } else {
                0.0
            };
            let angles = ArcAngles {
                start,
                end: start + sweep,
            };
            start = angles.end;
            angles
        })
        .collect()
}
