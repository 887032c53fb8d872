//! Retained slice elements and their transitions.
//!
//! The scene owns the per-record "last rendered angle" side table: every
//! slice remembers its current on-screen angles so the next render can
//! interpolate from them instead of jumping.

use super::layout::ArcAngles;
use crate::color::Color;
use crate::store::Record;
use kurbo::Vec2;
use std::f64::consts::TAU;

/// Duration of enter/update/exit shape transitions.
pub const SHAPE_TRANSITION: f64 = 1000.0;
/// Duration of the hover highlight fill transition.
pub const FILL_TRANSITION: f64 = 400.0;

#[derive(Debug, Clone)]
struct AngleTween {
    from: ArcAngles,
    to: ArcAngles,
    elapsed: f64,
}

#[derive(Debug, Clone)]
struct FillTween {
    from: Color,
    to: Color,
    elapsed: f64,
}

/// One rendered donut slice.
#[derive(Debug, Clone)]
pub struct ArcSlice {
    pub record: Record,
    /// Current on-screen angles (mid-transition values while a tween runs).
    pub angles: ArcAngles,
    /// The palette color for this slice's name; hover restores to this.
    pub base_fill: Color,
    /// Current fill (mid-transition values while a highlight tween runs).
    pub fill: Color,
    angle_tween: Option<AngleTween>,
    fill_tween: Option<FillTween>,
    exiting: bool,
}

impl ArcSlice {
    /// A freshly entered slice starts collapsed at its end edge and sweeps
    /// open toward its start edge.
    fn enter(record: Record, target: ArcAngles, fill: Color) -> Self {
        let collapsed = ArcAngles::collapsed(target.end);
        Self {
            record,
            angles: collapsed,
            base_fill: fill,
            fill,
            angle_tween: Some(AngleTween {
                from: collapsed,
                to: target,
                elapsed: 0.0,
            }),
            fill_tween: None,
            exiting: false,
        }
    }

    /// Point a surviving slice at new data. The transition starts from the
    /// current (possibly mid-flight) angles.
    fn retarget(&mut self, record: Record, target: ArcAngles, base_fill: Color) {
        self.record = record;
        if self.base_fill == self.fill && self.fill_tween.is_none() {
            self.fill = base_fill;
        }
        self.base_fill = base_fill;
        self.exiting = false;
        if self.angles == target {
            self.angle_tween = None;
        } else {
            self.angle_tween = Some(AngleTween {
                from: self.angles,
                to: target,
                elapsed: 0.0,
            });
        }
    }

    /// Collapse toward the end edge; the element is dropped once done.
    fn begin_exit(&mut self) {
        if self.exiting {
            return;
        }
        self.exiting = true;
        self.angle_tween = Some(AngleTween {
            from: self.angles,
            to: ArcAngles::collapsed(self.angles.end),
            elapsed: 0.0,
        });
    }

    /// Start a highlight transition toward `to`, from the current fill.
    /// Independent of any running shape transition.
    pub fn tween_fill(&mut self, to: Color) {
        if self.fill == to {
            self.fill_tween = None;
            return;
        }
        self.fill_tween = Some(FillTween {
            from: self.fill,
            to,
            elapsed: 0.0,
        });
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    /// Where this slice will settle once its transition completes.
    pub fn target_angles(&self) -> ArcAngles {
        self.angle_tween.as_ref().map_or(self.angles, |t| t.to)
    }

    pub fn in_transition(&self) -> bool {
        self.angle_tween.is_some()
    }

    /// Advance transitions by `dt` time units; returns `false` once an
    /// exiting slice has fully collapsed.
    fn advance(&mut self, dt: f64) -> bool {
        if let Some(tween) = &mut self.angle_tween {
            tween.elapsed += dt;
            let t = (tween.elapsed / SHAPE_TRANSITION).min(1.0);
            self.angles = tween.from.lerp(tween.to, t);
            if t >= 1.0 {
                self.angles = tween.to;
                self.angle_tween = None;
                if self.exiting {
                    return false;
                }
            }
        }
        if let Some(tween) = &mut self.fill_tween {
            tween.elapsed += dt;
            let t = (tween.elapsed / FILL_TRANSITION).min(1.0);
            self.fill = tween.from.lerp(tween.to, t);
            if t >= 1.0 {
                self.fill = tween.to;
                self.fill_tween = None;
            }
        }
        true
    }
}

/// All currently rendered slices, in record order with exiting slices last.
#[derive(Default)]
pub struct Scene {
    slices: Vec<ArcSlice>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the retained slices against the new layout, keyed by record
    /// id: survivors retarget, newcomers enter, leavers exit.
    ///
    /// `targets` and `fills` run parallel to `records`.
    pub fn reconcile(&mut self, records: &[Record], targets: &[ArcAngles], fills: &[Color]) {
        let mut old = std::mem::take(&mut self.slices);
        let mut next = Vec::with_capacity(records.len());
        for ((record, &target), &fill) in records.iter().zip(targets).zip(fills) {
            match old.iter().position(|s| s.record.id == record.id) {
                Some(index) => {
                    let mut slice = old.remove(index);
                    slice.retarget(record.clone(), target, fill);
                    next.push(slice);
                }
                None => next.push(ArcSlice::enter(record.clone(), target, fill)),
            }
        }
        for mut slice in old {
            slice.begin_exit();
            next.push(slice);
        }
        self.slices = next;
    }

    pub fn advance(&mut self, dt: f64) {
        self.slices.retain_mut(|slice| slice.advance(dt));
    }

    pub fn slices(&self) -> &[ArcSlice] {
        &self.slices
    }

    pub fn slice(&self, id: &str) -> Option<&ArcSlice> {
        self.slices.iter().find(|s| s.record.id == id)
    }

    pub fn slice_mut(&mut self, id: &str) -> Option<&mut ArcSlice> {
        self.slices.iter_mut().find(|s| s.record.id == id)
    }

    /// Hit-test a point relative to the chart center against the donut
    /// annulus, using the slices' current on-screen angles. Exiting slices
    /// no longer take pointer events.
    pub fn hit(&self, local: Vec2, inner_radius: f64, outer_radius: f64) -> Option<&ArcSlice> {
        let radius = local.hypot();
        if radius < inner_radius || radius > outer_radius {
            return None;
        }
        // clockwise angle from twelve o'clock, in 0..2π (screen y points down)
        let angle = local.x.atan2(-local.y).rem_euclid(TAU);
        self.slices
            .iter()
            .filter(|s| !s.exiting)
            .find(|s| angle >= s.angles.start && angle < s.angles.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::layout::layout;
    use crate::color::SET3;

    fn reconcile(scene: &mut Scene, records: &[Record]) {
        let targets = layout(records);
        let fills: Vec<Color> = records
            .iter()
            .enumerate()
            .map(|(i, _)| SET3[i % SET3.len()])
            .collect();
        scene.reconcile(records, &targets, &fills);
    }

    fn two_records() -> Vec<Record> {
        vec![
            Record::new("1", "A", 10.0),
            Record::new("2", "B", 30.0),
        ]
    }

    #[test]
    fn entering_slice_starts_collapsed_at_its_end_edge() {
        let mut scene = Scene::new();
        reconcile(&mut scene, &two_records());
        for slice in scene.slices() {
            assert_eq!(slice.angles.span(), 0.0);
            assert_eq!(slice.angles.start, slice.target_angles().end);
        }
    }

    #[test]
    fn transition_settles_on_target_after_duration() {
        let mut scene = Scene::new();
        let records = two_records();
        reconcile(&mut scene, &records);
        scene.advance(SHAPE_TRANSITION);
        let targets = layout(&records);
        assert_eq!(scene.slices()[0].angles, targets[0]);
        assert_eq!(scene.slices()[1].angles, targets[1]);
        assert!(!scene.slices()[0].in_transition());
    }

    #[test]
    fn rerender_with_identical_data_does_not_drift() {
        let mut scene = Scene::new();
        let records = two_records();
        reconcile(&mut scene, &records);
        scene.advance(SHAPE_TRANSITION);
        let settled: Vec<ArcAngles> = scene.slices().iter().map(|s| s.angles).collect();

        reconcile(&mut scene, &records);
        assert!(scene.slices().iter().all(|s| !s.in_transition()));
        scene.advance(SHAPE_TRANSITION);
        let again: Vec<ArcAngles> = scene.slices().iter().map(|s| s.angles).collect();
        assert_eq!(settled, again);
    }

    #[test]
    fn update_interpolates_from_previous_angles() {
        let mut scene = Scene::new();
        let records = two_records();
        reconcile(&mut scene, &records);
        scene.advance(SHAPE_TRANSITION);
        let before = scene.slices()[1].angles;

        // cost 30 → 10 re-spans B to half the circle
        let modified = vec![
            Record::new("1", "A", 10.0),
            Record::new("2", "B", 10.0),
        ];
        reconcile(&mut scene, &modified);
        assert_eq!(scene.slices()[1].angles, before);
        scene.advance(SHAPE_TRANSITION / 2.0);
        let midway = scene.slices()[1].angles;
        assert!(midway.span() < before.span());
        scene.advance(SHAPE_TRANSITION / 2.0);
        assert!((scene.slices()[1].angles.span() - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn retarget_mid_flight_starts_from_interpolated_angles() {
        let mut scene = Scene::new();
        reconcile(&mut scene, &two_records());
        scene.advance(SHAPE_TRANSITION / 2.0);
        let midway = scene.slices()[0].angles;
        assert!(midway.span() > 0.0);

        reconcile(&mut scene, &two_records());
        assert_eq!(scene.slices()[0].angles, midway);
        scene.advance(SHAPE_TRANSITION);
        assert_eq!(
            scene.slices()[0].angles,
            scene.slices()[0].target_angles()
        );
    }

    #[test]
    fn exiting_slice_collapses_then_disappears() {
        let mut scene = Scene::new();
        reconcile(&mut scene, &two_records());
        scene.advance(SHAPE_TRANSITION);

        reconcile(&mut scene, &[Record::new("1", "A", 10.0)]);
        assert_eq!(scene.slices().len(), 2);
        assert!(scene.slices()[1].is_exiting());

        scene.advance(SHAPE_TRANSITION / 2.0);
        assert_eq!(scene.slices().len(), 2);
        scene.advance(SHAPE_TRANSITION / 2.0);
        assert_eq!(scene.slices().len(), 1);
        assert_eq!(scene.slices()[0].record.id, "1");
    }

    #[test]
    fn fill_tween_is_independent_of_shape_tween() {
        let mut scene = Scene::new();
        reconcile(&mut scene, &two_records());
        let highlight = Color::from_rgb8(0x24, 0x36, 0x42);
        scene.slice_mut("1").unwrap().tween_fill(highlight);

        // fill settles at 400 while the shape is still in flight
        scene.advance(FILL_TRANSITION);
        let slice = scene.slice("1").unwrap();
        assert_eq!(slice.fill, highlight);
        assert!(slice.in_transition());
    }

    #[test]
    fn fill_tween_back_restores_base_exactly() {
        let mut scene = Scene::new();
        reconcile(&mut scene, &two_records());
        scene.advance(SHAPE_TRANSITION);
        let base = scene.slice("1").unwrap().base_fill;

        scene
            .slice_mut("1")
            .unwrap()
            .tween_fill(Color::from_rgb8(0x24, 0x36, 0x42));
        scene.advance(FILL_TRANSITION);
        scene.slice_mut("1").unwrap().tween_fill(base);
        scene.advance(FILL_TRANSITION);
        assert_eq!(scene.slice("1").unwrap().fill, base);
    }

    #[test]
    fn hit_test_finds_slice_by_angle_and_radius() {
        let mut scene = Scene::new();
        // A spans the first quarter (twelve to three o'clock), B the rest
        reconcile(&mut scene, &two_records());
        scene.advance(SHAPE_TRANSITION);

        // up and slightly right of center, inside the ring
        let hit = scene.hit(Vec2::new(20.0, -100.0), 75.0, 150.0).unwrap();
        assert_eq!(hit.record.id, "1");
        // straight left of center
        let hit = scene.hit(Vec2::new(-100.0, 0.0), 75.0, 150.0).unwrap();
        assert_eq!(hit.record.id, "2");
        // inside the donut hole
        assert!(scene.hit(Vec2::new(10.0, -10.0), 75.0, 150.0).is_none());
        // outside the ring
        assert!(scene.hit(Vec2::new(0.0, -200.0), 75.0, 150.0).is_none());
    }
}
