use crate::pursuit::{Point, Pursuer, PursuitTuning};
use std::{cell::RefCell, rc::Rc};

pub const DEFAULT_BUG_APPEAR_DELAY_MS: f64 = 2_000.0;
pub const DEFAULT_POUNCE_DELAY_MS: f64 = 800.0;
pub const DEFAULT_POINTER_THROTTLE_MS: f64 = 16.0;
pub const CAT_HOME_FRACTION: (f64, f64) = (0.2, 0.2);

/// Monotonic per-frame timestamps in milliseconds.
pub trait FrameSource {
    fn start(&mut self, on_frame: Box<dyn FnMut(f64)>);
    fn stop(&mut self);
}

/// Coalesces pointer updates to at most one per interval.
#[derive(Clone, Copy, Debug)]
pub struct PointerThrottle {
    interval_ms: f64,
    last_accepted: Option<f64>,
}

impl PointerThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_accepted: None,
        }
    }

    pub fn accept(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_accepted {
            if now_ms - last < self.interval_ms {
                return false;
            }
        }

        self.last_accepted = Some(now_ms);
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChaseTuning {
    pub pursuit: PursuitTuning,
    pub bug_appear_delay_ms: f64,
    pub pounce_delay_ms: f64,
    pub pointer_throttle_ms: f64,
}

impl Default for ChaseTuning {
    fn default() -> Self {
        Self {
            pursuit: PursuitTuning::default(),
            bug_appear_delay_ms: DEFAULT_BUG_APPEAR_DELAY_MS,
            pounce_delay_ms: DEFAULT_POUNCE_DELAY_MS,
            pointer_throttle_ms: DEFAULT_POINTER_THROTTLE_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CatRole {
    Resting,
    Hunting { pounce_at: f64 },
    Prowling,
}

impl CatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resting => "resting",
            Self::Hunting { .. } => "hunting",
            Self::Prowling => "prowling",
        }
    }

    pub fn is_resting(self) -> bool {
        matches!(self, Self::Resting)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    BugAppeared,
    Pounced,
    BugReturned,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneStatus {
    pub bug_visible: bool,
    pub bug_retreating: bool,
    pub cat_role: CatRole,
}

impl Default for SceneStatus {
    fn default() -> Self {
        Self {
            bug_visible: false,
            bug_retreating: false,
            cat_role: CatRole::Resting,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneFrame {
    pub status: SceneStatus,
    pub events: Vec<SceneEvent>,
}

/// The bug chases the pointer; the cat, once clicked, chases the bug.
///
/// Both are the same [`Pursuer`]. The cat's target is the bug position the
/// bug reported on the same frame, copied across as a plain value.
pub struct ChaseScene {
    tuning: ChaseTuning,
    bug: Pursuer,
    cat: Pursuer,
    cat_role: CatRole,
    throttle: PointerThrottle,
    started_at: Option<f64>,
    bug_visible: bool,
    last_pointer: Option<Point>,
    last_bug_report: Point,
    viewport: (f64, f64),
}

impl ChaseScene {
    pub fn new(tuning: ChaseTuning) -> Self {
        let bug = Pursuer::new(tuning.pursuit);
        let last_bug_report = bug.current();

        Self {
            tuning,
            bug,
            cat: Pursuer::new(tuning.pursuit),
            cat_role: CatRole::Resting,
            throttle: PointerThrottle::new(tuning.pointer_throttle_ms),
            started_at: None,
            bug_visible: false,
            last_pointer: None,
            last_bug_report,
            viewport: (1280.0, 720.0),
        }
    }

    pub fn bug(&self) -> &Pursuer {
        &self.bug
    }

    pub fn bug_mut(&mut self) -> &mut Pursuer {
        &mut self.bug
    }

    pub fn cat(&self) -> &Pursuer {
        &self.cat
    }

    pub fn cat_mut(&mut self) -> &mut Pursuer {
        &mut self.cat
    }

    pub fn cat_role(&self) -> CatRole {
        self.cat_role
    }

    pub fn status(&self) -> SceneStatus {
        SceneStatus {
            bug_visible: self.bug_visible,
            bug_retreating: self.bug.is_retreating(),
            cat_role: self.cat_role,
        }
    }

    pub fn start(&mut self, now_ms: f64) {
        if self.started_at.is_none() {
            self.started_at = Some(now_ms);
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.viewport = (width, height);
        }
    }

    pub fn cat_home(&self) -> Point {
        Point::new(
            self.viewport.0 * CAT_HOME_FRACTION.0,
            self.viewport.1 * CAT_HOME_FRACTION.1,
        )
    }

    /// Returns whether the update made it past the throttle.
    pub fn pointer_moved(&mut self, pointer: Point, now_ms: f64) -> bool {
        if !pointer.is_finite() || !self.throttle.accept(now_ms) {
            return false;
        }

        self.last_pointer = Some(pointer);

        if self.bug_visible {
            self.bug.set_target(pointer);
        }

        if self.cat_role == CatRole::Prowling {
            self.cat.set_target(pointer);
        }

        true
    }

    /// Starts a hunt. Ignored unless the cat is resting and the bug is out.
    pub fn cat_clicked(&mut self, now_ms: f64) -> bool {
        if !self.cat_role.is_resting() || !self.bug_visible || self.bug.is_retreating() {
            return false;
        }

        let home = self.cat_home();
        self.cat.place(home);
        self.cat.set_target(self.last_bug_report);
        self.cat_role = CatRole::Hunting {
            pounce_at: now_ms + self.tuning.pounce_delay_ms,
        };
        true
    }

    pub fn frame(&mut self, now_ms: f64) -> SceneFrame {
        let mut events = Vec::new();

        if !self.bug_visible {
            let appear_at = self
                .started_at
                .map(|started| started + self.tuning.bug_appear_delay_ms);

            if appear_at.is_some_and(|at| now_ms >= at) {
                self.bug_visible = true;
                if let Some(pointer) = self.last_pointer {
                    self.bug.set_target(pointer);
                }
                events.push(SceneEvent::BugAppeared);
            }
        }

        if self.bug.poll_retreat(now_ms) {
            self.last_bug_report = self.bug.current();
            if self.cat_role == CatRole::Prowling {
                self.cat.detach();
                self.cat_role = CatRole::Resting;
            }
            events.push(SceneEvent::BugReturned);
        }

        if self.bug_visible {
            if let Some(reported) = self.bug.tick() {
                self.last_bug_report = reported;
            }
        }

        if let CatRole::Hunting { pounce_at } = self.cat_role {
            self.cat.set_target(self.last_bug_report);

            if now_ms >= pounce_at {
                self.bug.trigger_retreat(now_ms);
                self.cat_role = CatRole::Prowling;
                if let Some(pointer) = self.last_pointer {
                    self.cat.set_target(pointer);
                }
                events.push(SceneEvent::Pounced);
            }
        }

        self.cat.tick();

        SceneFrame {
            status: self.status(),
            events,
        }
    }
}

/// Runs `scene` off `source`, handing every frame report to `on_frame`.
pub fn drive(
    scene: Rc<RefCell<ChaseScene>>,
    source: &mut impl FrameSource,
    mut on_frame: impl FnMut(SceneFrame) + 'static,
) {
    source.start(Box::new(move |now_ms| {
        let report = {
            let mut scene = scene.borrow_mut();
            scene.start(now_ms);
            scene.frame(now_ms)
        };
        on_frame(report);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pursuit::{PursuitMode, HOME_POSITION, OFFSCREEN_POSITION};

    #[derive(Default)]
    struct ManualFrames {
        on_frame: Option<Box<dyn FnMut(f64)>>,
    }

    impl ManualFrames {
        fn fire(&mut self, now_ms: f64) {
            if let Some(on_frame) = self.on_frame.as_mut() {
                on_frame(now_ms);
            }
        }
    }

    impl FrameSource for ManualFrames {
        fn start(&mut self, on_frame: Box<dyn FnMut(f64)>) {
            self.on_frame = Some(on_frame);
        }

        fn stop(&mut self) {
            self.on_frame = None;
        }
    }

    fn visible_scene() -> ChaseScene {
        let mut scene = ChaseScene::new(ChaseTuning::default());
        scene.set_viewport(1_000.0, 500.0);
        scene.start(0.0);
        scene.pointer_moved(Point::new(400.0, 300.0), 0.0);
        let report = scene.frame(DEFAULT_BUG_APPEAR_DELAY_MS);
        assert_eq!(report.events, vec![SceneEvent::BugAppeared]);
        scene
    }

    #[test]
    fn throttle_accepts_one_update_per_interval() {
        let mut throttle = PointerThrottle::new(16.0);

        assert!(throttle.accept(0.0));
        assert!(!throttle.accept(10.0));
        assert!(!throttle.accept(15.9));
        assert!(throttle.accept(16.0));
        assert!(!throttle.accept(20.0));
    }

    #[test]
    fn bug_stays_hidden_until_appear_delay() {
        let mut scene = ChaseScene::new(ChaseTuning::default());
        scene.start(100.0);
        scene.pointer_moved(Point::new(500.0, 500.0), 100.0);

        let early = scene.frame(1_000.0);
        assert!(!early.status.bug_visible);
        assert_eq!(scene.bug().current(), HOME_POSITION);

        let visible = scene.frame(2_100.0);
        assert!(visible.status.bug_visible);
        assert_eq!(scene.bug().mode(), PursuitMode::Following);
        assert_ne!(scene.bug().current(), HOME_POSITION);
    }

    #[test]
    fn throttled_pointer_updates_do_not_reach_the_bug() {
        let mut scene = visible_scene();

        assert!(scene.pointer_moved(Point::new(10.0, 10.0), 2_100.0));
        assert!(!scene.pointer_moved(Point::new(900.0, 900.0), 2_105.0));
        assert_eq!(scene.bug().target(), Point::new(10.0, 10.0));
    }

    #[test]
    fn cat_click_is_ignored_before_bug_appears() {
        let mut scene = ChaseScene::new(ChaseTuning::default());
        scene.start(0.0);

        assert!(!scene.cat_clicked(500.0));
        assert_eq!(scene.cat_role(), CatRole::Resting);
    }

    #[test]
    fn hunting_cat_targets_the_bug_report() {
        let mut scene = visible_scene();
        let bug_before = scene.bug().current();

        assert!(scene.cat_clicked(2_100.0));
        assert_eq!(scene.cat().current(), Point::new(200.0, 100.0));
        assert_eq!(scene.cat().target(), bug_before);

        scene.frame(2_116.0);
        assert_eq!(scene.cat().target(), scene.bug().current());
        assert!(!scene.cat_clicked(2_120.0), "second click while hunting is ignored");
    }

    #[test]
    fn bug_keeps_following_the_pointer_while_cat_hunts() {
        let mut scene = visible_scene();
        assert!(scene.cat_clicked(2_100.0));

        let pointer = Point::new(900.0, 50.0);
        assert!(scene.pointer_moved(pointer, 2_120.0));
        let before = scene.bug().current();
        let report = scene.frame(2_130.0);

        assert!(matches!(report.status.cat_role, CatRole::Hunting { .. }));
        assert_eq!(scene.bug().mode(), PursuitMode::Following);
        assert_eq!(scene.bug().target(), pointer);
        assert!(scene.bug().current().distance_to(pointer) < before.distance_to(pointer));
        assert_eq!(scene.cat().target(), scene.bug().current());
    }

    #[test]
    fn pounce_sends_bug_away_and_cat_rests_after_return() {
        let mut scene = visible_scene();
        scene.cat_clicked(2_100.0);

        let before_pounce = scene.frame(2_899.0);
        assert!(before_pounce.events.is_empty());

        let pounce = scene.frame(2_900.0);
        assert_eq!(pounce.events, vec![SceneEvent::Pounced]);
        assert!(pounce.status.bug_retreating);
        assert_eq!(pounce.status.cat_role, CatRole::Prowling);
        assert_eq!(scene.bug().current(), OFFSCREEN_POSITION);
        assert_eq!(scene.cat().target(), Point::new(400.0, 300.0));

        scene.pointer_moved(Point::new(700.0, 50.0), 3_000.0);
        assert_eq!(scene.cat().target(), Point::new(700.0, 50.0));
        assert!(!scene.cat_clicked(3_000.0));

        let back = scene.frame(4_900.0);
        assert_eq!(back.events, vec![SceneEvent::BugReturned]);
        assert!(!back.status.bug_retreating);
        assert_eq!(back.status.cat_role, CatRole::Resting);
        assert_eq!(scene.cat().mode(), PursuitMode::Idle);
        assert_eq!(scene.bug().mode(), PursuitMode::Following);
    }

    #[test]
    fn drive_feeds_frames_from_the_source() {
        let scene = Rc::new(RefCell::new(ChaseScene::new(ChaseTuning::default())));
        let reports = Rc::new(RefCell::new(Vec::new()));
        let mut frames = ManualFrames::default();
        {
            let reports = reports.clone();
            drive(scene.clone(), &mut frames, move |report| {
                reports.borrow_mut().push(report)
            });
        }

        frames.fire(1_000.0);
        frames.fire(3_000.0);
        frames.stop();
        frames.fire(4_000.0);

        let reports = reports.borrow();
        assert_eq!(reports.len(), 2);
        assert!(!reports[0].status.bug_visible);
        assert_eq!(reports[1].events, vec![SceneEvent::BugAppeared]);
    }
}
