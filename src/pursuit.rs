use std::ops::{Add, Mul, Sub};

pub const DEFAULT_MIN_DISTANCE: f64 = 5.0;
pub const DEFAULT_MAX_DISTANCE: f64 = 300.0;
pub const DEFAULT_LERP_FACTOR: f64 = 0.12;
pub const DEFAULT_RETREAT_DELAY_MS: f64 = 2_000.0;
pub const HOME_POSITION: Point = Point::new(100.0, 100.0);
pub const OFFSCREEN_POSITION: Point = Point::new(-200.0, -200.0);

/// Viewport position in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PursuitMode {
    Idle,
    Following,
    Retreating,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PursuitTuning {
    pub min_distance: f64,
    pub max_distance: f64,
    pub lerp_factor: f64,
    pub retreat_delay_ms: f64,
    pub home: Point,
    pub offscreen: Point,
}

impl Default for PursuitTuning {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            max_distance: DEFAULT_MAX_DISTANCE,
            lerp_factor: DEFAULT_LERP_FACTOR,
            retreat_delay_ms: DEFAULT_RETREAT_DELAY_MS,
            home: HOME_POSITION,
            offscreen: OFFSCREEN_POSITION,
        }
    }
}

/// Where a pursuer heading from `current` toward `target` should aim this tick.
///
/// Inside the engagement band the target itself is the destination. Outside
/// it (too far or too close) the destination sits `min_distance` short of the
/// target along the line of approach, so the pursuer never lands exactly on
/// what it chases.
pub fn destination(current: Point, target: Point, tuning: &PursuitTuning) -> Point {
    let delta = target - current;
    let distance = delta.length();

    if distance == 0.0 {
        return current;
    }

    if distance > tuning.max_distance || distance < tuning.min_distance {
        let angle = delta.y.atan2(delta.x);
        return Point::new(
            target.x - angle.cos() * tuning.min_distance,
            target.y - angle.sin() * tuning.min_distance,
        );
    }

    target
}

/// One smoothing step: close `lerp_factor` of the gap to the destination.
pub fn step(current: Point, target: Point, tuning: &PursuitTuning) -> Point {
    let dest = destination(current, target, tuning);
    current + (dest - current) * tuning.lerp_factor
}

type Observer = Box<dyn FnMut(Point)>;
type RetreatListener = Box<dyn FnMut()>;

/// Frame-driven follower that eases toward a moving target.
///
/// The pursuer never schedules itself: whoever owns it calls
/// [`Pursuer::poll_retreat`] and [`Pursuer::tick`] once per frame.
pub struct Pursuer {
    tuning: PursuitTuning,
    current: Point,
    target: Point,
    mode: PursuitMode,
    attached: bool,
    retreat_until: Option<f64>,
    observer: Option<Observer>,
    on_retreat_complete: Option<RetreatListener>,
}

impl Pursuer {
    pub fn new(tuning: PursuitTuning) -> Self {
        Self {
            tuning,
            current: tuning.home,
            target: tuning.home,
            mode: PursuitMode::Idle,
            attached: false,
            retreat_until: None,
            observer: None,
            on_retreat_complete: None,
        }
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn mode(&self) -> PursuitMode {
        self.mode
    }

    pub fn tuning(&self) -> &PursuitTuning {
        &self.tuning
    }

    pub fn is_retreating(&self) -> bool {
        self.mode == PursuitMode::Retreating
    }

    pub fn attach_observer(&mut self, observer: impl FnMut(Point) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn on_retreat_complete(&mut self, listener: impl FnMut() + 'static) {
        self.on_retreat_complete = Some(Box::new(listener));
    }

    /// Latest call before a tick wins. Non-finite points are dropped.
    pub fn set_target(&mut self, target: Point) {
        if !target.is_finite() {
            return;
        }

        self.target = target;
        self.attached = true;

        if self.mode == PursuitMode::Idle {
            self.mode = PursuitMode::Following;
        }
    }

    /// Moves the pursuer without emitting a position.
    pub fn place(&mut self, position: Point) {
        if position.is_finite() {
            self.current = position;
        }
    }

    /// Drops the target source; ticks become no-ops until a new target arrives.
    pub fn detach(&mut self) {
        self.attached = false;

        if self.mode == PursuitMode::Following {
            self.mode = PursuitMode::Idle;
        }
    }

    pub fn tick(&mut self) -> Option<Point> {
        if self.mode != PursuitMode::Following {
            return None;
        }

        let next = step(self.current, self.target, &self.tuning);
        self.current = next;
        self.notify();

        Some(next)
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(self.current);
        }
    }

    /// Starts a retreat at `now_ms`. Returns `false` when one is already running.
    pub fn trigger_retreat(&mut self, now_ms: f64) -> bool {
        if self.mode == PursuitMode::Retreating {
            return false;
        }

        self.mode = PursuitMode::Retreating;
        self.current = self.tuning.offscreen;
        self.retreat_until = Some(now_ms + self.tuning.retreat_delay_ms);
        self.notify();
        true
    }

    /// Finishes an elapsed retreat. Returns `true` on the frame it completes.
    pub fn poll_retreat(&mut self, now_ms: f64) -> bool {
        let Some(deadline) = self.retreat_until else {
            return false;
        };

        if now_ms < deadline {
            return false;
        }

        self.retreat_until = None;
        self.current = self.tuning.home;
        self.mode = if self.attached {
            PursuitMode::Following
        } else {
            PursuitMode::Idle
        };
        self.notify();

        if let Some(listener) = self.on_retreat_complete.as_mut() {
            listener();
        }

        true
    }
}
