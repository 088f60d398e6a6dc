use crate::pursuit::Point;

const SPRING_STIFFNESS: f64 = 100.0;
const SPRING_DAMPING: f64 = 30.0;
const SPRING_MASS: f64 = 1.0;
const SPRING_REST_DELTA: f64 = 0.001;
const SPRING_SUBSTEP_SECONDS: f64 = 1.0 / 240.0;
const SPRING_MAX_FRAME_SECONDS: f64 = 0.064;

const HERO_MIN_SCALE: f64 = 0.85;
const HERO_MIN_OPACITY: f64 = 0.4;
const SPOTLIGHT_RADIUS_PX: u32 = 600;

/// Damped spring that eases the scroll progress bar toward the real scroll
/// fraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSpring {
    value: f64,
    velocity: f64,
    target: f64,
}

impl Default for ScrollSpring {
    fn default() -> Self {
        Self {
            value: 0.0,
            velocity: 0.0,
            target: 0.0,
        }
    }
}

impl ScrollSpring {
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns whether the spring now needs frames to reach `target`.
    pub fn set_target(&mut self, target: f64) -> bool {
        if target.is_finite() {
            self.target = target.clamp(0.0, 1.0);
        }

        !self.is_resting()
    }

    pub fn is_resting(&self) -> bool {
        (self.target - self.value).abs() < SPRING_REST_DELTA
            && self.velocity.abs() < SPRING_REST_DELTA
    }

    pub fn step(&mut self, elapsed_ms: f64) -> f64 {
        if self.is_resting() {
            self.value = self.target;
            self.velocity = 0.0;
            return self.value;
        }

        let mut remaining = (elapsed_ms / 1_000.0).clamp(0.0, SPRING_MAX_FRAME_SECONDS);
        while remaining > 0.0 {
            let dt = remaining.min(SPRING_SUBSTEP_SECONDS);
            let force = -SPRING_STIFFNESS * (self.value - self.target) - SPRING_DAMPING * self.velocity;
            self.velocity += force / SPRING_MASS * dt;
            self.value += self.velocity * dt;
            remaining -= dt;
        }

        if self.is_resting() {
            self.value = self.target;
            self.velocity = 0.0;
        }

        self.value
    }
}

pub fn scroll_fraction(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if !scrollable.is_finite() || scrollable <= 0.0 || !scroll_y.is_finite() {
        return 0.0;
    }

    (scroll_y / scrollable).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroZoom {
    pub scale: f64,
    pub opacity: f64,
}

impl HeroZoom {
    pub fn style(self) -> String {
        format!("transform: scale({:.4}); opacity: {:.3};", self.scale, self.opacity)
    }
}

/// Hero shrinks and fades across the first viewport height of scrolling.
pub fn hero_zoom(scroll_y: f64, viewport_height: f64) -> HeroZoom {
    let progress = if viewport_height > 0.0 && scroll_y.is_finite() {
        (scroll_y / viewport_height).clamp(0.0, 1.0)
    } else {
        0.0
    };

    HeroZoom {
        scale: 1.0 - (1.0 - HERO_MIN_SCALE) * progress,
        opacity: 1.0 - (1.0 - HERO_MIN_OPACITY) * progress,
    }
}

pub fn spotlight_background(pointer: Point) -> String {
    format!(
        "background: radial-gradient({SPOTLIGHT_RADIUS_PX}px circle at {:.0}px {:.0}px, rgba(168, 85, 247, 0.15), transparent 40%);",
        pointer.x, pointer.y
    )
}

/// Shrinks the viewport used to decide that a section has come into view.
pub const REVEAL_ROOT_MARGIN: &str = "-100px";

/// One-way latch for a section's entrance animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reveal {
    revealed: bool,
}

impl Reveal {
    pub fn revealed(self) -> bool {
        self.revealed
    }

    /// Returns `true` only for the observation that first reveals the section.
    pub fn observe(&mut self, intersecting: bool) -> bool {
        if self.revealed || !intersecting {
            return false;
        }

        self.revealed = true;
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingIcon {
    pub id: u32,
    pub glyph: &'static str,
    pub slot: (f64, f64),
    pub tone: &'static str,
    pub is_cat: bool,
}

impl FloatingIcon {
    /// Vertical bob delay in seconds.
    pub fn bob_delay(self) -> f64 {
        f64::from(self.id) * 0.5
    }

    /// Horizontal sway delay in seconds.
    pub fn sway_delay(self) -> f64 {
        f64::from(self.id) * 0.3
    }

    pub fn resting_style(self) -> String {
        format!(
            "left: {:.1}%; top: {:.1}%; --bob-delay: {:.1}s; --sway-delay: {:.1}s;",
            self.slot.0,
            self.slot.1,
            self.bob_delay(),
            self.sway_delay()
        )
    }
}

pub const FLOATING_ICONS: [FloatingIcon; 6] = [
    FloatingIcon { id: 1, glyph: "🐱", slot: (20.0, 20.0), tone: "tone-orange", is_cat: true },
    FloatingIcon { id: 2, glyph: "</>", slot: (80.0, 60.0), tone: "tone-blue", is_cat: false },
    FloatingIcon { id: 3, glyph: "🗄", slot: (60.0, 80.0), tone: "tone-green", is_cat: false },
    FloatingIcon { id: 4, glyph: "▣", slot: (40.0, 40.0), tone: "tone-purple", is_cat: false },
    FloatingIcon { id: 5, glyph: "⚡", slot: (70.0, 30.0), tone: "tone-yellow", is_cat: false },
    FloatingIcon { id: 6, glyph: "♥", slot: (30.0, 70.0), tone: "tone-pink", is_cat: false },
];

/// Positions a creature sprite of `size` pixels centred on `position`.
pub fn sprite_style(position: Point, size: f64) -> String {
    let half = size / 2.0;
    format!(
        "transform: translate3d({:.2}px, {:.2}px, 0);",
        position.x - half,
        position.y - half
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spring_settles_on_target() {
        let mut spring = ScrollSpring::default();
        spring.set_target(0.75);

        let mut frames = 0;
        while !spring.is_resting() && frames < 600 {
            spring.step(16.0);
            frames += 1;
        }

        assert!(frames < 600, "spring did not settle");
        assert_eq!(spring.step(16.0), 0.75);
    }

    #[test]
    fn settled_spring_only_wakes_for_a_new_target() {
        let mut spring = ScrollSpring::default();
        assert!(!spring.set_target(0.0));

        assert!(spring.set_target(0.4));
        for _ in 0..600 {
            spring.step(16.0);
        }
        assert_eq!(spring.value(), 0.4);

        assert!(!spring.set_target(0.4));
        assert!(!spring.set_target(0.4005));
        assert!(spring.set_target(0.6));
    }

    #[test]
    fn spring_does_not_overshoot_when_overdamped() {
        let mut spring = ScrollSpring::default();
        spring.set_target(1.0);

        for _ in 0..200 {
            let value = spring.step(16.0);
            assert!(value <= 1.0 + SPRING_REST_DELTA, "overshot to {value}");
        }
    }

    #[test]
    fn spring_clamps_targets_and_long_frames() {
        let mut spring = ScrollSpring::default();
        spring.set_target(4.0);
        spring.step(10_000.0);

        assert!(spring.value() < 1.0);
        assert!(spring.value() > 0.0);
    }

    #[test]
    fn scroll_fraction_handles_short_pages() {
        assert_eq!(scroll_fraction(100.0, 800.0, 900.0), 0.0);
        assert_eq!(scroll_fraction(500.0, 2_000.0, 1_000.0), 0.5);
        assert_eq!(scroll_fraction(5_000.0, 2_000.0, 1_000.0), 1.0);
        assert_eq!(scroll_fraction(-20.0, 2_000.0, 1_000.0), 0.0);
    }

    #[test]
    fn hero_zoom_is_clamped_to_first_viewport() {
        assert_eq!(hero_zoom(0.0, 800.0), HeroZoom { scale: 1.0, opacity: 1.0 });

        let halfway = hero_zoom(400.0, 800.0);
        assert!((halfway.scale - 0.925).abs() < 1e-9);
        assert!((halfway.opacity - 0.7).abs() < 1e-9);

        let past = hero_zoom(5_000.0, 800.0);
        assert!((past.scale - HERO_MIN_SCALE).abs() < 1e-9);
        assert!((past.opacity - HERO_MIN_OPACITY).abs() < 1e-9);

        assert_eq!(hero_zoom(300.0, 0.0).scale, 1.0);
    }

    #[test]
    fn reveal_fires_once_when_section_enters_view() {
        let mut reveal = Reveal::default();

        assert!(!reveal.observe(false));
        assert!(!reveal.revealed());

        assert!(reveal.observe(true));
        assert!(reveal.revealed());

        assert!(!reveal.observe(false));
        assert!(!reveal.observe(true));
        assert!(reveal.revealed());
    }

    #[test]
    fn float_delays_follow_icon_id() {
        let cat = FLOATING_ICONS[0];

        assert!(cat.is_cat);
        assert_eq!(cat.bob_delay(), 0.5);
        assert!((FLOATING_ICONS[2].sway_delay() - 0.9).abs() < 1e-9);
        assert_eq!(FLOATING_ICONS.iter().filter(|icon| icon.is_cat).count(), 1);
    }

    #[test]
    fn sprite_style_centres_on_position() {
        assert_eq!(
            sprite_style(Point::new(100.0, 50.0), 24.0),
            "transform: translate3d(88.00px, 38.00px, 0);"
        );
    }
}
