use crate::{color::Color, config::StartupConfig, scene::Scene};

/// Tween length in seconds when none is given.
pub const DEFAULT_DURATION: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    Power1In,
    #[default]
    Power1Out,
    Power1InOut,
}

impl Easing {
    /// Maps linear progress to eased progress. Both are in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power1In => t * t,
            Easing::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

pub trait Lerp: Copy {
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for glam::Vec3 {
    fn lerp(self, other: Self, t: f32) -> Self {
        glam::Vec3::lerp(self, other, t)
    }
}

impl Lerp for Color {
    fn lerp(self, other: Self, t: f32) -> Self {
        Color::lerp(self, other, t)
    }
}

/// Interpolation of one value from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone, Copy)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T) -> Self {
        Self {
            from,
            to,
            duration: DEFAULT_DURATION,
            elapsed: 0.0,
            easing: Easing::default(),
        }
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn target(&self) -> T {
        self.to
    }

    /// Value at `time` seconds after the tween started, independent of its own clock.
    pub fn value_at(&self, time: f32) -> T {
        let progress = if self.duration <= 0.0 {
            1.0
        } else {
            (time / self.duration).clamp(0.0, 1.0)
        };
        self.from.lerp(self.to, self.easing.apply(progress))
    }

    pub fn value(&self) -> T {
        self.value_at(self.elapsed)
    }

    pub fn advance(&mut self, dt: f32) -> T {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// A scene property driven by a timeline step.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    SphereScale(Tween<glam::Vec3>),
    NavOffset(Tween<f32>),
    TitleOpacity(Tween<f32>),
}

impl Step {
    pub fn duration(&self) -> f32 {
        match self {
            Step::SphereScale(tween) => tween.duration(),
            Step::NavOffset(tween) => tween.duration(),
            Step::TitleOpacity(tween) => tween.duration(),
        }
    }

    fn apply(&self, local_time: f32, scene: &mut Scene) {
        match self {
            Step::SphereScale(tween) => scene.sphere.scale = tween.value_at(local_time),
            Step::NavOffset(tween) => scene.overlay.nav_offset = tween.value_at(local_time),
            Step::TitleOpacity(tween) => scene.overlay.title_opacity = tween.value_at(local_time),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequencing {
    /// Each step starts when the previous one ends.
    Chained,
    /// Every step starts at time zero.
    Concurrent,
}

#[derive(Debug, Clone)]
pub struct Timeline {
    steps: Vec<(f32, Step)>,
    sequencing: Sequencing,
    elapsed: f32,
}

impl Timeline {
    pub fn new(sequencing: Sequencing) -> Self {
        Self {
            steps: Vec::new(),
            sequencing,
            elapsed: 0.0,
        }
    }

    /// Sphere scale-in, nav slide-in and title fade-in.
    pub fn startup(config: &StartupConfig) -> Self {
        let mut timeline = Self::new(config.sequencing);
        timeline
            .push(Step::SphereScale(
                Tween::new(glam::Vec3::ZERO, glam::Vec3::ONE)
                    .with_duration(config.duration)
                    .with_easing(config.easing),
            ))
            .push(Step::NavOffset(
                Tween::new(-1.0, 0.0)
                    .with_duration(config.duration)
                    .with_easing(config.easing),
            ))
            .push(Step::TitleOpacity(
                Tween::new(0.0, 1.0)
                    .with_duration(config.duration)
                    .with_easing(config.easing),
            ));
        timeline
    }

    pub fn push(&mut self, step: Step) -> &mut Self {
        let start = match self.sequencing {
            Sequencing::Chained => self.duration(),
            Sequencing::Concurrent => 0.0,
        };
        self.steps.push((start, step));
        self
    }

    /// Start time of the step at `index`.
    pub fn start_of(&self, index: usize) -> Option<f32> {
        self.steps.get(index).map(|(start, _)| *start)
    }

    pub fn duration(&self) -> f32 {
        self.steps
            .iter()
            .map(|(start, step)| start + step.duration())
            .fold(0.0, f32::max)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration()
    }

    /// Applies every step at `time`. Steps that have not started hold their `from` value.
    pub fn seek(&mut self, time: f32, scene: &mut Scene) {
        self.elapsed = time.clamp(0.0, self.duration());
        for (start, step) in &self.steps {
            let local = (self.elapsed - start).clamp(0.0, step.duration());
            step.apply(local, scene);
        }
    }

    pub fn advance(&mut self, dt: f32, scene: &mut Scene) {
        self.seek(self.elapsed + dt.max(0.0), scene);
    }

    pub fn restart(&mut self, scene: &mut Scene) {
        self.seek(0.0, scene);
    }
}
