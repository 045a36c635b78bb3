//! Sprite-sheet animation definitions.
//!
//! An [`Animation`] is an immutable, ordered list of timed [`AnimationStep`]s.
//! It holds no playback state: callers keep a `progress` scalar per entity and
//! pass it in by mutable reference, so one definition can drive any number of
//! entities.
//!
//! # Progress units
//!
//! `progress` is measured in steps, not seconds. The integer part is the
//! current step and the fractional part is how much of that step's duration
//! has elapsed. Advancing by `delta` seconds adds `delta / step.duration`, so
//! long steps absorb real time more slowly than short ones.
//!
//! Crossing a step boundary uses `floor`: a progress of exactly `1.0` is
//! already step 1.

use serde::{Deserialize, Serialize};

use crate::error::SheetError;
use crate::resources::sheet::GridIndex;

/// One timed entry of an animation: a grid cell shown for `duration` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationStep {
    pub duration: f32,
    pub source: GridIndex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl AnimationStep {
    pub fn new(duration: f32, source: GridIndex) -> Self {
        Self {
            duration,
            source,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Result of resolving playback for one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    /// Grid cell to display.
    pub grid_index: GridIndex,
    /// Step index inside the animation.
    pub step: usize,
    /// Set when the call crossed the end of the animation (loop restart for
    /// repeating animations) and on every call once a non-repeating
    /// animation has reached its last step.
    pub finished: bool,
    /// Tag of the displayed step, if any.
    pub tag: Option<&'a str>,
}

/// Named, immutable sequence of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AnimationDef")]
pub struct Animation {
    id: String,
    repeats: bool,
    steps: Vec<AnimationStep>,
}

#[derive(Deserialize)]
struct AnimationDef {
    id: String,
    #[serde(default)]
    repeats: bool,
    steps: Vec<AnimationStep>,
}

impl TryFrom<AnimationDef> for Animation {
    type Error = SheetError;

    fn try_from(def: AnimationDef) -> Result<Self, Self::Error> {
        Animation::new(def.id, def.repeats, def.steps)
    }
}

impl Animation {
    /// Build an animation, rejecting an empty step list and any step whose
    /// duration is not a positive finite number.
    pub fn new(
        id: impl Into<String>,
        repeats: bool,
        steps: Vec<AnimationStep>,
    ) -> Result<Self, SheetError> {
        let id = id.into();
        if steps.is_empty() {
            return Err(SheetError::NoSteps(id));
        }
        for (i, step) in steps.iter().enumerate() {
            if !(step.duration.is_finite() && step.duration > 0.0) {
                return Err(SheetError::NonPositiveDuration {
                    animation: id,
                    step: i,
                    duration: step.duration,
                });
            }
        }
        Ok(Self { id, repeats, steps })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn repeats(&self) -> bool {
        self.repeats
    }

    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&AnimationStep> {
        self.steps.get(index)
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Sum of all step durations in seconds.
    pub fn total_duration(&self) -> f32 {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Advance `progress` by `delta` seconds and return the frame to show.
    ///
    /// Once a non-repeating animation has run past its last step, every
    /// further call returns the last step with `finished` set and leaves
    /// `progress` untouched. A repeating animation that ran past its end on
    /// the previous call restarts from step 0 with a fresh progress.
    ///
    /// Negative or non-finite inputs are rejected rather than clamped.
    pub fn resolve(&self, progress: &mut f32, delta: f32) -> Result<Frame<'_>, SheetError> {
        if !(delta.is_finite() && delta >= 0.0) {
            return Err(SheetError::InvalidDelta(delta));
        }
        if !(progress.is_finite() && *progress >= 0.0) {
            return Err(SheetError::InvalidProgress(*progress));
        }

        let count = self.steps.len();
        let mut prev = progress.floor() as usize;
        if prev >= count {
            if self.repeats {
                *progress = 0.0;
                prev = 0;
            } else {
                return Ok(self.frame(count - 1, true));
            }
        }

        *progress += delta / self.steps[prev].duration;
        let next = progress.floor() as usize;
        if next == prev {
            return Ok(self.frame(prev, false));
        }
        if next >= count {
            let step = if self.repeats { 0 } else { count - 1 };
            return Ok(self.frame(step, true));
        }
        Ok(self.frame(next, false))
    }

    fn frame(&self, step: usize, finished: bool) -> Frame<'_> {
        let s = &self.steps[step];
        Frame {
            grid_index: s.source,
            step,
            finished,
            tag: s.tag.as_deref(),
        }
    }
}
