//! Keyframe schedules emitted by the planner
//!
//! A schedule is a handful of finite segments followed by an
//! infinite-repeat tail. All times are seconds relative to the batch
//! commit instant; the presentation layer maps them onto whatever
//! animation primitive it uses. Each schedule can also be sampled
//! directly, which is how the tests check splice continuity.

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// One non-repeating linear segment
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Segment {
    /// Start offset from the commit instant, seconds
    pub start: f64,
    /// Segment length, seconds
    pub duration: f64,
    /// Value at `start`
    pub from: f64,
    /// Value at `start + duration`
    pub to: f64,
}

impl Segment {
    /// End offset, seconds from the commit instant
    #[inline]
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Interpolated value at offset `t`, clamped to the segment
    pub fn value_at(&self, t: f64) -> f64 {
        if self.duration <= 0.0 || t <= self.start {
            return self.from;
        }
        if t >= self.end() {
            return self.to;
        }
        lerp(self.from, self.to, (t - self.start) / self.duration)
    }
}

/// An infinitely repeating linear segment
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RepeatingSegment {
    /// Start offset from the commit instant, seconds
    pub start: f64,
    /// Length of one leg, seconds
    pub duration: f64,
    /// Value at the start of each forward leg
    pub from: f64,
    /// Value at the end of each forward leg
    pub to: f64,
    /// Play each leg forward then backward (triangle wave)
    pub autoreverse: bool,
    /// Accumulate across repeats instead of resetting (ramp)
    pub cumulative: bool,
}

impl RepeatingSegment {
    /// Sampled value at offset `t` (`from` for `t` before `start`)
    pub fn value_at(&self, t: f64) -> f64 {
        if self.duration <= 0.0 || t <= self.start {
            return self.from;
        }
        let u = t - self.start;
        if self.cumulative {
            return lerp(self.from, self.to, u / self.duration);
        }
        if self.autoreverse {
            let r = u.rem_euclid(2.0 * self.duration);
            if r < self.duration {
                lerp(self.from, self.to, r / self.duration)
            } else {
                lerp(self.to, self.from, (r - self.duration) / self.duration)
            }
        } else {
            lerp(self.from, self.to, u.rem_euclid(self.duration) / self.duration)
        }
    }
}

/// Rotation trajectory: one catch-up turn, then a steady spin
///
/// The catch-up segment rotates from the node's current mid-cycle
/// angle back to the canonical 360° alignment, ending exactly when
/// the current wall-clock cycle ends. The spin then turns 90° per
/// quarter period, cumulatively, so the node keeps completing one
/// revolution per cycle with no drift.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RotationSchedule {
    /// Non-repeating alignment turn, degrees
    pub catch_up: Segment,
    /// Infinite cumulative spin, degrees per leg
    pub spin: RepeatingSegment,
}

impl RotationSchedule {
    /// Rotation angle in degrees, normalized to `[0, 360)`
    pub fn degrees_at(&self, t: f64) -> f64 {
        let raw = if t <= self.catch_up.end() {
            self.catch_up.value_at(t)
        } else {
            self.spin.value_at(t)
        };
        raw.rem_euclid(360.0)
    }
}

/// Opacity trajectory: optional fade-in, fade-out, then breathing
///
/// Composes into one continuous triangle wave that is 0 at every
/// cycle boundary and 1 at every midpoint, regardless of the phase
/// at which the plan was created.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OpacitySchedule {
    /// One-time ramp to full opacity; present only when the plan was
    /// created in the first half of a cycle
    pub fade_in: Option<Segment>,
    /// One-time ramp to zero, ending at the cycle boundary
    pub fade_out: Segment,
    /// Infinite autoreversing triangle wave, half-period each leg
    pub breathing: RepeatingSegment,
}

impl OpacitySchedule {
    /// Opacity in `[0, 1]` at offset `t`
    pub fn value_at(&self, t: f64) -> f64 {
        if let Some(fade_in) = &self.fade_in {
            if t <= fade_in.end() {
                return fade_in.value_at(t);
            }
        }
        if t <= self.fade_out.end() {
            self.fade_out.value_at(t)
        } else {
            self.breathing.value_at(t)
        }
    }
}
