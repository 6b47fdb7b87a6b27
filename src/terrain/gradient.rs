use bevy::log::info;
use serde::{Deserialize, Serialize};

use super::heightfield::ElevationStats;

pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `value` between `a` and `b`, clamped to `[0, 1]`. Returns 0 for an empty range.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientKey {
    pub position: f32,
    pub color: [f32; 4],
}

/// Ordered color ramp sampled with a normalized scalar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<GradientKey>", into = "Vec<GradientKey>")]
pub struct ColorGradient {
    keys: Vec<GradientKey>,
}

impl From<Vec<GradientKey>> for ColorGradient {
    fn from(keys: Vec<GradientKey>) -> Self {
        Self::new(keys.into_iter().map(|key| (key.position, key.color)))
    }
}

impl From<ColorGradient> for Vec<GradientKey> {
    fn from(gradient: ColorGradient) -> Self {
        gradient.keys
    }
}

impl ColorGradient {
    pub fn new(keys: impl IntoIterator<Item = (f32, [f32; 4])>) -> Self {
        let mut keys: Vec<GradientKey> = keys
            .into_iter()
            .map(|(position, color)| GradientKey {
                position: position.clamp(0.0, 1.0),
                color,
            })
            .collect();
        keys.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { keys }
    }

    pub fn keys(&self) -> &[GradientKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Linear blend between the two keys around `t`; held flat outside the first and last key.
    pub fn evaluate(&self, t: f32) -> [f32; 4] {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return [1.0, 1.0, 1.0, 1.0];
        };

        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        for pair in self.keys.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if t <= upper.position {
                let local = inverse_lerp(lower.position, upper.position, t);
                return lerp_color(lower.color, upper.color, local);
            }
        }

        last.color
    }
}

fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
        lerp_f32(a[3], b[3], t),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatchState {
    /// Bounds will be replaced by the statistics of the next pass.
    Locked,
    Applied,
}

/// Elevation bounds frozen from a past pass until the latch is armed again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundsLatch {
    label: &'static str,
    min: f32,
    max: f32,
    state: LatchState,
}

impl BoundsLatch {
    pub fn new(label: &'static str, armed: bool) -> Self {
        Self {
            label,
            min: 0.0,
            max: 0.0,
            state: if armed {
                LatchState::Locked
            } else {
                LatchState::Applied
            },
        }
    }

    pub fn arm(&mut self) {
        self.state = LatchState::Locked;
    }

    pub fn state(&self) -> LatchState {
        self.state
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Consumes a pending lock by freezing `stats`, then returns the bounds in effect.
    pub fn resolve(&mut self, stats: ElevationStats) -> (f32, f32) {
        if self.state == LatchState::Locked {
            self.min = stats.min;
            self.max = stats.max;
            self.state = LatchState::Applied;
            info!(
                "{} bounds locked to {:.3}..{:.3}",
                self.label, self.min, self.max
            );
        }
        self.bounds()
    }
}
