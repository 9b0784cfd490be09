//! Keyframed scalar curves.
//!
//! Curves map a normalized bone position along the chain (`0.0` at the root,
//! approaching `1.0` at the tip) to a factor. They are used for the force
//! falloff and the collision radius distribution.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Piecewise-linear curve. Sampling before the first key or after the last one
/// returns that key's value; an empty curve samples as `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct Curve {
    keys: Vec<Keyframe>,
}

impl Curve {
    pub fn new(keys: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut keys: Vec<Keyframe> = keys.into_iter().collect();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    pub fn constant(value: f32) -> Self {
        Self::new([Keyframe::new(0.0, value)])
    }

    pub fn linear(start: f32, end: f32) -> Self {
        Self::new([Keyframe::new(0.0, start), Keyframe::new(1.0, end)])
    }

    /// `f(t) = t` on `[0, 1]`.
    pub fn identity() -> Self {
        Self::linear(0.0, 1.0)
    }

    pub fn add_key(&mut self, time: f32, value: f32) {
        let index = self.keys.partition_point(|k| k.time <= time);
        self.keys.insert(index, Keyframe::new(time, value));
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // first.time < t < last.time, so both neighbours exist
        let upper = self.keys.partition_point(|k| k.time <= t);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let span = b.time - a.time;
        if span <= f32::EPSILON {
            return b.value;
        }
        a.value + (b.value - a.value) * ((t - a.time) / span)
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Vec<Keyframe>> for Curve {
    fn from(keys: Vec<Keyframe>) -> Self {
        Self::new(keys)
    }
}

impl From<Curve> for Vec<Keyframe> {
    fn from(curve: Curve) -> Self {
        curve.keys
    }
}
