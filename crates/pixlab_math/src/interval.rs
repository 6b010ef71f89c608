/// A range of ray parameters, barycentric weights or color channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Contains nothing.
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// Contains every finite value.
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    /// [0, 1], the range of weights and interpolation parameters.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Ray parameters strictly in front of the origin.
    pub const FORWARD: Interval = Interval {
        min: 0.0,
        max: f32::INFINITY,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Forward ray parameters closer than `max`.
    pub fn closer_than(max: f32) -> Self {
        Self { min: 0.0, max }
    }

    /// `min <= x <= max`.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// `min < x < max`. NaN is never surrounded.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        assert!(Interval::UNIT.contains(0.0));
        assert!(Interval::UNIT.contains(1.0));
        assert!(!Interval::UNIT.contains(1.0001));
        assert!(!Interval::EMPTY.contains(0.0));
        assert!(Interval::UNIVERSE.contains(-1e30));
    }

    #[test]
    fn test_surrounds_is_exclusive() {
        assert!(!Interval::FORWARD.surrounds(0.0));
        assert!(Interval::FORWARD.surrounds(1e-6));
        assert!(Interval::FORWARD.surrounds(1e30));
        assert!(!Interval::FORWARD.surrounds(f32::NAN));
        assert!(!Interval::closer_than(2.0).surrounds(2.0));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(Interval::UNIT.clamp(-3.0), 0.0);
        assert_eq!(Interval::UNIT.clamp(0.25), 0.25);
        assert_eq!(Interval::new(2.0, 4.0).clamp(7.0), 4.0);
    }
}
