//! Easing functions for tweens

use serde::{Deserialize, Serialize};

/// Plain easing function pointer, mapping linear progress in [0, 1] to eased progress
pub type EasingFn = fn(f32) -> f32;

/// Easing curve selector
///
/// Names follow the usual web animation vocabulary, so configs can say
/// `ease = "power2.out"`. Unrecognised names fall back to [`Easing::Linear`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic ease-out: `1 - (1 - t)^2`
    Power2Out,
}

impl Easing {
    /// The curve as a function pointer, for storage inside a tween
    pub fn function(&self) -> EasingFn {
        match self {
            Easing::Linear => linear,
            Easing::Power2Out => power2_out,
        }
    }

    /// Resolve an easing by name
    pub fn from_name(name: &str) -> Self {
        match name {
            "power2.out" => Easing::Power2Out,
            _ => Easing::Linear,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Power2Out => "power2.out",
        }
    }
}

impl From<String> for Easing {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.name().to_string()
    }
}

pub fn linear(t: f32) -> f32 {
    t
}

pub fn power2_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power2_out_endpoints() {
        assert_eq!(power2_out(0.0), 0.0);
        assert_eq!(power2_out(1.0), 1.0);
        assert!((power2_out(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_power2_out_monotonic() {
        let mut previous = power2_out(0.0);
        for step in 1..=1000 {
            let value = power2_out(step as f32 / 1000.0);
            assert!(value >= previous, "decreased at step {}", step);
            previous = value;
        }
    }

    #[test]
    fn test_unknown_name_is_linear() {
        assert_eq!(Easing::from_name("power2.out"), Easing::Power2Out);
        assert_eq!(Easing::from_name("elastic.inOut"), Easing::Linear);
        assert_eq!((Easing::from_name("bounce").function())(0.3), 0.3);
    }
}
