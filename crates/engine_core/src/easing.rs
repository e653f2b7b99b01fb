//! Easing curves used by morph tweens.

use serde::de::{self, Deserializer, EnumAccess, VariantAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overshoot constant for the Back family of curves.
pub const BACK_OVERSHOOT: f32 = 1.70158;

/// Named easing curve mapping `t ∈ [0, 1]` to progress.
///
/// Deserializing goes through [`Easing::from_name`], so an unknown name in a config
/// file becomes `EaseInOut` instead of rejecting the whole file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    EaseOutBack,
}

impl Easing {
    /// Look up a curve by its camelCase name. Unknown names fall back to `EaseInOut`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "easeIn" => Easing::EaseIn,
            "easeOut" => Easing::EaseOut,
            "easeInOut" => Easing::EaseInOut,
            "easeOutBack" => Easing::EaseOutBack,
            other => {
                log::debug!("Unknown easing {:?}, using easeInOut", other);
                Easing::EaseInOut
            }
        }
    }

    pub const NAMES: [&'static str; 4] = ["easeIn", "easeOut", "easeInOut", "easeOutBack"];

    pub fn name(&self) -> &'static str {
        match self {
            Easing::EaseIn => "easeIn",
            Easing::EaseOut => "easeOut",
            Easing::EaseInOut => "easeInOut",
            Easing::EaseOutBack => "easeOutBack",
        }
    }

    /// Evaluate the curve. `t` is clamped into `[0, 1]` first.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOutBack => {
                let u = t - 1.0;
                1.0 + (BACK_OVERSHOOT + 1.0) * u.powi(3) + BACK_OVERSHOOT * u.powi(2)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_enum("Easing", &Easing::NAMES, EasingVisitor)
    }
}

struct EasingVisitor;

impl<'de> Visitor<'de> for EasingVisitor {
    type Value = Easing;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an easing name")
    }

    fn visit_str<E: de::Error>(self, name: &str) -> Result<Easing, E> {
        Ok(Easing::from_name(name))
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Easing, A::Error> {
        let (CurveName(name), variant) = data.variant()?;
        variant.unit_variant()?;
        Ok(Easing::from_name(&name))
    }
}

/// Variant tag read as a plain identifier, known or not.
struct CurveName(String);

impl<'de> Deserialize<'de> for CurveName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NameVisitor;

        impl<'de> Visitor<'de> for NameVisitor {
            type Value = CurveName;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an identifier")
            }

            fn visit_str<E: de::Error>(self, name: &str) -> Result<CurveName, E> {
                Ok(CurveName(name.to_owned()))
            }
        }

        deserializer.deserialize_identifier(NameVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut, Easing::EaseOutBack];

    #[test]
    fn every_curve_starts_at_zero_and_ends_at_one() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{:?} at 0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at 1", easing);
        }
    }

    #[test]
    fn ease_in_out_is_symmetric_about_half() {
        let e = Easing::EaseInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
        for t in [0.1, 0.25, 0.4] {
            assert!((e.apply(t) + e.apply(1.0 - t) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn ease_out_back_overshoots_before_settling() {
        let peak = (1..100)
            .map(|i| Easing::EaseOutBack.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn unknown_name_falls_back_to_ease_in_out() {
        assert_eq!(Easing::from_name("bounce"), Easing::EaseInOut);
        assert_eq!(Easing::from_name("easeOutBack"), Easing::EaseOutBack);
        assert_eq!(Easing::from_name(Easing::EaseIn.name()), Easing::EaseIn);
    }

    #[test]
    fn input_outside_unit_range_is_clamped() {
        assert_eq!(Easing::EaseIn.apply(2.0), 1.0);
        assert_eq!(Easing::EaseOut.apply(-1.0), 0.0);
    }
}
