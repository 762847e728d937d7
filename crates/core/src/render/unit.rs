use crate::util::range::NumRange;
use serde::{Deserialize, Serialize};
use std::ops;

/// An RGB color. Values are stored as floats between 0 and 1 (inclusive).
/// This uses f32 because the extra precision from f64 is pointless.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color3 {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color3 {
    /// The valid range of values for each component in RGB
    const COMPONENT_RANGE: NumRange<f32> = NumRange::new(0.0, 1.0);

    pub const WHITE: Self = Self::new_int(255, 255, 255);

    /// Create a new RGB color with components in the range [0.0, 1.0]. Panic
    /// if any of the components are out of range
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        fn check_component(component_name: &str, value: f32) -> f32 {
            if Color3::COMPONENT_RANGE.contains(value) {
                value
            } else {
                panic!(
                    "Color component {} must be in {}, but was {}",
                    component_name,
                    Color3::COMPONENT_RANGE,
                    value
                )
            }
        }

        Self {
            red: check_component("red", red),
            green: check_component("green", green),
            blue: check_component("blue", blue),
        }
    }

    /// Create a new RGB color from integer components in the [0,255] range.
    pub const fn new_int(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
        }
    }

    /// Blend linearly from this color to another. `fraction` gets clamped to
    /// [0, 1], where 0 is entirely `self` and 1 is entirely `other`.
    pub fn blend(self, other: Self, fraction: f32) -> Self {
        let fraction = Self::COMPONENT_RANGE.clamp(fraction);
        self * (1.0 - fraction) + other * fraction
    }

    /// Convert this number to a set of 3 bytes: `(red, green, blue)`
    pub fn to_ints(self) -> (u8, u8, u8) {
        (
            (self.red * 255.0).round() as u8,
            (self.green * 255.0).round() as u8,
            (self.blue * 255.0).round() as u8,
        )
    }

    /// Convert this color to an HTML color code: `#rrggbb`
    pub fn to_html(self) -> String {
        let (r, g, b) = self.to_ints();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

// Scale a color by a constant
impl ops::Mul<f32> for Color3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        let red = Self::COMPONENT_RANGE.clamp(self.red * rhs);
        let green = Self::COMPONENT_RANGE.clamp(self.green * rhs);
        let blue = Self::COMPONENT_RANGE.clamp(self.blue * rhs);
        // It's safe to bypass the constructor here because we just clamped
        // all 3 components to the valid range
        Self { red, green, blue }
    }
}

// Mix two colors, saturating at full brightness
impl ops::Add for Color3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            red: Self::COMPONENT_RANGE.clamp(self.red + rhs.red),
            green: Self::COMPONENT_RANGE.clamp(self.green + rhs.green),
            blue: Self::COMPONENT_RANGE.clamp(self.blue + rhs.blue),
        }
    }
}
