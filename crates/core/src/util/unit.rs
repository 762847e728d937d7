use derive_more::{
    Add, AddAssign, Display, Div, DivAssign, From, Into, Mul, MulAssign, Neg,
    Sub, SubAssign, Sum,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Conversion factor from degrees to radians. Every angle that enters the
/// system in degrees goes through [Degrees::to_radians], which is the only
/// place this is applied.
pub const RADIANS_PER_DEGREE: f64 = PI / 180.0;

/// Unit used for all linear distances: eye relief, radii, focal lengths,
/// lattice tile sizes, etc.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    Sum,
    Serialize,
    Deserialize,
)]
#[display(fmt = "{} mm", "self.0")]
pub struct Millimeter(pub f64);

/// An angle in degrees. This is only used at the edges of the system (config
/// and CLI input), all math is done in [Radians].
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    Serialize,
    Deserialize,
)]
#[display(fmt = "{}°", "self.0")]
pub struct Degrees(pub f64);

impl Degrees {
    pub fn to_radians(self) -> Radians {
        Radians(self.0 * RADIANS_PER_DEGREE)
    }
}

/// An angle in radians.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    Sum,
    Serialize,
    Deserialize,
)]
#[display(fmt = "{} rad", "self.0")]
pub struct Radians(pub f64);

impl Radians {
    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    pub fn tan(self) -> f64 {
        self.0.tan()
    }
}

impl From<Degrees> for Radians {
    fn from(degrees: Degrees) -> Self {
        degrees.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_degrees_to_radians() {
        assert_approx_eq!(Degrees(180.0).to_radians().0, PI);
        assert_approx_eq!(Degrees(90.0).to_radians().0, PI / 2.0);
        assert_approx_eq!(Radians::from(Degrees(-45.0)).0, -PI / 4.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Millimeter(15.0).to_string(), "15 mm");
        assert_eq!(Degrees(100.0).to_string(), "100°");
    }

    #[test]
    fn test_serde() {
        assert_tokens(
            &Millimeter(10.5),
            &[Token::NewtypeStruct { name: "Millimeter" }, Token::F64(10.5)],
        );
        assert_tokens(
            &Degrees(70.0),
            &[Token::NewtypeStruct { name: "Degrees" }, Token::F64(70.0)],
        );
    }
}
