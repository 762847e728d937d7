use crate::util::unit::Radians;
use derive_more::Display;
use std::{
    fmt::{Debug, Display},
    marker::PhantomData,
    ops,
};

/// Something with an ordering and enough arithmetic to be interpolated. `I`
/// is the primitive that the arithmetic happens in, which is just `Self` for
/// plain floats, and the wrapped float for unit newtypes like [Radians].
pub trait Rangeable<I = Self>:
    Copy
    + Debug
    + Display
    + PartialOrd
    + From<I>
    + Into<I>
    + ops::Add<Self, Output = Self>
    + ops::Sub<Self, Output = Self>
    + ops::Mul<I, Output = Self>
    + ops::Div<I, Output = Self>
{
    fn zero() -> Self;
    fn one() -> Self;
}

macro_rules! impl_rangeable {
    ($t:ty, $i:ty) => {
        impl Rangeable<$i> for $t {
            fn zero() -> Self {
                <$t>::from(0.0 as $i)
            }

            fn one() -> Self {
                <$t>::from(1.0 as $i)
            }
        }
    };
}

impl_rangeable!(f64, f64);
impl_rangeable!(f32, f32);
impl_rangeable!(Radians, f64);

/// A closed interval `[min, max]`. Used for axis extents of bounding boxes,
/// for the separating-axis overlap checks in the lattice, and for mapping
/// values onto color scales.
#[derive(Copy, Clone, Debug, Display, PartialEq)]
#[display(fmt = "[{}, {}]", min, max)]
pub struct NumRange<T: Rangeable<I>, I = T> {
    pub min: T,
    pub max: T,
    phantom: PhantomData<I>,
}

impl<T: Rangeable<I>, I> NumRange<T, I> {
    pub const fn new(min: T, max: T) -> Self {
        Self {
            min,
            max,
            phantom: PhantomData,
        }
    }

    /// `[0, 1]`
    pub fn normal_range() -> Self {
        Self::new(T::zero(), T::one())
    }

    /// Smallest range holding every value, or `None` for no values
    pub fn enclosing(values: impl IntoIterator<Item = T>) -> Option<Self> {
        let mut values = values.into_iter();
        let first = values.next()?;
        Some(values.fold(Self::new(first, first), Self::extend))
    }

    /// Widen the range to include `value`
    pub fn extend(self, value: T) -> Self {
        Self::new(
            if value < self.min { value } else { self.min },
            if value > self.max { value } else { self.max },
        )
    }

    pub fn span(&self) -> T {
        self.max - self.min
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// True if the two ranges share at least one value. Touching endpoints
    /// count as overlapping.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Linearly map `value` from this range onto `dest`. A degenerate
    /// (zero-span) source range maps everything to `dest.min`.
    pub fn map_to(&self, dest: &Self, value: T) -> T {
        let span = self.span();
        if span > T::zero() {
            let fraction = (value - self.min) / span.into();
            dest.min + fraction * dest.span().into()
        } else {
            dest.min
        }
    }

    /// Map `value` onto `[0, 1]`
    pub fn normalize(&self, value: T) -> T {
        self.map_to(&Self::normal_range(), value)
    }

    /// Nearest value inside the range
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}
