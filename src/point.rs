//! Fixed-dimension points stored in a [`KDTree`][crate::kdtree::KDTree].

use std::fmt;
use std::ops::Index;

use geo_traits::{CoordTrait, Dimensions};

use crate::error::KDIndexError;
use crate::r#type::IndexableNum;

/// An immutable point with `D` coordinates of numeric type `N`.
///
/// Equality is componentwise. The dimension is part of the type, so points of different
/// dimensions can never be mixed in one tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<N: IndexableNum, const D: usize>([N; D]);

impl<N: IndexableNum, const D: usize> Point<N, D> {
    /// Create a new point from its coordinates.
    pub const fn new(coords: [N; D]) -> Self {
        Self(coords)
    }

    /// The coordinates of this point.
    pub fn coords(&self) -> &[N; D] {
        &self.0
    }

    /// Consume this point, returning its coordinates.
    pub fn into_inner(self) -> [N; D] {
        self.0
    }

    /// The squared Euclidean distance between two points.
    ///
    /// The sum is accumulated in `N`, so the caller is responsible for choosing a coordinate
    /// type wide enough that it does not overflow.
    #[inline]
    pub fn squared_distance(&self, other: &Self) -> N {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(N::zero(), |sum, (&a, &b)| {
                let d = axis_dist(a, b);
                sum + d * d
            })
    }

    /// Create a point from any [`CoordTrait`] implementation, taking its first `D` coordinates.
    ///
    /// Panics if `coord` has fewer than `D` dimensions.
    pub fn from_coord(coord: &impl CoordTrait<T = N>) -> Self {
        Self(std::array::from_fn(|i| coord.nth_or_panic(i)))
    }
}

impl<N: IndexableNum, const D: usize> From<[N; D]> for Point<N, D> {
    fn from(value: [N; D]) -> Self {
        Self(value)
    }
}

impl<N: IndexableNum, const D: usize> TryFrom<&[N]> for Point<N, D> {
    type Error = KDIndexError;

    fn try_from(value: &[N]) -> Result<Self, Self::Error> {
        let coords: [N; D] = value
            .try_into()
            .map_err(|_| KDIndexError::DimensionMismatch {
                expected: D,
                found: value.len(),
            })?;
        Ok(Self(coords))
    }
}

impl<N: IndexableNum, const D: usize> From<Point<N, D>> for [N; D] {
    fn from(value: Point<N, D>) -> Self {
        value.0
    }
}

impl<N: IndexableNum, const D: usize> Index<usize> for Point<N, D> {
    type Output = N;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<N: IndexableNum, const D: usize> fmt::Display for Point<N, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", c)?;
        }
        f.write_str(")")
    }
}

impl<N: IndexableNum, const D: usize> CoordTrait for Point<N, D> {
    type T = N;

    fn dim(&self) -> Dimensions {
        match D {
            2 => Dimensions::Xy,
            3 => Dimensions::Xyz,
            _ => Dimensions::Unknown(D),
        }
    }

    fn x(&self) -> Self::T {
        self.nth_or_panic(0)
    }

    fn y(&self) -> Self::T {
        self.nth_or_panic(1)
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match self.0.get(n) {
            Some(c) => *c,
            None => panic!("Invalid index of coord"),
        }
    }
}

/// `|a - b|`, ordered so that unsigned coordinate types never underflow.
#[inline]
pub(crate) fn axis_dist<N: IndexableNum>(a: N, b: N) -> N {
    if a < b {
        b - a
    } else {
        a - b
    }
}

#[cfg(test)]
mod test {
    use geo_traits::{CoordTrait, Dimensions};

    use super::{axis_dist, Point};
    use crate::KDIndexError;

    #[test]
    fn squared_distance_is_symmetric() {
        let a = Point::new([2, 3]);
        let b = Point::new([9, 2]);
        assert_eq!(a.squared_distance(&b), 50);
        assert_eq!(b.squared_distance(&a), 50);
        assert_eq!(a.squared_distance(&a), 0);
    }

    #[test]
    fn squared_distance_unsigned() {
        let a = Point::<u32, 3>::new([1, 10, 4]);
        let b = Point::<u32, 3>::new([4, 6, 4]);
        assert_eq!(a.squared_distance(&b), 25);
        assert_eq!(axis_dist(3u8, 250u8), 247);
    }

    #[test]
    fn equality_is_componentwise() {
        assert_eq!(Point::new([1.0, 2.0]), Point::from([1.0, 2.0]));
        assert_ne!(Point::new([1.0, 2.0]), Point::new([2.0, 1.0]));
    }

    #[test]
    fn indexing_and_display() {
        let p = Point::new([4, 7, -1]);
        assert_eq!(p[0], 4);
        assert_eq!(p[2], -1);
        assert_eq!(p.to_string(), "(4, 7, -1)");
        assert_eq!(<[i32; 3]>::from(p), [4, 7, -1]);
    }

    #[test]
    fn try_from_slice_checks_length() {
        let p = Point::<f64, 3>::try_from(&[1.0, 2.0, 3.0][..]).unwrap();
        assert_eq!(p, Point::new([1.0, 2.0, 3.0]));

        let err = Point::<f64, 3>::try_from(&[1.0, 2.0][..]).unwrap_err();
        assert_eq!(
            err,
            KDIndexError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_panics() {
        let p = Point::new([1, 2]);
        let _ = p[2];
    }

    #[test]
    fn coord_trait_round_trip() {
        let p = Point::new([1.5, -2.0]);
        assert!(matches!(p.dim(), Dimensions::Xy));
        assert_eq!(p.x_y(), (1.5, -2.0));
        assert_eq!(Point::from_coord(&p), p);
        assert!(matches!(Point::new([0u8; 5]).dim(), Dimensions::Unknown(5)));
    }
}
