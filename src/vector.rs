//! Algebraic vectors in R2, anchored at an origin that arithmetic never moves.

use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use glam::DVec2;
use rand::Rng;

use crate::color::Color;

/// The three ways two vectors can be combined into a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    Add,
    Subtract,
    /// Elementwise (Hadamard) product, not a dot or cross product.
    Multiply,
}

impl Combine {
    pub fn from_key(key : char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'a' => Some(Combine::Add),
            's' => Some(Combine::Subtract),
            'm' => Some(Combine::Multiply),
            _ => None,
        }
    }

    pub fn apply(self, lhs : DVec2, rhs : DVec2) -> DVec2 {
        match self {
            Combine::Add => lhs + rhs,
            Combine::Subtract => lhs - rhs,
            Combine::Multiply => lhs * rhs,
        }
    }
}

/// Right hand side of a vector operation: another vector (its endpoint is
/// used) or a raw pair of numbers.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Vector(&'a PlaneVector),
    Pair(DVec2),
}

impl Operand<'_> {
    pub fn value(&self) -> DVec2 {
        match self {
            Operand::Vector(v) => v.endpoint,
            Operand::Pair(p) => *p,
        }
    }
}

impl<'a> From<&'a PlaneVector> for Operand<'a> {
    fn from(v : &'a PlaneVector) -> Self {
        Operand::Vector(v)
    }
}

impl From<DVec2> for Operand<'_> {
    fn from(p : DVec2) -> Self {
        Operand::Pair(p)
    }
}

impl From<(f64, f64)> for Operand<'_> {
    fn from((x, y) : (f64, f64)) -> Self {
        Operand::Pair(DVec2::new(x, y))
    }
}

impl From<[f64; 2]> for Operand<'_> {
    fn from(p : [f64; 2]) -> Self {
        Operand::Pair(DVec2::from_array(p))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaneVector {
    origin : DVec2,
    endpoint : DVec2,
    color : Color,
}

impl PlaneVector {
    /// A vector with a random color.
    pub fn new(origin : DVec2, endpoint : DVec2) -> Self {
        Self::with_color(origin, endpoint, Color::random())
    }

    pub fn with_color(origin : DVec2, endpoint : DVec2, color : Color) -> Self {
        Self {
            origin,
            endpoint,
            color,
        }
    }

    pub fn recolored(mut self, color : Color) -> Self {
        self.color = color;
        self
    }

    pub fn origin(&self) -> DVec2 { self.origin }
    pub fn endpoint(&self) -> DVec2 { self.endpoint }
    pub fn color(&self) -> Color { self.color }

    /// New vector sharing this origin whose endpoint is `self.endpoint op rhs`.
    /// The result gets a fresh random color.
    pub fn combine<'a>(&self, op : Combine, rhs : impl Into<Operand<'a>>) -> PlaneVector {
        self.combine_with_rng(op, rhs, &mut rand::thread_rng())
    }

    pub fn combine_with_rng<'a, R : Rng + ?Sized>(&self, op : Combine, rhs : impl Into<Operand<'a>>, rng : &mut R) -> PlaneVector {
        let endpoint = op.apply(self.endpoint, rhs.into().value());
        PlaneVector::with_color(self.origin, endpoint, Color::random_with(rng))
    }

    pub fn add<'a>(&self, rhs : impl Into<Operand<'a>>) -> PlaneVector {
        self.combine(Combine::Add, rhs)
    }

    pub fn subtract<'a>(&self, rhs : impl Into<Operand<'a>>) -> PlaneVector {
        self.combine(Combine::Subtract, rhs)
    }

    pub fn multiply<'a>(&self, rhs : impl Into<Operand<'a>>) -> PlaneVector {
        self.combine(Combine::Multiply, rhs)
    }

    pub fn dot<'a>(&self, rhs : impl Into<Operand<'a>>) -> f64 {
        self.endpoint.dot(rhs.into().value())
    }

    pub fn combine_in_place<'a>(&mut self, op : Combine, rhs : impl Into<Operand<'a>>) -> &mut Self {
        self.endpoint = op.apply(self.endpoint, rhs.into().value());
        self
    }

    pub fn add_in_place<'a>(&mut self, rhs : impl Into<Operand<'a>>) -> &mut Self {
        self.combine_in_place(Combine::Add, rhs)
    }

    pub fn subtract_in_place<'a>(&mut self, rhs : impl Into<Operand<'a>>) -> &mut Self {
        self.combine_in_place(Combine::Subtract, rhs)
    }

    pub fn multiply_in_place<'a>(&mut self, rhs : impl Into<Operand<'a>>) -> &mut Self {
        self.combine_in_place(Combine::Multiply, rhs)
    }
}

impl Add for &PlaneVector {
    type Output = PlaneVector;
    fn add(self, rhs : Self) -> PlaneVector { PlaneVector::add(self, rhs) }
}

impl Sub for &PlaneVector {
    type Output = PlaneVector;
    fn sub(self, rhs : Self) -> PlaneVector { self.subtract(rhs) }
}

impl Mul for &PlaneVector {
    type Output = PlaneVector;
    fn mul(self, rhs : Self) -> PlaneVector { self.multiply(rhs) }
}

// pair * vector keeps the vector's origin
impl<'a> Mul<&'a PlaneVector> for DVec2 {
    type Output = PlaneVector;
    fn mul(self, rhs : &'a PlaneVector) -> PlaneVector { rhs.multiply(self) }
}

impl<'a> AddAssign<&'a PlaneVector> for PlaneVector {
    fn add_assign(&mut self, rhs : &'a PlaneVector) { self.add_in_place(rhs); }
}

impl<'a> SubAssign<&'a PlaneVector> for PlaneVector {
    fn sub_assign(&mut self, rhs : &'a PlaneVector) { self.subtract_in_place(rhs); }
}

impl<'a> MulAssign<&'a PlaneVector> for PlaneVector {
    fn mul_assign(&mut self, rhs : &'a PlaneVector) { self.multiply_in_place(rhs); }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(origin : (f64, f64), endpoint : (f64, f64)) -> PlaneVector {
        PlaneVector::with_color(origin.into(), endpoint.into(), Color::rgb(0.5, 0.5, 0.5))
    }

    #[test]
    fn elementwise_arithmetic() {
        let a = v((0., 0.), (2., 3.));
        let b = v((0., 0.), (1., 1.));
        assert_eq!(a.add(&b).endpoint(), DVec2::new(3., 4.));
        assert_eq!(a.subtract(&b).endpoint(), DVec2::new(1., 2.));
        assert_eq!(a.multiply(&b).endpoint(), DVec2::new(2., 3.));
    }

    #[test]
    fn result_keeps_left_origin() {
        let a = v((1., -1.), (2., 3.));
        let b = v((5., 5.), (1., 1.));
        for op in [Combine::Add, Combine::Subtract, Combine::Multiply] {
            assert_eq!(a.combine(op, &b).origin(), DVec2::new(1., -1.));
        }
    }

    #[test]
    fn raw_pairs_are_accepted() {
        let a = v((0., 0.), (2., 3.));
        assert_eq!(a.add((1., 2.)).endpoint(), DVec2::new(3., 5.));
        assert_eq!(a.subtract([2., 3.]).endpoint(), DVec2::ZERO);
        assert_eq!(a.multiply(DVec2::new(0.5, 2.)).endpoint(), DVec2::new(1., 6.));
    }

    #[test]
    fn multiply_is_not_a_dot_product() {
        let a = v((0., 0.), (2., 3.));
        let b = v((0., 0.), (4., 5.));
        assert_eq!(a.multiply(&b).endpoint(), DVec2::new(8., 15.));
        assert_eq!(a.dot(&b), 23.);
        assert_eq!(a.dot((1., 0.)), 2.);
    }

    #[test]
    fn operands_are_left_untouched() {
        let a = v((0., 0.), (2., 3.));
        let b = v((1., 1.), (1., 1.));
        let _ = a.add(&b);
        assert_eq!(a, v((0., 0.), (2., 3.)));
        assert_eq!(b, v((1., 1.), (1., 1.)));
    }

    #[test]
    fn in_place_only_moves_endpoint() {
        let mut a = v((1., 2.), (2., 3.));
        let color = a.color();
        let b = v((9., 9.), (1., 1.));
        a.add_in_place(&b);
        assert_eq!(a.endpoint(), DVec2::new(3., 4.));
        a.subtract_in_place(&b).multiply_in_place((2., 0.5));
        assert_eq!(a.endpoint(), DVec2::new(4., 1.5));
        assert_eq!(a.origin(), DVec2::new(1., 2.));
        assert_eq!(a.color(), color);
    }

    #[test]
    fn operator_sugar_matches_named_methods() {
        let a = v((0., 0.), (2., 3.));
        let b = v((0., 0.), (1., 1.));
        assert_eq!((&a + &b).endpoint(), a.add(&b).endpoint());
        assert_eq!((&a - &b).endpoint(), a.subtract(&b).endpoint());
        assert_eq!((&a * &b).endpoint(), a.multiply(&b).endpoint());

        let scaled = DVec2::new(2., 2.) * &a;
        assert_eq!(scaled.endpoint(), DVec2::new(4., 6.));
        assert_eq!(scaled.origin(), a.origin());

        let mut c = a.clone();
        c += &b;
        c -= &b;
        c *= &b;
        assert_eq!(c.endpoint(), DVec2::new(2., 3.));
    }

    #[test]
    fn combined_vectors_get_a_fresh_color() {
        use rand::rngs::SmallRng;
        use rand::SeedableRng;

        let a = v((0., 0.), (2., 3.));
        let b = v((0., 0.), (1., 1.));
        let sum = a.combine_with_rng(Combine::Add, &b, &mut SmallRng::seed_from_u64(7));
        assert_eq!(sum.color(), Color::random_with(&mut SmallRng::seed_from_u64(7)));
        assert_ne!(sum.color(), a.color());
        assert_eq!(sum.color().a, 1.0);

        let again = a.combine(Combine::Add, &b);
        assert_ne!(again.color(), a.color());
    }

    #[test]
    fn recolored_replaces_color_only() {
        let a = v((0., 0.), (2., 3.)).recolored(Color::I_HAT);
        assert_eq!(a.color(), Color::I_HAT);
        assert_eq!(a.endpoint(), DVec2::new(2., 3.));
    }

    #[test]
    fn combine_keys() {
        assert_eq!(Combine::from_key('a'), Some(Combine::Add));
        assert_eq!(Combine::from_key('S'), Some(Combine::Subtract));
        assert_eq!(Combine::from_key('m'), Some(Combine::Multiply));
        assert_eq!(Combine::from_key('x'), None);
    }
}
