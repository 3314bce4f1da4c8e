use cgmath::{BaseFloat, Point2, Vector2};
use num_traits::NumCast;

pub type Line2f = Line2<f32>;

/// A 2D line through `origin` along `displace`.
///
/// The displacement is kept exactly as given, so signed distances computed
/// from integer-valued endpoints stay exact: a point on the line yields a
/// signed distance of precisely zero.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line2<S: BaseFloat> {
    pub origin: Point2<S>,
    pub displace: Vector2<S>,
}

impl<S: BaseFloat> Line2<S> {
    pub fn from_origin_and_displace(origin: Point2<S>, displace: Vector2<S>) -> Line2<S> {
        Line2 { origin, displace }
    }

    pub fn from_two_points(origin: Point2<S>, towards: Point2<S>) -> Line2<S> {
        Line2 {
            origin,
            displace: towards - origin,
        }
    }

    pub fn inverted_halfspaces(&self) -> Line2<S> {
        Line2 {
            origin: self.origin,
            displace: -self.displace,
        }
    }

    /// Positive on one side of the line, negative on the other, zero on it.
    /// The magnitude is scaled by the length of `displace`.
    pub fn signed_distance(&self, to: Point2<S>) -> S {
        (to - self.origin).perp_dot(self.displace)
    }

    pub fn at_offset(&self, offset: S) -> Point2<S> {
        self.origin + self.displace * offset
    }

    pub fn intersect_offset(&self, other: &Line2<S>) -> Option<S> {
        let denominator = self.displace.perp_dot(other.displace);
        if denominator.abs() < NumCast::from(1e-16).unwrap() {
            None
        } else {
            Some((other.origin - self.origin).perp_dot(other.displace) / denominator)
        }
    }

    pub fn intersect_point(&self, other: &Line2<S>) -> Option<Point2<S>> {
        self.intersect_offset(other)
            .map(|offset| self.at_offset(offset))
    }
}
