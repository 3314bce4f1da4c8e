use crate::name::LumpName;
use math::Pnt2f;

/// Sidedef texture slots left empty are conventionally named "-".
pub fn is_untextured(name: LumpName) -> bool {
    name[0] == b'-' && name[1] == b'\0'
}

pub fn is_sky_flat(name: LumpName) -> bool {
    name.as_bytes() == b"F_SKY1\0\0"
}

/// The axis-aligned bounds of a set of points, or `None` for an empty set.
pub fn point_bounds(points: impl IntoIterator<Item = Pnt2f>) -> Option<(Pnt2f, Pnt2f)> {
    let mut points = points.into_iter();
    let first = points.next()?;
    let (mut min, mut max) = (first, first);
    for point in points {
        min.x = min.x.min(point.x);
        min.y = min.y.min(point.y);
        max.x = max.x.max(point.x);
        max.y = max.y.max(point.y);
    }
    Some((min, max))
}
