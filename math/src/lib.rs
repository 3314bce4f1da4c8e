pub mod prelude {
    pub use cgmath::prelude::*;
}

mod line;

pub use crate::line::{Line2, Line2f};
pub use cgmath::{vec2, vec3, Deg, Point2, Point3, Rad, Vector2, Vector3};

pub type Radf = Rad<f32>;
pub type Degf = Deg<f32>;

pub type Vec2f = Vector2<f32>;
pub type Vec3f = Vector3<f32>;

pub type Pnt2f = Point2<f32>;
pub type Pnt3f = Point3<f32>;
