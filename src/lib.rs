/*

Euclidean uniform tilings from affine triangle reflection groups,
drawn by walking the shortlex word automaton of the group.

 */

#![recursion_limit = "1024"]

//////////////////////////////////////////////////////////////////////
// use error chain so we can use Result<> everywhere
// for error handling

#[macro_use]
extern crate error_chain;

#[macro_use]
extern crate log;

pub mod errors {

    error_chain! {

        foreign_links {
            Fmt(::std::fmt::Error);
            Io(::std::io::Error);
            ParseInt(::std::num::ParseIntError);
            ParseFloat(::std::num::ParseFloatError);
            Cairo(::cairo::Error);
            CairoBorrow(::cairo::BorrowError);
            Image(::image::ImageError);
        }

        errors {

            // bad Coxeter matrix, bad settings, bad tiling file contents
            Configuration(msg: String) {
                description("configuration error")
                display("configuration error: {}", msg)
            }

            // degenerate linear algebra or a point at infinity
            Numeric(msg: String) {
                description("numeric error")
                display("numeric error: {}", msg)
            }

        }

    }

}

//////////////////////////////////////////////////////////////////////
// pull in some types from nalgebra

pub type Vec2d = nalgebra::Vector2<f64>;
pub type Vec3d = nalgebra::Vector3<f64>;
pub type Point2d = nalgebra::geometry::Point2<f64>;
pub type Matrix3d = nalgebra::Matrix3<f64>;

pub const PI: f64 = std::f64::consts::PI;

//////////////////////////////////////////////////////////////////////

pub mod automaton;
pub mod coxeter;
pub mod faces;
pub mod mirrors;
pub mod pattern;
pub mod presets;
pub mod reflect;
pub mod render;
pub mod tiling;
pub mod traverse;

pub use automaton::{ShortlexAutomaton, StateId, WordAutomaton};
pub use coxeter::{CoxeterMatrix, INFINITE_ORDER};
pub use faces::{Face, FaceKind};
pub use reflect::Reflection;
pub use render::RenderSettings;
pub use tiling::{EuclideanTiling, GeometryContext, TilingSpec};
pub use traverse::{traverse, OrbitTraversal, TraversalRecord};
