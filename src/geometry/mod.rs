pub mod curve;
pub mod shape;

pub use curve::{
    Biarc, CircularArc, CubicBezier, Curve2d, InflectionPoints, LineSegment, SineStrategy, SineWave,
};
pub use shape::Shape;
