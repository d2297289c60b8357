pub mod camera;
pub mod point_instance;
pub mod sphere_instance;

pub use camera::{PerspectiveCamera, Projection};
pub use point_instance::{PointBuffer, PointInstance};
pub use sphere_instance::{SphereBuffer, SphereInstance};
