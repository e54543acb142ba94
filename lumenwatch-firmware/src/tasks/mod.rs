//! Embassy async tasks
//!
//! The two contexts of the device: the edge handler and the render worker.
//! They share nothing but the static `SensorReactor`.

pub mod render;
pub mod sensor;

pub use render::render_task;
pub use sensor::sensor_task;
