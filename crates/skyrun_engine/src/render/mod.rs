//! Render-side primitives
//!
//! Only the camera lives here: drawing itself belongs to whatever backend
//! consumes the scene graph.

pub mod camera;

pub use camera::PerspectiveCamera;
