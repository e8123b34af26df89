//! WebGPU rendering module
//!
//! Flat-color triangle lists: the scene builder turns world state and theme
//! tables into vertices, the pipeline maps them to NDC and draws.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod theme;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
