pub mod geometry;
pub mod renderer;

pub use geometry::CellGeometry;
pub use renderer::Renderer;
