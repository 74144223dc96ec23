pub mod artifacts;
pub mod renderer;

pub use artifacts::ArtifactStore;
pub use renderer::PdfRenderer;
