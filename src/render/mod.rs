//! Drawing collaborator: renderer trait, textures, the render-target stack and the CPU backend.

/// Renderer trait, capabilities and presented frames.
pub mod backend;
/// Premultiplied RGBA8 compositing helpers.
pub mod composite;
/// Software renderer on `vello_cpu`.
pub mod cpu;
/// Sinks receiving presented frames.
pub mod sink;
/// Drawing context with the scoped render-target stack.
pub mod target;
/// Texture handles and CPU surfaces.
pub mod texture;

#[cfg(test)]
#[path = "../../tests/unit/support/mock_renderer.rs"]
pub(crate) mod mock;
