// Library crate: exposes testable modules for integration tests.
// GUI-specific modules (app, ui, GL rendering, overlays) remain in the binary crate.

pub mod build;
pub mod harness;
pub mod i18n;
pub mod lifecycle;
pub mod presentation;
pub mod state;

/// Subset of viewport types shared by the lifecycle and the binary
/// (camera, CPU meshes). The GL renderer stays in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod mesh;
}
