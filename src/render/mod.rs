/// `vello_cpu` raster surface.
pub mod cpu;
/// Per-frame engine: planning and drawing.
pub mod frame;
/// Drawing target abstraction.
pub mod surface;
