mod log_surface;
mod memory_surface;

pub use log_surface::LogSurface;
pub use memory_surface::MemorySurface;
