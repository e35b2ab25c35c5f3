/// UI module exports
pub mod dock;
pub mod rows;

pub use dock::Dock;
