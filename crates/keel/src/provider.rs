mod memory;
pub use memory::Memory;

pub use keel_core::query::Provider;
