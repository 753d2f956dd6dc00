pub mod memory;

pub use memory::InMemoryRevocationStore;
