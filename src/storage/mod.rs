//! Storage: the in-memory entity store

pub mod in_memory;

pub use in_memory::{InMemoryStore, Table, Tables};
