pub mod buffer;
pub mod filter;
pub mod selector;
pub mod snapshot;
