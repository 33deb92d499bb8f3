//! World block storage: the [`BlockStore`] trait, a chunked in-memory
//! implementation and the host's native door/trapdoor use.

mod chunk;
mod interaction;
mod memory;
mod store;

pub use chunk::*;
pub use interaction::*;
pub use memory::*;
pub use store::*;
