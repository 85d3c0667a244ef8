pub mod index;
pub mod memstore;
pub mod persistence;

pub use index::{KeywordIndex, TextIndex};
pub use memstore::MemStore;
pub use persistence::Persistence;
