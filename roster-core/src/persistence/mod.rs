/// Persistence module for the flat record file
///
/// The whole collection is rewritten on every save; there is no log and no
/// partial update. Loading a missing file yields an empty collection.
pub mod flat_file;
pub mod types;

pub use flat_file::{FlatFile, decode_line, encode_line};
pub use types::{PersistenceError, Result, StorageConfig};
