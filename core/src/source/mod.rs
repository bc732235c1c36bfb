pub mod file;
pub mod metadata;
pub mod signal;
pub mod table;

pub use file::ChromatogramFile;
pub use metadata::{parse_key_value_pairs, slugify_key, Metadata, MetadataBlock};
pub use signal::SignalSource;
pub use table::{parse_table, SignalRow, MISSING_SENTINEL};
