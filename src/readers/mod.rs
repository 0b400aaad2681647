pub mod concurrent_reader;
pub mod record_loader;

pub use concurrent_reader::{decode_input, ConcurrentReader};
pub use record_loader::RecordLoader;
