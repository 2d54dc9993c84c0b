mod reader;

pub use reader::{DocumentCheck, InputReader, MAX_CHECKED_BYTES};
