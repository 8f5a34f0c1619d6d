mod error;
mod fields;
mod parsing;
mod reader;

pub use error::IngestError;
pub use reader::read_files;
