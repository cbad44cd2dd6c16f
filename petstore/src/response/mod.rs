//! Response decoding strategies.

mod format;

pub use format::{EmptyFormat, JsonFormat, ResponseFormat, XmlFormat};
