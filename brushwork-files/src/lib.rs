use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("The file's magic value does not match the expectation {magic:#010x}")]
    InvalidMagicValue { magic: u32 },

    #[error("The file is violating the expected format, because: {reason}")]
    FormatError { reason: &'static str },

    /// An archive entry whose type tag we know how to skip, but not how to decode.
    #[error("Entry {name} has the unsupported type {lump_type:#04x}")]
    UnsupportedLumpType { name: String, lump_type: u8 },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    UTF8ConversationError(#[from] std::string::FromUtf8Error),
}

pub mod common;
pub mod map;
pub mod wad;
