mod hex;

use crate::util::CastError;
pub use hex::{parse_hex, to_hex};

/// Trait allowing us to use .encode_hex to display bytes
pub trait Encodable {
    fn encode_hex(&self) -> String;
}

impl Encodable for [u8] {
    fn encode_hex(&self) -> String {
        to_hex(self)
    }
}

#[derive(Debug, Copy, Clone)]
pub enum DecodingError {
    CastError(CastError),
    InvalidCharacter(u8),
}

impl std::fmt::Display for DecodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for DecodingError {}

impl From<CastError> for DecodingError {
    fn from(value: CastError) -> Self {
        Self::CastError(value)
    }
}

/// Trait allowing us to use .decode_hex to parse strings
pub trait Decodable {
    type DecodeError;

    fn decode_hex(&self) -> Result<Vec<u8>, Self::DecodeError>;
}

impl Decodable for str {
    type DecodeError = DecodingError;

    fn decode_hex(&self) -> Result<Vec<u8>, Self::DecodeError> {
        parse_hex(self)
    }
}
