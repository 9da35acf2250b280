#![forbid(unsafe_code)]

pub mod cli;
pub mod cluster;
pub mod codes;
pub mod decoder;
pub mod error;
pub mod growth;
pub mod linalg;
pub mod random;
pub mod record;
pub mod tanner;

pub use codes::Code;
pub use decoder::{Decoder, DecodingResult, InnerDecoder};
pub use error::DecodingError;
pub use growth::GrowthStrategy;
