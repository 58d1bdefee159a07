#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, future_incompatible, unreachable_pub, rust_2018_idioms)]

mod document;
#[cfg(feature = "snot-parser")]
mod from_parser;
mod section;
mod value;

pub use document::Document;
#[cfg(feature = "snot-parser")]
pub use from_parser::{DocumentBuilder, FromError};
pub use section::Section;
pub use value::Value;
