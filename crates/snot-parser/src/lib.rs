#![doc = include_str!("../README.md")]

mod error;
mod event;
mod limit;
mod parser;
#[cfg(test)]
mod tests;

pub use crate::error::Error;
pub use crate::event::{Sink, TokenView};
pub use crate::limit::LimitTracker;
pub use crate::parser::{NumberKind, Parser, TokenId};
