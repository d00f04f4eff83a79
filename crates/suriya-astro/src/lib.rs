//! Historical moon phases read from a directory of yearly JSON files.
//!
//! Each file is named `astro-YYYY.json` and holds one year of phases in the
//! persisted format of [`suriya_core::feed::AerisResponse`].

mod dir;

pub mod error;

pub use dir::AstroDirFeed;
pub use error::{Error, Result};

#[cfg(test)]
mod tests;
