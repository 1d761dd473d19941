//! `resize-once` is not a library.
//! This interface is unstable and subject to change at any time.
//! Please use this documentation only if you are developing `resize-once`.

#![forbid(unsafe_code)]

#[cfg(feature = "hardened_malloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod config;
mod decode;
mod encode;
mod encoders;
pub mod edge;
pub mod error;
pub mod fetch;
pub mod format;
pub mod help;
mod image;
pub mod init;
mod operations;
pub mod output;
pub mod pipeline;
pub mod policy;
mod transform;

pub use crate::config::ResizeConfig;
pub use crate::error::{ErrorKind, ResizeError};
pub use crate::pipeline::{run, ResizeSummary};
