//! Space descriptors for TILO agents.
//!
//! This crate defines the [`Space`] trait, through which observation,
//! goal and action spaces are validated and sampled, along with the
//! concrete backends.
//!
//! # Backends
//!
//! - [`BoxSpace`]: real-vector space with per-component bounds
//! - [`Discrete`]: finite set of integer actions `0..n`
//! - [`MultiBinary`]: fixed-length vector of independent 0/1 flags

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boxed;
pub mod discrete;
pub mod error;
pub mod multi_binary;
pub mod space;

#[cfg(test)]
pub(crate) mod compliance;

pub use boxed::BoxSpace;
pub use discrete::Discrete;
pub use error::SpaceError;
pub use multi_binary::MultiBinary;
pub use space::Space;
