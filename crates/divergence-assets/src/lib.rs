//! Sprite sheets and background images for Divergence
//!
//! The core crate never decodes images itself. This crate plugs the `image`
//! crate into its two input seams:
//!
//! - [`DirectorySource`] reads `{root}/{Scale}/Nixie{Name}.png`
//! - [`MemorySource`] decodes PNG bytes registered up front, for assets
//!   embedded in a binary
//! - [`ImageFileDecoder`] reads background images given as paths
//!
//! The asset root can come from the `DIVERGENCE_ASSETS` environment variable,
//! see [`config`].

pub mod config;
mod decode;
mod directory;
mod memory;

pub use decode::{decode_png, ImageFileDecoder};
pub use directory::DirectorySource;
pub use memory::MemorySource;
