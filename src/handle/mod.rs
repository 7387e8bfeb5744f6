//! The uniform handle family — storage-polymorphic value access.
//!
//! The module tree is intentionally stratified:
//! - `slot` is the minimal unsafe building block: the ownership-mode sum type
//!   and the type-erased keep-alive.
//! - `uniform` is the public handle type and its construction surface.
//! - `ops_*` siblings hold the access and conversion operations, to keep
//!   files short and responsibilities clear.

pub mod uniform;

mod ops_access;
mod ops_convert;
mod slot;

#[cfg(feature = "serde")]
mod serde_impls;


pub use uniform::UniformHandle;
