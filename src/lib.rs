//! # `uniform-handle` — storage-polymorphic value access
//!
//! One pointer-like type, [`UniformHandle<T>`], that lets generic code accept
//! "a reference to a value of type `T`" without the caller committing to how
//! the value is stored: owned outright by the handle, borrowed from external
//! storage, reference-counted and shared, or exclusively owned (promoted to
//! shared at construction so the handle stays cloneable). All strategies
//! present one identical access interface, and a handle over a concrete type
//! converts into a handle over a trait-object type while preserving whichever
//! strategy was originally chosen.
//!
//! ## Ownership model
//!
//! A handle is in exactly one mode for its whole life:
//!
//! - **Empty** — resolves to nothing; the default.
//! - **Owned** — the handle group exclusively owns a heap cell created from a
//!   moved-in or copied value ([`UniformHandle::owned`],
//!   [`UniformHandle::cloned`]).
//! - **Borrowed** — a verbatim pointer into storage owned elsewhere
//!   ([`UniformHandle::borrowed`], `unsafe`: keeping the referent alive is
//!   the caller's obligation, not a detected condition).
//! - **Shared** — aliases a caller-provided `Arc` ([`UniformHandle::shared`])
//!   or a `Box` promoted into one ([`UniformHandle::boxed`]).
//!
//! Cloning a handle duplicates the ownership stake, never the referent;
//! mutation through any sharer is visible through all of them.
//!
//! ## Safety model
//!
//! The handle is a bare aliasing mechanism. Checked access (`as_ref`,
//! `as_ptr`) is safe and total; everything that could dangle or alias is an
//! explicit `unsafe` surface with its obligation documented where the caller
//! takes it on: at the borrowed constructor (referent lifetime) and at the
//! mutable accessors (exclusivity). Reference counting is delegated to
//! [`std::sync::Arc`] and never reimplemented; no operation blocks, and all
//! operations are O(1) pointer/refcount manipulations.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use uniform_handle::UniformHandle;
//!
//! // Four sources, one interface.
//! let mut slot = 17i32;
//! let handles = [
//!     UniformHandle::owned(12),
//!     UniformHandle::cloned(&34),
//!     UniformHandle::shared(Arc::new(56)),
//!     // SAFETY: `slot` outlives every access through the handle.
//!     unsafe { UniformHandle::borrowed(&mut slot as *mut i32) },
//! ];
//!
//! let total: i32 = handles.iter().filter_map(UniformHandle::as_ref).sum();
//! assert_eq!(total, 12 + 34 + 56 + 17);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod handle;

pub use handle::UniformHandle;

// Compile-time layout checks: the handle must stay a small value type.
// Intentionally loose upper bounds to avoid platform brittleness, while still
// catching accidental large regressions.
const _: () = {
    use core::mem;

    // Thin element type: pointer + erased keep-alive + tag.
    assert!(mem::size_of::<UniformHandle<u64>>() <= mem::size_of::<usize>() * 5);

    // Trait-object element type adds one word of pointer metadata.
    assert!(mem::size_of::<UniformHandle<dyn core::fmt::Debug>>() <= mem::size_of::<usize>() * 6);
};
