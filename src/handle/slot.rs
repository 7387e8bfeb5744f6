//! Storage foundation for [`UniformHandle`](crate::UniformHandle).
//!
//! A handle is a thin wrapper over a [`Slot`]: a sum type with one arm per
//! ownership mode. Every non-empty arm carries the resolved access pointer
//! directly; the owning arms additionally carry a type-erased keep-alive that
//! pins the referent's allocation for as long as any sharer exists. Keeping
//! the pointer separate from the keep-alive is what lets conversion between
//! element types (`map`) rebase the pointer without ever naming the concrete
//! payload type again.

use core::cell::UnsafeCell;
use core::ptr::NonNull;
use std::sync::Arc;

/// Object-safe stand-in for "some keep-alive payload".
///
/// The blanket impl lets any `'static` allocation be erased to `Arc<dyn Erased>`;
/// the only thing a slot ever does with it is clone and drop it.
pub(super) trait Erased {}

impl<T: ?Sized> Erased for T {}

/// The ownership-mode storage behind a handle.
///
/// Exactly one arm is active for the whole life of a slot. The arm is chosen
/// by the construction entry point and preserved by [`Slot::clone`] and
/// [`Slot::map`]; it is never exposed through the public surface.
pub(super) enum Slot<T: ?Sized> {
    /// Resolves to nothing.
    Empty,
    /// Heap payload created by the handle itself; the group of clones owns it
    /// exclusively. The payload lives in an `Arc<UnsafeCell<_>>` so the
    /// retained pointer stays valid for writes (see `as_mut` contracts).
    Owned {
        ptr: NonNull<T>,
        owner: Arc<dyn Erased>,
    },
    /// Non-owning pointer into storage whose lifetime is controlled elsewhere.
    /// Dangles if the referent dies first; that validity obligation belongs to
    /// whoever called the unsafe constructor.
    Borrowed { ptr: NonNull<T> },
    /// Aliases a caller-provided `Arc` (or a `Box` promoted into one). The
    /// incoming cell is held inside `owner`, so its strong count stays raised
    /// while any handle in the group lives.
    Shared {
        ptr: NonNull<T>,
        owner: Arc<dyn Erased>,
    },
}

impl<T: 'static> Slot<T> {
    /// Moves `value` into a fresh exclusively-owned heap cell.
    pub(super) fn owned(value: T) -> Self {
        let cell = Arc::new(UnsafeCell::new(value));
        // Pointer taken before the cell type is erased. Routing it through
        // `UnsafeCell::get` keeps it valid for writes while `owner` lives.
        //
        // SAFETY: `Arc` allocations are never null.
        let ptr = unsafe { NonNull::new_unchecked(cell.get()) };
        let owner: Arc<dyn Erased> = cell;
        Slot::Owned { ptr, owner }
    }
}

impl<T: ?Sized + 'static> Slot<T> {
    /// Aliases an existing shared cell, keeping its strong count raised.
    pub(super) fn shared(cell: Arc<T>) -> Self {
        // SAFETY: `Arc` allocations are never null.
        let ptr = unsafe { NonNull::new_unchecked(Arc::as_ptr(&cell) as *mut T) };
        // `Arc<T>` itself is sized, so the cell can be erased behind one more
        // (thin) allocation regardless of `T`.
        let owner: Arc<dyn Erased> = Arc::new(cell);
        Slot::Shared { ptr, owner }
    }
}

impl<T: ?Sized> Slot<T> {
    /// Wraps a raw pointer verbatim; a null pointer degrades to `Empty`.
    pub(super) fn borrowed(ptr: *mut T) -> Self {
        match NonNull::new(ptr) {
            Some(ptr) => Slot::Borrowed { ptr },
            None => Slot::Empty,
        }
    }

    /// Resolves the current access pointer, if any.
    #[inline(always)]
    pub(super) fn as_ptr(&self) -> Option<NonNull<T>> {
        match self {
            Slot::Empty => None,
            Slot::Owned { ptr, .. } | Slot::Borrowed { ptr } | Slot::Shared { ptr, .. } => {
                Some(*ptr)
            }
        }
    }

    /// Name of the active ownership mode, for trace events and unit tests.
    #[cfg(any(test, feature = "tracing"))]
    pub(super) fn mode(&self) -> &'static str {
        match self {
            Slot::Empty => "empty",
            Slot::Owned { .. } => "owned",
            Slot::Borrowed { .. } => "borrowed",
            Slot::Shared { .. } => "shared",
        }
    }

    /// Rebases the slot onto a projection of its referent, preserving the
    /// ownership mode and sharing group.
    ///
    /// `project` receives a reference into the current referent and must
    /// return a reference it derives from it (the HRTB pins the output
    /// lifetime to the input, so the only other thing it can return is a
    /// `'static`, which can never dangle). `Empty` maps to `Empty` without
    /// invoking the closure.
    pub(super) fn map<U: ?Sized>(
        self,
        project: impl for<'a> FnOnce(&'a T) -> &'a U,
    ) -> Slot<U> {
        let rebase = |ptr: NonNull<T>| {
            // SAFETY: non-empty arms point at a live referent under the
            // constructor contracts (`Borrowed` validity is the documented
            // obligation of the unsafe constructor).
            let projected = project(unsafe { ptr.as_ref() });
            NonNull::from(projected)
        };
        match self {
            Slot::Empty => Slot::Empty,
            Slot::Owned { ptr, owner } => Slot::Owned {
                ptr: rebase(ptr),
                owner,
            },
            Slot::Borrowed { ptr } => Slot::Borrowed { ptr: rebase(ptr) },
            Slot::Shared { ptr, owner } => Slot::Shared {
                ptr: rebase(ptr),
                owner,
            },
        }
    }
}

impl<T: ?Sized> Clone for Slot<T> {
    /// Duplicates the ownership stake: owning arms gain a sharer, the
    /// borrowed arm duplicates only the pointer.
    fn clone(&self) -> Self {
        match self {
            Slot::Empty => Slot::Empty,
            Slot::Owned { ptr, owner } => Slot::Owned {
                ptr: *ptr,
                owner: Arc::clone(owner),
            },
            Slot::Borrowed { ptr } => Slot::Borrowed { ptr: *ptr },
            Slot::Shared { ptr, owner } => Slot::Shared {
                ptr: *ptr,
                owner: Arc::clone(owner),
            },
        }
    }
}

/// Emits a construction trace event.
#[cfg(feature = "tracing")]
pub(super) fn trace_constructed(mode: &'static str) {
    tracing::trace!(target: "uniform_handle", mode, "handle constructed");
}
