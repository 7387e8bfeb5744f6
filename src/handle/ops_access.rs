//! Access operations: emptiness test, pointer resolution, checked and
//! unchecked referent access.

use core::ptr::NonNull;

use super::slot::Slot;
use super::uniform::UniformHandle;

impl<T: ?Sized> UniformHandle<T> {
    /// Resolves the current access pointer, or `None` for an empty handle.
    ///
    /// This is the only referent-shaped operation that is meaningful on every
    /// handle, empty ones included.
    #[inline(always)]
    pub fn as_ptr(&self) -> Option<NonNull<T>> {
        self.slot.as_ptr()
    }

    /// Returns true iff the handle resolves to nothing.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        matches!(self.slot, Slot::Empty)
    }

    /// Borrows the referent, or `None` for an empty handle.
    #[inline(always)]
    pub fn as_ref(&self) -> Option<&T> {
        // SAFETY: non-empty slots point at a live referent: the owning arms
        // pin their allocation through the keep-alive, and borrowed-arm
        // validity is the documented contract of `UniformHandle::borrowed`.
        self.as_ptr().map(|ptr| unsafe { &*ptr.as_ptr() })
    }

    /// Mutably borrows the referent, or `None` for an empty handle.
    ///
    /// Sharers all alias one referent, so mutation through any of them is
    /// visible through all of them. The handle imposes no locking discipline.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that no other reference to the referent is
    /// live for the duration of the borrow — including references obtained
    /// through clones of this handle on this or any other thread. For a
    /// handle built from a plain `Arc`, the caller must additionally be in a
    /// position where writing that allocation is defined at all (the
    /// allocation was not handed out as `&T` elsewhere); prefer
    /// interior-mutable referents for shared write traffic.
    #[inline(always)]
    pub unsafe fn as_mut(&self) -> Option<&mut T> {
        self.as_ptr().map(|ptr| unsafe { &mut *ptr.as_ptr() })
    }

    /// Borrows the referent without an emptiness check.
    ///
    /// # Safety
    ///
    /// The handle must be non-empty. Calling this on an empty handle is
    /// undefined behavior, mirroring the cost model of a raw-pointer
    /// dereference; test with [`is_empty`](UniformHandle::is_empty) or
    /// [`as_ptr`](UniformHandle::as_ptr) first.
    #[inline(always)]
    pub unsafe fn as_ref_unchecked(&self) -> &T {
        debug_assert!(
            !self.is_empty(),
            "unchecked access through an empty UniformHandle"
        );
        match self.as_ptr() {
            // SAFETY: same referent-liveness reasoning as `as_ref`.
            Some(ptr) => unsafe { &*ptr.as_ptr() },
            // SAFETY: excluded by this function's contract; an empty handle
            // here is a caller bug, not a runtime condition to report.
            None => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    /// Mutably borrows the referent without an emptiness check.
    ///
    /// # Safety
    ///
    /// The handle must be non-empty, and every obligation of
    /// [`as_mut`](UniformHandle::as_mut) applies unchanged.
    #[inline(always)]
    pub unsafe fn as_mut_unchecked(&self) -> &mut T {
        debug_assert!(
            !self.is_empty(),
            "unchecked access through an empty UniformHandle"
        );
        match self.as_ptr() {
            // SAFETY: exclusivity is the caller's obligation, per the contract.
            Some(ptr) => unsafe { &mut *ptr.as_ptr() },
            // SAFETY: excluded by this function's contract.
            None => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    /// Returns true iff both handles resolve to the same referent.
    ///
    /// Comparison is by raw pointer (metadata included); two empty handles
    /// compare equal.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.as_ptr() == other.as_ptr()
    }
}
