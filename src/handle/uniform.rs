//! `UniformHandle` — one pointer-like type over owned, borrowed, and shared
//! storage.
//!
//! The handle resolves to either "empty" or "points at a live value of `T`",
//! regardless of which construction entry point produced it. Consumers never
//! learn which strategy is active; they construct a handle from whatever they
//! already possess (a value, a raw pointer, an `Arc`, a `Box`) and access the
//! referent through one interface.
//!
//! Access operations live in the `ops_*` sibling modules.

use core::fmt;

use super::slot::Slot;

/// A storage-polymorphic handle to a value of type `T`.
///
/// Once constructed, a handle is in exactly one ownership mode — empty,
/// owned, borrowed, or shared — fixed for its whole life. Cloning duplicates
/// the ownership stake (owning modes gain a sharer; borrowed mode duplicates
/// the pointer), never the referent.
///
/// Handles built from exclusive sources ([`UniformHandle::boxed`]) are
/// promoted to shared storage at construction, so `Clone` is available even
/// when the payload type itself is not cloneable.
///
/// # Example
///
/// ```
/// use uniform_handle::UniformHandle;
///
/// let owned = UniformHandle::owned(42u64);
/// let alias = owned.clone();
/// assert_eq!(alias.as_ref(), Some(&42));
/// ```
pub struct UniformHandle<T: ?Sized> {
    pub(super) slot: Slot<T>,
}

impl<T: ?Sized> UniformHandle<T> {
    /// Creates an empty handle; [`as_ref`](UniformHandle::as_ref) yields
    /// `None` and [`is_empty`](UniformHandle::is_empty) is true.
    pub const fn empty() -> Self {
        Self { slot: Slot::Empty }
    }

    /// Creates a non-owning handle from a raw pointer.
    ///
    /// The pointer is stored verbatim: no lifetime management, no refcount.
    /// A null pointer yields a valid empty handle, not an error.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must point at a live, properly aligned `T`, and the
    /// caller must keep the referent alive and un-moved for as long as this
    /// handle — or any handle cloned or mapped from it — is accessed. The
    /// handle takes no ownership stake, so a referent destroyed early leaves
    /// every derived handle dangling.
    pub unsafe fn borrowed(ptr: *mut T) -> Self {
        let slot = Slot::borrowed(ptr);
        #[cfg(feature = "tracing")]
        super::slot::trace_constructed(slot.mode());
        Self { slot }
    }
}

impl<T: 'static> UniformHandle<T> {
    /// Moves `value` into a handle-owned heap cell.
    ///
    /// The cell is destroyed when the last clone of this handle drops.
    ///
    /// ```
    /// use uniform_handle::UniformHandle;
    ///
    /// let h = UniformHandle::owned(String::from("tide"));
    /// assert_eq!(h.as_ref().map(String::as_str), Some("tide"));
    /// ```
    pub fn owned(value: T) -> Self {
        let slot = Slot::owned(value);
        #[cfg(feature = "tracing")]
        super::slot::trace_constructed(slot.mode());
        Self { slot }
    }

    /// Copies `value` into a handle-owned heap cell, leaving the original
    /// untouched.
    pub fn cloned(value: &T) -> Self
    where
        T: Clone,
    {
        Self::owned(value.clone())
    }
}

impl<T: ?Sized + 'static> UniformHandle<T> {
    /// Creates a handle that aliases an existing shared cell.
    ///
    /// The cell's strong count stays raised while any handle in the group
    /// lives. Unsized coercion happens at the call site, so a handle over a
    /// trait object accepts an `Arc` of any concrete implementor:
    ///
    /// ```
    /// use std::sync::Arc;
    /// use uniform_handle::UniformHandle;
    ///
    /// let cell = Arc::new(7u32);
    /// let h: UniformHandle<dyn std::fmt::Display> = UniformHandle::shared(cell);
    /// assert!(!h.is_empty());
    /// ```
    pub fn shared(cell: std::sync::Arc<T>) -> Self {
        let slot = Slot::shared(cell);
        #[cfg(feature = "tracing")]
        super::slot::trace_constructed(slot.mode());
        Self { slot }
    }

    /// Creates a handle from an exclusively-owned cell.
    ///
    /// The box is promoted to shared storage so the resulting handle stays
    /// cloneable; this is also the by-value entry point for handles over
    /// unsized element types.
    pub fn boxed(cell: Box<T>) -> Self {
        Self::shared(std::sync::Arc::from(cell))
    }
}

impl<T: ?Sized> Default for UniformHandle<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> fmt::Debug for UniformHandle<T> {
    /// Prints only the resolved pointer; the active ownership mode is
    /// deliberately not observable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UniformHandle").field(&self.as_ptr()).finish()
    }
}

// SAFETY: a handle is an aliasing mechanism over `T` with `Arc`-backed
// refcounting. The `Arc` rule applies: `&UniformHandle<T>` can mint new
// sharers (`Clone`) and hand out `&T`, and the last sharer may drop the
// payload on any thread, so both markers require `T: Send + Sync`. Internal
// refcount traffic is atomic (delegated to `Arc`); referent access is not
// synchronized beyond what `T` itself provides.
unsafe impl<T: ?Sized + Send + Sync> Send for UniformHandle<T> {}
unsafe impl<T: ?Sized + Send + Sync> Sync for UniformHandle<T> {}
