//! Conversions: sharer duplication, move-out, and mode-preserving projection
//! between element types.

use std::sync::Arc;

use super::uniform::UniformHandle;

impl<T: ?Sized> Clone for UniformHandle<T> {
    /// Duplicates the ownership stake, never the referent.
    ///
    /// Owning handles gain a sharer of the same cell; borrowed handles
    /// duplicate only the pointer. Mutation through any sharer is visible
    /// through all of them.
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T: ?Sized> UniformHandle<T> {
    /// Moves the handle out, leaving `self` empty.
    ///
    /// This is the move-construction contract of the handle: the source
    /// remains valid, reports empty, and may be reassigned or dropped.
    ///
    /// ```
    /// use uniform_handle::UniformHandle;
    ///
    /// let mut a = UniformHandle::owned(5i32);
    /// let b = a.take();
    /// assert!(a.is_empty());
    /// assert_eq!(b.as_ref(), Some(&5));
    /// ```
    pub fn take(&mut self) -> Self {
        core::mem::replace(self, Self::empty())
    }

    /// Converts this handle into a handle over a projection of its referent,
    /// preserving the ownership mode and sharing group.
    ///
    /// The closure is the coercion witness: it receives a reference into the
    /// referent and must return a reference derived from it. The usual use is
    /// the covariant upcast of a concrete-typed handle into a trait-object
    /// handle; projecting to a field of the referent works the same way and
    /// keeps the whole payload alive.
    ///
    /// An empty handle maps to an empty handle without invoking the closure.
    ///
    /// ```
    /// use uniform_handle::UniformHandle;
    ///
    /// let concrete = UniformHandle::owned(31u8);
    /// let erased: UniformHandle<dyn std::fmt::Display> =
    ///     concrete.map(|v| v as &dyn std::fmt::Display);
    /// assert_eq!(erased.as_ref().map(ToString::to_string).as_deref(), Some("31"));
    /// ```
    pub fn map<U: ?Sized>(self, project: impl for<'a> FnOnce(&'a T) -> &'a U) -> UniformHandle<U> {
        let slot = self.slot.map(project);
        #[cfg(feature = "tracing")]
        super::slot::trace_constructed(slot.mode());
        UniformHandle { slot }
    }
}

impl<T: ?Sized + 'static> From<Arc<T>> for UniformHandle<T> {
    fn from(cell: Arc<T>) -> Self {
        Self::shared(cell)
    }
}

impl<T: ?Sized + 'static> From<Box<T>> for UniformHandle<T> {
    fn from(cell: Box<T>) -> Self {
        Self::boxed(cell)
    }
}
