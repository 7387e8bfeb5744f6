//! Integration tests for the public `UniformHandle` surface: one test per
//! contract of the construction, access, and conversion operations.

use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use uniform_handle::UniformHandle;

/// Base interface used by the covariance tests.
trait Metered {
    fn reading(&self) -> i32;
}

#[derive(Clone)]
struct Gauge {
    value: i32,
}

impl Metered for Gauge {
    fn reading(&self) -> i32 {
        self.value
    }
}

/// Deliberately not `Clone`: the handle must stay cloneable anyway.
struct SealedGauge(i32);

impl Metered for SealedGauge {
    fn reading(&self) -> i32 {
        self.0
    }
}

#[test]
fn default_and_explicit_empty_agree() {
    let default = UniformHandle::<i32>::default();
    let explicit = UniformHandle::<i32>::empty();

    assert!(default.is_empty());
    assert!(explicit.is_empty());
    assert_eq!(default.as_ptr(), None);
    assert!(default.ptr_eq(&explicit));
    assert_eq!(default.as_ref(), None);
}

#[test]
fn null_pointer_yields_a_valid_empty_handle() {
    // SAFETY: a null pointer is explicitly in-contract and stores nothing.
    let handle = unsafe { UniformHandle::<i32>::borrowed(core::ptr::null_mut()) };
    assert!(handle.is_empty());
    assert_eq!(handle.as_ref(), None);
}

#[test]
fn every_source_kind_resolves_to_its_value() {
    let mut external = 17i32;

    let owned = UniformHandle::owned(1i32);
    let copied = UniformHandle::cloned(&2i32);
    let shared = UniformHandle::shared(Arc::new(3i32));
    let promoted = UniformHandle::boxed(Box::new(4i32));
    // SAFETY: `external` outlives every access through `borrowed`.
    let borrowed = unsafe { UniformHandle::borrowed(&mut external as *mut i32) };

    assert_eq!(owned.as_ref(), Some(&1));
    assert_eq!(copied.as_ref(), Some(&2));
    assert_eq!(shared.as_ref(), Some(&3));
    assert_eq!(promoted.as_ref(), Some(&4));
    assert_eq!(borrowed.as_ref(), Some(&17));
}

#[test]
fn cloned_copies_the_source_value() {
    let source = Gauge { value: 5 };
    let handle = UniformHandle::cloned(&source);

    // SAFETY: the handle is non-empty and no other reference is live.
    unsafe { handle.as_mut_unchecked().value = 6 };

    assert_eq!(handle.as_ref().map(Metered::reading), Some(6));
    assert_eq!(source.value, 5);
}

#[test]
fn owned_clones_alias_one_referent() {
    let a = UniformHandle::owned(12i32);
    let b = a.clone();

    assert!(a.ptr_eq(&b));
    // SAFETY: the handle is non-empty and no other reference is live during
    // the write.
    unsafe { *a.as_mut().unwrap() = 14 };
    assert_eq!(b.as_ref(), Some(&14));
}

#[test]
fn borrowed_clones_alias_the_external_storage() {
    let mut external = 17i32;
    // SAFETY: `external` outlives every access through the handle group.
    let a = unsafe { UniformHandle::borrowed(&mut external as *mut i32) };
    let b = a.clone();

    // SAFETY: non-empty, and no other reference is live during the write.
    unsafe { *a.as_mut_unchecked() = 18 };
    assert_eq!(b.as_ref(), Some(&18));

    drop(a);
    drop(b);
    assert_eq!(external, 18);
}

#[test]
fn shared_clones_observe_interior_mutation() {
    let a = UniformHandle::shared(Arc::new(Cell::new(5i32)));
    let b = a.clone();

    a.as_ref().unwrap().set(6);
    assert_eq!(b.as_ref().unwrap().get(), 6);
}

#[test]
fn shared_raises_the_strong_count_for_the_group_lifetime() {
    let cell = Arc::new(3u64);
    let a = UniformHandle::shared(Arc::clone(&cell));
    assert_eq!(Arc::strong_count(&cell), 2);

    // Clones share the stake instead of re-aliasing the cell.
    let b = a.clone();
    assert_eq!(Arc::strong_count(&cell), 2);

    drop(a);
    assert_eq!(Arc::strong_count(&cell), 2);
    drop(b);
    assert_eq!(Arc::strong_count(&cell), 1);
}

#[test]
fn take_leaves_the_source_empty() {
    let mut a = UniformHandle::owned(5i32);
    let b = a.take();

    assert!(a.is_empty());
    assert_eq!(b.as_ref(), Some(&5));

    // Taking from an empty handle stays empty on both sides.
    let c = a.take();
    assert!(a.is_empty());
    assert!(c.is_empty());

    // A taken-from handle is reassignable.
    a = UniformHandle::owned(7i32);
    assert_eq!(a.as_ref(), Some(&7));
}

#[test]
fn self_assignment_preserves_the_value() {
    let mut handle = UniformHandle::owned(41i32);
    handle = handle.clone();
    assert_eq!(handle.as_ref(), Some(&41));
}

#[test]
fn upcast_preserves_identity_and_value() {
    let concrete = UniformHandle::owned(Gauge { value: 6 });
    let addr = concrete.as_ptr().unwrap().as_ptr() as *const u8 as usize;

    let erased: UniformHandle<dyn Metered> = concrete.map(|g| g as &dyn Metered);
    assert_eq!(erased.as_ref().map(Metered::reading), Some(6));

    let erased_addr = erased.as_ptr().unwrap().as_ptr() as *const u8 as usize;
    assert_eq!(addr, erased_addr);
}

#[test]
fn shared_cell_coerces_to_a_trait_object_handle() {
    let cell = Arc::new(SealedGauge(9));
    let shared: Arc<dyn Metered> = Arc::<SealedGauge>::clone(&cell);
    let handle: UniformHandle<dyn Metered> = UniformHandle::shared(shared);

    assert_eq!(Arc::strong_count(&cell), 2);
    assert_eq!(handle.as_ref().map(Metered::reading), Some(9));
    assert!(core::ptr::eq(
        handle.as_ptr().unwrap().as_ptr() as *const u8,
        Arc::as_ptr(&cell) as *const u8,
    ));

    drop(handle);
    assert_eq!(Arc::strong_count(&cell), 1);
}

#[test]
fn exclusive_cell_promotes_to_a_cloneable_handle() {
    // `SealedGauge` is not `Clone`; promotion to shared storage keeps the
    // handle cloneable regardless.
    let handle: UniformHandle<dyn Metered> = UniformHandle::boxed(Box::new(SealedGauge(7)));
    let alias = handle.clone();

    assert!(handle.ptr_eq(&alias));
    assert_eq!(handle.as_ref().map(Metered::reading), Some(7));
    assert_eq!(alias.as_ref().map(Metered::reading), Some(7));
}

#[test]
fn from_impls_match_their_constructors() {
    let from_arc: UniformHandle<u32> = Arc::new(11u32).into();
    let from_box: UniformHandle<u32> = Box::new(12u32).into();

    assert_eq!(from_arc.as_ref(), Some(&11));
    assert_eq!(from_box.as_ref(), Some(&12));
}

#[test]
fn projection_keeps_the_whole_payload_alive() {
    struct Config {
        host: String,
        #[allow(dead_code)]
        port: u16,
    }

    let whole = UniformHandle::owned(Config {
        host: String::from("radar-1"),
        port: 9200,
    });
    let host = whole.clone().map(|c| &c.host);

    drop(whole);
    assert_eq!(host.as_ref().map(String::as_str), Some("radar-1"));
}

#[test]
fn empty_handles_map_to_empty_handles() {
    let empty = UniformHandle::<Gauge>::empty();
    let mapped: UniformHandle<dyn Metered> = empty.map(|g| g as &dyn Metered);
    assert!(mapped.is_empty());
}

#[test]
fn ptr_eq_distinguishes_groups() {
    let a = UniformHandle::owned(1i32);
    let b = a.clone();
    let c = UniformHandle::owned(1i32);

    assert!(a.ptr_eq(&b));
    assert!(!a.ptr_eq(&c));
    assert!(!a.ptr_eq(&UniformHandle::empty()));
}

#[test]
fn handles_cross_threads_with_the_arc_rule() {
    let counter = UniformHandle::shared(Arc::new(AtomicUsize::new(1)));
    let alias = counter.clone();

    std::thread::spawn(move || {
        alias.as_ref().unwrap().fetch_add(1, Ordering::SeqCst);
    })
    .join()
    .unwrap();

    assert_eq!(counter.as_ref().unwrap().load(Ordering::SeqCst), 2);
}

#[cfg(feature = "serde")]
mod serde_round_trips {
    use super::UniformHandle;

    #[test]
    fn non_empty_handles_round_trip_by_value() {
        let handle = UniformHandle::owned(42i64);
        let json = serde_json::to_string(&handle).unwrap();
        assert_eq!(json, "42");

        let back: UniformHandle<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_ref(), Some(&42));
    }

    #[test]
    fn empty_handles_round_trip_to_empty() {
        let handle = UniformHandle::<i64>::empty();
        let json = serde_json::to_string(&handle).unwrap();
        assert_eq!(json, "null");

        let back: UniformHandle<i64> = serde_json::from_str(&json).unwrap();
        assert!(back.is_empty());
    }
}
