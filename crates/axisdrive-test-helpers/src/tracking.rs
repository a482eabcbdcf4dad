//! Allocation tracking for the per-tick path.
//!
//! A test binary installs [`TrackingAllocator`] as its global allocator and
//! wraps the code under test in a guard from [`track`]. Counting is
//! per-thread, so parallel tests do not see each other's allocations.
//!
//! ```rust,ignore
//! use axisdrive_test_helpers::tracking::TrackingAllocator;
//!
//! #[global_allocator]
//! static ALLOC: TrackingAllocator = TrackingAllocator;
//!
//! let guard = axisdrive_test_helpers::track();
//! controller.tick(reading, dt);
//! axisdrive_test_helpers::assert_rt_safe!(guard, "controller tick");
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
    static BYTES: Cell<usize> = const { Cell::new(0) };
    static ENABLED: Cell<bool> = const { Cell::new(false) };
}

/// Global allocator that counts allocations made while a guard is live.
#[derive(Debug)]
pub struct TrackingAllocator;

fn record(bytes: usize) {
    if ENABLED.with(Cell::get) {
        ALLOCATIONS.with(|c| c.set(c.get().saturating_add(1)));
        BYTES.with(|b| b.set(b.get().saturating_add(bytes)));
    }
}

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() && new_size > layout.size() {
            record(new_size - layout.size());
        }
        new_ptr
    }
}

/// Counts allocations on the current thread from creation until drop.
#[derive(Debug)]
pub struct AllocationGuard {
    start_allocations: usize,
    start_bytes: usize,
}

impl AllocationGuard {
    /// Start tracking on the current thread.
    pub fn new() -> Self {
        ENABLED.with(|e| e.set(true));
        Self {
            start_allocations: ALLOCATIONS.with(Cell::get),
            start_bytes: BYTES.with(Cell::get),
        }
    }

    /// Allocations since the guard was created.
    pub fn allocations(&self) -> usize {
        ALLOCATIONS.with(Cell::get).saturating_sub(self.start_allocations)
    }

    /// Bytes allocated since the guard was created.
    pub fn bytes(&self) -> usize {
        BYTES.with(Cell::get).saturating_sub(self.start_bytes)
    }

    /// Whether anything was allocated.
    pub fn has_allocations(&self) -> bool {
        self.allocations() > 0
    }
}

impl Default for AllocationGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AllocationGuard {
    fn drop(&mut self) {
        ENABLED.with(|e| e.set(false));
    }
}

/// Start tracking allocations on the current thread.
pub fn track() -> AllocationGuard {
    AllocationGuard::new()
}

/// Panic if the guard observed any allocation.
#[macro_export]
macro_rules! assert_rt_safe {
    ($guard:expr) => {
        $crate::assert_rt_safe!($guard, "tick path");
    };
    ($guard:expr, $context:expr) => {
        let guard = &$guard;
        let allocations = guard.allocations();
        if allocations > 0 {
            panic!(
                "RT path allocation violation in '{}': {} allocations ({} bytes) at {}:{}",
                $context,
                allocations,
                guard.bytes(),
                file!(),
                line!()
            );
        }
    };
}
