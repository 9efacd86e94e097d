use crate::prelude::*;
use alloc::boxed::Box;
use alloc::vec::Vec;

/// Reserve a zeroed `[T; N]` on the heap for the lifetime of the program.
///
/// The clip buffers are far too large for a task arena or the stack. There
/// is nothing useful the device can do without them, so a failed reservation
/// is fatal.
pub fn leak_zeroed<T: Copy + Default, const N: usize>() -> &'static mut [T; N] {
    let mut storage: Vec<T> = Vec::new();
    if storage.try_reserve_exact(N).is_err() {
        error!("Failed to allocate buffers");
        panic!("heap exhausted reserving {} samples", N);
    }
    storage.resize(N, T::default());

    match Box::<[T; N]>::try_from(storage.into_boxed_slice()) {
        Ok(array) => Box::leak(array),
        Err(_) => unreachable!(),
    }
}

/// The raw and filtered clip buffers, both `BUF_SAMPLES` long.
pub fn alloc_clip_buffers(
) -> (&'static mut [i32; BUF_SAMPLES], &'static mut [i16; BUF_SAMPLES]) {
    let raw = leak_zeroed::<i32, BUF_SAMPLES>();
    let filtered = leak_zeroed::<i16, BUF_SAMPLES>();
    info!(
        "Clip buffers ready, heap usage = {:?}",
        crate::ALLOCATOR.usage()
    );
    (raw, filtered)
}
