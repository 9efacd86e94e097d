#![no_std]
extern crate alloc;

mod fmt;

pub mod buffers;
pub mod tasks;

use core::ptr::addr_of_mut;
use embassy_executor::{InterruptExecutor, SendSpawner};
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_time::Duration;
use embedded_alloc::LlffHeap;
use voice_pipeline::{PipelineConfig, FRAME_SAMPLES};

pub const FW_VERSION: &str = env!("FW_VERSION");

/// PCM rate of the microphone and speaker paths.
pub const SAMPLE_RATE_HZ: usize = 16_000;
/// Longest clip the device keeps.
pub const RECORDING_SECONDS: usize = 2;
/// Capacity of the capture buffer, a whole number of codec frames.
pub const BUF_SAMPLES: usize = SAMPLE_RATE_HZ * RECORDING_SECONDS;

const _: () = assert!(BUF_SAMPLES % FRAME_SAMPLES == 0);

/// Pipeline timing used on the device.
pub fn pipeline_config() -> PipelineConfig {
    PipelineConfig {
        recording_ceiling: Duration::from_secs(RECORDING_SECONDS as u64),
        ..PipelineConfig::default()
    }
}

// Heap helpers
#[global_allocator]
pub static ALLOCATOR: trallocator::Trallocator<LlffHeap> =
    trallocator::Trallocator::new(LlffHeap::empty());

/// Sized for the raw and filtered clips plus allocator bookkeeping.
pub const HEAP_SIZE: usize = 196 * 1024;

pub fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] =
        [MaybeUninit::uninit(); HEAP_SIZE];
    unsafe {
        ALLOCATOR.borrow().init(addr_of_mut!(HEAP_MEM) as usize, HEAP_SIZE)
    }
}

// Statics
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

// Interrupt executors
#[interrupt]
unsafe fn EGU1_SWI1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Start the executor that runs the microphone stream, so PDM blocks are
/// drained even while the pipeline is busy conditioning a clip.
pub fn init_executors() -> SendSpawner {
    // High-priority executor: EGU1_SWI1, priority level 6
    interrupt::EGU1_SWI1.set_priority(Priority::P6);
    EXECUTOR_HIGH.start(interrupt::EGU1_SWI1)
}

pub mod prelude {
    pub use super::{
        buffers::*, error, info, init_executors, init_heap, pipeline_config,
        tasks::*, warn, BUF_SAMPLES, FW_VERSION, RECORDING_SECONDS,
        SAMPLE_RATE_HZ,
    };
    pub use embassy_executor::Spawner;
    pub use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    pub use embassy_time::{Duration, Timer};

    pub use ptt_bsp::{MicResources, PttBoard, SpeakerResources};
}
