//! Allocation behaviour of the analyzer, counted per thread

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::f64::consts::PI;

use tone_spectrum::{AnalyzerConfig, SpectrumAnalyzer, WindowType};

struct CountingAllocator;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
    static LIVE_BYTES: Cell<isize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
        let _ = LIVE_BYTES.try_with(|live| live.set(live.get() + layout.size() as isize));
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        let _ = LIVE_BYTES.try_with(|live| live.set(live.get() - layout.size() as isize));
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn allocations() -> usize {
    ALLOCATIONS.with(Cell::get)
}

fn live_bytes() -> isize {
    LIVE_BYTES.with(Cell::get)
}

#[test]
fn test_no_allocation_per_block() {
    let fft_size = 2048;
    let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
        fft_size,
        window_type: WindowType::Hann,
        ..AnalyzerConfig::default()
    })
    .unwrap();
    let signal: Vec<f64> = (0..fft_size)
        .map(|n| (2.0 * PI * 440.0 * n as f64 / 48000.0).sin())
        .collect();
    analyzer.compute_spectrum(&signal).unwrap();

    let before = allocations();
    for _ in 0..100 {
        analyzer.compute_spectrum(&signal).unwrap();
    }
    analyzer.verify_round_trip(&signal).unwrap();
    let after = allocations();

    assert_eq!(after - before, 0);
}

#[test]
fn test_create_release_cycles_leave_nothing_behind() {
    let signal = vec![0.5; 1024];

    // First cycle may initialise process-wide state
    SpectrumAnalyzer::with_size(1024).unwrap().release();

    let before = live_bytes();
    for _ in 0..20 {
        let mut analyzer = SpectrumAnalyzer::with_size(1024).unwrap();
        analyzer.compute_spectrum(&signal).unwrap();
        analyzer.release();
    }
    let after = live_bytes();

    assert_eq!(after, before);
}
