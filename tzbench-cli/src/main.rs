//! tzbench binary entry point

use tzbench_core::TrackingAllocator;

// Heap snapshots read this allocator's counters; without it they report 0
#[global_allocator]
static ALLOC: TrackingAllocator = TrackingAllocator;

fn main() {
    if let Err(e) = tzbench_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
