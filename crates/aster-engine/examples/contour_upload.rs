//! Streams a few contour chunks into a store on a headless device.
//!
//! Run with `RUST_LOG=debug` to watch the upload lifecycle.

use anyhow::Result;

use aster_engine::contour::{ContourStore, SegmentNormalGenerator};
use aster_engine::device::{GpuInit, HeadlessGpu};
use aster_engine::logging;

fn main() -> Result<()> {
    logging::init_from_env();

    let gpu = HeadlessGpu::new_blocking(GpuInit::default())?;
    log::info!("adapter: {}", gpu.adapter_info().name);

    let generator = SegmentNormalGenerator;
    let mut store = ContourStore::new();

    // Two deliveries, as a producer would stream them: a diagonal polyline,
    // then a second batch with two short polylines.
    store.add_data(
        Some(&gpu.ctx()),
        &generator,
        vec![0],
        &[0.0, 0.0, 10.0, 10.0, 20.0, 5.0],
        0.5,
    );
    store.add_data(
        Some(&gpu.ctx()),
        &generator,
        vec![0, 4],
        &[30.0, 0.0, 40.0, 0.0, 50.0, 5.0, 50.0, 15.0],
        1.0,
    );

    log::info!(
        "chunks={} vertices={} pending={} complete={}",
        store.chunk_count(),
        store.vertex_count(),
        store.pending_count(),
        store.is_complete(),
    );

    store.clear();
    log::info!("cleared: chunks={}", store.chunk_count());

    Ok(())
}
