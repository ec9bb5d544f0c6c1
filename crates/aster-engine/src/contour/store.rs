use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::render::GpuCtx;

use super::generator::{VertexGenerator, VERTEX_DATA_ELEMENTS};

/// One incrementally-added batch of contour data.
///
/// The CPU-side expanded data only lives until upload: `data` moves from
/// `Pending` to `Uploaded` exactly once, dropping the `Vec` in the process.
/// `index_offsets` is retained for the chunk's lifetime so the draw loop can
/// split the buffer back into polyline ranges.
#[derive(Debug)]
pub struct ContourChunk {
    index_offsets: Vec<i32>,
    generated_vertex_count: usize,
    data: ChunkData,
}

#[derive(Debug)]
enum ChunkData {
    /// Expanded vertex data awaiting upload (no GPU context yet).
    Pending(Vec<f32>),
    /// GPU buffer owns the data; the CPU copy has been dropped.
    Uploaded(wgpu::Buffer),
}

/// Ordered, append-only pool of per-chunk contour vertex buffers.
///
/// Each data delivery becomes one chunk with its own vertex buffer; buffers
/// are created strictly in chunk order and released together on
/// [`clear`](Self::clear). `progress` is whatever the producer last reported
/// (an unconditional overwrite, not a maximum) and `vertex_count` counts raw
/// source vertices, not expanded ones.
#[derive(Debug, Default)]
pub struct ContourStore {
    chunks: Vec<ContourChunk>,
    progress: f64,
    vertex_count: usize,
    dirty: bool,
}

impl ContourStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── ingestion ─────────────────────────────────────────────────────────

    /// Replaces all data: clears existing chunks and buffers, then appends
    /// one chunk from the given delivery.
    pub fn set_data(
        &mut self,
        ctx: Option<&GpuCtx<'_>>,
        generator: &dyn VertexGenerator,
        index_offsets: Vec<i32>,
        source_vertices: &[f32],
        progress: f64,
    ) {
        self.clear();
        self.add_data(ctx, generator, index_offsets, source_vertices, progress);
    }

    /// Appends one chunk of contour data.
    ///
    /// Empty deliveries are ignored entirely (no chunk, counters untouched).
    /// Otherwise the data is expanded through `generator`, uploaded to a
    /// fresh GPU buffer when a context is present, and the CPU copy dropped.
    /// `progress` always takes the supplied value.
    pub fn add_data(
        &mut self,
        ctx: Option<&GpuCtx<'_>>,
        generator: &dyn VertexGenerator,
        index_offsets: Vec<i32>,
        source_vertices: &[f32],
        progress: f64,
    ) {
        let num_vertices = source_vertices.len() / 2;
        if num_vertices == 0 {
            return;
        }

        let expanded = generator.generate(source_vertices, &index_offsets);
        let generated_vertex_count = expanded.len() / (VERTEX_DATA_ELEMENTS / 2);

        self.chunks.push(ContourChunk {
            index_offsets,
            generated_vertex_count,
            data: ChunkData::Pending(expanded),
        });
        self.progress = progress;

        let index = self.chunks.len() - 1;
        self.upload_chunk(ctx, index);

        self.vertex_count += num_vertices;
        self.dirty = true;
    }

    /// Destroys all chunks and releases their GPU buffers.
    ///
    /// Safe on an empty store. `progress` is left alone; the next delivery
    /// supplies the authoritative value.
    pub fn clear(&mut self) {
        // Dropping an Uploaded chunk releases its wgpu buffer.
        self.chunks.clear();
        self.vertex_count = 0;
        self.dirty = true;
    }

    /// Uploads chunks still pending, in strict index order.
    ///
    /// Recovery path for data that arrived while no GPU context was
    /// available; renderers call this once per frame before drawing.
    pub fn ensure_uploaded(&mut self, ctx: &GpuCtx<'_>) {
        while let Some(index) = self.first_pending() {
            let before = self.uploaded_count();
            self.upload_chunk(Some(ctx), index);
            if self.uploaded_count() == before {
                // Mismatch was logged by upload_chunk; do not spin.
                break;
            }
            self.dirty = true;
        }
    }

    fn upload_chunk(&mut self, ctx: Option<&GpuCtx<'_>>, index: usize) {
        let Some(ctx) = ctx else {
            log::warn!("contour chunk {index}: no GPU context, upload deferred");
            return;
        };

        // Buffers must exist in exact chunk order; anything else means the
        // list is out of sync with the chunk list and must not grow.
        let uploaded = self.uploaded_count();
        if uploaded != index {
            log::error!(
                "contour buffer list out of sync: chunk {index} expected {index} uploaded, found {uploaded}"
            );
            return;
        }

        let ChunkData::Pending(data) = &self.chunks[index].data else {
            return;
        };

        let buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("aster contour chunk vbo"),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // The Pending Vec is dropped here; only the GPU copy remains.
        self.chunks[index].data = ChunkData::Uploaded(buffer);
    }

    // ── draw-side access ──────────────────────────────────────────────────

    /// Vertex buffer for the chunk at `index`, to bind for a draw call.
    ///
    /// Logs and returns `None` for out-of-range indices or chunks whose
    /// buffer does not exist yet; the caller's draw loop simply skips those.
    pub fn chunk_buffer(&self, index: usize) -> Option<&wgpu::Buffer> {
        match self.chunks.get(index) {
            Some(ContourChunk { data: ChunkData::Uploaded(buffer), .. }) => Some(buffer),
            Some(_) => {
                log::warn!("contour chunk {index}: vertex buffer missing, draw skipped");
                None
            }
            None => {
                log::warn!("contour chunk {index}: out of range, draw skipped");
                None
            }
        }
    }

    /// Per-polyline draw ranges for the chunk, in expanded-vertex indices.
    ///
    /// A source vertex is two floats and expands to two vertices, so the
    /// retained float offsets double as expanded-vertex offsets. Ranges too
    /// short to form a strip (fewer than two source points) are dropped.
    pub fn chunk_draw_ranges(&self, index: usize) -> Vec<Range<u32>> {
        let Some(chunk) = self.chunks.get(index) else {
            return Vec::new();
        };

        let total = chunk.generated_vertex_count as u32;
        let offsets = &chunk.index_offsets;
        if offsets.is_empty() {
            return if total >= 4 { vec![0..total] } else { Vec::new() };
        }

        let clamp = |o: i32| -> u32 { (o.max(0) as u32).min(total) };

        let mut ranges = Vec::with_capacity(offsets.len());
        for (i, &off) in offsets.iter().enumerate() {
            let start = clamp(off);
            let end = offsets.get(i + 1).map(|&e| clamp(e)).unwrap_or(total);
            if end > start && end - start >= 4 {
                ranges.push(start..end);
            }
        }
        ranges
    }

    // ── state ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total raw source vertices across all chunks.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Expanded vertex count of one chunk.
    pub fn generated_vertex_count(&self, index: usize) -> Option<usize> {
        self.chunks.get(index).map(|c| c.generated_vertex_count)
    }

    pub fn index_offsets(&self, index: usize) -> Option<&[i32]> {
        self.chunks.get(index).map(|c| c.index_offsets.as_slice())
    }

    /// Last producer-reported progress, in [0, 1].
    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// True once the producer reported full delivery.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// True when the store holds any chunk at all.
    #[inline]
    pub fn has_chunks(&self) -> bool {
        !self.chunks.is_empty()
    }

    /// Chunks whose upload is still outstanding.
    pub fn pending_count(&self) -> usize {
        self.chunks
            .iter()
            .filter(|c| matches!(c.data, ChunkData::Pending(_)))
            .count()
    }

    fn uploaded_count(&self) -> usize {
        self.chunks
            .iter()
            .filter(|c| matches!(c.data, ChunkData::Uploaded(_)))
            .count()
    }

    fn first_pending(&self) -> Option<usize> {
        self.chunks
            .iter()
            .position(|c| matches!(c.data, ChunkData::Pending(_)))
    }

    /// Returns and clears the redraw flag for the host render loop.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::SegmentNormalGenerator;

    // All tests run without a GPU context: chunks stay Pending, which is the
    // exact state machine the upload path consumes.

    fn two_point_line() -> Vec<f32> {
        vec![0.0, 0.0, 1.0, 0.0]
    }

    // ── ingestion ─────────────────────────────────────────────────────────

    #[test]
    fn empty_delivery_is_a_no_op() {
        let mut store = ContourStore::new();
        store.add_data(None, &SegmentNormalGenerator, vec![0], &[], 0.7);

        assert_eq!(store.chunk_count(), 0);
        assert_eq!(store.vertex_count(), 0);
        assert!(!store.has_chunks());
        assert_eq!(store.progress(), 0.0);
        assert!(!store.take_dirty());
    }

    #[test]
    fn first_delivery_sets_counts_and_progress() {
        let mut store = ContourStore::new();
        store.add_data(None, &SegmentNormalGenerator, vec![0, 4], &two_point_line(), 0.5);

        assert_eq!(store.chunk_count(), 1);
        assert_eq!(store.vertex_count(), 2);
        assert_eq!(store.progress(), 0.5);
        assert_eq!(store.pending_count(), 1);
        assert_eq!(store.index_offsets(0), Some(&[0, 4][..]));
    }

    #[test]
    fn chunks_accumulate_counts() {
        let mut store = ContourStore::new();
        let r#gen = SegmentNormalGenerator;

        store.add_data(None, &r#gen, vec![0], &two_point_line(), 0.25);
        store.add_data(None, &r#gen, vec![0], &[0.0, 0.0, 1.0, 1.0, 2.0, 0.0], 0.5);
        store.add_data(None, &r#gen, vec![0], &two_point_line(), 0.75);

        assert_eq!(store.chunk_count(), 3);
        assert_eq!(store.vertex_count(), 2 + 3 + 2);
        assert_eq!(store.generated_vertex_count(1), Some(6));
        assert!(store.has_chunks());
    }

    #[test]
    fn progress_is_overwritten_not_maxed() {
        let mut store = ContourStore::new();
        let r#gen = SegmentNormalGenerator;

        store.add_data(None, &r#gen, vec![0], &two_point_line(), 0.9);
        store.add_data(None, &r#gen, vec![0], &two_point_line(), 0.4);

        assert_eq!(store.progress(), 0.4);
    }

    #[test]
    fn completion_boundary_is_inclusive() {
        let mut store = ContourStore::new();
        let r#gen = SegmentNormalGenerator;

        store.add_data(None, &r#gen, vec![0], &two_point_line(), 0.999);
        assert!(!store.is_complete());

        store.add_data(None, &r#gen, vec![0], &two_point_line(), 1.0);
        assert!(store.is_complete());
    }

    #[test]
    fn set_data_replaces_existing_chunks() {
        let mut store = ContourStore::new();
        let r#gen = SegmentNormalGenerator;

        store.add_data(None, &r#gen, vec![0], &two_point_line(), 0.3);
        store.add_data(None, &r#gen, vec![0], &two_point_line(), 0.6);
        store.set_data(None, &r#gen, vec![0], &[0.0, 0.0, 1.0, 1.0, 2.0, 2.0], 0.1);

        assert_eq!(store.chunk_count(), 1);
        assert_eq!(store.vertex_count(), 3);
        assert_eq!(store.progress(), 0.1);
    }

    // ── clear ─────────────────────────────────────────────────────────────

    #[test]
    fn clear_resets_counters_and_chunks() {
        let mut store = ContourStore::new();
        let r#gen = SegmentNormalGenerator;

        store.add_data(None, &r#gen, vec![0], &two_point_line(), 0.5);
        store.add_data(None, &r#gen, vec![0], &two_point_line(), 0.8);
        store.clear();

        assert_eq!(store.chunk_count(), 0);
        assert_eq!(store.vertex_count(), 0);
        assert_eq!(store.pending_count(), 0);
        assert!(!store.has_chunks());
    }

    #[test]
    fn clear_on_empty_store_is_safe() {
        let mut store = ContourStore::new();
        store.clear();
        assert_eq!(store.chunk_count(), 0);
    }

    // ── upload state machine ──────────────────────────────────────────────

    #[test]
    fn without_context_chunks_stay_pending() {
        let mut store = ContourStore::new();
        let r#gen = SegmentNormalGenerator;

        store.add_data(None, &r#gen, vec![0], &two_point_line(), 0.5);
        store.add_data(None, &r#gen, vec![0], &two_point_line(), 1.0);

        assert_eq!(store.pending_count(), 2);
        assert!(store.chunk_buffer(0).is_none());
        assert!(store.chunk_buffer(5).is_none());
    }

    // ── draw ranges ───────────────────────────────────────────────────────

    #[test]
    fn draw_ranges_follow_polyline_offsets() {
        let mut store = ContourStore::new();
        let r#gen = SegmentNormalGenerator;

        // Two polylines: 3 points then 2 points → 10 expanded vertices.
        let vertices = [0.0, 0.0, 1.0, 0.0, 2.0, 0.0, 5.0, 5.0, 6.0, 5.0];
        store.add_data(None, &r#gen, vec![0, 6], &vertices, 1.0);

        assert_eq!(store.chunk_draw_ranges(0), vec![0..6, 6..10]);
    }

    #[test]
    fn short_and_missing_ranges_are_dropped() {
        let mut store = ContourStore::new();
        let r#gen = SegmentNormalGenerator;

        // Single-point polyline at the tail expands to 2 vertices: no strip.
        let vertices = [0.0, 0.0, 1.0, 0.0, 9.0, 9.0];
        store.add_data(None, &r#gen, vec![0, 4], &vertices, 1.0);

        assert_eq!(store.chunk_draw_ranges(0), vec![0..4]);
        assert!(store.chunk_draw_ranges(7).is_empty());
    }

    // ── dirty signal ──────────────────────────────────────────────────────

    #[test]
    fn deliveries_raise_dirty_once() {
        let mut store = ContourStore::new();
        let r#gen = SegmentNormalGenerator;

        store.add_data(None, &r#gen, vec![0], &two_point_line(), 0.5);
        assert!(store.take_dirty());
        assert!(!store.take_dirty());

        store.clear();
        assert!(store.take_dirty());
    }
}
