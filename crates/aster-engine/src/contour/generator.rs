/// Number of `f32` values one source vertex expands to.
///
/// Each source vertex is emitted twice (one copy per stroke side), each copy
/// as `[x, y, nx, ny]`.
pub const VERTEX_DATA_ELEMENTS: usize = 8;

/// Expansion routine turning raw contour vertices into renderable data.
///
/// The production implementation lives outside this crate (the contouring
/// pipeline computes it); the store only requires the layout contract above.
/// Implementations must be pure: same input, same output, no side effects.
pub trait VertexGenerator {
    /// `source_vertices` is a flat `[x0, y0, x1, y1, ...]` sequence;
    /// `index_offsets` holds the float offset of each polyline start.
    fn generate(&self, source_vertices: &[f32], index_offsets: &[i32]) -> Vec<f32>;
}

/// Minimal reference expansion: per-segment unit normals, each vertex
/// duplicated with opposite normal signs.
///
/// Interior vertices take the direction of their outgoing segment; the last
/// vertex of a polyline reuses its incoming segment. Good enough for demos
/// and tests; real contour data uses the external pipeline.
#[derive(Debug, Default)]
pub struct SegmentNormalGenerator;

impl VertexGenerator for SegmentNormalGenerator {
    fn generate(&self, source_vertices: &[f32], index_offsets: &[i32]) -> Vec<f32> {
        let mut out = Vec::with_capacity(source_vertices.len() / 2 * VERTEX_DATA_ELEMENTS);

        for (start, end) in polyline_spans(source_vertices.len(), index_offsets) {
            let points = &source_vertices[start..end];
            let n = points.len() / 2;

            for k in 0..n {
                let (x, y) = (points[2 * k], points[2 * k + 1]);

                // Outgoing segment, falling back to the incoming one at the
                // tail. Single-point polylines get a zero normal.
                let (ax, ay, bx, by) = if k + 1 < n {
                    (x, y, points[2 * (k + 1)], points[2 * (k + 1) + 1])
                } else if k > 0 {
                    (points[2 * (k - 1)], points[2 * (k - 1) + 1], x, y)
                } else {
                    (x, y, x, y)
                };

                let (dx, dy) = (bx - ax, by - ay);
                let len = (dx * dx + dy * dy).sqrt();
                let (nx, ny) = if len > 0.0 { (-dy / len, dx / len) } else { (0.0, 0.0) };

                out.extend_from_slice(&[x, y, nx, ny]);
                out.extend_from_slice(&[x, y, -nx, -ny]);
            }
        }

        out
    }
}

/// Splits the flat vertex array into per-polyline float spans.
///
/// Offsets are clamped into range and forced even; an empty offset list means
/// one polyline covering everything.
fn polyline_spans(len: usize, index_offsets: &[i32]) -> Vec<(usize, usize)> {
    if index_offsets.is_empty() {
        return if len > 0 { vec![(0, len)] } else { Vec::new() };
    }

    let clamp = |o: i32| -> usize { (o.max(0) as usize).min(len) & !1 };

    let mut spans = Vec::with_capacity(index_offsets.len());
    for (i, &off) in index_offsets.iter().enumerate() {
        let start = clamp(off);
        let end = index_offsets.get(i + 1).map(|&e| clamp(e)).unwrap_or(len);
        if end > start {
            spans.push((start, end));
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_eight_values_per_source_vertex() {
        let r#gen = SegmentNormalGenerator;
        let vertices = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0];
        let out = r#gen.generate(&vertices, &[0]);
        assert_eq!(out.len(), 3 * VERTEX_DATA_ELEMENTS);
    }

    #[test]
    fn axis_aligned_segment_gets_unit_normals() {
        let r#gen = SegmentNormalGenerator;
        // Horizontal segment (0,0) → (2,0): normal is ±(0,1).
        let out = r#gen.generate(&[0.0, 0.0, 2.0, 0.0], &[0]);

        assert_eq!(&out[0..4], &[0.0, 0.0, 0.0, 1.0]);
        assert_eq!(&out[4..8], &[0.0, 0.0, 0.0, -1.0]);
        // Tail vertex reuses the incoming segment direction.
        assert_eq!(&out[8..12], &[2.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn splits_polylines_at_offsets() {
        let r#gen = SegmentNormalGenerator;
        // Two two-point polylines; the second is vertical.
        let vertices = [0.0, 0.0, 1.0, 0.0, 5.0, 5.0, 5.0, 7.0];
        let out = r#gen.generate(&vertices, &[0, 4]);

        assert_eq!(out.len(), 4 * VERTEX_DATA_ELEMENTS);
        // Vertical segment (5,5) → (5,7): normal is ±(-1,0).
        assert_eq!(&out[16..20], &[5.0, 5.0, -1.0, 0.0]);
    }

    #[test]
    fn single_point_polyline_gets_zero_normal() {
        let r#gen = SegmentNormalGenerator;
        let out = r#gen.generate(&[3.0, 4.0], &[0]);
        assert_eq!(out, vec![3.0, 4.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0]);
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        let r#gen = SegmentNormalGenerator;
        let out = r#gen.generate(&[0.0, 0.0, 1.0, 0.0], &[-2, 99]);
        assert_eq!(out.len(), 2 * VERTEX_DATA_ELEMENTS);
    }
}
