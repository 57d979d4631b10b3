#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Unit plane centred on the origin in the XY plane, `segments` quads per side.
///
/// UVs follow GL convention: `v = 0` at the bottom edge, matching the field's
/// bottom-up row order.
pub fn plane_geometry(segments: u32) -> (Vec<PlaneVertex>, Vec<u32>) {
    let s = segments.max(1);
    let stride = s + 1;
    let mut vertices = Vec::with_capacity((stride * stride) as usize);
    for row in 0..stride {
        let v = row as f32 / s as f32;
        for col in 0..stride {
            let u = col as f32 / s as f32;
            vertices.push(PlaneVertex {
                position: [u - 0.5, v - 0.5, 0.0],
                uv: [u, v],
            });
        }
    }
    let mut indices = Vec::with_capacity((s * s * 6) as usize);
    for row in 0..s {
        for col in 0..s {
            let a = row * stride + col;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            indices.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_counts_and_bounds() {
        let (v, i) = plane_geometry(4);
        assert_eq!(v.len(), 25);
        assert_eq!(i.len(), 4 * 4 * 6);
        assert!(i.iter().all(|&ix| (ix as usize) < v.len()));
        assert_eq!(v[0].position, [-0.5, -0.5, 0.0]);
        assert_eq!(v[0].uv, [0.0, 0.0]);
        assert_eq!(v[24].position, [0.5, 0.5, 0.0]);
        assert_eq!(v[24].uv, [1.0, 1.0]);
    }

    #[test]
    fn zero_segments_still_yield_a_quad() {
        let (v, i) = plane_geometry(0);
        assert_eq!(v.len(), 4);
        assert_eq!(i.len(), 6);
    }
}
