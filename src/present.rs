use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed source column/row for every destination pixel
#[derive(Debug, Clone, Default)]
pub struct StretchLut {
    src_x: Vec<usize>,
    src_y: Vec<usize>,
}

impl StretchLut {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Self {
        Self {
            src_x: nearest_axis(dst_w, src_w),
            src_y: nearest_axis(dst_h, src_h),
        }
    }

    pub fn dst_size(&self) -> (usize, usize) {
        (self.src_x.len(), self.src_y.len())
    }
}

fn nearest_axis(dst: usize, src: usize) -> Vec<usize> {
    if src == 0 {
        return vec![0; dst];
    }
    let s = src as f32 / dst.max(1) as f32;
    (0..dst)
        .map(|d| (((d as f32 + 0.5) * s) as usize).min(src - 1))
        .collect()
}

/// Parallel nearest-neighbour stretch. Hard column edges stay hard.
pub fn blit_nearest(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &StretchLut) {
    if dw == 0 {
        return;
    }
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let Some(&sy) = lut.src_y.get(y) else {
            return;
        };
        let src_row = &src[sy * sw..(sy + 1) * sw];
        for (d, &sx) in dst_row.iter_mut().zip(lut.src_x.iter()) {
            *d = src_row[sx];
        }
    });
}
