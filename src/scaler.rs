use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed mapping from dest pixels to the nearest src pixel
pub struct BlockLut {
    sx: Vec<usize>,
    sy: Vec<usize>,
}

impl BlockLut {
    pub fn empty() -> Self {
        Self {
            sx: Vec::new(),
            sy: Vec::new(),
        }
    }

    pub fn dst_width(&self) -> usize {
        self.sx.len()
    }

    pub fn dst_height(&self) -> usize {
        self.sy.len()
    }
}

pub fn build_block_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> BlockLut {
    if src_w == 0 || src_h == 0 {
        return BlockLut::empty();
    }
    let sx = (0..dst_w)
        .map(|x| (x * src_w / dst_w).min(src_w - 1))
        .collect();
    let sy = (0..dst_h)
        .map(|y| (y * src_h / dst_h).min(src_h - 1))
        .collect();
    BlockLut { sx, sy }
}

/// Parallel nearest-neighbour stretch.
/// Rows are processed in parallel for cache friendly writes
pub fn blit_nearest(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &BlockLut) {
    if dw == 0 {
        return;
    }
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let Some(&sy) = lut.sy.get(y) else {
            return;
        };
        let src_row = &src[sy * sw..(sy + 1) * sw];
        for (d, &sx) in dst_row.iter_mut().zip(&lut.sx) {
            *d = src_row[sx];
        }
    });
}
