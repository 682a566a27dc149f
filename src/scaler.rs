use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::framebuffer::FrameBuffer;

/// Precomputed mapping from window pixels to frame-buffer neighbours + weights.
pub struct ScaleLut {
    x0: Vec<usize>,
    x1: Vec<usize>,
    wx: Vec<u16>,
    y0: Vec<usize>,
    y1: Vec<usize>,
    wy: Vec<u16>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            x0: Vec::new(),
            x1: Vec::new(),
            wx: Vec::new(),
            y0: Vec::new(),
            y1: Vec::new(),
            wy: Vec::new(),
        }
    }

    #[inline]
    pub fn dst_size(&self) -> (usize, usize) {
        (self.x0.len(), self.y0.len())
    }
}

fn axis_lut(dst: usize, src: usize) -> (Vec<usize>, Vec<usize>, Vec<u16>) {
    let mut i0 = vec![0; dst];
    let mut i1 = vec![0; dst];
    let mut w = vec![0; dst];
    let scale = src as f32 / dst as f32;
    let last = src.saturating_sub(1) as isize;

    for d in 0..dst {
        let f = d as f32 * scale;
        let a = (f.floor() as isize).clamp(0, last);
        let b = (a + 1).clamp(0, last);
        i0[d] = a as usize;
        i1[d] = b as usize;
        w[d] = ((f - a as f32) * 256.0).round().clamp(0.0, 256.0) as u16; // fixed-point 8.8
    }
    (i0, i1, w)
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    let (x0, x1, wx) = axis_lut(dst_w, src_w);
    let (y0, y1, wy) = axis_lut(dst_h, src_h);
    ScaleLut {
        x0,
        x1,
        wx,
        y0,
        y1,
        wy,
    }
}

#[inline]
fn lerp_color_u32(a: u32, b: u32, w256: u32) -> u32 {
    // w256 in [0, 256]; inv = 256 - w256
    let inv = 256 - w256;
    // R and B together (00RR00BB), G separately (0000GG00)
    let rb = (((a & 0x00FF00FF) * inv + (b & 0x00FF00FF) * w256) >> 8) & 0x00FF00FF;
    let g = (((a & 0x0000FF00) * inv + (b & 0x0000FF00) * w256) >> 8) & 0x0000FF00;
    rb | g
}

/// Bilinear stretch of the RGBA frame into a 0RGB window surface.
/// Rows are processed in parallel.
pub fn blit_bilinear_stretch(dst: &mut [u32], dw: usize, src: &FrameBuffer, lut: &ScaleLut) {
    let sw = src.width();
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let Some(&y0) = lut.y0.get(y) else {
            return;
        };
        let y1 = lut.y1[y];
        let wy = lut.wy[y] as u32;
        let row0 = y0 * sw;
        let row1 = y1 * sw;

        for (x, out) in dst_row.iter_mut().enumerate().take(lut.x0.len()) {
            let x0 = lut.x0[x];
            let x1 = lut.x1[x];
            let wx = lut.wx[x] as u32;

            let top = lerp_color_u32(src.rgb_at(row0 + x0), src.rgb_at(row0 + x1), wx);
            let bot = lerp_color_u32(src.rgb_at(row1 + x0), src.rgb_at(row1 + x1), wx);
            *out = lerp_color_u32(top, bot, wy);
        }
    });
}
