use rayon::slice::{ChunksMut, ParallelSliceMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);

    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// 0RGB in a `u32`, the layout softbuffer presents.
    #[inline]
    pub fn to_0rgb(self) -> u32 {
        (self.b as u32) | ((self.g as u32) << 8) | ((self.r as u32) << 16)
    }
}

/// Linear RGBA8 buffer, `width * height * 4` bytes, row-major.
pub struct FrameBuffer {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Writes one pixel with alpha forced to 255. Out-of-range writes are dropped.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        if x < self.width && y < self.height {
            write_pixel(&mut self.pixels, (y * self.width + x) * 4, color);
        }
    }

    /// Disjoint rows of `width * 4` bytes for parallel writers; address a
    /// pixel in a row with `write_pixel(row, x * 4, color)`.
    #[inline]
    pub fn par_rows_mut(&mut self) -> ChunksMut<'_, u8> {
        let stride = (self.width * 4).max(1);
        self.pixels.par_chunks_mut(stride)
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::BLACK;
        }
        read_pixel(&self.pixels, (y * self.width + x) * 4)
    }

    /// Pixel at linear index `i` packed as 0RGB.
    #[inline]
    pub fn rgb_at(&self, i: usize) -> u32 {
        read_pixel(&self.pixels, i * 4).to_0rgb()
    }
}

#[inline]
pub fn write_pixel(bytes: &mut [u8], index: usize, color: Rgba) {
    bytes[index] = color.r;
    bytes[index + 1] = color.g;
    bytes[index + 2] = color.b;
    bytes[index + 3] = 255;
}

#[inline]
pub fn read_pixel(bytes: &[u8], index: usize) -> Rgba {
    Rgba {
        r: bytes[index],
        g: bytes[index + 1],
        b: bytes[index + 2],
        a: bytes[index + 3],
    }
}
