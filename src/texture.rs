use std::path::Path;

use crate::error::TextureError;
use crate::framebuffer::{Rgba, read_pixel};

pub const WALL_TEXTURE_SIZE: u32 = 160;

/// Square RGBA8 wall image, read-only once loaded.
pub struct WallTexture {
    pixels: Vec<u8>,
    size: usize,
}

impl WallTexture {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TextureError> {
        if width != height {
            return Err(TextureError::NotSquare { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TextureError::BufferSize {
                expected,
                found: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            size: width as usize,
        })
    }

    /// Decodes an image file; RGB sources gain an opaque alpha channel.
    pub fn load(path: &Path) -> Result<Self, TextureError> {
        let image = image::open(path)
            .map_err(|source| TextureError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Self::from_rgba(width, height, image.into_raw())
    }

    /// Procedural running-bond brick pattern.
    pub fn brick(size: u32) -> Self {
        let brick_w = (size / 4).max(2);
        let brick_h = (size / 8).max(2);
        let mut pixels = Vec::with_capacity(size as usize * size as usize * 4);

        for y in 0..size {
            for x in 0..size {
                let row = y / brick_h;
                let offset = if row % 2 == 0 { 0 } else { brick_w / 2 };
                let bx = (x + offset) % brick_w;
                let by = y % brick_h;

                let color = if bx < 2 || by < 2 {
                    Rgba::opaque(48, 46, 42)
                } else {
                    let brick_id = (row * 13 + ((x + offset) / brick_w) * 29) & 0xFF;
                    let v = (140 + (brick_id & 0x3F)).min(255) as u8;
                    Rgba::opaque(v, (v as f32 * 0.55) as u8, (v as f32 * 0.4) as u8)
                };
                pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
            }
        }

        Self {
            pixels,
            size: size as usize,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Texel at `(x, y)`, or opaque black outside the image.
    #[inline]
    pub fn pixel(&self, x: i64, y: i64) -> Rgba {
        let size = self.size as i64;
        if x < 0 || x >= size || y < 0 || y >= size {
            return Rgba::BLACK;
        }
        read_pixel(&self.pixels, ((y * size + x) * 4) as usize)
    }

    /// Nearest-neighbour lookup for normalised coordinates.
    #[inline]
    pub fn sample(&self, sample_x: f32, sample_y: f32) -> Rgba {
        let size = self.size as f32;
        let px = (sample_x * size).floor() as i64;
        let py = (sample_y * size - 1.0).floor() as i64;
        self.pixel(px, py)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(size: u32) -> WallTexture {
        let mut pixels = Vec::new();
        for y in 0..size {
            for x in 0..size {
                pixels.extend_from_slice(&[x as u8, y as u8, 7, 255]);
            }
        }
        WallTexture::from_rgba(size, size, pixels).unwrap()
    }

    #[test]
    fn centre_sample_uses_nearest_texel() {
        let tex = gradient(160);
        assert_eq!(tex.sample(0.5, 0.5), Rgba::opaque(80, 79, 7));
    }

    #[test]
    fn sample_outside_image_is_black() {
        let tex = gradient(16);
        // sample_y of 0 lands on row -1
        assert_eq!(tex.sample(0.5, 0.0), Rgba::BLACK);
        assert_eq!(tex.sample(1.0, 0.5), Rgba::BLACK);
        assert_eq!(tex.sample(-0.1, 0.5), Rgba::BLACK);
        assert_eq!(tex.sample(0.0, 1.0), Rgba::opaque(0, 15, 7));
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(matches!(
            WallTexture::from_rgba(4, 2, vec![0; 32]),
            Err(TextureError::NotSquare { width: 4, height: 2 })
        ));
        assert!(matches!(
            WallTexture::from_rgba(2, 2, vec![0; 15]),
            Err(TextureError::BufferSize {
                expected: 16,
                found: 15
            })
        ));
    }

    #[test]
    fn brick_has_mortar_lines() {
        let tex = WallTexture::brick(WALL_TEXTURE_SIZE);
        assert_eq!(tex.size(), 160);
        assert_eq!(tex.pixel(0, 0), Rgba::opaque(48, 46, 42));
        assert_ne!(tex.pixel(10, 10), Rgba::opaque(48, 46, 42));
    }

    fn temp_png(name: &str, width: u32, height: u32, rgb: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "raycaster-{name}-{}.png",
            std::process::id()
        ));
        image::save_buffer(&path, rgb, width, height, image::ExtendedColorType::Rgb8).unwrap();
        path
    }

    #[test]
    fn loads_rgb_png_with_opaque_alpha() {
        let size = 4;
        let mut rgb = Vec::new();
        for y in 0..size {
            for x in 0..size {
                rgb.extend_from_slice(&[x as u8 * 60, y as u8 * 60, 200]);
            }
        }
        let path = temp_png("wall", size, size, &rgb);
        let loaded = WallTexture::load(&path);
        std::fs::remove_file(&path).unwrap();

        let tex = loaded.unwrap();
        assert_eq!(tex.size(), 4);
        assert_eq!(tex.pixel(0, 0), Rgba::opaque(0, 0, 200));
        assert_eq!(tex.pixel(3, 1), Rgba::opaque(180, 60, 200));
        assert_eq!(tex.pixel(2, 3), Rgba::opaque(120, 180, 200));
        assert!(tex.pixels.chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn non_square_image_file_is_rejected() {
        let path = temp_png("wide", 4, 2, &[90; 4 * 2 * 3]);
        let loaded = WallTexture::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            loaded,
            Err(TextureError::NotSquare { width: 4, height: 2 })
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = WallTexture::load(Path::new("does/not/exist.png")).err().unwrap();
        assert!(matches!(err, TextureError::Decode { .. }));
    }
}
