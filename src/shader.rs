//! Per-column shading: ceiling fill, textured wall slab, floor.

use crate::caster::RayHit;
use crate::framebuffer::{FrameBuffer, Rgba};
use crate::texture::WallTexture;

pub const CEILING_COLOR: Rgba = Rgba::BLACK;
pub const FLOOR_COLOR: Rgba = Rgba::opaque(0, 80, 0);

const MIN_CEILING: f32 = -16_777_216.0;

/// Floor bands from nearest (bottom of screen) to the horizon.
const FLOOR_BANDS: [Rgba; 5] = [
    Rgba::opaque(0, 120, 0),
    Rgba::opaque(0, 96, 0),
    Rgba::opaque(0, 72, 0),
    Rgba::opaque(0, 48, 0),
    Rgba::opaque(0, 24, 0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorStyle {
    Flat(Rgba),
    Gradient,
}

impl Default for FloorStyle {
    fn default() -> Self {
        FloorStyle::Flat(FLOOR_COLOR)
    }
}

impl FloorStyle {
    #[inline]
    fn color(self, y: usize, height: usize) -> Rgba {
        match self {
            FloorStyle::Flat(color) => color,
            FloorStyle::Gradient => {
                let half = height as f32 / 2.0;
                let b = 1.0 - (y as f32 - half) / half;
                let band = if b < 0.25 {
                    0
                } else if b < 0.5 {
                    1
                } else if b < 0.75 {
                    2
                } else if b < 0.9 {
                    3
                } else {
                    4
                };
                FLOOR_BANDS[band]
            }
        }
    }
}

/// Screen rows bounding the wall slab of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub ceiling: i32,
    pub floor: i32,
}

impl ColumnSpan {
    /// Slab for `hit` on a screen `height` rows tall. Nearer walls give a
    /// smaller `ceiling`; a miss collapses to the horizon. `floor` is always
    /// `height - ceiling`.
    pub fn new(hit: &RayHit, height: usize) -> Self {
        let h = height as f32;
        let ceiling = if hit.hit {
            let distance = hit.distance.max(f32::MIN_POSITIVE);
            // keeps `height - ceiling` inside i32 for walls at point-blank range
            (h / 2.0 - h / distance).max(MIN_CEILING) as i32
        } else {
            (h / 2.0) as i32
        };
        Self {
            ceiling,
            floor: height as i32 - ceiling,
        }
    }

    #[inline]
    pub fn wall_rows(&self) -> i32 {
        (self.floor - self.ceiling).max(0)
    }
}

/// Colour of row `y` in a column described by `span` and `hit`. A miss
/// has no wall band: rows below the ceiling are floor.
#[inline]
pub fn shade_pixel(
    y: usize,
    height: usize,
    span: ColumnSpan,
    hit: &RayHit,
    texture: &WallTexture,
    floor: FloorStyle,
) -> Rgba {
    let yi = y as i32;
    if yi <= span.ceiling {
        CEILING_COLOR
    } else if hit.hit && yi <= span.floor {
        if hit.textured() {
            let sample_y = (yi - span.ceiling) as f32 / (span.floor - span.ceiling) as f32;
            texture.sample(hit.sample_x, sample_y)
        } else {
            Rgba::BLACK
        }
    } else {
        floor.color(y, height)
    }
}

/// Shades every row of column `x` one pixel at a time. `render_frame`
/// writes the same pixels row-parallel; this is the single-column path.
pub fn shade_column(
    fb: &mut FrameBuffer,
    x: usize,
    hit: &RayHit,
    texture: &WallTexture,
    floor: FloorStyle,
) {
    let height = fb.height();
    let span = ColumnSpan::new(hit, height);
    for y in 0..height {
        let color = shade_pixel(y, height, span, hit, texture, floor);
        fb.set_pixel(x, y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::MAP_DEPTH;

    fn hit_at(distance: f32) -> RayHit {
        RayHit {
            hit: true,
            distance,
            cell: [0, 0],
            sample_x: 0.5,
        }
    }

    fn solid(color: Rgba, size: u32) -> WallTexture {
        let px = [color.r, color.g, color.b, color.a];
        WallTexture::from_rgba(size, size, px.repeat((size * size) as usize)).unwrap()
    }

    #[test]
    fn span_is_symmetric() {
        for d in [0.5, 1.0, 2.0, 7.0, 15.9] {
            let span = ColumnSpan::new(&hit_at(d), 720);
            assert_eq!(span.ceiling + span.floor, 720);
        }
    }

    #[test]
    fn distance_seven_on_720_rows() {
        let span = ColumnSpan::new(&hit_at(7.0), 720);
        // 360 - 102.857
        assert_eq!(span.ceiling, 257);
        assert_eq!(span.floor, 463);
    }

    #[test]
    fn zero_distance_does_not_panic() {
        let span = ColumnSpan::new(&hit_at(0.0), 100);
        assert!(span.ceiling < 0);
        assert!(span.floor > 100);
    }

    #[test]
    fn column_bands_in_order() {
        let tex = solid(Rgba::opaque(200, 10, 10), 16);
        let mut fb = FrameBuffer::new(1, 100);
        let hit = hit_at(4.0);
        shade_column(&mut fb, 0, &hit, &tex, FloorStyle::default());

        let span = ColumnSpan::new(&hit, 100);
        assert_eq!((span.ceiling, span.floor), (25, 75));
        assert_eq!(fb.pixel(0, 25), CEILING_COLOR);
        assert_eq!(fb.pixel(0, 50), Rgba::opaque(200, 10, 10));
        assert_eq!(fb.pixel(0, 75), Rgba::opaque(200, 10, 10));
        assert_eq!(fb.pixel(0, 76), FLOOR_COLOR);
    }

    #[test]
    fn max_depth_wall_is_flat_black() {
        let tex = solid(Rgba::opaque(200, 10, 10), 16);
        let hit = RayHit {
            hit: true,
            distance: MAP_DEPTH,
            cell: [16, 0],
            sample_x: 0.0,
        };
        let span = ColumnSpan::new(&hit, 100);
        let mid = shade_pixel(50, 100, span, &hit, &tex, FloorStyle::default());
        assert_eq!(mid, Rgba::BLACK);
    }

    #[test]
    fn miss_has_no_wall_band() {
        let tex = solid(Rgba::opaque(200, 10, 10), 16);
        let hit = RayHit::miss([0, 0]);
        let span = ColumnSpan::new(&hit, 100);
        assert_eq!((span.ceiling, span.floor), (50, 50));
        assert_eq!(shade_pixel(50, 100, span, &hit, &tex, FloorStyle::default()), CEILING_COLOR);
        assert_eq!(shade_pixel(51, 100, span, &hit, &tex, FloorStyle::default()), FLOOR_COLOR);
    }

    #[test]
    fn miss_on_odd_height_keeps_floor_mirrored() {
        let tex = solid(Rgba::opaque(200, 10, 10), 16);
        let hit = RayHit::miss([0, 0]);
        let mut fb = FrameBuffer::new(1, 101);
        shade_column(&mut fb, 0, &hit, &tex, FloorStyle::default());

        let span = ColumnSpan::new(&hit, 101);
        assert_eq!((span.ceiling, span.floor), (50, 51));
        assert_eq!(span.ceiling + span.floor, 101);
        for y in 0..=50 {
            assert_eq!(fb.pixel(0, y), CEILING_COLOR);
        }
        for y in 51..101 {
            assert_eq!(fb.pixel(0, y), FLOOR_COLOR);
        }
    }

    #[test]
    fn gradient_floor_darkens_toward_horizon() {
        let style = FloorStyle::Gradient;
        assert_eq!(style.color(99, 100), FLOOR_BANDS[0]);
        assert_eq!(style.color(80, 100), FLOOR_BANDS[1]);
        assert_eq!(style.color(70, 100), FLOOR_BANDS[2]);
        assert_eq!(style.color(60, 100), FLOOR_BANDS[3]);
        assert_eq!(style.color(51, 100), FLOOR_BANDS[4]);
    }
}
