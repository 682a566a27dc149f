use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

use crate::camera::Player;
use crate::caster::{RayHit, cast_ray};
use crate::framebuffer::{FrameBuffer, write_pixel};
use crate::shader::{ColumnSpan, FloorStyle, shade_pixel};
use crate::texture::WallTexture;
use crate::world::GridMap;

/// Casts one ray per screen column.
pub fn cast_columns(map: &GridMap, player: &Player, width: usize) -> Vec<RayHit> {
    (0..width)
        .into_par_iter()
        .map(|x| cast_ray(map, player.pos, player.ray_angle(x, width)))
        .collect()
}

/// Renders a whole frame. Every pixel is overwritten.
pub fn render_frame(
    fb: &mut FrameBuffer,
    map: &GridMap,
    player: &Player,
    texture: &WallTexture,
    floor: FloorStyle,
) {
    let width = fb.width();
    let height = fb.height();
    if width == 0 || height == 0 {
        return;
    }

    let hits = cast_columns(map, player, width);
    let spans: Vec<ColumnSpan> = hits.iter().map(|hit| ColumnSpan::new(hit, height)).collect();

    // Rows are disjoint slices of the buffer, so they shade in parallel.
    fb.par_rows_mut()
        .enumerate()
        .for_each(|(y, row)| {
            for (x, (hit, span)) in hits.iter().zip(&spans).enumerate() {
                let color = shade_pixel(y, height, *span, hit, texture, floor);
                write_pixel(row, x * 4, color);
            }
        });
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_4;

    use super::*;
    use crate::framebuffer::Rgba;
    use crate::shader::{CEILING_COLOR, FLOOR_COLOR, shade_column};

    #[test]
    fn parallel_frame_matches_column_shading() {
        let map = GridMap::default_room();
        let player = Player::new([8.0, 8.0], 0.7, FRAC_PI_4);
        let texture = WallTexture::brick(32);

        let mut fb = FrameBuffer::new(64, 48);
        render_frame(&mut fb, &map, &player, &texture, FloorStyle::Gradient);

        let mut expected = FrameBuffer::new(64, 48);
        for (x, hit) in cast_columns(&map, &player, 64).iter().enumerate() {
            shade_column(&mut expected, x, hit, &texture, FloorStyle::Gradient);
        }
        assert_eq!(fb.as_bytes(), expected.as_bytes());
    }

    #[test]
    fn frame_has_ceiling_on_top_and_floor_below() {
        let map = GridMap::default_room();
        let player = Player::new([8.0, 8.0], 0.0, FRAC_PI_4);
        let texture = WallTexture::brick(32);
        let mut fb = FrameBuffer::new(32, 100);
        render_frame(&mut fb, &map, &player, &texture, FloorStyle::default());

        for x in 0..32 {
            assert_eq!(fb.pixel(x, 0), CEILING_COLOR);
            assert_eq!(fb.pixel(x, 99), FLOOR_COLOR);
        }
        assert!(fb.as_bytes().chunks(4).all(|px| px[3] == 255));
        assert_ne!(fb.pixel(16, 50), Rgba::BLACK);
    }
}
