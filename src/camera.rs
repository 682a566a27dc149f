pub struct Player {
    pub pos: [f32; 2], // (x, y) position in map space
    pub angle: f32,    // radians, never wrapped
    pub fov: f32,      // horizontal field of view in radians
}

impl Player {
    pub fn new(pos: [f32; 2], angle: f32, fov: f32) -> Self {
        Self { pos, angle, fov }
    }

    /// Mouse-look. The angle accumulates without normalisation; every
    /// consumer goes through sin/cos so any real value is fine.
    #[inline]
    pub fn apply_look(&mut self, delta_x: f32, elapsed: f32, sensitivity: f32) {
        self.angle += delta_x * sensitivity * elapsed;
    }

    /// Angle of the ray through screen column `col` of `width`.
    #[inline]
    pub fn ray_angle(&self, col: usize, width: usize) -> f32 {
        (self.angle - self.fov / 2.0) + (col as f32 / width as f32) * self.fov
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_4;

    use super::*;

    #[test]
    fn look_accumulates_without_wrapping() {
        let mut player = Player::new([8.0, 8.0], 0.0, FRAC_PI_4);
        for _ in 0..1000 {
            player.apply_look(100.0, 0.016, 0.04);
        }
        assert!(player.angle > std::f32::consts::TAU);
    }

    #[test]
    fn zero_elapsed_leaves_angle_alone() {
        let mut player = Player::new([8.0, 8.0], 1.25, FRAC_PI_4);
        player.apply_look(350.0, 0.0, 0.04);
        assert_eq!(player.angle, 1.25);
    }

    #[test]
    fn ray_angles_span_the_fov() {
        let player = Player::new([0.0, 0.0], 1.0, FRAC_PI_4);
        assert_eq!(player.ray_angle(0, 640), 1.0 - FRAC_PI_4 / 2.0);
        assert!((player.ray_angle(320, 640) - 1.0).abs() < 1e-6);
    }
}
