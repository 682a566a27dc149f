use std::time::Duration;

use log::info;

use crate::camera::Player;
use crate::config::Config;
use crate::error::EngineError;
use crate::framebuffer::FrameBuffer;
use crate::movement::{HeldActions, Movement};
use crate::renderer::render_frame;
use crate::shader::FloorStyle;
use crate::texture::{WALL_TEXTURE_SIZE, WallTexture};
use crate::world::GridMap;

/// Longest step fed to movement in one frame.
pub const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// Everything that lives for the whole session.
pub struct GameState {
    pub map: GridMap,
    pub player: Player,
    pub movement: Movement,
    pub texture: WallTexture,
    pub floor: FloorStyle,
    pub sensitivity: f32,
}

impl GameState {
    pub fn new(map: GridMap, texture: WallTexture, config: &Config) -> Result<Self, EngineError> {
        let start = map.spawn_point()?;
        Ok(Self {
            map,
            player: Player::new(start, 0.0, config.fov.to_radians()),
            movement: Movement::new(config.speed),
            texture,
            floor: config.floor.into(),
            sensitivity: config.sensitivity,
        })
    }

    /// Loads the map and wall texture named in `config`, falling back to the
    /// built-in room and a generated brick texture.
    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        config.validate()?;

        let map = match &config.map {
            Some(path) => GridMap::load(path)?,
            None => GridMap::default_room(),
        };
        info!("map {}x{}", map.width(), map.height());

        let texture = match &config.texture {
            Some(path) => {
                let texture = WallTexture::load(path)?;
                info!("wall texture {} ({}px)", path.display(), texture.size());
                texture
            }
            None => {
                info!("wall texture: generated brick ({WALL_TEXTURE_SIZE}px)");
                WallTexture::brick(WALL_TEXTURE_SIZE)
            }
        };

        Self::new(map, texture, config)
    }

    /// Advances one frame: mouse-look first, then held movement, both over
    /// the same elapsed time.
    pub fn tick(&mut self, elapsed: Duration, mouse_dx: f32, held: &HeldActions) {
        let dt = elapsed.min(MAX_FRAME_STEP).as_secs_f32();
        self.player.apply_look(mouse_dx, dt, self.sensitivity);
        self.movement.update(&mut self.player, held, &self.map, dt);
    }

    pub fn render(&self, fb: &mut FrameBuffer) {
        render_frame(fb, &self.map, &self.player, &self.texture, self.floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::Action;

    fn game() -> GameState {
        GameState::from_config(&Config::default()).unwrap()
    }

    #[test]
    fn starts_in_the_middle_of_the_room() {
        let game = game();
        assert_eq!(game.player.pos, [8.0, 8.0]);
        assert_eq!(game.player.angle, 0.0);
        assert!((game.player.fov - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert_eq!(game.texture.size(), 160);
    }

    #[test]
    fn tick_caps_long_frames() {
        let mut game = game();
        let mut held = HeldActions::default();
        held.set(Action::MoveForward, true);
        game.tick(Duration::from_secs(5), 0.0, &held);
        // 4 cells/s over at most 100 ms
        assert!((game.player.pos[0] - 8.4).abs() < 1e-4);
    }

    #[test]
    fn tick_applies_mouse_look() {
        let mut game = game();
        game.tick(Duration::from_millis(50), 10.0, &HeldActions::default());
        assert!((game.player.angle - 10.0 * 0.04 * 0.05).abs() < 1e-6);
        assert_eq!(game.player.pos, [8.0, 8.0]);
    }

    #[test]
    fn missing_map_file_is_fatal() {
        let mut config = Config::default();
        config.map = Some("no/such/map.txt".into());
        assert!(matches!(
            GameState::from_config(&config),
            Err(EngineError::Map(_))
        ));
    }
}
