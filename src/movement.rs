use crate::camera::Player;
use crate::world::GridMap;

/// Logical movement actions, independent of the physical key layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
}

impl Action {
    /// Order in which held actions are applied within one frame.
    pub const ALL: [Action; 4] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::StrafeLeft,
        Action::StrafeRight,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Unit direction for this action when facing `angle`.
    #[inline]
    pub fn direction(self, angle: f32) -> [f32; 2] {
        let (s, c) = angle.sin_cos();
        match self {
            Action::MoveForward => [c, s],
            Action::MoveBackward => [-c, -s],
            Action::StrafeLeft => [s, -c],
            Action::StrafeRight => [-s, c],
        }
    }
}

/// Which actions are currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldActions([bool; 4]);

impl HeldActions {
    #[inline]
    pub fn set(&mut self, action: Action, held: bool) {
        self.0[action.index()] = held;
    }

    #[inline]
    pub fn is_held(&self, action: Action) -> bool {
        self.0[action.index()]
    }

    pub fn clear(&mut self) {
        self.0 = [false; 4];
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|&a| self.is_held(a))
    }
}

pub struct Movement {
    pub speed: f32, // map units per second
}

impl Movement {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// Moves the player one step along `action`, then undoes the whole step
    /// if the new cell is solid. No sliding along walls.
    pub fn apply_movement(&self, player: &mut Player, action: Action, map: &GridMap, elapsed: f32) {
        let step = self.speed * elapsed;
        let dir = action.direction(player.angle);
        let before = player.pos;

        player.pos[0] += dir[0] * step;
        player.pos[1] += dir[1] * step;

        // column from x, row from y
        let col = player.pos[0].floor() as i32;
        let row = player.pos[1].floor() as i32;
        if map.is_wall(col, row) {
            player.pos = before;
        }
    }

    /// Applies every held action in turn; each is checked on its own, so
    /// diagonal input compounds.
    pub fn update(&self, player: &mut Player, held: &HeldActions, map: &GridMap, elapsed: f32) {
        for action in held.iter() {
            self.apply_movement(player, action, map, elapsed);
        }
    }
}
