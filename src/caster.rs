//! DDA ray casting against the tile grid.

use std::f32::consts::FRAC_PI_4;

use crate::world::{Cell, GridMap, MAP_DEPTH};

/// Largest `f32` strictly below 1.0.
const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// One grid-line crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DdaStep {
    pub cell: [i32; 2], // (col, row) entered by this step
    pub distance: f32,  // ray length at the crossing
    pub axis: Axis,     // which grid line was crossed
}

/// Walks a ray through the grid one cell boundary at a time.
///
/// Callers stop the walk on a hit or at a depth limit; it only runs dry for
/// a zero direction.
pub struct DdaWalk {
    cell: [i32; 2],
    step: [i32; 2],
    unit: [f32; 2],   // ray length per full cell along each axis
    length: [f32; 2], // ray length to the next crossing along each axis
}

impl DdaWalk {
    pub fn new(origin: [f32; 2], dir: [f32; 2]) -> Self {
        let cell = [origin[0].floor() as i32, origin[1].floor() as i32];

        // sqrt(1 + (dy/dx)^2) is |1/dx| for a unit vector; a zero component
        // never crosses a line on that axis.
        let unit_x = if dir[0] == 0.0 {
            f32::INFINITY
        } else {
            (1.0 + (dir[1] / dir[0]).powi(2)).sqrt()
        };
        let unit_y = if dir[1] == 0.0 {
            f32::INFINITY
        } else {
            (1.0 + (dir[0] / dir[1]).powi(2)).sqrt()
        };

        let (step_x, len_x) = axis_start(origin[0], cell[0], dir[0], unit_x);
        let (step_y, len_y) = axis_start(origin[1], cell[1], dir[1], unit_y);

        Self {
            cell,
            step: [step_x, step_y],
            unit: [unit_x, unit_y],
            length: [len_x, len_y],
        }
    }

    #[inline]
    pub fn cell(&self) -> [i32; 2] {
        self.cell
    }
}

#[inline]
fn axis_start(origin: f32, cell: i32, dir: f32, unit: f32) -> (i32, f32) {
    if unit.is_infinite() {
        return (0, f32::INFINITY);
    }
    if dir < 0.0 {
        (-1, (origin - cell as f32) * unit)
    } else {
        (1, (cell as f32 + 1.0 - origin) * unit)
    }
}

impl Iterator for DdaWalk {
    type Item = DdaStep;

    fn next(&mut self) -> Option<DdaStep> {
        // Ties go to the Y axis.
        let axis = if self.length[0] < self.length[1] {
            Axis::X
        } else {
            Axis::Y
        };
        let i = match axis {
            Axis::X => 0,
            Axis::Y => 1,
        };

        let distance = self.length[i];
        if !distance.is_finite() {
            return None;
        }
        self.cell[i] += self.step[i];
        self.length[i] += self.unit[i];

        Some(DdaStep {
            cell: self.cell,
            distance,
            axis,
        })
    }
}

/// Result of casting one column's ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub hit: bool,
    pub distance: f32,
    pub cell: [i32; 2],
    /// Position along the struck face, always in `[0, 1)`.
    pub sample_x: f32,
}

impl RayHit {
    pub fn miss(cell: [i32; 2]) -> Self {
        Self {
            hit: false,
            distance: MAP_DEPTH,
            cell,
            sample_x: 0.0,
        }
    }

    /// True when a wall face was struck inside the depth limit.
    #[inline]
    pub fn textured(&self) -> bool {
        self.hit && self.distance < MAP_DEPTH
    }
}

/// Casts a ray from `origin` at `angle` and returns the nearest wall.
///
/// Leaving the grid counts as a hit at `MAP_DEPTH`. Running past
/// `MAP_DEPTH` without a wall is a miss.
pub fn cast_ray(map: &GridMap, origin: [f32; 2], angle: f32) -> RayHit {
    let (sin, cos) = angle.sin_cos();
    let dir = [cos, sin];

    let walk = DdaWalk::new(origin, dir);
    let mut last = walk.cell();

    for step in walk {
        last = step.cell;
        if step.distance >= MAP_DEPTH {
            break;
        }

        let [col, row] = step.cell;
        let Some(cell) = map.get(col, row) else {
            return RayHit {
                hit: true,
                distance: MAP_DEPTH,
                cell: step.cell,
                sample_x: 0.0,
            };
        };

        if cell == Cell::Wall {
            let point = [
                origin[0] + dir[0] * step.distance,
                origin[1] + dir[1] * step.distance,
            ];
            return RayHit {
                hit: true,
                distance: step.distance,
                cell: step.cell,
                sample_x: face_sample(point, step.cell),
            };
        }
    }

    RayHit::miss(last)
}

/// Texture coordinate along the face of `cell` containing `point`.
///
/// The angle from the cell centre to the point picks the face: within 45
/// degrees of +x or -x is a vertical face (sample along y), otherwise a
/// horizontal face (sample along x).
pub fn face_sample(point: [f32; 2], cell: [i32; 2]) -> f32 {
    let mid_x = cell[0] as f32 + 0.5;
    let mid_y = cell[1] as f32 + 0.5;
    let test_angle = (point[1] - mid_y).atan2(point[0] - mid_x);

    let vertical_face = (-FRAC_PI_4..FRAC_PI_4).contains(&test_angle)
        || !(-3.0 * FRAC_PI_4..3.0 * FRAC_PI_4).contains(&test_angle);

    let along = if vertical_face {
        point[1] - cell[1] as f32
    } else {
        point[0] - cell[0] as f32
    };
    along.clamp(0.0, BELOW_ONE)
}
