//! Grid raycaster: DDA ray casting, textured wall columns and a software
//! RGBA frame buffer.

pub mod camera;
pub mod caster;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod game;
pub mod input;
pub mod movement;
pub mod renderer;
pub mod scaler;
pub mod shader;
pub mod texture;
pub mod world;
