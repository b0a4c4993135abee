//! Frame-driven Asteroids simulation: ship, bullets, asteroids, UFOs,
//! power-ups and effects, advanced one frame at a time by [`game::World::step`].
//! Drawing, audio playback and key capture live outside the core.

pub mod audio;
pub mod collisions;
pub mod constants;
pub mod entities;
pub mod game;
pub mod highscore;
pub mod input;
pub mod rendering;
pub mod spawner;
pub mod terminal_io;
pub mod types;
pub mod upgrades;

pub use game::{FrameReport, FrameStatus, Stage, World, FRAME_STAGES};
pub use input::{InputState, Key};
