//! Software raycaster: fixed-step ray marching over an occupancy grid,
//! textured wall columns and depth-tested billboard sprites.

pub mod camera;
pub mod color;
pub mod config;
pub mod controls;
pub mod depth;
pub mod error;
pub mod framebuffer;
pub mod level;
pub mod map;
pub mod projector;
pub mod raymarch;
pub mod renderer;
pub mod scaler;
pub mod shader;
pub mod sprites;
pub mod texture;
pub mod world;

pub use camera::Camera;
pub use color::Color;
pub use config::RenderConfig;
pub use depth::DepthBuffer;
pub use error::{SetupError, SetupResult};
pub use framebuffer::{FrameBuffer, PixelSink};
pub use level::Level;
pub use map::{Cell, OccupancyMap};
pub use renderer::{FrameStats, RenderContext, Renderer, render_frame};
pub use sprites::WorldObject;
pub use texture::{Sampler, Texture};
pub use world::World;
