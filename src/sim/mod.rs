//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One call to `tick` per displayed frame
//! - Time only enters through the caller's clock
//! - No rendering or platform dependencies

pub mod collision;
pub mod schedule;
pub mod state;
pub mod tick;

pub use collision::{DepthExit, clamp_paddle, depth_exit, paddle_covers, wall_overlap};
pub use schedule::{ScheduledTransition, apply_due, schedule};
pub use state::{Axis, Ball, GameEvent, GameMode, Paddle, SimulationState};
pub use tick::{FrameInput, click, tick, update_paddle};
