//! Owning game controller
//!
//! Host callbacks (pointer moves, clicks, resizes) only enqueue events. The
//! frame callback drains the queue in arrival order and then runs the
//! simulation, so every mutation of the state happens in one place.

use std::collections::VecDeque;

use glam::Vec2;

use crate::config::GameConfig;
use crate::sim::{FrameInput, GameEvent, GameMode, SimulationState, click, tick};
use crate::ui::{self, Overlay};

/// Input from the host environment, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vec2),
    Click(Vec2),
    Resized(Vec2),
}

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    state: SimulationState,
    viewport: Vec2,
    pointer: Option<Vec2>,
    queue: VecDeque<InputEvent>,
}

impl Game {
    pub fn new(config: GameConfig, viewport: Vec2) -> Self {
        let state = SimulationState::new(&config);
        Self {
            config,
            state,
            viewport,
            pointer: None,
            queue: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Queue host input for the next frame
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Number of events waiting for the next frame
    pub fn pending_input(&self) -> usize {
        self.queue.len()
    }

    /// Run one frame: apply queued input, then advance the simulation
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();

        while let Some(input) = self.queue.pop_front() {
            match input {
                InputEvent::PointerMoved(p) => self.pointer = Some(p),
                InputEvent::Resized(size) => {
                    log::debug!("Viewport resized to {}x{}", size.x, size.y);
                    self.viewport = size;
                }
                InputEvent::Click(p) => {
                    self.pointer = Some(p);
                    let at = ui::screen_centered(p, self.viewport);
                    if let Some(event) = click(&mut self.state, &self.config, at) {
                        events.push(event);
                    }
                }
            }
        }

        let input = FrameInput {
            pointer: self.pointer,
            viewport: self.viewport,
            now_ms,
        };
        events.extend(tick(&mut self.state, &self.config, &input));
        events
    }

    /// Whether the pointer is over the Play/Restart button while it is shown
    pub fn button_hovered(&self) -> bool {
        self.state.mode != GameMode::Playing
            && self
                .pointer
                .map(|p| self.config.button.contains(ui::screen_centered(p, self.viewport)))
                .unwrap_or(false)
    }

    /// Overlay for the current frame
    pub fn overlay(&self) -> Overlay {
        ui::overlay(
            self.state.mode,
            self.state.score,
            &self.config,
            self.button_hovered(),
        )
    }
}
