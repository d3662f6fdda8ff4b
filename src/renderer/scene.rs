//! Per-frame scene drawing: box, paddle, ball, then mode UI

use glam::Vec3;

use super::vertex::colors;
use super::{DrawTarget, Stroke};
use crate::config::GameConfig;
use crate::sim::SimulationState;
use crate::ui;

/// Box outline
const BOX_STROKE: Stroke = Stroke::new(colors::BOX, 1.0);
/// Paddle outline, drawn heavy so it reads as a solid frame
const PADDLE_STROKE: Stroke = Stroke::new(colors::PADDLE, 10.0);

/// Draw one frame of the scene into `target`.
///
/// `hovered` shades the menu button when the pointer is over it.
pub fn draw_scene<T: DrawTarget + ?Sized>(
    target: &mut T,
    state: &SimulationState,
    config: &GameConfig,
    hovered: bool,
) {
    target.clear(colors::BACKGROUND);

    target.wire_box(Vec3::ZERO, config.box_size, BOX_STROKE);

    let paddle_center = state.paddle.pos.extend(config.paddle_z());
    target.wire_box(paddle_center, state.paddle.size, PADDLE_STROKE);

    target.sphere(state.ball.pos, state.ball.radius, colors::BALL);

    let overlay = ui::overlay(state.mode, state.score, config, hovered);
    for item in &overlay.texts {
        target.text(&item.text, item.position, item.size, colors::TEXT);
    }
    if let Some(button) = &overlay.button {
        target.button(button.rect, button.label, button.fill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameMode;
    use crate::ui::ScreenRect;
    use glam::Vec2;

    /// Records draw calls by name
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl DrawTarget for Recorder {
        fn clear(&mut self, _color: [f32; 4]) {
            self.calls.push("clear".into());
        }
        fn wire_box(&mut self, center: Vec3, size: Vec3, stroke: Stroke) {
            self.calls.push(format!(
                "box {},{},{} {},{},{} {}",
                center.x, center.y, center.z, size.x, size.y, size.z, stroke.weight
            ));
        }
        fn solid_box(&mut self, center: Vec3, size: Vec3, _color: [f32; 4]) {
            self.calls.push(format!(
                "solid {},{},{} {},{},{}",
                center.x, center.y, center.z, size.x, size.y, size.z
            ));
        }
        fn sphere(&mut self, center: Vec3, radius: f32, _color: [f32; 4]) {
            self.calls
                .push(format!("sphere {},{},{} {}", center.x, center.y, center.z, radius));
        }
        fn text(&mut self, text: &str, _position: Vec3, _size: f32, _color: [f32; 4]) {
            self.calls.push(format!("text {text}"));
        }
        fn button(&mut self, _rect: ScreenRect, label: &str, fill: [f32; 4]) {
            self.calls.push(format!("button {label} {}", fill[0]));
        }
    }

    fn draw(mode: GameMode, score: u32) -> Vec<String> {
        draw_hovered(mode, score, false)
    }

    fn draw_hovered(mode: GameMode, score: u32, hovered: bool) -> Vec<String> {
        let config = GameConfig::default();
        let mut state = SimulationState::new(&config);
        state.mode = mode;
        state.score = score;
        state.paddle.pos = Vec2::new(20.0, -10.0);
        let mut rec = Recorder::default();
        draw_scene(&mut rec, &state, &config, hovered);
        rec.calls
    }

    #[test]
    fn test_world_drawn_before_ui() {
        let calls = draw(GameMode::Menu, 0);
        assert_eq!(calls[0], "clear");
        assert_eq!(calls[1], "box 0,0,0 700,400,600 1");
        assert_eq!(calls[2], "box 20,-10,308 100,70,16 10");
        assert_eq!(calls[3], "sphere 0,0,0 25");
        assert_eq!(&calls[4..], ["text Curveball 3D", "button Play 0.25"]);
    }

    #[test]
    fn test_playing_shows_only_score() {
        let calls = draw(GameMode::Playing, 3);
        assert_eq!(&calls[4..], ["text 3"]);
    }

    #[test]
    fn test_game_over_screen() {
        let calls = draw(GameMode::GameOver, 8);
        assert_eq!(
            &calls[4..],
            ["text Game Over", "text Score: 8", "button Restart 0.25"]
        );
    }

    #[test]
    fn test_hover_shades_button() {
        let calls = draw_hovered(GameMode::Menu, 0, true);
        assert_eq!(calls.last().map(String::as_str), Some("button Play 0.55"));
    }
}
