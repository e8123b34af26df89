//! One-dimensional scroll camera.

use crate::consts::CAMERA_MARGIN;

/// Tracks the player with a fixed horizontal lead. No vertical scroll, no
/// easing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self { x: 0.0 }
    }

    /// Follow the player, never scrolling left of the level start.
    pub fn update(&mut self, player_x: f32) {
        self.x = (player_x - CAMERA_MARGIN).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_player_with_margin() {
        let mut camera = Camera::new();
        camera.update(500.0);
        assert_eq!(camera.x, 500.0 - CAMERA_MARGIN);
    }

    #[test]
    fn test_never_negative() {
        let mut camera = Camera::new();
        for x in [0.0, 10.0, CAMERA_MARGIN, CAMERA_MARGIN - 0.5] {
            camera.update(x);
            assert!(camera.x >= 0.0, "player_x {x}");
        }
        camera.update(0.0);
        assert_eq!(camera.x, 0.0);
    }
}
