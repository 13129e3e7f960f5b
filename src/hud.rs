//! Text shown on top of the rendered frame.
//!
//! Only composes strings; the binary decides where they go (window title,
//! stdout, ...).

use crate::math::vec3::Vec3;
use crate::render::RenderMode;

const CONTROLS: [&str; 6] = [
    "Controls:",
    "WASD - move, Q/E - up/down, Shift - boost",
    "Arrows or RMB drag - look around",
    "Mouse wheel - zoom (FOV), R - reset camera",
    "N - spawn cube, Delete - remove spawned cube",
    "F1 - render mode, F2 - culling, F3 - autorotate, F4 - HUD, F12 - screenshot",
];

/// Snapshot of the values the overlay reports.
#[derive(Debug, Clone, PartialEq)]
pub struct HudState {
    pub fps: f32,
    pub render_mode: RenderMode,
    pub backface_culling: bool,
    pub auto_rotate: bool,
    pub camera_position: Vec3,
    /// Radians
    pub camera_yaw: f32,
    /// Radians
    pub camera_pitch: f32,
    pub object_count: usize,
    pub visible_face_count: usize,
    pub spawned_object_count: usize,
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

impl HudState {
    /// The overlay, one entry per line. An empty entry separates the status
    /// block from the controls help.
    pub fn lines(&self) -> Vec<String> {
        let p = self.camera_position;
        let mut lines = vec![
            format!("FPS: {:.1}", self.fps),
            format!("Render: {}", self.render_mode),
            format!("Backface Culling: {}", on_off(self.backface_culling)),
            format!("Auto Rotate: {}", on_off(self.auto_rotate)),
            format!(
                "Objects: {} (spawned: {})",
                self.object_count, self.spawned_object_count
            ),
            format!("Visible Faces: {}", self.visible_face_count),
            format!("Camera Pos: {:.2}, {:.2}, {:.2}", p.x, p.y, p.z),
            format!(
                "Camera Rot: yaw {:.1} deg | pitch {:.1} deg",
                self.camera_yaw.to_degrees(),
                self.camera_pitch.to_degrees()
            ),
            String::new(),
        ];
        lines.extend(CONTROLS.iter().map(|s| s.to_string()));
        lines
    }

    /// Compact one-line summary for a window title bar.
    pub fn title(&self) -> String {
        format!(
            "painter3d | {:.0} fps | {} | culling {} | {} objects | {} faces",
            self.fps,
            self.render_mode,
            on_off(self.backface_culling),
            self.object_count,
            self.visible_face_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn sample() -> HudState {
        HudState {
            fps: 59.94,
            render_mode: RenderMode::SolidWithOutline,
            backface_culling: true,
            auto_rotate: false,
            camera_position: Vec3::new(0.0, 1.5, -1.5),
            camera_yaw: FRAC_PI_2,
            camera_pitch: 0.0,
            object_count: 5,
            visible_face_count: 12,
            spawned_object_count: 1,
        }
    }

    #[test]
    fn lines_report_state() {
        let lines = sample().lines();
        assert_eq!(lines[0], "FPS: 59.9");
        assert_eq!(lines[1], "Render: Solid + Outline");
        assert_eq!(lines[2], "Backface Culling: ON");
        assert_eq!(lines[3], "Auto Rotate: OFF");
        assert_eq!(lines[4], "Objects: 5 (spawned: 1)");
        assert_eq!(lines[5], "Visible Faces: 12");
        assert_eq!(lines[6], "Camera Pos: 0.00, 1.50, -1.50");
        assert_eq!(lines[7], "Camera Rot: yaw 90.0 deg | pitch 0.0 deg");
        assert!(lines[8].is_empty());
        assert_eq!(lines.last().map(String::as_str), Some(CONTROLS[5]));
    }

    #[test]
    fn title_is_single_line() {
        let title = sample().title();
        assert!(!title.contains('\n'));
        assert!(title.contains("60 fps"));
        assert!(title.contains("12 faces"));
    }
}
