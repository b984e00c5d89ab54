use std::f64::consts::TAU;

/// Snapshot of the directional inputs held during the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// Movement tuning, in grid units and radians per millisecond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    pub speed_per_ms: f64,
    pub rot_speed_per_ms: f64,
    /// When false, forward + strafe moves at sqrt(2) times axis speed.
    pub normalize_diagonal: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed_per_ms: 0.005,
            rot_speed_per_ms: 0.001,
            normalize_diagonal: false,
        }
    }
}

/// Player position (fractional tile units) and heading.
///
/// Heading 0 looks east (+x); positive rotation turns toward +y (south),
/// matching screen-style coordinates where rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    angle: f64, // radians, always in [0, 2*pi)
}

impl Pose {
    pub fn new(x: f64, y: f64, angle: f64) -> Self {
        Self {
            x,
            y,
            angle: wrap_angle(angle),
        }
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = wrap_angle(angle);
    }

    /// Integrate one frame of input. Movement ignores walls.
    pub fn advance(&mut self, elapsed_ms: f64, input: &InputState, motion: &MotionConfig) {
        let sin_a = self.angle.sin();
        let cos_a = self.angle.cos();
        let speed = motion.speed_per_ms * elapsed_ms;
        let speed_sin = speed * sin_a;
        let speed_cos = speed * cos_a;

        let mut dx = 0.0;
        let mut dy = 0.0;
        if input.forward {
            dx += speed_cos;
            dy += speed_sin;
        }
        if input.backward {
            dx -= speed_cos;
            dy -= speed_sin;
        }
        if input.strafe_left {
            dx += speed_sin;
            dy -= speed_cos;
        }
        if input.strafe_right {
            dx -= speed_sin;
            dy += speed_cos;
        }

        if motion.normalize_diagonal {
            let len = (dx * dx + dy * dy).sqrt();
            if len > speed.abs() && len > 0.0 {
                let k = speed.abs() / len;
                dx *= k;
                dy *= k;
            }
        }

        self.x += dx;
        self.y += dy;

        let rot = motion.rot_speed_per_ms * elapsed_ms;
        let mut angle = self.angle;
        if input.turn_left {
            angle -= rot;
        }
        if input.turn_right {
            angle += rot;
        }
        self.angle = wrap_angle(angle);
    }
}

/// Reduce an angle into [0, 2*pi).
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid of a tiny negative value rounds up to exactly TAU
    if a >= TAU { 0.0 } else { a }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn held(f: impl FnOnce(&mut InputState)) -> InputState {
        let mut input = InputState::default();
        f(&mut input);
        input
    }

    #[test]
    fn test_no_input_leaves_pose_unchanged() {
        let motion = MotionConfig::default();
        for k in 0..16 {
            let mut pose = Pose::new(2.25, 3.75, k as f64 * 0.4);
            let before = pose;
            pose.advance(16.0, &InputState::default(), &motion);
            assert_eq!(pose, before);
        }
    }

    #[test]
    fn test_forward_moves_along_heading() {
        let motion = MotionConfig::default();
        let mut pose = Pose::new(1.0, 1.0, FRAC_PI_2);
        pose.advance(100.0, &held(|i| i.forward = true), &motion);

        assert_relative_eq!(pose.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(pose.y, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_strafe_is_perpendicular() {
        let motion = MotionConfig::default();
        let mut pose = Pose::new(0.0, 0.0, 0.0);
        pose.advance(100.0, &held(|i| i.strafe_right = true), &motion);

        assert_relative_eq!(pose.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(pose.y, 0.5, epsilon = 1e-12);

        pose.advance(200.0, &held(|i| i.strafe_left = true), &motion);
        assert_relative_eq!(pose.y, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_diagonal_is_unnormalized_by_default() {
        let motion = MotionConfig::default();
        let mut pose = Pose::new(0.0, 0.0, 0.0);
        pose.advance(
            100.0,
            &held(|i| {
                i.forward = true;
                i.strafe_right = true;
            }),
            &motion,
        );

        let travelled = (pose.x * pose.x + pose.y * pose.y).sqrt();
        assert_relative_eq!(travelled, 0.5 * 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_diagonal_normalized_when_enabled() {
        let motion = MotionConfig {
            normalize_diagonal: true,
            ..MotionConfig::default()
        };
        let mut pose = Pose::new(0.0, 0.0, 0.3);
        pose.advance(
            100.0,
            &held(|i| {
                i.forward = true;
                i.strafe_left = true;
            }),
            &motion,
        );

        let travelled = (pose.x * pose.x + pose.y * pose.y).sqrt();
        assert_relative_eq!(travelled, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_opposite_inputs_cancel() {
        let motion = MotionConfig::default();
        let mut pose = Pose::new(4.0, 4.0, 1.0);
        pose.advance(
            50.0,
            &held(|i| {
                i.forward = true;
                i.backward = true;
                i.turn_left = true;
                i.turn_right = true;
            }),
            &motion,
        );

        assert_relative_eq!(pose.x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(pose.y, 4.0, epsilon = 1e-12);
        assert_relative_eq!(pose.angle(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_heading_wraps_both_directions() {
        let motion = MotionConfig::default();
        let mut pose = Pose::new(0.0, 0.0, 0.0);

        pose.advance(1.0, &held(|i| i.turn_left = true), &motion);
        assert_relative_eq!(pose.angle(), TAU - 0.001, epsilon = 1e-12);

        for _ in 0..10_000 {
            pose.advance(7.3, &held(|i| i.turn_right = true), &motion);
            assert!((0.0..TAU).contains(&pose.angle()));
        }
        for _ in 0..10_000 {
            pose.advance(13.1, &held(|i| i.turn_left = true), &motion);
            assert!((0.0..TAU).contains(&pose.angle()));
        }
    }

    #[test]
    fn test_wrap_angle() {
        assert_relative_eq!(wrap_angle(3.0 * PI), PI, epsilon = 1e-12);
        assert_relative_eq!(wrap_angle(-FRAC_PI_2), 1.5 * PI, epsilon = 1e-12);
        assert_eq!(wrap_angle(TAU), 0.0);
        assert!(wrap_angle(-1e-18) < TAU);
    }
}
