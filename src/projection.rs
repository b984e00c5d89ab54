use crate::error::ConfigError;

/// Per-frame constants shared by the caster and the projector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub screen_width: usize,
    pub screen_height: usize,
    pub fov: f64,         // radians, horizontal
    pub half_fov: f64,    //
    pub num_rays: usize,  // one ray per screen column strip
    pub delta_angle: f64, // fov / num_rays
    pub max_depth: u32,   // DDA steps per axis family
    pub screen_dist: f64, // eye to projection plane, in pixels
    pub column_width: usize,
}

impl Projection {
    /// Nudge applied to the first ray so no ray starts on an exact axis.
    pub const RAY_EPSILON: f64 = 1e-4;
    /// Added to the depth before dividing, keeps point-blank walls finite.
    pub const DEPTH_EPSILON: f64 = 1e-3;

    pub fn new(
        screen_width: usize,
        screen_height: usize,
        fov: f64,
        num_rays: usize,
        max_depth: u32,
    ) -> Result<Self, ConfigError> {
        if screen_width == 0 || screen_height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "view",
                reason: format!("screen size {screen_width}x{screen_height} is empty"),
            });
        }
        if !(fov > 0.0 && fov < std::f64::consts::PI) {
            return Err(ConfigError::InvalidValue {
                field: "fov",
                reason: format!("{fov} rad is outside (0, pi)"),
            });
        }
        if num_rays == 0 || num_rays > screen_width {
            return Err(ConfigError::InvalidValue {
                field: "num_rays",
                reason: format!("{num_rays} must be in 1..={screen_width}"),
            });
        }
        if max_depth <= 5 {
            return Err(ConfigError::InvalidValue {
                field: "max_depth",
                reason: format!("{max_depth} leaves no visible range"),
            });
        }

        let half_fov = 0.5 * fov;
        Ok(Self {
            screen_width,
            screen_height,
            fov,
            half_fov,
            num_rays,
            delta_angle: fov / num_rays as f64,
            max_depth,
            screen_dist: (screen_width / 2) as f64 / half_fov.tan(),
            column_width: screen_width / num_rays,
        })
    }

    /// Same as `new` with the FOV given in degrees.
    pub fn from_degrees(
        screen_width: usize,
        screen_height: usize,
        fov_deg: f64,
        num_rays: usize,
        max_depth: u32,
    ) -> Result<Self, ConfigError> {
        Self::new(
            screen_width,
            screen_height,
            fov_deg.to_radians(),
            num_rays,
            max_depth,
        )
    }

    /// Absolute heading of ray `index` for a player facing `heading`.
    #[inline]
    pub fn ray_angle(&self, heading: f64, index: usize) -> f64 {
        heading - self.half_fov + Self::RAY_EPSILON + index as f64 * self.delta_angle
    }

    /// Corrected depths at or beyond this are background.
    #[inline]
    pub fn visible_depth(&self) -> f64 {
        f64::from(self.max_depth) - 5.0
    }

    /// On-screen height of a wall slice at perpendicular distance `depth`.
    #[inline]
    pub fn column_height(&self, depth: f64) -> f64 {
        self.screen_dist / (depth + Self::DEPTH_EPSILON)
    }

    #[inline]
    pub fn screen_center_y(&self) -> f64 {
        0.5 * self.screen_height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn classic() -> Projection {
        Projection::new(800, 600, PI / 3.0, 400, 30).unwrap()
    }

    #[test]
    fn test_classic_constants() {
        let p = classic();

        assert_relative_eq!(p.screen_dist, 400.0 / (PI / 6.0).tan(), epsilon = 1e-9);
        assert_eq!(p.column_width, 2);
        assert_relative_eq!(p.delta_angle, PI / 1200.0, epsilon = 1e-15);
        assert_relative_eq!(p.visible_depth(), 25.0);
    }

    #[test]
    fn test_rays_span_fov() {
        let p = classic();
        let heading = 1.0;

        assert_relative_eq!(
            p.ray_angle(heading, 0),
            heading - p.half_fov + Projection::RAY_EPSILON
        );
        assert_relative_eq!(
            p.ray_angle(heading, p.num_rays / 2),
            heading + Projection::RAY_EPSILON,
            epsilon = 1e-12
        );
        assert!(p.ray_angle(heading, p.num_rays - 1) < heading + p.half_fov);
    }

    #[test]
    fn test_column_height_at_unit_depth() {
        let p = classic();
        assert_relative_eq!(p.column_height(1.0), p.screen_dist, max_relative = 1e-3);
        assert_relative_eq!(
            p.column_height(1.0 - Projection::DEPTH_EPSILON),
            p.screen_dist,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_column_height_strictly_decreasing() {
        let p = classic();
        let mut prev = f64::INFINITY;
        for k in 0..500 {
            let h = p.column_height(k as f64 * 0.05);
            assert!(h < prev);
            prev = h;
        }
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Projection::new(800, 600, 0.0, 400, 30).is_err());
        assert!(Projection::new(800, 600, PI, 400, 30).is_err());
        assert!(Projection::new(800, 600, 1.0, 0, 30).is_err());
        assert!(Projection::new(800, 600, 1.0, 801, 30).is_err());
        assert!(Projection::new(800, 600, 1.0, 400, 5).is_err());
        assert!(Projection::new(0, 600, 1.0, 400, 30).is_err());
        assert!(Projection::from_degrees(800, 600, 60.0, 400, 30).is_ok());
    }
}
