use crate::material::MaterialTable;
use crate::projection::Projection;

/// Everything the caster and projector read but never mutate during a frame.
/// Built once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub projection: Projection,
    pub materials: MaterialTable,
    pub background: u32,
    /// Coefficient `k` in the shaded-material brightness `1 / (1 + k * depth^5)`.
    pub flat_falloff: f64,
}

impl RenderContext {
    pub fn new(projection: Projection, materials: MaterialTable) -> Self {
        Self {
            projection,
            materials,
            background: 0,
            flat_falloff: 0.00002,
        }
    }

    pub fn with_background(mut self, background: u32) -> Self {
        self.background = background;
        self
    }

    pub fn with_flat_falloff(mut self, falloff: f64) -> Self {
        self.flat_falloff = falloff;
        self
    }

    /// Brightness in (0, 1] for a shaded material at perpendicular `depth`.
    #[inline]
    pub fn falloff(&self, depth: f64) -> f32 {
        (1.0 / (1.0 + self.flat_falloff * depth.powi(5))) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ctx() -> RenderContext {
        let projection = Projection::from_degrees(800, 600, 60.0, 400, 30).unwrap();
        RenderContext::new(projection, MaterialTable::new())
    }

    #[test]
    fn test_falloff_is_one_up_close() {
        assert_relative_eq!(ctx().falloff(0.0), 1.0);
    }

    #[test]
    fn test_falloff_is_steep() {
        let c = ctx();
        assert!(c.falloff(2.0) > 0.99);
        assert!(c.falloff(10.0) < 0.5);
        assert!(c.falloff(20.0) < 0.02);

        let mut prev = 1.0f32;
        for k in 1..100 {
            let f = c.falloff(k as f64 * 0.25);
            assert!(f <= prev);
            prev = f;
        }
    }
}
