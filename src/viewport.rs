//! Responsive canvas sizing

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Canvas size fitted to a container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub ground_line: f32,
}

impl Viewport {
    /// Fit a container, keeping the minimum size and clamping the aspect
    /// ratio by shrinking the longer side.
    pub fn fit(container_width: f32, container_height: f32, settings: &Settings) -> Self {
        let limits = &settings.viewport;
        let mut width = container_width.max(limits.min_width);
        let mut height = container_height.max(limits.min_height);

        let aspect = width / height;
        if aspect > limits.max_aspect_ratio {
            width = height * limits.max_aspect_ratio;
        } else if aspect < limits.min_aspect_ratio {
            height = width / limits.min_aspect_ratio;
        }

        let width = width.floor();
        let height = height.floor();
        Self {
            width,
            height,
            ground_line: height * settings.world.ground_ratio,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_fit_within_limits() {
        let settings = Settings::default();
        let vp = Viewport::fit(800.0, 400.0, &settings);
        assert_eq!((vp.width, vp.height), (800.0, 400.0));
        assert_eq!(vp.ground_line, 400.0 * GROUND_RATIO);
    }

    #[test]
    fn test_wide_container_shrinks_width() {
        let vp = Viewport::fit(2000.0, 300.0, &Settings::default());
        assert_eq!(vp.height, 300.0);
        assert_eq!(vp.width, 750.0);
        assert!(vp.aspect_ratio() <= MAX_ASPECT_RATIO);
    }

    #[test]
    fn test_tall_container_shrinks_height() {
        let vp = Viewport::fit(400.0, 900.0, &Settings::default());
        assert_eq!((vp.width, vp.height), (400.0, 400.0));
    }

    #[test]
    fn test_tiny_container_uses_minimums() {
        let vp = Viewport::fit(10.0, 10.0, &Settings::default());
        assert!(vp.width >= MIN_WIDTH);
        assert!(vp.height >= MIN_HEIGHT);
        let aspect = vp.aspect_ratio();
        assert!((MIN_ASPECT_RATIO..=MAX_ASPECT_RATIO).contains(&aspect));
    }
}
