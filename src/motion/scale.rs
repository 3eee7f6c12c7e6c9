use super::ConfigError;

/// Maps linear progress in `0..=1` onto eased progress in `0..=1`.
///
/// Every curve satisfies `apply(0) == 0`, `apply(1) == 1` and is monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Stronger deceleration towards the end.
    EaseOutCubic,
    /// Symmetric S-curve.
    #[default]
    EaseInOutCubic,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Vertical translation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslateMode {
    None,
    /// Lift the region only while it sits below the viewport center.
    #[default]
    Upward,
    /// Signed offset proportional to the normalized signed distance.
    Bidirectional,
}

/// Vertical extent of a mounted element, relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub top: f64,
    pub height: f64,
}

impl Region {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleParams {
    pub scale: f64,
    pub border_radius: f64,
    pub translate_y: f64,
}

impl ScaleParams {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        border_radius: 0.0,
        translate_y: 0.0,
    };

    /// Inline `transform` value.
    pub fn transform(&self) -> String {
        if self.translate_y == 0.0 {
            format!("scale({})", self.scale)
        } else {
            format!("translateY({}px) scale({})", self.translate_y, self.scale)
        }
    }

    pub fn radius_px(&self) -> String {
        format!("{}px", self.border_radius)
    }
}

/// Validated parameters for the scale/offset mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleConfig {
    min_scale: f64,
    scale_range: f64,
    border_radius_max: f64,
    translate_y_max: f64,
    easing: Easing,
    translate: TranslateMode,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.7,
            scale_range: 400.0,
            border_radius_max: 24.0,
            translate_y_max: 150.0,
            easing: Easing::EaseInOutCubic,
            translate: TranslateMode::Upward,
        }
    }
}

impl ScaleConfig {
    pub fn builder() -> ScaleConfigBuilder {
        ScaleConfigBuilder {
            config: Self::default(),
        }
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn scale_range(&self) -> f64 {
        self.scale_range
    }

    pub fn border_radius_max(&self) -> f64 {
        self.border_radius_max
    }

    pub fn translate_y_max(&self) -> f64 {
        self.translate_y_max
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn translate(&self) -> TranslateMode {
        self.translate
    }

    /// Presented before the first measurement: fully scaled down.
    pub fn resting(&self) -> ScaleParams {
        let translate_y = match self.translate {
            TranslateMode::None => 0.0,
            TranslateMode::Upward | TranslateMode::Bidirectional => -self.translate_y_max,
        };
        ScaleParams {
            scale: self.min_scale,
            border_radius: self.border_radius_max,
            translate_y,
        }
    }

    /// Parameters for a region measured against the viewport center.
    pub fn at_region(&self, region: Region, viewport_height: f64) -> ScaleParams {
        let distance = region.center() - viewport_height / 2.0;
        self.at_distance(distance)
    }

    /// Parameters driven by the scroll offset from the document origin. The
    /// content moves up as the page scrolls, so the signed distance is
    /// `-scroll_y`.
    pub fn at_scroll(&self, scroll_y: f64) -> ScaleParams {
        self.at_distance(-scroll_y)
    }

    /// `distance` is signed: positive when the element center sits below the
    /// reference point.
    pub fn at_distance(&self, distance: f64) -> ScaleParams {
        let linear = (distance.abs() / self.scale_range).clamp(0.0, 1.0);
        let eased = self.easing.apply(linear);

        let scale = 1.0 - (1.0 - self.min_scale) * eased;
        let border_radius = self.border_radius_max * eased;
        let translate_y = match self.translate {
            TranslateMode::None => 0.0,
            TranslateMode::Upward if distance > 0.0 => -self.translate_y_max * eased,
            TranslateMode::Upward => 0.0,
            TranslateMode::Bidirectional => {
                -self.translate_y_max * (distance / self.scale_range).clamp(-1.0, 1.0)
            }
        };

        ScaleParams {
            scale,
            border_radius,
            translate_y,
        }
    }
}

pub struct ScaleConfigBuilder {
    config: ScaleConfig,
}

impl ScaleConfigBuilder {
    pub fn min_scale(mut self, value: f64) -> Self {
        self.config.min_scale = value;
        self
    }

    pub fn scale_range(mut self, value: f64) -> Self {
        self.config.scale_range = value;
        self
    }

    pub fn border_radius_max(mut self, value: f64) -> Self {
        self.config.border_radius_max = value;
        self
    }

    pub fn translate_y_max(mut self, value: f64) -> Self {
        self.config.translate_y_max = value;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.config.easing = easing;
        self
    }

    pub fn translate(mut self, mode: TranslateMode) -> Self {
        self.config.translate = mode;
        self
    }

    pub fn build(self) -> Result<ScaleConfig, ConfigError> {
        let c = self.config;
        if !c.scale_range.is_finite() || c.scale_range <= 0.0 {
            return Err(ConfigError::InvalidScaleRange(c.scale_range));
        }
        if !(0.0..=1.0).contains(&c.min_scale) {
            return Err(ConfigError::InvalidMinScale(c.min_scale));
        }
        non_negative("border_radius_max", c.border_radius_max)?;
        non_negative("translate_y_max", c.translate_y_max)?;
        Ok(c)
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeMaximum { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn config(easing: Easing, translate: TranslateMode) -> ScaleConfig {
        ScaleConfig::builder()
            .min_scale(0.7)
            .scale_range(500.0)
            .border_radius_max(24.0)
            .translate_y_max(100.0)
            .easing(easing)
            .translate(translate)
            .build()
            .expect("valid config")
    }

    const EASINGS: [Easing; 3] = [Easing::Linear, Easing::EaseOutCubic, Easing::EaseInOutCubic];

    #[test]
    fn test_easing_endpoints_and_monotonicity() {
        for easing in EASINGS {
            assert!(easing.apply(0.0).abs() < EPS, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < EPS, "{easing:?} at 1");
            let mut prev = 0.0;
            for i in 0..=1000 {
                let v = easing.apply(i as f64 / 1000.0);
                assert!(v + EPS >= prev, "{easing:?} not monotonic at {i}");
                prev = v;
            }
        }
        // midpoint of the S-curve
        assert!((Easing::EaseInOutCubic.apply(0.5) - 0.5).abs() < EPS);
        // out of range input is clamped
        assert_eq!(Easing::EaseOutCubic.apply(2.0), 1.0);
        assert_eq!(Easing::EaseOutCubic.apply(-1.0), 0.0);
    }

    #[test]
    fn test_centered_region_is_full_scale() {
        // region fills an 800px viewport exactly
        let params = config(Easing::EaseInOutCubic, TranslateMode::Upward)
            .at_region(Region::new(0.0, 800.0), 800.0);
        assert_eq!(params.scale, 1.0);
        assert_eq!(params.border_radius, 0.0);
        assert_eq!(params.translate_y, 0.0);
    }

    #[test]
    fn test_far_region_is_clamped() {
        for easing in EASINGS {
            let c = config(easing, TranslateMode::Upward);
            for distance in [500.0, 501.0, 5_000.0, -500.0, -10_000.0] {
                let params = c.at_distance(distance);
                assert!((params.scale - 0.7).abs() < EPS);
                assert!((params.border_radius - 24.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_scale_grows_towards_center() {
        for easing in EASINGS {
            let c = config(easing, TranslateMode::Bidirectional);
            let mut prev = 0.0;
            for step in 0..=100 {
                let distance = 600.0 - step as f64 * 6.0;
                let params = c.at_distance(distance);
                assert!(params.scale + EPS >= prev);
                assert!(params.scale >= 0.7 - EPS && params.scale <= 1.0 + EPS);
                assert!(params.border_radius >= -EPS && params.border_radius <= 24.0 + EPS);
                assert!(params.translate_y.abs() <= 100.0 + EPS);
                prev = params.scale;
            }
        }
    }

    #[test]
    fn test_upward_translation_only_below_center() {
        let c = config(Easing::Linear, TranslateMode::Upward);

        let below = c.at_region(Region::new(600.0, 100.0), 800.0);
        assert!((below.translate_y - -50.0).abs() < EPS);

        let above = c.at_region(Region::new(0.0, 100.0), 800.0);
        assert_eq!(above.translate_y, 0.0);
        assert!(above.scale < 1.0);
    }

    #[test]
    fn test_bidirectional_translation_is_signed_and_clamped() {
        let c = config(Easing::EaseInOutCubic, TranslateMode::Bidirectional);

        assert!((c.at_distance(250.0).translate_y - -50.0).abs() < EPS);
        assert!((c.at_distance(-250.0).translate_y - 50.0).abs() < EPS);
        assert!((c.at_distance(10_000.0).translate_y - -100.0).abs() < EPS);
        assert!((c.at_distance(-10_000.0).translate_y - 100.0).abs() < EPS);
    }

    #[test]
    fn test_zero_height_region_is_a_point() {
        let c = config(Easing::Linear, TranslateMode::None);
        let params = c.at_region(Region::new(400.0, 0.0), 800.0);
        assert_eq!(params, ScaleParams::IDENTITY);
    }

    #[test]
    fn test_resize_changes_result() {
        let c = config(Easing::Linear, TranslateMode::None);
        let region = Region::new(300.0, 200.0);
        let tall = c.at_region(region, 800.0);
        let short = c.at_region(region, 400.0);
        assert_eq!(tall.scale, 1.0);
        assert!(short.scale < tall.scale);
    }

    #[test]
    fn test_scroll_origin_progress() {
        // landing section: shrinks to 65% over 600px of scroll
        let c = ScaleConfig::builder()
            .min_scale(0.65)
            .scale_range(600.0)
            .border_radius_max(24.0)
            .easing(Easing::Linear)
            .translate(TranslateMode::None)
            .build()
            .unwrap();

        assert_eq!(c.at_scroll(0.0), ScaleParams::IDENTITY);
        let half = c.at_scroll(300.0);
        assert!((half.scale - 0.825).abs() < EPS);
        assert!((half.border_radius - 12.0).abs() < EPS);
        let past = c.at_scroll(2_000.0);
        assert!((past.scale - 0.65).abs() < EPS);
        assert_eq!(past.translate_y, 0.0);
    }

    #[test]
    fn test_resting_state() {
        let resting = ScaleConfig::default().resting();
        assert_eq!(resting.scale, 0.7);
        assert_eq!(resting.border_radius, 24.0);
        assert_eq!(resting.translate_y, -150.0);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        assert_eq!(
            ScaleConfig::builder().scale_range(0.0).build(),
            Err(ConfigError::InvalidScaleRange(0.0))
        );
        assert!(matches!(
            ScaleConfig::builder().scale_range(-10.0).build(),
            Err(ConfigError::InvalidScaleRange(_))
        ));
        assert!(matches!(
            ScaleConfig::builder().scale_range(f64::NAN).build(),
            Err(ConfigError::InvalidScaleRange(_))
        ));
        assert!(matches!(
            ScaleConfig::builder().min_scale(1.5).build(),
            Err(ConfigError::InvalidMinScale(_))
        ));
        assert!(matches!(
            ScaleConfig::builder().border_radius_max(-1.0).build(),
            Err(ConfigError::NegativeMaximum {
                name: "border_radius_max",
                ..
            })
        ));
    }

    #[test]
    fn test_transform_string() {
        assert_eq!(ScaleParams::IDENTITY.transform(), "scale(1)");
        let params = ScaleParams {
            scale: 0.8,
            border_radius: 12.0,
            translate_y: -30.0,
        };
        assert_eq!(params.transform(), "translateY(-30px) scale(0.8)");
        assert_eq!(params.radius_px(), "12px");
    }
}
