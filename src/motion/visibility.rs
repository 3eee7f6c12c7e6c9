use std::fmt;
use std::str::FromStr;

use super::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    fn contains_point(&self, top: f64, left: f64) -> bool {
        top >= self.top && top <= self.bottom() && left >= self.left && left <= self.right()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    fn resolve(self, basis: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => basis * p / 100.0,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

impl FromStr for Length {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        let parse = |n: &str| n.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or(());
        if let Some(n) = s.strip_suffix("px") {
            parse(n).map(Self::Px)
        } else if let Some(n) = s.strip_suffix('%') {
            parse(n).map(Self::Percent)
        } else if s == "0" {
            Ok(Self::Px(0.0))
        } else {
            Err(())
        }
    }
}

/// CSS-style margin that grows (positive) or shrinks (negative) the root box
/// before intersecting. Accepts the one to four value shorthand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    top: Length,
    right: Length,
    bottom: Length,
    left: Length,
}

impl Default for RootMargin {
    fn default() -> Self {
        let zero = Length::Px(0.0);
        Self {
            top: zero,
            right: zero,
            bottom: zero,
            left: zero,
        }
    }
}

impl FromStr for RootMargin {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        let err = || ConfigError::InvalidRootMargin(s.to_string());
        let parts = s
            .split_whitespace()
            .map(|p| p.parse::<Length>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| err())?;
        let (top, right, bottom, left) = match parts[..] {
            [all] => (all, all, all, all),
            [v, h] => (v, h, v, h),
            [t, h, b] => (t, h, b, h),
            [t, r, b, l] => (t, r, b, l),
            _ => return Err(err()),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl RootMargin {
    /// Percentages resolve against the root's height (top/bottom) and width
    /// (left/right).
    pub fn apply(&self, root: Rect) -> Rect {
        let top = self.top.resolve(root.height);
        let bottom = self.bottom.resolve(root.height);
        let left = self.left.resolve(root.width);
        let right = self.right.resolve(root.width);
        Rect {
            top: root.top - top,
            left: root.left - left,
            width: root.width + left + right,
            height: root.height + top + bottom,
        }
    }
}

/// Fraction of `target` inside `root` after applying `margin`.
///
/// A zero-area target counts as fully visible when its corner lies inside the
/// root box.
pub fn intersection_ratio(target: Rect, root: Rect, margin: &RootMargin) -> f64 {
    let root = margin.apply(root);
    let area = target.area();
    if area == 0.0 {
        return if root.contains_point(target.top, target.left) {
            1.0
        } else {
            0.0
        };
    }
    let w = (target.right().min(root.right()) - target.left.max(root.left)).max(0.0);
    let h = (target.bottom().min(root.bottom()) - target.top.max(root.top)).max(0.0);
    (w * h / area).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityConfig {
    threshold: f64,
    root_margin: RootMargin,
    trigger_once: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self::on_screen()
    }
}

impl VisibilityConfig {
    pub fn new(threshold: f64) -> Result<Self, ConfigError> {
        Self::on_screen().with_threshold(threshold)
    }

    /// Tracks visibility both ways at half overlap.
    pub fn on_screen() -> Self {
        Self {
            threshold: 0.5,
            root_margin: RootMargin::default(),
            trigger_once: false,
        }
    }

    /// Latches on the first time a fifth of the region shows.
    pub fn animate_on_view() -> Self {
        Self {
            threshold: 0.2,
            root_margin: RootMargin::default(),
            trigger_once: true,
        }
    }

    /// Latches on the first pixel of overlap.
    pub fn first_sight() -> Self {
        Self {
            threshold: 0.0,
            root_margin: RootMargin::default(),
            trigger_once: true,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        self.threshold = threshold;
        Ok(self)
    }

    pub fn with_root_margin(mut self, margin: &str) -> Result<Self, ConfigError> {
        self.root_margin = margin.parse()?;
        Ok(self)
    }

    pub fn trigger_once(mut self, once: bool) -> Self {
        self.trigger_once = once;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn root_margin(&self) -> &RootMargin {
        &self.root_margin
    }

    pub fn is_trigger_once(&self) -> bool {
        self.trigger_once
    }
}

/// Visibility of one observed region.
#[derive(Debug, Clone)]
pub struct Visibility {
    config: VisibilityConfig,
    visible: bool,
    seen: bool,
}

impl Visibility {
    pub fn new(config: VisibilityConfig) -> Self {
        Self {
            config,
            visible: false,
            seen: false,
        }
    }

    pub fn config(&self) -> &VisibilityConfig {
        &self.config
    }

    /// Feeds a new intersection ratio. Returns `true` when the reported
    /// visibility changed.
    pub fn observe(&mut self, ratio: f64) -> bool {
        if self.is_latched() {
            return false;
        }
        let visible = ratio > 0.0 && ratio >= self.config.threshold;
        if visible {
            if !self.seen {
                log::trace!("region visible for the first time (ratio {ratio})");
            }
            self.seen = true;
        }
        let changed = visible != self.visible;
        self.visible = visible;
        changed
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn has_been_visible(&self) -> bool {
        self.seen
    }

    /// A one-shot observer that has fired; the platform observer can be
    /// disconnected.
    pub fn is_latched(&self) -> bool {
        self.config.trigger_once && self.seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect {
        top: 0.0,
        left: 0.0,
        width: 1000.0,
        height: 800.0,
    };

    fn at(top: f64, height: f64) -> Rect {
        Rect::new(top, 0.0, 1000.0, height)
    }

    #[test]
    fn test_intersection_ratio() {
        let none = RootMargin::default();
        assert_eq!(intersection_ratio(at(0.0, 400.0), VIEWPORT, &none), 1.0);
        assert_eq!(intersection_ratio(at(600.0, 400.0), VIEWPORT, &none), 0.5);
        assert_eq!(intersection_ratio(at(900.0, 400.0), VIEWPORT, &none), 0.0);
        assert_eq!(intersection_ratio(at(-300.0, 400.0), VIEWPORT, &none), 0.25);
        // taller than the viewport can never be fully inside
        assert_eq!(intersection_ratio(at(0.0, 1600.0), VIEWPORT, &none), 0.5);
    }

    #[test]
    fn test_zero_area_target() {
        let none = RootMargin::default();
        assert_eq!(intersection_ratio(at(100.0, 0.0), VIEWPORT, &none), 1.0);
        assert_eq!(intersection_ratio(at(900.0, 0.0), VIEWPORT, &none), 0.0);
    }

    #[test]
    fn test_root_margin_parsing() {
        let m: RootMargin = "10px".parse().unwrap();
        assert_eq!(m.to_string(), "10px 10px 10px 10px");
        let m: RootMargin = "10px 20px".parse().unwrap();
        assert_eq!(m.to_string(), "10px 20px 10px 20px");
        let m: RootMargin = "0 5% -10px".parse().unwrap();
        assert_eq!(m.to_string(), "0px 5% -10px 5%");
        let m: RootMargin = "1px 2px 3px 4px".parse().unwrap();
        assert_eq!(m.to_string(), "1px 2px 3px 4px");

        assert!("".parse::<RootMargin>().is_err());
        assert!("10".parse::<RootMargin>().is_err());
        assert!("1px 2px 3px 4px 5px".parse::<RootMargin>().is_err());
        assert!(matches!(
            "abc".parse::<RootMargin>(),
            Err(ConfigError::InvalidRootMargin(s)) if s == "abc"
        ));
    }

    #[test]
    fn test_root_margin_shrinks_viewport() {
        let shrink: RootMargin = "-100px 0px".parse().unwrap();
        // fully inside without margin, half inside the shrunken box
        let target = at(0.0, 200.0);
        assert_eq!(intersection_ratio(target, VIEWPORT, &shrink), 0.5);

        let grow: RootMargin = "25% 0px".parse().unwrap();
        assert_eq!(intersection_ratio(at(900.0, 100.0), VIEWPORT, &grow), 1.0);
    }

    #[test]
    fn test_threshold_crossings_both_ways() {
        let mut vis = Visibility::new(VisibilityConfig::on_screen());
        assert!(!vis.is_visible());

        assert!(!vis.observe(0.3));
        assert!(vis.observe(0.5));
        assert!(vis.is_visible());
        assert!(!vis.observe(0.9));
        assert!(vis.observe(0.49));
        assert!(!vis.is_visible());
        assert!(vis.has_been_visible());
    }

    #[test]
    fn test_ratio_just_below_threshold_hides() {
        let mut vis = Visibility::new(VisibilityConfig::on_screen());
        vis.observe(0.9);
        assert!(vis.observe(0.4995));
        assert!(!vis.is_visible());

        let mut sliver = Visibility::new(VisibilityConfig::new(0.05).unwrap());
        assert!(!sliver.observe(0.0499));
        assert!(sliver.observe(0.05));
    }

    #[test]
    fn test_zero_threshold_means_any_overlap() {
        let mut vis = Visibility::new(VisibilityConfig::new(0.0).unwrap());
        vis.observe(0.0);
        assert!(!vis.is_visible());
        vis.observe(0.01);
        assert!(vis.is_visible());
    }

    #[test]
    fn test_trigger_once_latches() {
        let mut vis = Visibility::new(VisibilityConfig::animate_on_view());
        assert!(!vis.is_latched());

        vis.observe(0.1);
        assert!(!vis.is_visible());
        assert!(vis.observe(0.25));
        assert!(vis.is_latched());

        // dropping below the threshold must not revert
        for ratio in [0.1, 0.0, 0.19, 1.0, 0.0] {
            assert!(!vis.observe(ratio));
            assert!(vis.is_visible());
        }
    }

    #[test]
    fn test_first_sight_latches_on_any_overlap() {
        let mut vis = Visibility::new(VisibilityConfig::first_sight());
        assert!(vis.observe(0.001));
        assert!(vis.is_latched());
        assert!(!vis.observe(0.0));
        assert!(vis.is_visible());
    }

    #[test]
    fn test_never_mounted_stays_hidden() {
        let vis = Visibility::new(VisibilityConfig::default());
        assert!(!vis.is_visible());
        assert!(!vis.has_been_visible());
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(
            VisibilityConfig::new(1.5),
            Err(ConfigError::InvalidThreshold(1.5))
        );
        assert!(VisibilityConfig::new(-0.1).is_err());
        assert!(VisibilityConfig::new(f64::NAN).is_err());
        let config = VisibilityConfig::new(0.6)
            .and_then(|c| c.with_root_margin("0px 0px -10% 0px"))
            .unwrap()
            .trigger_once(true);
        assert_eq!(config.threshold(), 0.6);
        assert!(config.is_trigger_once());
    }
}
