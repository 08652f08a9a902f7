//! Viewport-driven chart sizing.

use serde::Serialize;

pub const MOBILE_BREAKPOINT: f32 = 768.0;
pub const DESKTOP_BREAKPOINT: f32 = 1024.0;

/// Dimension change (px) below which a resize is treated as jitter.
pub const RESIZE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceTier {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceTier {
    pub fn from_viewport(viewport_width: f32) -> Self {
        if viewport_width < MOBILE_BREAKPOINT {
            DeviceTier::Mobile
        } else if viewport_width < DESKTOP_BREAKPOINT {
            DeviceTier::Tablet
        } else {
            DeviceTier::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == DeviceTier::Mobile
    }

    pub fn is_tablet(self) -> bool {
        self == DeviceTier::Tablet
    }
}

/// Square chart edge length for a viewport width.
pub fn chart_dimension(viewport_width: f32) -> f32 {
    if viewport_width < 380.0 {
        280.0
    } else if viewport_width < 480.0 {
        (viewport_width - 40.0).min(320.0)
    } else if viewport_width < MOBILE_BREAKPOINT {
        (viewport_width - 60.0).min(400.0)
    } else if viewport_width < DESKTOP_BREAKPOINT {
        (viewport_width - 100.0).min(600.0)
    } else {
        700.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartSize {
    pub width: f32,
    pub height: f32,
    pub tier: DeviceTier,
}

impl ChartSize {
    pub fn for_viewport(viewport_width: f32) -> Self {
        let dimension = chart_dimension(viewport_width);
        Self {
            width: dimension,
            height: dimension,
            tier: DeviceTier::from_viewport(viewport_width),
        }
    }

    /// True when either dimension moved by more than `threshold` pixels.
    pub fn differs_significantly(&self, other: &ChartSize, threshold: f32) -> bool {
        (self.width - other.width).abs() > threshold
            || (self.height - other.height).abs() > threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_follows_viewport_tiers() {
        assert_eq!(chart_dimension(320.0), 280.0);
        assert_eq!(chart_dimension(379.0), 280.0);
        assert_eq!(chart_dimension(380.0), 320.0);
        assert_eq!(chart_dimension(479.0), 320.0);
        assert_eq!(chart_dimension(480.0), 400.0);
        assert_eq!(chart_dimension(767.0), 400.0);
        assert_eq!(chart_dimension(768.0), 600.0);
        assert_eq!(chart_dimension(1023.0), 600.0);
        assert_eq!(chart_dimension(1024.0), 700.0);
        assert_eq!(chart_dimension(2560.0), 700.0);
    }

    #[test]
    fn classifies_device_tiers() {
        assert_eq!(DeviceTier::from_viewport(500.0), DeviceTier::Mobile);
        assert_eq!(DeviceTier::from_viewport(768.0), DeviceTier::Tablet);
        assert_eq!(DeviceTier::from_viewport(1023.0), DeviceTier::Tablet);
        assert_eq!(DeviceTier::from_viewport(1024.0), DeviceTier::Desktop);
        let tier = DeviceTier::from_viewport(1400.0);
        assert!(!tier.is_mobile() && !tier.is_tablet());
    }

    #[test]
    fn small_changes_are_not_significant() {
        let desktop = ChartSize::for_viewport(1280.0);
        let laptop = ChartSize::for_viewport(1100.0);
        let tablet = ChartSize::for_viewport(900.0);
        assert!(!desktop.differs_significantly(&laptop, RESIZE_THRESHOLD));
        assert!(desktop.differs_significantly(&tablet, RESIZE_THRESHOLD));
    }
}
