//! Solve result metrics.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Aggregate efficiency of a finished load plan.
///
/// All values are ratios in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EfficiencyMetrics {
    /// Volume of the items inside loaded bundles over the container volume.
    pub volume_efficiency: f64,

    /// Volume of the loaded bundle boxes over the container volume.
    /// Includes the air inside bundles.
    pub bundle_volume_efficiency: f64,

    /// Footprint of the floor layer over the container floor, capped at 1.
    pub floor_efficiency: f64,

    /// Loaded weight over the container's weight capacity.
    /// `None` when the container declares no capacity.
    pub weight_utilization: Option<f64>,

    /// Packed item volume over the nominal capacity of every bundle created.
    pub bundle_fill_rate: f64,
}

impl EfficiencyMetrics {
    /// Returns volume efficiency as a percentage string.
    pub fn volume_percent(&self) -> String {
        format!("{:.1}%", self.volume_efficiency * 100.0)
    }

    /// Returns floor efficiency as a percentage string.
    pub fn floor_percent(&self) -> String {
        format!("{:.1}%", self.floor_efficiency * 100.0)
    }

    /// Returns weight utilization as a percentage string, if known.
    pub fn weight_percent(&self) -> Option<String> {
        self.weight_utilization
            .map(|w| format!("{:.1}%", w * 100.0))
    }
}

/// Summary statistics for a solve result.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveSummary {
    /// Total items requested.
    pub total_items: usize,
    /// Items that ended up inside a bundle.
    pub packed_items: usize,
    /// Items that could not be packed at all.
    pub unpackable_items: usize,
    /// Bundles created in the palletizing phase.
    pub bundles_created: usize,
    /// Bundles loaded into the container.
    pub bundles_loaded: usize,
    /// Bundles that did not fit into the container.
    pub bundles_failed: usize,
    /// Efficiency metrics.
    pub metrics: EfficiencyMetrics,
    /// Computation time in milliseconds.
    pub time_ms: u64,
}

impl SolveSummary {
    /// Returns true if every item was packed and every bundle was loaded.
    pub fn is_complete(&self) -> bool {
        self.unpackable_items == 0 && self.bundles_failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_strings() {
        let metrics = EfficiencyMetrics {
            volume_efficiency: 0.8512,
            floor_efficiency: 1.0,
            weight_utilization: Some(0.25),
            ..Default::default()
        };
        assert_eq!(metrics.volume_percent(), "85.1%");
        assert_eq!(metrics.floor_percent(), "100.0%");
        assert_eq!(metrics.weight_percent().as_deref(), Some("25.0%"));
        assert_eq!(EfficiencyMetrics::default().weight_percent(), None);
    }

    #[test]
    fn test_summary_completeness() {
        let mut summary = SolveSummary {
            total_items: 3,
            packed_items: 3,
            bundles_created: 1,
            bundles_loaded: 1,
            ..Default::default()
        };
        assert!(summary.is_complete());
        summary.bundles_failed = 1;
        assert!(!summary.is_complete());
    }
}
