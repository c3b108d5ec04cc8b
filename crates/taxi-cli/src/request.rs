//! Turning command line options into planner inputs.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use taxi_core::{DepartureProfile, FacilitySnapshot, GateSelection, RunwaySelection};

/// Gate and runway choices as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct DepartureRequest {
    /// Published parking spot number
    pub gate: Option<u32>,
    /// Seed for a reproducible random gate
    pub seed: Option<u64>,
    pub runway: Option<usize>,
}

impl DepartureRequest {
    /// An explicit gate number wins over a seed; neither means the first valid spot.
    pub fn gate_selection(&self) -> GateSelection {
        match (self.gate, self.seed) {
            (Some(number), _) => GateSelection::Number(number),
            (None, Some(seed)) => GateSelection::Seeded(seed),
            (None, None) => GateSelection::First,
        }
    }

    pub fn runway_selection(&self) -> RunwaySelection {
        self.runway
            .map(RunwaySelection::Index)
            .unwrap_or(RunwaySelection::Longest)
    }
}

pub fn load_snapshot(path: &Path) -> Result<FacilitySnapshot> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading facility snapshot {}", path.display()))?;
    let snapshot = FacilitySnapshot::from_json(&json)
        .with_context(|| format!("parsing facility snapshot {}", path.display()))?;
    Ok(snapshot)
}

/// Profile overrides from a JSON file; missing fields keep their defaults.
pub fn load_profile(path: Option<&Path>) -> Result<DepartureProfile> {
    let Some(path) = path else {
        return Ok(DepartureProfile::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading departure profile {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("parsing departure profile {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_number_overrides_seed() {
        let request = DepartureRequest {
            gate: Some(12),
            seed: Some(99),
            runway: None,
        };
        assert!(matches!(request.gate_selection(), GateSelection::Number(12)));

        let seeded = DepartureRequest {
            seed: Some(99),
            ..Default::default()
        };
        assert!(matches!(seeded.gate_selection(), GateSelection::Seeded(99)));
        assert!(matches!(
            DepartureRequest::default().gate_selection(),
            GateSelection::First
        ));
    }

    #[test]
    fn runway_defaults_to_longest() {
        assert!(matches!(
            DepartureRequest::default().runway_selection(),
            RunwaySelection::Longest
        ));
        let request = DepartureRequest {
            runway: Some(2),
            ..Default::default()
        };
        assert!(matches!(request.runway_selection(), RunwaySelection::Index(2)));
    }

    #[test]
    fn profile_file_overrides_selected_fields() {
        assert_eq!(load_profile(None).unwrap().taxi_speed_kts, 15.0);

        let file_name = format!("taxi-cli-profile-{}.json", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        fs::write(&path, r#"{ "pushback_speed_kts": 2.5 }"#).unwrap();
        let profile = load_profile(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(profile.pushback_speed_kts, 2.5);
        assert_eq!(profile.lineup_speed_kts, 5.0);
    }

    #[test]
    fn missing_snapshot_reports_path() {
        let err = load_snapshot(Path::new("/nonexistent/facility.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/facility.json"));
    }
}
