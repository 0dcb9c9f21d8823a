use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stage of the shift workflow
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Opening,
    DuringShift,
    Closing,
    /// Terminal; only reachable through the verification gate
    Done,
}

impl Phase {
    /// Phases that carry a checklist
    pub const WORKING: [Phase; 3] = [Phase::Opening, Phase::DuringShift, Phase::Closing];

    /// Persisted name (`during_shift`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Opening => "opening",
            Phase::DuringShift => "during_shift",
            Phase::Closing => "closing",
            Phase::Done => "done",
        }
    }

    /// Display label (`DURING SHIFT`, ...)
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Opening => "OPENING",
            Phase::DuringShift => "DURING SHIFT",
            Phase::Closing => "CLOSING",
            Phase::Done => "DONE",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opening" => Ok(Phase::Opening),
            "during_shift" => Ok(Phase::DuringShift),
            "closing" => Ok(Phase::Closing),
            "done" => Ok(Phase::Done),
            other => anyhow::bail!("Unknown phase: {}", other),
        }
    }
}

/// Label for a raw phase name; unrecognized names are uppercased as they are
pub fn phase_label(raw: &str) -> String {
    match raw.parse::<Phase>() {
        Ok(phase) => phase.label().to_string(),
        Err(_) => raw.to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Phase::Opening.label(), "OPENING");
        assert_eq!(Phase::DuringShift.label(), "DURING SHIFT");
        assert_eq!(Phase::Closing.label(), "CLOSING");
        assert_eq!(Phase::Done.label(), "DONE");
    }

    #[test]
    fn test_phase_label_unrecognized() {
        assert_eq!(phase_label("during_shift"), "DURING SHIFT");
        assert_eq!(phase_label("lunch_break"), "LUNCH_BREAK");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Phase::DuringShift).unwrap();
        assert_eq!(json, "\"during_shift\"");

        let phase: Phase = serde_json::from_str("\"closing\"").unwrap();
        assert_eq!(phase, Phase::Closing);
    }

    #[test]
    fn test_from_str_round_trips_names() {
        for phase in [Phase::Opening, Phase::DuringShift, Phase::Closing, Phase::Done] {
            assert_eq!(phase.as_str().parse::<Phase>().unwrap(), phase);
        }
        assert!("DONE".parse::<Phase>().is_err());
    }
}
