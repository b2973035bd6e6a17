use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Store-assigned identifier for an interviewer (64-bit integer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterviewerId(pub i64);

impl fmt::Display for InterviewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InterviewerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<i64> for InterviewerId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Multiplier between the 0-1 slider value shown in the dashboard and the
/// integer persisted in the store.
pub const PERSONALITY_SCALE: f64 = 10.0;

/// Convert a persisted personality value to its slider value (`7` -> `0.7`).
pub fn to_slider(stored: i32) -> f64 {
    f64::from(stored) / PERSONALITY_SCALE
}

/// Convert a slider value to its persisted integer (`0.7` -> `7`).
///
/// Rounds to the nearest step so `0.7 * 10.0 == 7.000000000000001` stores 7.
pub fn from_slider(value: f64) -> i32 {
    (value * PERSONALITY_SCALE).round() as i32
}

/// Clamp a slider value to `[0, 1]` and snap it to the 0.1 step.
pub fn snap_slider(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    (value.clamp(0.0, 1.0) * PERSONALITY_SCALE).round() / PERSONALITY_SCALE
}

/// An AI interview persona.
///
/// Each interviewer is mirrored one-directionally onto a remote voice agent
/// (via `agent_id`). Personality dimensions are stored as integers scaled
/// x10 from the dashboard's 0-1 sliders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interviewer {
    pub id: InterviewerId,
    pub created_at: DateTime<Utc>,
    /// Display name, expected unique per `agent_id`.
    pub name: String,
    pub empathy: i32,
    pub rapport: i32,
    pub exploration: i32,
    pub speed: i32,
    /// Avatar reference (path or URL).
    pub image: String,
    pub description: Option<String>,
    /// Voice reference (path or URL).
    pub audio: Option<String>,
    /// Remote voice agent this persona is mirrored to.
    pub agent_id: Option<String>,
}

/// Payload for creating an interviewer. `name` is the only required field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewInterviewer {
    pub name: String,
    #[serde(default)]
    pub empathy: i32,
    #[serde(default)]
    pub rapport: i32,
    #[serde(default)]
    pub exploration: i32,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub agent_id: Option<String>,
}

/// Partial update of an interviewer. Absent fields are left untouched.
///
/// Fields the store does not know about are dropped during deserialization;
/// no other validation is applied before the patch reaches the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empathy: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rapport: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exploration: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

impl InterviewerPatch {
    /// True when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interviewer_id_parse() {
        let id: InterviewerId = "42".parse().unwrap();
        assert_eq!(id, InterviewerId(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_interviewer_id_rejects_garbage() {
        assert!("forty-two".parse::<InterviewerId>().is_err());
    }

    #[test]
    fn test_interviewer_id_handles_large_values() {
        let id: InterviewerId = "9007199254740993".parse().unwrap();
        assert_eq!(id.0, 9_007_199_254_740_993);
    }

    #[test]
    fn test_slider_conversion() {
        assert_eq!(to_slider(7), 0.7);
        assert_eq!(from_slider(0.7), 7);
        assert_eq!(from_slider(0.1 + 0.2), 3);
        for stored in 0..=10 {
            assert_eq!(from_slider(to_slider(stored)), stored);
        }
    }

    #[test]
    fn test_snap_slider() {
        assert_eq!(snap_slider(0.74), 0.7);
        assert_eq!(snap_slider(1.8), 1.0);
        assert_eq!(snap_slider(-0.3), 0.0);
        assert_eq!(snap_slider(f64::NAN), 0.0);
    }

    #[test]
    fn test_patch_ignores_unknown_fields() {
        let patch: InterviewerPatch =
            serde_json::from_str(r#"{"name":"Nova","favourite_colour":"teal"}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Nova"));
        assert!(patch.audio.is_none());
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = InterviewerPatch {
            empathy: Some(7),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "empathy": 7 }));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(InterviewerPatch::default().is_empty());
        let patch = InterviewerPatch {
            speed: Some(3),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_new_interviewer_defaults() {
        let new: NewInterviewer =
            serde_json::from_str(r#"{"name":"Lisa","agent_id":"agent_1"}"#).unwrap();
        assert_eq!(new.name, "Lisa");
        assert_eq!(new.empathy, 0);
        assert_eq!(new.image, "");
        assert_eq!(new.agent_id.as_deref(), Some("agent_1"));
    }
}
