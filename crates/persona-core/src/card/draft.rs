//! Local edit buffer for the card's edit form.

use persona_types::interviewer::{Interviewer, InterviewerPatch, from_slider, snap_slider, to_slider};

/// One of the four personality sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Empathy,
    Rapport,
    Exploration,
    Speed,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Empathy,
        Dimension::Rapport,
        Dimension::Exploration,
        Dimension::Speed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Empathy => "Empathy",
            Dimension::Rapport => "Rapport",
            Dimension::Exploration => "Exploration",
            Dimension::Speed => "Speed",
        }
    }
}

/// Editable fields with personality values in slider units (0.0-1.0).
///
/// Missing description/audio are held as empty strings, the way the form
/// inputs show them.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub name: String,
    pub empathy: f64,
    pub rapport: f64,
    pub exploration: f64,
    pub speed: f64,
    pub image: String,
    pub description: String,
    pub audio: String,
}

impl EditDraft {
    pub fn from_interviewer(interviewer: &Interviewer) -> Self {
        Self {
            name: interviewer.name.clone(),
            empathy: to_slider(interviewer.empathy),
            rapport: to_slider(interviewer.rapport),
            exploration: to_slider(interviewer.exploration),
            speed: to_slider(interviewer.speed),
            image: interviewer.image.clone(),
            description: interviewer.description.clone().unwrap_or_default(),
            audio: interviewer.audio.clone().unwrap_or_default(),
        }
    }

    pub fn dimension(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Empathy => self.empathy,
            Dimension::Rapport => self.rapport,
            Dimension::Exploration => self.exploration,
            Dimension::Speed => self.speed,
        }
    }

    /// Set a slider, clamped to [0, 1] and snapped to the 0.1 step.
    pub fn set_dimension(&mut self, dimension: Dimension, value: f64) {
        let value = snap_slider(value);
        match dimension {
            Dimension::Empathy => self.empathy = value,
            Dimension::Rapport => self.rapport = value,
            Dimension::Exploration => self.exploration = value,
            Dimension::Speed => self.speed = value,
        }
    }

    /// Every editable field, with sliders scaled back to stored integers.
    pub fn to_patch(&self) -> InterviewerPatch {
        InterviewerPatch {
            name: Some(self.name.clone()),
            empathy: Some(from_slider(self.empathy)),
            rapport: Some(from_slider(self.rapport)),
            exploration: Some(from_slider(self.exploration)),
            speed: Some(from_slider(self.speed)),
            image: Some(self.image.clone()),
            description: Some(self.description.clone()),
            audio: Some(self.audio.clone()),
            agent_id: None,
        }
    }
}
