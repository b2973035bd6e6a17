//! Fixed avatar and voice options offered by the dashboard editor.

use serde::Serialize;

/// One entry in the avatar gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvatarOption {
    pub id: u32,
    pub img: &'static str,
}

/// One entry in the voice picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioOption {
    pub label: &'static str,
    pub value: &'static str,
}

pub const AVATAR_OPTIONS: &[AvatarOption] = &[
    AvatarOption {
        id: 100,
        img: "/interviewers/Lisa.png",
    },
    AvatarOption {
        id: 101,
        img: "/interviewers/Bob.png",
    },
];

pub const AUDIO_OPTIONS: &[AudioOption] = &[
    AudioOption {
        label: "Lisa (Female)",
        value: "/audio/Lisa.wav",
    },
    AudioOption {
        label: "Bob (Male)",
        value: "/audio/Bob.wav",
    },
];

pub fn avatar_by_id(id: u32) -> Option<&'static AvatarOption> {
    AVATAR_OPTIONS.iter().find(|a| a.id == id)
}

pub fn audio_by_value(value: &str) -> Option<&'static AudioOption> {
    AUDIO_OPTIONS.iter().find(|a| a.value == value)
}
