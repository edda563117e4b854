//! Voice assignment for dialogue turns.
//!
//! Binary policy: a case-insensitive match against the configured male
//! speaker name selects the male voice, everything else gets the female
//! voice. More than two speakers or non-binary voice pools are a known
//! limitation of the current pipeline.

use crate::config::SynthesisConfig;
use crate::dialogue::DialogueTurn;

/// A dialogue turn with its assigned synthesis voice.
#[derive(Debug, Clone)]
pub struct VoicedTurn {
    /// The structured turn this voice belongs to.
    pub turn: DialogueTurn,
    /// Voice id passed to the synthesis service.
    pub voice: String,
}

/// Pick a voice for one speaker.
///
/// Unicode-lowercase equality against `male_name`; a match selects
/// `male_voice`, anything else `female_voice`.
#[must_use]
pub fn assign_voice<'a>(
    speaker_name: &str,
    male_name: &str,
    male_voice: &'a str,
    female_voice: &'a str,
) -> &'a str {
    if speaker_name.to_lowercase() == male_name.to_lowercase() {
        male_voice
    } else {
        female_voice
    }
}

/// Assign a voice to every turn, preserving turn order.
#[must_use]
pub fn assign_voices(
    turns: Vec<DialogueTurn>,
    male_name: &str,
    synthesis: &SynthesisConfig,
) -> Vec<VoicedTurn> {
    turns
        .into_iter()
        .map(|turn| {
            let voice = assign_voice(
                &turn.name,
                male_name,
                &synthesis.male_voice,
                &synthesis.female_voice,
            )
            .to_owned();
            VoicedTurn { turn, voice }
        })
        .collect()
}
