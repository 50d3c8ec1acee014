use super::types::Modality;

/// Billable channels that apply to every period of a run.
///
/// Realtime audio is billed entirely through token prices, so it suppresses the
/// discrete speech-to-text and text-to-speech charges of the non-realtime voice path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostChannels {
    pub stt: bool,
    pub tts: bool,
    pub realtime_audio_tokens: bool,
    pub image: bool,
    pub telephony: bool,
}

impl CostChannels {
    pub fn resolve(modality: &Modality) -> Self {
        let discrete_voice = modality.has_voice && !modality.has_realtime_audio;
        Self {
            stt: discrete_voice,
            tts: discrete_voice,
            realtime_audio_tokens: modality.has_realtime_audio,
            image: modality.has_image_processing,
            telephony: modality
                .ivr_service
                .as_deref()
                .is_some_and(|service| !service.is_empty()),
        }
    }
}
