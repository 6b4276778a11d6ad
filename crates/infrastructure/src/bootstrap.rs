//! Wiring of the relay pipeline from configuration

use std::sync::Arc;

use application::{
    ApplicationError, DialectClassifier, ProviderRouter, RelayService, VoiceReplyService,
};
use domain::SpeechProviderKind;
use tracing::info;

use crate::{AppConfig, FileMediaStore, InferenceAdapter, SpeechAdapter, TwilioDeliveryAdapter};

/// Build the speech adapter for one provider
///
/// # Errors
///
/// Returns an error if the provider settings are invalid.
pub fn build_speech_adapter(
    config: &AppConfig,
    provider: SpeechProviderKind,
) -> Result<SpeechAdapter, ApplicationError> {
    match provider {
        SpeechProviderKind::ElevenLabs => {
            SpeechAdapter::elevenlabs(config.speech.elevenlabs.client.clone())
        },
        SpeechProviderKind::Cartesia => SpeechAdapter::cartesia(config.speech.cartesia.client.clone()),
    }
}

/// Build the router with every provider the routing policy can select
///
/// # Errors
///
/// Returns an error if a reachable provider or its voice directory is
/// misconfigured.
pub fn build_router(config: &AppConfig) -> Result<ProviderRouter, ApplicationError> {
    let policy = config.routing_policy();
    let mut router = ProviderRouter::new(policy);

    for provider in policy.providers() {
        let adapter = build_speech_adapter(config, provider)?;
        let directory = config.voice_directory(provider)?;
        router = router
            .with_provider(Arc::new(adapter))
            .with_directory(directory);
    }

    Ok(router)
}

/// Build the full relay service
///
/// # Errors
///
/// Returns an error if any collaborator is misconfigured.
pub fn build_relay_service(config: &AppConfig) -> Result<RelayService, ApplicationError> {
    let inference = InferenceAdapter::from_config(config.inference.clone())?;
    let classifier =
        DialectClassifier::with_policy(Arc::new(inference), config.transliteration_policy());
    let router = build_router(config)?;

    info!(
        inference = ?config.inference.provider,
        model = config.inference.resolved_model(),
        routing = ?config.routing_policy(),
        transliteration = ?config.transliteration_policy(),
        "Relay pipeline ready"
    );

    Ok(RelayService::new(classifier, router))
}

/// Build the WhatsApp voice reply service, if enabled
///
/// # Errors
///
/// Returns an error if delivery is enabled but the Twilio settings are
/// incomplete.
pub fn build_voice_reply_service(
    config: &AppConfig,
    relay: Arc<RelayService>,
) -> Result<Option<VoiceReplyService>, ApplicationError> {
    let whatsapp = &config.whatsapp;
    if !whatsapp.enabled {
        return Ok(None);
    }

    let client_config = whatsapp
        .client_config()
        .map_err(|e| ApplicationError::Configuration(format!("whatsapp: {e}")))?;
    let delivery = TwilioDeliveryAdapter::new(client_config)?;
    let store = FileMediaStore::new(whatsapp.media_dir.clone());

    info!(
        public_url = %whatsapp.public_url,
        media_dir = %whatsapp.media_dir.display(),
        "WhatsApp voice replies enabled"
    );

    Ok(Some(VoiceReplyService::new(
        relay,
        Arc::new(store),
        Arc::new(delivery),
        whatsapp.public_url.clone(),
    )))
}

#[cfg(test)]
mod tests {
    use ai_core::InferenceConfig;
    use domain::RoutingPolicy;
    use secrecy::SecretString;

    use super::*;
    use crate::RoutingMode;

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.inference = InferenceConfig::gemini("gm-key");
        config.speech.elevenlabs.client.api_key = Some(SecretString::from("el-key".to_string()));
        config.speech.cartesia.client.api_key = Some(SecretString::from("ct-key".to_string()));
        config
    }

    #[test]
    fn hybrid_router_registers_both_providers() {
        let router = build_router(&config()).unwrap();
        assert_eq!(router.policy(), RoutingPolicy::Hybrid);
        assert!(router.provider(SpeechProviderKind::ElevenLabs).is_some());
        assert!(router.provider(SpeechProviderKind::Cartesia).is_some());
    }

    #[test]
    fn single_router_skips_unreachable_provider() {
        let mut config = config();
        config.routing.policy = RoutingMode::Single;
        config.routing.single_provider = SpeechProviderKind::Cartesia;
        config.speech.elevenlabs.client.api_key = None;

        let router = build_router(&config).unwrap();
        assert!(router.provider(SpeechProviderKind::ElevenLabs).is_none());
        assert!(router.provider(SpeechProviderKind::Cartesia).is_some());
    }

    #[test]
    fn directory_overrides_reach_router() {
        let mut config = config();
        config
            .speech
            .cartesia
            .voices
            .insert("Amit".to_string(), "amit-voice".to_string());

        let router = build_router(&config).unwrap();
        let directory = router.directory(SpeechProviderKind::Cartesia).unwrap();
        assert_eq!(directory.resolve_voice("Amit"), "amit-voice");
    }

    #[test]
    fn missing_speech_key_fails() {
        let mut config = config();
        config.speech.cartesia.client.api_key = None;
        assert!(matches!(
            build_router(&config),
            Err(ApplicationError::Configuration(_))
        ));
    }

    #[test]
    fn relay_service_builds() {
        assert!(build_relay_service(&config()).is_ok());
    }

    #[test]
    fn voice_replies_are_off_by_default() {
        let config = config();
        let relay = Arc::new(build_relay_service(&config).unwrap());
        assert!(build_voice_reply_service(&config, relay).unwrap().is_none());
    }

    #[test]
    fn enabled_voice_replies_need_twilio_credentials() {
        let mut config = config();
        config.whatsapp.enabled = true;
        let relay = Arc::new(build_relay_service(&config).unwrap());
        assert!(matches!(
            build_voice_reply_service(&config, Arc::clone(&relay)),
            Err(ApplicationError::Configuration(_))
        ));

        config.whatsapp.account_sid = Some("AC1".to_string());
        config.whatsapp.auth_token = Some(SecretString::from("tok".to_string()));
        config.whatsapp.from_number = Some("whatsapp:+14155238886".to_string());
        let service = build_voice_reply_service(&config, relay).unwrap().unwrap();
        assert_eq!(
            service.media_url("audio_1.mp3"),
            "http://localhost:8001/media/audio_1.mp3"
        );
    }
}
