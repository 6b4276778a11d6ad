//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use application::{
    DialectClassifier, ProviderRouter, RelayService, VoiceReplyService,
    error::ApplicationError,
    ports::{
        AudioStream, InferencePort, InferenceResult, MediaStorePort, SpeechSynthesisPort,
        VoiceDeliveryPort, VoiceInfo,
    },
};
use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use bytes::Bytes;
use domain::{RoutingPolicy, SpeechProviderKind};
use infrastructure::AppConfig;
use presentation_http::{AppState, create_router};
use serde_json::{Value, json};
use tokio::sync::mpsc;

const MP3_FRAME: &[u8] = &[0xFF, 0xFB, 0x90, 0x64];

/// Inference stub answering with a fixed body or failing
struct StubInference {
    answer: Result<String, String>,
    calls: AtomicUsize,
}

impl StubInference {
    fn answering(answer: &str) -> Self {
        Self {
            answer: Ok(answer.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl InferencePort for StubInference {
    async fn generate_json(
        &self,
        _system_prompt: &str,
        _message: &str,
    ) -> Result<InferenceResult, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Ok(content) => Ok(InferenceResult {
                content: content.clone(),
                model: "stub-model".to_string(),
                tokens_used: Some(10),
                latency_ms: 1,
            }),
            Err(message) => Err(ApplicationError::Inference(message.clone())),
        }
    }
}

/// How a speech stub answers
enum Reply {
    Audio,
    Rejected(String),
    Throttled(String),
}

/// Speech stub returning one MP3 frame or a provider error
struct StubSpeech {
    kind: SpeechProviderKind,
    reply: Reply,
}

impl StubSpeech {
    fn ok(kind: SpeechProviderKind) -> Self {
        Self {
            kind,
            reply: Reply::Audio,
        }
    }

    fn failing(kind: SpeechProviderKind, detail: &str) -> Self {
        Self {
            kind,
            reply: Reply::Rejected(detail.to_string()),
        }
    }

    fn throttled(kind: SpeechProviderKind, detail: &str) -> Self {
        Self {
            kind,
            reply: Reply::Throttled(detail.to_string()),
        }
    }
}

#[async_trait]
impl SpeechSynthesisPort for StubSpeech {
    async fn synthesize(&self, _text: &str, _voice_id: &str) -> Result<AudioStream, ApplicationError> {
        match &self.reply {
            Reply::Rejected(detail) => Err(ApplicationError::Synthesis {
                provider: self.kind,
                detail: detail.clone(),
            }),
            Reply::Throttled(detail) => Err(ApplicationError::RateLimited {
                service: self.kind.to_string(),
                detail: detail.clone(),
            }),
            Reply::Audio => Ok(AudioStream::from_chunks(
                self.kind,
                vec![Bytes::from_static(MP3_FRAME)],
            )),
        }
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, ApplicationError> {
        Ok(vec![VoiceInfo {
            id: format!("{}-voice", self.kind.config_key()),
            name: "Stub".to_string(),
            description: None,
            accent: None,
        }])
    }

    fn provider(&self) -> SpeechProviderKind {
        self.kind
    }
}

/// In-memory clip store
#[derive(Default)]
struct MemoryStore {
    clips: Mutex<HashMap<String, Bytes>>,
}

#[async_trait]
impl MediaStorePort for MemoryStore {
    async fn put(&self, audio: Bytes) -> Result<String, ApplicationError> {
        let mut clips = self.clips.lock().expect("store lock");
        let name = format!("audio_{}.mp3", clips.len() + 1);
        clips.insert(name.clone(), audio);
        Ok(name)
    }

    async fn get(&self, name: &str) -> Result<Option<Bytes>, ApplicationError> {
        Ok(self.clips.lock().expect("store lock").get(name).cloned())
    }
}

/// Delivery stub forwarding `(recipient, media_url)` to the test
struct ChannelDelivery {
    sent: mpsc::UnboundedSender<(String, String)>,
}

#[async_trait]
impl VoiceDeliveryPort for ChannelDelivery {
    async fn send_voice(&self, recipient: &str, media_url: &str) -> Result<String, ApplicationError> {
        self.sent
            .send((recipient.to_string(), media_url.to_string()))
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok("MM1".to_string())
    }
}

fn relay(inference: Arc<StubInference>, elevenlabs: StubSpeech, cartesia: StubSpeech) -> Arc<RelayService> {
    let classifier = DialectClassifier::new(inference);
    let router = ProviderRouter::new(RoutingPolicy::Hybrid)
        .with_provider(Arc::new(elevenlabs))
        .with_provider(Arc::new(cartesia));
    Arc::new(RelayService::new(classifier, router))
}

fn server_with(inference: Arc<StubInference>, elevenlabs: StubSpeech, cartesia: StubSpeech) -> TestServer {
    let state = AppState::new(relay(inference, elevenlabs, cartesia), AppConfig::default());

    TestServer::new(create_router(state)).expect("Failed to create test server")
}

/// Server with WhatsApp replies enabled, plus the delivery receiver
fn whatsapp_server(answer: &str) -> (TestServer, mpsc::UnboundedReceiver<(String, String)>) {
    let relay = relay(
        Arc::new(StubInference::answering(answer)),
        StubSpeech::ok(SpeechProviderKind::ElevenLabs),
        StubSpeech::ok(SpeechProviderKind::Cartesia),
    );
    let (tx, rx) = mpsc::unbounded_channel();
    let service = VoiceReplyService::new(
        Arc::clone(&relay),
        Arc::new(MemoryStore::default()),
        Arc::new(ChannelDelivery { sent: tx }),
        "https://relay.example",
    );
    let state = AppState::new(relay, AppConfig::default()).with_voice_reply(service);

    (
        TestServer::new(create_router(state)).expect("Failed to create test server"),
        rx,
    )
}

fn server(inference: StubInference) -> TestServer {
    server_with(
        Arc::new(inference),
        StubSpeech::ok(SpeechProviderKind::ElevenLabs),
        StubSpeech::ok(SpeechProviderKind::Cartesia),
    )
}

#[tokio::test]
async fn root_reports_running() {
    let server = server(StubInference::answering("{}"));

    let response = server.get("/").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({"status": "ok", "message": "Voice relay is running"}));
}

#[tokio::test]
async fn health_reports_version() {
    let server = server(StubInference::answering("{}"));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn hinglish_is_streamed_from_cartesia() {
    let server = server(StubInference::answering(
        r#"{"dialect": "hinglish", "native_text": "सही है, Done करते हैं।"}"#,
    ));

    let response = server
        .post("/generate-audio")
        .json(&json!({"text": "Sahi hai, done karte hain.", "sender": "Rahul"}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "audio/mpeg");
    assert_eq!(response.header("x-dialect"), "hinglish");
    assert_eq!(response.header("x-speech-provider"), "cartesia");
    assert_eq!(response.header("x-classification"), "model");
    assert_eq!(response.as_bytes().as_ref(), MP3_FRAME);
}

#[tokio::test]
async fn english_is_streamed_from_elevenlabs() {
    let server = server(StubInference::answering(r#"{"dialect": "english"}"#));

    let response = server
        .post("/generate-audio")
        .json(&json!({"text": "See you at six.", "sender": "Sneha"}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-speech-provider"), "elevenlabs");
}

#[tokio::test]
async fn classifier_failure_still_returns_audio() {
    let server = server(StubInference::failing("deadline exceeded"));

    let response = server
        .post("/generate-audio")
        .json(&json!({"text": "Sahi hai", "sender": "Sneha"}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-dialect"), "english");
    assert_eq!(response.header("x-classification"), "fallback");
    assert!(!response.as_bytes().is_empty());
}

#[tokio::test]
async fn provider_failure_returns_500_with_detail() {
    let server = server_with(
        Arc::new(StubInference::answering(r#"{"dialect": "hindi", "native_text": "नमस्ते"}"#)),
        StubSpeech::ok(SpeechProviderKind::ElevenLabs),
        StubSpeech::failing(SpeechProviderKind::Cartesia, "Invalid API key"),
    );

    let response = server
        .post("/generate-audio")
        .json(&json!({"text": "Namaste", "sender": "Rahul"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["detail"].as_str().expect("detail").contains("Invalid API key"));
    assert_eq!(body["code"], "synthesis_failed");
}

#[tokio::test]
async fn provider_throttling_returns_500_with_provider_text() {
    let server = server_with(
        Arc::new(StubInference::answering(r#"{"dialect": "english"}"#)),
        StubSpeech::throttled(
            SpeechProviderKind::ElevenLabs,
            "You have 3 credits remaining, 40 required",
        ),
        StubSpeech::ok(SpeechProviderKind::Cartesia),
    );

    let response = server
        .post("/generate-audio")
        .json(&json!({"text": "See you at six.", "sender": "Sneha"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "rate_limited");
    assert!(
        body["detail"]
            .as_str()
            .expect("detail")
            .contains("You have 3 credits remaining, 40 required")
    );
}

#[tokio::test]
async fn empty_text_is_rejected_before_classification() {
    let inference = Arc::new(StubInference::answering(r#"{"dialect": "english"}"#));
    let server = server_with(
        Arc::clone(&inference),
        StubSpeech::ok(SpeechProviderKind::ElevenLabs),
        StubSpeech::ok(SpeechProviderKind::Cartesia),
    );

    let response = server
        .post("/generate-audio")
        .json(&json!({"text": "", "sender": "X"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "validation_error");
    assert!(body["detail"].as_str().expect("detail").contains("text"));
    assert_eq!(inference.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let server = server(StubInference::answering("{}"));

    let response = server
        .post("/generate-audio")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{\"text\": "))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_sender_is_rejected() {
    let server = server(StubInference::answering("{}"));

    let response = server
        .post("/generate-audio")
        .json(&json!({"text": "Hello"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn voices_lists_both_providers() {
    let server = server(StubInference::answering("{}"));

    let response = server.get("/voices").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let providers = body.as_array().expect("array");
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[0]["provider"], "elevenlabs");
    assert_eq!(providers[1]["provider"], "cartesia");
    assert_eq!(providers[1]["voices"][0]["id"], "cartesia-voice");
    assert!(providers[0]["senders"]["Rahul"].is_string());
}

#[tokio::test]
async fn responses_carry_request_id() {
    let server = server(StubInference::answering("{}"));

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-abc"),
        )
        .await;

    assert_eq!(response.header("x-request-id"), "trace-abc");
}

#[tokio::test]
async fn whatsapp_message_is_answered_with_voice_note() {
    let (server, mut sent) = whatsapp_server(r#"{"dialect": "hinglish", "native_text": "सही है"}"#);

    let response = server
        .post("/webhook")
        .form(&[
            ("From", "whatsapp:+919876543210"),
            ("Body", "Sahi hai"),
            ("MessageSid", "SM1"),
            ("ProfileName", "Rahul"),
        ])
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "text/xml");
    assert_eq!(response.text(), "<Response></Response>");

    let (recipient, media_url) = tokio::time::timeout(Duration::from_secs(5), sent.recv())
        .await
        .expect("voice note sent in time")
        .expect("delivery channel open");
    assert_eq!(recipient, "whatsapp:+919876543210");
    assert_eq!(media_url, "https://relay.example/media/audio_1.mp3");

    let clip = server.get("/media/audio_1.mp3").await;
    clip.assert_status_ok();
    assert_eq!(clip.header("content-type"), "audio/mpeg");
    assert_eq!(clip.as_bytes().as_ref(), MP3_FRAME);
}

#[tokio::test]
async fn whatsapp_message_without_text_is_only_acknowledged() {
    let (server, mut sent) = whatsapp_server(r#"{"dialect": "english"}"#);

    let response = server
        .post("/webhook")
        .form(&[("From", "whatsapp:+919876543210"), ("Body", "   ")])
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), "<Response></Response>");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sent.try_recv().is_err());
}

#[tokio::test]
async fn unknown_media_is_not_found() {
    let (server, _sent) = whatsapp_server(r#"{"dialect": "english"}"#);

    let response = server.get("/media/audio_404.mp3").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn webhook_is_not_found_when_disabled() {
    let server = server(StubInference::answering("{}"));

    let webhook = server
        .post("/webhook")
        .form(&[("From", "whatsapp:+919876543210"), ("Body", "Namaste")])
        .await;
    webhook.assert_status(StatusCode::NOT_FOUND);

    let media = server.get("/media/audio_1.mp3").await;
    media.assert_status(StatusCode::NOT_FOUND);
}
