//! Dialect classifier - LLM-backed dialect detection and transliteration
//!
//! Asks the language model for a JSON object of the form
//! `{"dialect": "<label>", "native_text": "<rendering>"}` and turns it into a
//! [`ClassificationResult`]. Callers that must never fail use
//! [`DialectClassifier::classify_or_fallback`].

use std::{fmt, fmt::Write as _, sync::Arc};

use domain::{ClassificationResult, Dialect, TransliterationPolicy};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{error::ApplicationError, ports::InferencePort};

/// Why a classification attempt produced no usable result
#[derive(Debug, Error)]
pub enum ClassificationError {
    /// The model call itself failed (network, timeout, provider error)
    #[error("Classification inference failed: {0}")]
    Inference(#[source] ApplicationError),

    /// The model answered with something that is not the expected JSON
    #[error("Malformed classification response: {0}")]
    MalformedResponse(String),

    /// The JSON lacked a required field
    #[error("Classification response is missing `{0}`")]
    MissingField(&'static str),
}

/// Raw model answer
#[derive(Debug, Deserialize)]
struct ClassifierResponse {
    #[serde(default)]
    dialect: Option<String>,
    #[serde(default)]
    native_text: Option<String>,
}

/// Classifies utterances by dialect and renders them in native script
pub struct DialectClassifier {
    inference: Arc<dyn InferencePort>,
    policy: TransliterationPolicy,
    system_prompt: String,
}

impl fmt::Debug for DialectClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialectClassifier")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl DialectClassifier {
    /// Create a classifier with the default transliteration policy
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self::with_policy(inference, TransliterationPolicy::default())
    }

    /// Create a classifier with an explicit transliteration policy
    pub fn with_policy(inference: Arc<dyn InferencePort>, policy: TransliterationPolicy) -> Self {
        Self {
            inference,
            policy,
            system_prompt: build_system_prompt(policy),
        }
    }

    /// Active transliteration policy
    pub const fn policy(&self) -> TransliterationPolicy {
        self.policy
    }

    /// Classify `text`, surfacing every failure
    ///
    /// # Errors
    ///
    /// Returns `ClassificationError` if the model call fails or its answer
    /// cannot be interpreted.
    #[instrument(skip(self, text), fields(text_len = text.len(), policy = ?self.policy))]
    pub async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassificationError> {
        let result = self
            .inference
            .generate_json(&self.system_prompt, text)
            .await
            .map_err(ClassificationError::Inference)?;

        debug!(
            model = %result.model,
            latency_ms = result.latency_ms,
            response_len = result.content.len(),
            "Classifier responded"
        );

        parse_response(&result.content, text)
    }

    /// Classify `text`, defaulting to English with the original text on any failure
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn classify_or_fallback(&self, text: &str) -> ClassificationResult {
        match self.classify(text).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Dialect classification failed, falling back to english");
                ClassificationResult::fallback(text)
            },
        }
    }
}

/// Interpret a raw model answer
fn parse_response(
    response: &str,
    original_text: &str,
) -> Result<ClassificationResult, ClassificationError> {
    let json_str = extract_json(response);

    let parsed: ClassifierResponse = serde_json::from_str(json_str)
        .map_err(|e| ClassificationError::MalformedResponse(e.to_string()))?;

    let label = parsed
        .dialect
        .filter(|label| !label.trim().is_empty())
        .ok_or(ClassificationError::MissingField("dialect"))?;

    let dialect = Dialect::parse(&label).unwrap_or_else(|| {
        warn!(label = %label, "Unknown dialect label, treating as mixed");
        Dialect::Mixed
    });

    let rendered_text = parsed
        .native_text
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| original_text.to_string());

    Ok(ClassificationResult::from_model(dialect, rendered_text))
}

/// Extract JSON from a potentially markdown-wrapped response
fn extract_json(response: &str) -> &str {
    let response = response.trim();

    // ```json ... ``` blocks
    if let Some(start) = response.find("```json") {
        if let Some(end) = response[start + 7..].find("```") {
            return response[start + 7..start + 7 + end].trim();
        }
    }

    // ``` ... ``` blocks
    if let Some(start) = response.find("```") {
        if let Some(end) = response[start + 3..].find("```") {
            return response[start + 3..start + 3 + end].trim();
        }
    }

    // Outermost { ... }; start <= end guards against input like "} {"
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if start <= end {
                return &response[start..=end];
            }
        }
    }

    response
}

fn build_system_prompt(policy: TransliterationPolicy) -> String {
    let mut prompt = String::from(
        "You are a linguistic expert specializing in Indian languages.\n\
         The user message is a single chat utterance. Do two things:\n\n\
         1. Identify its language or dialect. Answer with exactly one of these labels:\n",
    );

    for dialect in Dialect::ALL {
        let _ = writeln!(
            prompt,
            "   - {} (native script: {})",
            dialect.label(),
            dialect.native_script()
        );
    }

    prompt.push_str(
        "   Use \"hinglish\" for Hindi written in Latin script mixed with English words, \
         and \"mixed\" when several Indian languages are combined.\n\n\
         2. Transliterate the Indic words into the native script of that dialect.\n\n",
    );

    match policy {
        TransliterationPolicy::PreserveLatinLoanwords => prompt.push_str(
            "CRITICAL RULE FOR PRONUNCIATION (CODE-SWITCHING):\n\
             - If a word is English (e.g. 'Done', 'Scene', 'Late', 'Bro'), KEEP IT IN LATIN SCRIPT.\n\
             - Do NOT transliterate English words into the native script.\n\
             - Only transliterate the Indic words.\n\n\
             Example: \"Sahi hai, done karte hain.\" -> \"सही है, Done करते हैं।\"\n\
             Example: \"Main late ho gaya.\" -> \"मैं Late हो गया।\"\n\n",
        ),
        TransliterationPolicy::Phonetic => prompt.push_str(
            "PRONUNCIATION RULE:\n\
             - Render EVERY word phonetically in the native script, English loanwords included.\n\n\
             Example: \"Sahi hai, done karte hain.\" -> \"सही है, डन करते हैं।\"\n\
             Example: \"Main late ho gaya.\" -> \"मैं लेट हो गया।\"\n\n",
        ),
    }

    prompt.push_str(
        "If the text is plain English, return it unchanged as native_text.\n\n\
         Respond with JSON only:\n\
         {\"dialect\": \"<label>\", \"native_text\": \"<transliterated text>\"}",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use domain::ClassificationSource;

    use super::*;
    use crate::ports::{InferenceResult, MockInferencePort};

    fn inference_returning(content: &'static str) -> Arc<dyn InferencePort> {
        let mut mock = MockInferencePort::new();
        mock.expect_generate_json().returning(move |_, _| {
            Ok(InferenceResult {
                content: content.to_string(),
                model: "gemini-1.5-flash".to_string(),
                tokens_used: Some(42),
                latency_ms: 120,
            })
        });
        Arc::new(mock)
    }

    fn failing_inference() -> Arc<dyn InferencePort> {
        let mut mock = MockInferencePort::new();
        mock.expect_generate_json()
            .returning(|_, _| Err(ApplicationError::Inference("timeout after 15000ms".into())));
        Arc::new(mock)
    }

    #[tokio::test]
    async fn classifies_hinglish() {
        let classifier = DialectClassifier::new(inference_returning(
            r#"{"dialect": "hinglish", "native_text": "सही है, Done करते हैं।"}"#,
        ));

        let result = classifier.classify("Sahi hai, done karte hain.").await.unwrap();

        assert_eq!(result.dialect, Dialect::Hinglish);
        assert_eq!(result.rendered_text, "सही है, Done करते हैं।");
        assert_eq!(result.source, ClassificationSource::Model);
    }

    #[tokio::test]
    async fn passes_text_as_user_message() {
        let mut mock = MockInferencePort::new();
        mock.expect_generate_json()
            .withf(|system, message| {
                system.contains("hinglish") && message.starts_with("Main late ho gaya.")
            })
            .times(1)
            .returning(|_, _| {
                Ok(InferenceResult {
                    content: r#"{"dialect":"hindi","native_text":"मैं Late हो गया।"}"#.to_string(),
                    model: "m".to_string(),
                    tokens_used: None,
                    latency_ms: 1,
                })
            });

        let classifier = DialectClassifier::new(Arc::new(mock));
        let result = classifier.classify("Main late ho gaya.").await.unwrap();
        assert_eq!(result.dialect, Dialect::Hindi);
    }

    #[tokio::test]
    async fn strips_code_fences() {
        let classifier = DialectClassifier::new(inference_returning(
            "```json\n{\"dialect\": \"English\", \"native_text\": \"On my way\"}\n```",
        ));
        let result = classifier.classify("On my way").await.unwrap();
        assert_eq!(result.dialect, Dialect::English);
    }

    #[tokio::test]
    async fn missing_native_text_uses_original() {
        let classifier = DialectClassifier::new(inference_returning(r#"{"dialect": "hindi"}"#));
        let result = classifier.classify("Kya haal hai").await.unwrap();
        assert_eq!(result.dialect, Dialect::Hindi);
        assert_eq!(result.rendered_text, "Kya haal hai");
    }

    #[tokio::test]
    async fn blank_native_text_uses_original() {
        let classifier = DialectClassifier::new(inference_returning(
            r#"{"dialect": "hinglish", "native_text": "  "}"#,
        ));
        let result = classifier.classify("Chalo bro").await.unwrap();
        assert_eq!(result.rendered_text, "Chalo bro");
    }

    #[tokio::test]
    async fn unknown_label_becomes_mixed() {
        let classifier = DialectClassifier::new(inference_returning(
            r#"{"dialect": "bhojpuri", "native_text": "का हाल बा"}"#,
        ));
        let result = classifier.classify("Ka haal ba").await.unwrap();
        assert_eq!(result.dialect, Dialect::Mixed);
        assert!(!result.is_fallback());
    }

    #[tokio::test]
    async fn missing_dialect_is_an_error() {
        let classifier =
            DialectClassifier::new(inference_returning(r#"{"native_text": "सही है"}"#));
        let err = classifier.classify("Sahi hai").await.unwrap_err();
        assert!(matches!(err, ClassificationError::MissingField("dialect")));
    }

    #[tokio::test]
    async fn prose_is_malformed() {
        let classifier =
            DialectClassifier::new(inference_returning("I think this is Hindi."));
        let err = classifier.classify("Sahi hai").await.unwrap_err();
        assert!(matches!(err, ClassificationError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn inference_failure_is_reported() {
        let classifier = DialectClassifier::new(failing_inference());
        let err = classifier.classify("Sahi hai").await.unwrap_err();
        assert!(matches!(err, ClassificationError::Inference(_)));
    }

    #[tokio::test]
    async fn fallback_on_inference_failure() {
        let classifier = DialectClassifier::new(failing_inference());
        let result = classifier.classify_or_fallback("Sahi hai, done karte hain.").await;

        assert_eq!(result.dialect, Dialect::English);
        assert_eq!(result.rendered_text, "Sahi hai, done karte hain.");
        assert!(result.is_fallback());
    }

    #[tokio::test]
    async fn fallback_on_unparseable_output() {
        let classifier = DialectClassifier::new(inference_returning("not json at all"));
        let result = classifier.classify_or_fallback("Theek hai").await;
        assert!(result.is_fallback());
        assert_eq!(result.rendered_text, "Theek hai");
    }

    #[test]
    fn prompt_follows_policy() {
        let preserve = build_system_prompt(TransliterationPolicy::PreserveLatinLoanwords);
        assert!(preserve.contains("KEEP IT IN LATIN SCRIPT"));
        assert!(preserve.contains("मैं Late हो गया।"));

        let phonetic = build_system_prompt(TransliterationPolicy::Phonetic);
        assert!(phonetic.contains("English loanwords included"));
        assert!(phonetic.contains("मैं लेट हो गया।"));
        assert!(!phonetic.contains("KEEP IT IN LATIN SCRIPT"));
    }

    #[test]
    fn prompt_lists_every_label() {
        let prompt = build_system_prompt(TransliterationPolicy::default());
        for dialect in Dialect::ALL {
            assert!(prompt.contains(dialect.label()), "missing {dialect}");
        }
    }

    #[test]
    fn extract_json_plain() {
        let json = r#"{"dialect":"hindi"}"#;
        assert_eq!(extract_json(json), json);
    }

    #[test]
    fn extract_json_with_bare_fence() {
        let response = "```\n{\"dialect\":\"tamil\"}\n```";
        assert_eq!(extract_json(response), r#"{"dialect":"tamil"}"#);
    }

    #[test]
    fn extract_json_with_surrounding_prose() {
        let response = r#"Here you go: {"dialect":"bengali"} Hope that helps."#;
        assert_eq!(extract_json(response), r#"{"dialect":"bengali"}"#);
    }

    #[test]
    fn extract_json_reversed_braces() {
        assert_eq!(extract_json("} {"), "} {");
    }

    mod properties {
        use domain::TransliterationPolicy;
        use proptest::prelude::*;

        use super::super::*;

        proptest! {
            #[test]
            fn arbitrary_answers_never_panic(answer in ".{0,200}", text in "[a-z ]{1,40}") {
                if let Ok(result) = parse_response(&answer, &text) {
                    prop_assert!(!result.rendered_text.trim().is_empty() || text.trim().is_empty());
                }
            }

            #[test]
            fn any_label_yields_a_dialect(label in "[A-Za-z_]{1,16}") {
                let answer = format!(r#"{{"dialect": "{label}"}}"#);
                let result = parse_response(&answer, "Sahi hai").unwrap();
                prop_assert_eq!(result.rendered_text, "Sahi hai");
            }

            #[test]
            fn fenced_json_is_extracted(label in "hindi|english|tamil") {
                let answer = format!("```json\n{{\"dialect\": \"{label}\"}}\n```");
                let result = parse_response(&answer, "text").unwrap();
                prop_assert_eq!(result.dialect.label(), label.as_str());
            }
        }

        #[test]
        fn prompt_differs_by_policy() {
            assert_ne!(
                build_system_prompt(TransliterationPolicy::PreserveLatinLoanwords),
                build_system_prompt(TransliterationPolicy::Phonetic)
            );
        }
    }
}
