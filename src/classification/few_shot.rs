//! Remote few-shot classifier
//!
//! Sends a fixed instruction with twenty labeled exemplars plus the target
//! comment to a [`ClassificationBackend`] and expects exactly one
//! `[Sentiment][Category]` pair back.
//!
//! Degradation is per item and never raises:
//! - no credential, or a backend that fails its one-time reachability check →
//!   `(NotConfigured, NotConfigured)` for every item
//! - timeout, transport error, empty or unparsable reply → `(Error, ClassificationFailed)`

use super::heuristic::is_placeholder;
use super::FeedbackClassifier;
use crate::config::ClassifierConfig;
use crate::services::llm::{ClassificationBackend, LlmConfig, LlmService};
use crate::types::{Category, ClassificationResult, Sentiment};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Labeled exemplars steering the classification
pub const EXEMPLARS: &[(&str, Sentiment, Category)] = &[
    ("La experiencia fue buena", Sentiment::Positive, Category::Satisfaction),
    ("Estoy satisfecho con el dashboard", Sentiment::Positive, Category::Satisfaction),
    (
        "El diseño es agradable pero falta agregar mas estadisticos llamativos",
        Sentiment::Neutral,
        Category::Visualization,
    ),
    (
        "Seria bueno agregar mas ayuda visual o mensaje explicativo de que trata",
        Sentiment::Neutral,
        Category::Explainability,
    ),
    (
        "Creo que se puede mejorar los graficos para una explicacion mas detallada",
        Sentiment::Neutral,
        Category::Visualization,
    ),
    ("Todo bien", Sentiment::Positive, Category::Satisfaction),
    (
        "Cumple su funcion de analizar bien la rotacion de personal",
        Sentiment::Positive,
        Category::Utility,
    ),
    ("No tuve inconvenientes, excelente", Sentiment::Positive, Category::Satisfaction),
    ("Podria simplificarse para hacer mas interactivo", Sentiment::Neutral, Category::Usability),
    (
        "El sistema es bueno pero necesita una retroalimentacion",
        Sentiment::Neutral,
        Category::Explainability,
    ),
    ("Es una herramienta util para tomar decisiones", Sentiment::Positive, Category::Utility),
    (
        "Al principio parece complejo pero con el uso es facil",
        Sentiment::Positive,
        Category::LearningCurve,
    ),
    (
        "Muestra informacion relevante y facilita el analisis de datos",
        Sentiment::Positive,
        Category::Utility,
    ),
    ("Me costo ubicar los filtros", Sentiment::Negative, Category::Navigation),
    ("Podria mejorar su explicabilidad", Sentiment::Neutral, Category::Explainability),
    ("Facil de entender", Sentiment::Positive, Category::Usability),
    ("Puede mejorar su usabilidad", Sentiment::Neutral, Category::Usability),
    ("Los graficos y colores son didacticos", Sentiment::Positive, Category::Visualization),
    (
        "Se podrian agregar descripciones para cada metrica",
        Sentiment::Neutral,
        Category::Explainability,
    ),
    (
        "Algunas secciones podrian mejorar para una mejor navegacion",
        Sentiment::Neutral,
        Category::Navigation,
    ),
];

/// One `[..][..]` pair; brackets may not nest
static LABEL_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*([^\[\]]+?)\s*\]\s*\[\s*([^\[\]]+?)\s*\]").expect("Valid label pair regex")
});

/// Fixed instruction plus exemplars; the target comment is appended per call
static INSTRUCTION: Lazy<String> = Lazy::new(|| {
    let mut prompt = String::from(
        "You are a UX and business intelligence analyst. Classify end-user feedback \
         about a dashboard using the reference examples below.\n\nREFERENCE EXAMPLES:\n",
    );
    for (index, (text, sentiment, category)) in EXEMPLARS.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. '{}' -> [{}][{}]\n",
            index + 1,
            text,
            sentiment,
            category
        ));
    }
    prompt.push_str(
        "\nINSTRUCTION:\nAnalyze the user's comment and answer ONLY in the format \
         [Sentiment][Category].\nSentiment is one of: Positive, Neutral, Negative.\n\
         Category is one of: Satisfaction, Visualization, Explainability, Usability, \
         Navigation, Utility, Learning curve.\n",
    );
    prompt
});

/// Full prompt for one comment
pub fn build_prompt(comment: &str) -> String {
    format!("{}\nComment to analyze: '{}'", *INSTRUCTION, comment.trim())
}

/// Parse a backend reply; `None` unless exactly one valid pair is present
pub fn parse_reply(reply: &str) -> Option<ClassificationResult> {
    let mut pairs = LABEL_PAIR.captures_iter(reply);
    let captures = pairs.next()?;
    if pairs.next().is_some() {
        return None;
    }

    let sentiment = Sentiment::from_label(&captures[1])?;
    let category = Category::from_label(&captures[2])?;
    Some(ClassificationResult::new(sentiment, category))
}

/// Few-shot classifier over a remote completion backend
pub struct RemoteFewShotClassifier {
    backend: Option<Arc<dyn ClassificationBackend>>,
    timeout: Duration,

    /// Outcome of the reachability check; only consulted when `verify` is set
    reachable: OnceCell<bool>,
    verify: bool,
}

impl RemoteFewShotClassifier {
    /// Construct from configuration; missing credentials are not an error
    ///
    /// The backend is checked once, before the first item, and an
    /// unreachable or rejecting backend behaves like a missing credential.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let Some(llm_config) = LlmConfig::from_classifier(config) else {
            info!(
                "{} not set, remote classification disabled",
                config.provider.api_key_var()
            );
            return Self::not_configured();
        };

        match LlmService::new(llm_config) {
            Ok(service) => {
                info!("Remote classification enabled ({:?})", config.provider);
                Self::with_checked_backend(Arc::new(service), config.timeout())
            }
            Err(e) => {
                warn!(error = %e, "Remote classification backend unavailable");
                Self::not_configured()
            }
        }
    }

    /// Trust the backend without a reachability check
    pub fn with_backend(backend: Arc<dyn ClassificationBackend>, timeout: Duration) -> Self {
        Self {
            backend: Some(backend),
            timeout,
            reachable: OnceCell::new(),
            verify: false,
        }
    }

    /// Check the backend once before the first item
    pub fn with_checked_backend(backend: Arc<dyn ClassificationBackend>, timeout: Duration) -> Self {
        Self {
            verify: true,
            ..Self::with_backend(backend, timeout)
        }
    }

    /// Classifier that labels every item `(NotConfigured, NotConfigured)`
    pub fn not_configured() -> Self {
        Self {
            backend: None,
            timeout: Duration::ZERO,
            reachable: OnceCell::new(),
            verify: false,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    async fn is_reachable(&self, backend: &dyn ClassificationBackend) -> bool {
        if !self.verify {
            return true;
        }

        *self
            .reachable
            .get_or_init(|| async move {
                match tokio::time::timeout(self.timeout, backend.check()).await {
                    Ok(Ok(())) => true,
                    Ok(Err(e)) => {
                        warn!(error = %e, "Classification backend unreachable, labels will be NotConfigured");
                        false
                    }
                    Err(_) => {
                        warn!(
                            "Classification backend check timed out after {:?}, labels will be NotConfigured",
                            self.timeout
                        );
                        false
                    }
                }
            })
            .await
    }
}

#[async_trait]
impl FeedbackClassifier for RemoteFewShotClassifier {
    fn name(&self) -> &'static str {
        "remote_few_shot"
    }

    async fn classify(&self, text: &str) -> ClassificationResult {
        let Some(backend) = &self.backend else {
            return ClassificationResult::not_configured();
        };
        if !self.is_reachable(backend.as_ref()).await {
            return ClassificationResult::not_configured();
        }

        if is_placeholder(text) {
            return ClassificationResult::no_comment();
        }

        let prompt = build_prompt(text);
        let result = match tokio::time::timeout(self.timeout, backend.complete(&prompt)).await {
            Ok(Ok(reply)) => parse_reply(&reply).unwrap_or_else(|| {
                warn!("Unparsable classification reply: {:?}", reply.trim());
                ClassificationResult::failed()
            }),
            Ok(Err(e)) => {
                warn!(error = %e, "Classification call failed");
                ClassificationResult::failed()
            }
            Err(_) => {
                warn!("Classification call timed out after {:?}", self.timeout);
                ClassificationResult::failed()
            }
        };

        debug!("Remote classification: {} / {}", result.sentiment, result.category);
        result
    }
}
