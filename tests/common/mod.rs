//! Common test fixtures and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use usability_core::services::ClassificationBackend;
use usability_core::{ResponseRecord, SurveyId, UsabilityError};

pub const SURVEY: &str = "DASHBOARD_GENERAL";

/// Sum of the 21 fixture scores
pub const SCORE_SUM: f64 = 1480.0;

/// Answers and comments of the 21 valid fixture respondents
pub const RESPONDENTS: [([i64; 10], Option<&str>); 21] = [
    ([5, 1, 5, 1, 5, 1, 5, 1, 5, 1], Some("Excelente, muy facil de usar")),
    ([4, 2, 4, 2, 4, 2, 4, 2, 4, 2], Some("Me costó ubicar los filtros")),
    ([3, 3, 3, 3, 3, 3, 3, 3, 3, 3], None),
    ([4, 1, 4, 1, 4, 1, 4, 1, 4, 1], Some("Los gráficos y colores son didácticos")),
    ([2, 4, 2, 4, 2, 4, 2, 4, 2, 4], Some("Es confuso, no encontré el menú de navegación")),
    ([5, 2, 5, 2, 5, 2, 5, 2, 5, 2], Some("Todo bien")),
    ([4, 2, 4, 2, 4, 2, 4, 2, 4, 1], Some("Sin comentario")),
    ([3, 2, 4, 2, 3, 2, 4, 2, 3, 2], Some("Podría mejorar su explicabilidad")),
    ([5, 1, 4, 1, 5, 2, 4, 1, 5, 1], Some("Es una herramienta útil para tomar decisiones")),
    ([4, 2, 4, 1, 4, 2, 3, 2, 4, 2], Some("Se podrían agregar descripciones para cada métrica")),
    ([2, 3, 3, 4, 2, 3, 3, 4, 2, 3], Some("Muy lento y complicado")),
    ([4, 1, 5, 1, 4, 1, 5, 2, 4, 1], Some("Fácil de entender")),
    ([3, 2, 3, 2, 4, 3, 3, 2, 3, 2], Some("Algunas secciones podrían mejorar para una mejor navegación")),
    ([5, 1, 5, 1, 5, 1, 5, 1, 5, 2], Some("Excelente")),
    ([4, 2, 3, 2, 4, 2, 4, 2, 3, 3], Some("")),
    ([1, 5, 2, 4, 1, 5, 2, 4, 1, 5], Some("Terrible, no funciona el filtro")),
    ([4, 2, 4, 2, 5, 1, 4, 2, 4, 2], Some("Cumple su función de analizar bien la rotación de personal")),
    ([3, 3, 4, 2, 3, 3, 4, 2, 3, 3], Some("Sería bueno agregar más ayuda visual o mensaje explicativo")),
    ([5, 1, 5, 2, 4, 1, 5, 1, 4, 1], Some("Estoy satisfecho con el dashboard")),
    ([4, 1, 4, 2, 4, 1, 4, 2, 4, 1], Some("N/A")),
    ([3, 2, 4, 3, 3, 2, 4, 3, 3, 2], Some("Al principio parece complejo pero con el uso es fácil")),
];

/// Per-respondent SUS scores of [`RESPONDENTS`], in order
pub const SCORES: [f64; 21] = [
    100.0, 75.0, 50.0, 87.5, 25.0, 87.5, 77.5, 67.5, 92.5, 75.0, 37.5, 90.0, 62.5, 97.5, 67.5,
    10.0, 80.0, 60.0, 92.5, 82.5, 62.5,
];

/// Comments that are real feedback (not empty or a placeholder)
pub const COMMENTED: usize = 17;

pub fn survey() -> SurveyId {
    SurveyId::new(SURVEY)
}

pub fn expected_mean() -> f64 {
    SCORE_SUM / RESPONDENTS.len() as f64
}

/// The 21 valid respondents, one excluded respondent and a record of another survey
pub fn snapshot() -> Vec<ResponseRecord> {
    let mut records: Vec<ResponseRecord> = RESPONDENTS
        .iter()
        .enumerate()
        .map(|(index, (answers, comment))| {
            ResponseRecord::new(SURVEY, format!("r{:02}", index + 1), *answers, *comment)
        })
        .collect();

    records.push(ResponseRecord::new(
        SURVEY,
        "r22",
        [4, 2, 6, 2, 4, 2, 4, 2, 4, 2],
        Some("Valor fuera de rango"),
    ));
    records.push(ResponseRecord::new(
        "ENCUESTA_PILOTO",
        "p01",
        [1, 5, 1, 5, 1, 5, 1, 5, 1, 5],
        Some("Pésimo"),
    ));
    records
}

pub fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 4, 15, 0, 0).unwrap()
}

/// Backend answering by the comment at the end of the prompt
///
/// Comments containing `fail_marker` get a transport error; everything
/// else gets `reply`.
pub struct ScriptedBackend {
    pub reply: &'static str,
    pub fail_marker: Option<&'static str>,
    pub calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn replying(reply: &'static str) -> Self {
        Self {
            reply,
            fail_marker: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(mut self, marker: &'static str) -> Self {
        self.fail_marker = Some(marker);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClassificationBackend for ScriptedBackend {
    async fn complete(&self, prompt: &str) -> usability_core::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let comment = prompt.rsplit("Comment to analyze: ").next().unwrap_or_default();
        match self.fail_marker {
            Some(marker) if comment.contains(marker) => {
                Err(UsabilityError::Backend("connection reset".to_string()))
            }
            _ => Ok(self.reply.to_string()),
        }
    }
}
