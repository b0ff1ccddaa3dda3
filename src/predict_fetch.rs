use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::{FormInputs, HeadToHead, PredictionResult};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const PREDICT_PATH: &str = "/predict/";

const REJECTED_FALLBACK: &str = "Prediction request failed.";
const UNKNOWN_FALLBACK: &str = "An unknown error occurred.";

static CLIENT: OnceCell<Client> = OnceCell::new();

// No request timeout on purpose: a slow model run is still a pending request,
// and the UI keeps running while it waits.
fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .user_agent("predictor-terminal/0.1")
            .build()
            .context("failed to build http client")
    })
}

/// Outbound payload for the predict endpoint. Odds arrive here already
/// normalized: empty input became 0.0, unparseable input became NaN, which
/// serializes as JSON null.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    pub home_team: String,
    pub away_team: String,
    pub odds_home: f64,
    pub odds_draw: f64,
    pub odds_away: f64,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    prediction: PredictProbs,
    found_home_team: String,
    found_away_team: String,
    #[serde(default)]
    head_to_head: Option<WireHeadToHead>,
}

#[derive(Debug, Deserialize)]
struct PredictProbs {
    home_team_win_prob: f64,
    draw_prob: f64,
    away_team_win_prob: f64,
}

#[derive(Debug, Deserialize)]
struct WireHeadToHead {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    last_5: Vec<String>,
}

/// What went wrong with a prediction attempt. `Rejected` means the service
/// answered with a non-success status; `Transport` covers everything thrown
/// on the way there or back, response decoding included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictFailure {
    Rejected { detail: Option<String> },
    Transport { message: String },
}

impl PredictFailure {
    pub fn message(&self) -> &str {
        match self {
            PredictFailure::Rejected { detail } => detail.as_deref().unwrap_or(REJECTED_FALLBACK),
            PredictFailure::Transport { message } => {
                if message.trim().is_empty() {
                    UNKNOWN_FALLBACK
                } else {
                    message
                }
            }
        }
    }
}

impl std::fmt::Display for PredictFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

pub fn build_prediction_request(form: &FormInputs) -> PredictionRequest {
    PredictionRequest {
        home_team: form.home_team.clone(),
        away_team: form.away_team.clone(),
        odds_home: parse_odds(&form.odds_home),
        odds_draw: parse_odds(&form.odds_draw),
        odds_away: parse_odds(&form.odds_away),
    }
}

// Only the empty string means "not provided". Anything else is parsed as
// typed, and a failed parse goes out as NaN rather than being defaulted.
fn parse_odds(raw: &str) -> f64 {
    if raw.is_empty() {
        return 0.0;
    }
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

pub fn fetch_prediction(
    base_url: &str,
    request: &PredictionRequest,
) -> Result<PredictionResult, PredictFailure> {
    let client = http_client().map_err(transport)?;
    let resp = client
        .post(predict_url(base_url))
        .json(request)
        .send()
        .map_err(transport)?;
    let status = resp.status();
    let body = resp.text().map_err(transport)?;
    classify_response(status, &body)
}

/// Maps one finished exchange onto the result/failure split: non-success
/// statuses become `Rejected` no matter what the body holds, success bodies
/// that do not decode become `Transport`.
pub fn classify_response(status: StatusCode, body: &str) -> Result<PredictionResult, PredictFailure> {
    if !status.is_success() {
        return Err(PredictFailure::Rejected {
            detail: extract_error_detail(body),
        });
    }
    parse_prediction_json(body).map_err(|err| PredictFailure::Transport {
        message: err.to_string(),
    })
}

pub fn parse_prediction_json(raw: &str) -> Result<PredictionResult> {
    let parsed: PredictResponse = serde_json::from_str(raw).context("invalid prediction json")?;
    Ok(PredictionResult {
        home_team_win_prob: parsed.prediction.home_team_win_prob,
        draw_prob: parsed.prediction.draw_prob,
        away_team_win_prob: parsed.prediction.away_team_win_prob,
        found_home_team: parsed.found_home_team,
        found_away_team: parsed.found_away_team,
        head_to_head: parsed.head_to_head.map(|h| HeadToHead {
            summary: h.summary,
            last_5: h.last_5,
        }),
    })
}

/// Pulls a usable `detail` string out of an error body. Anything that is not
/// a non-empty JSON string counts as absent.
pub fn extract_error_detail(raw: &str) -> Option<String> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let detail = value.get("detail")?.as_str()?;
    if detail.is_empty() {
        None
    } else {
        Some(detail.to_string())
    }
}

fn transport(err: impl std::fmt::Display) -> PredictFailure {
    PredictFailure::Transport {
        message: err.to_string(),
    }
}

fn predict_url(base_url: &str) -> String {
    format!("{}{PREDICT_PATH}", base_url.trim_end_matches('/'))
}
