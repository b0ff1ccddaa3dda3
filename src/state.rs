use std::collections::VecDeque;

use crate::predict_fetch::{self, PredictionRequest};

const MAX_LOGS: usize = 200;

/// Win/draw/loss distribution returned by the prediction service, together
/// with the canonical team names the service resolved the inputs to.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub home_team_win_prob: f64,
    pub draw_prob: f64,
    pub away_team_win_prob: f64,
    pub found_home_team: String,
    pub found_away_team: String,
    pub head_to_head: Option<HeadToHead>,
}

/// Recent-meetings block the service attaches when it has history for the
/// pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadToHead {
    pub summary: String,
    pub last_5: Vec<String>,
}

/// One request at a time, tracked from submit to completion.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Loading,
    Success(PredictionResult),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    HomeTeam,
    AwayTeam,
    OddsHome,
    OddsDraw,
    OddsAway,
}

/// Raw field contents exactly as typed. Normalization happens when a request
/// is built, never here.
#[derive(Debug, Clone, Default)]
pub struct FormInputs {
    pub home_team: String,
    pub away_team: String,
    pub odds_home: String,
    pub odds_draw: String,
    pub odds_away: String,
}

impl FormInputs {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::HomeTeam => &self.home_team,
            FormField::AwayTeam => &self.away_team,
            FormField::OddsHome => &self.odds_home,
            FormField::OddsDraw => &self.odds_draw,
            FormField::OddsAway => &self.odds_away,
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::HomeTeam => &mut self.home_team,
            FormField::AwayTeam => &mut self.away_team,
            FormField::OddsHome => &mut self.odds_home,
            FormField::OddsDraw => &mut self.odds_draw,
            FormField::OddsAway => &mut self.odds_away,
        }
    }

    pub fn has_teams(&self) -> bool {
        !self.home_team.is_empty() && !self.away_team.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub form: FormInputs,
    pub focus: FormField,
    pub request: RequestState,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            form: FormInputs::default(),
            focus: FormField::HomeTeam,
            request: RequestState::Idle,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FormField::HomeTeam => FormField::AwayTeam,
            FormField::AwayTeam => FormField::OddsHome,
            FormField::OddsHome => FormField::OddsDraw,
            FormField::OddsDraw => FormField::OddsAway,
            FormField::OddsAway => FormField::HomeTeam,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            FormField::HomeTeam => FormField::OddsAway,
            FormField::AwayTeam => FormField::HomeTeam,
            FormField::OddsHome => FormField::AwayTeam,
            FormField::OddsDraw => FormField::OddsHome,
            FormField::OddsAway => FormField::OddsDraw,
        };
    }

    pub fn can_submit(&self) -> bool {
        !self.request.is_loading() && self.form.has_teams()
    }

    /// Moves into `Loading` and returns the outbound request, or `None` when
    /// the submission is not allowed. A request already on the wire leaves
    /// the machine untouched; entering `Loading` replaces any previous result
    /// or error in the same step.
    pub fn begin_submit(&mut self) -> Option<PredictionRequest> {
        if self.request.is_loading() {
            self.push_log("[INFO] Prediction already in flight, submit ignored");
            return None;
        }
        if !self.form.has_teams() {
            self.push_log("[INFO] Enter both team names before predicting");
            return None;
        }
        self.request = RequestState::Loading;
        Some(predict_fetch::build_prediction_request(&self.form))
    }

    pub fn fail_request(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.push_log(format!("[WARN] Prediction failed: {message}"));
        self.request = RequestState::Failed(message);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

/// Messages flowing from the provider thread back to the UI loop.
#[derive(Debug, Clone)]
pub enum Delta {
    PredictionReady(PredictionResult),
    PredictionFailed(String),
    Log(String),
}

/// Work orders flowing from the UI loop to the provider thread.
#[derive(Debug, Clone)]
pub enum ProviderCommand {
    Predict { request: PredictionRequest },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::PredictionReady(result) => {
            state.push_log(format!(
                "[INFO] Prediction ready: {} vs {}",
                result.found_home_team, result.found_away_team
            ));
            state.request = RequestState::Success(result);
        }
        Delta::PredictionFailed(message) => state.fail_request(message),
        Delta::Log(message) => state.push_log(message),
    }
}
