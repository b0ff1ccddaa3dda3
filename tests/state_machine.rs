use predictor_terminal::state::{
    AppState, Delta, PredictionResult, RequestState, apply_delta,
};

fn filled_state() -> AppState {
    let mut state = AppState::new();
    state.form.home_team = "Arsenal".to_string();
    state.form.away_team = "Chelsea".to_string();
    state
}

fn sample_result() -> PredictionResult {
    PredictionResult {
        home_team_win_prob: 0.55,
        draw_prob: 0.20,
        away_team_win_prob: 0.25,
        found_home_team: "Arsenal".to_string(),
        found_away_team: "Chelsea".to_string(),
        head_to_head: None,
    }
}

#[test]
fn submit_enters_loading_synchronously() {
    let mut state = filled_state();
    assert_eq!(state.request, RequestState::Idle);

    let request = state.begin_submit().expect("filled form should submit");
    assert_eq!(state.request, RequestState::Loading);
    assert_eq!(request.home_team, "Arsenal");
    assert_eq!(request.away_team, "Chelsea");
}

#[test]
fn submit_requires_both_team_names() {
    let mut state = AppState::new();
    state.form.home_team = "Arsenal".to_string();

    assert!(state.begin_submit().is_none());
    assert_eq!(state.request, RequestState::Idle);
}

#[test]
fn submit_while_loading_is_ignored() {
    let mut state = filled_state();
    state.begin_submit().expect("first submit should go through");

    assert!(state.begin_submit().is_none());
    assert_eq!(state.request, RequestState::Loading);
}

#[test]
fn can_submit_is_false_while_loading() {
    let mut state = filled_state();
    assert!(state.can_submit());

    state.begin_submit().expect("filled form should submit");
    assert!(!state.can_submit());
}

#[test]
fn success_delta_completes_the_request() {
    let mut state = filled_state();
    state.begin_submit().expect("filled form should submit");

    apply_delta(&mut state, Delta::PredictionReady(sample_result()));
    match &state.request {
        RequestState::Success(result) => {
            assert_eq!(result.found_home_team, "Arsenal");
            assert_eq!(result.away_team_win_prob, 0.25);
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[test]
fn failure_delta_surfaces_the_message() {
    let mut state = filled_state();
    state.begin_submit().expect("filled form should submit");

    apply_delta(&mut state, Delta::PredictionFailed("Unknown team".to_string()));
    assert_eq!(state.request, RequestState::Failed("Unknown team".to_string()));
}

#[test]
fn resubmit_after_failure_clears_the_error() {
    let mut state = filled_state();
    state.begin_submit().expect("filled form should submit");
    apply_delta(&mut state, Delta::PredictionFailed("boom".to_string()));

    state.begin_submit().expect("failed request should not block resubmit");
    assert_eq!(state.request, RequestState::Loading);

    apply_delta(&mut state, Delta::PredictionReady(sample_result()));
    assert!(matches!(state.request, RequestState::Success(_)));
}

#[test]
fn success_is_replaced_by_the_next_submission() {
    let mut state = filled_state();
    state.begin_submit().expect("filled form should submit");
    apply_delta(&mut state, Delta::PredictionReady(sample_result()));

    state.begin_submit().expect("finished request should not block resubmit");
    assert_eq!(state.request, RequestState::Loading);
}

#[test]
fn completions_are_logged() {
    let mut state = filled_state();
    state.begin_submit().expect("filled form should submit");
    apply_delta(&mut state, Delta::PredictionFailed("boom".to_string()));

    assert!(
        state
            .logs
            .iter()
            .any(|line| line.contains("[WARN]") && line.contains("boom"))
    );
}

#[test]
fn log_delta_appends_to_the_console() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::Log("[INFO] Prediction service: http://localhost:8000".to_string()));

    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[INFO] Prediction service: http://localhost:8000")
    );
}
