use predictor_terminal::predict_fetch::build_prediction_request;
use predictor_terminal::state::FormInputs;

fn inputs(home: &str, away: &str, odds_home: &str, odds_draw: &str, odds_away: &str) -> FormInputs {
    FormInputs {
        home_team: home.to_string(),
        away_team: away.to_string(),
        odds_home: odds_home.to_string(),
        odds_draw: odds_draw.to_string(),
        odds_away: odds_away.to_string(),
    }
}

#[test]
fn builds_request_with_normalized_odds() {
    let request = build_prediction_request(&inputs("Arsenal", "Chelsea", "2.10", "", "x"));
    assert_eq!(request.odds_home, 2.10);
    assert_eq!(request.odds_draw, 0.0);
    assert!(request.odds_away.is_nan());
}

#[test]
fn team_names_pass_through_verbatim() {
    let request = build_prediction_request(&inputs("  arsenal FC ", "CHELSEA", "", "", ""));
    assert_eq!(request.home_team, "  arsenal FC ");
    assert_eq!(request.away_team, "CHELSEA");
}

#[test]
fn wire_encoding_matches_the_service_contract() {
    let request = build_prediction_request(&inputs("Arsenal", "Chelsea", "2.5", "", "abc"));
    let value = serde_json::to_value(&request).expect("request should serialize");
    assert_eq!(value["home_team"], "Arsenal");
    assert_eq!(value["away_team"], "Chelsea");
    assert_eq!(value["odds_home"], 2.5);
    assert_eq!(value["odds_draw"], 0.0);
    // NaN has no JSON representation and goes out as null.
    assert!(value["odds_away"].is_null());
}
