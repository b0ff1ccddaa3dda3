use std::env;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::predict_fetch::{self, DEFAULT_API_URL};
use crate::state::{Delta, ProviderCommand};

/// Spawns the worker that talks to the prediction service. Commands are
/// handled one at a time in arrival order, and every `Predict` is answered
/// with exactly one `PredictionReady` or `PredictionFailed`.
pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let base_url = api_base_url();
        let _ = tx.send(Delta::Log(format!("[INFO] Prediction service: {base_url}")));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::Predict { request } => {
                    let delta = match predict_fetch::fetch_prediction(&base_url, &request) {
                        Ok(result) => Delta::PredictionReady(result),
                        Err(failure) => Delta::PredictionFailed(failure.to_string()),
                    };
                    if tx.send(delta).is_err() {
                        return;
                    }
                }
            }
        }
    });
}

pub fn api_base_url() -> String {
    env::var("PREDICTOR_API_URL")
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
