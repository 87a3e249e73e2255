use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use viewership_api::client::{ApiError, ViewershipApi};

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Executes requests one at a time and reports each outcome back to the UI loop.
pub struct NetworkWorker {
    client: ViewershipApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    /// Spinner task for the request in flight.
    spinner: Option<JoinHandle<()>>,
}

impl NetworkWorker {
    pub fn new(
        client: ViewershipApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            spinner: None,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = self.handle(&request).await;

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Failed {
                request,
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle(&self, request: &NetworkRequest) -> Result<NetworkResponse, ApiError> {
        match request {
            NetworkRequest::LoadTeams => {
                debug!("loading teams");
                let teams = self.client.fetch_teams().await?;
                Ok(NetworkResponse::TeamsLoaded { teams })
            }
            NetworkRequest::LoadBrandYears => {
                debug!("loading brand years");
                let years = self.client.fetch_brand_years().await?;
                Ok(NetworkResponse::BrandYearsLoaded { years })
            }
            NetworkRequest::LoadBrandRankings { year, seq } => {
                debug!("loading brand rankings for {year} (#{seq})");
                let rows = self.client.fetch_brand_rankings(*year).await?;
                Ok(NetworkResponse::BrandRankingsLoaded { seq: *seq, rows })
            }
            NetworkRequest::Predict { request, revision } => {
                debug!("requesting prediction for {} vs {}", request.team1, request.team2);
                let formatted = self.client.predict(request).await?;
                Ok(NetworkResponse::PredictionLoaded { revision: *revision, formatted })
            }
            NetworkRequest::LoadWeekly => {
                debug!("loading weekly predictions");
                let weekly = self.client.fetch_weekly_predictions().await?;
                Ok(NetworkResponse::WeeklyLoaded { weekly })
            }
        }
    }

    async fn start_loading_animation(&mut self) {
        self.abort_spinner();

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        self.spinner = Some(tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            interval.tick().await;
            loop {
                interval.tick().await;
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                if responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await
                    .is_err()
                {
                    break;
                }
            }
        }));
    }

    async fn stop_loading_animation(&mut self, is_ok: bool) {
        self.abort_spinner();

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }

    fn abort_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.abort();
        }
    }
}

/// Queue every request a state transition produced.
pub async fn send_requests(sender: &mpsc::Sender<NetworkRequest>, requests: Vec<NetworkRequest>) {
    for request in requests {
        if let Err(e) = sender.send(request).await {
            error!("Failed to queue network request: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker() -> (NetworkWorker, mpsc::Receiver<NetworkResponse>) {
        let (_requests_tx, requests) = mpsc::channel(10);
        let (responses, responses_rx) = mpsc::channel(100);
        let client = ViewershipApi::new("http://127.0.0.1:9");
        (NetworkWorker::new(client, requests, responses), responses_rx)
    }

    fn drain(rx: &mut mpsc::Receiver<NetworkResponse>) -> Vec<LoadingState> {
        let mut states = Vec::new();
        while let Ok(response) = rx.try_recv() {
            if let NetworkResponse::LoadingStateChanged { loading_state } = response {
                states.push(loading_state);
            }
        }
        states
    }

    #[tokio::test]
    async fn spinner_stops_with_its_request() {
        let (mut worker, mut rx) = worker();

        // Back-to-back requests must not leave an earlier spinner running.
        worker.start_loading_animation().await;
        worker.stop_loading_animation(true).await;
        worker.start_loading_animation().await;
        worker.stop_loading_animation(false).await;
        assert!(worker.spinner.is_none());

        tokio::time::sleep(Duration::from_millis(150)).await;
        let states = drain(&mut rx);
        let last = states.last().copied().unwrap_or_default();
        assert!(!last.is_loading);
        assert_eq!(last.spinner_char, ERROR_CHAR);
    }

    #[tokio::test]
    async fn spinner_animates_while_loading() {
        let (mut worker, mut rx) = worker();
        worker.start_loading_animation().await;
        tokio::time::sleep(Duration::from_millis(120)).await;
        worker.stop_loading_animation(true).await;

        let states = drain(&mut rx);
        assert!(states.iter().filter(|s| s.is_loading).count() > 1);
        assert_eq!(states.last().map(|s| s.is_loading), Some(false));
    }
}
