use crate::wire::{
    BrandRankingsResponse, BrandYearsResponse, PredictResponse, TeamsResponse, WeeklyResponse,
};
use crate::{BrandRow, PredictionRequest, Team, WeeklyPredictions, YearFilter};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "https://henderson-viewership-backend.onrender.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the viewership prediction backend.
#[derive(Debug, Clone)]
pub struct ViewershipApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Api(e, _) | ApiError::Parsing(e, _) => Some(e),
        }
    }
}

impl ViewershipApi {
    /// Build a client against `base_url`. A trailing slash is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::builder()
                .user_agent(concat!("cfbtv/", env!("CARGO_PKG_VERSION"), " (terminal viewership client)"))
                .build()
                .unwrap_or_default(),
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /teams`, the selectable teams in backend order.
    pub async fn fetch_teams(&self) -> ApiResult<Vec<Team>> {
        let raw: TeamsResponse = self.get("/teams").await?;
        Ok(raw.teams)
    }

    /// `GET /brand-years`, the seasons brand rankings can be scoped to.
    pub async fn fetch_brand_years(&self) -> ApiResult<Vec<u16>> {
        let raw: BrandYearsResponse = self.get("/brand-years").await?;
        Ok(raw.years)
    }

    /// `GET /brand-rankings`, with `?year=` only when a year is selected.
    pub async fn fetch_brand_rankings(&self, year: YearFilter) -> ApiResult<Vec<BrandRow>> {
        let path = match year.query_value() {
            Some(year) => format!("/brand-rankings?year={year}"),
            None => "/brand-rankings".to_string(),
        };
        let raw: BrandRankingsResponse = self.get(&path).await?;
        Ok(raw.rows)
    }

    /// `POST /predict`. Returns the backend's formatted viewer estimate.
    pub async fn predict(&self, request: &PredictionRequest) -> ApiResult<String> {
        let raw: PredictResponse = self.post("/predict", request).await?;
        Ok(raw.prediction_formatted)
    }

    /// `GET /weekly-predictions`, every tracked week plus aggregate metrics.
    pub async fn fetch_weekly_predictions(&self) -> ApiResult<WeeklyPredictions> {
        let raw: WeeklyResponse = self.get("/weekly-predictions").await?;
        Ok(raw.into())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        let request = self.client.get(&url);
        self.send(request, url).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = self.url(path);
        let request = self.client.post(&url).json(body);
        self.send(request, url).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: String) -> ApiResult<T> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        match response.error_for_status() {
            Ok(res) => res.json::<T>().await.map_err(|e| ApiError::Parsing(e, url)),
            Err(e) => Err(ApiError::Api(e, url)),
        }
    }
}
