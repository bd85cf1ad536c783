//! Typed RPC facade over the coaching backend. Owns no client state beyond
//! the HTTP connection pool and its cookie store; every operation maps one
//! remote capability to a structured request/response pair.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{
        AnalysisResponse, AnalysisUpload, AuthResponse, ErrorBody, FoodDnaResponse, LoginRequest,
        PredictionsResponse, RegisterRequest, StatsResponse,
    },
};
use tracing::debug;
use url::Url;

#[async_trait]
pub trait ApiGateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
    async fn fetch_stats(&self) -> Result<StatsResponse, ApiError>;
    async fn fetch_food_dna(&self) -> Result<FoodDnaResponse, ApiError>;
    async fn fetch_predictions(&self) -> Result<PredictionsResponse, ApiError>;
    async fn submit_analysis(&self, upload: AnalysisUpload) -> Result<AnalysisResponse, ApiError>;
}

/// Fallback gateway for a core constructed without a backend; every call
/// fails with a transport error.
pub struct MissingApiGateway;

macro_rules! unavailable {
    () => {
        Err(ApiError::new(
            ErrorCode::Transport,
            "backend gateway is unavailable",
        ))
    };
}

#[async_trait]
impl ApiGateway for MissingApiGateway {
    async fn login(&self, _request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        unavailable!()
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        unavailable!()
    }

    async fn logout(&self) -> Result<(), ApiError> {
        unavailable!()
    }

    async fn fetch_stats(&self) -> Result<StatsResponse, ApiError> {
        unavailable!()
    }

    async fn fetch_food_dna(&self) -> Result<FoodDnaResponse, ApiError> {
        unavailable!()
    }

    async fn fetch_predictions(&self) -> Result<PredictionsResponse, ApiError> {
        unavailable!()
    }

    async fn submit_analysis(&self, _upload: AnalysisUpload) -> Result<AnalysisResponse, ApiError> {
        unavailable!()
    }
}

/// reqwest-backed gateway. The session cookie issued by login/register lives
/// in the client's cookie store, so every later request is credentialed
/// without explicit token plumbing.
pub struct HttpApiGateway {
    http: Client,
    base_url: Url,
}

impl HttpApiGateway {
    pub fn new(server_url: &str) -> Result<Self> {
        let base_url = Url::parse(server_url)
            .map_err(|err| anyhow!("invalid server url {server_url}: {err}"))?;
        let http = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|err| anyhow!("failed to build http client: {err}"))?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::new(ErrorCode::Internal, format!("bad endpoint {path}: {err}")))
    }

    async fn post_json<Req: Serialize + Sync, Resp: DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp, ApiError> {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;
        decode_response(response).await
    }

    async fn get_json<Resp: DeserializeOwned>(&self, path: &str) -> Result<Resp, ApiError> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        let response = self.http.get(url).send().await.map_err(transport_error)?;
        decode_response(response).await
    }
}

#[async_trait]
impl ApiGateway for HttpApiGateway {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("api/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("api/register", request).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoint("api/logout")?;
        let response = self.http.post(url).send().await.map_err(transport_error)?;
        fail_on_error_status(response).await?;
        Ok(())
    }

    async fn fetch_stats(&self) -> Result<StatsResponse, ApiError> {
        self.get_json("api/user/stats-advanced").await
    }

    async fn fetch_food_dna(&self) -> Result<FoodDnaResponse, ApiError> {
        self.get_json("api/food-dna").await
    }

    async fn fetch_predictions(&self) -> Result<PredictionsResponse, ApiError> {
        self.get_json("api/predictive-insights").await
    }

    async fn submit_analysis(&self, upload: AnalysisUpload) -> Result<AnalysisResponse, ApiError> {
        let url = self.endpoint("api/analyze-revolutionary")?;
        debug!(%url, image_bytes = upload.image.len(), "POST multipart");
        let form = Form::new()
            .part(
                "image",
                Part::bytes(upload.image).file_name(upload.filename),
            )
            .text("meal_type", upload.meal_type.as_str())
            .text("mood_before", upload.mood_before.as_str())
            .text("social_context", upload.social_context.as_str());
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        decode_response(response).await
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    ApiError::new(ErrorCode::Transport, err.to_string())
}

fn code_for_status(status: StatusCode) -> ErrorCode {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorCode::Unauthorized,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::Validation,
        _ => ErrorCode::Internal,
    }
}

/// Non-2xx statuses become an ApiError carrying the backend's `error` field
/// when the body is JSON, else a generic status-line message.
async fn fail_on_error_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let code = code_for_status(status);
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP {status}"),
    };
    Err(ApiError::new(code, message))
}

async fn decode_response<Resp: DeserializeOwned>(response: Response) -> Result<Resp, ApiError> {
    let response = fail_on_error_status(response).await?;
    response
        .json::<Resp>()
        .await
        .map_err(|err| ApiError::new(ErrorCode::Decode, format!("malformed response: {err}")))
}
