use connections_core::protocol::*;
use connections_core::{PuzzleApi, TransportError};
use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;

/// Talks to the puzzle server over `fetch`.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct HttpApi {
    base: String,
}

impl HttpApi {
    pub(crate) fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        log::trace!("GET {}", path);
        let response = Request::get(&self.url(path))
            .send()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;
        decode(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&CheckRequest>,
    ) -> Result<T, TransportError> {
        log::trace!("POST {}", path);
        let builder = Request::post(&self.url(path));
        let sent = match body {
            Some(body) => builder
                .json(body)
                .map_err(|err| TransportError::Request(err.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        };
        let response = sent.map_err(|err| TransportError::Request(err.to_string()))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    if !response.ok() {
        let status = response.status();
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => response.status_text(),
        };
        return Err(TransportError::Status { status, message });
    }

    response
        .json::<T>()
        .await
        .map_err(|err| TransportError::Decode(err.to_string()))
}

impl PuzzleApi for HttpApi {
    async fn fetch_game(&self) -> Result<GameResponse, TransportError> {
        self.get(GAME_PATH).await
    }

    async fn check_selection(&self, request: CheckRequest) -> Result<CheckResponse, TransportError> {
        self.post(CHECK_SELECTION_PATH, Some(&request)).await
    }

    async fn daily_info(&self) -> Result<DailyInfo, TransportError> {
        self.get(DAILY_INFO_PATH).await
    }

    async fn new_game(&self) -> Result<NewGameResponse, TransportError> {
        self.post(NEW_GAME_PATH, None).await
    }

    async fn game_status(&self) -> Result<GameStatusResponse, TransportError> {
        self.get(GAME_STATUS_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_joined_without_double_slash() {
        assert_eq!(HttpApi::new("/proxy/").url(GAME_PATH), "/proxy/api/game");
        assert_eq!(HttpApi::new("").url(NEW_GAME_PATH), "/api/new_game");
    }
}
