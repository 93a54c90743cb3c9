use std::future::Future;

use cluegrid_core::{CategoryId, SourceCategory, TriviaProvider};
use gloo::net::http::Request;
use thiserror::Error;

pub(crate) const DEFAULT_API_BASE: &str = "https://jservice.io/api";

#[derive(Error, Debug)]
pub(crate) enum ApiError {
    #[error("network error: {0}")]
    Net(#[from] gloo::net::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}

/// Client for the jService trivia API.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct JServiceProvider {
    base_url: String,
}

impl JServiceProvider {
    pub(crate) fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn category_url(&self, id: CategoryId) -> String {
        format!("{}/category?id={}", self.base_url, id)
    }
}

impl Default for JServiceProvider {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl TriviaProvider for JServiceProvider {
    type Error = ApiError;

    fn category(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = Result<Option<SourceCategory>, Self::Error>> {
        let url = self.category_url(id);
        async move {
            log::trace!("GET {}", url);
            let response = Request::get(&url).send().await?;
            match response.status() {
                404 => Ok(None),
                _ if response.ok() => Ok(Some(response.json().await?)),
                status => Err(ApiError::Status { status, url }),
            }
        }
    }
}
