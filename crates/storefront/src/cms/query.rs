//! Query result shape for views.

use serde::Serialize;

use super::CmsError;

/// What a view sees for one remote resource: the data once loaded, whether a
/// request is in flight, and the error message if it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> QueryState<T> {
    /// A request that has started but not settled.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            data: None,
            is_loading: true,
            error: None,
        }
    }

    /// Settle a finished request.
    #[must_use]
    pub fn settle(result: Result<T, CmsError>) -> Self {
        match result {
            Ok(data) => Self {
                data: Some(data),
                is_loading: false,
                error: None,
            },
            Err(e) => Self {
                data: None,
                is_loading: false,
                error: Some(e.to_string()),
            },
        }
    }

    /// Await a request and settle it.
    pub async fn run(request: impl Future<Output = Result<T, CmsError>>) -> Self {
        Self::settle(request.await)
    }

    /// Whether the request finished without error.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !self.is_loading && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading() {
        let state = QueryState::<Vec<u8>>::loading();
        assert!(state.is_loading);
        assert!(!state.is_success());
    }

    #[test]
    fn test_settle_error_uses_generic_message() {
        let state = QueryState::<()>::settle(Err(CmsError::FetchFailed {
            resource: "site-settings",
            status: reqwest::StatusCode::BAD_GATEWAY,
        }));
        assert_eq!(state.error.as_deref(), Some("failed to fetch site-settings"));
        assert!(state.data.is_none());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_run_success() {
        let state = QueryState::run(async { Ok::<_, CmsError>(7) }).await;
        assert_eq!(state.data, Some(7));
        assert!(state.is_success());
    }
}
