use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;
use thiserror::Error;
use yew::Callback;

use crate::model::{AnalyticsResponse, AuthRequest, Expense, LoginResponse, NewExpense};
use crate::session::{self, BrowserStore};

pub const API_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not reach the server")]
    Network(#[from] gloo_net::Error),
    #[error("{0}")]
    Server(String),
    #[error("your session has expired")]
    SessionExpired,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

async fn server_message(response: Response, fallback: &str) -> String {
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => fallback.to_string(),
    }
}

/// All traffic to the backend goes through here. Each request reads the
/// bearer token from the credential store at send time, so a login or
/// logout takes effect for the very next call. A 401 on any authenticated
/// endpoint clears the stored session and notifies the subscriber.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    store: BrowserStore,
    on_unauthorized: Callback<()>,
}

impl ApiClient {
    pub fn new(on_unauthorized: Callback<()>) -> Self {
        Self {
            store: BrowserStore,
            on_unauthorized,
        }
    }

    fn url(path: &str) -> String {
        format!("{}{}", API_BASE_URL, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match session::bearer_token(&self.store) {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Cross-cutting 401 policy: the session is gone no matter which call
    /// noticed first. Other failures pass through for local handling.
    async fn check(&self, response: Response, fallback: &str) -> Result<Response, ApiError> {
        if response.status() == 401 {
            session::clear(&self.store);
            self.on_unauthorized.emit(());
            return Err(ApiError::SessionExpired);
        }
        if !response.ok() {
            return Err(ApiError::Server(server_message(response, fallback).await));
        }
        Ok(response)
    }

    /// `/login` and `/register` answer 401 for bad credentials, which is an
    /// authentication failure rather than an expired session, so they skip
    /// the interceptor.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = Request::post(&Self::url("/login"))
            .json(&AuthRequest { username, password })?
            .send()
            .await?;
        if !response.ok() {
            return Err(ApiError::Server(
                server_message(response, "Login failed").await,
            ));
        }
        Ok(response.json().await?)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let response = Request::post(&Self::url("/register"))
            .json(&AuthRequest { username, password })?
            .send()
            .await?;
        if !response.ok() {
            return Err(ApiError::Server(
                server_message(response, "Registration failed").await,
            ));
        }
        Ok(())
    }

    pub async fn fetch_expenses(&self) -> Result<Vec<Expense>, ApiError> {
        let response = self
            .authorize(Request::get(&Self::url("/get-expenses")))
            .send()
            .await?;
        let response = self.check(response, "Failed to fetch expenses").await?;
        Ok(response.json().await?)
    }

    pub async fn fetch_analytics(&self) -> Result<AnalyticsResponse, ApiError> {
        let response = self
            .authorize(Request::get(&Self::url("/analytics")))
            .send()
            .await?;
        let response = self.check(response, "Failed to fetch analytics").await?;
        Ok(response.json().await?)
    }

    /// The backend answers 201 for an accepted expense; anything else is a
    /// rejection and leaves the caller's cache untouched.
    pub async fn add_expense(&self, expense: &NewExpense) -> Result<(), ApiError> {
        let response = self
            .authorize(Request::post(&Self::url("/add-expense")))
            .json(expense)?
            .send()
            .await?;
        let response = self.check(response, "Failed to add expense").await?;
        if response.status() != 201 {
            return Err(ApiError::Server("Failed to add expense".to_string()));
        }
        Ok(())
    }
}
