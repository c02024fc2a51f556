use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::StudentBackend;
use crate::config::RollcallConfig;
use crate::error::{Result, RollcallError};
use crate::model::{SearchResults, Student, StudentDraft};

/// Error payload shape shared by every endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP/JSON client for the students resource.
///
/// Issues one blocking request at a time. Responses are never retried and
/// in-flight requests are never cancelled; failures surface as
/// [`RollcallError`] values for the caller to report.
pub struct HttpBackend {
    client: Client,
    root: String,
}

impl HttpBackend {
    pub fn new(config: &RollcallConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(2))
            .build()
            .map_err(RollcallError::Http)?;

        Ok(Self {
            client,
            root: config.endpoint_root(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.root, path)
    }

    fn typed<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text()?;
        typed_from(status, &body)
    }

    fn ack(&self, response: Response) -> Result<()> {
        let status = response.status();
        let body = response.text()?;
        ack_from(status, &body)
    }
}

impl StudentBackend for HttpBackend {
    fn list(&self) -> Result<Vec<Student>> {
        let response = self.client.get(self.url("/students")).send()?;
        self.typed(response)
    }

    fn search(&self, query: &str) -> Result<SearchResults> {
        // reqwest percent-encodes the query pair
        let response = self
            .client
            .get(self.url("/students/search"))
            .query(&[("q", query)])
            .send()?;
        self.typed(response)
    }

    fn get(&self, id: i64) -> Result<Student> {
        let response = self
            .client
            .get(self.url(&format!("/students/{}", id)))
            .send()?;
        self.typed(response)
    }

    fn create(&mut self, draft: &StudentDraft) -> Result<()> {
        let response = self
            .client
            .post(self.url("/students"))
            .json(draft)
            .send()?;
        self.ack(response)
    }

    fn update(&mut self, id: i64, draft: &StudentDraft) -> Result<()> {
        let response = self
            .client
            .put(self.url(&format!("/students/{}", id)))
            .json(draft)
            .send()?;
        self.ack(response)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/students/{}", id)))
            .send()?;
        self.ack(response)
    }
}

/// Decode a response body into `T`, mapping `{"error": ...}` payloads to
/// [`RollcallError::Api`] whatever the status code says.
fn typed_from<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        return Err(error_from(status, body));
    }
    match serde_json::from_str::<T>(body) {
        Ok(value) => Ok(value),
        Err(parse_err) => match serde_json::from_str::<ErrorBody>(body) {
            Ok(payload) => Err(RollcallError::Api(payload.error)),
            Err(_) => Err(RollcallError::Parse(parse_err)),
        },
    }
}

/// Decode an acknowledgement response. The body shape (`{"success": ...}`,
/// the created record, or anything else) is irrelevant as long as it is not
/// an error payload.
fn ack_from(status: StatusCode, body: &str) -> Result<()> {
    if !status.is_success() {
        return Err(error_from(status, body));
    }
    if let Ok(payload) = serde_json::from_str::<ErrorBody>(body) {
        return Err(RollcallError::Api(payload.error));
    }
    Ok(())
}

fn error_from(status: StatusCode, body: &str) -> RollcallError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(payload) => RollcallError::Api(payload.error),
        Err(_) => RollcallError::Api(format!("server returned {}", status)),
    }
}
