//! HTTP clients for the one-time-code service and the mail backend.

use chrono::Utc;
use ctk_mail_core::{
    Address, Direction, DispatchError, DispatchReceipt, MailDispatcher, OtpError, OtpService,
    OutgoingEmail,
};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

/// Statuses the verify endpoint uses to reject a code.
const REJECTED: [StatusCode; 4] = [
    StatusCode::BAD_REQUEST,
    StatusCode::UNAUTHORIZED,
    StatusCode::FORBIDDEN,
    StatusCode::UNPROCESSABLE_ENTITY,
];

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct VerifyBody<'a> {
    email: &'a str,
    otp: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendBody<'a> {
    from: &'a Address,
    to: &'a [Address],
    subject: &'a str,
    message: &'a str,
    direction: Direction,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendResponse {
    success: bool,
    #[serde(default)]
    message: String,
    email_id: Option<String>,
}

/// Backend API client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a client for `base_url`.
    #[must_use]
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn post_email(&self, path: &str, address: &Address) -> Result<Response, OtpError> {
        self.http
            .post(self.url(path))
            .json(&EmailBody {
                email: address.as_str(),
            })
            .send()
            .await
            .map_err(|e| OtpError::Transport(e.to_string()))
    }
}

async fn service_error(response: Response) -> OtpError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    OtpError::Service { status, message }
}

impl OtpService for ApiClient {
    async fn request_code(&self, address: &Address) -> Result<(), OtpError> {
        let response = self.post_email("otp/generate", address).await?;
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }
        Ok(())
    }

    async fn verify_code(&self, address: &Address, code: &str) -> Result<bool, OtpError> {
        let response = self
            .http
            .post(self.url("otp/verify"))
            .json(&VerifyBody {
                email: address.as_str(),
                otp: code,
            })
            .send()
            .await
            .map_err(|e| OtpError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(true)
        } else if REJECTED.contains(&status) {
            Ok(false)
        } else {
            Err(service_error(response).await)
        }
    }

    async fn resend_code(&self, address: &Address) -> Result<(), OtpError> {
        let response = self.post_email("otp/resend", address).await?;
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }
        Ok(())
    }
}

impl MailDispatcher for ApiClient {
    async fn dispatch(&self, email: &OutgoingEmail) -> Result<DispatchReceipt, DispatchError> {
        let mut request = self.http.post(self.url("emails/send")).json(&SendBody {
            from: &email.from,
            to: &email.to,
            subject: &email.subject,
            message: &email.body,
            direction: email.direction,
        });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DispatchError::Rejected(format!("{status}: {text}")));
        }

        let body: SendResponse = response
            .json()
            .await
            .map_err(|e| DispatchError::Rejected(e.to_string()))?;
        if !body.success {
            return Err(DispatchError::Rejected(body.message));
        }

        Ok(DispatchReceipt {
            email_id: body.email_id,
            message: body.message,
            sent_at: Utc::now(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_onto_base() {
        let client = ApiClient::new("http://localhost:8080/api/", None);
        assert_eq!(client.url("otp/verify"), "http://localhost:8080/api/otp/verify");
    }

    #[test]
    fn send_body_shape() {
        let from = Address::new("alice@centrika.rw").unwrap();
        let to = vec![Address::new("ops@centrika.rw").unwrap()];
        let body = SendBody {
            from: &from,
            to: &to,
            subject: "CTK-CTK-TECH-GWAY - Server outage - ACTION - HIGH",
            message: "Please restart the workers.",
            direction: Direction::Internal,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["from"], "alice@centrika.rw");
        assert_eq!(json["to"][0], "ops@centrika.rw");
        assert_eq!(json["direction"], "internal");
    }

    #[test]
    fn send_response_without_id() {
        let body: SendResponse =
            serde_json::from_str(r#"{"success": true, "message": "Email sent"}"#).unwrap();
        assert!(body.success);
        assert!(body.email_id.is_none());
    }
}
