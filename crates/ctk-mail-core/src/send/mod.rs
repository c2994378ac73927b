//! Verified send workflow.
//!
//! Sending is gated twice: the draft must validate, then the sender must
//! prove control of their address with a one-time code. The code service
//! and the mail backend are capabilities supplied by the caller.
//!
//! ```ignore
//! let gate = SendGate::new(Validator::default(), otp, backend);
//! let pending = gate.begin(&draft).await?;
//! let receipt = gate.confirm(&pending, "482913").await?;
//! ```

mod error;

pub use error::{DispatchError, OtpError, SendError};

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::address::Address;
use crate::draft::{Direction, Draft};
use crate::subject::build_subject;
use crate::validation::{ValidationResult, Validator};

/// Issues and checks one-time verification codes.
pub trait OtpService {
    /// Sends a fresh code to `address`.
    fn request_code(&self, address: &Address) -> impl Future<Output = Result<(), OtpError>> + Send;

    /// Returns whether `code` is the current code for `address`.
    fn verify_code(
        &self,
        address: &Address,
        code: &str,
    ) -> impl Future<Output = Result<bool, OtpError>> + Send;

    /// Sends the code again.
    fn resend_code(&self, address: &Address) -> impl Future<Output = Result<(), OtpError>> + Send;
}

/// Hands finished messages to a mail backend.
pub trait MailDispatcher {
    /// Delivers `email` and returns the backend's receipt.
    fn dispatch(
        &self,
        email: &OutgoingEmail,
    ) -> impl Future<Output = Result<DispatchReceipt, DispatchError>> + Send;
}

/// A message ready for the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingEmail {
    /// Sender.
    pub from: Address,
    /// Recipients, duplicates removed.
    pub to: Vec<Address>,
    /// Canonical subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Communication direction.
    pub direction: Direction,
}

impl OutgoingEmail {
    /// Builds the message for a draft.
    ///
    /// Recipients that are not valid addresses are dropped; run the draft
    /// through a [`Validator`] first to report them.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::InvalidSender`] if the sender is missing or
    /// malformed.
    pub fn from_draft(draft: &Draft) -> Result<Self, SendError> {
        let from = Address::new(draft.sender.trim())
            .map_err(|_| SendError::InvalidSender(draft.sender.clone()))?;

        let mut to: Vec<Address> = Vec::with_capacity(draft.recipients.len());
        for addr in draft.recipients.iter().filter_map(|r| Address::new(r.as_str()).ok()) {
            if !to.contains(&addr) {
                to.push(addr);
            }
        }

        Ok(Self {
            from,
            to,
            subject: build_subject(draft),
            body: draft.message.clone(),
            direction: draft.direction(),
        })
    }
}

/// Backend acknowledgement of a sent message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReceipt {
    /// Backend message id, when it returns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    /// Backend status message.
    pub message: String,
    /// When the backend accepted the message.
    pub sent_at: DateTime<Utc>,
}

/// A validated message waiting for its verification code.
#[derive(Debug, Clone)]
pub struct PendingSend {
    email: OutgoingEmail,
    validation: ValidationResult,
}

impl PendingSend {
    /// The message that will be sent.
    #[must_use]
    pub const fn email(&self) -> &OutgoingEmail {
        &self.email
    }

    /// Validation outcome; may still carry warnings and suggestions.
    #[must_use]
    pub const fn validation(&self) -> &ValidationResult {
        &self.validation
    }
}

/// Validation and verification gate in front of a mail backend.
#[derive(Debug)]
pub struct SendGate<'t, O, D> {
    validator: Validator<'t>,
    otp: O,
    dispatcher: D,
}

impl<'t, O, D> SendGate<'t, O, D>
where
    O: OtpService + Sync,
    D: MailDispatcher + Sync,
{
    /// Creates a gate from its collaborators.
    #[must_use]
    pub const fn new(validator: Validator<'t>, otp: O, dispatcher: D) -> Self {
        Self {
            validator,
            otp,
            dispatcher,
        }
    }

    /// Validates the draft and requests a code for the sender.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::Invalid`] when the draft has validation errors,
    /// [`SendError::InvalidSender`] for a bad sender, or the code service's
    /// failure.
    pub async fn begin(&self, draft: &Draft) -> Result<PendingSend, SendError> {
        let validation = self.validator.validate(draft);
        if !validation.is_valid {
            warn!(
                "Send blocked: {} validation error(s)",
                validation.errors.len()
            );
            return Err(SendError::Invalid(Box::new(validation)));
        }

        let email = OutgoingEmail::from_draft(draft)?;
        self.otp.request_code(&email.from).await?;
        info!("Verification code requested for {}", email.from);

        Ok(PendingSend { email, validation })
    }

    /// Asks the code service to send the code again.
    ///
    /// # Errors
    ///
    /// Returns the code service's failure.
    pub async fn resend(&self, pending: &PendingSend) -> Result<(), SendError> {
        self.otp.resend_code(&pending.email.from).await?;
        info!("Verification code resent to {}", pending.email.from);
        Ok(())
    }

    /// Verifies `code` and dispatches the message.
    ///
    /// A rejected code leaves `pending` usable for another attempt.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::CodeRejected`] if the code does not verify, or
    /// the collaborator's failure.
    pub async fn confirm(
        &self,
        pending: &PendingSend,
        code: &str,
    ) -> Result<DispatchReceipt, SendError> {
        let from = &pending.email.from;
        if !self.otp.verify_code(from, code.trim()).await? {
            warn!("Verification code rejected for {from}");
            return Err(SendError::CodeRejected);
        }
        debug!("Verification code accepted for {from}");

        let receipt = self.dispatcher.dispatch(&pending.email).await?;
        info!(
            "Sent \"{}\" to {} recipient(s)",
            pending.email.subject,
            pending.email.to.len()
        );
        Ok(receipt)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const CODE: &str = "482913";

    #[derive(Default)]
    struct MemoryOtp {
        requested: Mutex<Vec<String>>,
        resent: Mutex<usize>,
    }

    impl OtpService for MemoryOtp {
        async fn request_code(&self, address: &Address) -> Result<(), OtpError> {
            self.requested.lock().unwrap().push(address.to_string());
            Ok(())
        }

        async fn verify_code(&self, _address: &Address, code: &str) -> Result<bool, OtpError> {
            Ok(code == CODE)
        }

        async fn resend_code(&self, _address: &Address) -> Result<(), OtpError> {
            *self.resent.lock().unwrap() += 1;
            Ok(())
        }
    }

    struct DownOtp;

    impl OtpService for DownOtp {
        async fn request_code(&self, _address: &Address) -> Result<(), OtpError> {
            Err(OtpError::Transport("connection refused".into()))
        }

        async fn verify_code(&self, _address: &Address, _code: &str) -> Result<bool, OtpError> {
            Err(OtpError::Transport("connection refused".into()))
        }

        async fn resend_code(&self, _address: &Address) -> Result<(), OtpError> {
            Err(OtpError::Transport("connection refused".into()))
        }
    }

    #[derive(Default)]
    struct Outbox {
        sent: Mutex<Vec<OutgoingEmail>>,
    }

    impl MailDispatcher for Outbox {
        async fn dispatch(&self, email: &OutgoingEmail) -> Result<DispatchReceipt, DispatchError> {
            self.sent.lock().unwrap().push(email.clone());
            Ok(DispatchReceipt {
                email_id: Some("em-1".into()),
                message: "Email sent successfully".into(),
                sent_at: Utc::now(),
            })
        }
    }

    fn ready_draft() -> Draft {
        Draft::internal("CTK-TECH")
            .with_product("GWAY")
            .with_action("ACTION")
            .with_urgency("HIGH")
            .with_description("Server outage")
            .with_message("Please restart the settlement workers before noon.")
            .with_recipient("ops@centrika.rw")
            .with_recipient("ops@centrika.rw")
            .with_sender("alice@centrika.rw")
    }

    fn gate<O: OtpService + Sync>(otp: O) -> SendGate<'static, O, Outbox> {
        SendGate::new(Validator::default(), otp, Outbox::default())
    }

    mod outgoing_tests {
        use super::*;

        #[test]
        fn built_from_draft() {
            let email = OutgoingEmail::from_draft(&ready_draft()).unwrap();
            assert_eq!(email.from.as_str(), "alice@centrika.rw");
            assert_eq!(email.to.len(), 1);
            assert_eq!(email.subject, "CTK-CTK-TECH-GWAY - Server outage - ACTION - HIGH");
            assert_eq!(email.direction, Direction::Internal);
        }

        #[test]
        fn sender_required() {
            let draft = ready_draft().with_sender("");
            assert!(matches!(
                OutgoingEmail::from_draft(&draft),
                Err(SendError::InvalidSender(_))
            ));
        }
    }

    mod gate_tests {
        use super::*;

        #[tokio::test]
        async fn invalid_draft_is_blocked_before_otp() {
            let gate = gate(MemoryOtp::default());
            let err = gate
                .begin(&ready_draft().with_description(""))
                .await
                .unwrap_err();

            let validation = err.validation().unwrap();
            assert!(!validation.is_valid);
            assert!(gate.otp.requested.lock().unwrap().is_empty());
        }

        #[tokio::test]
        async fn code_requested_for_sender() {
            let gate = gate(MemoryOtp::default());
            let pending = gate.begin(&ready_draft()).await.unwrap();

            assert!(pending.validation().is_valid);
            assert_eq!(
                *gate.otp.requested.lock().unwrap(),
                vec!["alice@centrika.rw".to_string()]
            );
        }

        #[tokio::test]
        async fn wrong_code_does_not_send() {
            let gate = gate(MemoryOtp::default());
            let pending = gate.begin(&ready_draft()).await.unwrap();

            let err = gate.confirm(&pending, "000000").await.unwrap_err();
            assert!(matches!(err, SendError::CodeRejected));
            assert!(gate.dispatcher.sent.lock().unwrap().is_empty());

            let receipt = gate.confirm(&pending, CODE).await.unwrap();
            assert_eq!(receipt.email_id.as_deref(), Some("em-1"));
            assert_eq!(gate.dispatcher.sent.lock().unwrap().len(), 1);
        }

        #[test]
        fn whitespace_around_code_is_ignored() {
            let gate = gate(MemoryOtp::default());
            let pending = tokio_test::block_on(gate.begin(&ready_draft())).unwrap();
            let receipt = tokio_test::block_on(gate.confirm(&pending, " 482913\n"));
            assert!(receipt.is_ok());
        }

        #[tokio::test]
        async fn resend_goes_to_service() {
            let gate = gate(MemoryOtp::default());
            let pending = gate.begin(&ready_draft()).await.unwrap();
            gate.resend(&pending).await.unwrap();
            assert_eq!(*gate.otp.resent.lock().unwrap(), 1);
        }

        #[tokio::test]
        async fn otp_failure_propagates() {
            let gate = gate(DownOtp);
            let err = gate.begin(&ready_draft()).await.unwrap_err();
            assert!(matches!(err, SendError::Otp(OtpError::Transport(_))));
            assert_eq!(err.to_string(), "OTP service unreachable: connection refused");
        }
    }

    #[test]
    fn receipt_json_shape() {
        let json = r#"{"emailId": "abc", "message": "ok", "sentAt": "2026-10-19T08:00:00Z"}"#;
        let receipt: DispatchReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.email_id.as_deref(), Some("abc"));
    }
}
