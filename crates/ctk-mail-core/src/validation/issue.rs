//! Findings reported by the validators.

use thiserror::Error;

use super::field::Field;

/// A blocking validation failure. Any error makes the draft unsendable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Description is empty.
    #[error("Subject line is required")]
    SubjectRequired,
    /// Subject does not start with the `CTK-` prefix.
    #[error("Subject line must start with \"CTK-\"")]
    MissingPrefix,
    /// Subject does not have the canonical segment structure.
    #[error("Subject line does not follow the correct format")]
    MalformedSubject,
    /// Rendered subject exceeds the length cap.
    #[error("Subject line is {over} characters too long (max {max} characters)")]
    SubjectTooLong {
        /// Characters over the cap.
        over: usize,
        /// The cap itself.
        max: usize,
    },
    /// Department code is not in the taxonomy.
    #[error("Invalid department code: {0}")]
    InvalidDepartment(String),
    /// Product code is not in the taxonomy.
    #[error("Invalid product code: {0}")]
    InvalidProduct(String),
    /// Action code is not in the taxonomy.
    #[error("Invalid action type: {0}")]
    InvalidAction(String),
    /// Urgency code is not in the taxonomy.
    #[error("Invalid urgency level: {0}")]
    InvalidUrgency(String),
    /// External or inbound draft without a party.
    #[error("External party is required for external/inbound emails")]
    ExternalPartyRequired,
    /// Custom party name shorter than two characters.
    #[error("Custom external party name is too short")]
    CustomPartyTooShort,
    /// Message body is empty.
    #[error("Email message content is required")]
    MessageRequired,
    /// No recipients.
    #[error("At least one recipient is required")]
    RecipientsRequired,
    /// Recipients that are not valid addresses, in entry order.
    #[error("Invalid email format: {}", .0.join(", "))]
    InvalidRecipients(Vec<String>),
}

impl ValidationError {
    /// Get the form field this error relates to.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::SubjectRequired
            | Self::MissingPrefix
            | Self::MalformedSubject
            | Self::SubjectTooLong { .. } => Field::Description,
            Self::InvalidDepartment(_) => Field::Department,
            Self::InvalidProduct(_) => Field::Product,
            Self::InvalidAction(_) => Field::ActionType,
            Self::InvalidUrgency(_) => Field::Urgency,
            Self::ExternalPartyRequired => Field::ExternalParty,
            Self::CustomPartyTooShort => Field::CustomExternalPartyName,
            Self::MessageRequired => Field::Message,
            Self::RecipientsRequired | Self::InvalidRecipients(_) => Field::Recipients,
        }
    }
}

/// A non-blocking quality issue. Each warning carries a wording suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Warning {
    /// Description shorter than five characters.
    SubjectShort,
    /// Description contains a vague term such as "help" or "asap".
    VagueSubject,
    /// Description contains `!!`.
    ExcessivePunctuation,
    /// Description is written entirely in capitals.
    AllCaps,
    /// Party code is not in any category and no custom name was given.
    UnknownParty,
    /// Custom party name longer than fifty characters.
    CustomPartyTooLong,
    /// Message shorter than ten characters.
    MessageShort,
    /// Message longer than five thousand characters.
    MessageLong,
    /// Message uses informal language.
    InformalLanguage,
    /// Non-informational message without any call to action.
    MissingCallToAction,
    /// The same recipient appears more than once.
    DuplicateRecipients,
    /// More than twenty recipients.
    ManyRecipients,
}

impl Warning {
    /// Get human-readable warning message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::SubjectShort => "Subject line is very short - consider adding more detail",
            Self::VagueSubject => "Subject contains vague terms - be more specific",
            Self::ExcessivePunctuation => "Subject contains excessive punctuation",
            Self::AllCaps => "Subject is in all caps - use proper case",
            Self::UnknownParty => "External party not in standard list - ensure proper naming",
            Self::CustomPartyTooLong => "Custom external party name is very long",
            Self::MessageShort => "Email message is very short",
            Self::MessageLong => "Email message is very long",
            Self::InformalLanguage => "Message contains informal language",
            Self::MissingCallToAction => "Message may be missing clear action items",
            Self::DuplicateRecipients => "Duplicate recipients detected",
            Self::ManyRecipients => "Large number of recipients",
        }
    }

    /// Get the wording suggestion that accompanies this warning.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::SubjectShort => "Provide a more descriptive subject (at least 5 characters)",
            Self::VagueSubject => "Replace vague terms with specific details",
            Self::ExcessivePunctuation => {
                "Use professional punctuation - avoid multiple exclamation marks"
            }
            Self::AllCaps => "Use proper capitalization for professional communication",
            Self::UnknownParty => "Use standard external party codes when possible",
            Self::CustomPartyTooLong => "Keep external party names concise",
            Self::MessageShort => "Provide more detailed information in the message",
            Self::MessageLong => {
                "Consider breaking long messages into multiple emails or attachments"
            }
            Self::InformalLanguage => {
                "Use professional language appropriate for business communication"
            }
            Self::MissingCallToAction => {
                "Include specific action items and deadlines when requesting actions"
            }
            Self::DuplicateRecipients => "Remove duplicate email addresses",
            Self::ManyRecipients => "Consider using BCC for large recipient lists",
        }
    }

    /// Get the form field this warning relates to.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::SubjectShort | Self::VagueSubject | Self::ExcessivePunctuation | Self::AllCaps => {
                Field::Description
            }
            Self::UnknownParty => Field::ExternalParty,
            Self::CustomPartyTooLong => Field::CustomExternalPartyName,
            Self::MessageShort
            | Self::MessageLong
            | Self::InformalLanguage
            | Self::MissingCallToAction => Field::Message,
            Self::DuplicateRecipients | Self::ManyRecipients => Field::Recipients,
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Suggested when the description says "urgent" but the urgency is not URGENT.
pub const URGENT_WORDING_SUGGESTION: &str =
    "Consider using URGENT urgency level instead of \"urgent\" in subject";

/// Suggested when a standalone subject is over the length cap.
pub const SHORTEN_SUGGESTION: &str = "Consider shortening the subject description";
