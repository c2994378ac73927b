//! Field-level validation for live per-input feedback.

use std::str::FromStr;

use super::ValidationResult;
use super::rules::{self, Findings};
use crate::draft::{Counterparty, Direction, Draft};
use crate::subject::SubjectParts;
use crate::taxonomy::Taxonomy;

/// A single input of the compose form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Free-text description (the form's "subject" input).
    Description,
    /// Department code.
    Department,
    /// Product code.
    Product,
    /// Action code.
    ActionType,
    /// Urgency code.
    Urgency,
    /// External party code.
    ExternalParty,
    /// Custom external party name.
    CustomExternalPartyName,
    /// Message body.
    Message,
    /// Recipient list.
    Recipients,
}

impl Field {
    /// Convert to the form's field name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Description => "subject",
            Self::Department => "department",
            Self::Product => "product",
            Self::ActionType => "actionType",
            Self::Urgency => "urgencyLevel",
            Self::ExternalParty => "externalParty",
            Self::CustomExternalPartyName => "customExternalParty",
            Self::Message => "message",
            Self::Recipients => "recipients",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subject" | "description" => Ok(Self::Description),
            "department" => Ok(Self::Department),
            "product" => Ok(Self::Product),
            "actionType" => Ok(Self::ActionType),
            "urgencyLevel" | "urgency" => Ok(Self::Urgency),
            "externalParty" => Ok(Self::ExternalParty),
            "customExternalParty" | "customExternalPartyName" => {
                Ok(Self::CustomExternalPartyName)
            }
            "message" => Ok(Self::Message),
            "recipients" => Ok(Self::Recipients),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Validates one field in isolation.
///
/// Uses the same rules as full validation, so every error reported here is
/// also reported by [`Validator::validate`](super::Validator::validate) for a
/// draft holding `value` in that field. `context` supplies the rest of the
/// draft where a rule depends on it (direction, action type, party code).
/// Recipients are taken from `context` when it is given; otherwise `value`
/// is read as a comma-separated list.
pub(super) fn validate_field(
    taxonomy: &Taxonomy,
    field: Field,
    value: &str,
    context: Option<&Draft>,
) -> ValidationResult {
    let mut f = Findings::default();
    let direction = context.map(Draft::direction);
    let party = context.and_then(Draft::counterparty);

    match field {
        Field::Description => rules::check_description(value, &mut f),
        Field::Department => rules::check_department(value, taxonomy, &mut f),
        Field::Product => rules::check_product(value, taxonomy, &mut f),
        Field::ActionType => rules::check_action(value, taxonomy, &mut f),
        Field::Urgency => rules::check_urgency(Some(value), taxonomy, &mut f),
        Field::ExternalParty => {
            if direction != Some(Direction::Internal) {
                let candidate = Counterparty {
                    code: value.to_string(),
                    custom_name: party.and_then(|p| p.custom_name.clone()),
                };
                rules::check_party_code(&candidate, taxonomy, &mut f);
            }
        }
        Field::CustomExternalPartyName => {
            // Full validation only looks at the name once a party is chosen.
            let party_chosen = match context {
                None => true,
                Some(_) => party.is_some_and(|p| !p.code.is_empty()),
            };
            if party_chosen && !value.is_empty() {
                rules::check_custom_name(value, &mut f);
            }
        }
        Field::Message => {
            let action = context.map(|d| d.action_type.as_str());
            rules::check_message(value, action, &mut f);
        }
        Field::Recipients => match context {
            // Commas are legal inside an address, so the draft's own list wins.
            Some(draft) => rules::check_recipients(&draft.recipients, &mut f),
            None => {
                let recipients: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string)
                    .collect();
                rules::check_recipients(&recipients, &mut f);
            }
        },
    }

    f.finish(SubjectParts::default())
}
