//! Draft model: the structured, in-progress representation of an email.

use serde::{Deserialize, Deserializer, Serialize};

/// Whether an email is internal, outgoing to an external party, or a
/// recorded inbound exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Between Centrika departments.
    #[default]
    Internal,
    /// Sent to an external party.
    External,
    /// Received from an external party.
    Inbound,
}

impl Direction {
    /// Convert to the lowercase wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
            Self::Inbound => "inbound",
        }
    }

    /// Marker placed before the party code in the subject line.
    #[must_use]
    pub const fn party_marker(&self) -> &'static str {
        match self {
            Self::Internal => "",
            Self::External => "EXT-",
            Self::Inbound => "IN-",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The external party of an external or inbound draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
    /// Party code. Empty means "not chosen yet".
    #[serde(rename = "externalParty", default, deserialize_with = "null_as_default")]
    pub code: String,
    /// Free-text name for a named individual or entity (e.g. a specific
    /// customer), combined with the party code in the subject line.
    #[serde(
        rename = "customExternalPartyName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_name: Option<String>,
}

impl Counterparty {
    /// Creates a counterparty with just a code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            custom_name: None,
        }
    }

    /// Custom name, treating an empty string as absent.
    #[must_use]
    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Direction together with the fields that only exist for that direction.
///
/// Non-internal routes always carry a [`Counterparty`]; the party code may
/// still be empty while the user is filling in the form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "lowercase")]
pub enum Route {
    /// Internal email.
    #[default]
    Internal,
    /// Outgoing email to an external party.
    External(Counterparty),
    /// Inbound email from an external party.
    Inbound(Counterparty),
}

impl Route {
    /// Direction of this route.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        match self {
            Self::Internal => Direction::Internal,
            Self::External(_) => Direction::External,
            Self::Inbound(_) => Direction::Inbound,
        }
    }

    /// Counterparty for external and inbound routes.
    #[must_use]
    pub const fn counterparty(&self) -> Option<&Counterparty> {
        match self {
            Self::Internal => None,
            Self::External(party) | Self::Inbound(party) => Some(party),
        }
    }
}

/// An email being composed.
///
/// Every text field defaults to the empty string and `recipients` to the
/// empty list, whether the key is missing or `null`, so partially filled
/// forms deserialize cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Direction and, for non-internal drafts, the external party.
    #[serde(flatten)]
    pub route: Route,
    /// Sending department code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub department: String,
    /// Product line code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub product: String,
    /// Action type code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub action_type: String,
    /// Urgency code. `None` means unspecified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    /// Short free-text description (the variable part of the subject).
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Message body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Recipient addresses in entry order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipients: Vec<String>,
    /// Sender address.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sender: String,
}

impl Draft {
    /// Creates an internal draft from a department.
    #[must_use]
    pub fn internal(department: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            ..Self::default()
        }
    }

    /// Creates an external draft addressed to a party.
    #[must_use]
    pub fn external(party: impl Into<String>) -> Self {
        Self {
            route: Route::External(Counterparty::new(party)),
            ..Self::default()
        }
    }

    /// Creates an inbound draft from a party.
    #[must_use]
    pub fn inbound(party: impl Into<String>) -> Self {
        Self {
            route: Route::Inbound(Counterparty::new(party)),
            ..Self::default()
        }
    }

    /// Direction of the draft.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.route.direction()
    }

    /// External party, if the draft is not internal.
    #[must_use]
    pub const fn counterparty(&self) -> Option<&Counterparty> {
        self.route.counterparty()
    }

    /// Urgency code, treating an empty string as unspecified.
    #[must_use]
    pub fn urgency(&self) -> Option<&str> {
        self.urgency.as_deref().filter(|u| !u.is_empty())
    }

    /// Sets the department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the custom party name. Ignored for internal drafts.
    #[must_use]
    pub fn with_custom_party(mut self, name: impl Into<String>) -> Self {
        if let Route::External(party) | Route::Inbound(party) = &mut self.route {
            party.custom_name = Some(name.into());
        }
        self
    }

    /// Sets the product.
    #[must_use]
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    /// Sets the action type.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action_type = action.into();
        self
    }

    /// Sets the urgency.
    #[must_use]
    pub fn with_urgency(mut self, urgency: impl Into<String>) -> Self {
        self.urgency = Some(urgency.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the message body.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Adds a recipient.
    #[must_use]
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipients.push(recipient.into());
        self
    }

    /// Sets the sender.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }
}

/// Reads `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_route() {
        assert_eq!(Draft::internal("CTK-HR").direction(), Direction::Internal);
        assert_eq!(Draft::external("BNR").direction(), Direction::External);
        assert_eq!(Draft::inbound("BK").direction(), Direction::Inbound);
        assert!(Draft::internal("CTK-HR").counterparty().is_none());
        assert_eq!(Draft::inbound("BK").counterparty().unwrap().code, "BK");
    }

    #[test]
    fn custom_party_ignored_for_internal() {
        let draft = Draft::internal("CTK-HR").with_custom_party("Acme");
        assert_eq!(draft.route, Route::Internal);

        let draft = Draft::external("Customer").with_custom_party("Acme");
        assert_eq!(draft.counterparty().unwrap().custom_name(), Some("Acme"));
    }

    #[test]
    fn empty_urgency_is_unspecified() {
        let draft = Draft::internal("CTK-HR").with_urgency("");
        assert_eq!(draft.urgency(), None);
        assert_eq!(draft.with_urgency("HIGH").urgency(), Some("HIGH"));
    }

    #[test]
    fn deserializes_external_draft() {
        let json = r#"{
            "direction": "external",
            "externalParty": "Customer",
            "customExternalPartyName": "Jane Doe",
            "department": "CTK-CUST",
            "product": "WALT",
            "actionType": "ACTION",
            "description": "Refund request",
            "recipients": ["jane@example.com"]
        }"#;
        let draft: Draft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.direction(), Direction::External);
        let party = draft.counterparty().unwrap();
        assert_eq!(party.code, "Customer");
        assert_eq!(party.custom_name(), Some("Jane Doe"));
        assert_eq!(draft.action_type, "ACTION");
        assert_eq!(draft.message, "");
        assert_eq!(draft.urgency, None);
    }

    #[test]
    fn null_fields_deserialize_as_empty() {
        let json = r#"{
            "direction": "external",
            "externalParty": null,
            "description": null,
            "message": null,
            "recipients": null,
            "urgency": null
        }"#;
        let draft: Draft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.description, "");
        assert_eq!(draft.message, "");
        assert!(draft.recipients.is_empty());
        assert_eq!(draft.urgency(), None);
        assert_eq!(draft.counterparty().unwrap().code, "");
    }

    #[test]
    fn missing_party_deserializes_as_empty_code() {
        let json = r#"{"direction": "inbound", "product": "ALL"}"#;
        let draft: Draft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.counterparty().unwrap().code, "");
    }

    #[test]
    fn internal_draft_serializes_without_party_fields() {
        let draft = Draft::internal("CTK-TECH").with_product("GWAY");
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["direction"], "internal");
        assert_eq!(value["department"], "CTK-TECH");
        assert!(value.get("externalParty").is_none());
    }
}
