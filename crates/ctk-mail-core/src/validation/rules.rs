//! Individual validation rules shared by the full, field-level and
//! standalone subject validators.

use std::collections::HashSet;

use super::issue::{ValidationError, Warning};
use super::ValidationResult;
use crate::address::is_valid_address;
use crate::draft::Counterparty;
use crate::subject::{MAX_SUBJECT_LENGTH, SubjectParts, subject_length};
use crate::taxonomy::Taxonomy;

/// Terms that make a subject vague.
pub const VAGUE_TERMS: &[&str] = &[
    "question",
    "help",
    "issue",
    "problem",
    "urgent",
    "asap",
    "important",
];

/// Terms that make a message informal.
pub const INFORMAL_TERMS: &[&str] = &[
    "hey",
    "hi there",
    "whats up",
    "cool",
    "awesome",
    "gonna",
    "wanna",
];

/// Words that signal a call to action in the message body.
pub const ACTION_KEYWORDS: &[&str] = &[
    "please", "request", "require", "need", "action", "complete", "review", "approve",
];

/// Action code that needs no call to action.
pub const INFO_ACTION: &str = "INFO";

/// Descriptions shorter than this get a warning.
pub const MIN_DESCRIPTION_LENGTH: usize = 5;
/// Custom party names shorter than this are rejected.
pub const MIN_CUSTOM_PARTY_LENGTH: usize = 2;
/// Custom party names longer than this get a warning.
pub const MAX_CUSTOM_PARTY_LENGTH: usize = 50;
/// Messages shorter than this get a warning.
pub const MIN_MESSAGE_LENGTH: usize = 10;
/// Messages longer than this get a warning.
pub const MAX_MESSAGE_LENGTH: usize = 5000;
/// Recipient lists longer than this get a warning.
pub const MAX_RECIPIENTS: usize = 20;

/// Accumulates findings while rules run.
#[derive(Debug, Default)]
pub(crate) struct Findings {
    errors: Vec<ValidationError>,
    warnings: Vec<Warning>,
    suggestions: Vec<&'static str>,
}

impl Findings {
    pub(crate) fn error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Records a warning together with its suggestion.
    pub(crate) fn warn(&mut self, warning: Warning) {
        self.suggestions.push(warning.suggestion());
        self.warnings.push(warning);
    }

    pub(crate) fn suggest(&mut self, suggestion: &'static str) {
        self.suggestions.push(suggestion);
    }

    pub(crate) fn finish(self, parsed_parts: SubjectParts) -> ValidationResult {
        ValidationResult {
            is_valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
            suggestions: self.suggestions,
            parsed_parts,
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    let haystack = haystack.to_lowercase();
    needles.iter().any(|n| haystack.contains(n))
}

/// Presence and shape of the free-text description.
pub(crate) fn check_description(description: &str, f: &mut Findings) {
    let description = description.trim();
    if description.is_empty() {
        f.error(ValidationError::SubjectRequired);
        return;
    }

    let length = description.chars().count();
    if length < MIN_DESCRIPTION_LENGTH {
        f.warn(Warning::SubjectShort);
    }
    if contains_any(description, VAGUE_TERMS) {
        f.warn(Warning::VagueSubject);
    }
    if description.contains("!!") {
        f.warn(Warning::ExcessivePunctuation);
    }
    // Caseless text counts too: "2024" equals its own upper case.
    if length > 3 && description == description.to_uppercase() {
        f.warn(Warning::AllCaps);
    }
}

/// Hard cap on the rendered subject.
pub(crate) fn check_length(subject: &str, f: &mut Findings) {
    let length = subject_length(subject);
    if length > MAX_SUBJECT_LENGTH {
        f.error(ValidationError::SubjectTooLong {
            over: length - MAX_SUBJECT_LENGTH,
            max: MAX_SUBJECT_LENGTH,
        });
    }
}

pub(crate) fn check_department(code: &str, taxonomy: &Taxonomy, f: &mut Findings) {
    if !taxonomy.is_department(code) {
        f.error(ValidationError::InvalidDepartment(code.to_string()));
    }
}

pub(crate) fn check_product(code: &str, taxonomy: &Taxonomy, f: &mut Findings) {
    if !taxonomy.is_product(code) {
        f.error(ValidationError::InvalidProduct(code.to_string()));
    }
}

pub(crate) fn check_action(code: &str, taxonomy: &Taxonomy, f: &mut Findings) {
    if !taxonomy.is_action(code) {
        f.error(ValidationError::InvalidAction(code.to_string()));
    }
}

/// Urgency is optional; only a present code is checked.
pub(crate) fn check_urgency(code: Option<&str>, taxonomy: &Taxonomy, f: &mut Findings) {
    if let Some(code) = code.filter(|c| !c.is_empty())
        && !taxonomy.is_urgency(code)
    {
        f.error(ValidationError::InvalidUrgency(code.to_string()));
    }
}

/// Party code presence and membership. Returns false when the code is missing.
pub(crate) fn check_party_code(party: &Counterparty, taxonomy: &Taxonomy, f: &mut Findings) -> bool {
    if party.code.is_empty() {
        f.error(ValidationError::ExternalPartyRequired);
        return false;
    }
    if !taxonomy.is_external_party(&party.code) && party.custom_name().is_none() {
        f.warn(Warning::UnknownParty);
    }
    true
}

pub(crate) fn check_custom_name(name: &str, f: &mut Findings) {
    let length = name.chars().count();
    if length < MIN_CUSTOM_PARTY_LENGTH {
        f.error(ValidationError::CustomPartyTooShort);
    }
    if length > MAX_CUSTOM_PARTY_LENGTH {
        f.warn(Warning::CustomPartyTooLong);
    }
}

/// All counterparty rules for a non-internal draft.
pub(crate) fn check_counterparty(party: &Counterparty, taxonomy: &Taxonomy, f: &mut Findings) {
    if !check_party_code(party, taxonomy, f) {
        return;
    }
    if let Some(name) = party.custom_name() {
        check_custom_name(name, f);
    }
}

/// Body content heuristics. `action` is `None` when the action type is
/// unknown, which skips the call-to-action check.
pub(crate) fn check_message(message: &str, action: Option<&str>, f: &mut Findings) {
    let message = message.trim();
    if message.is_empty() {
        f.error(ValidationError::MessageRequired);
        return;
    }

    let length = message.chars().count();
    if length < MIN_MESSAGE_LENGTH {
        f.warn(Warning::MessageShort);
    }
    if length > MAX_MESSAGE_LENGTH {
        f.warn(Warning::MessageLong);
    }
    if contains_any(message, INFORMAL_TERMS) {
        f.warn(Warning::InformalLanguage);
    }
    if let Some(action) = action
        && action != INFO_ACTION
        && !contains_any(message, ACTION_KEYWORDS)
    {
        f.warn(Warning::MissingCallToAction);
    }
}

pub(crate) fn check_recipients(recipients: &[String], f: &mut Findings) {
    if recipients.is_empty() {
        f.error(ValidationError::RecipientsRequired);
        return;
    }

    let invalid: Vec<String> = recipients
        .iter()
        .filter(|r| !is_valid_address(r))
        .cloned()
        .collect();
    if !invalid.is_empty() {
        f.error(ValidationError::InvalidRecipients(invalid));
    }

    let unique: HashSet<&str> = recipients.iter().map(String::as_str).collect();
    if unique.len() != recipients.len() {
        f.warn(Warning::DuplicateRecipients);
    }
    if recipients.len() > MAX_RECIPIENTS {
        f.warn(Warning::ManyRecipients);
    }
}
