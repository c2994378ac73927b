//! Format validation for drafts and subject lines.
//!
//! [`Validator::validate`] runs every rule stage over a draft and collects
//! all findings in one pass:
//!
//! 1. description presence and shape
//! 2. rendered subject length
//! 3. taxonomy membership of department, product, action and urgency
//! 4. external party (non-internal drafts only)
//! 5. message content heuristics
//! 6. recipients
//!
//! Errors block sending; warnings and suggestions never affect
//! [`ValidationResult::is_valid`]. Validation is a pure function of the draft
//! and the taxonomy.

mod field;
mod issue;
mod rules;
mod subject_check;

pub use field::{Field, UnknownField};
pub use issue::{
    SHORTEN_SUGGESTION, URGENT_WORDING_SUGGESTION, ValidationError, Warning,
};
pub use rules::{
    ACTION_KEYWORDS, INFORMAL_TERMS, MAX_CUSTOM_PARTY_LENGTH, MAX_MESSAGE_LENGTH, MAX_RECIPIENTS,
    MIN_CUSTOM_PARTY_LENGTH, MIN_DESCRIPTION_LENGTH, MIN_MESSAGE_LENGTH, VAGUE_TERMS,
};

use serde::{Serialize, Serializer};

use crate::draft::Draft;
use crate::subject::{SUBJECT_FORMAT_HINT, SubjectParts, build_subject, parse_subject};
use crate::taxonomy::Taxonomy;
use rules::Findings;

/// Outcome of a validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when there are no errors.
    pub is_valid: bool,
    /// Blocking failures.
    #[serde(serialize_with = "display_all")]
    pub errors: Vec<ValidationError>,
    /// Advisory quality issues.
    #[serde(serialize_with = "display_all")]
    pub warnings: Vec<Warning>,
    /// Optional wording tips.
    pub suggestions: Vec<&'static str>,
    /// Segments recovered from the subject line.
    pub parsed_parts: SubjectParts,
}

impl ValidationResult {
    /// Error messages as shown to the user.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Warning messages as shown to the user.
    #[must_use]
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// Errors that relate to one form field.
    pub fn errors_for(&self, field: Field) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.field() == field)
    }
}

#[allow(clippy::ptr_arg)] // Required by serde serialize_with signature
fn display_all<T, S>(items: &Vec<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: std::fmt::Display,
    S: Serializer,
{
    serializer.collect_seq(items.iter().map(ToString::to_string))
}

/// Validates drafts against a taxonomy.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'t> {
    taxonomy: &'t Taxonomy,
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self::new(Taxonomy::standard())
    }
}

impl<'t> Validator<'t> {
    /// Creates a validator over the given tables.
    #[must_use]
    pub const fn new(taxonomy: &'t Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// The tables this validator checks against.
    #[must_use]
    pub const fn taxonomy(&self) -> &'t Taxonomy {
        self.taxonomy
    }

    /// Validates a full draft. All stages always run.
    #[must_use]
    pub fn validate(&self, draft: &Draft) -> ValidationResult {
        let taxonomy = self.taxonomy;
        let mut f = Findings::default();

        rules::check_description(&draft.description, &mut f);
        if draft.description.to_lowercase().contains("urgent")
            && draft.urgency() != Some("URGENT")
        {
            f.suggest(issue::URGENT_WORDING_SUGGESTION);
        }

        let subject = build_subject(draft);
        rules::check_length(&subject, &mut f);
        if parse_subject(&subject).is_none() {
            f.suggest(SUBJECT_FORMAT_HINT);
        }

        rules::check_department(&draft.department, taxonomy, &mut f);
        rules::check_product(&draft.product, taxonomy, &mut f);
        rules::check_action(&draft.action_type, taxonomy, &mut f);
        rules::check_urgency(draft.urgency(), taxonomy, &mut f);

        if let Some(party) = draft.counterparty() {
            rules::check_counterparty(party, taxonomy, &mut f);
        }

        rules::check_message(&draft.message, Some(&draft.action_type), &mut f);
        rules::check_recipients(&draft.recipients, &mut f);

        f.finish(SubjectParts::from_draft(draft))
    }

    /// Validates a single form field. See [`Field`] for the accepted inputs.
    #[must_use]
    pub fn validate_field(
        &self,
        field: Field,
        value: &str,
        context: Option<&Draft>,
    ) -> ValidationResult {
        field::validate_field(self.taxonomy, field, value, context)
    }

    /// Checks a subject line that did not come from a draft.
    #[must_use]
    pub fn check_subject_line(&self, subject: &str) -> ValidationResult {
        subject_check::check_subject_line(self.taxonomy, subject)
    }
}

/// Validates a draft against the built-in tables.
#[must_use]
pub fn validate_draft(draft: &Draft) -> ValidationResult {
    Validator::default().validate(draft)
}
