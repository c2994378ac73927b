//! Standalone checker for an already-written subject line.

use super::ValidationResult;
use super::issue::{SHORTEN_SUGGESTION, URGENT_WORDING_SUGGESTION, ValidationError, Warning};
use super::rules::{self, Findings};
use crate::draft::Direction;
use crate::subject::{
    MAX_SUBJECT_LENGTH, SUBJECT_FORMAT_HINT, SUBJECT_PREFIX, parse_subject_lenient, subject_length,
};
use crate::taxonomy::Taxonomy;

/// Checks a subject string that was not produced from a draft, such as one
/// pasted by a user or taken from an inbound message.
///
/// Surrounding whitespace is ignored and segments may be joined by a bare
/// `-`. Department segments are accepted with or without their own `CTK-`
/// prefix, so both `CTK-CTK-TECH-...` and `CTK-TECH-...` pass.
pub(super) fn check_subject_line(taxonomy: &Taxonomy, subject: &str) -> ValidationResult {
    let mut f = Findings::default();
    let subject = subject.trim();

    if !subject.starts_with(SUBJECT_PREFIX) {
        f.error(ValidationError::MissingPrefix);
    }

    let length = subject_length(subject);
    if length > MAX_SUBJECT_LENGTH {
        f.error(ValidationError::SubjectTooLong {
            over: length - MAX_SUBJECT_LENGTH,
            max: MAX_SUBJECT_LENGTH,
        });
        f.suggest(SHORTEN_SUGGESTION);
    }

    let Some(parts) = parse_subject_lenient(subject) else {
        f.error(ValidationError::MalformedSubject);
        f.suggest(SUBJECT_FORMAT_HINT);
        return f.finish(Default::default());
    };

    match parts.direction {
        Some(Direction::Internal) | None => {
            if let Some(department) = parts.department.as_deref() {
                let prefixed = format!("{SUBJECT_PREFIX}{department}");
                if !taxonomy.is_department(department) && !taxonomy.is_department(&prefixed) {
                    f.error(ValidationError::InvalidDepartment(department.to_string()));
                }
            }
        }
        Some(Direction::External | Direction::Inbound) => {
            // Custom names are appended to the party code, so match on prefix.
            let party = parts.external_party.as_deref().unwrap_or_default();
            if !taxonomy.party_entries().any(|e| party.starts_with(&e.code)) {
                f.warn(Warning::UnknownParty);
            }
        }
    }

    if let Some(product) = parts.product.as_deref() {
        rules::check_product(product, taxonomy, &mut f);
    }
    if let Some(action) = parts.action.as_deref() {
        rules::check_action(action, taxonomy, &mut f);
    }
    rules::check_urgency(parts.urgency.as_deref(), taxonomy, &mut f);

    let description = parts.description.as_deref().unwrap_or_default();
    rules::check_description(description, &mut f);
    if description.to_lowercase().contains("urgent") && parts.urgency.as_deref() != Some("URGENT")
    {
        f.suggest(URGENT_WORDING_SUGGESTION);
    }

    f.finish(parts)
}
