//! Canonical subject line: builder and structural parser.
//!
//! The canonical shape is
//!
//! ```text
//! CTK-<DEPARTMENT>-<PRODUCT> - <description> - <ACTION>[ - <URGENCY>]
//! CTK-EXT-<PARTY>-<PRODUCT> - <description> - <ACTION>[ - <URGENCY>]
//! CTK-IN-<PARTY>-<PRODUCT>  - <description> - <ACTION>[ - <URGENCY>]
//! ```
//!
//! Department codes already carry a `CTK-` prefix, so internal subjects start
//! with `CTK-CTK-`. This doubled prefix is the established format and is
//! reproduced as-is.

use serde::Serialize;

use crate::draft::{Counterparty, Direction, Draft, Route};

/// Fixed prefix of every canonical subject.
pub const SUBJECT_PREFIX: &str = "CTK-";

/// Maximum subject length in characters.
pub const MAX_SUBJECT_LENGTH: usize = 78;

/// Separator between subject segments.
const SEGMENT_SEPARATOR: &str = " - ";

/// Format template shown to users when a subject does not parse.
pub const SUBJECT_FORMAT_HINT: &str =
    "Use format: CTK-[DEPT]-[PRODUCT] - [Subject] - [ACTION] - [URGENCY]";

/// Renders the canonical subject for a draft.
///
/// Never fails: missing fields are simply left out, so the result can be
/// shown as a live preview while the form is incomplete. No trimming or
/// length enforcement happens here.
#[must_use]
pub fn build_subject(draft: &Draft) -> String {
    let mut subject = String::from(SUBJECT_PREFIX);

    match &draft.route {
        Route::Internal => subject.push_str(&draft.department),
        Route::External(party) | Route::Inbound(party) => {
            subject.push_str(draft.direction().party_marker());
            subject.push_str(&party_segment(party));
        }
    }

    if !draft.product.is_empty() {
        subject.push('-');
        subject.push_str(&draft.product);
    }
    if !draft.description.is_empty() {
        subject.push_str(SEGMENT_SEPARATOR);
        subject.push_str(&draft.description);
    }
    if !draft.action_type.is_empty() {
        subject.push_str(SEGMENT_SEPARATOR);
        subject.push_str(&draft.action_type);
    }
    if let Some(urgency) = draft.urgency() {
        subject.push_str(SEGMENT_SEPARATOR);
        subject.push_str(urgency);
    }

    subject
}

/// Party code with any custom name appended, upper-cased and without
/// whitespace. The name is only used once a code is chosen.
fn party_segment(party: &Counterparty) -> String {
    let mut segment = party.code.clone();
    if let Some(name) = party.custom_name().filter(|_| !party.code.is_empty()) {
        segment.extend(
            name.chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_uppercase),
        );
    }
    segment
}

/// Length of a subject as counted against [`MAX_SUBJECT_LENGTH`].
#[must_use]
pub fn subject_length(subject: &str) -> usize {
    subject.chars().count()
}

/// Segments recovered from a subject line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectParts {
    /// Direction implied by the head segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Department code (internal subjects).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Product code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Action code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Urgency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    /// External party code, including any appended custom name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_party: Option<String>,
}

impl SubjectParts {
    /// Segments of the subject [`build_subject`] renders for `draft`, taken
    /// from the draft fields. Empty fields are left out.
    #[must_use]
    pub fn from_draft(draft: &Draft) -> Self {
        let mut parts = Self {
            direction: Some(draft.direction()),
            product: non_empty(&draft.product),
            description: non_empty(&draft.description),
            action: non_empty(&draft.action_type),
            urgency: draft.urgency().map(str::to_string),
            ..Self::default()
        };
        match &draft.route {
            Route::Internal => parts.department = non_empty(&draft.department),
            Route::External(party) | Route::Inbound(party) => {
                parts.external_party = non_empty(&party_segment(party));
            }
        }
        parts
    }
}

fn non_empty(s: &str) -> Option<String> {
    Some(s.to_string()).filter(|s| !s.is_empty())
}

/// Splits a subject into its canonical segments.
///
/// Returns `None` when the subject does not have the canonical shape. Action
/// and urgency must be runs of ASCII upper-case letters. When the last two
/// segments both qualify, the last one is read as the urgency, so the
/// description is the shortest text that makes the subject parse.
#[must_use]
pub fn parse_subject(subject: &str) -> Option<SubjectParts> {
    let rest = subject.strip_prefix(SUBJECT_PREFIX)?;
    let segments: Vec<&str> = rest.split(SEGMENT_SEPARATOR).collect();
    if segments.len() < 3 {
        return None;
    }

    let (head, tail) = segments.split_first()?;
    let (tail, urgency) = match tail {
        [body @ .., action, urgency] if !body.is_empty() && is_code(action) && is_code(urgency) => {
            (&tail[..=body.len()], Some(*urgency))
        }
        _ => (tail, None),
    };
    let (action, description) = tail.split_last()?;
    if !is_code(action) || description.is_empty() {
        return None;
    }
    let description = description.join(SEGMENT_SEPARATOR);
    if description.trim().is_empty() {
        return None;
    }

    let (front, product) = head.rsplit_once('-')?;
    if front.is_empty() || product.is_empty() {
        return None;
    }

    let mut parts = SubjectParts {
        product: Some(product.to_string()),
        description: Some(description),
        action: Some((*action).to_string()),
        urgency: urgency.map(str::to_string),
        ..SubjectParts::default()
    };

    if let Some(party) = front.strip_prefix(Direction::External.party_marker()) {
        parts.direction = Some(Direction::External);
        parts.external_party = Some(party.to_string()).filter(|p| !p.is_empty());
    } else if let Some(party) = front.strip_prefix(Direction::Inbound.party_marker()) {
        parts.direction = Some(Direction::Inbound);
        parts.external_party = Some(party.to_string()).filter(|p| !p.is_empty());
    } else {
        parts.direction = Some(Direction::Internal);
        parts.department = Some(front.to_string());
    }

    if parts.direction != Some(Direction::Internal) && parts.external_party.is_none() {
        return None;
    }

    Some(parts)
}

/// Parses a hand-typed subject.
///
/// More forgiving than [`parse_subject`]: surrounding whitespace is ignored
/// and segments may be separated by a bare `-` with or without spaces, so
/// `CTK-TECH-GWAY-Outage-ACTION` is accepted. The head is read as
/// `EXT-<PARTY>-<PRODUCT>`, `IN-<PARTY>-<PRODUCT>`, `CTK-<DEPT>-<PRODUCT>` or
/// `<DEPT>-<PRODUCT>`; hyphens inside the description are kept.
#[must_use]
pub fn parse_subject_lenient(subject: &str) -> Option<SubjectParts> {
    let rest = subject.trim().strip_prefix(SUBJECT_PREFIX)?;
    let pieces: Vec<&str> = rest.split('-').collect();

    let first = pieces.first()?.trim();
    let head_len = match first {
        "EXT" | "IN" | "CTK" => 3,
        _ => 2,
    };
    if pieces.len() < head_len + 2 {
        return None;
    }
    let (head, tail) = pieces.split_at(head_len);
    let head: Vec<&str> = head.iter().map(|p| p.trim()).collect();
    if head.iter().any(|p| p.is_empty()) {
        return None;
    }

    let len = tail.len();
    let (body, action, urgency) = match tail {
        [body @ .., action, urgency]
            if !body.is_empty() && is_code(action.trim()) && is_code(urgency.trim()) =>
        {
            (&tail[..len - 2], action.trim(), Some(urgency.trim()))
        }
        [body @ .., action] => (body, action.trim(), None),
        [] => return None,
    };
    if !is_code(action) {
        return None;
    }
    let description = body.join("-").trim().to_string();
    if description.is_empty() {
        return None;
    }

    let product = head[head_len - 1].to_string();
    let mut parts = SubjectParts {
        product: Some(product),
        description: Some(description),
        action: Some(action.to_string()),
        urgency: urgency.map(str::to_string),
        ..SubjectParts::default()
    };
    match (first, head.as_slice()) {
        ("EXT", [_, party, _]) => {
            parts.direction = Some(Direction::External);
            parts.external_party = Some((*party).to_string());
        }
        ("IN", [_, party, _]) => {
            parts.direction = Some(Direction::Inbound);
            parts.external_party = Some((*party).to_string());
        }
        ("CTK", [_, department, _]) => {
            parts.direction = Some(Direction::Internal);
            parts.department = Some(format!("{SUBJECT_PREFIX}{department}"));
        }
        (_, [department, _]) => {
            parts.direction = Some(Direction::Internal);
            parts.department = Some((*department).to_string());
        }
        _ => return None,
    }

    Some(parts)
}

fn is_code(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_uppercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone)]
mod tests {
    use super::*;

    mod build_tests {
        use super::*;

        #[test]
        fn internal_subject_keeps_doubled_prefix() {
            let draft = Draft::internal("CTK-TECH")
                .with_product("GWAY")
                .with_description("Server outage")
                .with_action("ACTION")
                .with_urgency("HIGH");
            assert_eq!(
                build_subject(&draft),
                "CTK-CTK-TECH-GWAY - Server outage - ACTION - HIGH"
            );
        }

        #[test]
        fn external_subject_without_urgency() {
            let draft = Draft::external("BNR")
                .with_product("ALL")
                .with_description("Monthly Statistical Return Submission")
                .with_action("INFO");
            assert_eq!(
                build_subject(&draft),
                "CTK-EXT-BNR-ALL - Monthly Statistical Return Submission - INFO"
            );
        }

        #[test]
        fn inbound_subject_with_custom_party() {
            let draft = Draft::inbound("Customer")
                .with_custom_party("Jane  Doe\tLtd")
                .with_product("WALT")
                .with_description("Refund query")
                .with_action("REVIEW");
            assert_eq!(
                build_subject(&draft),
                "CTK-IN-CustomerJANEDOELTD-WALT - Refund query - REVIEW"
            );
        }

        #[test]
        fn custom_name_needs_party_code() {
            let draft = Draft::external("").with_custom_party("Acme");
            assert_eq!(build_subject(&draft), "CTK-EXT-");
        }

        #[test]
        fn description_is_not_transformed() {
            let draft = Draft::internal("CTK-HR")
                .with_product("ALL")
                .with_description("  spaced  out ");
            assert_eq!(build_subject(&draft), "CTK-CTK-HR-ALL -   spaced  out ");
        }

        #[test]
        fn empty_draft_is_prefix_only() {
            assert_eq!(build_subject(&Draft::default()), "CTK-");
        }

        #[test]
        fn empty_urgency_is_skipped() {
            let draft = Draft::internal("CTK-HR")
                .with_product("ALL")
                .with_action("INFO")
                .with_urgency("");
            assert_eq!(build_subject(&draft), "CTK-CTK-HR-ALL - INFO");
        }

        #[test]
        fn length_counts_characters() {
            assert_eq!(subject_length("Café"), 4);
        }
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn parses_internal_subject() {
            let parts = parse_subject("CTK-CTK-TECH-GWAY - Server outage - ACTION - HIGH").unwrap();
            assert_eq!(parts.direction, Some(Direction::Internal));
            assert_eq!(parts.department.as_deref(), Some("CTK-TECH"));
            assert_eq!(parts.product.as_deref(), Some("GWAY"));
            assert_eq!(parts.description.as_deref(), Some("Server outage"));
            assert_eq!(parts.action.as_deref(), Some("ACTION"));
            assert_eq!(parts.urgency.as_deref(), Some("HIGH"));
            assert_eq!(parts.external_party, None);
        }

        #[test]
        fn parses_external_subject() {
            let parts =
                parse_subject("CTK-EXT-BNR-ALL - Monthly Statistical Return Submission - INFO")
                    .unwrap();
            assert_eq!(parts.direction, Some(Direction::External));
            assert_eq!(parts.external_party.as_deref(), Some("BNR"));
            assert_eq!(parts.product.as_deref(), Some("ALL"));
            assert_eq!(parts.action.as_deref(), Some("INFO"));
            assert_eq!(parts.urgency, None);
        }

        #[test]
        fn parses_inbound_subject() {
            let parts = parse_subject("CTK-IN-MTN-TECH - Link upgrade - MEETING").unwrap();
            assert_eq!(parts.direction, Some(Direction::Inbound));
            assert_eq!(parts.external_party.as_deref(), Some("MTN"));
        }

        #[test]
        fn description_may_contain_separator() {
            let parts = parse_subject("CTK-CTK-HR-ALL - Q3 - leave plan - REVIEW").unwrap();
            assert_eq!(parts.description.as_deref(), Some("Q3 - leave plan"));
            assert_eq!(parts.action.as_deref(), Some("REVIEW"));
            assert_eq!(parts.urgency, None);
        }

        #[test]
        fn prefers_urgency_for_trailing_codes() {
            let parts = parse_subject("CTK-CTK-HR-ALL - Plan - REVIEW - LOW").unwrap();
            assert_eq!(parts.description.as_deref(), Some("Plan"));
            assert_eq!(parts.action.as_deref(), Some("REVIEW"));
            assert_eq!(parts.urgency.as_deref(), Some("LOW"));
        }

        #[test]
        fn rejects_malformed_subjects() {
            assert_eq!(parse_subject(""), None);
            assert_eq!(parse_subject("Server outage"), None);
            assert_eq!(parse_subject("CTK-CTK-TECH-GWAY - ACTION"), None);
            assert_eq!(parse_subject("CTK-GWAY - Outage - ACTION"), None);
            assert_eq!(parse_subject("CTK-CTK-TECH-GWAY - Outage - action"), None);
            assert_eq!(parse_subject("CTK-EXT--GWAY - Outage - ACTION"), None);
            assert_eq!(parse_subject("CTK-CTK-TECH- - Outage - ACTION"), None);
        }

        #[test]
        fn parts_from_draft_keep_trailing_codes_in_description() {
            let draft = Draft::internal("CTK-TECH")
                .with_product("GWAY")
                .with_description("Server outage - ROLLBACK")
                .with_action("ACTION");
            let parts = SubjectParts::from_draft(&draft);
            assert_eq!(parts.description.as_deref(), Some("Server outage - ROLLBACK"));
            assert_eq!(parts.action.as_deref(), Some("ACTION"));
            assert_eq!(parts.urgency, None);
            assert_eq!(parts.department.as_deref(), Some("CTK-TECH"));
        }

        #[test]
        fn parts_from_draft_include_custom_party() {
            let draft = Draft::external("Customer").with_custom_party("acme co");
            let parts = SubjectParts::from_draft(&draft);
            assert_eq!(parts.direction, Some(Direction::External));
            assert_eq!(parts.external_party.as_deref(), Some("CustomerACMECO"));
            assert_eq!(parts.department, None);
            assert_eq!(parts.product, None);
        }

        #[test]
        fn built_subjects_parse_back() {
            let draft = Draft::external("Customer")
                .with_custom_party("acme")
                .with_product("CARD")
                .with_description("Card limit - follow up")
                .with_action("DECISION")
                .with_urgency("URGENT");
            let parts = parse_subject(&build_subject(&draft)).unwrap();
            assert_eq!(parts.external_party.as_deref(), Some("CustomerACME"));
            assert_eq!(parts.product.as_deref(), Some("CARD"));
            assert_eq!(parts.description.as_deref(), Some("Card limit - follow up"));
            assert_eq!(parts.action.as_deref(), Some("DECISION"));
            assert_eq!(parts.urgency.as_deref(), Some("URGENT"));
        }
    }

    mod lenient_tests {
        use super::*;

        #[test]
        fn accepts_bare_hyphens() {
            let parts = parse_subject_lenient("CTK-TECH-GWAY-Outage-ACTION").unwrap();
            assert_eq!(parts.direction, Some(Direction::Internal));
            assert_eq!(parts.department.as_deref(), Some("TECH"));
            assert_eq!(parts.product.as_deref(), Some("GWAY"));
            assert_eq!(parts.description.as_deref(), Some("Outage"));
            assert_eq!(parts.action.as_deref(), Some("ACTION"));
            assert_eq!(parts.urgency, None);
        }

        #[test]
        fn trims_and_accepts_canonical_form() {
            let parts =
                parse_subject_lenient("  CTK-CTK-TECH-GWAY - Server outage - ACTION - HIGH \n")
                    .unwrap();
            assert_eq!(parts.department.as_deref(), Some("CTK-TECH"));
            assert_eq!(parts.description.as_deref(), Some("Server outage"));
            assert_eq!(parts.urgency.as_deref(), Some("HIGH"));
        }

        #[test]
        fn keeps_hyphens_in_description() {
            let parts =
                parse_subject_lenient("CTK-EXT-BNR-ALL -Follow-up on returns-  INFO").unwrap();
            assert_eq!(parts.direction, Some(Direction::External));
            assert_eq!(parts.external_party.as_deref(), Some("BNR"));
            assert_eq!(parts.description.as_deref(), Some("Follow-up on returns"));
            assert_eq!(parts.action.as_deref(), Some("INFO"));
        }

        #[test]
        fn inbound_with_urgency() {
            let parts = parse_subject_lenient("CTK-IN-MTN-TECH-Link upgrade-MEETING-LOW").unwrap();
            assert_eq!(parts.direction, Some(Direction::Inbound));
            assert_eq!(parts.external_party.as_deref(), Some("MTN"));
            assert_eq!(parts.action.as_deref(), Some("MEETING"));
            assert_eq!(parts.urgency.as_deref(), Some("LOW"));
        }

        #[test]
        fn still_rejects_missing_segments() {
            assert_eq!(parse_subject_lenient("Server outage"), None);
            assert_eq!(parse_subject_lenient("CTK-TECH-GWAY-ACTION"), None);
            assert_eq!(parse_subject_lenient("CTK-TECH-GWAY- -ACTION"), None);
            assert_eq!(parse_subject_lenient("CTK-TECH-GWAY-Outage-action"), None);
            assert_eq!(parse_subject_lenient("CTK-EXT- -ALL-Outage-INFO"), None);
        }
    }
}
