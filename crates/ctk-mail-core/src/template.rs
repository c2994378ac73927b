//! Plain-text message body templates.
//!
//! Each action type has a body template with its own typed fields, plus
//! three letter templates for customers, partners and regulators. Templates
//! render the message body only; subject lines come from
//! [`build_subject`](crate::build_subject).

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SIGN_OFF: &str = "Best regards,\nCentrika Team";
const LETTER_SIGN_OFF: &str = "Best regards,\nCentrika Team\nCentrika Ltd.";

/// Which body template to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentTemplate {
    /// Meeting request.
    Meeting,
    /// Action request.
    Action,
    /// Information sharing.
    Info,
    /// Approval request.
    Approval,
    /// Decision request.
    Decision,
    /// Review request.
    Review,
    /// Letter to an external customer.
    ExternalCustomer,
    /// Letter to an external partner.
    ExternalPartner,
    /// Submission to a regulator.
    Regulatory,
}

impl ContentTemplate {
    /// Picks the template for an action code. Unknown codes fall back to
    /// [`ContentTemplate::Info`].
    #[must_use]
    pub fn for_action(code: &str) -> Self {
        match code {
            "MEETING" => Self::Meeting,
            "ACTION" => Self::Action,
            "APPROVAL" => Self::Approval,
            "DECISION" => Self::Decision,
            "REVIEW" => Self::Review,
            _ => Self::Info,
        }
    }

    /// Get display name for the template.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Meeting => "Meeting Request",
            Self::Action => "Action Request",
            Self::Info => "Information Sharing",
            Self::Approval => "Approval Request",
            Self::Decision => "Decision Request",
            Self::Review => "Review Request",
            Self::ExternalCustomer => "External Customer Communication",
            Self::ExternalPartner => "External Partner Communication",
            Self::Regulatory => "Regulatory Communication",
        }
    }
}

/// A required template field is missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A text field is empty.
    #[error("{0} is required")]
    Missing(&'static str),
    /// A list field has no entries.
    #[error("At least one {0} is required")]
    EmptyList(&'static str),
    /// An action request lists no actions.
    #[error("At least one required action is needed")]
    NoRequiredActions,
}

/// Fields of a meeting request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeetingRequest {
    /// What the meeting is about.
    pub purpose: String,
    /// Proposed date.
    pub proposed_date: String,
    /// Expected duration.
    pub duration: String,
    /// Room or call link.
    pub location: String,
    /// Invitees.
    pub attendees: Vec<String>,
    /// Agenda items.
    pub agenda: Vec<String>,
    /// Confirm-by date.
    pub deadline: String,
}

/// Fields of an action request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionRequest {
    /// What is being asked for.
    pub request: String,
    /// Individual actions.
    pub required_actions: Vec<String>,
    /// Completion deadline.
    pub deadline: String,
    /// How often updates are expected.
    pub updates_required: String,
    /// Confirm-receipt date.
    pub confirmation_deadline: String,
}

/// Fields of an information notice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InfoNotice {
    /// Points to share.
    pub key_points: Vec<String>,
    /// Impact on the recipients' work.
    pub impact: String,
    /// Changes recipients need to make, if any.
    pub changes_needed: String,
}

/// Fields of an approval request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApprovalRequest {
    /// Item requiring approval.
    pub item: String,
    /// What is being approved.
    pub what: String,
    /// Why it is needed.
    pub why: String,
    /// When it happens.
    pub when: String,
    /// Cost, if any.
    pub cost: String,
    /// Risk assessment.
    pub risk: String,
    /// Attached documents.
    pub supporting_documents: Vec<String>,
    /// Approve-by date.
    pub deadline: String,
}

/// Fields of a decision request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecisionRequest {
    /// Decision needed.
    pub decision: String,
    /// Background.
    pub context: String,
    /// Options to choose from.
    pub options: Vec<String>,
    /// Decide-by date.
    pub deadline: String,
}

/// Fields of a review request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewRequest {
    /// Item to review.
    pub item: String,
    /// Review scope.
    pub scope: String,
    /// Areas where feedback is wanted.
    pub feedback_areas: Vec<String>,
    /// Feedback-by date.
    pub deadline: String,
}

/// Fields of a letter to a customer or partner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExternalLetter {
    /// Addressee name.
    pub recipient_name: String,
    /// Opening paragraph.
    pub purpose: String,
    /// What the recipient must do (customer letters).
    pub action_required: String,
    /// Next steps (partner letters).
    pub next_steps: Vec<String>,
    /// Timeline paragraph.
    pub timeline: String,
    /// Sender contact block.
    pub contact_info: String,
}

/// Fields of a regulatory submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegulatorySubmission {
    /// Regulator name, e.g. `BNR`.
    pub regulatory_body: String,
    /// Kind of submission.
    pub submission_type: String,
    /// Submission text.
    pub content: String,
    /// Submission deadline.
    pub deadline: String,
    /// Sender contact block.
    pub contact_info: String,
}

/// Template choice together with its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum TemplateData {
    /// Meeting request.
    Meeting(MeetingRequest),
    /// Action request.
    Action(ActionRequest),
    /// Information sharing.
    Info(InfoNotice),
    /// Approval request.
    Approval(ApprovalRequest),
    /// Decision request.
    Decision(DecisionRequest),
    /// Review request.
    Review(ReviewRequest),
    /// Letter to an external customer.
    ExternalCustomer(ExternalLetter),
    /// Letter to an external partner.
    ExternalPartner(ExternalLetter),
    /// Submission to a regulator.
    Regulatory(RegulatorySubmission),
}

impl TemplateData {
    /// The template these fields belong to.
    #[must_use]
    pub const fn template(&self) -> ContentTemplate {
        match self {
            Self::Meeting(_) => ContentTemplate::Meeting,
            Self::Action(_) => ContentTemplate::Action,
            Self::Info(_) => ContentTemplate::Info,
            Self::Approval(_) => ContentTemplate::Approval,
            Self::Decision(_) => ContentTemplate::Decision,
            Self::Review(_) => ContentTemplate::Review,
            Self::ExternalCustomer(_) => ContentTemplate::ExternalCustomer,
            Self::ExternalPartner(_) => ContentTemplate::ExternalPartner,
            Self::Regulatory(_) => ContentTemplate::Regulatory,
        }
    }

    /// Checks that required fields are filled in.
    ///
    /// # Errors
    ///
    /// Returns every missing field.
    pub fn validate(&self) -> Result<(), Vec<TemplateError>> {
        let mut errors = Vec::new();
        let mut text = |value: &str, name: &'static str| {
            if value.trim().is_empty() {
                errors.push(TemplateError::Missing(name));
            }
        };

        match self {
            Self::Meeting(m) => {
                text(&m.purpose, "Meeting purpose");
                text(&m.proposed_date, "Proposed date");
                if m.attendees.is_empty() {
                    errors.push(TemplateError::EmptyList("attendee"));
                }
            }
            Self::Action(a) => {
                text(&a.request, "Specific request");
                text(&a.deadline, "Deadline");
                if a.required_actions.is_empty() {
                    errors.push(TemplateError::NoRequiredActions);
                }
            }
            Self::Approval(a) => {
                text(&a.item, "Item requiring approval");
                text(&a.what, "What field");
                text(&a.why, "Why field");
                text(&a.deadline, "Deadline");
            }
            Self::Decision(d) => {
                text(&d.decision, "Decision needed");
                text(&d.deadline, "Deadline");
                if d.options.is_empty() {
                    errors.push(TemplateError::EmptyList("option"));
                }
            }
            Self::Review(r) => {
                text(&r.item, "Item to review");
                text(&r.deadline, "Deadline");
                if r.feedback_areas.is_empty() {
                    errors.push(TemplateError::EmptyList("feedback area"));
                }
            }
            Self::Info(_)
            | Self::ExternalCustomer(_)
            | Self::ExternalPartner(_)
            | Self::Regulatory(_) => {}
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Renders the message body.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Meeting(m) => format!(
                "Dear Team,\n\n\
                 I would like to schedule a meeting to discuss {}.\n\n\
                 Meeting Details:\n\
                 • Date: {}\n\
                 • Duration: {}\n\
                 • Location: {}\n\
                 • Attendees: {}\n\n\
                 Agenda:\n{}\n\n\
                 Please confirm your availability by {}.\n\n{SIGN_OFF}",
                m.purpose,
                m.proposed_date,
                m.duration,
                m.location,
                m.attendees.join(", "),
                bullets(&m.agenda),
                m.deadline,
            ),
            Self::Action(a) => format!(
                "Dear Team,\n\n\
                 I need your assistance with {}.\n\n\
                 Required Actions:\n{}\n\n\
                 Timeline:\n\
                 • Deadline: {}\n\
                 • Updates required: {}\n\n\
                 Please confirm receipt and expected completion by {}.\n\n{SIGN_OFF}",
                a.request,
                bullets(&a.required_actions),
                a.deadline,
                a.updates_required,
                a.confirmation_deadline,
            ),
            Self::Info(i) => {
                let mut impact = format!("• {}", i.impact);
                if !i.changes_needed.is_empty() {
                    impact.push_str("\n• ");
                    impact.push_str(&i.changes_needed);
                }
                format!(
                    "Dear Team,\n\n\
                     I'm sharing the following information for your awareness.\n\n\
                     Key Information:\n{}\n\n\
                     Impact on your work:\n{impact}\n\n\
                     No action required unless you have questions.\n\n{SIGN_OFF}",
                    bullets(&i.key_points),
                )
            }
            Self::Approval(a) => {
                let mut details = format!("• What: {}\n• Why: {}\n• When: {}", a.what, a.why, a.when);
                if !a.cost.is_empty() {
                    details.push_str("\n• Cost: ");
                    details.push_str(&a.cost);
                }
                details.push_str("\n• Risk: ");
                details.push_str(&a.risk);
                format!(
                    "Dear Team,\n\n\
                     I am requesting your approval for {}.\n\n\
                     Request Details:\n{details}\n\n\
                     Supporting Documents:\n{}\n\n\
                     Please approve or provide feedback by {}.\n\n{SIGN_OFF}",
                    a.item,
                    bullets(&a.supporting_documents),
                    a.deadline,
                )
            }
            Self::Decision(d) => format!(
                "Dear Team,\n\n\
                 A decision is needed regarding {}.\n\n\
                 Context:\n{}\n\n\
                 Available Options:\n{}\n\n\
                 Please provide your decision by {}.\n\n{SIGN_OFF}",
                d.decision,
                d.context,
                bullets(&d.options),
                d.deadline,
            ),
            Self::Review(r) => format!(
                "Dear Team,\n\n\
                 I need your review and feedback on {}.\n\n\
                 Review Scope:\n{}\n\n\
                 Areas for Feedback:\n{}\n\n\
                 Please provide your feedback by {}.\n\n{SIGN_OFF}",
                r.item,
                r.scope,
                bullets(&r.feedback_areas),
                r.deadline,
            ),
            Self::ExternalCustomer(l) => format!(
                "Dear {},\n\n{}\n\n\
                 Action Required:\n{}\n\n\
                 Timeline:\n{}\n\n\
                 If you need any clarification or have questions, please don't hesitate to contact me directly.\n\n\
                 {LETTER_SIGN_OFF}\n{}",
                l.recipient_name, l.purpose, l.action_required, l.timeline, l.contact_info,
            ),
            Self::ExternalPartner(l) => format!(
                "Dear {},\n\n{}\n\n\
                 Next Steps:\n{}\n\n\
                 Timeline:\n{}\n\n\
                 We look forward to our continued partnership.\n\n\
                 {LETTER_SIGN_OFF}\n{}",
                l.recipient_name,
                l.purpose,
                bullets(&l.next_steps),
                l.timeline,
                l.contact_info,
            ),
            Self::Regulatory(s) => format!(
                "Dear {} Team,\n\n\
                 Re: {}\n\n{}\n\n\
                 This submission is in compliance with all applicable regulations and requirements.\n\n\
                 Deadline: {}\n\n\
                 Please acknowledge receipt of this communication.\n\n\
                 Best regards,\nCentrika Compliance Team\nCentrika Ltd.\n{}",
                s.regulatory_body, s.submission_type, s.content, s.deadline, s.contact_info,
            ),
        }
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
