//! Property tests for subject building and validation.

use ctk_mail_core::{
    Counterparty, Draft, Field, MAX_SUBJECT_LENGTH, Route, ValidationError, Validator,
    build_subject, subject_length, validate_draft,
};
use proptest::prelude::*;
use proptest::sample::select;
use proptest::test_runner::Config;

const DEPARTMENTS: &[&str] = &["CTK-TECH", "CTK-COMP", "CTK-FIN", "TECH", "CTK-XYZ", ""];
const PRODUCTS: &[&str] = &["GWAY", "ALL", "CORE", "BOGUS", ""];
const ACTIONS: &[&str] = &["ACTION", "INFO", "MEETING", "APPROVAL", "LATER", ""];
const URGENCIES: &[&str] = &["HIGH", "MEDIUM", "LOW", "URGENT", "NOW", ""];
const PARTIES: &[&str] = &["BNR", "MTN", "RRA", "ACME", ""];
const ADDRESSES: &[&str] = &[
    "ops@centrika.rw",
    "returns@bnr.rw",
    "bad",
    "x@y",
    "a@b.co",
    "a,b@c.com",
];

fn route() -> impl Strategy<Value = Route> {
    let party = (select(PARTIES), prop::option::of("[A-Za-z ]{0,60}")).prop_map(|(code, name)| {
        Counterparty {
            code: code.to_string(),
            custom_name: name,
        }
    });
    prop_oneof![
        Just(Route::Internal),
        party.clone().prop_map(Route::External),
        party.prop_map(Route::Inbound),
    ]
}

fn draft() -> impl Strategy<Value = Draft> {
    (
        route(),
        select(DEPARTMENTS),
        select(PRODUCTS),
        select(ACTIONS),
        prop::option::of(select(URGENCIES)),
        "[A-Za-z!?' ]{0,90}",
        "[A-Za-z.,! ]{0,200}",
        prop::collection::vec(select(ADDRESSES), 0..4),
    )
        .prop_map(
            |(route, department, product, action, urgency, description, message, recipients)| {
                Draft {
                    route,
                    department: department.to_string(),
                    product: product.to_string(),
                    action_type: action.to_string(),
                    urgency: urgency.map(str::to_string),
                    description,
                    message,
                    recipients: recipients.into_iter().map(str::to_string).collect(),
                    sender: "alice@centrika.rw".to_string(),
                }
            },
        )
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn subject_is_deterministic(d in draft()) {
        let subject = build_subject(&d);
        prop_assert!(subject.starts_with("CTK-"));
        prop_assert_eq!(build_subject(&d.clone()), subject);
    }

    #[test]
    fn validation_is_idempotent(d in draft()) {
        prop_assert_eq!(validate_draft(&d), validate_draft(&d));
    }

    #[test]
    fn valid_means_no_errors(d in draft()) {
        let result = validate_draft(&d);
        prop_assert_eq!(result.is_valid, result.errors.is_empty());
    }

    #[test]
    fn empty_message_always_blocks(d in draft()) {
        let result = validate_draft(&d.with_message(""));
        prop_assert!(!result.is_valid);
        prop_assert!(result.errors.contains(&ValidationError::MessageRequired));
    }

    #[test]
    fn overlength_reports_exact_overage(description in "[a-z]{1,120}") {
        let d = Draft::internal("CTK-TECH")
            .with_product("GWAY")
            .with_action("ACTION")
            .with_urgency("HIGH")
            .with_description(description);
        let length = subject_length(&build_subject(&d));
        let too_long: Vec<_> = validate_draft(&d)
            .errors
            .into_iter()
            .filter(|e| matches!(e, ValidationError::SubjectTooLong { .. }))
            .collect();

        if length > MAX_SUBJECT_LENGTH {
            prop_assert_eq!(
                too_long,
                vec![ValidationError::SubjectTooLong {
                    over: length - MAX_SUBJECT_LENGTH,
                    max: MAX_SUBJECT_LENGTH,
                }]
            );
        } else {
            prop_assert!(too_long.is_empty());
        }
    }

    #[test]
    fn unknown_department_is_rejected(code in "[A-Z-]{0,12}") {
        let d = Draft::internal(code.clone());
        let rejected = validate_draft(&d)
            .errors
            .contains(&ValidationError::InvalidDepartment(code.clone()));
        let known = Validator::default().taxonomy().is_department(&code);
        prop_assert_eq!(rejected, !known);
    }

    #[test]
    fn field_errors_match_full_validation(d in draft()) {
        let validator = Validator::default();
        let full = validator.validate(&d);

        let mut fields = vec![
            (Field::Description, d.description.clone()),
            (Field::Department, d.department.clone()),
            (Field::Product, d.product.clone()),
            (Field::ActionType, d.action_type.clone()),
            (Field::Message, d.message.clone()),
            (Field::Recipients, d.recipients.join(",")),
        ];
        if let Some(urgency) = &d.urgency {
            fields.push((Field::Urgency, urgency.clone()));
        }
        if let Some(party) = d.counterparty() {
            fields.push((Field::ExternalParty, party.code.clone()));
            fields.push((
                Field::CustomExternalPartyName,
                party.custom_name.clone().unwrap_or_default(),
            ));
        }

        for (field, value) in fields {
            let single = validator.validate_field(field, &value, Some(&d));
            let expected: Vec<_> = full.errors_for(field).cloned().collect();
            for error in &single.errors {
                prop_assert!(
                    expected.contains(error),
                    "{field}: {error} missing from full validation"
                );
            }
        }
    }
}

#[test]
fn documented_subjects() {
    let internal = Draft::internal("CTK-TECH")
        .with_product("GWAY")
        .with_action("ACTION")
        .with_urgency("HIGH")
        .with_description("Server outage");
    assert_eq!(
        build_subject(&internal),
        "CTK-CTK-TECH-GWAY - Server outage - ACTION - HIGH"
    );

    let external = Draft::external("BNR")
        .with_department("CTK-COMP")
        .with_product("ALL")
        .with_action("INFO")
        .with_description("Monthly Statistical Return Submission");
    assert_eq!(
        build_subject(&external),
        "CTK-EXT-BNR-ALL - Monthly Statistical Return Submission - INFO"
    );
}
