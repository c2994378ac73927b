//! # ctk-mail-core
//!
//! Subject-line builder and format validation for Centrika email.
//!
//! This crate provides:
//! - The code taxonomy (departments, products, actions, urgencies, external parties)
//! - Drafts and the canonical subject line built from them
//! - Subject-line parsing
//! - Rule-based validation of drafts, single fields and free-form subjects
//! - Plain-text message body templates
//! - A verified send gate over pluggable code and mail services

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod address;
pub mod draft;
mod error;
pub mod send;
pub mod subject;
pub mod taxonomy;
pub mod template;
pub mod validation;

pub use address::{Address, is_valid_address};
pub use draft::{Counterparty, Direction, Draft, Route};
pub use error::{Error, Result};
pub use send::{
    DispatchError, DispatchReceipt, MailDispatcher, OtpError, OtpService, OutgoingEmail,
    PendingSend, SendError, SendGate,
};
pub use subject::{
    MAX_SUBJECT_LENGTH, SUBJECT_FORMAT_HINT, SUBJECT_PREFIX, SubjectParts, build_subject,
    parse_subject, parse_subject_lenient, subject_length,
};
pub use taxonomy::{PartyCategory, PartyGroup, Taxonomy, TaxonomyEntry};
pub use template::{ContentTemplate, TemplateData, TemplateError};
pub use validation::{
    Field, ValidationError, ValidationResult, Validator, Warning, validate_draft,
};
