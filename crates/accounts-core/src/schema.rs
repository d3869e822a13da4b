//! Declarative field rules for user records.
//!
//! The rule table is independent from the SQL schema: each operation picks
//! the subset of fields it receives and validates only those.
//!
//! ```
//! use accounts_core::schema::{validate_fields, UserCandidate, UserField};
//!
//! let candidate = UserCandidate { email: Some("a@b.com"), ..UserCandidate::default() };
//! assert!(validate_fields(&candidate, &[UserField::Email]).is_ok());
//! assert!(validate_fields(&candidate, &[UserField::Id]).is_err());
//! ```

use crate::validation::{rules, validation_errors_to_accounts_error};
use crate::{AccountsResult, UserRole, USER_ID_MAX_LEN};
use std::borrow::Cow;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

/// Exact length of a stored password hash.
pub const PASSWORD_HASH_LEN: usize = 118;

/// Fields of the user record that accept caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Id,
    Role,
    Name,
    Email,
    Password,
    Image,
    ActivationId,
    ResetPasswordId,
}

impl UserField {
    /// Name used in validation messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Role => "role",
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::Image => "image",
            Self::ActivationId => "activationId",
            Self::ResetPasswordId => "resetPasswordId",
        }
    }
}

/// Length bound, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Between { min: usize, max: usize },
    Exact(usize),
}

/// Content constraint applied after the length check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Any,
    NotBlank,
    Email,
    OneOf(&'static [&'static str]),
}

/// Rule for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: UserField,
    pub required: bool,
    pub length: Length,
    pub format: Format,
}

/// Rule table for every user field.
pub const USER_SCHEMA: &[FieldRule] = &[
    FieldRule {
        field: UserField::Id,
        required: true,
        length: Length::Between { min: 1, max: USER_ID_MAX_LEN },
        format: Format::NotBlank,
    },
    FieldRule {
        field: UserField::Role,
        required: true,
        length: Length::Between { min: 1, max: 16 },
        format: Format::OneOf(&UserRole::NAMES),
    },
    FieldRule {
        field: UserField::Name,
        required: true,
        length: Length::Between { min: 1, max: 100 },
        format: Format::NotBlank,
    },
    FieldRule {
        field: UserField::Email,
        required: true,
        length: Length::Between { min: 3, max: 255 },
        format: Format::Email,
    },
    FieldRule {
        field: UserField::Password,
        required: true,
        length: Length::Exact(PASSWORD_HASH_LEN),
        format: Format::Any,
    },
    FieldRule {
        field: UserField::Image,
        required: false,
        length: Length::Between { min: 0, max: 255 },
        format: Format::Any,
    },
    FieldRule {
        field: UserField::ActivationId,
        required: false,
        length: Length::Between { min: 1, max: 36 },
        format: Format::Any,
    },
    FieldRule {
        field: UserField::ResetPasswordId,
        required: false,
        length: Length::Between { min: 1, max: 36 },
        format: Format::Any,
    },
];

impl FieldRule {
    /// Checks a single (possibly absent) value against this rule.
    pub fn check(&self, value: Option<&str>) -> Result<(), ValidationError> {
        let name = self.field.name();
        let Some(value) = value else {
            if self.required {
                return Err(field_error("required", format!("{name} is required")));
            }
            return Ok(());
        };

        let len = value.chars().count();
        match self.length {
            Length::Between { min, max } if len < min || len > max => {
                let mut err = field_error("length", format!("{name} must be {min}-{max} characters"));
                err.add_param(Cow::from("min"), &min);
                err.add_param(Cow::from("max"), &max);
                return Err(err);
            }
            Length::Exact(expected) if len != expected => {
                let mut err = field_error("length", format!("{name} must be exactly {expected} characters"));
                err.add_param(Cow::from("equal"), &expected);
                return Err(err);
            }
            _ => {}
        }

        match self.format {
            Format::NotBlank => rules::not_blank(value)
                .map_err(|_| field_error("not_blank", format!("{name} must not be blank"))),
            Format::Email if !value.validate_email() => {
                Err(field_error("email", "Invalid email address".to_string()))
            }
            Format::OneOf(allowed) if !allowed.contains(&value) => Err(field_error(
                "one_of",
                format!("{name} must be one of: {}", allowed.join(", ")),
            )),
            _ => Ok(()),
        }
    }
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

/// Returns the rule for a field.
///
/// `USER_SCHEMA` lists one rule per field in declaration order.
#[must_use]
pub const fn rule_for(field: UserField) -> &'static FieldRule {
    &USER_SCHEMA[field as usize]
}

/// A partial user record as received from a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserCandidate<'a> {
    pub id: Option<&'a str>,
    pub role: Option<&'a str>,
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
    pub image: Option<&'a str>,
    pub activation_id: Option<&'a str>,
    pub reset_password_id: Option<&'a str>,
}

impl<'a> UserCandidate<'a> {
    /// Returns the candidate's value for a field.
    #[must_use]
    pub const fn value(&self, field: UserField) -> Option<&'a str> {
        match field {
            UserField::Id => self.id,
            UserField::Role => self.role,
            UserField::Name => self.name,
            UserField::Email => self.email,
            UserField::Password => self.password,
            UserField::Image => self.image,
            UserField::ActivationId => self.activation_id,
            UserField::ResetPasswordId => self.reset_password_id,
        }
    }
}

/// Validates the listed subset of fields of a candidate record.
///
/// Fields not listed are ignored, whatever their value.
pub fn validate_fields(candidate: &UserCandidate<'_>, fields: &[UserField]) -> AccountsResult<()> {
    let mut errors = ValidationErrors::new();
    for &field in fields {
        if let Err(err) = rule_for(field).check(candidate.value(field)) {
            errors.add(field.name(), err);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(validation_errors_to_accounts_error(errors))
    }
}
