//! Declarative field constraints.
//!
//! A single table drives both create (every required field checked) and
//! update (only supplied fields checked), so the two paths cannot drift.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    EMAIL_PATTERN, MAX_AGE, MIN_ADDRESS_LENGTH, MIN_AGE, MIN_NAME_LENGTH, PHONE_PATTERN,
    REFERRAL_CODE_LENGTH, VALID_ROLES,
};
use crate::error::{DomainError, DomainResult, ErrorCode, ValidationError};
use crate::user::{NewUser, UserPatch};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern"));

/// Validated user fields, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Age,
    PhoneNumber,
    Address,
    Role,
    ReferralCode,
}

impl Field {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Age => "age",
            Field::PhoneNumber => "phoneNumber",
            Field::Address => "address",
            Field::Role => "role",
            Field::ReferralCode => "referralCode",
        }
    }
}

/// Candidate value for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
}

/// A constraint a single value must satisfy.
#[derive(Debug)]
pub enum Constraint {
    MinLength(usize),
    ExactLength(usize),
    Range { min: i64, max: i64 },
    Pattern(&'static Lazy<Regex>),
    OneOf(&'static [&'static str]),
}

impl Constraint {
    /// Lengths count Unicode scalar values. A value of the wrong kind never
    /// satisfies a constraint.
    pub fn accepts(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (Constraint::MinLength(min), FieldValue::Text(s)) => s.chars().count() >= *min,
            (Constraint::ExactLength(len), FieldValue::Text(s)) => s.chars().count() == *len,
            (Constraint::Range { min, max }, FieldValue::Integer(n)) => (*min..=*max).contains(n),
            (Constraint::Pattern(re), FieldValue::Text(s)) => re.is_match(s),
            (Constraint::OneOf(allowed), FieldValue::Text(s)) => allowed.contains(s),
            _ => false,
        }
    }
}

/// One row of the constraint table.
#[derive(Debug)]
pub struct FieldRule {
    pub field: Field,
    pub required_on_create: bool,
    pub constraint: Constraint,
    pub code: ErrorCode,
    pub message: &'static str,
}

impl FieldRule {
    fn check(&self, value: &FieldValue<'_>) -> Result<(), ValidationError> {
        if self.constraint.accepts(value) {
            Ok(())
        } else {
            Err(ValidationError::new(self.field.as_str(), self.code, self.message))
        }
    }

    fn missing(&self) -> ValidationError {
        ValidationError::new(
            self.field.as_str(),
            self.code,
            format!("{} is required", self.field.as_str()),
        )
    }
}

pub static RULES: [FieldRule; 7] = [
    FieldRule {
        field: Field::Name,
        required_on_create: true,
        constraint: Constraint::MinLength(MIN_NAME_LENGTH),
        code: ErrorCode::InvalidName,
        message: "Invalid name: it must be at least 3 characters long",
    },
    FieldRule {
        field: Field::Email,
        required_on_create: true,
        constraint: Constraint::Pattern(&EMAIL_RE),
        code: ErrorCode::InvalidEmail,
        message: "Invalid email address",
    },
    FieldRule {
        field: Field::Age,
        required_on_create: true,
        constraint: Constraint::Range {
            min: MIN_AGE,
            max: MAX_AGE,
        },
        code: ErrorCode::InvalidAge,
        message: "Invalid age: it must be between 18 and 150",
    },
    FieldRule {
        field: Field::PhoneNumber,
        required_on_create: true,
        constraint: Constraint::Pattern(&PHONE_RE),
        code: ErrorCode::InvalidPhone,
        message: "Invalid phone number",
    },
    FieldRule {
        field: Field::Address,
        required_on_create: true,
        constraint: Constraint::MinLength(MIN_ADDRESS_LENGTH),
        code: ErrorCode::InvalidAddress,
        message: "Invalid address: it must be at least 10 characters long",
    },
    FieldRule {
        field: Field::Role,
        required_on_create: false,
        constraint: Constraint::OneOf(VALID_ROLES),
        code: ErrorCode::InvalidRole,
        message: "Invalid role: it must be one of user, moderator",
    },
    FieldRule {
        field: Field::ReferralCode,
        required_on_create: false,
        constraint: Constraint::ExactLength(REFERRAL_CODE_LENGTH),
        code: ErrorCode::InvalidReferralCode,
        message: "Invalid referral code: it must be exactly 8 characters long",
    },
];

/// Look up the rule for a field.
pub fn rule_for(field: Field) -> &'static FieldRule {
    RULES
        .iter()
        .find(|rule| rule.field == field)
        .unwrap_or_else(|| unreachable!("every field has a rule"))
}

/// Check one value against its field's declared constraint.
pub fn validate_field(field: Field, value: &FieldValue<'_>) -> Result<(), ValidationError> {
    rule_for(field).check(value)
}

/// Which fields a validation pass requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Required fields must be present
    Create,
    /// Absent fields are skipped
    Update,
}

/// Anything that can hand out candidate values by field.
pub trait FieldSource {
    fn field_value(&self, field: Field) -> Option<FieldValue<'_>>;
}

/// Run every rule against `source`, collecting all failures in table order.
pub fn validate_fields<S: FieldSource + ?Sized>(source: &S, mode: Mode) -> DomainResult<()> {
    let errors: Vec<ValidationError> = RULES
        .iter()
        .filter_map(|rule| match source.field_value(rule.field) {
            Some(value) => rule.check(&value).err(),
            None if mode == Mode::Create && rule.required_on_create => Some(rule.missing()),
            None => None,
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}

impl FieldSource for NewUser {
    fn field_value(&self, field: Field) -> Option<FieldValue<'_>> {
        match field {
            Field::Name => Some(FieldValue::Text(&self.name)),
            Field::Email => Some(FieldValue::Text(&self.email)),
            Field::Age => Some(FieldValue::Integer(i64::from(self.age))),
            Field::PhoneNumber => Some(FieldValue::Text(&self.phone_number)),
            Field::Address => Some(FieldValue::Text(&self.address)),
            Field::Role => self.role.as_deref().map(FieldValue::Text),
            Field::ReferralCode => self.referral_code.as_deref().map(FieldValue::Text),
        }
    }
}

impl FieldSource for UserPatch {
    fn field_value(&self, field: Field) -> Option<FieldValue<'_>> {
        match field {
            Field::Name => self.name.as_deref().map(FieldValue::Text),
            Field::Email => self.email.as_deref().map(FieldValue::Text),
            Field::Age => self.age.map(|age| FieldValue::Integer(i64::from(age))),
            Field::PhoneNumber => self.phone_number.as_deref().map(FieldValue::Text),
            Field::Address => self.address.as_deref().map(FieldValue::Text),
            Field::Role => self.role.as_deref().map(FieldValue::Text),
            Field::ReferralCode => self.referral_code.as_deref().map(FieldValue::Text),
        }
    }
}

impl NewUser {
    /// Validate every required field, plus optional ones when supplied.
    pub fn validate(&self) -> DomainResult<()> {
        validate_fields(self, Mode::Create)
    }
}

impl UserPatch {
    /// Validate only the supplied fields. An empty patch is rejected.
    pub fn validate(&self) -> DomainResult<()> {
        if self.is_empty() {
            return Err(DomainError::NoFieldsProvided);
        }
        validate_fields(self, Mode::Update)
    }
}
