// Field validation: an ordered rule list applied to one named input

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static LOGIN_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{8,15}$").expect("login id pattern"));
static PASSWORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.{10,17}$").expect("password pattern"));
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[가-힣a-zA-Z]{2,8}$").expect("name pattern"));
static PHONE_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[0-9]{10}$").expect("phone number pattern"));
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

/// A single rejected field. Always surfaces as `InvalidInput` (HTTP 400).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Canonical shapes a field can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    LoginId,
    Password,
    Name,
    PhoneNumber,
    Email,
}

impl Pattern {
    fn regex(self) -> &'static Regex {
        match self {
            Pattern::LoginId => &LOGIN_ID_PATTERN,
            Pattern::Password => &PASSWORD_PATTERN,
            Pattern::Name => &NAME_PATTERN,
            Pattern::PhoneNumber => &PHONE_NUMBER_PATTERN,
            Pattern::Email => &EMAIL_PATTERN,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Pattern::LoginId => "must be 8-15 letters or digits",
            Pattern::Password => "must be 10-17 characters",
            Pattern::Name => "must be 2-8 Korean or Latin letters",
            Pattern::PhoneNumber => "must be 11 digits starting with 0",
            Pattern::Email => "is not a valid email address",
        }
    }
}

/// One check in a field's chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Present,
    Length { min: usize, max: usize },
    Numeric,
    Matches(Pattern),
}

impl Rule {
    /// Returns true when `value` passes this rule.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Rule::Present => !value.is_empty(),
            Rule::Length { min, max } => {
                let len = value.chars().count();
                len >= min && len <= max
            }
            Rule::Numeric => !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()),
            Rule::Matches(pattern) => pattern.regex().is_match(value),
        }
    }

    fn message(self, field: &str) -> String {
        match self {
            Rule::Present => format!("{} is required", field),
            Rule::Length { min, max } if min == max => {
                format!("{} must be exactly {} characters", field, min)
            }
            Rule::Length { min, max } => {
                format!("{} must be between {} and {} characters", field, min, max)
            }
            Rule::Numeric => format!("{} must be a number", field),
            Rule::Matches(pattern) => format!("{} {}", field, pattern.describe()),
        }
    }
}

/// Chainable validator over one `(value, field name)` pair.
///
/// The first rule that rejects the value is recorded and every later rule is
/// skipped, so callers only ever see one error per field.
///
/// ```ignore
/// let login_id = Field::new("loginId", request.login_id.as_deref())
///     .required()
///     .login_id()
///     .finish()?;
/// ```
#[derive(Debug)]
pub struct Field<'a> {
    name: &'static str,
    value: Option<&'a str>,
    outcome: Result<(), ValidationError>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, value: Option<&'a str>) -> Self {
        Self {
            name,
            value,
            outcome: Ok(()),
        }
    }

    /// Applies `rule` unless an earlier rule already failed.
    pub fn check(mut self, rule: Rule) -> Self {
        if self.outcome.is_err() {
            return self;
        }
        let passes = match self.value {
            Some(value) => rule.accepts(value),
            None => false,
        };
        if !passes {
            let rule = if self.value.is_none() { Rule::Present } else { rule };
            self.outcome = Err(ValidationError {
                field: self.name,
                message: rule.message(self.name),
            });
        }
        self
    }

    pub fn required(self) -> Self {
        self.check(Rule::Present)
    }

    pub fn length(self, min: usize, max: usize) -> Self {
        self.check(Rule::Length { min, max })
    }

    pub fn numeric(self) -> Self {
        self.check(Rule::Numeric)
    }

    pub fn login_id(self) -> Self {
        self.check(Rule::Matches(Pattern::LoginId))
    }

    pub fn password(self) -> Self {
        self.check(Rule::Matches(Pattern::Password))
    }

    pub fn name(self) -> Self {
        self.check(Rule::Matches(Pattern::Name))
    }

    pub fn phone_number(self) -> Self {
        self.check(Rule::Matches(Pattern::PhoneNumber))
    }

    pub fn email(self) -> Self {
        self.check(Rule::Matches(Pattern::Email))
    }

    /// Ends the chain, yielding the validated value.
    pub fn finish(self) -> Result<&'a str, ValidationError> {
        self.outcome?;
        self.value.ok_or(ValidationError {
            field: self.name,
            message: Rule::Present.message(self.name),
        })
    }

    /// Ends the chain and parses the validated value as a row identifier.
    pub fn into_id(self) -> Result<i64, ValidationError> {
        let name = self.name;
        let value = self.numeric().finish()?;
        value.parse::<i64>().map_err(|_| ValidationError {
            field: name,
            message: format!("{} is out of range", name),
        })
    }
}

/// Standard chain for a row identifier: present, digits only, at most
/// `max_len` digits.
pub fn validate_id(
    name: &'static str,
    value: Option<&str>,
    max_len: usize,
) -> Result<i64, ValidationError> {
    Field::new(name, value)
        .required()
        .numeric()
        .length(1, max_len)
        .into_id()
}
