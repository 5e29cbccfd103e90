//! Form validation for reminder edits and account flows.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use thiserror::Error;

use crate::models::{Locale, ReminderPatch};
use crate::util::normalize_text_option;

pub const PASSWORD_MIN_CHARS: usize = 8;
pub const USERNAME_MIN_CHARS: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));
static UPPERCASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]").expect("Invalid regex"));
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").expect("Invalid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Email,
    Password,
    ConfirmPassword,
    Username,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    InvalidEmail,
    TooShort(usize),
    MissingUppercase,
    MissingDigit,
    Mismatch,
}

/// First failed rule of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field}: {rule}")]
pub struct ValidationError {
    pub field: Field,
    pub rule: Rule,
}

impl ValidationError {
    const fn new(field: Field, rule: Rule) -> Self {
        Self { field, rule }
    }

    /// User-facing message for this failure
    #[must_use]
    pub fn message(&self, locale: Locale) -> String {
        match (locale, self.field, self.rule) {
            (Locale::En, Field::Title, Rule::Required) => "Please enter a title".to_string(),
            (Locale::Th, Field::Title, Rule::Required) => "กรุณากรอกชื่อเรื่อง".to_string(),
            (Locale::En, _, Rule::Required) => "This field is required".to_string(),
            (Locale::Th, _, Rule::Required) => "กรุณากรอกข้อมูล".to_string(),
            (Locale::En, _, Rule::InvalidEmail) => "Invalid email address".to_string(),
            (Locale::Th, _, Rule::InvalidEmail) => "อีเมลไม่ถูกต้อง".to_string(),
            (Locale::En, Field::Username, Rule::TooShort(min)) => {
                format!("Username must be at least {min} characters")
            }
            (Locale::Th, Field::Username, Rule::TooShort(min)) => {
                format!("ชื่อผู้ใช้ต้องมีอย่างน้อย {min} ตัวอักษร")
            }
            (Locale::En, _, Rule::TooShort(min)) => {
                format!("Password must be at least {min} characters")
            }
            (Locale::Th, _, Rule::TooShort(min)) => {
                format!("รหัสผ่านต้องมีอย่างน้อย {min} ตัวอักษร")
            }
            (Locale::En, _, Rule::MissingUppercase) => {
                "Must contain at least one uppercase letter".to_string()
            }
            (Locale::Th, _, Rule::MissingUppercase) => "ต้องมีตัวพิมพ์ใหญ่อย่างน้อย 1 ตัว".to_string(),
            (Locale::En, _, Rule::MissingDigit) => "Must contain at least one digit".to_string(),
            (Locale::Th, _, Rule::MissingDigit) => "ต้องมีตัวเลขอย่างน้อย 1 ตัว".to_string(),
            (Locale::En, _, Rule::Mismatch) => "Passwords do not match".to_string(),
            (Locale::Th, _, Rule::Mismatch) => "รหัสผ่านไม่ตรงกัน".to_string(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm_password",
            Self::Username => "username",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("is required"),
            Self::InvalidEmail => f.write_str("is not a valid email address"),
            Self::TooShort(min) => write!(f, "must be at least {min} characters"),
            Self::MissingUppercase => f.write_str("must contain an uppercase letter"),
            Self::MissingDigit => f.write_str("must contain a digit"),
            Self::Mismatch => f.write_str("does not match"),
        }
    }
}

type ValidationResult<T> = Result<T, ValidationError>;

/// Edit form for a single reminder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderForm {
    pub title: String,
    pub description: Option<String>,
    pub due_date_time: Option<DateTime<Utc>>,
}

impl ReminderForm {
    /// Validate and convert into the patch sent to the store
    pub fn validate(&self) -> ValidationResult<ReminderPatch> {
        let title = normalize_text_option(Some(self.title.clone()))
            .ok_or(ValidationError::new(Field::Title, Rule::Required))?;

        Ok(ReminderPatch {
            title: Some(Some(title)),
            description: Some(normalize_text_option(self.description.clone())),
            due_date_time: Some(self.due_date_time),
            ..ReminderPatch::default()
        })
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_email(&self.email)?;
        if self.password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(ValidationError::new(
                Field::Password,
                Rule::TooShort(PASSWORD_MIN_CHARS),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        validate_new_password(&self.password)?;
        if self.password != self.confirm_password {
            return Err(ValidationError::new(Field::ConfirmPassword, Rule::Mismatch));
        }
        Ok(())
    }
}

/// Account edit form; blank fields are left unchanged
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccountUpdateForm {
    pub username: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl AccountUpdateForm {
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(username) = self.username() {
            validate_username(&username)?;
        }
        if let Some(password) = self.password() {
            validate_new_password(&password)?;
            if Some(password) != self.confirm_password.clone().filter(|value| !value.is_empty()) {
                return Err(ValidationError::new(Field::ConfirmPassword, Rule::Mismatch));
            }
        }
        Ok(())
    }

    /// Trimmed username, `None` when blank
    #[must_use]
    pub fn username(&self) -> Option<String> {
        normalize_text_option(self.username.clone())
    }

    /// Password as typed, `None` when empty
    #[must_use]
    pub fn password(&self) -> Option<String> {
        self.password.clone().filter(|value| !value.is_empty())
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegisterForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for AccountUpdateForm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AccountUpdateForm")
            .field("username", &self.username)
            .field("password_changed", &self.password.is_some())
            .finish()
    }
}

fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::new(Field::Email, Rule::Required));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::new(Field::Email, Rule::InvalidEmail));
    }
    Ok(())
}

fn validate_username(username: &str) -> ValidationResult<()> {
    if username.trim().chars().count() < USERNAME_MIN_CHARS {
        return Err(ValidationError::new(
            Field::Username,
            Rule::TooShort(USERNAME_MIN_CHARS),
        ));
    }
    Ok(())
}

fn validate_new_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationError::new(
            Field::Password,
            Rule::TooShort(PASSWORD_MIN_CHARS),
        ));
    }
    if !UPPERCASE_RE.is_match(password) {
        return Err(ValidationError::new(Field::Password, Rule::MissingUppercase));
    }
    if !DIGIT_RE.is_match(password) {
        return Err(ValidationError::new(Field::Password, Rule::MissingDigit));
    }
    Ok(())
}
