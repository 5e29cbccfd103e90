//! User-facing messages.
//!
//! Failures are logged where they happen and surfaced to the user as a
//! [`Notice`]. Notices never carry raw HTTP errors, only the API message
//! when the auth service returns one.

use std::fmt;

use crate::auth::AuthError;
use crate::error::Error;
use crate::models::Locale;
use crate::validation::ValidationError;

/// What the user was doing when a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Save,
    Delete,
    SignIn,
    SignUp,
    UpdateAccount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Home screen alert shown once per session
    NearDue { count: usize },
    LoadFailed,
    SaveFailed,
    DeleteFailed,
    Unexpected,
    InvalidCredentials,
    ProfileMissing,
    NotSignedIn,
    SignUpFailed(String),
    SignUpConfirmationSent,
    AccountUpdateFailed(String),
    AccountUpdated,
    Invalid(ValidationError),
}

impl Notice {
    /// Map a failed operation to the message shown to the user
    #[must_use]
    pub fn for_failure(operation: Operation, error: &Error) -> Self {
        match (operation, error) {
            (_, Error::Validation(error)) => Self::Invalid(*error),
            (_, Error::NotSignedIn) => Self::NotSignedIn,
            (_, Error::ProfileNotFound(_)) => Self::ProfileMissing,
            (Operation::SignIn, Error::Auth(AuthError::Api(_))) => Self::InvalidCredentials,
            (Operation::SignUp, Error::Auth(AuthError::Api(message))) => {
                Self::SignUpFailed(message.clone())
            }
            (Operation::UpdateAccount, Error::Auth(AuthError::Api(message))) => {
                Self::AccountUpdateFailed(message.clone())
            }
            (Operation::Load, Error::Store(_) | Error::NotFound(_)) => Self::LoadFailed,
            (Operation::Save, Error::Store(_)) => Self::SaveFailed,
            (Operation::Delete, Error::Store(_)) => Self::DeleteFailed,
            _ => Self::Unexpected,
        }
    }

    /// Short heading, for notices shown as an alert box
    #[must_use]
    pub const fn title(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::NearDue { .. }, Locale::En) => "Reminder",
            (Self::NearDue { .. }, Locale::Th) => "แจ้งเตือน",
            (Self::AccountUpdated | Self::SignUpConfirmationSent, Locale::En) => "Success",
            (Self::AccountUpdated | Self::SignUpConfirmationSent, Locale::Th) => "สำเร็จ",
            (_, Locale::En) => "Something went wrong",
            (_, Locale::Th) => "เกิดข้อผิดพลาด",
        }
    }

    #[must_use]
    pub fn text(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.text_en(),
            Locale::Th => self.text_th(),
        }
    }

    /// Whether the notice reports a failure
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(
            self,
            Self::NearDue { .. } | Self::AccountUpdated | Self::SignUpConfirmationSent
        )
    }

    fn text_en(&self) -> String {
        match self {
            Self::NearDue { count } => {
                format!("You have {count} reminder(s) due soon or overdue")
            }
            Self::LoadFailed => "Could not load reminders".to_string(),
            Self::SaveFailed => "Could not save changes".to_string(),
            Self::DeleteFailed => "Could not delete the selected items".to_string(),
            Self::Unexpected => "An unexpected error occurred, please try again".to_string(),
            Self::InvalidCredentials => "Incorrect email or password".to_string(),
            Self::ProfileMissing => "User profile not found".to_string(),
            Self::NotSignedIn => "Please sign in first".to_string(),
            Self::SignUpFailed(message) => format!("Could not sign up: {message}"),
            Self::SignUpConfirmationSent => {
                "Sign-up complete! Please confirm your email before signing in".to_string()
            }
            Self::AccountUpdateFailed(message) => format!("Account update failed: {message}"),
            Self::AccountUpdated => "Account updated".to_string(),
            Self::Invalid(error) => error.message(Locale::En),
        }
    }

    fn text_th(&self) -> String {
        match self {
            Self::NearDue { count } => format!("คุณมี {count} รายการที่ใกล้ถึงกำหนดหรือเลยกำหนดแล้ว"),
            Self::LoadFailed => "ไม่สามารถโหลดรายการได้".to_string(),
            Self::SaveFailed => "ไม่สามารถบันทึกการเปลี่ยนแปลงได้".to_string(),
            Self::DeleteFailed => "ไม่สามารถลบรายการที่เลือกได้".to_string(),
            Self::Unexpected => "เกิดข้อผิดพลาดที่ไม่คาดคิด โปรดลองใหม่อีกครั้ง".to_string(),
            Self::InvalidCredentials => "อีเมลหรือรหัสผ่านไม่ถูกต้อง".to_string(),
            Self::ProfileMissing => "ไม่พบข้อมูลผู้ใช้ในระบบ".to_string(),
            Self::NotSignedIn => "กรุณาเข้าสู่ระบบก่อน".to_string(),
            Self::SignUpFailed(message) => format!("ไม่สามารถสมัครสมาชิกได้: {message}"),
            Self::SignUpConfirmationSent => {
                "สมัครสมาชิกสำเร็จ! กรุณายืนยันอีเมลก่อนเข้าสู่ระบบ".to_string()
            }
            Self::AccountUpdateFailed(message) => format!("อัปเดตบัญชีไม่สำเร็จ: {message}"),
            Self::AccountUpdated => "อัปเดตข้อมูลสำเร็จ!".to_string(),
            Self::Invalid(error) => error.message(Locale::Th),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text_en())
    }
}
