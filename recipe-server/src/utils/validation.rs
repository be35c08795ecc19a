//! Input validation helpers
//!
//! Centralized length limits and a field error collector. Handlers validate
//! a whole payload, then turn the collected messages into one 400 whose
//! `details` map each field to its messages.

use rust_decimal::Decimal;

use crate::utils::{AppError, ErrorCode};

// ── Limits ──────────────────────────────────────────────────────────

/// Recipe titles, tag and ingredient names, user names
pub const MAX_NAME_LEN: usize = 255;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 5;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Recipe links
pub const MAX_LINK_LEN: usize = 255;

/// Prices are DECIMAL(5, 2)
pub const MAX_PRICE_DIGITS: u32 = 5;
pub const PRICE_DECIMAL_PLACES: u32 = 2;

const REQUIRED: &str = "This field is required.";
const BLANK: &str = "This field may not be blank.";

// ── Collector ───────────────────────────────────────────────────────

/// Accumulates field-level validation messages
#[derive(Debug, Default)]
pub struct FieldErrors {
    code: Option<ErrorCode>,
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`
    pub fn push(&mut self, field: &str, msg: impl Into<String>) {
        self.errors.push((field.to_string(), msg.into()));
    }

    /// Record a message under a specific error code.
    /// The first specific code becomes the code of the final error.
    pub fn push_code(&mut self, field: &str, code: ErrorCode) {
        self.code.get_or_insert(code);
        self.push(field, code.message());
    }

    /// Non-blank and within `max_len` characters
    pub fn required_text(&mut self, value: &str, field: &str, max_len: usize) {
        if value.trim().is_empty() {
            self.push(field, BLANK);
        } else {
            self.max_len(value, field, max_len);
        }
    }

    /// Non-empty, whitespace kept as is (credentials)
    pub fn non_empty(&mut self, value: &str, field: &str) {
        if value.is_empty() {
            self.push(field, BLANK);
        }
    }

    /// Required field of any type; only presence is checked
    pub fn present<T: ?Sized>(&mut self, value: Option<&T>, field: &str) {
        if value.is_none() {
            self.push(field, REQUIRED);
        }
    }

    /// Required but possibly absent from the payload
    pub fn required_option(&mut self, value: Option<&str>, field: &str, max_len: usize) {
        match value {
            Some(v) => self.required_text(v, field, max_len),
            None => self.push(field, REQUIRED),
        }
    }

    /// Present values must be non-blank and short enough
    pub fn optional_nonblank(&mut self, value: Option<&str>, field: &str, max_len: usize) {
        if let Some(v) = value {
            self.required_text(v, field, max_len);
        }
    }

    /// Present values must fit within `max_len`; blank is allowed
    pub fn optional_text(&mut self, value: Option<&str>, field: &str, max_len: usize) {
        if let Some(v) = value {
            self.max_len(v, field, max_len);
        }
    }

    fn max_len(&mut self, value: &str, field: &str, max_len: usize) {
        let len = value.chars().count();
        if len > max_len {
            self.push(
                field,
                format!("Ensure this field has no more than {max_len} characters."),
            );
        }
    }

    /// Something shaped like `local@domain.tld`
    pub fn email(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.push_code("email", ErrorCode::EmailRequired);
            return;
        }
        if !is_email_like(value) {
            self.push_code("email", ErrorCode::InvalidEmail);
            return;
        }
        self.max_len(value, "email", MAX_EMAIL_LEN);
    }

    /// Password length bounds. Whitespace is significant.
    pub fn password(&mut self, value: &str) {
        if value.is_empty() {
            self.push("password", BLANK);
        } else if value.chars().count() < MIN_PASSWORD_LEN {
            self.push_code("password", ErrorCode::PasswordTooShort);
        } else {
            self.max_len(value, "password", MAX_PASSWORD_LEN);
        }
    }

    pub fn non_negative(&mut self, value: i32, field: &str) {
        if value < 0 {
            self.push(field, "Ensure this value is greater than or equal to 0.");
        }
    }

    /// DECIMAL(5, 2): non-negative, two decimal places, five digits in total
    ///
    /// The scale is checked as sent, so `4.500` is rejected rather than rounded.
    pub fn price(&mut self, value: &Decimal, field: &str) {
        let max_whole = Decimal::from(10_i64.pow(MAX_PRICE_DIGITS - PRICE_DECIMAL_PLACES));

        let msg = if value.is_sign_negative() && !value.is_zero() {
            "Ensure this value is greater than or equal to 0.".to_string()
        } else if value.scale() > PRICE_DECIMAL_PLACES {
            format!("Ensure that there are no more than {PRICE_DECIMAL_PLACES} decimal places.")
        } else if value.trunc() >= max_whole {
            format!("Ensure that there are no more than {MAX_PRICE_DIGITS} digits in total.")
        } else {
            return;
        };

        self.code.get_or_insert(ErrorCode::RecipeInvalidPrice);
        self.push(field, msg);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when nothing was recorded, otherwise a single 400 carrying every message
    pub fn into_result(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let code = self.code.unwrap_or(ErrorCode::ValidationFailed);
        let mut err = AppError::new(code);
        for (field, msg) in self.errors {
            err = err.with_field_error(field, msg);
        }
        Err(err)
    }
}

/// Store prices with exactly two decimal places
pub fn normalize_price(value: Decimal) -> Decimal {
    let mut price = value.round_dp(PRICE_DECIMAL_PLACES);
    price.rescale(PRICE_DECIMAL_PLACES);
    price
}

fn is_email_like(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.rsplit_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
