//! Unified error codes for the recipe service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: User account errors
//! - 4xxx: Recipe errors
//! - 5xxx: Catalog errors (tags, ingredients)
//! - 6xxx: File upload errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can switch on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// HTTP method not allowed on this resource
    MethodNotAllowed = 9,

    // ==================== 1xxx: Auth ====================
    /// No credentials were supplied
    NotAuthenticated = 1001,
    /// Email/password pair did not authenticate
    InvalidCredentials = 1002,
    /// Token is unknown or malformed
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1007,

    // ==================== 2xxx: Permission ====================
    PermissionDenied = 2001,
    AdminRequired = 2003,

    // ==================== 3xxx: User ====================
    UserNotFound = 3001,
    EmailAlreadyExists = 3002,
    EmailRequired = 3003,
    InvalidEmail = 3004,
    PasswordTooShort = 3018,

    // ==================== 4xxx: Recipe ====================
    RecipeNotFound = 4001,
    RecipeInvalidPrice = 4002,

    // ==================== 5xxx: Catalog ====================
    TagNotFound = 5001,
    IngredientNotFound = 5101,

    // ==================== 65xx: File Upload ====================
    FileTooLarge = 6501,
    UnsupportedFileFormat = 6502,
    InvalidImageFile = 6503,
    NoFileProvided = 6504,
    EmptyFile = 6505,
    FileStorageFailed = 6509,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
    ConfigError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::MethodNotAllowed => "Method not allowed",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication credentials were not provided",
            ErrorCode::InvalidCredentials => "Unable to authenticate with the provided credentials",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::AccountDisabled => "User inactive or deleted",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailAlreadyExists => "user with this email already exists.",
            ErrorCode::EmailRequired => "Users must have an email address",
            ErrorCode::InvalidEmail => "Enter a valid email address.",
            ErrorCode::PasswordTooShort => "Ensure this field has at least 5 characters.",

            // Recipe
            ErrorCode::RecipeNotFound => "Recipe not found",
            ErrorCode::RecipeInvalidPrice => "Recipe has invalid price",

            // Catalog
            ErrorCode::TagNotFound => "Tag not found",
            ErrorCode::IngredientNotFound => "Ingredient not found",

            // File Upload
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => {
                "Upload a valid image. The file you uploaded was either not an image or a corrupted image."
            }
            ErrorCode::NoFileProvided => "No file was submitted.",
            ErrorCode::EmptyFile => "The submitted file is empty.",
            ErrorCode::FileStorageFailed => "File storage failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::MethodNotAllowed),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // User
            3001 => Ok(ErrorCode::UserNotFound),
            3002 => Ok(ErrorCode::EmailAlreadyExists),
            3003 => Ok(ErrorCode::EmailRequired),
            3004 => Ok(ErrorCode::InvalidEmail),
            3018 => Ok(ErrorCode::PasswordTooShort),

            // Recipe
            4001 => Ok(ErrorCode::RecipeNotFound),
            4002 => Ok(ErrorCode::RecipeInvalidPrice),

            // Catalog
            5001 => Ok(ErrorCode::TagNotFound),
            5101 => Ok(ErrorCode::IngredientNotFound),

            // File Upload
            6501 => Ok(ErrorCode::FileTooLarge),
            6502 => Ok(ErrorCode::UnsupportedFileFormat),
            6503 => Ok(ErrorCode::InvalidImageFile),
            6504 => Ok(ErrorCode::NoFileProvided),
            6505 => Ok(ErrorCode::EmptyFile),
            6509 => Ok(ErrorCode::FileStorageFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
