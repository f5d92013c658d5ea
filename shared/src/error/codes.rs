//! Unified error codes for the Masa platform
//!
//! This module defines all error codes used across the cloud service and the
//! panel frontend. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Tenant and plan errors
//! - 4xxx: Order errors
//! - 5xxx: Billing errors
//! - 6xxx: Menu errors
//! - 7xxx: Branch and table errors
//! - 8xxx: Support and content errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
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
    /// Too many requests
    RateLimited = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Session has expired
    SessionExpired = 1003,
    /// Session token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// Password too short
    PasswordTooShort = 1006,
    /// Password reset token has expired
    ResetTokenExpired = 1007,
    /// Password reset token is invalid
    ResetTokenInvalid = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Super admin role required
    SuperAdminRequired = 2003,

    // ==================== 3xxx: Tenant / Plan ====================
    /// Tenant not found
    TenantNotFound = 3001,
    /// Tenant account is not active
    TenantInactive = 3002,
    /// Trial period has expired
    TrialExpired = 3003,
    /// Plan not found
    PlanNotFound = 3004,
    /// Plan limit reached (branches, tables, users, ...)
    PlanLimitReached = 3005,
    /// Feature not available in current plan
    FeatureNotAvailable = 3006,
    /// Plan has subscribed tenants
    PlanInUse = 3007,
    /// Email already registered
    EmailTaken = 3008,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Order status transition is invalid
    OrderStatusInvalid = 4003,
    /// QR token does not resolve to a table
    QrTokenInvalid = 4004,

    // ==================== 5xxx: Billing ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Payment provider returned an error
    PaymentProviderError = 5002,
    /// Webhook signature verification failed
    WebhookSignatureInvalid = 5003,
    /// Webhook timestamp outside the accepted window
    WebhookStale = 5004,

    // ==================== 6xxx: Menu ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product is not available for ordering
    ProductUnavailable = 6002,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category has products
    CategoryHasProducts = 6102,
    /// Category name already exists
    CategoryNameExists = 6103,

    // ==================== 7xxx: Branch / Table ====================
    /// Branch not found
    BranchNotFound = 7001,
    /// Branch has tables
    BranchHasTables = 7002,
    /// Table not found
    TableNotFound = 7101,
    /// Table name already exists in branch
    TableNameExists = 7102,

    // ==================== 8xxx: Support / Content ====================
    /// Support ticket not found
    TicketNotFound = 8001,
    /// Support ticket is closed
    TicketClosed = 8002,
    /// Campaign not found
    CampaignNotFound = 8101,
    /// Theme settings are invalid
    ThemeInvalid = 8201,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Email delivery failed
    EmailSendFailed = 9101,
    /// Client disconnected
    ClientDisconnected = 9201,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
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
            ErrorCode::RateLimited => "Too many requests",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::SessionExpired => "Session has expired",
            ErrorCode::TokenInvalid => "Session token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",
            ErrorCode::ResetTokenExpired => "Password reset link has expired",
            ErrorCode::ResetTokenInvalid => "Password reset link is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::SuperAdminRequired => "Super admin role is required",

            // Tenant / Plan
            ErrorCode::TenantNotFound => "Tenant not found",
            ErrorCode::TenantInactive => "Tenant account is not active",
            ErrorCode::TrialExpired => "Trial period has expired",
            ErrorCode::PlanNotFound => "Plan not found",
            ErrorCode::PlanLimitReached => "Plan limit reached",
            ErrorCode::FeatureNotAvailable => "Feature not available in current plan",
            ErrorCode::PlanInUse => "Plan has subscribed tenants",
            ErrorCode::EmailTaken => "Email is already registered",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::OrderStatusInvalid => "Order status transition is invalid",
            ErrorCode::QrTokenInvalid => "QR code is not valid",

            // Billing
            ErrorCode::PaymentFailed => "Payment processing failed",
            ErrorCode::PaymentProviderError => "Payment provider returned an error",
            ErrorCode::WebhookSignatureInvalid => "Webhook signature verification failed",
            ErrorCode::WebhookStale => "Webhook timestamp is outside the accepted window",

            // Menu
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductUnavailable => "Product is not available",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasProducts => "Category has associated products",
            ErrorCode::CategoryNameExists => "Category name already exists",

            // Branch / Table
            ErrorCode::BranchNotFound => "Branch not found",
            ErrorCode::BranchHasTables => "Branch has associated tables",
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableNameExists => "Table name already exists in this branch",

            // Support / Content
            ErrorCode::TicketNotFound => "Support ticket not found",
            ErrorCode::TicketClosed => "Support ticket is closed",
            ErrorCode::CampaignNotFound => "Campaign not found",
            ErrorCode::ThemeInvalid => "Theme settings are invalid",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::EmailSendFailed => "Email delivery failed",
            ErrorCode::ClientDisconnected => "Client disconnected",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
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
            8 => Ok(ErrorCode::RateLimited),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::SessionExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::AccountDisabled),
            1006 => Ok(ErrorCode::PasswordTooShort),
            1007 => Ok(ErrorCode::ResetTokenExpired),
            1008 => Ok(ErrorCode::ResetTokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::SuperAdminRequired),

            // Tenant / Plan
            3001 => Ok(ErrorCode::TenantNotFound),
            3002 => Ok(ErrorCode::TenantInactive),
            3003 => Ok(ErrorCode::TrialExpired),
            3004 => Ok(ErrorCode::PlanNotFound),
            3005 => Ok(ErrorCode::PlanLimitReached),
            3006 => Ok(ErrorCode::FeatureNotAvailable),
            3007 => Ok(ErrorCode::PlanInUse),
            3008 => Ok(ErrorCode::EmailTaken),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::OrderStatusInvalid),
            4004 => Ok(ErrorCode::QrTokenInvalid),

            // Billing
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::PaymentProviderError),
            5003 => Ok(ErrorCode::WebhookSignatureInvalid),
            5004 => Ok(ErrorCode::WebhookStale),

            // Menu
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductUnavailable),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6102 => Ok(ErrorCode::CategoryHasProducts),
            6103 => Ok(ErrorCode::CategoryNameExists),

            // Branch / Table
            7001 => Ok(ErrorCode::BranchNotFound),
            7002 => Ok(ErrorCode::BranchHasTables),
            7101 => Ok(ErrorCode::TableNotFound),
            7102 => Ok(ErrorCode::TableNameExists),

            // Support / Content
            8001 => Ok(ErrorCode::TicketNotFound),
            8002 => Ok(ErrorCode::TicketClosed),
            8101 => Ok(ErrorCode::CampaignNotFound),
            8201 => Ok(ErrorCode::ThemeInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9101 => Ok(ErrorCode::EmailSendFailed),
            9201 => Ok(ErrorCode::ClientDisconnected),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        // General
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::Unknown.code(), 1);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::AlreadyExists.code(), 4);
        assert_eq!(ErrorCode::InvalidRequest.code(), 5);
        assert_eq!(ErrorCode::InvalidFormat.code(), 6);
        assert_eq!(ErrorCode::RequiredField.code(), 7);
        assert_eq!(ErrorCode::RateLimited.code(), 8);

        // Auth
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::SessionExpired.code(), 1003);
        assert_eq!(ErrorCode::TokenInvalid.code(), 1004);
        assert_eq!(ErrorCode::AccountDisabled.code(), 1005);
        assert_eq!(ErrorCode::PasswordTooShort.code(), 1006);
        assert_eq!(ErrorCode::ResetTokenExpired.code(), 1007);
        assert_eq!(ErrorCode::ResetTokenInvalid.code(), 1008);

        // Permission
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::RoleRequired.code(), 2002);
        assert_eq!(ErrorCode::SuperAdminRequired.code(), 2003);

        // Tenant / Plan
        assert_eq!(ErrorCode::TenantNotFound.code(), 3001);
        assert_eq!(ErrorCode::TenantInactive.code(), 3002);
        assert_eq!(ErrorCode::TrialExpired.code(), 3003);
        assert_eq!(ErrorCode::PlanNotFound.code(), 3004);
        assert_eq!(ErrorCode::PlanLimitReached.code(), 3005);
        assert_eq!(ErrorCode::FeatureNotAvailable.code(), 3006);
        assert_eq!(ErrorCode::PlanInUse.code(), 3007);
        assert_eq!(ErrorCode::EmailTaken.code(), 3008);

        // Order
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::OrderEmpty.code(), 4002);
        assert_eq!(ErrorCode::OrderStatusInvalid.code(), 4003);
        assert_eq!(ErrorCode::QrTokenInvalid.code(), 4004);

        // Billing
        assert_eq!(ErrorCode::PaymentFailed.code(), 5001);
        assert_eq!(ErrorCode::PaymentProviderError.code(), 5002);
        assert_eq!(ErrorCode::WebhookSignatureInvalid.code(), 5003);
        assert_eq!(ErrorCode::WebhookStale.code(), 5004);

        // Menu
        assert_eq!(ErrorCode::ProductNotFound.code(), 6001);
        assert_eq!(ErrorCode::ProductUnavailable.code(), 6002);
        assert_eq!(ErrorCode::CategoryNotFound.code(), 6101);
        assert_eq!(ErrorCode::CategoryHasProducts.code(), 6102);
        assert_eq!(ErrorCode::CategoryNameExists.code(), 6103);

        // Branch / Table
        assert_eq!(ErrorCode::BranchNotFound.code(), 7001);
        assert_eq!(ErrorCode::BranchHasTables.code(), 7002);
        assert_eq!(ErrorCode::TableNotFound.code(), 7101);
        assert_eq!(ErrorCode::TableNameExists.code(), 7102);

        // Support / Content
        assert_eq!(ErrorCode::TicketNotFound.code(), 8001);
        assert_eq!(ErrorCode::TicketClosed.code(), 8002);
        assert_eq!(ErrorCode::CampaignNotFound.code(), 8101);
        assert_eq!(ErrorCode::ThemeInvalid.code(), 8201);

        // System
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
        assert_eq!(ErrorCode::NetworkError.code(), 9003);
        assert_eq!(ErrorCode::TimeoutError.code(), 9004);
        assert_eq!(ErrorCode::ConfigError.code(), 9005);
        assert_eq!(ErrorCode::EmailSendFailed.code(), 9101);
        assert_eq!(ErrorCode::ClientDisconnected.code(), 9201);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::NotFound.is_success());
        assert!(!ErrorCode::InternalError.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1001), Ok(ErrorCode::NotAuthenticated));
        assert_eq!(ErrorCode::try_from(3003), Ok(ErrorCode::TrialExpired));
        assert_eq!(ErrorCode::try_from(4001), Ok(ErrorCode::OrderNotFound));
        assert_eq!(ErrorCode::try_from(9001), Ok(ErrorCode::InternalError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
    }

    #[test]
    fn test_from_error_code_to_u16() {
        let code: u16 = ErrorCode::Success.into();
        assert_eq!(code, 0);

        let code: u16 = ErrorCode::NotAuthenticated.into();
        assert_eq!(code, 1001);

        let code: u16 = ErrorCode::InternalError.into();
        assert_eq!(code, 9001);
    }

    #[test]
    fn test_serialize() {
        let code = ErrorCode::NotFound;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "3");

        let code = ErrorCode::OrderNotFound;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "4001");

        let code = ErrorCode::Success;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "0");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("0").unwrap();
        assert_eq!(code, ErrorCode::Success);

        let code: ErrorCode = serde_json::from_str("3").unwrap();
        assert_eq!(code, ErrorCode::NotFound);

        let code: ErrorCode = serde_json::from_str("3003").unwrap();
        assert_eq!(code, ErrorCode::TrialExpired);

        let code: ErrorCode = serde_json::from_str("9001").unwrap();
        assert_eq!(code, ErrorCode::InternalError);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("12345");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::Success.to_string(), "0");
        assert_eq!(ErrorCode::TenantNotFound.to_string(), "3001");
        assert_eq!(ErrorCode::InternalError.to_string(), "9001");
    }

    #[test]
    fn test_message_not_empty() {
        // Every code carries a usable default message
        let codes = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotAuthenticated,
            ErrorCode::TrialExpired,
            ErrorCode::PlanLimitReached,
            ErrorCode::OrderStatusInvalid,
            ErrorCode::WebhookSignatureInvalid,
            ErrorCode::TableNotFound,
            ErrorCode::TicketClosed,
            ErrorCode::EmailSendFailed,
        ];
        for code in codes {
            assert!(!code.message().is_empty());
        }
    }
}
