//! Status and kind enums stored as strings in the database.
//!
//! Every enum serializes as snake_case in JSON and round-trips through `as_str` / `FromStr`
//! for persistence.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Returned when a stored string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseStatusError {}

macro_rules! stored_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseStatusError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($value => Ok($name::$variant),)+
                    other => Err(ParseStatusError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

stored_enum!(
    /// Account status of a driver, controlled by administrators.
    DriverStatus, "driver status", {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
);

stored_enum!(
    /// Outcome of the KYC verification workflow.
    VerificationStatus, "verification status", {
        Unverified => "unverified",
        Pending => "pending",
        Verified => "verified",
        Rejected => "rejected",
    }
);

stored_enum!(
    RequestStatus, "request status", {
        Open => "open",
        PartiallyMatched => "partially_matched",
        Matched => "matched",
        Completed => "completed",
        Cancelled => "cancelled",
    }
);

stored_enum!(
    /// Lifecycle of a driver to request assignment. `Pending` and `Accepted` are active.
    MatchStatus, "match status", {
        Pending => "pending",
        Accepted => "accepted",
        Declined => "declined",
        Cancelled => "cancelled",
        Completed => "completed",
    }
);

stored_enum!(
    /// Delivery channel for notifications and OTP codes.
    Channel, "channel", {
        Sms => "sms",
        Email => "email",
    }
);

stored_enum!(
    OtpPurpose, "otp purpose", {
        PhoneVerification => "phone_verification",
        EmailVerification => "email_verification",
    }
);

stored_enum!(
    /// KYC document kinds; all three are required for submission.
    DocumentType, "document type", {
        NationalId => "national_id",
        DriversLicense => "drivers_license",
        Selfie => "selfie",
    }
);

stored_enum!(
    VerificationAction, "verification action", {
        PersonalInfoSubmitted => "personal_info_submitted",
        LicenseSubmitted => "license_submitted",
        DocumentsSubmitted => "documents_submitted",
        IdentityVerified => "identity_verified",
        IdentityMismatch => "identity_mismatch",
        IdentityCheckFailed => "identity_check_failed",
        Approved => "approved",
        Rejected => "rejected",
    }
);

stored_enum!(
    NotificationStatus, "notification status", {
        Sent => "sent",
        Failed => "failed",
    }
);

stored_enum!(
    PaymentProvider, "payment provider", {
        Paystack => "paystack",
        Flutterwave => "flutterwave",
        Stripe => "stripe",
    }
);

stored_enum!(
    /// Normalized payment outcome across providers.
    PaymentStatus, "payment status", {
        Succeeded => "succeeded",
        Pending => "pending",
        Failed => "failed",
    }
);

impl MatchStatus {
    /// Whether the match still occupies the driver and a slot on the request.
    pub fn is_active(&self) -> bool {
        matches!(self, MatchStatus::Pending | MatchStatus::Accepted)
    }
}

impl PaymentStatus {
    /// Whether a transaction in this status may move to `next`. A success is final and a
    /// failure never falls back to pending.
    pub fn can_become(&self, next: PaymentStatus) -> bool {
        match self {
            PaymentStatus::Succeeded => next == PaymentStatus::Succeeded,
            PaymentStatus::Failed => next != PaymentStatus::Pending,
            PaymentStatus::Pending => true,
        }
    }
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Cancelled)
    }

    /// Status implied by the number of active matches on a non-terminal request.
    pub fn from_active_matches(active: u64, drivers_needed: i32) -> Self {
        if active == 0 {
            RequestStatus::Open
        } else if active < drivers_needed.max(0) as u64 {
            RequestStatus::PartiallyMatched
        } else {
            RequestStatus::Matched
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_values() {
        assert_eq!(
            "partially_matched".parse::<RequestStatus>(),
            Ok(RequestStatus::PartiallyMatched)
        );
        assert_eq!(MatchStatus::Accepted.as_str(), "accepted");
    }

    #[test]
    fn rejects_unknown_values() {
        let err = "archived".parse::<DriverStatus>().unwrap_err();
        assert_eq!(err.kind, "driver status");
        assert_eq!(err.value, "archived");
    }

    #[test]
    fn payment_status_never_leaves_success() {
        assert!(PaymentStatus::Pending.can_become(PaymentStatus::Succeeded));
        assert!(PaymentStatus::Failed.can_become(PaymentStatus::Succeeded));
        assert!(!PaymentStatus::Failed.can_become(PaymentStatus::Pending));
        assert!(!PaymentStatus::Succeeded.can_become(PaymentStatus::Pending));
        assert!(!PaymentStatus::Succeeded.can_become(PaymentStatus::Failed));
    }

    #[test]
    fn request_status_follows_active_match_count() {
        assert_eq!(RequestStatus::from_active_matches(0, 2), RequestStatus::Open);
        assert_eq!(
            RequestStatus::from_active_matches(1, 2),
            RequestStatus::PartiallyMatched
        );
        assert_eq!(RequestStatus::from_active_matches(2, 2), RequestStatus::Matched);
        assert_eq!(RequestStatus::from_active_matches(3, 2), RequestStatus::Matched);
    }

    #[test]
    fn only_pending_and_accepted_are_active() {
        let active: Vec<_> = MatchStatus::ALL.iter().filter(|s| s.is_active()).collect();
        assert_eq!(active, vec![&MatchStatus::Pending, &MatchStatus::Accepted]);
    }
}
