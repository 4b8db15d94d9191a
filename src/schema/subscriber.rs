//! Subscriber record and the subscribe request body

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::primitives::EmailAddress;
use super::types::{FieldDef, FieldType, Schema};
use super::Model;

/// Billing plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Monthly,
    Yearly,
}

impl Plan {
    pub const LITERALS: &'static [&'static str] = &["monthly", "yearly"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Monthly => "monthly",
            Plan::Yearly => "yearly",
        }
    }
}

/// Billing status of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Trial,
    Canceled,
    PastDue,
}

impl SubscriptionStatus {
    pub const LITERALS: &'static [&'static str] = &["active", "trial", "canceled", "past_due"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Trial => "trial",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::PastDue => "past_due",
        }
    }
}

/// Stored subscriber shape.
pub static SUBSCRIBER_SCHEMA: Schema = Schema {
    name: "subscriber",
    fields: &[
        FieldDef::required("email", FieldType::Email),
        FieldDef::required("plan", FieldType::Enum(Plan::LITERALS)),
        FieldDef::optional("status", FieldType::Enum(SubscriptionStatus::LITERALS))
            .with_default("active")
            .non_null(),
        FieldDef::optional("started_at", FieldType::Timestamp),
    ],
};

/// Body of `POST /api/subscribe`.
pub static SUBSCRIBE_REQUEST_SCHEMA: Schema = Schema {
    name: "subscribe_request",
    fields: &[
        FieldDef::required("email", FieldType::Email),
        FieldDef::required("plan", FieldType::Enum(Plan::LITERALS)),
    ],
};

/// A subscriber to the signal service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub email: EmailAddress,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub started_at: Option<DateTime<Utc>>,
}

impl Subscriber {
    /// A subscription that is active from `started_at`.
    pub fn activate(email: EmailAddress, plan: Plan, started_at: DateTime<Utc>) -> Self {
        Self {
            email,
            plan,
            status: SubscriptionStatus::Active,
            started_at: Some(started_at),
        }
    }
}

impl Model for Subscriber {
    fn schema() -> &'static Schema {
        &SUBSCRIBER_SCHEMA
    }
}

/// Validated subscribe request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubscribeRequest {
    pub email: EmailAddress,
    pub plan: Plan,
}

impl SubscribeRequest {
    /// Builds the subscriber this request creates.
    pub fn into_subscriber(self, now: DateTime<Utc>) -> Subscriber {
        Subscriber::activate(self.email, self.plan, now)
    }
}

impl Model for SubscribeRequest {
    fn schema() -> &'static Schema {
        &SUBSCRIBE_REQUEST_SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_literals_match_serde_names() {
        for plan in [Plan::Monthly, Plan::Yearly] {
            assert_eq!(serde_json::to_value(plan).unwrap(), json!(plan.as_str()));
            assert!(Plan::LITERALS.contains(&plan.as_str()));
        }
        for status in [
            SubscriptionStatus::Active,
            SubscriptionStatus::Trial,
            SubscriptionStatus::Canceled,
            SubscriptionStatus::PastDue,
        ] {
            assert_eq!(serde_json::to_value(status).unwrap(), json!(status.as_str()));
            assert!(SubscriptionStatus::LITERALS.contains(&status.as_str()));
        }
    }

    #[test]
    fn test_status_defaults_to_active() {
        let sub = Subscriber::from_json(&json!({"email": "a@b.com", "plan": "yearly"})).unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.started_at, None);
    }

    #[test]
    fn test_unknown_plan_and_status_rejected() {
        let err = Subscriber::from_json(&json!({
            "email": "a@b.com",
            "plan": "weekly",
            "status": "paused"
        }))
        .unwrap_err();
        assert!(err.has_field("plan"));
        assert!(err.has_field("status"));
    }

    #[test]
    fn test_started_at_parses_iso_string() {
        let sub = Subscriber::from_json(&json!({
            "email": "a@b.com",
            "plan": "monthly",
            "started_at": "2024-03-01T09:00:00Z"
        }))
        .unwrap();
        assert_eq!(
            sub.started_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_request_builds_active_subscriber() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let req =
            SubscribeRequest::from_json(&json!({"email": "a@b.com", "plan": "monthly"})).unwrap();
        let sub = req.into_subscriber(now);
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.started_at, Some(now));
        assert_eq!(sub.email.as_str(), "a@b.com");
    }

    #[test]
    fn test_request_requires_valid_email() {
        let err = SubscribeRequest::from_json(&json!({"email": "nope", "plan": "monthly"}))
            .unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.has_field("email"));
    }
}
