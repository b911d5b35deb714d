//! Normalization of provider webhook payloads into [`PaymentEvent`]s.

use serde_json::Value;

use crate::{
    model::status::{PaymentProvider, PaymentStatus},
    server::{error::AppError, model::payment::PaymentEvent},
};

/// Parses a verified webhook body.
///
/// # Returns
/// - `Ok(PaymentEvent)` - Normalized event; amounts are in minor units
/// - `Err(AppError::BadRequest)` - Body is not JSON or lacks a required field
pub fn parse_event(provider: PaymentProvider, body: &[u8]) -> Result<PaymentEvent, AppError> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid {} payload: {}", provider, e)))?;

    let parsed = match provider {
        PaymentProvider::Paystack => paystack(&payload),
        PaymentProvider::Flutterwave => flutterwave(&payload),
        PaymentProvider::Stripe => stripe(&payload),
    };

    let Some(fields) = parsed else {
        return Err(AppError::BadRequest(format!(
            "Unrecognized {} payload",
            provider
        )));
    };

    Ok(PaymentEvent {
        provider,
        reference: fields.reference,
        event_type: fields.event_type,
        status: fields.status,
        amount_minor: fields.amount_minor,
        currency: fields.currency.to_ascii_uppercase(),
        company_id: fields.company_id,
        payload: String::from_utf8_lossy(body).into_owned(),
    })
}

struct Fields {
    reference: String,
    event_type: String,
    status: PaymentStatus,
    amount_minor: i64,
    currency: String,
    company_id: Option<i32>,
}

fn paystack(payload: &Value) -> Option<Fields> {
    let data = payload.get("data")?;

    Some(Fields {
        reference: text(data.get("reference")?)?,
        event_type: text(payload.get("event")?)?,
        status: match data.get("status").and_then(Value::as_str) {
            Some("success") => PaymentStatus::Succeeded,
            Some("failed" | "abandoned" | "reversed") => PaymentStatus::Failed,
            _ => PaymentStatus::Pending,
        },
        amount_minor: data.get("amount")?.as_i64()?,
        currency: text(data.get("currency")?)?,
        company_id: company_id(data.get("metadata")),
    })
}

fn flutterwave(payload: &Value) -> Option<Fields> {
    let data = payload.get("data")?;
    let amount = data.get("amount")?.as_f64()?;

    Some(Fields {
        reference: text(data.get("tx_ref")?)?,
        event_type: payload
            .get("event")
            .and_then(text)
            .unwrap_or_else(|| "charge.completed".to_string()),
        status: match data.get("status").and_then(Value::as_str) {
            Some("successful") => PaymentStatus::Succeeded,
            Some("failed" | "cancelled") => PaymentStatus::Failed,
            _ => PaymentStatus::Pending,
        },
        amount_minor: (amount * 100.0).round() as i64,
        currency: text(data.get("currency")?)?,
        company_id: company_id(payload.get("meta_data").or_else(|| data.get("meta"))),
    })
}

fn stripe(payload: &Value) -> Option<Fields> {
    let object = payload.get("data")?.get("object")?;
    let amount = object
        .get("amount")
        .or_else(|| object.get("amount_total"))?
        .as_i64()?;

    Some(Fields {
        reference: text(object.get("id")?)?,
        event_type: text(payload.get("type")?)?,
        status: match object.get("status").and_then(Value::as_str) {
            Some("succeeded" | "paid" | "complete") => PaymentStatus::Succeeded,
            Some("failed" | "canceled") => PaymentStatus::Failed,
            _ => PaymentStatus::Pending,
        },
        amount_minor: amount,
        currency: text(object.get("currency")?)?,
        company_id: company_id(object.get("metadata")),
    })
}

/// Non-empty string value.
fn text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Reads `company_id` from a metadata object, as a number or a numeric string.
fn company_id(metadata: Option<&Value>) -> Option<i32> {
    let value = metadata?.get("company_id")?;

    match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
