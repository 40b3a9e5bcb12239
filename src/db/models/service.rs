use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub duration_minutes: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewService {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom = "non_negative_price")]
    pub price: Decimal,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration_minutes: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateServicePayload {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom = "non_negative_price")]
    pub price: Option<Decimal>,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration_minutes: Option<i32>,
}

fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("price_must_be_non_negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_price() {
        let payload = NewService {
            name: "Haircut".to_string(),
            description: None,
            price: Decimal::new(-100, 2),
            duration_minutes: 30,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn accepts_free_service() {
        let payload = NewService {
            name: "Consultation".to_string(),
            description: Some("Intro call".to_string()),
            price: Decimal::ZERO,
            duration_minutes: 15,
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn rejects_zero_duration() {
        let payload = NewService {
            name: "Haircut".to_string(),
            description: None,
            price: Decimal::new(2500, 2),
            duration_minutes: 0,
        };
        assert!(payload.validate().is_err());
    }
}
