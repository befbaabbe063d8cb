use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::appresult::AppError;

/// Request bodies that report the first failing field, in declaration order.
pub trait FieldOrder {
    const FIELDS: &'static [&'static str];
}

/// `Json<T>` that rejects with [`AppError::Validation`] on malformed bodies
/// and on failed field validation.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + FieldOrder,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::Validation(first_violation(&errors, T::FIELDS)))?;

        Ok(Self(value))
    }
}

fn first_violation(errors: &ValidationErrors, order: &[&str]) -> String {
    let field_errors = errors.field_errors();

    let first = order
        .iter()
        .find_map(|field| field_errors.get(*field))
        .or_else(|| {
            field_errors
                .iter()
                .min_by(|a, b| a.0.cmp(b.0))
                .map(|(_, errs)| errs)
        });

    first
        .and_then(|errs| errs.first())
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => format!("Invalid value ({})", err.code),
        })
        .unwrap_or_else(|| "Invalid request".to_owned())
}
