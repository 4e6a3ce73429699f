//! Form inputs of the iris app.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::iris::model::Measurements;

fn validate_measurement(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("positive");
        err.message = Some("Must be a positive number.".into());
        Err(err)
    }
}

/// The form input of a `POST /` request.
#[derive(Debug, Clone, Validate, Deserialize)]
pub struct PredictionForm {
    #[validate(custom = "validate_measurement")]
    pub sepal_length: f64,
    #[validate(custom = "validate_measurement")]
    pub sepal_width: f64,
    #[validate(custom = "validate_measurement")]
    pub petal_length: f64,
    #[validate(custom = "validate_measurement")]
    pub petal_width: f64,
}

/// The query of a `GET /predict` request, e.g. `?sep-len=5.1&sep-wid=3.5&pet-len=1.4&pet-wid=0.2`.
#[derive(Debug, Clone, Validate, Deserialize)]
pub struct PredictionQuery {
    #[serde(rename = "sep-len")]
    #[validate(custom = "validate_measurement")]
    pub sepal_length: f64,
    #[serde(rename = "sep-wid")]
    #[validate(custom = "validate_measurement")]
    pub sepal_width: f64,
    #[serde(rename = "pet-len")]
    #[validate(custom = "validate_measurement")]
    pub petal_length: f64,
    #[serde(rename = "pet-wid")]
    #[validate(custom = "validate_measurement")]
    pub petal_width: f64,
}

impl From<&PredictionForm> for Measurements {
    fn from(form: &PredictionForm) -> Self {
        Measurements {
            sepal_length: form.sepal_length,
            sepal_width: form.sepal_width,
            petal_length: form.petal_length,
            petal_width: form.petal_width,
        }
    }
}

impl From<&PredictionQuery> for Measurements {
    fn from(query: &PredictionQuery) -> Self {
        Measurements {
            sepal_length: query.sepal_length,
            sepal_width: query.sepal_width,
            petal_length: query.petal_length,
            petal_width: query.petal_width,
        }
    }
}

const MAX_PASSWORD_CHARS: usize = 128;

fn validate_password_length(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() <= MAX_PASSWORD_CHARS {
        return Ok(());
    }
    let mut err = ValidationError::new("length");
    err.message = Some(format!("Must be at most {} characters.", MAX_PASSWORD_CHARS).into());
    Err(err)
}

/// The form input of a `POST /register` request.
#[derive(Debug, Clone, Validate, Deserialize)]
pub struct UserForm {
    /// The provided email.
    #[validate(email(message = "Must be a valid email address."))]
    pub email: String,
    /// The provided password.
    #[validate(
        length(min = 1, message = "This field is required."),
        custom = "validate_password_length"
    )]
    pub password: String,
}
