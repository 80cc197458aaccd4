use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use onboard_core::domain::entities::customer::NewCustomer;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "f_name is required"))]
    pub f_name: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "l_name is required"))]
    pub l_name: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 128, message = "password is required"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 32))]
    pub phone_no: String,

    #[serde(default)]
    #[validate(length(max = 255))]
    pub address: String,
}

impl From<RegisterRequest> for NewCustomer {
    fn from(request: RegisterRequest) -> Self {
        Self {
            first_name: request.f_name,
            last_name: request.l_name,
            email: request.email,
            password: request.password,
            phone_no: request.phone_no,
            address: request.address,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(rename = "customerId")]
    pub customer_id: Uuid,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    #[serde(rename = "customerId")]
    pub customer_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Accepted as a JSON string or number
    #[serde(deserialize_with = "string_or_number")]
    #[validate(length(min = 1, max = 16, message = "otp is required"))]
    pub otp: String,
}

/// Body of `POST /auth/resend-otp`. A missing or null email is carried
/// through to the service, which rejects it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResendOtpRequest {
    #[serde(default)]
    pub email: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(u64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(s) => s,
        Code::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verify_request_accepts_numeric_otp() {
        let request: VerifyEmailRequest =
            serde_json::from_value(json!({"email": "a@example.com", "otp": 482913})).unwrap();
        assert_eq!(request.otp, "482913");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_verify_request_accepts_string_otp() {
        let request: VerifyEmailRequest =
            serde_json::from_value(json!({"email": "a@example.com", "otp": "012345"})).unwrap();
        assert_eq!(request.otp, "012345");
    }

    #[test]
    fn test_verify_request_rejects_bad_email() {
        let request: VerifyEmailRequest =
            serde_json::from_value(json!({"email": "nope", "otp": "123456"})).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_resend_request_null_email() {
        let request: ResendOtpRequest = serde_json::from_value(json!({"email": null})).unwrap();
        assert!(request.email.is_none());

        let request: ResendOtpRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.email.is_none());
    }

    #[test]
    fn test_resend_request_rejects_non_string_email() {
        assert!(serde_json::from_value::<ResendOtpRequest>(json!({"email": 42})).is_err());
    }

    #[test]
    fn test_register_request_missing_fields_fail_validation() {
        let request: RegisterRequest =
            serde_json::from_value(json!({"email": "a@example.com"})).unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("f_name"));
        assert!(fields.contains_key("password"));
        assert!(!fields.contains_key("email"));
    }

    #[test]
    fn test_register_response_uses_camel_case_id() {
        let body = serde_json::to_value(RegisterResponse {
            message: "Customer registered successfully".to_string(),
            customer_id: Uuid::nil(),
            token: "t".to_string(),
        })
        .unwrap();
        assert!(body.get("customerId").is_some());
        assert!(body.get("customer_id").is_none());
    }
}
