//! Shared fixtures for the HTTP tests: in-memory repositories, recording
//! delivery and blob store, and a hand-driven clock behind the real route
//! table.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    test, web, App,
};
use chrono::{DateTime, TimeZone, Utc};

use onboard_api::app::create_app;
use onboard_api::routes::AppState;
use onboard_core::domain::entities::customer::{Customer, NewCustomer};
use onboard_core::repositories::{MockCustomerRepository, MockDocumentRepository};
use onboard_core::services::{
    CustomerService, CustomerServiceConfig, DocumentService, DocumentServiceConfig, ManualClock,
    MockBlobStore, MockOtpDelivery, OtpLifecycleConfig, OtpLifecycleService, TokenService,
    TokenServiceConfig,
};
use onboard_shared::config::VerifiedResubmission;

pub const PASSWORD: &str = "Kaushik@9876";

pub type TestState = AppState<MockCustomerRepository, MockOtpDelivery, ManualClock>;
pub type TestDocumentService =
    DocumentService<MockCustomerRepository, MockDocumentRepository, MockBlobStore, ManualClock>;

pub struct TestContext {
    pub repository: Arc<MockCustomerRepository>,
    pub delivery: Arc<MockOtpDelivery>,
    pub clock: Arc<ManualClock>,
    pub token_service: Arc<TokenService>,
    pub documents: Arc<MockDocumentRepository>,
    pub blob_store: Arc<MockBlobStore>,
    pub state: web::Data<TestState>,
    pub document_service: web::Data<TestDocumentService>,
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_policy(VerifiedResubmission::NoOp)
    }

    pub fn with_policy(verified_resubmission: VerifiedResubmission) -> Self {
        let repository = Arc::new(MockCustomerRepository::new());
        let delivery = Arc::new(MockOtpDelivery::new());
        let clock = Arc::new(ManualClock::new(t0()));
        let token_service = Arc::new(TokenService::new(TokenServiceConfig {
            jwt_secret: "test_secret".to_string(),
            ..TokenServiceConfig::default()
        }));

        let otp_service = Arc::new(OtpLifecycleService::new(
            repository.clone(),
            delivery.clone(),
            clock.clone(),
            OtpLifecycleConfig {
                verified_resubmission,
                ..OtpLifecycleConfig::default()
            },
        ));
        let customer_service = Arc::new(CustomerService::new(
            repository.clone(),
            otp_service.clone(),
            token_service.clone(),
            clock.clone(),
            CustomerServiceConfig {
                bcrypt_cost: 4,
                ..CustomerServiceConfig::default()
            },
        ));

        let documents = Arc::new(MockDocumentRepository::new());
        let blob_store = Arc::new(MockBlobStore::new());
        let document_service = web::Data::new(DocumentService::new(
            repository.clone(),
            documents.clone(),
            blob_store.clone(),
            clock.clone(),
            DocumentServiceConfig {
                max_file_size_bytes: 1024,
                ..DocumentServiceConfig::default()
            },
        ));

        Self {
            repository,
            delivery,
            clock,
            token_service,
            documents,
            blob_store,
            state: web::Data::new(AppState::new(customer_service, otp_service)),
            document_service,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        create_app(
            self.state.clone(),
            self.document_service.clone(),
            web::Data::from(self.token_service.clone()),
            256 * 1024,
        )
    }

    /// Register through the service layer; returns the customer and bearer token
    pub async fn register(&self, email: &str) -> (Customer, String) {
        let registered = self
            .state
            .customer_service
            .register(new_customer(email))
            .await
            .expect("registration succeeds");
        (registered.customer, registered.token)
    }

    /// Code most recently delivered to `email`
    pub fn last_code(&self, email: &str) -> String {
        self.delivery
            .last_code_for(email)
            .expect("a code was delivered")
    }

    /// Token for a customer that was never stored
    pub fn token_for_unknown(&self, email: &str) -> String {
        let ghost = Customer::new(new_customer(email), "x".to_string(), Utc::now());
        self.token_service
            .issue_access_token(&ghost)
            .expect("token issues")
    }
}

pub fn new_customer(email: &str) -> NewCustomer {
    NewCustomer {
        first_name: "Kaushik".to_string(),
        last_name: "Naik".to_string(),
        email: email.to_string(),
        password: PASSWORD.to_string(),
        phone_no: "1234567890".to_string(),
        address: "Udupi".to_string(),
    }
}

pub fn post_json(uri: &str, body: serde_json::Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

pub fn post_json_with_token(uri: &str, body: serde_json::Value, token: &str) -> test::TestRequest {
    post_json(uri, body).insert_header(("Authorization", format!("Bearer {}", token)))
}

pub const BOUNDARY: &str = "----onboard-test-boundary";

/// `multipart/form-data` body with one file field
pub fn multipart_file(field: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: {content_type}\r\n\r\n",
        b = BOUNDARY
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn upload_request(uri: &str, body: Vec<u8>, token: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_payload(body)
}
