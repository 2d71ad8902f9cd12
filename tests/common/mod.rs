//! Common Test Utilities
//!
//! Shared helpers, fixtures, and in-memory repositories.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use tower::ServiceExt;
use uuid::Uuid;

use credit_application_system::application::services::{CreditServiceImpl, CustomerServiceImpl};
use credit_application_system::domain::{
    Address, Credit, CreditRepository, Customer, CustomerRepository,
};
use credit_application_system::presentation::http::routes;
use credit_application_system::shared::error::AppError;
use credit_application_system::startup::AppState;

/// Customer store shared by both in-memory repositories
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: Mutex<Vec<Customer>>,
}

impl InMemoryCustomerRepository {
    fn get(&self, id: i64) -> Option<Customer> {
        self.customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        Ok(self.get(id))
    }

    async fn create(&self, customer: &Customer) -> Result<Customer, AppError> {
        let mut customers = self.customers.lock().unwrap();
        if customers
            .iter()
            .any(|c| c.cpf == customer.cpf || c.email == customer.email)
        {
            return Err(AppError::Conflict("duplicate customer".into()));
        }

        let mut stored = customer.clone();
        stored.id = customers.len() as i64 + 1;
        customers.push(stored.clone());
        Ok(stored)
    }
}

pub struct InMemoryCreditRepository {
    credits: Mutex<Vec<Credit>>,
    customers: Arc<InMemoryCustomerRepository>,
}

impl InMemoryCreditRepository {
    pub fn new(customers: Arc<InMemoryCustomerRepository>) -> Self {
        Self {
            credits: Mutex::new(Vec::new()),
            customers,
        }
    }
}

#[async_trait]
impl CreditRepository for InMemoryCreditRepository {
    async fn insert(&self, credit: &Credit) -> Result<Credit, AppError> {
        let customer = self
            .customers
            .get(credit.customer_id())
            .ok_or_else(|| AppError::NotFound("customer".into()))?;

        let mut credits = self.credits.lock().unwrap();
        if credits.iter().any(|c| c.credit_code == credit.credit_code) {
            return Err(AppError::Conflict("duplicate credit code".into()));
        }

        let mut stored = credit.clone();
        stored.id = credits.len() as i64 + 1;
        stored.customer = customer;
        credits.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Credit>, AppError> {
        Ok(self
            .credits
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.is_owned_by(customer_id))
            .cloned()
            .collect())
    }

    async fn find_by_code_and_customer_id(
        &self,
        credit_code: Uuid,
        customer_id: i64,
    ) -> Result<Option<Credit>, AppError> {
        Ok(self
            .credits
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.credit_code == credit_code && c.is_owned_by(customer_id))
            .cloned())
    }
}

/// Test application builder
pub struct TestApp {
    pub router: Router,
    pub customers: Arc<InMemoryCustomerRepository>,
}

impl TestApp {
    /// Create a new test application backed by in-memory repositories
    pub fn new() -> Self {
        let customers = Arc::new(InMemoryCustomerRepository::default());
        let credits = Arc::new(InMemoryCreditRepository::new(customers.clone()));

        let state = AppState::new(
            Arc::new(CreditServiceImpl::new(credits, customers.clone())),
            Arc::new(CustomerServiceImpl::new(customers.clone())),
        );

        Self {
            router: routes::create_router(state),
            customers,
        }
    }

    /// Store a customer directly, skipping password hashing
    pub async fn seed_customer(&self, cpf: &str, email: &str) -> Customer {
        let customer = Customer {
            id: 0,
            first_name: "John".into(),
            last_name: "Doe".into(),
            cpf: cpf.into(),
            email: email.into(),
            password_hash: "not-a-real-hash".into(),
            address: Address {
                zip_code: "12345-678".into(),
                street: "Main Street".into(),
            },
        };
        self.customers.create(&customer).await.unwrap()
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

/// Read a response body as text
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read a response body as JSON
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// First installment date a given number of months from today
pub fn months_ahead(months: u32) -> String {
    chrono::Local::now()
        .date_naive()
        .checked_add_months(chrono::Months::new(months))
        .unwrap()
        .to_string()
}
