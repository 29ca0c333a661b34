use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::users::dto::{CreateUserRequest, UpdateUserRequest};
use crate::auth::dto::LoginRequest;

/// Field name → human-readable messages. Collected all-or-nothing: nothing
/// downstream runs until every field passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.0.get(field)
    }
}

/// Create payload with presence and shape already checked.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login payload with presence and shape already checked.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn check_name(errors: &mut ValidationErrors, name: &str) {
    let len = name.chars().count();
    if len < 1 || len > 100 {
        errors.add("name", "Name must be between 1 and 100 characters");
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if !is_valid_email(email) {
        errors.add("email", "Invalid email format");
    }
}

fn check_password(errors: &mut ValidationErrors, password: &str) {
    if password.chars().count() < 8 {
        errors.add("password", "Password must be at least 8 characters");
    }
}

pub fn validate_create(req: CreateUserRequest) -> Result<CreateUser, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    match &req.name {
        Some(name) => check_name(&mut errors, name),
        None => errors.add("name", "Name is required"),
    }
    match &req.email {
        Some(email) => check_email(&mut errors, email),
        None => errors.add("email", "Email is required"),
    }
    match &req.password {
        Some(password) => check_password(&mut errors, password),
        None => errors.add("password", "Password is required"),
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    // All three are Some once the required checks pass.
    Ok(CreateUser {
        name: req.name.unwrap_or_default(),
        email: req.email.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    })
}

pub fn validate_update(req: &UpdateUserRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if let Some(name) = &req.name {
        check_name(&mut errors, name);
    }
    if let Some(email) = &req.email {
        check_email(&mut errors, email);
    }
    if let Some(password) = &req.password {
        check_password(&mut errors, password);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_login(req: LoginRequest) -> Result<Credentials, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    match &req.email {
        Some(email) => check_email(&mut errors, email),
        None => errors.add("email", "Email is required"),
    }
    match &req.password {
        Some(password) if !password.is_empty() => {}
        _ => errors.add("password", "Password is required"),
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(Credentials {
        email: req.email.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_req(name: &str, email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: Some(name.into()),
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    #[test]
    fn valid_create_passes_through() {
        let payload =
            validate_create(create_req("John Doe", "john@example.com", "securepass123"))
                .expect("payload should validate");
        assert_eq!(payload.name, "John Doe");
        assert_eq!(payload.email, "john@example.com");
        assert_eq!(payload.password, "securepass123");
    }

    #[test]
    fn empty_create_collects_all_required_errors() {
        let errors = validate_create(CreateUserRequest::default()).unwrap_err();
        assert_eq!(errors.get("name"), Some(&vec!["Name is required".into()]));
        assert_eq!(errors.get("email"), Some(&vec!["Email is required".into()]));
        assert_eq!(
            errors.get("password"),
            Some(&vec!["Password is required".into()])
        );
    }

    #[test]
    fn create_rejects_bad_email_syntax() {
        for email in ["invalid-email", "no@tld", "spa ce@example.com", "@example.com"] {
            let errors = validate_create(create_req("John", email, "securepass123")).unwrap_err();
            assert!(errors.get("email").is_some(), "{email} should be rejected");
        }
    }

    #[test]
    fn create_rejects_short_password() {
        let errors = validate_create(create_req("John", "john@example.com", "1234567")).unwrap_err();
        assert_eq!(
            errors.get("password"),
            Some(&vec!["Password must be at least 8 characters".into()])
        );
    }

    #[test]
    fn create_rejects_name_out_of_bounds() {
        let long = "x".repeat(101);
        for name in ["", long.as_str()] {
            let errors =
                validate_create(create_req(name, "john@example.com", "securepass123")).unwrap_err();
            assert!(errors.get("name").is_some());
        }
        // 100 chars is still fine
        let ok = "x".repeat(100);
        assert!(validate_create(create_req(&ok, "john@example.com", "securepass123")).is_ok());
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(validate_update(&UpdateUserRequest::default()).is_ok());
    }

    #[test]
    fn update_applies_per_field_rules_when_present() {
        let req = UpdateUserRequest {
            name: Some("".into()),
            email: Some("not-an-email".into()),
            password: Some("short".into()),
        };
        let errors = validate_update(&req).unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());
    }

    #[test]
    fn login_requires_non_empty_password() {
        let req = LoginRequest {
            email: Some("john@example.com".into()),
            password: Some("".into()),
        };
        let errors = validate_login(req).unwrap_err();
        assert_eq!(
            errors.get("password"),
            Some(&vec!["Password is required".into()])
        );
    }

    #[test]
    fn login_validates_email_syntax() {
        let req = LoginRequest {
            email: Some("nope".into()),
            password: Some("whatever".into()),
        };
        let errors = validate_login(req).unwrap_err();
        assert_eq!(errors.get("email"), Some(&vec!["Invalid email format".into()]));
    }

    #[test]
    fn errors_serialize_as_field_map() {
        let mut errors = ValidationErrors::default();
        errors.add("email", "Invalid email format");
        errors.add("email", "Email is required");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "email": ["Invalid email format", "Email is required"] })
        );
    }
}
