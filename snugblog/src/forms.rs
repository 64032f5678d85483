//! Submitted forms and their field validation.
//!
//! Each form checks only what it can see on its own; uniqueness of usernames
//! and emails is enforced by the store and reported through the same
//! [`ValidationError`] shape by the service.

use serde::Deserialize;

use crate::{
    errors::{ValidationError, ValidationIssue, ValidationResult},
    validators::{ALLOWED_PICTURE_EXTENSIONS, is_valid_email, is_valid_username, picture_extension},
};

const USERNAME_MIN: usize = 2;
const USERNAME_MAX: usize = 20;

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> ValidationResult<()> {
        let mut issues = Vec::new();
        check_username(&self.username, &mut issues);
        check_email(&self.email, &mut issues);
        required("password", &self.password, &mut issues);
        if self.confirm_password != self.password {
            issues.push(ValidationIssue::new(
                "confirm_password",
                "validation.equal_to",
                "Field must be equal to password.",
            ));
        }
        finish(issues)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

impl LoginForm {
    pub fn validate(&self) -> ValidationResult<()> {
        let mut issues = Vec::new();
        check_email(&self.email, &mut issues);
        required("password", &self.password, &mut issues);
        finish(issues)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAccountForm {
    pub username: String,
    pub email: String,
    /// Filename of an uploaded picture, if one was sent.
    #[serde(default)]
    pub picture: Option<String>,
}

impl UpdateAccountForm {
    /// Validates the form and returns the picture extension when a picture was sent.
    pub fn validate(&self) -> ValidationResult<Option<String>> {
        let mut issues = Vec::new();
        check_username(&self.username, &mut issues);
        check_email(&self.email, &mut issues);
        let extension = match &self.picture {
            Some(filename) => {
                let extension = picture_extension(filename);
                if extension.is_none() {
                    issues.push(ValidationIssue::new(
                        "picture",
                        "validation.file_allowed",
                        format!(
                            "File does not have an approved extension: {}",
                            ALLOWED_PICTURE_EXTENSIONS.join(", ")
                        ),
                    ));
                }
                extension
            }
            None => None,
        };
        finish(issues).map(|()| extension)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
}

impl PostForm {
    pub fn validate(&self) -> ValidationResult<()> {
        let mut issues = Vec::new();
        required("title", &self.title, &mut issues);
        required("content", &self.content, &mut issues);
        finish(issues)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentForm {
    pub content: String,
}

impl CommentForm {
    pub fn validate(&self) -> ValidationResult<()> {
        let mut issues = Vec::new();
        required("content", &self.content, &mut issues);
        finish(issues)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageForm {
    pub content: String,
}

impl MessageForm {
    pub fn validate(&self) -> ValidationResult<()> {
        let mut issues = Vec::new();
        required("content", &self.content, &mut issues);
        finish(issues)
    }
}

fn required(field: &str, value: &str, issues: &mut Vec<ValidationIssue>) -> bool {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::new(field, "validation.required", "This field is required."));
        return false;
    }
    true
}

fn check_username(value: &str, issues: &mut Vec<ValidationIssue>) {
    if !required("username", value, issues) {
        return;
    }
    let len = value.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        issues.push(ValidationIssue::new(
            "username",
            "validation.length",
            format!("Field must be between {USERNAME_MIN} and {USERNAME_MAX} characters long."),
        ));
    } else if !is_valid_username(value) {
        issues.push(ValidationIssue::new(
            "username",
            "validation.regex",
            "Username may not contain spaces or slashes.",
        ));
    }
}

fn check_email(value: &str, issues: &mut Vec<ValidationIssue>) {
    if required("email", value, issues) && !is_valid_email(value) {
        issues.push(ValidationIssue::new("email", "validation.email", "Invalid email address."));
    }
}

fn finish(issues: Vec<ValidationIssue>) -> ValidationResult<()> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(issues))
    }
}
