//! Form validation for the login and settings views.
//!
//! Each validator returns the normalized input on success or the message the
//! view shows inline, so pages never hold their own rule logic.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use crate::util::password;

pub const DELETE_CONFIRMATION: &str = "DELETE";
pub const MIN_DELETE_PASSWORD_LENGTH: usize = 6;
/// Avatar uploads are capped at 800K.
pub const MAX_AVATAR_BYTES: u64 = 800 * 1024;
pub const AVATAR_ACCEPT: &str = "image/png, image/gif, image/jpeg";
const AVATAR_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "gif", "png"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

pub fn validate_login(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required");
    }
    if password.is_empty() {
        return Err("Password is required");
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

pub fn validate_registration(
    full_name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<Registration, &'static str> {
    let full_name = full_name.trim();
    if full_name.is_empty() {
        return Err("Name is required");
    }
    let email = email.trim();
    if !is_email(email) {
        return Err("Invalid Email");
    }
    if password.is_empty() || confirm_password.is_empty() {
        return Err("Password is required");
    }
    if password != confirm_password {
        return Err("Passwords do not match");
    }
    if password::strength(password).is_weak() {
        return Err("Password is too weak.");
    }
    Ok(Registration { full_name: full_name.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

/// Profile form: name required, email must look like an address.
pub fn validate_profile(full_name: &str, email: &str) -> Result<(String, String), &'static str> {
    let full_name = full_name.trim();
    if full_name.is_empty() {
        return Err("Name is required");
    }
    let email = email.trim();
    if !is_email(email) {
        return Err("Invalid Email");
    }
    Ok((full_name.to_owned(), email.to_owned()))
}

pub fn validate_password_change(current: &str, new: &str, confirm: &str) -> Result<(), &'static str> {
    if current.is_empty() || new.is_empty() || confirm.is_empty() {
        return Err("All password fields are required");
    }
    if new != confirm {
        return Err("Passwords must match");
    }
    Ok(())
}

pub fn validate_account_deletion(password: &str, confirmation: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Please enter your password.");
    }
    if password.trim().is_empty() {
        return Err("Password cannot be empty.");
    }
    if password.chars().count() < MIN_DELETE_PASSWORD_LENGTH {
        return Err("Password must be at least 6 characters.");
    }
    if confirmation.trim() != DELETE_CONFIRMATION {
        return Err("Type DELETE to confirm.");
    }
    Ok(())
}

/// Avatar file: JPG, GIF or PNG by extension, at most `MAX_AVATAR_BYTES`.
pub fn validate_avatar(file_name: &str, size: u64) -> Result<(), &'static str> {
    let extension = file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    if !extension.is_some_and(|ext| AVATAR_EXTENSIONS.contains(&ext.as_str())) {
        return Err("Allowed: JPG, GIF or PNG.");
    }
    if size == 0 {
        return Err("The selected file is empty.");
    }
    if size > MAX_AVATAR_BYTES {
        return Err("Max size of 800K.");
    }
    Ok(())
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !value.contains(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}
