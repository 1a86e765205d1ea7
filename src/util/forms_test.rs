use super::*;

#[test]
fn login_trims_email_and_requires_both_fields() {
    assert_eq!(
        validate_login("  john@example.com ", "pw"),
        Ok(Credentials { email: "john@example.com".to_owned(), password: "pw".to_owned() })
    );
    assert_eq!(validate_login("   ", "pw"), Err("Email is required"));
    assert_eq!(validate_login("a@b.c", ""), Err("Password is required"));
}

#[test]
fn registration_checks_match_before_strength() {
    assert_eq!(validate_registration("A", "a@b.co", "Secret#123", "Secret#124"), Err("Passwords do not match"));
    assert_eq!(validate_registration("A", "a@b.co", "abcdefgh", "abcdefgh"), Err("Password is too weak."));
    assert!(validate_registration("A", "a@b.co", "Abcdefg1", "Abcdefg1").is_ok());
}

#[test]
fn registration_requires_name_and_valid_email() {
    assert_eq!(validate_registration(" ", "a@b.co", "x", "x"), Err("Name is required"));
    assert_eq!(validate_registration("A", "not-an-email", "x", "x"), Err("Invalid Email"));
    assert_eq!(validate_registration("A", "a@b", "x", "x"), Err("Invalid Email"));
}

#[test]
fn profile_validation_normalizes_fields() {
    assert_eq!(
        validate_profile(" Jane ", "jane@example.org "),
        Ok(("Jane".to_owned(), "jane@example.org".to_owned()))
    );
    assert_eq!(validate_profile("Jane", "jane@.org"), Err("Invalid Email"));
}

#[test]
fn password_change_requires_matching_new_passwords() {
    assert_eq!(validate_password_change("old", "new1", "new2"), Err("Passwords must match"));
    assert_eq!(validate_password_change("", "n", "n"), Err("All password fields are required"));
    assert_eq!(validate_password_change("old", "n", "n"), Ok(()));
}

#[test]
fn account_deletion_rules() {
    assert_eq!(validate_account_deletion("", "DELETE"), Err("Please enter your password."));
    assert_eq!(validate_account_deletion("      ", "DELETE"), Err("Password cannot be empty."));
    assert_eq!(validate_account_deletion("12345", "DELETE"), Err("Password must be at least 6 characters."));
    assert_eq!(validate_account_deletion("123456", "delete"), Err("Type DELETE to confirm."));
    assert_eq!(validate_account_deletion("123456", "DELETE"), Ok(()));
}

#[test]
fn avatar_must_be_small_jpg_gif_or_png() {
    assert_eq!(validate_avatar("me.PNG", 1024), Ok(()));
    assert_eq!(validate_avatar("me.jpeg", MAX_AVATAR_BYTES), Ok(()));
    assert_eq!(validate_avatar("me.gif", MAX_AVATAR_BYTES + 1), Err("Max size of 800K."));
    assert_eq!(validate_avatar("me.webp", 10), Err("Allowed: JPG, GIF or PNG."));
    assert_eq!(validate_avatar("noextension", 10), Err("Allowed: JPG, GIF or PNG."));
    assert_eq!(validate_avatar("me.png", 0), Err("The selected file is empty."));
}
