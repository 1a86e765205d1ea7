use super::*;

fn user() -> User {
    User {
        id: "u1".to_owned(),
        full_name: "Alice".to_owned(),
        email: "alice@example.com".to_owned(),
        country: None,
        country_code: None,
        phone: None,
        date_of_birth: None,
        gender: None,
        date_joined: None,
        avatar_url: None,
    }
}

#[test]
fn default_is_signed_out_and_not_loading() {
    let state = AuthState::default();
    assert_eq!(state.user, None);
    assert!(!state.loading);
    assert_eq!(state.user_id(), None);
}

#[test]
fn signed_in_exposes_user_id() {
    let state = AuthState::signed_in(user());
    assert_eq!(state.user_id(), Some("u1"));
    assert_eq!(state.greeting(), "Signed in as Alice");
}

#[test]
fn greeting_reflects_loading() {
    let state = AuthState { user: None, loading: true };
    assert_eq!(state.greeting(), "Loading...");
    assert_eq!(AuthState::signed_out().greeting(), "Not signed in");
}
