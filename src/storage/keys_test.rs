use super::*;

#[test]
fn preference_key_is_namespaced_by_kind_and_user() {
    assert_eq!(preference_key(PreferenceKind::Theme, Some("42")), "settings:theme:42");
    assert_eq!(
        preference_key(PreferenceKind::Notifications, Some("42")),
        "settings:notifications:42"
    );
    assert_eq!(preference_key(PreferenceKind::Privacy, Some("7")), "settings:privacy:7");
}

#[test]
fn preference_key_uses_guest_owner_without_user() {
    assert_eq!(preference_key(PreferenceKind::Theme, None), "settings:theme:guest");
    assert_eq!(preference_key(PreferenceKind::Theme, Some("  ")), "settings:theme:guest");
}

#[test]
fn different_users_never_share_a_key() {
    for kind in PreferenceKind::ALL {
        assert_ne!(preference_key(kind, Some("alice")), preference_key(kind, Some("bob")));
    }
}
