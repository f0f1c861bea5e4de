use crate::{Identity, Profile};

fn profile_named(name: &str) -> Profile {
    Profile {
        role: "analyst".to_string(),
        user_id: "u1".to_string(),
        external_id: "MD-1".to_string(),
        name: name.to_string(),
        email: "jane@example.com".to_string(),
    }
}

#[test]
fn given_profile_when_initials_then_taken_from_name() {
    let identity = Identity::new("u1");

    assert_eq!(identity.initials(Some(&profile_named("jane doe"))), "JD");
}

#[test]
fn given_no_profile_when_initials_then_first_two_id_chars_uppercased() {
    let identity = Identity::new("kamau42");

    assert_eq!(identity.initials(None), "KA");
}

#[test]
fn given_blank_profile_name_when_initials_then_falls_back_to_id() {
    let identity = Identity::new("u1");

    assert_eq!(identity.initials(Some(&profile_named("   "))), "U1");
}

#[test]
fn given_single_char_id_when_initials_then_single_letter() {
    assert_eq!(Identity::new("x").initials(None), "X");
}

#[test]
fn given_empty_id_and_no_profile_when_initials_then_placeholder() {
    assert_eq!(Identity::new("").initials(None), "U");
}
