use crate::Profile;

use serde_json::json;

fn wire_profile() -> serde_json::Value {
    json!({
        "role": "admin",
        "user_id": "u1",
        "mydawa_id": "MD-001",
        "user_name": "jane wanjiru doe",
        "user_email": "jane@example.com"
    })
}

#[test]
fn given_wire_json_when_deserialized_then_maps_renamed_fields() {
    let profile: Profile = serde_json::from_value(wire_profile()).unwrap();

    assert_eq!(profile.external_id, "MD-001");
    assert_eq!(profile.name, "jane wanjiru doe");
    assert_eq!(profile.email, "jane@example.com");
}

#[test]
fn given_profile_when_serialized_then_uses_wire_names() {
    let profile: Profile = serde_json::from_value(wire_profile()).unwrap();

    let value = serde_json::to_value(&profile).unwrap();

    assert_eq!(value, wire_profile());
}

#[test]
fn given_multi_word_name_when_initials_then_first_two_uppercased() {
    let profile: Profile = serde_json::from_value(wire_profile()).unwrap();

    assert_eq!(profile.initials(), "JW");
}

#[test]
fn given_profiles_differing_in_one_field_when_compared_then_not_equal() {
    let a: Profile = serde_json::from_value(wire_profile()).unwrap();
    let mut b = a.clone();
    b.email = "other@example.com".to_string();

    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}
