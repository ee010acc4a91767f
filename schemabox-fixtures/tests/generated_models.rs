//! Generated social network models running against the runtime.

use proptest::prelude::*;
use schemabox::prelude::*;
use schemabox::serde_json::{json, Value};
use schemabox::{FieldBox, ValidationErrorKind, Validator};
use schemabox_fixtures::social::{Circle, Medium, Post, User, UserEmail, Users};

const USER: &str = r#"{"updated_at":"2024-01-02T03:04:05Z","created_at":"2024-01-01T00:00:00Z","email":"ada@example.com","id":7}"#;

fn paths(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(|e| e.path.to_string()).collect()
}

fn user(email: &str, id: i64) -> Value {
    json!({
        "updated_at": "2024-01-02T03:04:05Z",
        "created_at": "2024-01-01T00:00:00Z",
        "email": email,
        "id": id,
    })
}

#[test]
fn user_round_trips_in_declaration_order() {
    let user = User::from_json(USER).unwrap();
    assert!(user.is_valid(), "{:?}", user.validate());
    assert_eq!(user.to_json(), USER);
    assert_eq!(User::from_json(&user.to_json()).unwrap(), user);
}

#[test]
fn accessors_read_and_write_private_fields() {
    let mut user = User::from_json(USER).unwrap();
    assert_eq!(user.email(), "ada@example.com");
    assert_eq!(*user.id(), 7.0);

    user.set_email("not an email".to_string());
    user.set_id(0.0);
    assert_eq!(user.email(), "not an email");
    assert_eq!(paths(&user.validate()), vec!["email", "id"]);
}

#[test]
fn missing_keys_and_null_become_defaults() {
    let circle = Circle::from_json(r#"{ "name": null }"#).unwrap();
    assert_eq!(circle.name(), "");
    assert!(!*circle.is_private());
    assert_eq!(*circle.id(), 0.0);

    let errors = circle.validate();
    assert_eq!(
        paths(&errors),
        vec!["name", "updated_at", "created_at", "id"]
    );
}

#[test]
fn array_errors_are_reported_per_element() {
    let users = Users::from_value(&json!([
        user("ada@example.com", 1),
        {
            "updated_at": "2024-01-02T03:04:05Z",
            "created_at": "yesterday",
            "email": "nope",
            "id": 0,
        },
        user("grace@example.com", 3),
    ]))
    .unwrap();

    assert_eq!(users.len(), 3);
    assert_eq!(
        paths(&users.validate()),
        vec!["[1].created_at", "[1].email", "[1].id"]
    );
}

#[test]
fn nested_models_prefix_their_paths() {
    let post = Post::from_value(&json!({
        "body": "hello",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "id": 1,
        "media": [
            { "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z", "id": 1, "url": "nope" }
        ],
        "author": user("ada", 1),
    }))
    .unwrap();

    assert_eq!(post.author.email(), "ada");
    assert_eq!(paths(&post.validate()), vec!["media[0].url", "author.email"]);
}

#[test]
fn nested_shape_errors_carry_their_path() {
    let err = Post::from_json(r#"{ "media": [{ "url": 5 }] }"#).unwrap_err();
    assert_eq!(err.to_string(), "expected string at media[0].url, found number");
}

#[test]
fn binding_runs_base_validators_first() {
    assert_eq!(
        UserEmail::validators().to_vec(),
        vec![Validator::email(), Validator::MaxLength(254)]
    );

    let long = format!("{}@example.com", "a".repeat(250));
    let user = User::from_value(&user(&long, 1)).unwrap();
    let errors = user.validate();
    assert_eq!(paths(&errors), vec!["email"]);
    assert!(matches!(
        errors[0].kind,
        ValidationErrorKind::MaxLength { expected: 254, .. }
    ));
}

#[test]
fn integer_fields_reject_values_outside_int32() {
    let user = User::from_value(&user("ada@example.com", 2_147_483_648)).unwrap();
    let errors = user.validate();
    assert_eq!(paths(&errors), vec!["id"]);
    assert!(matches!(errors[0].kind, ValidationErrorKind::Integer { .. }));
}

#[test]
fn out_of_range_number_is_a_json_error() {
    let err = User::from_json(r#"{ "id": 1e400 }"#).unwrap_err();
    assert!(matches!(err, ParseError::Json(_)));
}

#[test]
fn entity_set_replaces_every_field() {
    let mut post = Post::from_json("{}").unwrap();
    let mut author = User::from_json(USER).unwrap();
    post.author.set(author.clone());
    author.set_email("changed@example.com".to_string());

    assert_eq!(post.author.email(), "ada@example.com");

    let mut media = post.media.clone();
    media.push(Medium::from_json("{}").unwrap());
    Field::set(&mut post.media, media);
    assert_eq!(post.media.len(), 1);
}

proptest! {
    #[test]
    fn prop_valid_users_round_trip(
        local in "[a-z]{1,12}",
        domain in "[a-z]{1,12}",
        id in 1i64..=i64::from(i32::MAX),
    ) {
        let raw = user(&format!("{local}@{domain}.com"), id);
        let user = User::from_value(&raw).unwrap();
        prop_assert!(user.is_valid());
        prop_assert_eq!(user.serialize(), raw);
    }
}
