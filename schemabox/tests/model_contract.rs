//! Behavior of models written in the shape the code generator emits.

use proptest::prelude::*;
use schemabox::serde_json::{self, json, Map, Value};
use schemabox::{
    prefix_key, ArrayOf, Field, FieldBox, IntKind, IntegerBox, Model, ObjectFields, ParseError,
    Shape, StringBox, StringKind, Validate, ValidationError, ValidationErrorKind, Validator,
};

macro_rules! field_box {
    ($name:ident, $inner:ty, $kind:ty, [$($validator:expr),* $(,)?]) => {
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name($inner);

        impl FieldBox for $name {
            type Kind = $kind;
            const VALIDATORS: &'static [Validator] = &[$($validator),*];

            fn wrap(inner: $inner) -> Self {
                $name(inner)
            }

            fn inner(&self) -> &$inner {
                &self.0
            }

            fn inner_mut(&mut self) -> &mut $inner {
                &mut self.0
            }
        }
    };
}

field_box!(ID, IntegerBox, IntKind, []);
field_box!(CreatedAt, StringBox, StringKind, [Validator::datetime()]);
field_box!(ImageURL, StringBox, StringKind, [Validator::uri()]);
field_box!(Email, StringBox, StringKind, [Validator::email()]);
field_box!(PostBody, StringBox, StringKind, [Validator::MaxLength(1000)]);

#[derive(Debug, Clone, PartialEq)]
pub struct UserEmail(StringBox);

impl FieldBox for UserEmail {
    type Kind = <Email as FieldBox>::Kind;
    const VALIDATORS: &'static [Validator] = &[Validator::MaxLength(16)];
    const INHERITED: &'static [Validator] = <Email as FieldBox>::VALIDATORS;

    fn wrap(inner: StringBox) -> Self {
        UserEmail(inner)
    }

    fn inner(&self) -> &StringBox {
        &self.0
    }

    fn inner_mut(&mut self) -> &mut StringBox {
        &mut self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Medium {
    id: ID,
    url: ImageURL,
}

impl Medium {
    pub fn id(&self) -> &<ID as Field>::Raw {
        Field::get(&self.id)
    }

    pub fn set_id(&mut self, value: <ID as Field>::Raw) {
        Field::set(&mut self.id, value);
    }

    pub fn url(&self) -> &<ImageURL as Field>::Raw {
        Field::get(&self.url)
    }

    pub fn set_url(&mut self, value: <ImageURL as Field>::Raw) {
        Field::set(&mut self.url, value);
    }
}

impl Validate for Medium {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        errors.extend(prefix_key("id", Validate::validate(&self.id)));
        errors.extend(prefix_key("url", Validate::validate(&self.url)));
        errors
    }
}

impl Model for Medium {
    const SHAPE: Shape = Shape::Object;

    fn from_value(raw: &Value) -> Result<Self, ParseError> {
        let fields = ObjectFields::new(raw)?;
        Ok(Self {
            id: fields.field("id")?,
            url: fields.field("url")?,
        })
    }

    fn serialize(&self) -> Value {
        let mut object = Map::new();
        object.insert("id".to_owned(), Model::serialize(&self.id));
        object.insert("url".to_owned(), Model::serialize(&self.url));
        Value::Object(object)
    }
}

impl Field for Medium {
    type Raw = Self;

    fn get(&self) -> &Self {
        self
    }

    fn set(&mut self, raw: Self) {
        *self = raw;
    }
}

pub type Media = ArrayOf<Medium>;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    created_at: CreatedAt,
    email: UserEmail,
    id: ID,
}

impl User {
    pub fn email(&self) -> &<UserEmail as Field>::Raw {
        Field::get(&self.email)
    }

    pub fn set_email(&mut self, value: <UserEmail as Field>::Raw) {
        Field::set(&mut self.email, value);
    }
}

impl Validate for User {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        errors.extend(prefix_key("created_at", Validate::validate(&self.created_at)));
        errors.extend(prefix_key("email", Validate::validate(&self.email)));
        errors.extend(prefix_key("id", Validate::validate(&self.id)));
        errors
    }
}

impl Model for User {
    const SHAPE: Shape = Shape::Object;

    fn from_value(raw: &Value) -> Result<Self, ParseError> {
        let fields = ObjectFields::new(raw)?;
        Ok(Self {
            created_at: fields.field("created_at")?,
            email: fields.field("email")?,
            id: fields.field("id")?,
        })
    }

    fn serialize(&self) -> Value {
        let mut object = Map::new();
        object.insert("created_at".to_owned(), Model::serialize(&self.created_at));
        object.insert("email".to_owned(), Model::serialize(&self.email));
        object.insert("id".to_owned(), Model::serialize(&self.id));
        Value::Object(object)
    }
}

impl Field for User {
    type Raw = Self;

    fn get(&self) -> &Self {
        self
    }

    fn set(&mut self, raw: Self) {
        *self = raw;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    body: PostBody,
    id: ID,
    pub media: Media,
    pub author: User,
}

impl Post {
    pub fn body(&self) -> &<PostBody as Field>::Raw {
        Field::get(&self.body)
    }

    pub fn set_body(&mut self, value: <PostBody as Field>::Raw) {
        Field::set(&mut self.body, value);
    }
}

impl Validate for Post {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        errors.extend(prefix_key("body", Validate::validate(&self.body)));
        errors.extend(prefix_key("id", Validate::validate(&self.id)));
        errors.extend(prefix_key("media", Validate::validate(&self.media)));
        errors.extend(prefix_key("author", Validate::validate(&self.author)));
        errors
    }
}

impl Model for Post {
    const SHAPE: Shape = Shape::Object;

    fn from_value(raw: &Value) -> Result<Self, ParseError> {
        let fields = ObjectFields::new(raw)?;
        Ok(Self {
            body: fields.field("body")?,
            id: fields.field("id")?,
            media: fields.field("media")?,
            author: fields.field("author")?,
        })
    }

    fn serialize(&self) -> Value {
        let mut object = Map::new();
        object.insert("body".to_owned(), Model::serialize(&self.body));
        object.insert("id".to_owned(), Model::serialize(&self.id));
        object.insert("media".to_owned(), Model::serialize(&self.media));
        object.insert("author".to_owned(), Model::serialize(&self.author));
        Value::Object(object)
    }
}

fn paths(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(|e| e.path.to_string()).collect()
}

#[test]
fn test_missing_keys_become_defaults() {
    let user = User::from_json("{}").unwrap();
    assert_eq!(user.email(), "");
    assert_eq!(user.serialize(), json!({ "created_at": "", "email": "", "id": 0 }));
}

#[test]
fn test_malformed_or_non_object_input_fails() {
    assert!(matches!(User::from_json("{"), Err(ParseError::Json(_))));
    assert!(matches!(User::from_json("[]"), Err(ParseError::Shape { .. })));
    assert!(matches!(Media::from_json("{}"), Err(ParseError::Shape { .. })));
}

#[test]
fn test_wrong_field_type_reports_nested_path() {
    let err = Post::from_json(r#"{ "author": { "id": "seven" } }"#).unwrap_err();
    assert_eq!(err.to_string(), "expected integer at author.id, found string");
}

#[test]
fn test_validate_collects_one_error_per_violated_field() {
    let user = User::from_json(r#"{ "created_at": "yesterday", "email": "nope", "id": 1.5 }"#)
        .unwrap();
    let errors = user.validate();
    assert_eq!(paths(&errors), vec!["created_at", "email", "id"]);
    assert!(matches!(errors[2].kind, ValidationErrorKind::Integer { .. }));
}

#[test]
fn test_binding_applies_box_then_field_validators() {
    let mut user = User::from_json(r#"{ "email": "someone@example.com" }"#).unwrap();
    let errors = user.validate();
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[1].kind, ValidationErrorKind::MaxLength { expected: 16, .. }));

    user.set_email("a@b.co".to_string());
    assert!(user.validate().iter().all(|e| e.path.to_string() != "email"));
}

#[test]
fn test_array_reports_only_the_invalid_element() {
    let media = Media::from_json(
        r#"[
            { "id": 1, "url": "https://example.com/a.png" },
            { "id": 2, "url": "not a uri" },
            { "id": 3, "url": "https://example.com/c.png" }
        ]"#,
    )
    .unwrap();
    let errors = media.validate();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "[1].url: \"not a uri\" is not a valid uri");
}

#[test]
fn test_nested_errors_are_located() {
    let post = Post::from_json(
        r#"{
            "body": "hello",
            "id": 9,
            "media": [{ "id": 1, "url": "ftp://files" }, { "id": 2.5, "url": "x" }],
            "author": { "created_at": "2016-05-01T12:00:00Z", "email": "bad", "id": 4 }
        }"#,
    )
    .unwrap();
    let errors = post.validate();
    assert_eq!(
        paths(&errors),
        vec!["media[1].id", "media[1].url", "author.email"]
    );
}

#[test]
fn test_serialize_emits_unwrapped_values_and_round_trips() {
    let text = r#"{
        "body": "hello",
        "id": 9,
        "media": [{ "id": 1, "url": "https://example.com/a.png" }],
        "author": { "created_at": "2016-05-01T12:00:00Z", "email": "a@b.co", "id": 4 }
    }"#;
    let post = Post::from_json(text).unwrap();
    let expected: Value = serde_json::from_str(text).unwrap();
    assert_eq!(post.serialize(), expected);
    assert_eq!(Post::from_json(&post.to_json()).unwrap(), post);
    assert!(post.is_valid());
}

#[test]
fn test_public_members_and_setters_skip_validation() {
    let mut post = Post::from_json("{}").unwrap();
    post.set_body("x".repeat(1001));
    post.media.push(Medium::from_json(r#"{ "url": "nope" }"#).unwrap());
    post.author.set_email(String::new());
    assert_eq!(post.body().len(), 1001);
    assert_eq!(
        paths(&post.validate()),
        vec!["body", "media[0].url", "author.created_at", "author.email"]
    );
}

#[test]
fn test_entity_field_accessors_expose_self() {
    let mut medium = Medium::from_json(r#"{ "id": 3 }"#).unwrap();
    medium.set_id(4.0);
    medium.set_url("https://example.com".to_string());
    assert_eq!(*medium.id(), 4.0);
    assert_eq!(Field::get(&medium).url(), "https://example.com");
}

proptest! {
    #[test]
    fn prop_array_errors_follow_element_order(ids in proptest::collection::vec(-5i32..5, 0..12)) {
        let items: Vec<Value> = ids
            .iter()
            .map(|&id| {
                let raw = if id < 0 { f64::from(id) + 0.5 } else { f64::from(id) };
                json!({ "id": raw, "url": "a:b" })
            })
            .collect();
        let media = Media::from_value(&Value::Array(items)).unwrap();
        let expected: Vec<String> = ids
            .iter()
            .enumerate()
            .filter(|(_, id)| **id < 0)
            .map(|(i, _)| format!("[{}].id", i))
            .collect();
        prop_assert_eq!(paths(&media.validate()), expected);
    }
}
