//! BDD step definitions for status translation feature

use cucumber::{given, then, when};
use serde_json::json;

use homework_watch::error::TranslationError;
use homework_watch::status::{translate, HomeworkStatus};

use crate::world::WatchWorld;

#[given(expr = "a homework {string} with status {string}")]
fn homework_with_status(world: &mut WatchWorld, name: String, status: String) {
    world.homework = Some(json!({"homework_name": name, "status": status}));
}

#[given(expr = "a homework with status {string} and no name")]
fn homework_without_name(world: &mut WatchWorld, status: String) {
    world.homework = Some(json!({"status": status}));
}

#[given(expr = "a homework {string} with no status")]
fn homework_without_status(world: &mut WatchWorld, name: String) {
    world.homework = Some(json!({"homework_name": name}));
}

#[when("the homework is translated")]
fn translate_homework(world: &mut WatchWorld) {
    let homework = world.homework.as_ref().expect("homework not set");
    world.translation = Some(translate(homework));
}

#[then(expr = "the message should be {string}")]
fn message_is(world: &mut WatchWorld, expected: String) {
    let result = world.translation.as_ref().expect("no translation");
    assert_eq!(result.as_ref().unwrap(), &expected);
}

#[then(expr = "the message should end with the verdict for {string}")]
fn message_ends_with_verdict(world: &mut WatchWorld, code: String) {
    let status = HomeworkStatus::from_code(&code).expect("not a known status");
    let result = world.translation.as_ref().expect("no translation");
    assert!(result.as_ref().unwrap().ends_with(status.verdict()));
}

#[then("translating it again should give the same message")]
fn translation_is_idempotent(world: &mut WatchWorld) {
    let homework = world.homework.as_ref().expect("homework not set");
    let first = world.translation.clone().expect("no translation");
    assert_eq!(translate(homework), first);
}

#[then(expr = "translation should fail with unknown status {string}")]
fn fails_with_unknown_status(world: &mut WatchWorld, code: String) {
    let result = world.translation.clone().expect("no translation");
    assert_eq!(result, Err(TranslationError::UnknownStatus { code }));
}

#[then(expr = "translation should fail with missing field {string}")]
fn fails_with_missing_field(world: &mut WatchWorld, field: String) {
    match world.translation.clone().expect("no translation") {
        Err(TranslationError::MissingField { field: actual }) => assert_eq!(actual, field),
        other => panic!("expected MissingField, got {other:?}"),
    }
}
