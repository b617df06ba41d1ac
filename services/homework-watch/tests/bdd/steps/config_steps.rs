//! BDD step definitions for startup configuration feature

use std::collections::HashMap;

use cucumber::{given, then, when};

use homework_watch::config::Config;
use homework_watch::WatchError;

use crate::world::WatchWorld;

#[given("a default configuration")]
fn default_configuration(world: &mut WatchWorld) {
    world.config = Some(Config::default());
}

#[given(expr = "a configuration file containing {string}")]
fn configuration_file(world: &mut WatchWorld, content: String) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, content).expect("failed to write config");
    world.config = Some(homework_watch::load_config(&path).expect("config should load"));
}

#[when(expr = "the environment provides {string}")]
fn environment_provides(world: &mut WatchWorld, assignments: String) {
    let vars: HashMap<String, String> = assignments
        .split(',')
        .filter_map(|pair| pair.trim().split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = world.config.as_mut().expect("config not set");
    config.resolve_secrets_with(|name| vars.get(name).cloned());
}

#[when("the credentials are checked")]
fn check_credentials(world: &mut WatchWorld) {
    let config = world.config.as_ref().expect("config not set");
    world.config_check = Some(config.check_credentials());
}

#[then("the credentials should be accepted")]
fn credentials_accepted(world: &mut WatchWorld) {
    let result = world.config_check.as_ref().expect("credentials not checked");
    result.as_ref().unwrap();
}

#[then(expr = "startup should be refused naming {string}")]
fn startup_refused(world: &mut WatchWorld, variable: String) {
    match world.config_check.as_ref().expect("credentials not checked") {
        Err(WatchError::Config(msg)) => assert!(msg.contains(&variable), "{msg}"),
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

#[then(expr = "the polling interval should be {int} seconds")]
fn polling_interval(world: &mut WatchWorld, seconds: u64) {
    let config = world.config.as_ref().expect("config not set");
    assert_eq!(config.polling.interval.as_secs(), seconds);
}
