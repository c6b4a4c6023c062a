//! BDD step definitions for Telegram delivery

use std::sync::Arc;

use cucumber::{given, then, when};

use homework_bot::config::TelegramConfig;
use homework_bot::notifier::send_message;
use homework_bot::telegram::TelegramNotifier;

use crate::steps::fakes::{FixedPostClient, UnreachableClient};
use crate::world::HomeworkBotWorld;

fn test_telegram_config() -> TelegramConfig {
    TelegramConfig {
        api_url: "https://api.telegram.org".to_string(),
        bot_token: "123:abc".to_string(),
        chat_id: "42".to_string(),
    }
}

#[given("a Telegram notifier with valid credentials")]
fn telegram_valid(world: &mut HomeworkBotWorld) {
    let http = Arc::new(FixedPostClient::new(200, r#"{"ok":true}"#));
    world.telegram_http = Some(Arc::clone(&http));
    world.notifier = Some(Box::new(TelegramNotifier::new(&test_telegram_config(), http)));
}

#[given("a Telegram notifier that returns an API error")]
fn telegram_api_error(world: &mut HomeworkBotWorld) {
    let http = Arc::new(FixedPostClient::new(
        400,
        r#"{"ok":false,"description":"Bad Request: chat not found"}"#,
    ));
    world.notifier = Some(Box::new(TelegramNotifier::new(&test_telegram_config(), http)));
}

#[given("a Telegram notifier that is unreachable")]
fn telegram_unreachable(world: &mut HomeworkBotWorld) {
    world.notifier = Some(Box::new(TelegramNotifier::new(
        &test_telegram_config(),
        Arc::new(UnreachableClient),
    )));
}

#[when(expr = "a message {string} is sent")]
async fn message_sent(world: &mut HomeworkBotWorld, text: String) {
    let notifier = world.notifier.as_ref().expect("notifier not set");
    world.notification_result = Some(notifier.notify(&text).await);
}

#[then("the notification should succeed")]
fn notification_succeeds(world: &mut HomeworkBotWorld) {
    let result = world.notification_result.as_ref().expect("no result");
    result.as_ref().unwrap();
}

#[then("the notification should fail with an error")]
fn notification_fails(world: &mut HomeworkBotWorld) {
    let result = world.notification_result.as_ref().expect("no result");
    assert!(result.is_err());
}

#[then("best-effort delivery reports the failure without an error")]
async fn best_effort_swallows(world: &mut HomeworkBotWorld) {
    let notifier = world.notifier.as_ref().expect("notifier not set");
    assert!(!send_message(&**notifier, "retry").await);
}

#[then(expr = "the Bot API should have received {string} for chat {string}")]
fn bot_api_received(world: &mut HomeworkBotWorld, text: String, chat_id: String) {
    let http = world.telegram_http.as_ref().expect("no recording client");
    let posted = http.posted.lock().unwrap();
    let (url, params) = posted.last().expect("nothing posted");
    assert!(url.ends_with("/bot123:abc/sendMessage"), "{url}");
    assert!(params.contains(&("chat_id".to_string(), chat_id)));
    assert!(params.contains(&("text".to_string(), text)));
}
