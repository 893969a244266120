//! Slash command scenarios
//!
//! Run with: cargo test -p integration-tests --test command_tests

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use repbot_core::entities::ScoreEvent;
use repbot_core::events::ReactionKind::Added;
use repbot_core::traits::{RuleRepository, ScoreRepository};
use repbot_service::services::dispatcher::{
    CONFIGURED_MESSAGE, GUILD_ONLY_MESSAGE, HELLO_MESSAGE, HELP_MESSAGE, NOT_ALLOWED_MESSAGE,
    UNKNOWN_COMMAND_MESSAGE,
};
use repbot_service::services::error::GENERIC_FAILURE_MESSAGE;
use repbot_service::ServiceError;

use integration_tests::{configure, reaction, server, user, CommandFixture, TestBot};

const NOT_CONFIGURED: &str =
    "Server rules are not set up. Use `/configure` command to set up rules first.";
const ADDED: &str = "User was added to the allowed users list.";

fn validation_message(err: ServiceError) -> String {
    match err {
        ServiceError::Validation(msg) => msg,
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ============================================================================
// hello / help / unknown
// ============================================================================

#[tokio::test]
async fn test_static_replies_need_no_setup() {
    let bot = TestBot::new();
    let s1 = server();
    let stranger = user("stranger");

    let hello = CommandFixture::new("hello", s1, &stranger).build();
    assert_eq!(bot.reply(&hello).await.as_deref(), Some(HELLO_MESSAGE));

    let help = CommandFixture::direct("help", &stranger).build();
    assert_eq!(bot.reply(&help).await.as_deref(), Some(HELP_MESSAGE));
}

#[tokio::test]
async fn test_unknown_command() {
    let bot = TestBot::new();
    let cmd = CommandFixture::new("ping", server(), &user("alice")).build();
    assert_eq!(bot.reply(&cmd).await.as_deref(), Some(UNKNOWN_COMMAND_MESSAGE));
}

#[tokio::test]
async fn test_server_commands_rejected_in_direct_messages() {
    let bot = TestBot::new();
    let cmd = CommandFixture::direct("top", &user("alice")).integer("count", 5).build();
    assert_eq!(bot.reply(&cmd).await.as_deref(), Some(GUILD_ONLY_MESSAGE));
}

// ============================================================================
// configure
// ============================================================================

#[tokio::test]
async fn test_owner_bootstraps_rules() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");

    let reply = bot.reply(&configure(s1, &owner, "alice, bob", "👍=1,👎=-1")).await;
    assert_eq!(reply.as_deref(), Some(CONFIGURED_MESSAGE));

    let rule = bot.rules.get(s1).unwrap();
    assert!(rule.allowed_users.contains("alice"));
    assert!(rule.allowed_users.contains("bob"));
    assert_eq!(rule.emoji_scores.get("👎"), Some(&-1));
}

#[tokio::test]
async fn test_configure_unions_users_and_replaces_scores() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");

    bot.reply(&configure(s1, &owner, "alice", "👍=1,👎=-1")).await;
    bot.reply(&configure(s1, &owner, "bob", "🔥=3")).await;

    let rule = bot.rules.get(s1).unwrap();
    assert_eq!(rule.allowed_users.len(), 2);
    assert!(rule.allowed_users.contains("alice") && rule.allowed_users.contains("bob"));
    assert_eq!(rule.emoji_scores.len(), 1);
    assert_eq!(rule.emoji_scores.get("🔥"), Some(&3));
}

#[tokio::test]
async fn test_allowed_user_can_configure() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");
    let alice = user("alice");

    bot.reply(&configure(s1, &owner, "alice", "👍=1")).await;

    let cmd = CommandFixture::new("configure", s1, &alice)
        .owner(&owner)
        .string("allowed_users", "carol")
        .string("emoji_scores", "👍=2")
        .build();
    assert_eq!(bot.reply(&cmd).await.as_deref(), Some(CONFIGURED_MESSAGE));
    assert_eq!(bot.rules.get(s1).unwrap().emoji_scores.get("👍"), Some(&2));
}

#[tokio::test]
async fn test_stranger_cannot_bootstrap_rules() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");
    let mallory = user("mallory");

    let cmd = CommandFixture::new("configure", s1, &mallory)
        .owner(&owner)
        .string("allowed_users", "mallory")
        .string("emoji_scores", "👍=100")
        .build();

    assert_eq!(bot.reply(&cmd).await, None);
    assert!(bot.rules.is_empty());
}

#[tokio::test]
async fn test_malformed_configure_leaves_rule_untouched() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");

    bot.reply(&configure(s1, &owner, "alice", "👍=1")).await;
    let before = bot.rules.get(s1).unwrap();

    let err = bot
        .dispatch(&configure(s1, &owner, "bob", "👍=1,😄=abc"))
        .await
        .unwrap_err();
    assert_eq!(
        validation_message(err),
        "Invalid emoji score `😄=abc`: `abc` is not an integer"
    );

    let err = bot.dispatch(&configure(s1, &owner, "bob", "👍")).await.unwrap_err();
    assert_eq!(validation_message(err), "Invalid emoji score `👍`: expected emoji=score");

    let err = bot.dispatch(&configure(s1, &owner, " , ", "👍=1")).await.unwrap_err();
    assert_eq!(validation_message(err), "allowed_users must not be empty");

    assert_eq!(bot.rules.get(s1).unwrap(), before);
}

#[tokio::test]
async fn test_validation_errors_are_replied_verbatim() {
    let bot = TestBot::new();
    let err = bot
        .dispatch(&configure(server(), &user("owner"), "alice", "=5"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Invalid emoji score `=5`: emoji is empty");
}

// ============================================================================
// add_allowed_user
// ============================================================================

#[tokio::test]
async fn test_add_allowed_user_without_rules() {
    let bot = TestBot::new();
    let s1 = server();
    let alice = user("alice");

    let cmd = CommandFixture::new("add_allowed_user", s1, &alice)
        .string("allowed_users", "bob")
        .build();
    assert_eq!(bot.reply(&cmd).await.as_deref(), Some(NOT_CONFIGURED));
    assert!(bot.rules.is_empty());

    // The store itself never creates a rule either
    let outcome = bot.rules.add_allowed_user(s1, "bob").await.unwrap();
    assert!(!outcome.is_added());
    assert!(bot.rules.is_empty());
}

#[tokio::test]
async fn test_add_allowed_users_from_list() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");
    let alice = user("alice");

    bot.reply(&configure(s1, &owner, "alice", "👍=1")).await;

    let cmd = CommandFixture::new("add_allowed_user", s1, &alice)
        .string("allowed_users", "bob, carol,alice")
        .build();
    assert_eq!(bot.reply(&cmd).await.as_deref(), Some(ADDED));

    let rule = bot.rules.get(s1).unwrap();
    assert_eq!(rule.allowed_users.len(), 3);
    assert!(rule.allowed_users.contains("carol"));
}

#[tokio::test]
async fn test_added_user_can_score() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");
    let alice = user("alice");
    let carol = user("carol");
    let bob = user("bob");

    bot.reply(&configure(s1, &owner, "alice", "👍=1")).await;
    let cmd = CommandFixture::new("add_allowed_user", s1, &alice)
        .string("allowed_users", "carol")
        .build();
    bot.reply(&cmd).await;

    assert!(bot.react(&reaction(s1, &carol, &bob, "👍", Added)).await.is_applied());
}

// ============================================================================
// Denial policy
// ============================================================================

#[tokio::test]
async fn test_silent_denial() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");
    let mallory = user("mallory");

    bot.reply(&configure(s1, &owner, "alice", "👍=1")).await;

    let cmd = CommandFixture::new("top", s1, &mallory).integer("count", 3).build();
    assert_eq!(bot.reply(&cmd).await, None);
}

#[tokio::test]
async fn test_reply_denial() {
    let bot = TestBot::replying();
    let s1 = server();
    let owner = user("owner");
    let mallory = user("mallory");

    bot.reply(&configure(s1, &owner, "alice", "👍=1")).await;

    let cmd = CommandFixture::new("top", s1, &mallory).integer("count", 3).build();
    assert_eq!(bot.reply(&cmd).await.as_deref(), Some(NOT_ALLOWED_MESSAGE));

    let cmd = CommandFixture::new("add_allowed_user", s1, &mallory)
        .string("allowed_users", "mallory")
        .build();
    assert_eq!(bot.reply(&cmd).await.as_deref(), Some(NOT_ALLOWED_MESSAGE));
    assert!(!bot.rules.get(s1).unwrap().allowed_users.contains("mallory"));
}

#[tokio::test]
async fn test_owner_only_admin() {
    let bot = TestBot::owner_only();
    let s1 = server();
    let owner = user("owner");
    let alice = user("alice");

    bot.reply(&configure(s1, &owner, "alice", "👍=1")).await;

    // Allowed users keep scoring rights but lose admin rights
    let cmd = CommandFixture::new("configure", s1, &alice)
        .owner(&owner)
        .string("allowed_users", "bob")
        .string("emoji_scores", "👍=9")
        .build();
    assert_eq!(bot.reply(&cmd).await.as_deref(), Some(NOT_ALLOWED_MESSAGE));

    let cmd = CommandFixture::new("add_allowed_user", s1, &alice)
        .owner(&owner)
        .string("allowed_users", "bob")
        .build();
    assert_eq!(bot.reply(&cmd).await.as_deref(), Some(NOT_ALLOWED_MESSAGE));

    let cmd = CommandFixture::new("add_allowed_user", s1, &owner)
        .owner(&owner)
        .string("allowed_users", "bob")
        .build();
    assert_eq!(bot.reply(&cmd).await.as_deref(), Some(ADDED));

    let rule = bot.rules.get(s1).unwrap();
    assert!(rule.allowed_users.contains("bob"));
    assert_eq!(rule.emoji_scores.get("👍"), Some(&1));
}

// ============================================================================
// top
// ============================================================================

#[tokio::test]
async fn test_top_scenario() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");
    let alice = user("alice");
    let bob = user("bob");
    let carol = user("carol");

    bot.reply(&configure(s1, &owner, "alice", "👍=1,⭐=3")).await;
    bot.react(&reaction(s1, &alice, &bob, "👍", Added)).await;
    bot.react(&reaction(s1, &alice, &carol, "⭐", Added)).await;

    let top1 = CommandFixture::new("top", s1, &alice).integer("count", 1).build();
    assert_eq!(bot.reply(&top1).await.as_deref(), Some("1. carol - 3"));

    let top10 = CommandFixture::new("top", s1, &alice).integer("count", 10).build();
    assert_eq!(bot.reply(&top10).await.as_deref(), Some("1. carol - 3\n2. bob - 1"));
}

#[tokio::test]
async fn test_top_is_prefix_of_all() {
    let bot = TestBot::new();
    let s1 = server();
    let alice = user("alice");

    for (i, delta) in [5, -2, 9, 0, 3].into_iter().enumerate() {
        let scored = user(&format!("user{i}"));
        bot.scores
            .apply_delta(&ScoreEvent::new(s1, &alice, &scored, "👍", delta))
            .await
            .unwrap();
    }

    let all = bot.scores.all(s1).await.unwrap();
    let top = bot.scores.top(s1, 3).await.unwrap();
    assert_eq!(top.len(), 3);
    assert_eq!(top[..], all[..3]);
    assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn test_top_count_bounds() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");
    let alice = user("alice");

    bot.reply(&configure(s1, &owner, "alice", "👍=1")).await;

    for count in [0, 101, -3] {
        let cmd = CommandFixture::new("top", s1, &alice).integer("count", count).build();
        let err = bot.dispatch(&cmd).await.unwrap_err();
        assert_eq!(validation_message(err), "count must be between 1 and 100");
    }
}

#[tokio::test]
async fn test_top_without_scores() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");
    let alice = user("alice");

    bot.reply(&configure(s1, &owner, "alice", "👍=1")).await;

    let cmd = CommandFixture::new("top", s1, &alice).integer("count", 5).build();
    assert_eq!(bot.reply(&cmd).await.as_deref(), Some("No scores recorded yet."));
}

#[tokio::test]
async fn test_top_without_rules() {
    let bot = TestBot::new();
    let cmd = CommandFixture::new("top", server(), &user("alice")).integer("count", 5).build();
    assert_eq!(bot.reply(&cmd).await.as_deref(), Some(NOT_CONFIGURED));
}

#[tokio::test]
async fn test_storage_failure_gets_generic_reply() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");
    let alice = user("alice");

    bot.reply(&configure(s1, &owner, "alice", "👍=1")).await;
    bot.scores.set_unavailable(true);

    let cmd = CommandFixture::new("top", s1, &alice).integer("count", 5).build();
    let err = bot.dispatch(&cmd).await.unwrap_err();
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

// ============================================================================
// score_from_date_range
// ============================================================================

fn day(date: &str) -> chrono::DateTime<Utc> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap())
        .and_utc()
}

#[tokio::test]
async fn test_score_from_date_range() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");
    let alice = user("alice");
    let bob = user("bob");
    let carol = user("carol");
    let dave = user("dave");

    bot.reply(&configure(s1, &owner, "alice", "👍=1")).await;

    let events = [
        (&bob, 2, "2024-03-01"),
        (&carol, 5, "2024-03-02"),
        (&bob, 4, "2024-03-03"),
        (&dave, 1, "2024-03-03"),
        (&carol, 100, "2024-03-04"),
        (&dave, 9, "2024-02-29"),
    ];
    for (scored, delta, date) in events {
        let event = ScoreEvent::new(s1, &alice, scored, "👍", delta).at(day(date));
        bot.scores.apply_delta(&event).await.unwrap();
    }

    let cmd = CommandFixture::new("score_from_date_range", s1, &alice)
        .string("start_date", "2024-03-01")
        .string("end_date", "2024-03-03")
        .build();
    assert_eq!(
        bot.reply(&cmd).await.as_deref(),
        Some("1. bob - 6\n2. carol - 5\n3. dave - 1")
    );

    let cmd = CommandFixture::new("score_from_date_range", s1, &alice)
        .string("start_date", "2024-03-01")
        .string("end_date", "2024-03-03")
        .integer("count", 2)
        .build();
    assert_eq!(bot.reply(&cmd).await.as_deref(), Some("1. bob - 6\n2. carol - 5"));
}

#[tokio::test]
async fn test_date_range_includes_whole_end_day() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");
    let alice = user("alice");
    let bob = user("bob");

    bot.reply(&configure(s1, &owner, "alice", "👍=1")).await;
    bot.react(&reaction(s1, &alice, &bob, "👍", Added)).await;

    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let cmd = CommandFixture::new("score_from_date_range", s1, &alice)
        .string("start_date", &today)
        .string("end_date", &today)
        .build();
    assert_eq!(bot.reply(&cmd).await.as_deref(), Some("1. bob - 1"));

    let yesterday = (Utc::now() - Duration::days(1)).date_naive().format("%Y-%m-%d").to_string();
    let cmd = CommandFixture::new("score_from_date_range", s1, &alice)
        .string("start_date", &yesterday)
        .string("end_date", &yesterday)
        .build();
    assert_eq!(
        bot.reply(&cmd).await.as_deref(),
        Some("No scores recorded in that date range.")
    );
}

#[tokio::test]
async fn test_date_range_validation() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");
    let alice = user("alice");

    bot.reply(&configure(s1, &owner, "alice", "👍=1")).await;

    let cmd = CommandFixture::new("score_from_date_range", s1, &alice)
        .string("start_date", "2024-13-01")
        .string("end_date", "2024-12-31")
        .build();
    let err = bot.dispatch(&cmd).await.unwrap_err();
    assert_eq!(validation_message(err), "Invalid date `2024-13-01`: expected YYYY-MM-DD");

    let cmd = CommandFixture::new("score_from_date_range", s1, &alice)
        .string("start_date", "2024-12-31")
        .string("end_date", "2024-01-01")
        .build();
    let err = bot.dispatch(&cmd).await.unwrap_err();
    assert_eq!(validation_message(err), "start_date must not be after end_date");

    let cmd = CommandFixture::new("score_from_date_range", s1, &alice)
        .string("start_date", "2024-01-01")
        .string("end_date", "2024-12-31")
        .integer("count", 0)
        .build();
    let err = bot.dispatch(&cmd).await.unwrap_err();
    assert_eq!(validation_message(err), "count must be at least 1");
}

// ============================================================================
// export_all_scores
// ============================================================================

#[tokio::test]
async fn test_export_all_scores() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");
    let alice = user("alice");
    let bob = user("bob");
    let carol = user("carol");

    bot.reply(&configure(s1, &owner, "alice", "👍=1,⭐=3")).await;
    bot.react(&reaction(s1, &alice, &bob, "👍", Added)).await;
    bot.react(&reaction(s1, &alice, &carol, "⭐", Added)).await;

    let cmd = CommandFixture::new("export_all_scores", s1, &alice).build();
    let reply = bot.dispatch(&cmd).await.unwrap().unwrap();
    assert_eq!(reply.content, "Exported 2 scores.");

    let attachment = reply.attachment.unwrap();
    assert_eq!(attachment.filename, "scores.csv");
    let csv = String::from_utf8(attachment.data).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "rank,user_id,username,score".to_string(),
            format!("1,{},carol,3", carol.id),
            format!("2,{},bob,1", bob.id),
        ]
    );
}

#[tokio::test]
async fn test_export_without_scores() {
    let bot = TestBot::new();
    let s1 = server();
    let owner = user("owner");
    let alice = user("alice");

    bot.reply(&configure(s1, &owner, "alice", "👍=1")).await;

    let cmd = CommandFixture::new("export_all_scores", s1, &alice).build();
    let reply = bot.dispatch(&cmd).await.unwrap().unwrap();
    assert_eq!(reply.content, "No scores recorded yet.");
    assert!(reply.attachment.is_none());
}
