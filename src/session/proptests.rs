//! Property-based tests for session invariants

use super::*;
use crate::session::stage::COLD_SESSION_SECS;
use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Words that hit the keyword tables, mixed with filler
fn arb_word() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("rose".to_string()),
        Just("cedar".to_string()),
        Just("vanilla".to_string()),
        Just("bold".to_string()),
        Just("elegant".to_string()),
        Just("artistic".to_string()),
        Just("boho".to_string()),
        Just("timeless".to_string()),
        Just("smell of".to_string()),
        Just("perfume like".to_string()),
        Just("i'm".to_string()),
        Just("my name is".to_string()),
        "[a-zA-Z]{1,10}",
        "[.,!?]",
    ]
}

fn arb_message() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_word(), 0..20).prop_map(|words| words.join(" "))
}

fn arb_stage() -> impl Strategy<Value = ConversationStage> {
    prop_oneof![
        Just(ConversationStage::Greeting),
        Just(ConversationStage::GettingToKnow),
        Just(ConversationStage::ExploringPreferences),
        Just(ConversationStage::RefiningSelection),
    ]
}

fn arb_user_info() -> impl Strategy<Value = UserInfo> {
    (
        prop::option::of("[A-Z][a-z]{2,8}"),
        prop::collection::hash_set("[a-z]{3,8}", 0..4),
        prop::collection::hash_set("[a-z ]{3,12}", 0..4),
    )
        .prop_map(|(name, traits, scents)| UserInfo {
            name,
            personality_traits: traits.into_iter().collect(),
            style: None,
            mentioned_scents: scents.into_iter().collect(),
            scent_preferences: vec![],
        })
}

fn has_no_duplicates(values: &[String]) -> bool {
    values.iter().collect::<HashSet<_>>().len() == values.len()
}

fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

// ============================================================================
// Extractor Properties
// ============================================================================

proptest! {
    #[test]
    fn list_fields_never_contain_duplicates(messages in prop::collection::vec(arb_message(), 1..10)) {
        let extractor = KeywordExtractor::default();
        let mut info = UserInfo::default();

        for message in &messages {
            extractor.extract(message, &mut info);
            prop_assert!(has_no_duplicates(&info.scent_preferences));
            prop_assert!(has_no_duplicates(&info.personality_traits));
            prop_assert!(has_no_duplicates(&info.mentioned_scents));
        }
    }

    #[test]
    fn name_never_changes_once_set(
        first in "[A-Za-z]{1,10}",
        later in prop::collection::vec(arb_message(), 0..8),
    ) {
        let extractor = KeywordExtractor::default();
        let mut info = UserInfo::default();
        extractor.extract(&format!("my name is {first}"), &mut info);
        let name = info.name.clone();
        prop_assert!(name.is_some());

        for message in &later {
            extractor.extract(message, &mut info);
            prop_assert_eq!(&info.name, &name);
        }
    }

    #[test]
    fn list_fields_only_grow(messages in prop::collection::vec(arb_message(), 1..10)) {
        let extractor = KeywordExtractor::default();
        let mut info = UserInfo::default();

        for message in &messages {
            let before = info.clone();
            extractor.extract(message, &mut info);
            prop_assert!(info.scent_preferences.starts_with(&before.scent_preferences));
            prop_assert!(info.personality_traits.starts_with(&before.personality_traits));
            prop_assert!(info.mentioned_scents.starts_with(&before.mentioned_scents));
        }
    }
}

// ============================================================================
// Stage Properties
// ============================================================================

proptest! {
    #[test]
    fn warm_sessions_never_move_backwards(
        stage in arb_stage(),
        info in arb_user_info(),
        idle_secs in 0i64..=COLD_SESSION_SECS,
    ) {
        let mut ctx = SessionContext::new_at("p", base_time());
        ctx.conversation_stage = stage;
        ctx.user_info = info;

        advance(&mut ctx, base_time() + Duration::seconds(idle_secs));

        prop_assert!(ctx.conversation_stage >= stage);
    }

    #[test]
    fn warm_sessions_move_at_most_one_step(
        stage in arb_stage(),
        info in arb_user_info(),
    ) {
        let mut ctx = SessionContext::new_at("p", base_time());
        ctx.conversation_stage = stage;
        ctx.user_info = info;

        advance(&mut ctx, base_time());

        let steps = ctx.conversation_stage as i32 - stage as i32;
        prop_assert!((0..=1).contains(&steps));
    }

    #[test]
    fn cold_sessions_always_reset(
        stage in arb_stage(),
        info in arb_user_info(),
        extra_secs in 1i64..100_000,
    ) {
        let mut ctx = SessionContext::new_at("p", base_time());
        ctx.conversation_stage = stage;
        ctx.user_info = info;

        advance(&mut ctx, base_time() + Duration::seconds(COLD_SESSION_SECS + extra_secs));

        prop_assert_eq!(ctx.conversation_stage, ConversationStage::Greeting);
    }
}
