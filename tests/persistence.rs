//! A conversation resumed from stored state must behave exactly like one
//! that was never put down, and a booking whose slots are already known
//! must not ask for them again.

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use tempfile::TempDir;

use booking_concierge::adapters::recognizer::KeywordRecognizer;
use booking_concierge::adapters::storage::{FileConversationStore, InMemoryConversationStore};
use booking_concierge::application::DialogManager;
use booking_concierge::domain::booking::{
    prompts, BreakfastKind, BreakfastPreference, Choosable, MorningDrink, PaymentMethod,
    PillowType, SlotBag,
};
use booking_concierge::domain::dialog::dialogs::BookingDialog;
use booking_concierge::domain::dialog::{
    Activity, ConversationStatus, Dialog, DialogFrame, DialogStack, FrameOptions,
    OutgoingMessage, StepContext, StepInput, StepOutcome, StepValue, TurnEngine, TurnOutcome,
};
use booking_concierge::domain::foundation::ConversationId;
use booking_concierge::ports::ConversationStore;

const ANSWERS: &[&str] = &[
    "book a room for 3 people",
    "book a room",
    "2",
    "0",
    "yes",
    "no",
    "Buffet",
    "Continental",
    "Coffee",
    "green tea",
    "Tuesday",
    "2025-06-14",
    "help",
    "cancel",
    "4",
    "cash",
    "firm",
    "none",
    "Grace Hopper",
    "is there a pool?",
];

type Step = Result<(Vec<OutgoingMessage>, TurnOutcome), String>;

/// Runs a script against one stack, optionally passing the stack through a
/// serializer after the given turn.
fn run_script(script: &[&str], round_trip_after: Option<(usize, Codec)>) -> Vec<Step> {
    let engine = TurnEngine::hotel(Some(3));
    let recognizer = KeywordRecognizer::new();
    let mut stack = DialogStack::new();
    let mut steps = Vec::new();

    for (turn, text) in script.iter().enumerate() {
        let recognition = recognizer.analyze(text);
        let result = engine.run(&mut stack, &Activity::message(*text), &recognition, true);
        match result {
            Ok(output) => steps.push(Ok((output.messages, output.outcome))),
            Err(e) => {
                steps.push(Err(e.to_string()));
                break;
            }
        }
        if let Some((after, codec)) = round_trip_after {
            if after == turn {
                stack = codec.round_trip(&stack);
            }
        }
    }
    steps
}

#[derive(Debug, Clone, Copy)]
enum Codec {
    Json,
    Yaml,
}

impl Codec {
    fn round_trip(self, stack: &DialogStack) -> DialogStack {
        match self {
            Codec::Json => serde_json::from_str(&serde_json::to_string(stack).unwrap()).unwrap(),
            Codec::Yaml => serde_yaml::from_str(&serde_yaml::to_string(stack).unwrap()).unwrap(),
        }
    }
}

fn script_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(ANSWERS), 1..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn same_answers_give_same_turns(script in script_strategy()) {
        prop_assert_eq!(run_script(&script, None), run_script(&script, None));
    }

    #[test]
    fn resuming_from_json_matches_uninterrupted(
        script in script_strategy(),
        split in 0usize..24,
    ) {
        let split = split % script.len();
        prop_assert_eq!(
            run_script(&script, Some((split, Codec::Json))),
            run_script(&script, None)
        );
    }

    #[test]
    fn resuming_from_yaml_matches_uninterrupted(
        script in script_strategy(),
        split in 0usize..24,
    ) {
        let split = split % script.len();
        prop_assert_eq!(
            run_script(&script, Some((split, Codec::Yaml))),
            run_script(&script, None)
        );
    }

    #[test]
    fn turns_never_fail_on_user_text(script in script_strategy()) {
        for step in run_script(&script, None) {
            prop_assert!(step.is_ok(), "turn failed: {:?}", step);
        }
    }
}

// =============================================================================
// Filled bags
// =============================================================================

fn breakfast_strategy() -> impl Strategy<Value = BreakfastPreference> {
    prop_oneof![
        Just(BreakfastPreference::declined()),
        (
            prop::sample::select(BreakfastKind::choices()),
            prop::sample::select(MorningDrink::choices()),
        )
            .prop_map(|(kind, drink)| BreakfastPreference::new(kind, drink)),
    ]
}

fn arrival_strategy() -> impl Strategy<Value = String> {
    (2024i32..2031, 1u32..=12, 1u32..=28).prop_map(|(year, month, day)| {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .format("%Y-%m-%d")
            .to_string()
    })
}

/// Bags with every slot filled and children never above guests.
fn complete_bag() -> impl Strategy<Value = SlotBag> {
    let counts = (1u32..=20).prop_flat_map(|guests| (Just(guests), 0..=guests));
    (
        counts,
        breakfast_strategy(),
        arrival_strategy(),
        1u32..=30,
        prop::sample::select(PaymentMethod::choices()),
        any::<bool>(),
        prop::sample::select(PillowType::choices()),
        "[a-z]{3,10}( [a-z]{3,10}){0,2}",
        any::<bool>(),
        "[A-Z][a-z]{2,9} [A-Z][a-z]{2,9}",
    )
        .prop_map(
            |(
                (guests, children),
                breakfast,
                arrival,
                nights,
                payment,
                parking,
                pillow,
                allergies,
                age_verified,
                guest_name,
            )| SlotBag {
                guests: Some(guests),
                children: Some(children),
                breakfast: Some(breakfast),
                arrival: Some(arrival),
                nights: Some(nights),
                payment: Some(payment),
                parking: Some(parking),
                pillow: Some(pillow),
                allergies: Some(allergies),
                age_verified: Some(age_verified),
                guest_name: Some(guest_name),
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn complete_bag_finishes_in_one_turn(bag in complete_bag()) {
        prop_assert!(bag.is_complete());
        let mut stack = DialogStack::new();
        stack.push(DialogFrame::begin(FrameOptions::Booking(bag.clone())));
        let text = bag.guests.unwrap_or(1).to_string();
        let recognition = KeywordRecognizer::new().analyze(&text);

        let output = TurnEngine::hotel(Some(3))
            .run(&mut stack, &Activity::message(text.as_str()), &recognition, true)
            .unwrap();

        prop_assert_eq!(&output.outcome, &TurnOutcome::Completed(bag.clone()));
        let texts: Vec<&str> = output.messages.iter().map(|m| m.text.as_str()).collect();
        let summary = prompts::booking_summary(&bag.to_string());
        prop_assert_eq!(texts, vec![summary.as_str(), prompts::THANK_YOU]);
        prop_assert!(stack.is_empty());
    }

    #[test]
    fn skipping_a_filled_step_again_changes_nothing(bag in complete_bag(), index in 0usize..11) {
        let dialog = BookingDialog::new();
        let mut options = FrameOptions::Booking(bag.clone());

        let mut first_outbox = Vec::new();
        let first = dialog
            .run_step(
                index,
                &mut options,
                StepInput::Begin,
                &mut StepContext::new(&mut first_outbox),
            )
            .unwrap();
        let mut second_outbox = Vec::new();
        let second = dialog
            .run_step(
                index,
                &mut options,
                StepInput::Advanced(StepValue::Done),
                &mut StepContext::new(&mut second_outbox),
            )
            .unwrap();

        prop_assert!(matches!(first, StepOutcome::Next(_)), "step {} did not skip", index);
        prop_assert_eq!(first, second);
        prop_assert!(first_outbox.is_empty() && second_outbox.is_empty());
        prop_assert_eq!(options, FrameOptions::Booking(bag));
    }
}

// =============================================================================
// Stores
// =============================================================================

fn manager_with(store: Arc<dyn ConversationStore>) -> DialogManager {
    DialogManager::new(TurnEngine::hotel(Some(3)), Arc::new(KeywordRecognizer::new()), store)
}

#[tokio::test]
async fn file_store_conversation_matches_in_memory_conversation() {
    let dir = TempDir::new().unwrap();
    let on_disk = manager_with(Arc::new(FileConversationStore::new(dir.path())));
    let in_memory = manager_with(Arc::new(InMemoryConversationStore::new()));
    let id = ConversationId::new("webchat:persist").unwrap();

    let script = [
        "book a room for 3 people",
        "1",
        "yes",
        "Full English",
        "hot chocolate",
        "Tuesday",
        "2025-06-14",
        "2",
        "debit card",
        "no",
        "feather",
        "peanuts",
        "yes",
        "Grace Hopper",
    ];
    for text in script {
        let a = on_disk.process_message(&id, text).await.unwrap();
        let b = in_memory.process_message(&id, text).await.unwrap();
        assert_eq!(a.messages, b.messages, "messages differ after {:?}", text);
        assert_eq!(a.outcome, b.outcome, "outcome differs after {:?}", text);
        assert_eq!(a.status, b.status);
    }

    let stored = on_disk.snapshot(&id).await.unwrap().unwrap();
    assert_eq!(stored.status, ConversationStatus::Completed);
    let booking = stored.last_booking.unwrap();
    assert_eq!(booking.allergies.as_deref(), Some("peanuts"));
    assert_eq!(booking.arrival.as_deref(), Some("2025-06-14"));
}

#[tokio::test]
async fn new_manager_resumes_a_conversation_left_on_disk() {
    let dir = TempDir::new().unwrap();
    let id = ConversationId::new("webchat:restart").unwrap();

    {
        let first = manager_with(Arc::new(FileConversationStore::new(dir.path())));
        first.process_message(&id, "book a room for 2 people").await.unwrap();
        first.process_message(&id, "0").await.unwrap();
        first.process_message(&id, "yes").await.unwrap();
    }

    let second = manager_with(Arc::new(FileConversationStore::new(dir.path())));
    second.process_message(&id, "Buffet").await.unwrap();
    let report = second.process_message(&id, "Coffee").await.unwrap();

    assert_eq!(report.status, ConversationStatus::Active);
    let stored = second.snapshot(&id).await.unwrap().unwrap();
    assert_eq!(stored.turn_count, 5);
    assert!(stored.stack.slot_bag().unwrap().breakfast.unwrap().is_booked());
}
