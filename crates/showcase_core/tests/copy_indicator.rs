use std::sync::Once;

use pretty_assertions::assert_eq;
use showcase_core::{update, Effect, Msg, PageState, DWELL_TIME};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(showcase_logging::initialize_for_tests);
}

fn copy(state: PageState, key: &str, text: &str) -> (PageState, Vec<Effect>) {
    update(
        state,
        Msg::CopyClicked {
            key: key.to_string(),
            text: text.to_string(),
        },
    )
}

fn expire(state: PageState, key: &str, generation: u64) -> PageState {
    let (state, effects) = update(
        state,
        Msg::CopyDwellElapsed {
            key: key.to_string(),
            generation,
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn copy_writes_clipboard_and_arms_dwell() {
    init_logging();
    let (mut state, effects) = copy(PageState::new(), "install", "cargo add widget");

    assert!(state.is_copy_active("install"));
    assert_eq!(state.view().copied_key.as_deref(), Some("install"));
    assert!(state.consume_dirty());
    assert_eq!(
        effects,
        vec![
            Effect::WriteClipboard {
                text: "cargo add widget".to_string(),
            },
            Effect::ScheduleDwellExpiry {
                key: "install".to_string(),
                generation: 1,
                after: DWELL_TIME,
            },
        ]
    );
}

#[test]
fn dwell_expiry_returns_to_idle() {
    init_logging();
    let (state, _) = copy(PageState::new(), "usage", "<Card />");
    let mut state = expire(state, "usage", 1);

    assert!(!state.is_copy_active("usage"));
    assert_eq!(state.view().copied_key, None);
    assert!(state.consume_dirty());
}

#[test]
fn newer_key_supersedes_and_old_expiry_is_a_noop() {
    init_logging();
    let (state, _) = copy(PageState::new(), "a", "first");
    let (state, effects) = copy(state, "b", "second");

    assert!(!state.is_copy_active("a"));
    assert!(state.is_copy_active("b"));
    assert!(effects.contains(&Effect::ScheduleDwellExpiry {
        key: "b".to_string(),
        generation: 2,
        after: DWELL_TIME,
    }));

    // "a"'s timer fires at its original deadline; it must not clear "b".
    let state = expire(state, "a", 1);
    assert!(state.is_copy_active("b"));

    let state = expire(state, "b", 2);
    assert!(!state.is_copy_active("b"));
}

#[test]
fn at_most_one_key_is_active() {
    init_logging();
    let distinct = ["props", "usage", "a11y"];
    let mut state = PageState::new();
    for key in ["props", "usage", "props", "a11y", "usage"] {
        let (next, _) = copy(state, key, "snippet");
        state = next;
        let active: Vec<&str> = distinct
            .iter()
            .copied()
            .filter(|k| state.is_copy_active(k))
            .collect();
        assert_eq!(active, vec![key]);
    }
}

#[test]
fn expiry_without_active_copy_is_clean_noop() {
    init_logging();
    let mut state = expire(PageState::new(), "ghost", 7);
    assert!(!state.consume_dirty());
}

#[test]
fn page_unmount_cancels_pending_dwell() {
    init_logging();
    let (state, _) = copy(PageState::new(), "a", "x");
    let (state, effects) = update(state, Msg::PageUnmounted);

    assert_eq!(effects, vec![Effect::CancelDwellExpiry]);
    assert!(!state.is_copy_active("a"));
}
