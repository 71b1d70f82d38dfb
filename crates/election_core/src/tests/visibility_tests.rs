use super::*;

const STEP: Duration = Duration::from_millis(10);

#[test]
fn show_then_hide_removes_after_delay() {
    let start = Instant::now();
    let mut visibility = VisibilityController::default();

    assert_eq!(visibility.show(), RootEffect::Show);
    assert_eq!(visibility.state(), VisibilityState::Visible);

    assert_eq!(visibility.hide(start), RootEffect::FadeOut);
    assert!(visibility.is_visible());
    assert!(visibility.tick(start + HIDE_TRANSITION_DELAY - STEP).is_empty());

    assert_eq!(
        visibility.tick(start + HIDE_TRANSITION_DELAY),
        vec![RootEffect::Remove]
    );
    assert_eq!(visibility.state(), VisibilityState::Hidden);
    assert_eq!(visibility.next_deadline(), None);
}

#[test]
fn repeated_hide_keeps_single_deadline() {
    let start = Instant::now();
    let mut visibility = VisibilityController::default();
    visibility.show();

    assert_eq!(visibility.hide(start), RootEffect::FadeOut);
    assert_eq!(visibility.hide(start + STEP), RootEffect::FadeOut);
    assert_eq!(
        visibility.state(),
        VisibilityState::Hiding {
            remove_at: start + HIDE_TRANSITION_DELAY
        }
    );

    let effects = visibility.tick(start + HIDE_TRANSITION_DELAY + STEP * 5);
    assert_eq!(effects, vec![RootEffect::Remove]);
    assert!(visibility.tick(start + Duration::from_secs(1)).is_empty());
    assert_eq!(visibility.state(), VisibilityState::Hidden);
}

#[test]
fn hide_while_hidden_only_reapplies_transition() {
    let start = Instant::now();
    let mut visibility = VisibilityController::default();
    assert_eq!(visibility.hide(start), RootEffect::FadeOut);
    assert_eq!(visibility.state(), VisibilityState::Hidden);
    assert_eq!(visibility.next_deadline(), None);
}

#[test]
fn show_during_hide_still_removes_by_default() {
    let start = Instant::now();
    let mut visibility = VisibilityController::default();
    visibility.show();
    visibility.hide(start);

    assert_eq!(visibility.show(), RootEffect::Show);
    assert_eq!(visibility.state(), VisibilityState::Visible);
    assert_eq!(
        visibility.next_deadline(),
        Some(start + HIDE_TRANSITION_DELAY)
    );

    assert_eq!(
        visibility.tick(start + HIDE_TRANSITION_DELAY),
        vec![RootEffect::Remove]
    );
    assert_eq!(visibility.state(), VisibilityState::Hidden);
}

#[test]
fn show_during_hide_cancels_when_configured() {
    let start = Instant::now();
    let mut visibility = VisibilityController::new(HIDE_TRANSITION_DELAY, true);
    visibility.show();
    visibility.hide(start);
    visibility.show();

    assert_eq!(visibility.next_deadline(), None);
    assert!(visibility.tick(start + HIDE_TRANSITION_DELAY).is_empty());
    assert_eq!(visibility.state(), VisibilityState::Visible);
}

#[test]
fn scheduled_show_fires_once() {
    let start = Instant::now();
    let mut visibility = VisibilityController::default();
    visibility.schedule_show(start + Duration::from_millis(50));

    assert!(visibility.tick(start).is_empty());
    assert_eq!(
        visibility.tick(start + Duration::from_millis(50)),
        vec![RootEffect::Show]
    );
    assert!(visibility.tick(start + Duration::from_millis(60)).is_empty());
    assert!(visibility.is_visible());
}

#[test]
fn transition_class_names() {
    assert_eq!(Transition::FadeIn.class_name(), "fade-in");
    assert_eq!(Transition::FadeOut.class_name(), "fade-out");
}
