use assert_matches::assert_matches;
use overdrive::duration::{format_seconds, parse_duration_to_seconds, DurationField};
use overdrive::history::History;
use overdrive::mood::Mood;
use overdrive::session::{SessionController, SessionPhase};
use overdrive::timer::{ManualTickScheduler, TickToken};

/// End-to-end session workflows driven by a manual scheduler: start from
/// the text field, tick, pause, mark sets, finish, and land in history.

fn controller() -> (SessionController, ManualTickScheduler) {
    let scheduler = ManualTickScheduler::new();
    (SessionController::new(Box::new(scheduler.clone())), scheduler)
}

fn live_token(controller: &SessionController) -> TickToken {
    controller.tick_token().expect("a running session has a tick run")
}

#[test]
fn full_session_from_field_to_history() {
    let (mut controller, scheduler) = controller();
    let mut history = History::new();
    let mood = Mood::new(45);

    let mut field = DurationField::new("");
    for c in "0:30".chars() {
        field.push(c);
    }
    assert!(controller.start(field.text()));

    for second in 1..=30u64 {
        if second % 10 == 0 {
            controller.done();
        }
        let token = live_token(&controller);
        if let Some(summary) = controller.on_tick(token) {
            assert_eq!(second, 30);
            history.record(&summary, mood);
        }
    }

    assert_eq!(controller.phase(), SessionPhase::Completed);
    assert!(scheduler.live_tokens().is_empty());
    assert_eq!(history.len(), 1);

    let entry = history.newest_first()[0];
    assert!(entry.completed);
    assert_eq!(entry.elapsed_seconds, 30);
    assert_eq!(entry.sets, 3);
    assert_eq!(entry.mood.label(), "Pleasant");
}

#[test]
fn pause_resume_interleaving() {
    let (mut controller, _scheduler) = controller();
    controller.start("10:00");

    let first = live_token(&controller);
    for _ in 0..3 {
        controller.on_tick(first);
    }

    controller.toggle_pause();
    for _ in 0..5 {
        controller.on_tick(first);
    }
    controller.toggle_pause();

    let second = live_token(&controller);
    for _ in 0..5 {
        controller.on_tick(second);
        // a straggler from the first run in between must not count
        controller.on_tick(first);
    }

    assert_eq!(controller.session().elapsed_seconds, 8);
    assert_eq!(controller.elapsed_display(), "00:08 / 10:00");
}

#[test]
fn sets_count_while_paused() {
    let (mut controller, _scheduler) = controller();
    controller.start("01:00");
    controller.toggle_pause();
    controller.done();
    controller.skip();
    controller.skip();
    assert_eq!(controller.current_set_index(), 4);
    assert!(controller.is_paused());
}

#[test]
fn new_session_after_completion_starts_fresh() {
    let (mut controller, scheduler) = controller();
    controller.start("0:02");
    controller.skip();
    for _ in 0..2 {
        let token = live_token(&controller);
        controller.on_tick(token);
    }
    assert_eq!(controller.phase(), SessionPhase::Completed);

    assert!(controller.start("0:10"));
    assert_eq!(controller.current_set_index(), 1);
    assert_eq!(controller.session().elapsed_seconds, 0);
    assert_eq!(controller.session().total_seconds, 10);
    assert_eq!(scheduler.live_tokens().len(), 1);
    assert_eq!(scheduler.scheduled().len(), 2);
}

#[test]
fn stop_then_tick_is_ignored() {
    let (mut controller, _scheduler) = controller();
    controller.start("05:00");
    let token = live_token(&controller);
    controller.on_tick(token);

    let summary = controller.stop();
    assert_matches!(summary, Some(ref s) if !s.completed && s.elapsed_seconds == 1);
    assert_matches!(controller.on_tick(token), None);
    assert_eq!(controller.phase(), SessionPhase::Setup);
}

#[test]
fn malformed_field_text_runs_default_length() {
    let (mut controller, _scheduler) = controller();
    let field = DurationField::new("1::2");
    assert_eq!(field.seconds(), 1800);
    controller.start(field.text());
    assert_eq!(controller.elapsed_display(), "00:00 / 30:00");
}

#[test]
fn formatter_and_parser_agree() {
    for t in [0u64, 1, 59, 60, 330, 3599, 5999] {
        assert_eq!(parse_duration_to_seconds(&format_seconds(t)), t as i64);
    }
}
