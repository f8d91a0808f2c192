mod common;

use common::{started_session, swipe};
use swipedeck::config::SwipeConfig;
use swipedeck::ui::driver::{DriverIntent, DriverReducer, DriverState, SettleTicket};
use swipedeck::ui::gesture::{
    Classification, Displacement, Feedback, GestureIntent, GestureReducer, GestureState, Outcome,
};
use swipedeck::ui::mvi::Reducer;

fn release_after(path: &[(f64, f64)]) -> Option<Displacement> {
    let intents = std::iter::once(GestureIntent::Start { x: 0.0, y: 0.0 })
        .chain(path.iter().map(|&(x, y)| GestureIntent::Move { x, y }));
    let state = GestureReducer::reduce_all(GestureState::Idle, intents);
    let displacement = state.displacement();
    let state = GestureReducer::reduce(state, GestureIntent::End);
    assert_eq!(state, GestureState::Idle);
    displacement
}

#[test]
fn only_final_position_decides_the_release() {
    let config = SwipeConfig::default();
    let wandering = [(60.0, 5.0), (140.0, -3.0), (-20.0, 9.0), (40.0, 2.0)];
    let d = release_after(&wandering).unwrap();
    assert_eq!(d, Displacement::new(40.0, 2.0));
    assert_eq!(Classification::of(d, &config), Classification::SnapBack);

    let returning = [(-90.0, 0.0), (-180.0, 0.0), (-101.0, 12.0)];
    let d = release_after(&returning).unwrap();
    assert_eq!(
        Classification::of(d, &config),
        Classification::Commit(Outcome::Reject)
    );
}

#[test]
fn releases_within_threshold_never_decide() {
    let mut dx = -100.0;
    while dx <= 100.0 {
        let (mut session, visual) = started_session(&["x"]);
        assert!(swipe(&mut session, dx).is_none(), "dx={}", dx);
        assert!(session.decisions().is_empty(), "dx={}", dx);
        assert_eq!(visual.last_transform(), Some((0.0, 0.0, 0.0)), "dx={}", dx);
        assert_eq!(visual.last_opacity(Outcome::Accept), Some(0.0));
        assert_eq!(visual.last_opacity(Outcome::Reject), Some(0.0));
        dx += 12.5;
    }
}

#[test]
fn releases_beyond_threshold_decide_exactly_once() {
    for dx in [100.5, 101.0, 150.0, 400.0, -100.5, -101.0, -150.0, -400.0] {
        let (mut session, _) = started_session(&["x", "y"]);
        assert!(swipe(&mut session, dx).is_some(), "dx={}", dx);
        assert!(swipe(&mut session, dx).is_none(), "dx={}", dx);

        let expected = if dx > 0.0 { Outcome::Accept } else { Outcome::Reject };
        assert_eq!(session.decisions().len(), 1, "dx={}", dx);
        assert_eq!(session.decisions()[0].outcome, expected, "dx={}", dx);
        assert_eq!(session.decisions()[0].item.id, "x");
    }
}

#[test]
fn opacity_ramps_then_clamps() {
    let config = SwipeConfig::default();
    let mut previous = 0.0;
    let mut dx = config.commit_threshold;
    while dx <= 300.0 {
        let fb = Feedback::from_displacement(Displacement::new(dx, 0.0), &config);
        let mirrored = Feedback::from_displacement(Displacement::new(-dx, 0.0), &config);
        assert!(fb.accept_opacity >= previous, "dx={}", dx);
        assert_eq!(fb.accept_opacity, mirrored.reject_opacity, "dx={}", dx);
        assert!(fb.accept_opacity <= 1.0);
        if dx >= config.full_opacity_distance {
            assert_eq!(fb.accept_opacity, 1.0, "dx={}", dx);
        }
        previous = fb.accept_opacity;
        dx += 5.0;
    }
}

#[test]
fn driver_ignores_commits_and_foreign_tickets_while_committing() {
    let first = SettleTicket::new(1);
    let state = DriverReducer::reduce(
        DriverState::Ready,
        DriverIntent::Commit {
            ticket: first,
            outcome: Outcome::Accept,
        },
    );
    let state = DriverReducer::reduce(
        state,
        DriverIntent::Commit {
            ticket: first.next(),
            outcome: Outcome::Reject,
        },
    );
    assert_eq!(state.pending_ticket(), Some(first));

    let state = DriverReducer::reduce(
        state,
        DriverIntent::Settled {
            ticket: first.next(),
            exhausted: false,
        },
    );
    assert!(state.is_committing());

    let state = DriverReducer::reduce(
        state,
        DriverIntent::Settled {
            ticket: first,
            exhausted: true,
        },
    );
    assert_eq!(state, DriverState::Done);

    let state = DriverReducer::reduce(
        state,
        DriverIntent::Commit {
            ticket: first.next(),
            outcome: Outcome::Accept,
        },
    );
    assert_eq!(state, DriverState::Done);
}
