//! Property-based invariant tests for the undo/redo history.
//!
//! 1. A new recording after an undo makes redo a no-op (linear history).
//! 2. Undo followed by redo restores the navigation selection.
//! 3. Popping an empty stack changes neither stack nor selection.
//! 4. Subscriber writes triggered by replay never push a batch.
//! 5. One recording outside a registration pushes exactly one two-step batch.
//! 6. Stack depths follow a simple counter model.
//! 7. The depth cap is never exceeded.

use configurator_core::{AttributeId, GroupId, OptionId, StepId, fixtures};
use configurator_runtime::{
    CoordinatorConfig, Direction, InMemoryEngine, Navigator, NullTargetReplay, SelectionChange,
    SelectionState, SelectionStore, UndoRedoCoordinator,
};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Record(SelectionChange),
    Undo,
    Redo,
}

fn maybe_id() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![Just(None), (1i64..=4).prop_map(Some)]
}

fn change_strategy() -> impl Strategy<Value = SelectionChange> {
    prop_oneof![
        (maybe_id(), maybe_id()).prop_map(|(from, to)| SelectionChange::Group {
            from: from.map(GroupId),
            to: to.map(GroupId),
        }),
        (maybe_id(), maybe_id()).prop_map(|(from, to)| SelectionChange::Step {
            from: from.map(StepId),
            to: to.map(StepId),
        }),
        (maybe_id(), maybe_id()).prop_map(|(from, to)| SelectionChange::Attribute {
            from: from.map(AttributeId),
            to: to.map(AttributeId),
        }),
        (maybe_id(), maybe_id()).prop_map(|(from, to)| SelectionChange::Option {
            from: from.map(OptionId),
            to: to.map(OptionId),
        }),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => change_strategy().prop_map(Op::Record),
        2 => Just(Op::Undo),
        2 => Just(Op::Redo),
    ]
}

/// Navigation actions on ids that exist in the sofa fixture.
#[derive(Debug, Clone)]
enum NavOp {
    Group(GroupId),
    Step(Option<StepId>),
    Attribute(AttributeId),
}

fn nav_op_strategy() -> impl Strategy<Value = NavOp> {
    prop_oneof![
        prop::sample::select(vec![1i64, 2, 3]).prop_map(|id| NavOp::Group(GroupId(id))),
        prop_oneof![Just(None), prop::sample::select(vec![20i64, 21]).prop_map(Some)]
            .prop_map(|id| NavOp::Step(id.map(StepId))),
        prop::sample::select(vec![10i64, 11, 30, 31]).prop_map(|id| NavOp::Attribute(AttributeId(id))),
    ]
}

fn apply_nav(nav: &Navigator, sel: &mut SelectionStore, op: &NavOp) {
    match *op {
        NavOp::Group(id) => nav.select_group(sel, Some(id)),
        NavOp::Step(id) => nav.select_step(sel, id),
        NavOp::Attribute(id) => nav.select_attribute(sel, id),
    }
}

type Snapshot = (Option<GroupId>, Option<StepId>, Option<AttributeId>);

fn snapshot(sel: &SelectionStore) -> Snapshot {
    (
        sel.selected_group(),
        sel.selected_step(),
        sel.selected_attribute(),
    )
}

fn setup() -> (UndoRedoCoordinator, InMemoryEngine, SelectionStore) {
    (
        UndoRedoCoordinator::default(),
        InMemoryEngine::new(fixtures::sofa()),
        SelectionStore::new(),
    )
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Linear history
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn recording_after_undo_disables_redo(
        ops in proptest::collection::vec(op_strategy(), 0..40),
        change in change_strategy(),
    ) {
        prop_assume!(!change.is_noop());
        let (coord, mut engine, mut sel) = setup();
        for op in &ops {
            match op {
                Op::Record(c) => { coord.record_selection_change(*c); }
                Op::Undo => { coord.undo(&mut engine, &mut sel); }
                Op::Redo => { coord.redo(&mut engine, &mut sel); }
            }
        }
        coord.undo(&mut engine, &mut sel);
        prop_assert!(coord.record_selection_change(change));
        prop_assert!(!coord.can_redo());
        prop_assert!(coord.redo(&mut engine, &mut sel).is_none());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Undo then redo restores selection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn undo_redo_round_trip_restores_selection(
        actions in proptest::collection::vec(nav_op_strategy(), 1..30),
        undos in 1usize..10,
    ) {
        let coord = UndoRedoCoordinator::new(
            CoordinatorConfig::default().with_null_target_replay(NullTargetReplay::Always),
        );
        let nav = Navigator::new(coord.clone());
        let mut engine = InMemoryEngine::new(fixtures::sofa());
        let mut sel = SelectionStore::new();
        for action in &actions {
            apply_nav(&nav, &mut sel, action);
        }
        // Walk part of the way back first so the round trip starts mid-history.
        for _ in 1..undos {
            coord.undo(&mut engine, &mut sel);
        }
        prop_assume!(coord.can_undo());

        let before = snapshot(&sel);
        let depths = (coord.undo_depth(), coord.redo_depth());
        coord.undo(&mut engine, &mut sel);
        coord.redo(&mut engine, &mut sel);
        prop_assert_eq!(snapshot(&sel), before);
        prop_assert_eq!((coord.undo_depth(), coord.redo_depth()), depths);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Empty pops are no-ops
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn empty_pop_touches_nothing(
        ops in proptest::collection::vec(op_strategy(), 0..30),
        direction in prop_oneof![Just(Direction::Undo), Just(Direction::Redo)],
    ) {
        let (coord, mut engine, mut sel) = setup();
        for op in &ops {
            match op {
                Op::Record(c) => { coord.record_selection_change(*c); }
                Op::Undo => { coord.undo(&mut engine, &mut sel); }
                Op::Redo => { coord.redo(&mut engine, &mut sel); }
            }
        }
        // Drain the stack under test.
        loop {
            let moved = match direction {
                Direction::Undo => coord.undo(&mut engine, &mut sel),
                Direction::Redo => coord.redo(&mut engine, &mut sel),
            };
            if moved.is_none() {
                break;
            }
        }

        let stacks = coord.stacks();
        let version = sel.version();
        let engine_calls = (engine.undo_calls(), engine.redo_calls());
        let outcome = match direction {
            Direction::Undo => coord.undo(&mut engine, &mut sel),
            Direction::Redo => coord.redo(&mut engine, &mut sel),
        };
        prop_assert!(outcome.is_none());
        prop_assert_eq!(coord.stacks().undo_depth(), stacks.undo_depth());
        prop_assert_eq!(coord.stacks().redo_depth(), stacks.redo_depth());
        prop_assert_eq!(sel.version(), version);
        prop_assert_eq!((engine.undo_calls(), engine.redo_calls()), engine_calls);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Replay-triggered writes are not recorded
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn replay_triggered_writes_never_push(
        actions in proptest::collection::vec(nav_op_strategy(), 1..20),
        undos in 1usize..20,
    ) {
        let coord = UndoRedoCoordinator::new(
            CoordinatorConfig::default().with_null_target_replay(NullTargetReplay::Always),
        );
        let nav = Navigator::new(coord.clone());
        let mut engine = InMemoryEngine::new(fixtures::sofa());
        let mut sel = SelectionStore::new();

        // Every group change tries to record an attribute reset, as a
        // menu reacting to the group would.
        let follower = coord.clone();
        let store = sel.clone();
        let _sub = sel.on_group_change(move |_| {
            follower.record_selection_change(SelectionChange::Attribute {
                from: store.selected_attribute(),
                to: None,
            });
        });

        for action in &actions {
            apply_nav(&nav, &mut sel, action);
        }
        for _ in 0..undos {
            let (u, r) = (coord.undo_depth(), coord.redo_depth());
            if coord.undo(&mut engine, &mut sel).is_none() {
                break;
            }
            prop_assert_eq!((coord.undo_depth(), coord.redo_depth()), (u - 1, r + 1));
        }
        while coord.can_redo() {
            let (u, r) = (coord.undo_depth(), coord.redo_depth());
            coord.redo(&mut engine, &mut sel);
            prop_assert_eq!((coord.undo_depth(), coord.redo_depth()), (u + 1, r - 1));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. One recording, one batch
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_recording_is_one_undo_redo_pair(
        ops in proptest::collection::vec(op_strategy(), 0..20),
        change in change_strategy(),
    ) {
        prop_assume!(!change.is_noop());
        let (coord, mut engine, mut sel) = setup();
        for op in &ops {
            match op {
                Op::Record(c) => { coord.record_selection_change(*c); }
                Op::Undo => { coord.undo(&mut engine, &mut sel); }
                Op::Redo => { coord.redo(&mut engine, &mut sel); }
            }
        }
        let depth = coord.undo_depth();
        coord.record_selection_change(change);
        prop_assert_eq!(coord.undo_depth(), depth + 1);

        let batch = coord.peek_undo().expect("batch just pushed");
        let steps = batch.as_slice();
        prop_assert_eq!(steps.len(), 2);
        prop_assert_eq!(steps[0].direction, Direction::Undo);
        prop_assert_eq!(steps[0].target, change.previous());
        prop_assert_eq!(steps[1].direction, Direction::Redo);
        prop_assert_eq!(steps[1].target, change.next());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Counter model
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn depths_follow_counter_model(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let (coord, mut engine, mut sel) = setup();
        let (mut undo, mut redo) = (0usize, 0usize);
        for op in &ops {
            match op {
                Op::Record(c) => {
                    let recorded = coord.record_selection_change(*c);
                    prop_assert_eq!(recorded, !c.is_noop());
                    if recorded {
                        undo += 1;
                        redo = 0;
                    }
                }
                Op::Undo => {
                    let moved = coord.undo(&mut engine, &mut sel).is_some();
                    prop_assert_eq!(moved, undo > 0);
                    if moved {
                        undo -= 1;
                        redo += 1;
                    }
                }
                Op::Redo => {
                    let moved = coord.redo(&mut engine, &mut sel).is_some();
                    prop_assert_eq!(moved, redo > 0);
                    if moved {
                        redo -= 1;
                        undo += 1;
                    }
                }
            }
            prop_assert_eq!((coord.undo_depth(), coord.redo_depth()), (undo, redo));
            prop_assert!(!coord.is_replaying());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Depth cap
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn undo_depth_never_exceeds_cap(
        cap in 1usize..8,
        ops in proptest::collection::vec(op_strategy(), 0..60),
    ) {
        let coord = UndoRedoCoordinator::new(CoordinatorConfig::default().with_max_depth(cap));
        let mut engine = InMemoryEngine::new(fixtures::sofa());
        let mut sel = SelectionStore::new();
        for op in &ops {
            match op {
                Op::Record(c) => { coord.record_selection_change(*c); }
                Op::Undo => { coord.undo(&mut engine, &mut sel); }
                Op::Redo => { coord.redo(&mut engine, &mut sel); }
            }
            prop_assert!(coord.undo_depth() <= cap);
        }
    }
}
