//! Integration tests for the functional core and the debouncer
//!
//! Exercises the public API the way a library user would: compose chains,
//! persistent path updates, grouping, and debounced calls on the tokio timer.

use fnkit::core::{
    compose, get, group_by, group_by_with, pipe, try_compose, try_group_by, try_pipe, update,
    GroupOptions, KeyPath, Node, PathError, Stage, TryStage,
};
use fnkit::error::ErrorCode;
use fnkit::{DebounceError, Debouncer, FnkitError};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{advance, Instant};

// ============================================================================
// Composition
// ============================================================================

mod composition {
    use super::*;

    fn arithmetic() -> (fn(i64) -> i64, fn(i64) -> i64, fn(i64) -> i64) {
        (|x| x + 5, |x| x * 3, |x| x - 10)
    }

    #[test]
    fn test_compose_and_pipe_agree_on_mirrored_order() {
        let (add5, multiply3, subtract10) = arithmetic();

        let composed = compose(vec![
            Box::new(subtract10) as Stage<i64>,
            Box::new(multiply3),
            Box::new(add5),
        ]);
        let piped = pipe(vec![
            Box::new(add5) as Stage<i64>,
            Box::new(multiply3),
            Box::new(subtract10),
        ]);

        assert_eq!(composed(5), 20);
        assert_eq!(piped(5), 20);
    }

    #[test]
    fn test_empty_chains_are_identity() {
        let composed = compose::<String>(vec![]);
        let piped = pipe::<String>(vec![]);

        assert_eq!(composed("same".to_string()), "same");
        assert_eq!(piped("same".to_string()), "same");
    }

    #[test]
    fn test_stage_errors_propagate_unchanged() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let log = |name: &'static str| {
            let calls = Arc::clone(&calls);
            move |x: i32| {
                calls.lock().unwrap().push(name);
                Ok::<_, String>(x)
            }
        };

        let chain = try_pipe(vec![
            Box::new(log("first")) as TryStage<i32, String>,
            Box::new(|_: i32| Err::<i32, _>("boom".to_string())),
            Box::new(log("never")),
        ]);

        assert_eq!(chain.call(1), Err("boom".to_string()));
        assert_eq!(*calls.lock().unwrap(), vec!["first"]);
    }

    #[test]
    fn test_try_compose_applies_rightmost_first() {
        let chain = try_compose(vec![
            Box::new(|x: i32| Ok::<_, FnkitError>(x * 2)) as TryStage<i32, FnkitError>,
            Box::new(|x: i32| Ok::<_, FnkitError>(x + 1)),
        ]);
        assert_eq!(chain.call(3).unwrap(), 8);
    }

    #[test]
    fn test_chain_lifts_into_stage_failure() {
        let chain = try_pipe(vec![Box::new(|x: u32| {
            x.checked_sub(1)
                .ok_or_else(|| FnkitError::stage_failure("underflow").with_stage("decrement"))
        }) as TryStage<u32, FnkitError>]);

        let err = chain.call(0).unwrap_err();
        assert_eq!(err.code(), ErrorCode::STAGE_FAILED);
        assert_eq!(err.user_message(), "Stage 'decrement' failed: underflow");
    }

    #[test]
    fn test_macros_mix_stage_types() {
        let length_label = fnkit::pipe!(|s: &str| s.len(), |n: usize| n * 2, |n: usize| {
            format!("{n} half-chars")
        });
        assert_eq!(length_label("abc"), "6 half-chars");

        let same = fnkit::compose!();
        assert_eq!(same(42), 42);
    }
}

// ============================================================================
// Path updates
// ============================================================================

mod path_updates {
    use super::*;

    #[test]
    fn test_update_nested_field_leaves_original_untouched() {
        let user = Node::from_json(json!({
            "name": "John Doe",
            "address": { "city": "New York", "street": "123 Main St" }
        }));

        let moved = update(&user, &KeyPath::parse("address.city"), Node::leaf("Boston")).unwrap();

        assert_eq!(
            moved.to_json(),
            json!({
                "name": "John Doe",
                "address": { "city": "Boston", "street": "123 Main St" }
            })
        );
        assert_eq!(
            user.to_json()["address"]["city"],
            json!("New York"),
            "source tree must not change"
        );
    }

    #[test]
    fn test_update_shares_untouched_branches() {
        let root = Node::from_json(json!({
            "a": { "x": 1 },
            "b": { "y": 2 }
        }));

        let updated = update(&root, &KeyPath::parse("a.x"), Node::leaf(10)).unwrap();

        let before = get(&root, &KeyPath::parse("b")).unwrap();
        let after = get(&updated, &KeyPath::parse("b")).unwrap();
        assert!(Arc::ptr_eq(before, after));
    }

    #[test]
    fn test_update_through_list_index() {
        let cart = Node::from_json(json!({ "items": [{ "qty": 1 }, { "qty": 2 }] }));
        let updated = update(&cart, &KeyPath::parse("items.1.qty"), Node::leaf(5)).unwrap();
        assert_eq!(updated.to_json(), json!({ "items": [{ "qty": 1 }, { "qty": 5 }] }));
    }

    #[test]
    fn test_empty_path_replaces_root() {
        let root = Node::from_json(json!({ "a": 1 }));
        let replaced = update(&root, &KeyPath::root(), Node::leaf("whole")).unwrap();
        assert_eq!(replaced.to_json(), json!("whole"));
    }

    #[test]
    fn test_reaching_into_leaf_is_invalid_path() {
        let root = Node::from_json(json!({ "a": 1 }));
        let path: KeyPath = ["a", "b"].into_iter().collect();

        let err = update(&root, &path, Node::leaf(2)).unwrap_err();
        assert_eq!(
            err,
            PathError::NotIndexable {
                path: path.clone(),
                depth: 1
            }
        );

        let lifted = FnkitError::from(err);
        assert_eq!(lifted.code(), ErrorCode::PATH_NOT_INDEXABLE);
        assert_eq!(lifted.exit_code(), 3);
    }

    #[test]
    fn test_out_of_bounds_and_missing_intermediate_fail() {
        let root = Node::from_json(json!({ "list": [1, 2] }));

        assert!(matches!(
            update(&root, &KeyPath::parse("list.5"), Node::leaf(0)),
            Err(PathError::IndexOutOfBounds { len: 2, .. })
        ));
        assert!(matches!(
            update(&root, &KeyPath::parse("missing.leaf"), Node::leaf(0)),
            Err(PathError::MissingKey { depth: 0, .. })
        ));
        assert!(matches!(
            update(&root, &KeyPath::parse("list.first"), Node::leaf(0)),
            Err(PathError::KeyKindMismatch { depth: 1, .. })
        ));
    }

    #[test]
    fn test_missing_final_key_is_inserted() {
        let root = Node::from_json(json!({ "a": 1 }));
        let updated = update(&root, &KeyPath::parse("b"), Node::leaf(2)).unwrap();
        assert_eq!(updated.to_json(), json!({ "a": 1, "b": 2 }));
    }
}

// ============================================================================
// Grouping
// ============================================================================

mod grouping {
    use super::*;
    use fnkit::demo::sample;

    #[test]
    fn test_group_products_by_category() {
        let products = sample::products();
        let grouped = group_by_with(
            &products,
            |p| p.category.clone(),
            GroupOptions::new().transform(|p: &sample::Product| p.name.clone()),
        );

        assert_eq!(
            serde_json::to_value(&grouped).unwrap(),
            json!({
                "electronics": ["iPhone", "MacBook"],
                "clothing": ["T-shirt", "Jeans"],
                "education": ["Book"]
            })
        );
    }

    #[test]
    fn test_group_active_users_by_city() {
        let users = sample::users();
        let grouped = group_by_with(
            &users,
            |u| u.city.clone(),
            GroupOptions::new()
                .filter(|u: &sample::User| u.active)
                .transform(|u| u.name.clone()),
        );

        assert_eq!(serde_json::to_value(&grouped).unwrap(), json!({ "New York": ["John"] }));
    }

    #[test]
    fn test_empty_input_yields_empty_mapping() {
        let grouped = group_by(&Vec::<u32>::new(), |n| n % 2);
        assert!(grouped.is_empty());
    }

    #[test]
    fn test_failing_key_function_aborts() {
        let items = [1, 2, 3];
        let result = try_group_by(
            &items,
            |n| {
                if *n == 2 {
                    Err(format!("cannot key {n}"))
                } else {
                    Ok(n % 2)
                }
            },
            GroupOptions::new(),
        );
        assert_eq!(result.unwrap_err(), "cannot key 2");
    }
}

// ============================================================================
// Debouncing
// ============================================================================

mod debouncing {
    use super::*;

    type Seen = Arc<Mutex<Vec<(&'static str, Duration)>>>;

    fn recording(delay_ms: u64) -> (Debouncer<&'static str>, Seen) {
        let start = Instant::now();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let debouncer = Debouncer::from_fn(Duration::from_millis(delay_ms), move |arg: &'static str| {
            sink.lock().unwrap().push((arg, start.elapsed()));
        });
        (debouncer, seen)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_last_arguments() {
        let (debouncer, seen) = recording(300);

        debouncer.call("first").unwrap();
        advance(Duration::from_millis(100)).await;
        debouncer.call("second").unwrap();
        advance(Duration::from_millis(100)).await;
        debouncer.call("third").unwrap();

        advance(Duration::from_millis(299)).await;
        tokio::task::yield_now().await;
        assert!(seen.lock().unwrap().is_empty());

        advance(Duration::from_millis(1)).await;
        tokio::task::yield_now().await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "third");
        assert_eq!(seen[0].1, Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_calls_each_fire() {
        let (debouncer, seen) = recording(50);

        debouncer.call("a").unwrap();
        advance(Duration::from_millis(60)).await;
        tokio::task::yield_now().await;
        debouncer.call("b").unwrap();
        advance(Duration::from_millis(60)).await;
        tokio::task::yield_now().await;

        let names: Vec<_> = seen.lock().unwrap().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_call_without_runtime_is_scheduler_unavailable() {
        let (debouncer, _) = recording(10);
        let err = debouncer.call("x").unwrap_err();
        assert!(matches!(err, DebounceError::SchedulerUnavailable(_)));
        assert_eq!(
            FnkitError::from(err).code(),
            ErrorCode::SCHEDULER_UNAVAILABLE
        );
    }
}
