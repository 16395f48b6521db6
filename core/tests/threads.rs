//! One engine shared by several threads, each evaluating its own trees.

use std::thread;

use animo_core::api::{Engine, EngineOptions};
use animo_core::evaluator::Expression;
use animo_core::values::{Value, ValueKind, Variable};

static_assertions::assert_impl_all!(Engine: Send, Sync, Clone);
static_assertions::assert_not_impl_any!(Variable: Send, Sync);

#[test]
fn test_engine_shared_across_threads() {
    let engine = Engine::with_stdlib(EngineOptions::default());

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let engine = engine.clone();
            thread::spawn(move || {
                let t = Variable::new("t", ValueKind::Float);
                let mut expr = engine
                    .call_by_name(
                        "*",
                        vec![Expression::variable(&t), Value::int(worker).into()],
                    )
                    .unwrap();

                let mut total = 0.0;
                for frame in 0..100 {
                    t.set(&Value::float(frame as f64)).unwrap();
                    total += expr.evaluate().unwrap().as_float().unwrap();
                }
                total
            })
        })
        .collect();

    for (worker, handle) in handles.into_iter().enumerate() {
        // Sum of 0..100 is 4950.
        assert_eq!(handle.join().unwrap(), 4950.0 * worker as f64);
    }
}
