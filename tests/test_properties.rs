//! Property tests over arbitrary operation sequences.

mod common;

use std::sync::Arc;
use std::thread;

use common::{Call, CountingBackend};
use connguard::Connection;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Login(String, String),
    Release,
    Drop,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => ("[a-z]{1,8}", "[a-zA-Z0-9]{0,12}").prop_map(|(u, p)| Op::Login(u, p)),
        2 => Just(Op::Release),
        1 => Just(Op::Drop),
    ]
}

proptest! {
    #[test]
    fn destroy_at_most_once_and_no_login_after_release(
        ops in prop::collection::vec(op_strategy(), 0..32),
        fail_destroy in any::<bool>(),
    ) {
        let backend = if fail_destroy {
            CountingBackend::failing_destroy()
        } else {
            CountingBackend::new()
        };
        let mut conn = Some(Connection::new(&backend).unwrap());
        let mut released = false;

        for op in ops {
            let Some(c) = conn.as_ref() else {
                break;
            };
            match op {
                Op::Login(user, pass) => {
                    let result = c.login(&user, &pass);
                    if released {
                        prop_assert!(result.unwrap_err().is_use_after_release());
                    } else {
                        prop_assert!(result.is_ok());
                        let expected = Call::Login {
                            id: c.id().unwrap(),
                            username: user,
                            password: pass,
                        };
                        prop_assert_eq!(backend.calls().last().cloned(), Some(expected));
                    }
                }
                Op::Release => {
                    let result = c.release();
                    // Only the first release reaches destroy, so only it can fail
                    prop_assert_eq!(result.is_err(), fail_destroy && !released);
                    released = true;
                }
                Op::Drop => conn = None,
            }
        }
        drop(conn);

        prop_assert_eq!(backend.allocations(), 1);
        prop_assert_eq!(backend.destroys(), 1);

        let calls = backend.calls();
        let destroy_at = calls.iter().position(|c| matches!(c, Call::Destroy(_))).unwrap();
        prop_assert_eq!(destroy_at, calls.len() - 1);
    }

    #[test]
    fn concurrent_release_destroys_once(callers in 1usize..16) {
        let backend = Arc::new(CountingBackend::new());
        let conn = Arc::new(Connection::new(Arc::clone(&backend)).unwrap());

        let handles: Vec<_> = (0..callers)
            .map(|_| {
                let conn = Arc::clone(&conn);
                thread::spawn(move || conn.release())
            })
            .collect();
        for handle in handles {
            prop_assert!(handle.join().unwrap().is_ok());
        }

        drop(conn);
        prop_assert_eq!(backend.destroys(), 1);
    }
}
