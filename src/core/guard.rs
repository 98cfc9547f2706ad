//! Guard predicates for controlling transitions.
//!
//! Guards decide whether an event may fire from the host's current state.
//! They only borrow the host immutably, so evaluating them never changes
//! anything and can be repeated freely.

use crate::host::HostBinding;
use std::fmt;

enum Predicate<H, A> {
    Inline(Box<dyn Fn(&H, &A) -> bool + Send + Sync>),
    Named(String),
}

/// Predicate that determines if an event can fire.
///
/// A guard is either an inline closure or the name of a predicate the host
/// answers through [`HostBinding::check_guard`].
///
/// # Example
///
/// ```rust
/// use stateflow::core::Guard;
/// use stateflow::host::{HostBinding, StateCell};
/// use stateflow::core::HookResult;
///
/// struct Flashlight {
///     battery: u8,
///     state: StateCell,
/// }
///
/// impl HostBinding for Flashlight {
///     fn load_state(&self) -> Option<String> {
///         self.state.get().map(str::to_owned)
///     }
///
///     fn store_state(&mut self, state: &str) -> HookResult {
///         self.state.set(state);
///         Ok(())
///     }
/// }
///
/// let charged = Guard::new(|light: &Flashlight, _: &()| light.battery > 10);
///
/// let light = Flashlight { battery: 5, state: StateCell::new() };
/// assert!(!charged.check(&light, &()));
/// ```
pub struct Guard<H, A> {
    predicate: Predicate<H, A>,
}

impl<H, A> Guard<H, A> {
    /// Create a guard from an inline predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&H, &A) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Predicate::Inline(Box::new(predicate)),
        }
    }

    /// Create a guard that asks the host to evaluate the predicate `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Guard {
            predicate: Predicate::Named(name.into()),
        }
    }

    /// Name of the host predicate, if this is a named guard.
    pub fn name(&self) -> Option<&str> {
        match &self.predicate {
            Predicate::Named(name) => Some(name),
            Predicate::Inline(_) => None,
        }
    }

    /// Check if the guard lets the event fire.
    ///
    /// A named guard the host does not know fails closed.
    pub fn check(&self, host: &H, args: &A) -> bool
    where
        H: HostBinding<A>,
    {
        match &self.predicate {
            Predicate::Inline(predicate) => predicate(host, args),
            Predicate::Named(name) => match host.check_guard(name, args) {
                Some(passed) => passed,
                None => {
                    tracing::warn!(guard = %name, "host does not answer named guard, treating as failed");
                    false
                }
            },
        }
    }
}

impl<H, A> fmt::Debug for Guard<H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.predicate {
            Predicate::Inline(_) => f.write_str("Guard(<inline>)"),
            Predicate::Named(name) => write!(f, "Guard({name})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HookResult;

    struct Account {
        balance: i64,
        verified: bool,
    }

    impl HostBinding<i64> for Account {
        fn load_state(&self) -> Option<String> {
            None
        }

        fn store_state(&mut self, _state: &str) -> HookResult {
            Ok(())
        }

        fn check_guard(&self, name: &str, _amount: &i64) -> Option<bool> {
            match name {
                "verified" => Some(self.verified),
                _ => None,
            }
        }
    }

    #[test]
    fn inline_guard_sees_host_and_args() {
        let guard = Guard::new(|account: &Account, amount: &i64| account.balance >= *amount);
        let account = Account {
            balance: 100,
            verified: false,
        };

        assert!(guard.check(&account, &50));
        assert!(!guard.check(&account, &150));
    }

    #[test]
    fn named_guard_is_answered_by_host() {
        let guard: Guard<Account, i64> = Guard::named("verified");
        let mut account = Account {
            balance: 0,
            verified: false,
        };

        assert!(!guard.check(&account, &0));
        account.verified = true;
        assert!(guard.check(&account, &0));
        assert_eq!(guard.name(), Some("verified"));
    }

    #[test]
    fn unknown_named_guard_fails_closed() {
        let guard: Guard<Account, i64> = Guard::named("frozen");
        let account = Account {
            balance: 0,
            verified: true,
        };

        assert!(!guard.check(&account, &0));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|account: &Account, _: &i64| account.balance > 0);
        let account = Account {
            balance: 1,
            verified: false,
        };

        assert_eq!(guard.check(&account, &0), guard.check(&account, &0));
    }
}
