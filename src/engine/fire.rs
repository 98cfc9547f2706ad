//! The transition protocol.
//!
//! One fire call runs, in order: event resolution, guard chain,
//! `before_transition`, action, halt check, `on_transition`, exit hooks,
//! persistence, entry hooks and `after_transition`. Errors from the action,
//! the exit hooks and persistence are routed to `on_error` when one is
//! registered; everything else propagates. Failures in entry hooks and
//! `after_transition` happen after the new state is stored and are reported
//! as committed.

use crate::core::{
    run_all, Event, HookError, HookResult, Specification, State, TransitionContext,
};
use crate::engine::outcome::{FireError, FireOutcome, TransitionFailure};
use crate::host::HostBinding;

/// The host's current state, falling back to the initial state when the
/// stored name is missing, empty or unknown.
pub fn current_state<'s, H, A>(spec: &'s Specification<H, A>, host: &H) -> &'s State<H, A>
where
    H: HostBinding<A>,
{
    match host.load_state() {
        Some(name) if !name.is_empty() => match spec.state(&name) {
            Ok(state) => state,
            Err(_) => {
                tracing::warn!(state = %name, "stored state is not declared, using the initial state");
                spec.initial_state()
            }
        },
        _ => spec.initial_state(),
    }
}

/// Resolve `event` from the host's current state through the guard chain.
///
/// Only reads the host; nothing runs besides guards.
pub fn resolve<'s, H, A>(
    spec: &'s Specification<H, A>,
    host: &H,
    event: &str,
    args: &A,
) -> Result<&'s Event<H, A>, FireError>
where
    H: HostBinding<A>,
{
    select(current_state(spec, host), host, event, args)
}

/// Whether `event` would be accepted from the host's current state.
pub fn can_fire<H, A>(spec: &Specification<H, A>, host: &H, event: &str, args: &A) -> bool
where
    H: HostBinding<A>,
{
    resolve(spec, host, event, args).is_ok()
}

/// Fire `event` against `host`.
pub fn fire<H, A>(
    spec: &Specification<H, A>,
    host: &mut H,
    event: &str,
    args: &A,
) -> Result<FireOutcome, FireError>
where
    H: HostBinding<A>,
{
    let from = current_state(spec, host);
    let selected = select(from, host, event, args)?;
    let to = spec.state(selected.transitions_to())?;
    let mut ctx = TransitionContext::new(from.name(), to.name(), selected.name(), args);

    tracing::debug!(from = ctx.from(), to = ctx.to(), event = ctx.event(), "firing event");

    for hook in &spec.before_transition {
        hook(host, &mut ctx).map_err(|error| failure(&ctx, error))?;
        if ctx.is_halted() {
            break;
        }
    }
    if ctx.is_halted() {
        return halted(ctx);
    }

    let acted = match selected.action() {
        Some(action) => action(host, &mut ctx),
        None => host.run_action(selected.name(), &mut ctx),
    };
    if ctx.is_halted() {
        if let Err(error) = &acted {
            tracing::debug!(%error, "action failed after halting, keeping the halt");
        }
        return halted(ctx);
    }
    if let Err(error) = acted {
        return recover(spec, host, &ctx, error);
    }

    run_all(&spec.on_transition, host, &ctx).map_err(|error| failure(&ctx, error))?;

    if let Err(error) = leave(spec, from, host, &ctx) {
        return recover(spec, host, &ctx, error);
    }
    if let Err(error) = host.store_state(to.name()) {
        return recover(spec, host, &ctx, error);
    }
    tracing::debug!(from = ctx.from(), to = ctx.to(), event = ctx.event(), "transition committed");

    enter(spec, to, host, &ctx).map_err(|error| committed(&ctx, error))?;
    run_all(&spec.after_transition, host, &ctx).map_err(|error| committed(&ctx, error))?;

    Ok(FireOutcome::Transitioned {
        from: ctx.from().to_owned(),
        to: ctx.to().to_owned(),
        event: ctx.event().to_owned(),
    })
}

/// First declaration of `event` on `state` whose guards all pass.
fn select<'s, H, A>(
    state: &'s State<H, A>,
    host: &H,
    event: &str,
    args: &A,
) -> Result<&'s Event<H, A>, FireError>
where
    H: HostBinding<A>,
{
    let mut declared = false;
    for candidate in state.events().iter().filter(|e| e.name() == event) {
        declared = true;
        if candidate.permits(host, args) {
            return Ok(candidate);
        }
    }

    if declared {
        tracing::debug!(state = state.name(), event, "every guard chain rejected the event");
    }
    Err(FireError::NoSuchTransition {
        state: state.name().to_owned(),
        event: event.to_owned(),
    })
}

/// State-scoped exit blocks, then specification-scoped ones, then the host.
fn leave<H, A>(
    spec: &Specification<H, A>,
    from: &State<H, A>,
    host: &mut H,
    ctx: &TransitionContext<'_, A>,
) -> HookResult
where
    H: HostBinding<A>,
{
    run_all(&from.on_exit, host, ctx)?;
    run_all(&spec.on_exit, host, ctx)?;
    host.exit_state(from.name(), ctx)
}

/// State-scoped entry blocks, then specification-scoped ones, then the host.
fn enter<H, A>(
    spec: &Specification<H, A>,
    to: &State<H, A>,
    host: &mut H,
    ctx: &TransitionContext<'_, A>,
) -> HookResult
where
    H: HostBinding<A>,
{
    run_all(&to.on_entry, host, ctx)?;
    run_all(&spec.on_entry, host, ctx)?;
    host.enter_state(to.name(), ctx)
}

fn halted<A>(mut ctx: TransitionContext<'_, A>) -> Result<FireOutcome, FireError> {
    let reason = ctx.take_reason();
    tracing::debug!(
        from = ctx.from(),
        event = ctx.event(),
        reason = reason.as_deref().unwrap_or(""),
        "transition halted"
    );

    if ctx.is_raising() {
        Err(FireError::Halted { reason })
    } else {
        Ok(FireOutcome::Halted {
            from: ctx.from().to_owned(),
            event: ctx.event().to_owned(),
            reason,
        })
    }
}

/// Hand `error` to the `on_error` hooks, or propagate it if there are none.
fn recover<H, A>(
    spec: &Specification<H, A>,
    host: &mut H,
    ctx: &TransitionContext<'_, A>,
    error: HookError,
) -> Result<FireOutcome, FireError> {
    if spec.on_error.is_empty() {
        return Err(failure(ctx, error).into());
    }

    tracing::warn!(
        from = ctx.from(),
        to = ctx.to(),
        event = ctx.event(),
        %error,
        "transition failed, running on_error hooks"
    );
    for hook in &spec.on_error {
        hook(host, &error, ctx).map_err(|raised| failure(ctx, raised))?;
    }

    Ok(FireOutcome::Recovered {
        from: ctx.from().to_owned(),
        to: ctx.to().to_owned(),
        event: ctx.event().to_owned(),
        error,
    })
}

fn failure<A>(ctx: &TransitionContext<'_, A>, source: HookError) -> TransitionFailure {
    TransitionFailure {
        from: ctx.from().to_owned(),
        to: ctx.to().to_owned(),
        event: ctx.event().to_owned(),
        committed: false,
        source,
    }
}

/// Failure raised after `store_state` succeeded.
fn committed<A>(ctx: &TransitionContext<'_, A>, source: HookError) -> TransitionFailure {
    tracing::warn!(
        from = ctx.from(),
        to = ctx.to(),
        event = ctx.event(),
        %source,
        "hook failed after the new state was stored"
    );
    TransitionFailure {
        committed: true,
        ..failure(ctx, source)
    }
}
