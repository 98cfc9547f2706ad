//! Callback signatures used at the fixed points of the transition protocol.

use super::context::TransitionContext;

/// Error raised by a hook, action or persistence call.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Result returned by every hook.
pub type HookResult = Result<(), HookError>;

/// Hook that may halt the transition: actions and `before_transition`.
pub type Hook<H, A> =
    Box<dyn Fn(&mut H, &mut TransitionContext<'_, A>) -> HookResult + Send + Sync>;

/// Hook with a read-only context: entry and exit blocks, `on_transition`
/// and `after_transition`. These run past the halt check.
pub type StateHook<H, A> =
    Box<dyn Fn(&mut H, &TransitionContext<'_, A>) -> HookResult + Send + Sync>;

/// Hook receiving the error captured from the action, exit hooks or persistence.
pub type ErrorHook<H, A> =
    Box<dyn Fn(&mut H, &HookError, &TransitionContext<'_, A>) -> HookResult + Send + Sync>;

/// Run state hooks in order, stopping at the first failure.
pub(crate) fn run_all<H, A>(
    hooks: &[StateHook<H, A>],
    host: &mut H,
    ctx: &TransitionContext<'_, A>,
) -> HookResult {
    for hook in hooks {
        hook(host, ctx)?;
    }
    Ok(())
}
