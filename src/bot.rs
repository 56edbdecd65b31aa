use crate::action::Action;
use crate::rules::Rules;
use crate::state::ViewOf;

/// Interface for scripted opponents. Bots only ever see their own view and
/// the legal actions the engine enumerated for them.
pub trait Bot<R: Rules> {
    fn select_action(
        &mut self,
        state: &ViewOf<R>,
        legal_actions: &[Action<R::Choice>],
    ) -> Action<R::Choice>;
}
