use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::state::app::AppState;
use crate::widgets::traits::InteractionResult;

pub struct Reducer;

impl Reducer {
    pub fn reduce(state: &mut AppState, command: Command) -> Vec<Effect> {
        match command {
            Command::Exit => {
                state.request_exit();
                vec![]
            }
            Command::NextFocus => {
                state.focus_next();
                vec![Effect::RequestRender]
            }
            Command::PrevFocus => {
                state.focus_prev();
                vec![Effect::RequestRender]
            }
            Command::ToggleFormat => {
                state.toggle_format();
                vec![Effect::RequestRender]
            }
            Command::InputKey(key) => collect_effects(state.dispatch_key_to_focused(key)),
            Command::TextAction(action) => {
                collect_effects(state.dispatch_text_action_to_focused(action))
            }
            Command::Noop => vec![],
        }
    }
}

fn collect_effects(result: InteractionResult) -> Vec<Effect> {
    let mut effects: Vec<Effect> = result.actions.into_iter().map(Effect::Action).collect();
    if result.request_render {
        effects.push(Effect::RequestRender);
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::Reducer;
    use crate::core::format::DocumentFormat;
    use crate::core::mutate::FieldInput;
    use crate::core::value::Value;
    use crate::core::value_path::ValuePath;
    use crate::runtime::command::Command;
    use crate::runtime::effect::Effect;
    use crate::runtime::event::WidgetAction;
    use crate::state::app::{AppState, Pane};
    use crate::state::session::Session;
    use crate::terminal::{KeyCode, KeyEvent};
    use serde_json::json;

    fn app() -> AppState {
        let doc = Value::from(json!({"on": false}));
        AppState::new(Session::new(doc, DocumentFormat::Json), "data.json")
    }

    #[test]
    fn key_becomes_widget_action() {
        let mut state = app();
        let effects = Reducer::reduce(
            &mut state,
            Command::InputKey(KeyEvent::plain(KeyCode::Char(' '))),
        );
        assert_eq!(
            effects,
            vec![
                Effect::Action(WidgetAction::FieldEdited {
                    path: ValuePath::parse_dotted("on"),
                    input: FieldInput::Bool(true),
                }),
                Effect::RequestRender,
            ]
        );
    }

    #[test]
    fn exit_and_focus_commands() {
        let mut state = app();
        assert_eq!(
            Reducer::reduce(&mut state, Command::PrevFocus),
            vec![Effect::RequestRender]
        );
        assert_eq!(state.focus(), Pane::VisibleKeys);
        assert!(Reducer::reduce(&mut state, Command::Exit).is_empty());
        assert!(state.should_exit());
    }

    #[test]
    fn ignored_key_requests_nothing() {
        let mut state = app();
        let effects = Reducer::reduce(&mut state, Command::InputKey(KeyEvent::plain(KeyCode::Esc)));
        assert!(effects.is_empty());
    }
}
