use crate::runtime::event::WidgetAction;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Action(WidgetAction),
    RequestRender,
}
