pub mod form_view;
pub mod scroll;
pub mod select_list;
pub mod text_edit;
pub mod textarea;
pub mod traits;

pub use form_view::FormView;
pub use select_list::PathSelect;
pub use textarea::RawEditor;
