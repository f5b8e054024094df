use yew::prelude::*;

pub mod header;
pub mod not_found;
pub mod todo_detail;
pub mod todo_form;
pub mod todo_list;

/// Confirmation gate backed by the browser's confirm dialog. The hooks
/// only see a `Callback<String, bool>`, keeping them free of display
/// concerns.
pub(crate) fn confirm_gate() -> Callback<String, bool> {
    Callback::from(|message: String| {
        web_sys::window()
            .map(|window| window.confirm_with_message(&message).unwrap_or(false))
            .unwrap_or(false)
    })
}
