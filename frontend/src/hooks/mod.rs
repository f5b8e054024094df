pub mod use_todo_detail;
pub mod use_todo_form;
pub mod use_todo_list;
