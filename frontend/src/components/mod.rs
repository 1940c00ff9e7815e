mod confirm_dialog;
mod row_menu;
mod toaster;

pub use confirm_dialog::ConfirmDialog;
pub use row_menu::RowMenu;
pub use toaster::Toaster;
