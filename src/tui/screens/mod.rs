pub mod form;
pub mod help;
pub mod table;

pub use form::UserFormScreen;
pub use help::HelpScreen;
pub use table::TableScreen;
