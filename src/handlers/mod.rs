// Handler modules
pub mod list;
pub mod run;

pub use list::handle_list;
pub use run::{RunOptions, handle_run};
