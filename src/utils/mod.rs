pub mod errors;
pub mod page;
pub mod table;
pub mod time;

pub use errors::describe_request_error;
pub use page::Page;
pub use table::Table;
