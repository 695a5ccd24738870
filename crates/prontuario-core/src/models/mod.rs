mod document;
mod patient;
mod profile;
mod session;
mod status;

pub use document::*;
pub use patient::*;
pub use profile::*;
pub use session::*;
pub use status::*;
