mod error;
pub use error::*;

mod context;
pub use context::*;

mod session;
pub use session::*;

mod chatty_python;
pub use chatty_python::*;
