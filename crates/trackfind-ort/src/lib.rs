pub mod diagnostics;
pub mod runner;
pub mod session;

pub use runner::*;
pub use session::*;
