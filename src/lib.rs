//! Open many concurrent TCP clients against a server, each writing one
//! fixed request, and report once they have all finished.

pub mod driver;
pub mod logging;
pub mod sink;

pub use driver::{run, send_one, Config, Report, REQUEST};
pub use sink::{Capture, Sink};
