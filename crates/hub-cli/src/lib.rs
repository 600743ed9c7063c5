//! Library components of the `course-hub` command-line driver.

pub mod logging;
pub mod replay;
pub mod script;
