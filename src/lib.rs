pub mod age;
pub mod error;
pub mod fs;
pub mod prompt;
pub mod report;
pub mod scanner;
pub mod sweep;
pub mod util;
