mod format;
pub use format::LoggerFormat;

mod level;
pub use level::LoggerLevel;

mod timer;
pub use timer::LoggerRfc3339;

mod timezone;
pub use timezone::LoggerTimeZone;
