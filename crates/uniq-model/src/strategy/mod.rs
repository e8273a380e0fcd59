mod key;
pub use key::KeyStrategy;
