pub mod check_digit;
pub mod expiry;
pub mod mrz;

pub use check_digit::{char_value, compute_check_digit};
pub use expiry::ExpiryValidator;
pub use mrz::{validate, MrzValidator};
