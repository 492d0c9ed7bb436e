pub mod dates;
pub mod normalize;

pub use dates::{day_key, parse_program_date};
pub use normalize::{ascii_fold, normalize_text};
