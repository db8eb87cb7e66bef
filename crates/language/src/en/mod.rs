//! English language bundle

mod rules;
mod transcript;
mod vocabulary;

pub use rules::rules;
pub use transcript::transcript;
pub use vocabulary::vocabulary;
