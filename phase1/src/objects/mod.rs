mod contribution;
pub use contribution::*;

mod parameters;
pub use parameters::*;

mod public_key;
pub use public_key::*;
