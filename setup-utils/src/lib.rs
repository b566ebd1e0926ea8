pub mod elements;
pub use elements::*;

pub mod errors;
pub use errors::*;

pub mod helpers;
pub use helpers::*;

pub mod io;
pub use io::*;

pub mod parallel;
pub use parallel::*;

pub mod progress;
