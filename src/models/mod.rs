pub mod conference;
pub mod author;
pub mod paper;
pub mod session;

pub use conference::*;
pub use author::*;
pub use paper::*;
pub use session::*;
