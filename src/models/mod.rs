pub mod category;
pub mod group;
pub mod transaction;
pub mod user;

pub use category::*;
pub use group::*;
pub use transaction::*;
pub use user::*;
