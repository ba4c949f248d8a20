//! Extractors handlers take as arguments: the session-resolved user,
//! validated bodies and queries, and numeric path ids

mod path;
mod session;
mod validated;

pub use path::IdPath;
pub use session::{AdminUser, CurrentUser, OptionalCurrentUser};
pub use validated::{ApiQuery, ValidatedJson};
