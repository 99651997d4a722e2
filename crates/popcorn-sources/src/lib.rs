pub mod error;
pub mod omdb;
pub mod traits;

pub use error::{DirectoryError, USER_FACING_ERROR};
pub use omdb::OmdbClient;
pub use traits::MovieDirectory;
