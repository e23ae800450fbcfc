pub mod directory;
pub mod dismissal;
pub mod query;
pub mod seed;
pub mod storage;
pub mod traversal;

pub use directory::*;
pub use dismissal::*;
pub use query::*;
pub use seed::*;
pub use storage::*;
pub use traversal::*;
