pub mod gateway;
pub mod migration;
pub mod serialization;
pub mod store;
pub mod traits;

pub use gateway::*;
pub use migration::*;
pub use serialization::*;
pub use store::*;
pub use traits::*;
