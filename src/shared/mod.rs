pub mod macros;
pub mod structs;

pub use structs::Behaviour;
pub use structs::Direction;
pub use structs::DispatcherStatus;
