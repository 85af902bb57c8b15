pub mod fsm;

pub use fsm::Dispatcher;
pub use fsm::MAX_FLOOR;
