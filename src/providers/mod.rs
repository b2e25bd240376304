pub mod exchange;

pub use exchange::ExchangeInput;
