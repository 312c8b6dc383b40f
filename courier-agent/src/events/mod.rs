mod hub;
pub use hub::EventHub;
