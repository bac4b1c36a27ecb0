pub mod event;
pub mod flow;
pub mod length;
pub mod session;
pub mod spelling;
