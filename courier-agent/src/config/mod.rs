mod app;
pub use app::App;

mod mediator;
pub use mediator::Mediator;

mod sds;
pub use sds::Sds;

mod config;
pub use config::Config;

mod parser;
pub use parser::Parser;
