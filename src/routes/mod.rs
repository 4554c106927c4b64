pub mod checkout;
mod route;
pub mod util;

pub use checkout::checkout_route;
pub use route::main_route;
pub use util::util_route;
