//! Domain types shared by the storefront actors.

pub mod cart;
pub mod error;
pub mod money;
pub mod order;
pub mod payment;
pub mod product;
pub mod user;

pub use cart::*;
pub use error::*;
pub use order::*;
pub use payment::*;
pub use product::*;
pub use user::*;
