#![no_std]

extern crate alloc;

pub use api::*;
pub use board::*;
pub use category::*;
pub use error::*;
pub use layout::*;
pub use message::*;
pub use persistence::*;
pub use selection::*;
pub use session::*;
pub use types::*;

pub use connections_protocol as protocol;

mod api;
mod board;
mod category;
mod error;
mod layout;
mod message;
mod persistence;
mod selection;
mod session;
mod types;

#[cfg(test)]
mod testing;
