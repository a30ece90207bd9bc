//! Engine controller: opening-book lookup first, search second.

mod controller;

pub use controller::Engine;
