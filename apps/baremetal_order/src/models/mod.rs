// baremetal_order/src/models/mod.rs

//! Typed request and response bodies for the OVH order API.
//! Every response is decoded into one of these at the boundary; a missing or
//! unconvertible field becomes a data-shape error instead of a panic.

pub mod cart;
pub mod ids;
pub mod payment;

pub use cart::{AddItemRequest, AddOptionRequest, AddedItem, CheckedOutOrder, CreateCartRequest, CreatedCart};
pub use ids::{CartId, ItemId, OrderId, PaymentMethodId};
pub use payment::{PayRequest, PaymentMethod};
