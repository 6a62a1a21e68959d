//! Status state machines for orders, custom orders, and stock requests.
//!
//! Each status is a closed enum whose serde/string form is the literal value
//! stored in the database and shown in filters. Transitions are only made
//! through an action checked against the enum's transition table, never by
//! writing a caller-supplied status string.

mod custom_order_status;
mod order_status;
mod stock_request_status;

pub use custom_order_status::{CustomOrderAction, CustomOrderStatus, CustomOrderTransition, Quote};
pub use order_status::{OrderAction, OrderStatus, OrderTransition};
pub use stock_request_status::{StockRequestAction, StockRequestStatus};
