//! Contains the value types exchanged with the order-management service:
//! retrieved orders, error responses and the request envelopes of the two
//! supported operations.

pub mod bill_status;
pub mod order;
pub mod request;

pub use {
    bill_status::{BillStatusError, BillStatusFlag, BillStatusMask},
    order::{ErrorResponse, Order, OrderItem},
    request::{Envelope, GetOrders, Request, UpdateStatus},
};
