//! Requests accepted by `POST /api/orders`.
//!
//! The two operations use different envelopes: `getOrders` is sent as a JSON
//! array holding a single request object while `updateStatus` is sent as a
//! bare object. [`Request::envelope`] produces the right shape.

use {
    crate::bill_status::{BillStatusFlag, BillStatusMask},
    serde::Serialize,
};

/// Filter for retrieving orders. `None` filters are serialized as `null`,
/// which the service reads as "no filter"; they are never omitted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrders {
    pub customer_id: Option<String>,
    pub from_time: String,
    pub to_time: String,
    pub bill_status: Option<BillStatusMask>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatus {
    pub hash: String,
    pub bill_status: BillStatusFlag,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum Request {
    GetOrders(GetOrders),
    UpdateStatus(UpdateStatus),
}

/// The serialized form of a [`Request`] as it goes on the wire.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Envelope<'a> {
    List([&'a Request; 1]),
    Single(&'a Request),
}

impl Request {
    pub fn method(&self) -> &'static str {
        match self {
            Self::GetOrders(_) => "getOrders",
            Self::UpdateStatus(_) => "updateStatus",
        }
    }

    pub fn envelope(&self) -> Envelope<'_> {
        match self {
            Self::GetOrders(_) => Envelope::List([self]),
            Self::UpdateStatus(_) => Envelope::Single(self),
        }
    }
}

impl From<GetOrders> for Request {
    fn from(request: GetOrders) -> Self {
        Self::GetOrders(request)
    }
}

impl From<UpdateStatus> for Request {
    fn from(request: UpdateStatus) -> Self {
        Self::UpdateStatus(request)
    }
}
