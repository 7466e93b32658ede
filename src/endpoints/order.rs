use crate::client::Transport;
use crate::endpoints::{check_id, fetch_property};
use crate::errors::GengoError;
use crate::payloads::Order;
use crate::protocol::envelope::unpack;

fn order_path(order_id: i64) -> String {
    format!("translate/order/{}", order_id)
}

/// Orders created by job submissions
#[derive(Debug, Clone, Copy)]
pub struct OrderApi<'a> {
    transport: &'a dyn Transport,
}

impl<'a> OrderApi<'a> {
    pub(crate) fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    pub async fn get(&self, order_id: i64) -> Result<Order, GengoError> {
        check_id(order_id, "order")?;

        let order = fetch_property(self.transport, &order_path(order_id), "order").await?;
        Order::from_json(&order)
    }

    /// Cancel every job of the order that has not been started
    pub async fn delete(&self, order_id: i64) -> Result<(), GengoError> {
        check_id(order_id, "order")?;

        let raw = self.transport.delete(&order_path(order_id)).await?;
        unpack(&raw).map(|_| ())
    }
}
