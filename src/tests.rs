#[cfg(test)]
pub mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::payment_client::{
        GatewayError, PaymentGateway, PaymentRecord, PaymentRequest, PaymentStatus,
    };
    use crate::routes::checkout::schemas::{Checkout, CheckoutPatch, CheckoutStatus, NewCheckout};
    use crate::routes::checkout::store::CheckoutStore;
    use crate::schemas::GenericResponse;
    use crate::sqs_client::{QueueMessage, QueueService};

    #[derive(Default)]
    pub struct MockPaymentGateway {
        pub create_response: Mutex<Option<PaymentRecord>>,
        pub lookup_records: Mutex<HashMap<String, PaymentRecord>>,
        pub fail_create: bool,
        pub created: Mutex<Vec<PaymentRequest>>,
        pub lookups: Mutex<Vec<String>>,
    }

    impl MockPaymentGateway {
        pub fn returning(record: PaymentRecord) -> Self {
            let gateway = Self::default();
            *gateway.create_response.lock().unwrap() = Some(record);
            gateway
        }

        pub fn with_payment(record: PaymentRecord) -> Self {
            let gateway = Self::default();
            gateway
                .lookup_records
                .lock()
                .unwrap()
                .insert(record.id.clone(), record);
            gateway
        }

        pub fn failing() -> Self {
            MockPaymentGateway {
                fail_create: true,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for MockPaymentGateway {
        async fn create(&self, request: &PaymentRequest) -> Result<PaymentRecord, GatewayError> {
            self.created.lock().unwrap().push(request.clone());
            if self.fail_create {
                return Err(GatewayError::InvalidResponse(
                    "payment gateway is down".to_string(),
                ));
            }
            let record = self.create_response.lock().unwrap().clone();
            Ok(record.unwrap_or_else(|| PaymentRecord {
                id: format!("pay-{}", request.order_id),
                order_id: request.order_id.clone(),
                status: PaymentStatus::Pending,
                qr_code: Some(format!("qr-{}", request.order_id)),
            }))
        }

        async fn get_by_args(&self, payment_id: &str) -> Result<Option<PaymentRecord>, GatewayError> {
            self.lookups.lock().unwrap().push(payment_id.to_string());
            let record = self.lookup_records.lock().unwrap().get(payment_id).cloned();
            Ok(record.map(|record| PaymentRecord {
                qr_code: None,
                ..record
            }))
        }
    }

    #[derive(Default)]
    pub struct MemoryCheckoutStore {
        pub rows: Mutex<Vec<Checkout>>,
        pub fail_create: bool,
        pub fail_update_missing: bool,
        pub order_lookups: Mutex<Vec<String>>,
        pub updates: Mutex<Vec<Uuid>>,
    }

    impl MemoryCheckoutStore {
        pub fn with_rows(rows: Vec<Checkout>) -> Self {
            let store = Self::default();
            *store.rows.lock().unwrap() = rows;
            store
        }
    }

    #[async_trait]
    impl CheckoutStore for MemoryCheckoutStore {
        async fn get_all(&self) -> Result<Vec<Checkout>, anyhow::Error> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Option<Checkout>, anyhow::Error> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|row| row.id == id).cloned())
        }

        async fn get_by_order_id(&self, order_id: &str) -> Result<Option<Checkout>, anyhow::Error> {
            self.order_lookups.lock().unwrap().push(order_id.to_string());
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|row| row.order_id == order_id).cloned())
        }

        async fn create(&self, checkout: &NewCheckout) -> Result<Checkout, anyhow::Error> {
            if self.fail_create {
                return Err(anyhow::anyhow!("database is unavailable"));
            }
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|row| row.order_id == checkout.order_id) {
                return Err(anyhow::anyhow!(
                    "duplicate key value violates unique constraint \"checkout_order_id_key\""
                ));
            }
            let now = Utc::now();
            let row = Checkout {
                id: Uuid::new_v4(),
                order_id: checkout.order_id.clone(),
                payment_id: checkout.payment_id.clone(),
                payment_code: checkout.payment_code.clone(),
                status: checkout.status,
                created_at: now,
                updated_at: now,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn update(
            &self,
            id: Uuid,
            patch: &CheckoutPatch,
        ) -> Result<Option<Checkout>, anyhow::Error> {
            self.updates.lock().unwrap().push(id);
            if self.fail_update_missing {
                return Ok(None);
            }
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|row| row.id == id) {
                Some(row) => {
                    if let Some(payment_id) = &patch.payment_id {
                        row.payment_id = payment_id.clone();
                    }
                    if let Some(payment_code) = &patch.payment_code {
                        row.payment_code = payment_code.clone();
                    }
                    if let Some(status) = patch.status {
                        row.status = status;
                    }
                    row.updated_at = Utc::now();
                    Ok(Some(row.clone()))
                }
                None => Ok(None),
            }
        }
    }

    #[derive(Default)]
    pub struct MockQueueService {
        pub incoming: Mutex<Vec<QueueMessage>>,
        pub deleted: Mutex<Vec<String>>,
        pub sent: Mutex<Vec<(String, String, String)>>,
        pub fail_receive: bool,
        pub fail_send: bool,
    }

    impl MockQueueService {
        pub fn with_messages(messages: Vec<QueueMessage>) -> Self {
            let queue = Self::default();
            *queue.incoming.lock().unwrap() = messages;
            queue
        }
    }

    #[async_trait]
    impl QueueService for MockQueueService {
        async fn receive_messages(
            &self,
            _queue_url: &str,
        ) -> Result<Vec<QueueMessage>, anyhow::Error> {
            if self.fail_receive {
                return Err(anyhow::anyhow!("connection refused"));
            }
            let mut incoming = self.incoming.lock().unwrap();
            Ok(incoming.drain(..).collect())
        }

        async fn delete_message(
            &self,
            _queue_url: &str,
            receipt_handle: &str,
        ) -> Result<(), anyhow::Error> {
            self.deleted.lock().unwrap().push(receipt_handle.to_string());
            Ok(())
        }

        async fn send_message(
            &self,
            queue_url: &str,
            group_id: &str,
            body: &str,
        ) -> Result<(), anyhow::Error> {
            if self.fail_send {
                return Err(anyhow::anyhow!("connection refused"));
            }
            self.sent.lock().unwrap().push((
                queue_url.to_string(),
                group_id.to_string(),
                body.to_string(),
            ));
            Ok(())
        }
    }

    pub fn get_dummy_queue_message(id: &str, body: &str) -> QueueMessage {
        QueueMessage {
            id: id.to_string(),
            receipt_handle: format!("receipt-{}", id),
            body: body.to_string(),
        }
    }

    pub fn get_dummy_payment_record(
        id: &str,
        order_id: &str,
        status: PaymentStatus,
    ) -> PaymentRecord {
        PaymentRecord {
            id: id.to_string(),
            order_id: order_id.to_string(),
            status,
            qr_code: Some("QRCODE123".to_string()),
        }
    }

    pub fn get_dummy_checkout(order_id: &str, payment_id: &str, status: CheckoutStatus) -> Checkout {
        let now = Utc::now();
        Checkout {
            id: Uuid::new_v4(),
            order_id: order_id.to_string(),
            payment_id: payment_id.to_string(),
            payment_code: "QRCODE123".to_string(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_generic_response_envelope() {
        let success: GenericResponse<()> = GenericResponse::success("All good", Some(()));
        let value = serde_json::to_value(&success).unwrap();
        assert_eq!(value["status"], serde_json::json!(true));
        assert_eq!(value["code"], serde_json::json!("200"));
        assert_eq!(value["customer_message"], serde_json::json!("All good"));

        let failure: GenericResponse<()> = GenericResponse::error("Bad request", "400", Some(()));
        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["status"], serde_json::json!(false));
        assert_eq!(value["code"], serde_json::json!("400"));
    }
}
