#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use chrono::{NaiveDate, NaiveDateTime};
    use crate::app_system::{Clock, OrderError, OrderSystem, SystemConfig};
    use crate::clients::OrderClient;
    use crate::domain::{NewOrder, Order, Stage};
    use crate::mock_framework::{create_mock_client, expect_action, expect_create, expect_delete, expect_list};
    use crate::notification::{Notification, NotificationClient, NotifyError, SmsGateway};
    use crate::order_actor::{OrderAction, OrderActionResult};
    use crate::workflow::WorkflowError;

    const TENANT: &str = "tenant_a";

    #[derive(Clone, Default)]
    struct RecordingGateway {
        sent: Arc<Mutex<Vec<Notification>>>,
        fail: bool,
    }

    impl SmsGateway for RecordingGateway {
        async fn send(&mut self, notification: &Notification) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(notification.clone());
            if self.fail {
                Err(NotifyError::Rejected("quota exceeded".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap().and_hms_opt(10, 0, 0).unwrap()
    }

    fn fixed_clock() -> Clock {
        Arc::new(now)
    }

    fn start(gateway: RecordingGateway) -> OrderSystem {
        OrderSystem::with_parts(SystemConfig::default(), gateway, fixed_clock())
    }

    fn tenant() -> String {
        TENANT.to_string()
    }

    async fn order_at_shipment(client: &OrderClient, input: NewOrder) -> String {
        let id = client.create_order(tenant(), input).await.unwrap();
        for _ in 0..4 {
            client.advance_order(tenant(), id.clone()).await.unwrap();
        }
        id
    }

    #[tokio::test]
    async fn test_order_walks_pipeline_and_ships() {
        let gateway = RecordingGateway::default();
        let sent = gateway.sent.clone();
        let system = start(gateway);
        let client = system.order_client.clone();

        let input = NewOrder::new("Ayşe Yılmaz", "Corner sofa", 16000.0).with_phone("0532 111 22 33");
        let id = client.create_order(tenant(), input).await.unwrap();
        assert_eq!(id, "order_1");

        let mut stages = Vec::new();
        for _ in 0..4 {
            stages.push(client.advance_order(tenant(), id.clone()).await.unwrap().status);
        }
        assert_eq!(stages, vec![Stage::Upholstery, Stage::Paint, Stage::Package, Stage::Shipment]);

        let result = client.advance_order(tenant(), id.clone()).await;
        assert_eq!(result, Err(OrderError::Validation(WorkflowError::NoNextStage(Stage::Shipment))));

        let shipped = client.confirm_shipment(tenant(), id.clone()).await.unwrap();
        assert!(shipped.is_shipped);

        let stats = client.statistics(tenant()).await.unwrap();
        assert_eq!(stats.monthly_revenue, 16000.0);
        assert_eq!(stats.counters.active, 0);
        assert_eq!(stats.counters.completed_this_month, 1);

        drop(client);
        system.shutdown().await.unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "05321112233");
        assert!(sent[0].message.contains("order_1"));
        assert!(sent[0].message.contains("05321112233"));
    }

    #[tokio::test]
    async fn test_confirm_shipment_without_phone_leaves_order_unshipped() {
        let system = start(RecordingGateway::default());
        let client = system.order_client.clone();

        let id = order_at_shipment(&client, NewOrder::new("Can", "Table", 4000.0)).await;
        let result = client.confirm_shipment(tenant(), id.clone()).await;
        assert_eq!(result, Err(OrderError::Validation(WorkflowError::MissingPhone)));

        let order = client.get_order(tenant(), id).await.unwrap().unwrap();
        assert_eq!(order.status, Stage::Shipment);
        assert!(!order.is_shipped);
    }

    #[tokio::test]
    async fn test_notification_failure_keeps_shipment() {
        let gateway = RecordingGateway { fail: true, ..RecordingGateway::default() };
        let system = start(gateway);
        let client = system.order_client.clone();

        let id = order_at_shipment(&client, NewOrder::new("Can", "Table", 4000.0).with_phone("05551234567")).await;
        client.confirm_shipment(tenant(), id.clone()).await.unwrap();

        let order = client.get_order(tenant(), id).await.unwrap().unwrap();
        assert!(order.is_shipped);
    }

    #[tokio::test]
    async fn test_foreign_tenant_gets_not_found() {
        let system = start(RecordingGateway::default());
        let client = system.order_client.clone();
        let id = client.create_order(tenant(), NewOrder::new("Can", "Table", 4000.0)).await.unwrap();

        let intruder = "tenant_b".to_string();
        assert_eq!(client.advance_order(intruder.clone(), id.clone()).await, Err(OrderError::NotFound(id.clone())));
        assert_eq!(client.cancel_order(intruder.clone(), id.clone()).await, Err(OrderError::NotFound(id.clone())));
        assert!(client.load_orders(intruder).await.unwrap().is_empty());

        client.cancel_order(tenant(), id.clone()).await.unwrap();
        assert_eq!(client.get_order(tenant(), id.clone()).await.unwrap(), None);
        assert_eq!(client.revert_order(tenant(), id.clone()).await, Err(OrderError::NotFound(id)));
    }

    #[tokio::test]
    async fn test_dashboard_and_customers() {
        let system = start(RecordingGateway::default());
        let client = system.order_client.clone();
        let today = now().date();

        let late = NewOrder::new("Şule", "Wardrobe", 9000.0)
            .with_company("Ege Ltd")
            .with_delivery_date(today - chrono::Duration::days(3));
        let late_id = client.create_order(tenant(), late).await.unwrap();
        let soon = NewOrder::new("Burak", "Bed", 7000.0).with_delivery_date(today + chrono::Duration::days(2));
        client.create_order(tenant(), soon).await.unwrap();
        let later = NewOrder::new("Çetin", "Chair", 800.0).with_delivery_date(today + chrono::Duration::days(30));
        let later_id = client.create_order(tenant(), later).await.unwrap();
        client.advance_order(tenant(), later_id.clone()).await.unwrap();
        client.advance_order(tenant(), later_id).await.unwrap();

        let counters = client.dashboard(tenant()).await.unwrap();
        assert_eq!(counters.active, 3);
        assert_eq!(counters.critical_delays, 1);
        assert_eq!(counters.in_paint, 1);

        let urgent: Vec<String> = client.urgent_orders(tenant()).await.unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(urgent, vec![late_id, "order_2".to_string()]);

        let names: Vec<String> = client.customers(tenant()).await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Burak", "Çetin", "Şule"]);

        let invoice = client.invoice(tenant(), "order_2".to_string()).await.unwrap();
        assert!((invoice.subtotal - 7000.0 / 1.2).abs() < 1e-9);
        assert_eq!(invoice.total, 7000.0);
        assert_eq!(client.monthly_revenue(tenant()).await.unwrap(), 0.0);
        assert!(client.sales_archive(tenant()).await.unwrap().is_empty());
        assert!(client.monthly_archive(tenant()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_same_timestamp_orders_list_newest_created_first() {
        let system = start(RecordingGateway::default());
        let client = system.order_client.clone();

        for n in 1..=10 {
            let input = NewOrder::new("Ayşe", "Sofa", 100.0).with_company(format!("Co{}", n));
            client.create_order(tenant(), input).await.unwrap();
        }

        let ids: Vec<String> = client.load_orders(tenant()).await.unwrap().into_iter().map(|o| o.id).collect();
        let expected: Vec<String> = (1..=10).rev().map(|n| format!("order_{}", n)).collect();
        assert_eq!(ids, expected);

        let customers = client.customers(tenant()).await.unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].company_name.as_deref(), Some("Co10"));
    }

    #[tokio::test]
    async fn test_production_board_and_weekly_chart() {
        let system = start(RecordingGateway::default());
        let client = system.order_client.clone();

        let sofa = client.create_order(tenant(), NewOrder::new("Ayşe", "Köşe koltuk", 100.0)).await.unwrap();
        let table = client.create_order(tenant(), NewOrder::new("Can", "Yemek masası", 50.0)).await.unwrap();
        client.advance_order(tenant(), table.clone()).await.unwrap();
        let sold = order_at_shipment(&client, NewOrder::new("Deniz", "Dolap", 80.0).with_phone("05551234567")).await;
        client.confirm_shipment(tenant(), sold).await.unwrap();

        let board = client.production_board(tenant()).await.unwrap();
        assert_eq!(board.len(), 5);
        assert_eq!(board[0].0, Stage::Cutting);
        assert_eq!(board[0].1.iter().map(|o| o.id.clone()).collect::<Vec<_>>(), vec![sofa]);
        assert_eq!(board[1].1.iter().map(|o| o.id.clone()).collect::<Vec<_>>(), vec![table]);
        assert!(board[4].1.is_empty());
        assert_eq!(client.orders_in_stage(tenant(), Stage::Shipment).await.unwrap().len(), 1);

        let week = client.weekly_chart(tenant()).await.unwrap();
        assert_eq!(week.len(), 7);
        assert_eq!(week[6].date, now().date());
        assert_eq!(
            week[6].counts,
            vec![("koltuk".to_string(), 1), ("masa".to_string(), 1), ("dolap".to_string(), 1)]
        );

        let stats = client.statistics(tenant()).await.unwrap();
        assert_eq!(stats.created_this_month, 3);
        assert_eq!(stats.completion_ratio, 3.0);
    }

    #[tokio::test]
    async fn test_confirm_shipment_dispatches_after_store_ack() {
        let (inner, mut order_rx) = create_mock_client::<Order>(10);
        let (notify_tx, mut notify_rx) = tokio::sync::mpsc::channel(4);
        let client = OrderClient::new(
            inner,
            NotificationClient::new(notify_tx),
            fixed_clock(),
            Arc::new(SystemConfig::default()),
        );

        let task = tokio::spawn(async move { client.confirm_shipment(tenant(), "order_1".to_string()).await });

        let (owner, id, action, responder) = expect_action(&mut order_rx).await.expect("Expected Order Action");
        assert_eq!(owner, TENANT);
        assert_eq!(id, "order_1");
        match action {
            OrderAction::ConfirmShipment { at, min_phone_digits } => {
                assert_eq!(at, now());
                assert_eq!(min_phone_digits, 10);
            }
            other => panic!("Unexpected action: {:?}", other),
        }
        assert!(notify_rx.try_recv().is_err());

        let order = Order::new("order_1", TENANT, "Ayşe", "Sofa", 100.0, now()).shipped();
        responder
            .send(Ok(OrderActionResult::Shipped { phone: "05321112233".to_string(), order }))
            .unwrap();

        let shipped = task.await.unwrap().unwrap();
        assert!(shipped.is_shipped);
        let notification = notify_rx.recv().await.expect("Expected notification");
        assert_eq!(notification.to, "05321112233");
    }

    #[tokio::test]
    async fn test_create_and_cancel_requests() {
        let (inner, mut order_rx) = create_mock_client::<Order>(10);
        let (notify_tx, _notify_rx) = tokio::sync::mpsc::channel(1);
        let client = OrderClient::new(inner, NotificationClient::new(notify_tx), fixed_clock(), Arc::new(SystemConfig::default()));

        let task = tokio::spawn(async move {
            let id = client.create_order(tenant(), NewOrder::new("Ayşe", "Sofa", 100.0)).await?;
            client.cancel_order(tenant(), id).await?;
            client.load_orders(tenant()).await
        });

        let (owner, params, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(owner, TENANT);
        assert_eq!(params.order.customer_name, "Ayşe");
        assert_eq!(params.created_at, now());
        responder.send(Ok("order_1".to_string())).unwrap();

        let (_, id, responder) = expect_delete(&mut order_rx).await.expect("Expected Order Delete");
        assert_eq!(id, "order_1");
        responder.send(Ok(())).unwrap();

        let (_, responder) = expect_list(&mut order_rx).await.expect("Expected Order List");
        let older = Order::new("order_0", TENANT, "Can", "Bed", 1.0, now() - chrono::Duration::days(1));
        let newer = Order::new("order_2", TENANT, "Deniz", "Bed", 1.0, now());
        responder.send(Ok(vec![older, newer])).unwrap();

        let ids: Vec<String> = task.await.unwrap().unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["order_2", "order_0"]);
    }
}
