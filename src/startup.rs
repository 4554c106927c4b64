use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing_actix_web::TracingLogger;

use crate::configuration::{Settings, SqsConfig};
use crate::database::get_connection_pool;
use crate::payment_client::{MercadoPagoClient, PaymentGateway};
use crate::routes::checkout::listener::OrderCreatedListener;
use crate::routes::checkout::store::{CheckoutStore, PgCheckoutStore};
use crate::routes::main_route;
use crate::sqs_client::{QueueService, SqsClient};

pub struct Application {
    port: u16,
    server: Server,
    listener_handle: JoinHandle<()>,
    shutdown_tx: watch::Sender<bool>,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);
        let store: Arc<dyn CheckoutStore> = Arc::new(PgCheckoutStore::new(connection_pool));
        let gateway: Arc<dyn PaymentGateway> = Arc::new(MercadoPagoClient::new(
            configuration.gateway.base_url.clone(),
            configuration.gateway.access_token.clone(),
            configuration.gateway.timeout(),
        ));
        let queue: Arc<dyn QueueService> = Arc::new(SqsClient::new(
            configuration.sqs.endpoint.clone(),
            configuration.sqs.max_messages,
            configuration.sqs.timeout(),
        ));

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let order_listener = OrderCreatedListener::new(
            queue.clone(),
            gateway.clone(),
            store.clone(),
            configuration.sqs.order_created_queue_url.clone(),
            configuration.sqs.poll_interval(),
        );
        let listener_handle = tokio::spawn(order_listener.run(shutdown_rx));

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        println!("Listening {}", address);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, store, gateway, queue, configuration.sqs).await?;
        Ok(Self {
            port,
            server,
            listener_handle,
            shutdown_tx,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Runs until the HTTP server stops, then signals the queue listener
    /// and waits for its current cycle to drain.
    pub async fn run_until_stopped(self) -> Result<(), anyhow::Error> {
        let result = self.server.await;
        let _ = self.shutdown_tx.send(true);
        let _ = self.listener_handle.await;
        result?;
        Ok(())
    }
}

async fn run(
    listener: TcpListener,
    store: Arc<dyn CheckoutStore>,
    gateway: Arc<dyn PaymentGateway>,
    queue: Arc<dyn QueueService>,
    sqs: SqsConfig,
) -> Result<Server, anyhow::Error> {
    let store = web::Data::from(store);
    let gateway = web::Data::from(gateway);
    let queue = web::Data::from(queue);
    let sqs_obj = web::Data::new(sqs);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(store.clone())
            .app_data(gateway.clone())
            .app_data(queue.clone())
            .app_data(sqs_obj.clone())
            .configure(main_route)
    })
    .workers(4)
    .listen(listener)?
    .run();

    Ok(server)
}
