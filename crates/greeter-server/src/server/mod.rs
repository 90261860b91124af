//! Server assembly: configuration, telemetry, and the tonic router.
//!
//! ## Submodules
//!
//! - [`config`] - CLI/env configuration and validation.
//! - [`service`] - The `GreetService` handlers.
//! - [`telemetry`] - Logging, optional OpenTelemetry export, and metrics.

pub mod config;
pub mod service;
pub mod telemetry;

use config::ServerConfig;
use core::future::Future;
use futures::Stream;
use greeter_core::proto::{FILE_DESCRIPTOR_SET, greet_service_server::GreetServiceServer};
use service::handler::HelloService;
use tokio::io::{AsyncRead, AsyncWrite};
use tonic::transport::server::Connected;
use tonic::{codec::CompressionEncoding, transport::Server};
use tonic_reflection::server::Builder;
use tonic_web::GrpcWebLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

/// Serves the greeter, health and reflection services on `incoming` until
/// `shutdown` resolves.
///
/// The health service reports `SERVING` for `greet.GreetService` while the
/// server accepts calls and flips to `NOT_SERVING` as soon as `shutdown`
/// completes, before in-flight calls drain.
pub async fn serve_with_incoming<I, IO, IE, F>(
    incoming: I,
    config: ServerConfig,
    shutdown: F,
) -> anyhow::Result<()>
where
    I: Stream<Item = Result<IO, IE>>,
    IO: AsyncRead + AsyncWrite + Connected + Unpin + Send + 'static,
    IE: Into<tower::BoxError>,
    F: Future<Output = ()>,
{
    let (health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<GreetServiceServer<HelloService>>()
        .await;

    let service = HelloService::new(&config);

    let reflection = Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    Server::builder()
        .accept_http1(true)
        .http2_adaptive_window(Some(true))
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(GrpcWebLayer::new()),
        )
        .add_service(health_service)
        .add_service(reflection)
        .add_service(build_greet_service(service))
        .serve_with_incoming_shutdown(incoming, async move {
            shutdown.await;
            tracing::info!("Shutdown signal received, draining in-flight calls...");
            health_reporter
                .set_not_serving::<GreetServiceServer<HelloService>>()
                .await;
        })
        .await?;

    tracing::info!("Service shut down successfully");
    Ok(())
}

pub fn build_greet_service(service: HelloService) -> GreetServiceServer<HelloService> {
    GreetServiceServer::new(service)
        .send_compressed(CompressionEncoding::Zstd)
        .send_compressed(CompressionEncoding::Gzip)
        .send_compressed(CompressionEncoding::Deflate)
        .accept_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Gzip)
        .accept_compressed(CompressionEncoding::Deflate)
}
