mod common;

use common::TestServer;
use greeter_core::proto::{
    HelloRequest, NamesList, NoParam, greet_service_client::GreetServiceClient,
};
use greeter_server::server::{config::ServerConfig, serve_with_incoming};
use std::time::Duration;
use tokio::{net::TcpListener, sync::mpsc};
use tokio_stream::wrappers::{ReceiverStream, TcpListenerStream};
use tonic::codec::CompressionEncoding;
use tonic_health::pb::{
    HealthCheckRequest, health_check_response::ServingStatus, health_client::HealthClient,
};

fn names(names: &[&str]) -> NamesList {
    names.iter().copied().collect()
}

#[tokio::test]
async fn unary_returns_fixed_greeting() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    for _ in 0..2 {
        let response = client.say_hello(NoParam {}).await.unwrap().into_inner();
        assert_eq!(response.message, "Hello");
    }

    drop(client);
    server.stop().await.unwrap();
}

#[tokio::test]
async fn server_streaming_yields_one_greeting_per_name_in_order() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let mut stream = client
        .say_hello_server_streaming(names(&["Praveen", "Akhil", "Alice", "Bob"]))
        .await
        .unwrap()
        .into_inner();

    let mut received = Vec::new();
    while let Some(response) = stream.message().await.unwrap() {
        received.push(response.message);
    }
    assert_eq!(
        received,
        ["Hello Praveen", "Hello Akhil", "Hello Alice", "Hello Bob"]
    );
}

#[tokio::test]
async fn client_streaming_returns_exactly_one_aggregate() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let requests = names(&["Alice", "Bob"]).to_requests();
    let response = client
        .say_hello_client_streaming(tokio_stream::iter(requests))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(response.message, "Hello Alice, Bob");
}

#[tokio::test]
async fn client_streaming_with_no_names_still_replies() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let response = client
        .say_hello_client_streaming(tokio_stream::iter(Vec::<HelloRequest>::new()))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(response.message, "Hello");
}

#[tokio::test]
async fn bidirectional_streaming_answers_each_name_before_the_next_is_sent() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let (tx, rx) = mpsc::channel(1);
    let mut responses = client
        .say_hello_bidirectional_streaming(ReceiverStream::new(rx))
        .await
        .unwrap()
        .into_inner();

    let sent = ["Praveen", "Akhil", "Alice", "Bob"];
    for name in sent {
        tx.send(HelloRequest {
            name: name.to_string(),
        })
        .await
        .unwrap();
        let response = responses.message().await.unwrap().unwrap();
        assert_eq!(response.message, format!("Hello {name}"));
    }

    drop(tx);
    assert!(responses.message().await.unwrap().is_none());
}

#[tokio::test]
async fn bidirectional_streaming_response_count_matches_names_sent() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let requests: Vec<HelloRequest> = (0..32)
        .map(|i| HelloRequest {
            name: format!("name-{i}"),
        })
        .collect();

    let mut responses = client
        .say_hello_bidirectional_streaming(tokio_stream::iter(requests))
        .await
        .unwrap()
        .into_inner();

    let mut count = 0;
    while let Some(response) = responses.message().await.unwrap() {
        assert_eq!(response.message, format!("Hello name-{count}"));
        count += 1;
    }
    assert_eq!(count, 32);
}

#[tokio::test]
async fn compressed_clients_are_accepted() {
    let server = TestServer::start().await;

    for encoding in [
        CompressionEncoding::Zstd,
        CompressionEncoding::Gzip,
        CompressionEncoding::Deflate,
    ] {
        let mut client = GreetServiceClient::new(server.channel().await)
            .send_compressed(encoding)
            .accept_compressed(encoding);

        let mut stream = client
            .say_hello_server_streaming(names(&["Alice", "Bob"]))
            .await
            .unwrap()
            .into_inner();
        let mut count = 0;
        while stream.message().await.unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 2, "{encoding:?}");
    }
}

#[tokio::test]
async fn configured_greeting_reaches_every_pattern() {
    let server = TestServer::start_with(ServerConfig {
        greeting: "Hi".to_string(),
        ..ServerConfig::default()
    })
    .await;
    let mut client = server.client().await;

    let unary = client.say_hello(NoParam {}).await.unwrap().into_inner();
    assert_eq!(unary.message, "Hi");

    let aggregate = client
        .say_hello_client_streaming(tokio_stream::iter(names(&["Bob"]).to_requests()))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(aggregate.message, "Hi Bob");
}

#[tokio::test]
async fn health_reports_serving_for_greet_service() {
    let server = TestServer::start().await;
    let mut health = HealthClient::new(server.channel().await);

    let response = health
        .check(HealthCheckRequest {
            service: "greet.GreetService".to_string(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(response.status, ServingStatus::Serving as i32);

    drop(health);
    server.stop().await.unwrap();
}

#[tokio::test]
async fn shutdown_stops_accepting_calls() {
    let server = TestServer::start().await;
    let endpoint = server.endpoint();
    server.stop().await.unwrap();

    let result = GreetServiceClient::connect(endpoint).await;
    assert!(result.is_err());
}

// The server runs on its own runtime so it can be torn down abruptly while a
// bidirectional call is still open.
#[test]
fn closed_connection_surfaces_stream_error_instead_of_hanging() {
    let server_rt = tokio::runtime::Runtime::new().unwrap();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    server_rt.spawn(async move {
        let listener = TcpListener::from_std(listener)?;
        serve_with_incoming(
            TcpListenerStream::new(listener),
            ServerConfig::default(),
            std::future::pending(),
        )
        .await
    });

    let client_rt = tokio::runtime::Runtime::new().unwrap();
    client_rt.block_on(async move {
        let mut client = GreetServiceClient::connect(format!("http://{addr}"))
            .await
            .unwrap();

        let (tx, rx) = mpsc::channel(4);
        tx.send(HelloRequest {
            name: "Alice".to_string(),
        })
        .await
        .unwrap();

        let mut responses = client
            .say_hello_bidirectional_streaming(ReceiverStream::new(rx))
            .await
            .unwrap()
            .into_inner();
        let first = responses.message().await.unwrap().unwrap();
        assert_eq!(first.message, "Hello Alice");

        server_rt.shutdown_background();

        let next = tokio::time::timeout(Duration::from_secs(10), responses.message())
            .await
            .expect("stream hung after the connection closed");
        assert!(next.is_err(), "expected a stream error, got {next:?}");

        // Keep the request side open until the error is observed.
        drop(tx);
    });
}
