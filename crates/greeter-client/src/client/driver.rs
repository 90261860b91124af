//! Runs each gRPC call shape against a greeter server.
//!
//! Every function returns a [`Result`] instead of aborting; [`run`] stops at
//! the first failure and hands it back to the caller. Calls never overlap:
//! each one completes (or fails) before the next starts.

use crate::client::config::ClientConfig;
use greeter_core::{
    Error, Result,
    proto::{
        HelloRequest, HelloResponse, NamesList, NoParam, greet_service_client::GreetServiceClient,
    },
    types::CallPattern,
};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Status, Streaming, codec::CompressionEncoding, transport::Channel};

pub type Client = GreetServiceClient<Channel>;

/// Outcome of one full run of the four call shapes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DemoReport {
    pub unary: HelloResponse,
    pub server_streaming: Vec<HelloResponse>,
    pub client_streaming: HelloResponse,
    pub bidirectional_streaming: Vec<HelloResponse>,
}

/// Dials the configured endpoint and applies the configured compression.
pub async fn connect(config: &ClientConfig) -> Result<Client> {
    let channel = config.endpoint.connect().await?;
    let mut client = GreetServiceClient::new(channel);
    if let Some(encoding) = Option::<CompressionEncoding>::from(config.compression) {
        client = client
            .send_compressed(encoding)
            .accept_compressed(encoding);
    }
    Ok(client)
}

/// Connects once and runs all four calls in order.
pub async fn run(config: &ClientConfig) -> Result<DemoReport> {
    let mut client = connect(config).await?;
    tracing::info!(endpoint = %config.endpoint.uri(), "connected");

    let unary = call_say_hello(&mut client).await?;
    let server_streaming = call_say_hello_server_stream(&mut client, &config.names).await?;
    let client_streaming = call_say_hello_client_stream(&mut client, &config.names).await?;
    let bidirectional_streaming =
        call_say_hello_bidirectional_stream(&mut client, &config.names).await?;

    Ok(DemoReport {
        unary,
        server_streaming,
        client_streaming,
        bidirectional_streaming,
    })
}

pub async fn call_say_hello(client: &mut Client) -> Result<HelloResponse> {
    let pattern = CallPattern::Unary;
    let response = client
        .say_hello(NoParam {})
        .await
        .map_err(|status| Error::Call { pattern, status })?
        .into_inner();
    tracing::info!(%pattern, message = %response.message, "received");
    Ok(response)
}

pub async fn call_say_hello_server_stream(
    client: &mut Client,
    names: &NamesList,
) -> Result<Vec<HelloResponse>> {
    let pattern = CallPattern::ServerStreaming;
    tracing::info!(%pattern, "streaming started");

    let stream = client
        .say_hello_server_streaming(names.clone())
        .await
        .map_err(|status| Error::Call { pattern, status })?
        .into_inner();
    let responses = drain(pattern, stream).await?;

    tracing::info!(%pattern, received = responses.len(), "streaming finished");
    Ok(responses)
}

pub async fn call_say_hello_client_stream(
    client: &mut Client,
    names: &NamesList,
) -> Result<HelloResponse> {
    let pattern = CallPattern::ClientStreaming;
    tracing::info!(%pattern, "streaming started");

    let requests = names.to_requests();
    for request in &requests {
        tracing::info!(%pattern, name = %request.name, "sending");
    }

    let response = client
        .say_hello_client_streaming(tokio_stream::iter(requests))
        .await
        .map_err(|status| Error::Call { pattern, status })?
        .into_inner();

    tracing::info!(%pattern, message = %response.message, "streaming finished");
    Ok(response)
}

/// Feeds names from a separate task while this one reads greetings, so sends
/// and receives interleave as the transport allows.
pub async fn call_say_hello_bidirectional_stream(
    client: &mut Client,
    names: &NamesList,
) -> Result<Vec<HelloResponse>> {
    let pattern = CallPattern::BidirectionalStreaming;
    tracing::info!(%pattern, "streaming started");

    let (tx, rx) = mpsc::channel::<HelloRequest>(1);
    let requests = names.to_requests();
    let feeder = tokio::spawn(async move {
        for request in requests {
            tracing::info!(%pattern, name = %request.name, "sending");
            tx.send(request).await.map_err(|_| Error::ChannelError {
                context: "bidirectional request stream closed before all names were sent"
                    .to_string(),
            })?;
        }
        Ok::<(), Error>(())
    });

    let stream = client
        .say_hello_bidirectional_streaming(ReceiverStream::new(rx))
        .await
        .map_err(|status| Error::Call { pattern, status });
    let responses = match stream {
        Ok(stream) => drain(pattern, stream.into_inner()).await,
        Err(e) => Err(e),
    };

    // A response-side error explains a failed send better than the send does.
    let fed = feeder.await.map_err(|e| Error::ChannelError {
        context: format!("request feeder task failed: {e}"),
    });
    let responses = responses?;
    fed??;

    tracing::info!(%pattern, received = responses.len(), "streaming finished");
    Ok(responses)
}

/// Reads a response stream to its end, logging each message.
async fn drain(
    pattern: CallPattern,
    mut stream: Streaming<HelloResponse>,
) -> Result<Vec<HelloResponse>> {
    let mut responses = Vec::new();
    while let Some(response) = stream
        .message()
        .await
        .map_err(|status: Status| Error::Stream { pattern, status })?
    {
        tracing::info!(%pattern, message = %response.message, "received");
        responses.push(response);
    }
    Ok(responses)
}
