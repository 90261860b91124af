//! gRPC service implementation for the greeting demo.
//!
//! [`HelloService`] implements the generated [`GreetService`] trait with one
//! handler per call shape. Handlers share nothing but an immutable
//! [`Greeter`], so concurrent calls never observe each other.
//!
//! Streaming responses are lazy: the server-streaming handler maps over the
//! request's names and the bidirectional handler maps over the incoming
//! stream, producing one greeting per name as it is polled. A request-stream
//! error is forwarded as the final item of the response stream.

use crate::server::{
    config::ServerConfig,
    service::greeting::Greeter,
    telemetry::{
        decrement_streams_inflight, increment_greetings_sent, increment_requests,
        increment_stream_errors, increment_streams_inflight, record_stream_duration,
    },
};
use core::pin::Pin;
use futures::{Stream, StreamExt, TryStreamExt, stream};
use greeter_core::{
    Error,
    proto::{HelloRequest, HelloResponse, NamesList, NoParam, greet_service_server::GreetService},
    types::CallPattern,
};
use std::time::Instant;
use tonic::{Request, Response, Status, Streaming};

pub type ResponseStream = Pin<Box<dyn Stream<Item = Result<HelloResponse, Status>> + Send>>;

/// Stateless implementation of `greet.GreetService`.
#[derive(Clone, Debug, Default)]
pub struct HelloService {
    greeter: Greeter,
}

impl HelloService {
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_greeter(Greeter::new(config.greeting.as_str()))
    }

    pub fn with_greeter(greeter: Greeter) -> Self {
        Self { greeter }
    }
}

/// Tracks one streaming response for the lifetime of its stream.
///
/// Dropped when the stream finishes or the client goes away, whichever comes
/// first.
struct StreamMetrics {
    pattern: CallPattern,
    start: Instant,
}

impl StreamMetrics {
    fn new(pattern: CallPattern) -> Self {
        increment_streams_inflight(pattern);
        Self {
            pattern,
            start: Instant::now(),
        }
    }

    fn on_item(&self) {
        increment_greetings_sent(self.pattern);
    }
}

impl Drop for StreamMetrics {
    fn drop(&mut self) {
        decrement_streams_inflight(self.pattern);
        record_stream_duration(self.pattern, self.start.elapsed().as_millis() as f64);
    }
}

fn instrument_stream<S>(pattern: CallPattern, responses: S) -> ResponseStream
where
    S: Stream<Item = Result<HelloResponse, Status>> + Send + 'static,
{
    let metrics = StreamMetrics::new(pattern);
    let responses = responses
        .inspect_ok(move |_| metrics.on_item())
        .inspect_err(move |status| {
            increment_stream_errors(pattern);
            tracing::warn!(
                %pattern,
                code = ?status.code(),
                "stream ended with error: {}",
                status.message()
            );
        });
    Box::pin(responses)
}

#[tonic::async_trait]
impl GreetService for HelloService {
    type SayHelloServerStreamingStream = ResponseStream;
    type SayHelloBidirectionalStreamingStream = ResponseStream;

    #[tracing::instrument(skip_all)]
    async fn say_hello(&self, _req: Request<NoParam>) -> Result<Response<HelloResponse>, Status> {
        increment_requests(CallPattern::Unary);
        increment_greetings_sent(CallPattern::Unary);
        Ok(Response::new(self.greeter.hello()))
    }

    #[tracing::instrument(skip_all, fields(names = req.get_ref().names.len()))]
    async fn say_hello_server_streaming(
        &self,
        req: Request<NamesList>,
    ) -> Result<Response<Self::SayHelloServerStreamingStream>, Status> {
        increment_requests(CallPattern::ServerStreaming);

        let NamesList { names } = req.into_inner();
        let greeter = self.greeter.clone();
        let responses = stream::iter(names).map(move |name| Ok(greeter.greet(&name)));

        Ok(Response::new(instrument_stream(
            CallPattern::ServerStreaming,
            responses,
        )))
    }

    #[tracing::instrument(skip_all)]
    async fn say_hello_client_streaming(
        &self,
        req: Request<Streaming<HelloRequest>>,
    ) -> Result<Response<HelloResponse>, Status> {
        let pattern = CallPattern::ClientStreaming;
        increment_requests(pattern);

        let mut requests = req.into_inner();
        let mut names = Vec::new();
        while let Some(request) = requests.message().await.map_err(|status| {
            increment_stream_errors(pattern);
            Error::Stream { pattern, status }
        })? {
            names.push(request.name);
        }

        tracing::debug!(names = names.len(), "client finished sending");
        increment_greetings_sent(pattern);
        Ok(Response::new(self.greeter.greet_all(&names)))
    }

    #[tracing::instrument(skip_all)]
    async fn say_hello_bidirectional_streaming(
        &self,
        req: Request<Streaming<HelloRequest>>,
    ) -> Result<Response<Self::SayHelloBidirectionalStreamingStream>, Status> {
        increment_requests(CallPattern::BidirectionalStreaming);

        let greeter = self.greeter.clone();
        let responses = req
            .into_inner()
            .map(move |request| request.map(|HelloRequest { name }| greeter.greet(&name)));

        Ok(Response::new(instrument_stream(
            CallPattern::BidirectionalStreaming,
            responses,
        )))
    }
}
