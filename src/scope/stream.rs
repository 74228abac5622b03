/* src/scope/stream.rs */

use futures_util::Stream;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use super::FlagEvent;

/// A stream of [`FlagEvent`]s from one scope.
///
/// Yields `Err` when the receiver lagged behind and events were dropped.
pub struct FlagStream {
	inner: BroadcastStream<FlagEvent>,
}

impl FlagStream {
	pub(crate) fn new(rx: broadcast::Receiver<FlagEvent>) -> Self {
		Self {
			inner: BroadcastStream::new(rx),
		}
	}
}

impl Stream for FlagStream {
	type Item = Result<FlagEvent, BroadcastStreamRecvError>;

	fn poll_next(
		mut self: std::pin::Pin<&mut Self>,
		cx: &mut std::task::Context<'_>,
	) -> std::task::Poll<Option<Self::Item>> {
		std::pin::Pin::new(&mut self.inner).poll_next(cx)
	}
}
