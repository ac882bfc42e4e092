//! Local-file subtitle fetcher

use std::io::ErrorKind;

use dualsub_core::{catalog::SubtitleSource, error::FetchError, SubtitleFetcher};
use futures::future::{BoxFuture, FutureExt};

/// Reads the file named by a source's location
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl SubtitleFetcher for FileFetcher {
    fn fetch<'a>(&'a self, source: &'a SubtitleSource) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        async move {
            tokio::fs::read(&source.location)
                .await
                .map_err(|error| match error.kind() {
                    ErrorKind::NotFound => FetchError::NotFound {
                        location: source.location.clone(),
                    },
                    _ => FetchError::transport(error),
                })
        }
        .boxed()
    }
}
