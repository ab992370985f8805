use std::{error::Error as StdError, io};

use thiserror::Error;

/// Failure to follow an infographic link one redirect hop.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The remote host dropped the connection mid-request.
    ///
    /// The link shortener in front of the infographics drops idle keep-alive
    /// connections, so this is the one error the watcher retries.
    #[error("Peer disconnected while resolving {url}")]
    PeerDisconnected {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to resolve {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid redirect location '{location}' returned by {url}")]
    InvalidLocation { url: String, location: String },
}

impl ResolveError {
    /// Classifies a failed request, splitting peer disconnects from hard errors.
    pub fn from_request(url: &str, source: reqwest::Error) -> Self {
        if is_peer_disconnect(&source) {
            Self::PeerDisconnected {
                url: url.to_string(),
                source,
            }
        } else {
            Self::Request {
                url: url.to_string(),
                source,
            }
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::PeerDisconnected { .. })
    }
}

/// Walks the source chain looking for the peer going away.
///
/// hyper wraps the socket error a few layers deep, so the top-level error kind
/// says nothing useful. A peer that closes cleanly before answering leaves no
/// I/O error at all, only hyper's incomplete-message or closed error.
pub fn is_peer_disconnect(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);

    while let Some(err) = current {
        if let Some(hyper_err) = err.downcast_ref::<hyper::Error>() {
            if hyper_err.is_incomplete_message() || hyper_err.is_closed() {
                return true;
            }
        }
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        current = err.source();
    }

    false
}
