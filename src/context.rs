//! Request-scoped logger propagation
//!
//! A configured [`Logger`] travels through a unit of work by riding a
//! carrier: a generic scope context, an inbound `http::Request`, or the
//! request `Parts` a middleware stack hands around. All three store the
//! logger under one private key type, so callers never choose a key and
//! collisions with caller-stored values are impossible.

use crate::core::Logger;
use http::Extensions;
use std::sync::Arc;
use std::time::Instant;

/// Private extension key. Only this module can name the type, which is what
/// keeps attach/retrieve paired.
#[derive(Clone)]
struct AttachedLogger(Arc<Logger>);

/// A generic unit-of-work context: an optional deadline plus a typed
/// key-value store. The crate-provided carrier for code that is not
/// request-driven.
#[derive(Debug, Default)]
pub struct ScopeContext {
    deadline: Option<Instant>,
    extensions: Extensions,
}

impl ScopeContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

/// Anything a logger can ride through a call chain. Each implementation is
/// a thin adapter over a typed extensions store.
pub trait LoggerCarrier {
    fn extensions(&self) -> &Extensions;
    fn extensions_mut(&mut self) -> &mut Extensions;
}

impl LoggerCarrier for ScopeContext {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

impl<B> LoggerCarrier for http::Request<B> {
    fn extensions(&self) -> &Extensions {
        http::Request::extensions(self)
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        http::Request::extensions_mut(self)
    }
}

impl LoggerCarrier for http::request::Parts {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

/// Attach a logger to a carrier for the rest of its lifetime. A later
/// attach replaces an earlier one.
pub fn attach<C: LoggerCarrier>(carrier: &mut C, logger: Arc<Logger>) {
    carrier.extensions_mut().insert(AttachedLogger(logger));
}

/// Retrieve the logger attached to a carrier. A carrier without a binding
/// yields `None`; there is no implicit default logger.
pub fn retrieve<C: LoggerCarrier>(carrier: &C) -> Option<Arc<Logger>> {
    carrier
        .extensions()
        .get::<AttachedLogger>()
        .map(|attached| Arc::clone(&attached.0))
}
