//! Fluent construction of [`Engine`] instances.

use crate::core::{ActionRequest, Model, Proposal, StateDefinition, StateIdentity};
use crate::engine::error::EngineError;
use crate::engine::machine::{Engine, Presenter, ProposalFactory, Subscription};
use crate::history::{TraceSink, TracingSink};
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when building an engine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial model not specified. Call .model(value) before .build()")]
    MissingModel,

    #[error("Proposal factory not specified. Call .proposal_factory(f) before .build()")]
    MissingProposalFactory,

    #[error("Presenter not specified. Call .presenter(f) before .build()")]
    MissingPresenter,

    #[error("No state definitions. Add at least one with .state(definition)")]
    NoStateDefinitions,

    /// Construction-time engine failure, i.e. the initial model did not
    /// classify into exactly one state.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Builder for [`Engine`] with a fluent API.
///
/// Required pieces: an initial model, a proposal factory, a presenter, and
/// at least one state definition. Subscriptions, debug mode, and a custom
/// trace sink are optional; the default sink routes debug history through
/// `tracing`.
pub struct EngineBuilder<M, P, A, S>
where
    M: Model,
    P: Proposal,
    A: ActionRequest,
    S: StateIdentity,
{
    model: Option<M>,
    factory: Option<ProposalFactory<A, P>>,
    presenter: Option<Presenter<P, M>>,
    states: Vec<StateDefinition<M, A, S>>,
    subscriptions: Vec<Subscription<M, S>>,
    debug: bool,
    sink: Option<Arc<dyn TraceSink>>,
}

impl<M, P, A, S> EngineBuilder<M, P, A, S>
where
    M: Model,
    P: Proposal,
    A: ActionRequest,
    S: StateIdentity,
{
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            model: None,
            factory: None,
            presenter: None,
            states: Vec::new(),
            subscriptions: Vec::new(),
            debug: false,
            sink: None,
        }
    }

    /// Set the initial model (required).
    pub fn model(mut self, model: M) -> Self {
        self.model = Some(model);
        self
    }

    /// Set the proposal factory (required).
    ///
    /// The factory converts an action into an optional proposal and may
    /// suspend for an arbitrary duration; the loop awaits it and nothing
    /// else.
    pub fn proposal_factory<F, Fut>(mut self, factory: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<P>> + Send + 'static,
    {
        self.factory = Some(Arc::new(move |action| factory(action).boxed()));
        self
    }

    /// Set the presenter (required): a pure reducer from proposal and model
    /// to the next model, or `None` to reject the proposal.
    pub fn presenter<F>(mut self, presenter: F) -> Self
    where
        F: Fn(P, M) -> Option<M> + Send + Sync + 'static,
    {
        self.presenter = Some(Arc::new(presenter));
        self
    }

    /// Append one state definition. Declaration order is the matching
    /// order: the first definition whose predicate holds wins.
    pub fn state(mut self, definition: StateDefinition<M, A, S>) -> Self {
        self.states.push(definition);
        self
    }

    /// Append several state definitions at once.
    pub fn states<I>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = StateDefinition<M, A, S>>,
    {
        self.states.extend(definitions);
        self
    }

    /// Register an initial subscription.
    pub fn subscription(mut self, subscription: Subscription<M, S>) -> Self {
        self.subscriptions.push(subscription);
        self
    }

    /// Enable or disable the debug history recorder.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Override the sink debug history lines are printed through.
    pub fn sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the engine.
    ///
    /// Fails if a required piece is missing or if the initial model does
    /// not match exactly one state definition.
    pub fn build(self) -> Result<Engine<M, P, A, S>, BuildError> {
        let model = self.model.ok_or(BuildError::MissingModel)?;
        let factory = self.factory.ok_or(BuildError::MissingProposalFactory)?;
        let presenter = self.presenter.ok_or(BuildError::MissingPresenter)?;
        if self.states.is_empty() {
            return Err(BuildError::NoStateDefinitions);
        }
        let sink = self.sink.unwrap_or_else(|| Arc::new(TracingSink));

        Ok(Engine::from_parts(
            model,
            factory,
            presenter,
            self.states,
            self.subscriptions,
            self.debug,
            sink,
        )?)
    }
}

impl<M, P, A, S> Default for EngineBuilder<M, P, A, S>
where
    M: Model,
    P: Proposal,
    A: ActionRequest,
    S: StateIdentity,
{
    fn default() -> Self {
        Self::new()
    }
}
