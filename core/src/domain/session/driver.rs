use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, warn};

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    generation::stream::{CancelHandle, RecipeStream},
    meal_plan::ports::MealPlanService,
    session::{
        entities::{SessionEffect, SessionEvent, SessionState, Transition},
        machine::transition,
    },
    suggestion::{entities::ExcludeNames, ports::SuggestionService},
};

/// Runs one interactive session against the services.
///
/// Events go through [`transition`]; any effect it returns is executed and
/// its result fed back as the next event. Recipe text is pulled by the
/// caller with [`SuggestionSession::next_recipe_chunk`]. The service bounds
/// each recipe stream with its generation timeout.
pub struct SuggestionSession<S> {
    service: Arc<S>,
    identity: Identity,
    state: SessionState,
    stream: Option<RecipeStream>,
}

impl<S> SuggestionSession<S>
where
    S: SuggestionService + MealPlanService,
{
    pub fn new(service: Arc<S>, identity: Identity) -> Self {
        Self {
            service,
            identity,
            state: SessionState::default(),
            stream: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn exclude_names(&self) -> ExcludeNames {
        self.state.exclude_names()
    }

    /// Handle for the recipe stream in flight, if any.
    pub fn cancel_handle(&self) -> Option<CancelHandle> {
        self.stream.as_ref().map(RecipeStream::cancel_handle)
    }

    pub async fn dispatch(&mut self, event: SessionEvent) -> Result<&SessionState, CoreError> {
        let mut next = Some(event);

        while let Some(event) = next.take() {
            let Transition { state, effect } = transition(&self.state, event)?;
            debug!("Session moved to {}", state.name());
            self.state = state;

            if let Some(effect) = effect {
                next = self.perform(effect).await;
            }
        }

        Ok(&self.state)
    }

    /// Pulls the next recipe chunk and appends it to the session buffer.
    ///
    /// `Ok(None)` means there is nothing more to read: the stream finished,
    /// was cancelled, or none is running.
    pub async fn next_recipe_chunk(&mut self) -> Result<Option<String>, CoreError> {
        let Some(stream) = self.stream.as_mut() else {
            return Ok(None);
        };
        match stream.next().await {
            Some(Ok(chunk)) => {
                self.apply(SessionEvent::RecipeChunk(chunk.clone()))?;
                Ok(Some(chunk))
            }
            Some(Err(e)) => {
                self.drop_stream();
                self.apply(SessionEvent::RecipeFailed(e.to_string()))?;
                Err(e)
            }
            None => {
                let cancelled = stream.is_cancelled();
                self.drop_stream();
                if !cancelled {
                    self.apply(SessionEvent::RecipeCompleted)?;
                } else if matches!(self.state, SessionState::GeneratingRecipe { .. }) {
                    self.apply(SessionEvent::RecipeCancelled)?;
                }
                Ok(None)
            }
        }
    }

    async fn perform(&mut self, effect: SessionEffect) -> Option<SessionEvent> {
        match effect {
            SessionEffect::FetchSuggestions(request) => {
                match self.service.get_suggestions(self.identity, request).await {
                    Ok(suggestions) => Some(SessionEvent::SuggestionsReceived(suggestions)),
                    Err(e) => {
                        warn!("Suggestion generation failed: {}", e);
                        Some(SessionEvent::SuggestionsFailed(e.to_string()))
                    }
                }
            }
            SessionEffect::StreamRecipe(input) => {
                self.drop_stream();
                match self.service.get_full_recipe(self.identity, input).await {
                    Ok(stream) => {
                        self.stream = Some(stream);
                        None
                    }
                    Err(e) => {
                        warn!("Recipe stream failed to start: {}", e);
                        Some(SessionEvent::RecipeFailed(e.to_string()))
                    }
                }
            }
            SessionEffect::CancelGeneration => {
                self.drop_stream();
                None
            }
            SessionEffect::SaveRecipe(input) => {
                match self.service.save_recipe(self.identity, input).await {
                    Ok(outcome) => Some(SessionEvent::SaveCompleted(outcome)),
                    Err(e) => {
                        warn!("Saving recipe failed: {}", e);
                        Some(SessionEvent::SaveFailed(e.to_string()))
                    }
                }
            }
        }
    }

    /// Stream events never produce effects.
    fn apply(&mut self, event: SessionEvent) -> Result<(), CoreError> {
        self.state = transition(&self.state, event)?.state;
        Ok(())
    }

    fn drop_stream(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.cancel();
            debug!("Recipe stream dropped");
        }
    }
}
