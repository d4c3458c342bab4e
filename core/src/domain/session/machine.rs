//! Transition graph of a suggestion session:
//!
//! ```text
//! initial -> ingredient_source -> [ingredients] -> preferences -> details
//!         -> generating_suggestions -> picking -> generating_recipe
//!         -> recipe_ready -> saving -> closed
//! initial -> portions -> generating_recipe            (ingredients-needed)
//! picking -> generating_suggestions                   (regenerate)
//! generating_* -> generation_failed -> generating_*   (retry)
//! saving -> recipe_ready                              (save failed)
//! any -> closed
//! ```

use crate::domain::{
    meal_plan::{entities::MealType, value_objects::SaveRecipeInput},
    session::{
        entities::{
            DetailsSelection, FailedGeneration, PreferenceSelection, SaveOptions, SessionEffect,
            SessionEvent, SessionState, Transition,
        },
        errors::SessionError,
    },
    suggestion::{
        entities::{
            Difficulty, ExcludeNames, FlowType, IngredientSource, MealSuggestion,
            SuggestionRequest,
        },
        value_objects::GetFullRecipeInput,
    },
};

pub fn transition(state: &SessionState, event: SessionEvent) -> Result<Transition, SessionError> {
    use SessionEvent as E;
    use SessionState as S;

    match event {
        E::Close => return Ok(close(state)),
        E::Back => return back(state),
        _ => {}
    }

    let invalid = SessionError::InvalidTransition {
        state: state.name(),
        event: event.name(),
    };

    let transition = match (state, event) {
        (S::Initial { exclude_names }, E::Start(flow)) => start(flow, exclude_names.clone()),
        (S::Closed { .. }, E::Start(flow)) => start(flow, ExcludeNames::default()),

        (S::IngredientSource { request }, E::ChooseIngredientSource(source)) => {
            let mut request = request.clone();
            request.ingredient_source = source;
            match source {
                Some(_) => Transition::to(S::Ingredients { request }),
                None => {
                    request.ingredients = None;
                    Transition::to(S::Preferences { request })
                }
            }
        }

        (S::Ingredients { request }, E::SetIngredients(text)) => {
            let text = text.trim();
            if text.is_empty() && request.ingredient_source == Some(IngredientSource::UseMyIngredients)
            {
                return Err(SessionError::Validation(
                    "list at least one ingredient you have".to_string(),
                ));
            }
            let mut request = request.clone();
            request.ingredients = (!text.is_empty()).then(|| text.to_string());
            Transition::to(S::Preferences { request })
        }

        (S::Preferences { request }, E::SetPreferences(selection)) => {
            let mut request = request.clone();
            apply_preferences(&mut request, selection);
            Transition::to(S::Details { request })
        }

        (S::Details { request }, E::SetDetails(selection)) => {
            let mut request = request.clone();
            apply_details(&mut request, selection);
            fetch_suggestions(request)
        }

        (S::Portions { request }, E::SetPortions { meal_name, portions }) => {
            let meal_name = meal_name.trim();
            if meal_name.is_empty() {
                return Err(SessionError::Validation("meal name is required".to_string()));
            }
            if portions.is_some_and(|p| p <= 0) {
                return Err(SessionError::Validation(
                    "portions must be positive".to_string(),
                ));
            }
            let mut request = request.clone();
            request.meal_name = Some(meal_name.to_string());
            request.portions = portions;
            stream_recipe(request, Vec::new(), None)
        }

        (S::GeneratingSuggestions { request }, E::SuggestionsReceived(suggestions)) => {
            let mut request = request.clone();
            request.exclude_names.extend_from_suggestions(&suggestions);
            Transition::to(S::Picking {
                request,
                suggestions,
            })
        }

        (S::GeneratingSuggestions { request }, E::SuggestionsFailed(error)) => {
            Transition::to(S::GenerationFailed {
                request: request.clone(),
                suggestions: Vec::new(),
                failed: FailedGeneration::Suggestions,
                error,
            })
        }

        (S::Picking { request, .. }, E::Regenerate) => fetch_suggestions(request.clone()),

        (S::Picking {
            request,
            suggestions,
        }, E::Pick(index)) => {
            let selected = suggestions.get(index).cloned().ok_or_else(|| {
                SessionError::Validation(format!("no suggestion at position {}", index))
            })?;
            stream_recipe(request.clone(), suggestions.clone(), Some(selected))
        }

        (
            S::GeneratingRecipe {
                request,
                suggestions,
                selected,
                buffer,
            },
            E::RecipeChunk(chunk),
        ) => Transition::to(S::GeneratingRecipe {
            request: request.clone(),
            suggestions: suggestions.clone(),
            selected: selected.clone(),
            buffer: format!("{buffer}{chunk}"),
        }),

        (
            S::GeneratingRecipe {
                request,
                suggestions,
                selected,
                buffer,
            },
            E::RecipeCompleted,
        ) => {
            if buffer.trim().is_empty() {
                Transition::to(S::GenerationFailed {
                    request: request.clone(),
                    suggestions: suggestions.clone(),
                    failed: FailedGeneration::Recipe {
                        selected: selected.clone(),
                    },
                    error: "the model returned an empty recipe".to_string(),
                })
            } else {
                Transition::to(S::RecipeReady {
                    request: request.clone(),
                    suggestions: suggestions.clone(),
                    selected: selected.clone(),
                    recipe_text: buffer.clone(),
                    save_error: None,
                })
            }
        }

        (
            S::GeneratingRecipe {
                request,
                suggestions,
                selected,
                ..
            },
            E::RecipeFailed(error),
        ) => Transition::to(S::GenerationFailed {
            request: request.clone(),
            suggestions: suggestions.clone(),
            failed: FailedGeneration::Recipe {
                selected: selected.clone(),
            },
            error,
        }),

        (
            S::GeneratingRecipe {
                request,
                suggestions,
                ..
            },
            E::RecipeCancelled,
        ) => Transition::to(recipe_origin(request, suggestions)),

        (
            S::GenerationFailed {
                request,
                suggestions,
                failed,
                ..
            },
            E::Retry,
        ) => match failed {
            FailedGeneration::Suggestions => fetch_suggestions(request.clone()),
            FailedGeneration::Recipe { selected } => {
                stream_recipe(request.clone(), suggestions.clone(), selected.clone())
            }
        },

        (
            S::RecipeReady {
                request,
                suggestions,
                selected,
                recipe_text,
                ..
            },
            E::Save(options),
        ) => {
            let input = save_input(request, selected.as_ref(), recipe_text, options);
            Transition::with(
                S::Saving {
                    request: request.clone(),
                    suggestions: suggestions.clone(),
                    selected: selected.clone(),
                    recipe_text: recipe_text.clone(),
                },
                SessionEffect::SaveRecipe(input),
            )
        }

        (S::Saving { .. }, E::SaveCompleted(outcome)) => Transition::to(S::Closed {
            saved: Some(outcome),
        }),

        (
            S::Saving {
                request,
                suggestions,
                selected,
                recipe_text,
            },
            E::SaveFailed(error),
        ) => Transition::to(S::RecipeReady {
            request: request.clone(),
            suggestions: suggestions.clone(),
            selected: selected.clone(),
            recipe_text: recipe_text.clone(),
            save_error: Some(error),
        }),

        _ => return Err(invalid),
    };

    Ok(transition)
}

fn close(state: &SessionState) -> Transition {
    match state {
        SessionState::Closed { saved } => Transition::to(SessionState::Closed {
            saved: saved.clone(),
        }),
        state if state.is_generating() => Transition::with(
            SessionState::Closed { saved: None },
            SessionEffect::CancelGeneration,
        ),
        _ => Transition::to(SessionState::Closed { saved: None }),
    }
}

fn back(state: &SessionState) -> Result<Transition, SessionError> {
    use SessionState as S;

    let transition = match state {
        S::IngredientSource { request } | S::Portions { request } => {
            Transition::to(S::Initial {
                exclude_names: request.exclude_names.clone(),
            })
        }
        S::Ingredients { request } => Transition::to(S::IngredientSource {
            request: request.clone(),
        }),
        S::Preferences { request } if request.ingredient_source.is_some() => {
            Transition::to(S::Ingredients {
                request: request.clone(),
            })
        }
        S::Preferences { request } => Transition::to(S::IngredientSource {
            request: request.clone(),
        }),
        S::Details { request } => Transition::to(S::Preferences {
            request: request.clone(),
        }),
        S::GeneratingSuggestions { request } => Transition::with(
            S::Details {
                request: request.clone(),
            },
            SessionEffect::CancelGeneration,
        ),
        S::Picking { request, .. } => Transition::to(S::Details {
            request: request.clone(),
        }),
        S::GeneratingRecipe {
            request,
            suggestions,
            ..
        } => Transition::with(
            recipe_origin(request, suggestions),
            SessionEffect::CancelGeneration,
        ),
        S::RecipeReady {
            request,
            suggestions,
            ..
        } => Transition::to(recipe_origin(request, suggestions)),
        S::GenerationFailed {
            request,
            failed: FailedGeneration::Suggestions,
            ..
        } => Transition::to(S::Details {
            request: request.clone(),
        }),
        S::GenerationFailed {
            request,
            suggestions,
            ..
        } => Transition::to(recipe_origin(request, suggestions)),
        S::Initial { .. } | S::Saving { .. } | S::Closed { .. } => {
            return Err(SessionError::InvalidTransition {
                state: state.name(),
                event: "back",
            });
        }
    };

    Ok(transition)
}

fn start(flow: FlowType, exclude_names: ExcludeNames) -> Transition {
    let mut request = SuggestionRequest::new(flow);
    request.exclude_names = exclude_names;

    match flow {
        FlowType::WhatToCook => Transition::to(SessionState::IngredientSource { request }),
        FlowType::IngredientsNeeded => Transition::to(SessionState::Portions { request }),
    }
}

/// Where a recipe came from: the pick list, or the portions step on the
/// ingredients-needed path.
fn recipe_origin(request: &SuggestionRequest, suggestions: &[MealSuggestion]) -> SessionState {
    match request.flow_type {
        FlowType::IngredientsNeeded => SessionState::Portions {
            request: request.clone(),
        },
        FlowType::WhatToCook => SessionState::Picking {
            request: request.clone(),
            suggestions: suggestions.to_vec(),
        },
    }
}

fn fetch_suggestions(request: SuggestionRequest) -> Transition {
    Transition::with(
        SessionState::GeneratingSuggestions {
            request: request.clone(),
        },
        SessionEffect::FetchSuggestions(request),
    )
}

fn stream_recipe(
    request: SuggestionRequest,
    suggestions: Vec<MealSuggestion>,
    selected: Option<MealSuggestion>,
) -> Transition {
    let input = GetFullRecipeInput {
        request: request.clone(),
        selected: selected.clone(),
    };

    Transition::with(
        SessionState::GeneratingRecipe {
            request,
            suggestions,
            selected,
            buffer: String::new(),
        },
        SessionEffect::StreamRecipe(input),
    )
}

fn apply_preferences(request: &mut SuggestionRequest, selection: PreferenceSelection) {
    request.selected_cuisines = selection.cuisines;
    request.selected_restrictions = selection.restrictions;
    request.selected_equipment = selection.equipment;
    request.spice_level = selection.spice_level;
    request.mood_tags = selection.mood_tags;
}

fn apply_details(request: &mut SuggestionRequest, selection: DetailsSelection) {
    request.cooking_time_minutes = selection.cooking_time_minutes;
    request.meal_type = selection.meal_type;
    request.extra_notes = selection.extra_notes;
}

fn save_input(
    request: &SuggestionRequest,
    selected: Option<&MealSuggestion>,
    recipe_text: &str,
    options: SaveOptions,
) -> SaveRecipeInput {
    let meal = selected
        .cloned()
        .unwrap_or_else(|| meal_from_request(request));

    SaveRecipeInput {
        meal,
        full_recipe_text: recipe_text.to_string(),
        meal_type: options
            .meal_type
            .or(request.meal_type)
            .unwrap_or(MealType::Dinner),
        plan_date: options.plan_date,
        servings: options.servings.or(request.portions),
        is_public: options.is_public,
    }
}

fn meal_from_request(request: &SuggestionRequest) -> MealSuggestion {
    MealSuggestion {
        name: request.meal_name().unwrap_or_default().to_string(),
        description: String::new(),
        estimated_time: request
            .cooking_time_minutes
            .map(|m| format!("{m} minutes"))
            .unwrap_or_default(),
        difficulty: Difficulty::Medium,
        emoji: "🍽️".to_string(),
        calories: None,
        protein: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::meal_plan::value_objects::{SaveRecipeOutcome, UnscheduledReason};
    use uuid::Uuid;

    fn suggestion(name: &str) -> MealSuggestion {
        MealSuggestion {
            name: name.to_string(),
            description: format!("{name} description"),
            estimated_time: "30 minutes".to_string(),
            difficulty: Difficulty::Easy,
            emoji: "🍛".to_string(),
            calories: None,
            protein: None,
        }
    }

    fn batch(names: &[&str]) -> Vec<MealSuggestion> {
        names.iter().map(|n| suggestion(n)).collect()
    }

    fn step(state: SessionState, event: SessionEvent) -> Transition {
        transition(&state, event).unwrap()
    }

    fn run(events: Vec<SessionEvent>) -> SessionState {
        events
            .into_iter()
            .fold(SessionState::default(), |state, event| step(state, event).state)
    }

    fn to_details() -> Vec<SessionEvent> {
        vec![
            SessionEvent::Start(FlowType::WhatToCook),
            SessionEvent::ChooseIngredientSource(Some(IngredientSource::UseMyIngredients)),
            SessionEvent::SetIngredients("chicken, rice, broccoli".to_string()),
            SessionEvent::SetPreferences(PreferenceSelection {
                restrictions: vec!["vegetarian".to_string()],
                ..Default::default()
            }),
        ]
    }

    fn picking(names: &[&str]) -> SessionState {
        let mut events = to_details();
        events.push(SessionEvent::SetDetails(DetailsSelection::default()));
        events.push(SessionEvent::SuggestionsReceived(batch(names)));
        run(events)
    }

    #[test]
    fn what_to_cook_walks_every_step() {
        let details = run(to_details());
        assert_eq!(details.name(), "details");

        let next = step(
            details,
            SessionEvent::SetDetails(DetailsSelection {
                meal_type: Some(MealType::Lunch),
                ..Default::default()
            }),
        );
        let Some(SessionEffect::FetchSuggestions(request)) = &next.effect else {
            panic!("expected a suggestion fetch, got {:?}", next.effect);
        };
        assert_eq!(request.selected_restrictions, vec!["vegetarian"]);
        assert_eq!(request.ingredients.as_deref(), Some("chicken, rice, broccoli"));
        assert_eq!(request.meal_type, Some(MealType::Lunch));

        let picking = step(next.state, SessionEvent::SuggestionsReceived(batch(&["Dal", "Pho", "Ramen"])));
        let generating = step(picking.state, SessionEvent::Pick(1));
        let Some(SessionEffect::StreamRecipe(input)) = &generating.effect else {
            panic!("expected a recipe stream");
        };
        assert_eq!(input.selected.as_ref().map(|s| s.name.as_str()), Some("Pho"));

        let chunk = step(generating.state, SessionEvent::RecipeChunk("## Ingredients\n".to_string()));
        let chunk = step(chunk.state, SessionEvent::RecipeChunk("- noodles".to_string()));
        let ready = step(chunk.state, SessionEvent::RecipeCompleted);
        let SessionState::RecipeReady { recipe_text, .. } = &ready.state else {
            panic!("expected recipe ready");
        };
        assert_eq!(recipe_text, "## Ingredients\n- noodles");

        let saving = step(ready.state, SessionEvent::Save(SaveOptions::default()));
        let Some(SessionEffect::SaveRecipe(save)) = &saving.effect else {
            panic!("expected a save");
        };
        assert_eq!(save.meal.name, "Pho");
        assert_eq!(save.meal_type, MealType::Lunch);

        let outcome = SaveRecipeOutcome::Unscheduled {
            recipe_id: Uuid::new_v4(),
            reason: UnscheduledReason::MealPlanUnavailable,
        };
        let closed = step(saving.state, SessionEvent::SaveCompleted(outcome.clone()));
        assert_eq!(closed.state, SessionState::Closed { saved: Some(outcome) });
    }

    #[test]
    fn no_ingredient_source_skips_ingredients_step() {
        let state = run(vec![
            SessionEvent::Start(FlowType::WhatToCook),
            SessionEvent::ChooseIngredientSource(None),
        ]);
        assert_eq!(state.name(), "preferences");

        let back = step(state, SessionEvent::Back);
        assert_eq!(back.state.name(), "ingredient_source");
    }

    #[test]
    fn use_my_ingredients_requires_a_list() {
        let state = run(vec![
            SessionEvent::Start(FlowType::WhatToCook),
            SessionEvent::ChooseIngredientSource(Some(IngredientSource::UseMyIngredients)),
        ]);

        let result = transition(&state, SessionEvent::SetIngredients("  ".to_string()));

        assert!(matches!(result, Err(SessionError::Validation(_))));
    }

    #[test]
    fn ingredients_needed_goes_straight_to_recipe() {
        let portions = run(vec![SessionEvent::Start(FlowType::IngredientsNeeded)]);
        assert_eq!(portions.name(), "portions");

        let empty = transition(
            &portions,
            SessionEvent::SetPortions {
                meal_name: " ".to_string(),
                portions: Some(4),
            },
        );
        assert!(matches!(empty, Err(SessionError::Validation(_))));

        let next = step(
            portions,
            SessionEvent::SetPortions {
                meal_name: "Lasagna".to_string(),
                portions: Some(4),
            },
        );
        let Some(SessionEffect::StreamRecipe(input)) = &next.effect else {
            panic!("expected a recipe stream");
        };
        assert_eq!(input.request.meal_name(), Some("Lasagna"));
        assert!(input.selected.is_none());

        let ready = step(
            step(next.state, SessionEvent::RecipeChunk("text".to_string())).state,
            SessionEvent::RecipeCompleted,
        );
        let saving = step(ready.state, SessionEvent::Save(SaveOptions::default()));
        let Some(SessionEffect::SaveRecipe(save)) = saving.effect else {
            panic!("expected a save");
        };
        assert_eq!(save.meal.name, "Lasagna");
        assert_eq!(save.servings, Some(4));
        assert_eq!(save.meal_type, MealType::Dinner);
    }

    #[test]
    fn regeneration_grows_the_exclude_set() {
        let first = picking(&["Dal", "Pho", "Ramen"]);
        let before = first.exclude_names();

        let regenerating = step(first, SessionEvent::Regenerate);
        let Some(SessionEffect::FetchSuggestions(request)) = &regenerating.effect else {
            panic!("expected a suggestion fetch");
        };
        assert_eq!(request.exclude_names, before);

        let second = step(
            regenerating.state,
            SessionEvent::SuggestionsReceived(batch(&["Curry", "Pho", "Tacos"])),
        );
        let after = second.state.exclude_names();

        let expected: ExcludeNames = ["Dal", "Pho", "Ramen", "Curry", "Tacos"].into_iter().collect();
        assert_eq!(after, expected);
        assert!(before.iter().all(|n| after.contains(n)));

        let closed = step(second.state, SessionEvent::Close);
        assert!(closed.state.exclude_names().is_empty());
        assert!(closed.effect.is_none());
    }

    #[test]
    fn stepping_back_to_start_keeps_shown_names() {
        let state = run(vec![
            SessionEvent::Start(FlowType::WhatToCook),
            SessionEvent::ChooseIngredientSource(None),
            SessionEvent::SetPreferences(PreferenceSelection::default()),
            SessionEvent::SetDetails(DetailsSelection::default()),
            SessionEvent::SuggestionsReceived(batch(&["Dal", "Pho", "Ramen"])),
        ]);
        let shown = state.exclude_names();

        let initial = (0..4).fold(state, |state, _| step(state, SessionEvent::Back).state);
        assert_eq!(initial.name(), "initial");
        assert_eq!(initial.exclude_names(), shown);

        let restarted = step(initial, SessionEvent::Start(FlowType::WhatToCook));
        assert_eq!(restarted.state.name(), "ingredient_source");
        assert_eq!(restarted.state.exclude_names(), shown);

        let other_flow = step(
            step(restarted.state, SessionEvent::Back).state,
            SessionEvent::Start(FlowType::IngredientsNeeded),
        );
        assert_eq!(other_flow.state.exclude_names(), shown);

        let reopened = step(
            step(other_flow.state, SessionEvent::Close).state,
            SessionEvent::Start(FlowType::WhatToCook),
        );
        assert!(reopened.state.exclude_names().is_empty());
    }

    #[test]
    fn back_from_streaming_cancels_and_drops_buffer() {
        let generating = step(picking(&["Dal", "Pho", "Ramen"]), SessionEvent::Pick(0));
        let partial = step(generating.state, SessionEvent::RecipeChunk("## Ingr".to_string()));

        let back = step(partial.state, SessionEvent::Back);

        assert_eq!(back.effect, Some(SessionEffect::CancelGeneration));
        let SessionState::Picking { suggestions, .. } = back.state else {
            panic!("expected picking");
        };
        assert_eq!(suggestions.len(), 3);
    }

    #[test]
    fn close_while_generating_cancels_without_saving() {
        let generating = step(picking(&["Dal", "Pho", "Ramen"]), SessionEvent::Regenerate);

        let closed = step(generating.state, SessionEvent::Close);

        assert_eq!(closed.state, SessionState::Closed { saved: None });
        assert_eq!(closed.effect, Some(SessionEffect::CancelGeneration));
    }

    #[test]
    fn failure_offers_retry_of_the_same_generation() {
        let generating = step(picking(&["Dal", "Pho", "Ramen"]), SessionEvent::Pick(2));
        let failed = step(generating.state, SessionEvent::RecipeFailed("timeout".to_string()));
        assert_eq!(failed.state.name(), "generation_failed");

        let retry = step(failed.state, SessionEvent::Retry);

        let Some(SessionEffect::StreamRecipe(input)) = retry.effect else {
            panic!("expected a recipe stream");
        };
        assert_eq!(input.selected.map(|s| s.name), Some("Ramen".to_string()));
    }

    #[test]
    fn save_failure_returns_to_preview() {
        let generating = step(picking(&["Dal", "Pho", "Ramen"]), SessionEvent::Pick(0));
        let ready = step(
            step(generating.state, SessionEvent::RecipeChunk("text".to_string())).state,
            SessionEvent::RecipeCompleted,
        );
        let saving = step(ready.state, SessionEvent::Save(SaveOptions::default()));

        let failed = step(saving.state, SessionEvent::SaveFailed("db down".to_string()));

        let SessionState::RecipeReady { save_error, .. } = failed.state else {
            panic!("expected recipe ready");
        };
        assert_eq!(save_error.as_deref(), Some("db down"));
    }

    #[test]
    fn invalid_events_are_rejected() {
        let state = picking(&["Dal", "Pho", "Ramen"]);

        assert_eq!(
            transition(&state, SessionEvent::RecipeCompleted),
            Err(SessionError::InvalidTransition {
                state: "picking",
                event: "recipe_completed",
            })
        );
        assert!(matches!(
            transition(&state, SessionEvent::Pick(7)),
            Err(SessionError::Validation(_))
        ));
        assert!(transition(&SessionState::default(), SessionEvent::Back).is_err());
    }
}
