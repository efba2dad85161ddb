use crate::model::total_pages;
use crate::store::entity::intent::{BusyFlag, EntityIntent};
use crate::store::entity::state::EntityState;
use crate::store::mvi::Reducer;

pub struct EntityReducer;

impl Reducer for EntityReducer {
    type State = EntityState;
    type Intent = EntityIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            EntityIntent::ListRequested { search } => EntityState {
                loading: true,
                error: None,
                list_generation: state.list_generation + 1,
                search,
                ..state
            },
            EntityIntent::ListLoaded {
                generation,
                page_number,
                page_size,
                page,
            } => {
                if generation != state.list_generation {
                    // Superseded by a newer request.
                    return state;
                }
                let total_count = page.total_count();
                EntityState {
                    records: page.items,
                    total_count,
                    page_number,
                    page_size,
                    total_pages: total_pages(total_count, page_size),
                    loading: false,
                    ..state
                }
            }
            EntityIntent::ListFailed {
                generation,
                message,
            } => {
                if generation != state.list_generation {
                    return state;
                }
                EntityState {
                    records: Vec::new(),
                    total_count: 0,
                    total_pages: 0,
                    loading: false,
                    error: Some(message),
                    ..state
                }
            }
            EntityIntent::DetailRequested => EntityState {
                loading: true,
                error: None,
                ..state
            },
            EntityIntent::DetailLoaded { record } => EntityState {
                current: Some(record),
                loading: false,
                ..state
            },
            EntityIntent::DetailFailed { message } => EntityState {
                loading: false,
                error: Some(message),
                ..state
            },
            EntityIntent::MutationStarted { flag } => set_flag(
                EntityState {
                    error: None,
                    ..state
                },
                flag,
                true,
            ),
            EntityIntent::MutationSucceeded { flag } => set_flag(state, flag, false),
            EntityIntent::MutationFailed { flag, message } => set_flag(
                EntityState {
                    error: Some(message),
                    ..state
                },
                flag,
                false,
            ),
            EntityIntent::StatsLoaded { stats } => EntityState {
                stats: Some(stats),
                ..state
            },
            EntityIntent::LookupsLoaded { lookups } => EntityState {
                lookups: Some(lookups),
                ..state
            },
            EntityIntent::RequestFailed { message } => EntityState {
                error: Some(message),
                ..state
            },
            EntityIntent::SearchUpdated { search } => EntityState { search, ..state },
            EntityIntent::ErrorCleared => EntityState { error: None, ..state },
            EntityIntent::CurrentReset => EntityState {
                current: None,
                ..state
            },
        }
    }
}

fn set_flag(mut state: EntityState, flag: BusyFlag, value: bool) -> EntityState {
    match flag {
        BusyFlag::Submitting => state.submitting = value,
        BusyFlag::Deleting => state.deleting = value,
    }
    state
}
