use std::sync::Arc;

use crate::{
    action::MasterAction,
    state::{AppState, MasterState},
};

pub(crate) fn reduce(_state: &MasterState, action: &MasterAction) -> Option<MasterState> {
    match action {
        MasterAction::Load | MasterAction::LoadFailure { .. } => None,
        MasterAction::Loaded { countries } => Some(MasterState {
            countries: Arc::new(countries.clone()),
            loaded: true,
        }),
    }
}

pub fn select_countries(state: &AppState) -> Arc<Vec<String>> {
    Arc::clone(&state.master.countries)
}
