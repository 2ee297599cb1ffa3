use std::sync::Arc;

use shared::domain::{Holiday, HolidayId};

use crate::{
    action::HolidaysAction,
    selector::{ident, Memo},
    state::{AppState, HolidaysState},
};

pub(crate) fn reduce(state: &HolidaysState, action: &HolidaysAction) -> Option<HolidaysState> {
    match action {
        HolidaysAction::Load | HolidaysAction::LoadFailure { .. } => None,
        HolidaysAction::Loaded { holidays } => Some(HolidaysState {
            holidays: Arc::new(holidays.clone()),
            ..state.clone()
        }),
        HolidaysAction::FavouriteAdded { id } => {
            // Idempotent: adding a favourite twice keeps the original state.
            if state.favourite_ids.contains(id) {
                return None;
            }
            let mut favourite_ids = state.favourite_ids.as_ref().clone();
            favourite_ids.push(*id);
            Some(HolidaysState {
                favourite_ids: Arc::new(favourite_ids),
                ..state.clone()
            })
        }
        HolidaysAction::FavouriteRemoved { id } => {
            if !state.favourite_ids.contains(id) {
                return None;
            }
            let favourite_ids: Vec<HolidayId> = state
                .favourite_ids
                .iter()
                .copied()
                .filter(|favourite_id| favourite_id != id)
                .collect();
            Some(HolidaysState {
                favourite_ids: Arc::new(favourite_ids),
                ..state.clone()
            })
        }
    }
}

pub fn select_holidays(state: &AppState) -> Arc<Vec<Holiday>> {
    Arc::clone(&state.holidays.holidays)
}

pub fn select_favourite_ids(state: &AppState) -> Arc<Vec<HolidayId>> {
    Arc::clone(&state.holidays.favourite_ids)
}

#[derive(Debug, Clone, PartialEq)]
pub struct HolidayWithFavourite {
    pub holiday: Holiday,
    pub is_favourite: bool,
}

/// Pairs each holiday with its favourite flag; recomputed only when the
/// holiday list or the favourite set changes.
pub struct HolidaysWithFavouritesSelector {
    memo: Memo<Vec<HolidayWithFavourite>>,
}

impl HolidaysWithFavouritesSelector {
    pub fn new() -> Self {
        Self { memo: Memo::new() }
    }

    pub fn select(&self, state: &AppState) -> Arc<Vec<HolidayWithFavourite>> {
        let slice = &state.holidays;
        let keys = [ident(&slice.holidays), ident(&slice.favourite_ids)];
        self.memo.recall(&keys, || {
            slice
                .holidays
                .iter()
                .map(|holiday| HolidayWithFavourite {
                    is_favourite: slice.favourite_ids.contains(&holiday.id),
                    holiday: holiday.clone(),
                })
                .collect()
        })
    }
}

impl Default for HolidaysWithFavouritesSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/holidays_tests.rs"]
mod tests;
