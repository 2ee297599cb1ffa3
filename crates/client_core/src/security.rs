use shared::domain::User;

use crate::{
    action::SecurityAction,
    state::{AppState, SecurityState},
};

pub(crate) fn reduce(state: &SecurityState, action: &SecurityAction) -> Option<SecurityState> {
    match action {
        SecurityAction::SignedIn { user } => Some(SecurityState {
            loaded: true,
            user: Some(user.clone()),
        }),
        SecurityAction::SignedOut => {
            if state.loaded && state.user.is_none() {
                return None;
            }
            Some(SecurityState {
                loaded: true,
                user: None,
            })
        }
    }
}

pub fn select_signed_in_user(state: &AppState) -> Option<User> {
    state.security.user.clone()
}
