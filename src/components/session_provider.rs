use gloo::storage::{LocalStorage, Storage};
use serde::Deserialize;
use yew::prelude::*;

use crate::model::{Session, SessionError};

pub const TOKEN_KEY: &str = "cognitiva_token";
pub const USER_KEY: &str = "cognitiva_user";
const LOGIN_PATH: &str = "/login";

/// The user DTO as the login flow persists it. Only the id matters here.
#[derive(Deserialize)]
struct StoredUser {
    id: i64,
}

/// Read the persisted session. This is the only place ambient storage is
/// consulted; everything downstream receives the session explicitly.
pub fn load_session() -> Result<Session, SessionError> {
    let storage = LocalStorage::raw();
    let token = storage
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .ok_or(SessionError::Missing)?;
    let raw_user = storage
        .get_item(USER_KEY)
        .ok()
        .flatten()
        .ok_or(SessionError::Missing)?;
    let user: StoredUser =
        serde_json::from_str(&raw_user).map_err(|_| SessionError::Corrupt)?;
    Ok(Session {
        user_id: user.id,
        token,
    })
}

fn redirect_to_login() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().replace(LOGIN_PATH);
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    #[prop_or_default]
    pub children: Html,
}

/// Resolves the session once and injects it as context; without one, no game
/// state is created and the browser is sent to the login flow.
#[function_component(SessionProviderComp)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    match load_session() {
        Ok(session) => html! {
            <ContextProvider<Session> context={session}>
                {props.children.clone()}
            </ContextProvider<Session>>
        },
        Err(err) => {
            log::warn!("{err}; redirecting to login");
            redirect_to_login();
            html! {}
        }
    }
}

/// Session context injected by [`SessionProviderComp`].
#[hook]
pub fn use_session() -> Option<Session> {
    use_context::<Session>()
}
