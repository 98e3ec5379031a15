use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::session_provider::use_session;
use crate::api::{ActivityInfo, ApiClient};
use crate::config::Config;

#[derive(Properties, PartialEq)]
pub struct GameMenuProps {
    /// Fired with the chosen activity row.
    pub on_select: Callback<ActivityInfo>,
}

/// Launch menu fed by `listarActividades`.
#[function_component(GameMenuComp)]
pub fn game_menu(props: &GameMenuProps) -> Html {
    let session = use_session();
    let activities = use_state(|| Option::<Vec<ActivityInfo>>::None);
    let error = use_state(|| Option::<String>::None);

    {
        let activities = activities.clone();
        let error = error.clone();
        let session = session.clone();
        use_effect_with((), move |_| {
            if let Some(session) = session {
                spawn_local(async move {
                    let client = ApiClient::from_config(&Config::new());
                    match client.listar_actividades(&session).await {
                        Ok(rows) => activities.set(Some(rows)),
                        Err(err) => {
                            log::error!("failed to load activity list: {err}");
                            error.set(Some(err.to_string()));
                        }
                    }
                });
            }
            || ()
        });
    }

    html! {
        <div class="cognitiva-menu">
            <h1 class="cognitiva-menu__title">{"Activities"}</h1>
            if let Some(message) = &*error {
                <p class="cognitiva-menu__error">{format!("Could not load activities: {message}")}</p>
            }
            if let Some(rows) = &*activities {
                <ul class="cognitiva-menu__list">
                    { for rows.iter().map(|activity| {
                        let on_select = props.on_select.clone();
                        let chosen = activity.clone();
                        let onclick = Callback::from(move |_| on_select.emit(chosen.clone()));
                        html! {
                            <li key={activity.id} class="cognitiva-menu__item">
                                <button class="cognitiva-menu__launch" {onclick}>
                                    <span class="cognitiva-menu__name">{&activity.nombre}</span>
                                    <span class="cognitiva-menu__description">{&activity.descripcion}</span>
                                </button>
                            </li>
                        }
                    }) }
                </ul>
            } else if error.is_none() {
                <p class="cognitiva-menu__loading">{"Loading activities..."}</p>
            }
        </div>
    }
}
