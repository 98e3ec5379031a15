use cognitiva_games::prelude::*;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <SessionProviderComp>
            <Shell />
        </SessionProviderComp>
    }
}

#[function_component(Shell)]
fn shell() -> Html {
    let session = use_session();
    let selected = use_state(|| Option::<ActivityInfo>::None);
    let Some(session) = session else {
        // The provider is already redirecting to the login flow.
        return html! {};
    };

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |activity: ActivityInfo| selected.set(Some(activity)))
    };
    let on_back = {
        let selected = selected.clone();
        Callback::from(move |_| selected.set(None))
    };

    html! {
        <div class="cognitiva-app">
            { match &*selected {
                None => html! { <GameMenuComp {on_select} /> },
                Some(activity) => html! {
                    <>
                        <button class="cognitiva-app__back" onclick={on_back}>
                            {"Back to activities"}
                        </button>
                        { game_screen(activity, session) }
                    </>
                },
            } }
        </div>
    }
}

/// Route an activity row to its game component by the backend-provided path.
fn game_screen(activity: &ActivityInfo, session: Session) -> Html {
    let activity_id = activity.id;
    let route = activity.ruta.as_str();
    if route.contains("pares") {
        html! { <MatchingPairsComp {activity_id} {session} /> }
    } else if route.contains("rompecabezas") {
        html! { <TileSwapComp {activity_id} {session} /> }
    } else if route.contains("secuencia") {
        html! { <SequenceComp {activity_id} {session} /> }
    } else if route.contains("totito") {
        html! { <TicTacToeComp {activity_id} {session} /> }
    } else {
        html! { <p class="cognitiva-app__unknown">{format!("Unknown activity: {}", activity.nombre)}</p> }
    }
}
