use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use shared::domain::SystemName;

use super::{error_page, missing_system, render};
use crate::{
    app_state::AppState,
    views::{self, Navbar, Page},
};

pub(crate) async fn index(State(state): State<Arc<AppState>>) -> Response {
    let systems = match server_api::list_systems(&state.api).await {
        Ok(systems) => systems,
        Err(err) => return error_page(&state, err),
    };

    render(
        &state,
        Page {
            title: "Systems".to_string(),
            navbar: Navbar::new("Systems", None, None),
            data: views::systems::index(&systems),
        },
    )
    .into_response()
}

pub(crate) async fn view(
    State(state): State<Arc<AppState>>,
    Path(raw_name): Path<String>,
) -> Response {
    let Ok(system_name) = SystemName::parse(&raw_name) else {
        return missing_system();
    };

    let system_view = match server_api::load_system_view(&state.api, &system_name).await {
        Ok(view) => view,
        Err(err) => return error_page(&state, err),
    };

    render(
        &state,
        Page {
            title: system_name.to_string(),
            navbar: Navbar::new(
                format!("System - {system_name}"),
                None,
                Some(views::systems::system_href("edit", &system_name)),
            ),
            data: views::systems::system_view(&system_view),
        },
    )
    .into_response()
}

pub(crate) async fn edit(
    State(state): State<Arc<AppState>>,
    Path(raw_name): Path<String>,
) -> Response {
    let Ok(system_name) = SystemName::parse(&raw_name) else {
        return missing_system();
    };

    render(
        &state,
        Page {
            title: "Edit System".to_string(),
            navbar: Navbar::new(format!("System - {system_name}"), None, None),
            data: views::systems::edit_acknowledgment(&system_name),
        },
    )
    .into_response()
}

pub(crate) async fn name_required() -> Response {
    missing_system()
}
