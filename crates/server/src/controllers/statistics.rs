use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use server_api::statistics;

use super::{error_page, render};
use crate::{
    app_state::AppState,
    views::{self, Navbar, Page},
};

pub(crate) async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    render(
        &state,
        Page {
            title: "Statistics".to_string(),
            navbar: Navbar::new("Statistics", None, None),
            data: views::statistics::get_started(),
        },
    )
}

pub(crate) async fn os_distribution(State(state): State<Arc<AppState>>) -> Response {
    let data = match statistics::os_distribution(&state.api).await {
        Ok(data) => data,
        Err(err) => return error_page(&state, err),
    };

    render(
        &state,
        Page {
            title: "OS Distribution".to_string(),
            navbar: Navbar::new("Statistics - Operating System Distribution", None, None),
            data: views::statistics::os_distribution(&data.0),
        },
    )
    .into_response()
}

pub(crate) async fn os_family_distribution(State(state): State<Arc<AppState>>) -> Response {
    let data = match statistics::os_family_distribution(&state.api).await {
        Ok(data) => data,
        Err(err) => return error_page(&state, err),
    };

    render(
        &state,
        Page {
            title: "OS Family Distribution".to_string(),
            navbar: Navbar::new(
                "Statistics - Operating System Family Distribution",
                None,
                None,
            ),
            data: views::statistics::os_family_distribution(&data.0),
        },
    )
    .into_response()
}
