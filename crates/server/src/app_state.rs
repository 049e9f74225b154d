use server_api::ApiContext;

use crate::views::Sidebar;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) sidebar: Sidebar,
    pub(crate) skin: String,
}

impl AppState {
    pub(crate) fn new(api: ApiContext, skin: impl Into<String>) -> Self {
        Self {
            api,
            sidebar: Sidebar::standard(),
            skin: skin.into(),
        }
    }
}
