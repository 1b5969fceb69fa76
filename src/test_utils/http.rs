use axum_test::{TestResponse, TestServer};
use rusqlite::Connection;
use serde::de::DeserializeOwned;

use crate::{
    AppState, api_response::ApiResponse, category::DefaultCategories, routing::build_router,
};

/// A test server over a fresh in-memory database seeded with `defaults`.
#[track_caller]
pub(crate) fn get_test_server(defaults: &DefaultCategories) -> TestServer {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    let state =
        AppState::new(connection, "Etc/UTC", defaults).expect("Could not create app state");

    TestServer::try_new(build_router(state)).expect("Could not create test server")
}

#[track_caller]
pub(crate) fn parse_api_response<T: DeserializeOwned>(response: &TestResponse) -> ApiResponse<T> {
    response.json::<ApiResponse<T>>()
}
