use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const ROLE_ID_KEY: &str = "auth_role_id";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Get access token from localStorage
pub fn get_access_token() -> Option<String> {
    get_local_storage()?
        .get_item(ACCESS_TOKEN_KEY)
        .ok()?
        .filter(|t| !t.is_empty())
}

/// Role of the signed-in user, as stored by the login flow
pub fn get_role_id() -> Option<i64> {
    get_local_storage()?.get_item(ROLE_ID_KEY).ok()??.trim().parse().ok()
}
