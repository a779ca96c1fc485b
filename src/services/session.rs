use crate::{Error, Gateway, Result};
use serde_json::Value;

/// Authentication flow: login, registration, current-user refresh.
///
/// The login route is the one place the backend expects a form-encoded body
/// instead of JSON. On success the access token lands in the credential
/// store, so the bearer interceptor picks it up from the very next call.
pub struct Session<'a> {
    pub(crate) gateway: &'a Gateway,
}

impl Session<'_> {
    /// Exchange a credential pair for an access token, then load the user it
    /// belongs to. Returns the user payload.
    pub async fn login(&self, username: &str, password: &str) -> Result<Value> {
        let fields = [("username", username), ("password", password)];
        let data = self
            .gateway
            .post_form("/auth/login/access-token", &fields)
            .await?;

        let token = data
            .get("access_token")
            .and_then(Value::as_str)
            .map(String::from);
        self.gateway.credentials().set_token(token);

        self.fetch_current_user().await
    }

    /// Create an account, then log in with the same credential pair.
    pub async fn register(&self, payload: &Value) -> Result<Value> {
        self.gateway.post("/users/", payload).await?;

        let username = payload.get("username").and_then(Value::as_str);
        let password = payload.get("password").and_then(Value::as_str);
        match (username, password) {
            (Some(username), Some(password)) => self.login(username, password).await,
            _ => Err(Error::Setup(
                "registration payload missing username or password".to_string(),
            )),
        }
    }

    /// Refresh the current user from the backend and store it. A rejected
    /// session clears the store on the way through the gateway's 401
    /// handling; no extra cleanup is needed here.
    pub async fn fetch_current_user(&self) -> Result<Value> {
        let user = self.gateway.get("/users/me").await?;
        self.gateway.credentials().set_user(Some(user.clone()));
        Ok(user)
    }

    pub async fn change_password(&self, payload: &Value) -> Result<Value> {
        self.gateway.put("/users/me/password", payload).await
    }

    /// Drop the session locally. The backend keeps no session state beyond
    /// the token itself.
    pub fn logout(&self) {
        self.gateway.credentials().on_auth_failure();
    }
}
