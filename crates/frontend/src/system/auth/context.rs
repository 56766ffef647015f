use contracts::system::auth::AdminSession;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub token: Option<String>,
    pub admin: Option<AdminSession>,
    /// Stored session is still being validated
    pub restoring: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.admin.is_some()
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let stored = storage::get_token();
    let (auth_state, set_auth_state) = signal(AuthState {
        restoring: stored.is_some(),
        ..Default::default()
    });

    // Restore the session from localStorage on mount
    if let Some(token) = stored {
        spawn_local(async move {
            match api::get_profile(&token).await {
                Ok(admin) => {
                    log::info!("Session restored for {}", admin.email);
                    set_auth_state.set(AuthState {
                        token: Some(token),
                        admin: Some(admin),
                        restoring: false,
                    });
                }
                Err(e) => {
                    log::warn!("Stored session rejected: {}", e);
                    storage::clear_token();
                    set_auth_state.set(AuthState::default());
                }
            }
        });
    }

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Helper: Perform login and store the returned token
pub async fn do_login(
    set_auth_state: WriteSignal<AuthState>,
    email: String,
    password: String,
) -> Result<(), String> {
    let mut admin = api::login(email, password)
        .await
        .map_err(|e| e.user_message())?;
    if admin.token.is_empty() {
        return Err("Login response did not include a token".to_string());
    }
    let token = std::mem::take(&mut admin.token);
    storage::save_token(&token);
    set_auth_state.set(AuthState {
        token: Some(token),
        admin: Some(admin),
        restoring: false,
    });
    Ok(())
}

/// Helper: Perform logout
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_token();
    set_auth_state.set(AuthState::default());
}
