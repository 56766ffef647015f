use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::system::auth::context::{use_auth, AuthProvider};
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    view! {
        <AuthProvider>
            <AppRoot />
        </AuthProvider>
    }
}

/// Login page until a session is established, then the console shell.
#[component]
fn AppRoot() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || !auth_state.get().restoring
            fallback=|| view! { <div class="loading">"Restoring session..."</div> }
        >
            <Show
                when=move || auth_state.get().is_authenticated()
                fallback=|| view! { <LoginPage /> }
            >
                <Shell />
            </Show>
        </Show>
    }
}
