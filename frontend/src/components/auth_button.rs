use crate::auth::{self, AuthContext, UserInfo};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AuthButtonProps {
    pub auth: AuthContext,
}

#[function_component(AuthButton)]
pub fn auth_button(props: &AuthButtonProps) -> Html {
    let user_info = use_state(|| None::<UserInfo>);
    let loading = use_state(|| false);

    // Resolve the profile whenever the token changes
    {
        let user_info = user_info.clone();
        let loading = loading.clone();
        let on_token_change = props.auth.on_token_change.clone();

        use_effect_with(props.auth.token.clone(), move |token_opt| {
            if let Some(token) = token_opt.clone() {
                let user_info = user_info.clone();
                let loading = loading.clone();
                let on_token_change = on_token_change.clone();

                spawn_local(async move {
                    loading.set(true);

                    match auth::fetch_user_info(&token).await {
                        Ok(info) => {
                            log::info!("Signed in as {}", info.email);
                            user_info.set(Some(info));
                        }
                        Err(e) => {
                            log::error!("Failed to fetch user info: {}", e);
                            // Token might be invalid, clear it
                            user_info.set(None);
                            on_token_change.emit(None);
                        }
                    }

                    loading.set(false);
                });
            } else {
                user_info.set(None);
            }
        });
    }

    let handle_login = Callback::from(|_| {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/auth/login");
        }
    });

    let handle_logout = {
        let user_info = user_info.clone();
        let on_token_change = props.auth.on_token_change.clone();
        Callback::from(move |_| {
            user_info.set(None);
            on_token_change.emit(None);
        })
    };

    if *loading {
        return html! {
            <div class="auth-button-container">
                <div class="auth-loading">
                    <i class="fa-solid fa-spinner fa-spin"></i>
                    {" Loading..."}
                </div>
            </div>
        };
    }

    match &*user_info {
        Some(user) => {
            html! {
                <div class="auth-button-container">
                    <div class="user-info">
                        <div class="user-details">
                            <span class="user-name">{&user.name}</span>
                            <span class="user-email">{&user.email}</span>
                        </div>
                        <button
                            class="logout-button"
                            onclick={handle_logout}
                            title="Sign out"
                        >
                            <i class="fa-solid fa-sign-out-alt"></i>
                            {" Sign out"}
                        </button>
                    </div>
                </div>
            }
        }
        None => {
            html! {
                <div class="auth-button-container">
                    <button
                        class="login-button"
                        onclick={handle_login}
                        title="Sign in with the identity provider"
                    >
                        <i class="fa-brands fa-google"></i>
                        {" Sign in"}
                    </button>
                </div>
            }
        }
    }
}
