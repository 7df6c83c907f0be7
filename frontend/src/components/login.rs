use crate::auth::use_session;
use crate::components::shop_selection::ShopSelection;
use crate::web::router::use_router;
use decorflow::Credentials;
use decorflow::auth::{AuthPhase, authenticate};
use decorflow::cancel::{TaskGuard, cancellable, log_if_cancelled};
use decorflow::route::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_session();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let phase = RwSignal::new(AuthPhase::Unauthenticated);
    let (show_shop_selection, set_show_shop_selection) = signal(false);
    let pending = StoredValue::new(None::<TaskGuard>);

    // 离开登录页时丢弃未完成的登录请求，过期响应不会写入令牌
    on_cleanup(move || {
        pending.try_update_value(|guard| guard.take());
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        // 同一时间最多一个登录请求
        if !phase.try_update(AuthPhase::start_submission).unwrap_or(false) {
            return;
        }

        let credentials = Credentials::new(username.get_untracked(), password.get_untracked());
        let api = ctx.api();

        let (task, guard) = cancellable(async move {
            let next = authenticate(&api, &credentials).await;
            ctx.refresh();
            // 令牌此时已经写入，之后才展示门店选择
            if next.is_authenticated() {
                set_show_shop_selection.set(true);
            }
            phase.set(next);
        });
        pending.set_value(Some(guard));
        spawn_local(async move {
            log_if_cancelled("sign-in", task.await);
        });
    };

    let handle_shop_select = move |shop_id: String| {
        log::info!("Continuing to dashboard with shop {}", shop_id);
        ctx.refresh();
        router.navigate_to_route(AppRoute::Dashboard);
    };

    let is_submitting = move || phase.with(|p| p.is_submitting());
    let error_message = move || phase.with(|p| p.error_message().map(str::to_string));

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <img src="https://ik.imagekit.io/yhd/DecorFlow/Icons/Logo.png" class="w-28 mx-auto" alt="Logo" />
                    <h1 class="text-3xl font-bold mt-2">"Welcome back"</h1>
                    <p class="text-base-content/70">"Please enter your details."</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <input
                                id="login-username"
                                type="text"
                                placeholder="Username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <input
                                id="login-password"
                                type="password"
                                placeholder="Password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button type="submit" class="btn btn-neutral" disabled=is_submitting>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Logging in..." }.into_any()
                                } else {
                                    "Log in".into_any()
                                }}
                            </button>
                        </div>
                        {move || error_message().map(|message| view! {
                            <div role="alert" class="text-error text-sm mt-4">{message}</div>
                        })}
                    </form>
                </div>

                <p class="text-base-content/70 py-6">
                    "Don't have an account? "
                    <a href="#" class="link font-semibold">"Sign up for free."</a>
                </p>
            </div>
        </div>

        <ShopSelection
            show=show_shop_selection
            on_close=move |_: ()| set_show_shop_selection.set(false)
            on_select_shop=handle_shop_select
        />
    }
}
