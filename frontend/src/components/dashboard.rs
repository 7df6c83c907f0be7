use crate::auth::use_session;
use crate::components::icons::{LogOut, Store};
use crate::web::router::use_router;
use decorflow::dashboard::DashboardSummary;
use leptos::prelude::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_session();
    let router = use_router();

    let summary = move || ctx.session().with(DashboardSummary::from_session);

    let on_sign_out = move |_| {
        let next = ctx.sign_out();
        router.navigate_to_route(next);
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-4xl mx-auto card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="mb-4">
                        <h2 class="card-title text-2xl">"Dashboard"</h2>
                        <p class="text-base-content/70 mt-1">"Welcome back to the dashboard!"</p>
                    </div>

                    <div class="space-y-2 mb-6">
                        <p class="break-all">
                            <span class="font-semibold">"Your session token: "</span>
                            <span class="font-mono text-sm">{move || summary().token}</span>
                        </p>
                        <p class="flex items-center gap-2">
                            <Store attr:class="h-4 w-4 opacity-60" />
                            <span class="font-semibold">"Your Shop ID: "</span>
                            {move || summary().shop_id}
                        </p>
                        <p>
                            <span class="font-semibold">"Your Shop: "</span>
                            {move || summary().shop_name}
                        </p>
                    </div>

                    <div class="card-actions">
                        <button on:click=on_sign_out class="btn btn-error gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Sign Out"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
