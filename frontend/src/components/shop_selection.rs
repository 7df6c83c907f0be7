use crate::auth::use_session;
use crate::components::icons::Close;
use decorflow::Shop;
use decorflow::cancel::{TaskGuard, cancellable, log_if_cancelled};
use decorflow::shops::{NO_SHOPS_MESSAGE, fetch_shops, is_opening, select_shop};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 门店选择弹窗
///
/// 变为可见时拉取一次门店列表；选择后依次执行：写入会话 -> `on_select_shop` -> `on_close`。
#[component]
pub fn ShopSelection(
    #[prop(into)] show: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_select_shop: Callback<String>,
) -> impl IntoView {
    let ctx = use_session();
    let (shops, set_shops) = signal(Vec::<Shop>::new());
    let (loading, set_loading) = signal(false);
    let pending = StoredValue::new(None::<TaskGuard>);

    // 卸载时取消进行中的请求
    on_cleanup(move || {
        pending.try_update_value(|guard| guard.take());
    });

    // 只在从隐藏变为可见时拉取
    Effect::new(move |was_visible: Option<bool>| {
        let visible = show.get();
        if !is_opening(was_visible, visible) {
            return visible;
        }

        let api = ctx.api();
        set_loading.set(true);
        let (task, guard) = cancellable(async move {
            let list = fetch_shops(&api).await;
            set_shops.set(list);
            set_loading.set(false);
        });
        // 替换旧的 guard 会取消上一次仍未完成的请求
        pending.set_value(Some(guard));
        spawn_local(async move {
            log_if_cancelled("shop fetch", task.await);
        });
        visible
    });

    let handle_select = move |shop: Shop| {
        let api = ctx.api();
        let result = select_shop(
            api.session(),
            &shop,
            |id| on_select_shop.run(id.to_string()),
            || on_close.run(()),
        );
        if let Err(e) = result {
            log::error!("Failed to store selected shop: {}", e);
        }
    };

    view! {
        <Show when=move || show.get()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/50" on:click=move |_| on_close.run(())>
                <div class="card bg-base-100 shadow-xl w-full max-w-2xl" on:click=|ev| ev.stop_propagation()>
                    <div class="card-body">
                        <div class="flex justify-between items-start border-b border-base-300 pb-2">
                            <div>
                                <h2 class="card-title">"Select a Shop"</h2>
                                <p class="text-base-content/70 mt-1">"Please select a shop to continue"</p>
                            </div>
                            <button class="btn btn-ghost btn-sm btn-square" on:click=move |_| on_close.run(())>
                                <Close attr:class="h-4 w-4" />
                            </button>
                        </div>

                        <Show when=move || loading.get()>
                            <div class="flex justify-center py-8">
                                <span class="loading loading-spinner loading-md"></span>
                            </div>
                        </Show>

                        <Show when=move || !loading.get() && shops.with(|list| list.is_empty())>
                            <p class="text-center py-8 text-base-content/50">{NO_SHOPS_MESSAGE}</p>
                        </Show>

                        <div class="mt-4 grid grid-cols-1 gap-4 sm:grid-cols-2">
                            <For
                                each={move || shops.get().into_iter().enumerate().collect::<Vec<_>>()}
                                key={|(_, shop)| shop.id.clone()}
                                children={move |(index, shop)| {
                                    let label = shop.display_name(index);
                                    view! {
                                        <button
                                            type="button"
                                            class="flex flex-col items-center justify-center p-4 bg-base-200 rounded-lg hover:bg-base-300 transition-colors"
                                            on:click=move |_| handle_select(shop.clone())
                                        >
                                            <img alt="Shop Icon" src=Shop::icon_url(index) class="w-16 h-16 mb-2 object-cover" />
                                            <span class="text-lg font-medium">{label}</span>
                                        </button>
                                    }
                                }}
                            />
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}
