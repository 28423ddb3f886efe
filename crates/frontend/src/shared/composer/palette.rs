use super::session::{ComposerSession, DragOrigin};
use crate::shared::icons::icon;
use contracts::shared::metadata::{describe, palette};
use leptos::prelude::*;

/// Палитра видов полей. Перетаскивание элемента на канвас создает поле.
#[component]
pub fn ComposerPalette(session: RwSignal<ComposerSession>) -> impl IntoView {
    let items: Vec<_> = palette()
        .iter()
        .filter_map(|kind| describe(kind).ok().map(|info| (kind.clone(), info)))
        .collect();

    view! {
        <div
            class="composer-palette"
            // Отпускание над палитрой = клик или drop мимо канваса
            on:pointerup=move |_| session.update(|s| s.cancel())
        >
            <div class="composer-palette__title">{"Поля"}</div>
            {items
                .into_iter()
                .map(|(kind, info)| {
                    let drag_kind = kind.clone();
                    view! {
                        <div
                            class="composer-palette__item"
                            title=info.description
                            on:pointerdown=move |ev: leptos::ev::PointerEvent| {
                                ev.prevent_default();
                                let origin = DragOrigin::Palette(drag_kind.clone());
                                session.update(|s| {
                                    s.pointer_down(origin, ev.client_x() as f64, ev.client_y() as f64)
                                });
                            }
                        >
                            <span class="composer-palette__icon">{icon(info.icon)}</span>
                            <span class="composer-palette__label">{info.label}</span>
                            <span class="composer-palette__category">{info.category.label()}</span>
                        </div>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}
