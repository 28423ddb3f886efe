use super::session::{apply_command, ComposerSession, DragOrigin, DropTarget};
use crate::shared::icons::icon;
use contracts::domain::c001_content_type::aggregate::{ContentType, FieldId};
use contracts::shared::metadata::describe;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Верхняя или нижняя половина строки решает before/after
fn row_target(ev: &leptos::ev::PointerEvent, index: usize) -> Option<DropTarget> {
    let element: web_sys::HtmlElement = ev.current_target()?.dyn_into().ok()?;
    let rect = element.get_bounding_client_rect();
    let rel_y = ev.client_y() as f64 - rect.top();
    if rel_y < rect.height() / 2.0 {
        Some(DropTarget::Before(index))
    } else {
        Some(DropTarget::After(index))
    }
}

fn render_field_row(
    schema: RwSignal<ContentType>,
    session: RwSignal<ComposerSession>,
    selected: RwSignal<Option<FieldId>>,
    index: usize,
    field: &contracts::domain::c001_content_type::aggregate::FieldDefinition,
    duplicates: &[String],
) -> AnyView {
    let field_id = field.id;
    let label = field.label.clone();
    let api_identifier = field.api_identifier.clone();
    let kind_info = describe(&field.kind);
    let kind_label = match &kind_info {
        Ok(info) => info.label.to_string(),
        Err(e) => format!("Неизвестный вид поля: {}", e.0),
    };
    let kind_unknown = kind_info.is_err();
    let is_duplicate = duplicates.contains(&api_identifier);
    let is_required = field.is_required;
    let is_list = field.is_list;

    let marker_before = move || session.get().current_target() == Some(DropTarget::Before(index));
    let marker_after = move || session.get().current_target() == Some(DropTarget::After(index));
    let is_drop_candidate =
        move || session.get().current_target() == Some(DropTarget::OnField(field_id));
    let is_selected = move || selected.get() == Some(field_id);

    view! {
        <div class="composer-row-wrapper">
            {move || marker_before().then(|| view! { <div class="composer-drop-marker"></div> })}
            <div
                class=move || {
                    let mut class = String::from("composer-row");
                    if is_selected() {
                        class.push_str(" composer-row--selected");
                    }
                    if is_drop_candidate() {
                        class.push_str(" composer-row--drop-candidate");
                    }
                    class
                }
                on:pointerdown=move |ev: leptos::ev::PointerEvent| {
                    ev.prevent_default();
                    session.update(|s| {
                        s.pointer_down(
                            DragOrigin::Existing(field_id),
                            ev.client_x() as f64,
                            ev.client_y() as f64,
                        )
                    });
                }
                on:pointermove=move |ev: leptos::ev::PointerEvent| {
                    if !session.get_untracked().is_dragging() {
                        return;
                    }
                    let target = row_target(&ev, index).unwrap_or(DropTarget::OnField(field_id));
                    session.update(|s| s.drag_over(target));
                }
                on:click=move |_| selected.set(Some(field_id))
            >
                <span class="composer-row__grip">{icon("grip")}</span>
                <span class="composer-row__label">
                    {label}
                    {is_required.then(|| view! { <span class="composer-row__required">{"*"}</span> })}
                    {is_list.then(|| view! { <span class="composer-row__badge">{"list"}</span> })}
                </span>
                <span class="composer-row__identifier">{api_identifier}</span>
                <span class=move || {
                    if kind_unknown {
                        "composer-row__kind composer-row__kind--unknown"
                    } else {
                        "composer-row__kind"
                    }
                }>
                    {kind_label}
                </span>
                {is_duplicate.then(|| view! {
                    <span class="composer-row__warning" title="Идентификатор совпадает с другим полем">
                        {"дубликат"}
                    </span>
                })}
                <button
                    class="composer-row__delete"
                    title="Удалить поле"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        schema.update(|ct| ct.remove_field(field_id));
                        if selected.get_untracked() == Some(field_id) {
                            selected.set(None);
                        }
                    }
                >
                    {icon("trash")}
                </button>
            </div>
            {move || marker_after().then(|| view! { <div class="composer-drop-marker"></div> })}
        </div>
    }
    .into_any()
}

/// Канвас схемы: упорядоченный список полей с маркерами вставки.
///
/// Все pointer-события транслируются в headless-сессию; мутация схемы
/// происходит только из результата `drop`.
#[component]
pub fn ComposerCanvas(
    schema: RwSignal<ContentType>,
    session: RwSignal<ComposerSession>,
    selected: RwSignal<Option<FieldId>>,
) -> impl IntoView {
    let finish_drop = move || {
        let current = schema.get_untracked();
        let mut command = None;
        session.update(|s| command = s.drop(&current));
        if let Some(command) = command {
            schema.update(|ct| apply_command(ct, command));
        }
    };

    view! {
        <div
            class="composer-canvas"
            tabindex="0"
            on:pointermove=move |ev: leptos::ev::PointerEvent| {
                session.update(|s| s.pointer_move(ev.client_x() as f64, ev.client_y() as f64));
            }
            on:pointerup=move |_| finish_drop()
            on:pointerleave=move |_| session.update(|s| s.drag_leave())
            on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                if ev.key() == "Escape" {
                    session.update(|s| s.cancel());
                }
            }
        >
            {move || {
                let current = schema.get();
                let duplicates = current.duplicate_identifiers();
                if current.fields.is_empty() {
                    view! {
                        <div
                            class=move || {
                                if session.get().current_target() == Some(DropTarget::EmptyCanvas) {
                                    "composer-canvas__empty composer-canvas__empty--active"
                                } else {
                                    "composer-canvas__empty"
                                }
                            }
                            on:pointerover=move |_| {
                                session.update(|s| s.drag_over(DropTarget::EmptyCanvas));
                            }
                        >
                            {"Перетащите поле из палитры"}
                        </div>
                    }
                    .into_any()
                } else {
                    current
                        .fields
                        .iter()
                        .enumerate()
                        .map(|(index, field)| {
                            render_field_row(schema, session, selected, index, field, &duplicates)
                        })
                        .collect::<Vec<_>>()
                        .into_view()
                        .into_any()
                }
            }}
        </div>
    }
}
