use super::field_settings::FieldSettings;
use super::view_model::ContentTypeDetailsViewModel;
use crate::shared::composer::{ComposerCanvas, ComposerPalette};
use crate::shared::icons::icon;
use leptos::prelude::*;
use std::rc::Rc;

/// Редактор типа контента: заголовок схемы + композер полей
#[component]
pub fn ContentTypeDetails(
    id: Option<String>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let vm = ContentTypeDetailsViewModel::new();
    vm.load_if_needed(id);

    let vm_clone = vm.clone();

    view! {
        <div class="details-container content-type-details">
            <div class="details-header">
                <h3>
                    {
                        let vm = vm_clone.clone();
                        move || if vm.edit_mode.get() { "Редактирование типа контента" } else { "Новый тип контента" }
                    }
                </h3>
            </div>

            {
                let vm = vm_clone.clone();
                move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })
            }

            {
                // Структурно битый документ фатален: композер не монтируем
                let vm = vm_clone.clone();
                move || {
                    if let Some(fatal) = vm.fatal.get() {
                        return view! {
                            <div class="error error--fatal">{fatal}</div>
                        }
                        .into_any();
                    }
                    let vm = vm.clone();
                    let vm_name = vm.clone();
                    let vm_name_input = vm.clone();
                    let vm_ident = vm.clone();
                    let vm_ident_input = vm.clone();
                    let vm_ident_auto = vm.clone();
                    let vm_descr = vm.clone();
                    let vm_descr_input = vm.clone();
                    view! {
                        <div class="details-form">
                            <div class="form-group">
                                <label for="ct-name">{"Имя"}</label>
                                <input
                                    type="text"
                                    id="ct-name"
                                    prop:value=move || vm_name.schema.get().base.description.clone()
                                    on:input=move |ev| vm_name_input.set_name(event_target_value(&ev))
                                    placeholder="Tourist Plan"
                                />
                            </div>

                            <div class="form-group">
                                <label for="ct-identifier">
                                    {"Api-идентификатор"}
                                    {move || vm_ident_auto.auto_api_identifier.get().then(|| view! {
                                        <span class="field-settings__auto">{"auto"}</span>
                                    })}
                                </label>
                                <input
                                    type="text"
                                    id="ct-identifier"
                                    prop:value=move || vm_ident.schema.get().api_identifier.clone()
                                    on:input=move |ev| vm_ident_input.set_api_identifier(event_target_value(&ev))
                                    placeholder="touristPlan"
                                />
                            </div>

                            <div class="form-group">
                                <label for="ct-description">{"Описание"}</label>
                                <textarea
                                    id="ct-description"
                                    prop:value=move || vm_descr.schema.get().base.comment.clone().unwrap_or_default()
                                    on:input=move |ev| vm_descr_input.set_description(event_target_value(&ev))
                                    rows="2"
                                />
                            </div>
                        </div>

                        <div class="composer">
                            <ComposerPalette session=vm.session />
                            <ComposerCanvas
                                schema=vm.schema
                                session=vm.session
                                selected=vm.selected_field
                            />
                            <FieldSettings schema=vm.schema selected=vm.selected_field />
                        </div>
                    }
                    .into_any()
                }
            }

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click={
                        let vm = vm_clone.clone();
                        let on_saved = on_saved.clone();
                        move |_| vm.save_command(on_saved.clone())
                    }
                    disabled={
                        let vm = vm_clone.clone();
                        move || !vm.is_form_valid()() || vm.fatal.get().is_some()
                    }
                >
                    {icon("save")}
                    {
                        let vm = vm_clone.clone();
                        move || if vm.edit_mode.get() { "Сохранить" } else { "Создать" }
                    }
                </button>
                <button
                    class="btn btn-secondary"
                    on:click=move |_| (on_cancel)(())
                >
                    {icon("cancel")}
                    {"Отмена"}
                </button>
            </div>
        </div>
    }
}
