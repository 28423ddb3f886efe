use crate::shared::api_utils::api_url;
use crate::shared::icons::icon;
use contracts::domain::c001_content_type::aggregate::FieldDefinition;
use contracts::domain::c002_entry::aggregate::{UploadDescriptor, ValueBag};
use leptos::prelude::*;
use serde_json::Value;
use wasm_bindgen::JsCast;

/// Отправить файл внешнему коллаборатору загрузки.
///
/// The control owns only the descriptor contract, not the transport details
/// of the store behind /api/media.
async fn upload(file: web_sys::File) -> Result<UploadDescriptor, String> {
    use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

    let form = FormData::new().map_err(|e| format!("{e:?}"))?;
    form.append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|e| format!("{e:?}"))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let url = api_url("/api/media");
    let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| format!("{e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    let text = wasm_bindgen_futures::JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    let text: String = text.as_string().ok_or_else(|| "bad text".to_string())?;
    let descriptor: UploadDescriptor = serde_json::from_str(&text).map_err(|e| format!("{e}"))?;
    Ok(descriptor)
}

fn current_descriptor(values: RwSignal<ValueBag>, key: &str) -> Option<UploadDescriptor> {
    let value = values.with(|bag| bag.get(key).cloned())?;
    serde_json::from_value(value).ok()
}

/// MEDIA-поле: значение — дескриптор загрузки, не сам файл.
///
/// Ошибка загрузки показывается оператору и не трогает прежнее значение.
#[component]
pub fn MediaControl(field: FieldDefinition, values: RwSignal<ValueBag>) -> impl IntoView {
    let key = field.api_identifier.clone();
    let label = field.label.clone();
    let (error, set_error) = signal::<Option<String>>(None);
    let (is_uploading, set_is_uploading) = signal(false);

    let descriptor = {
        let key = key.clone();
        Signal::derive(move || current_descriptor(values, &key))
    };

    let on_file_picked = {
        let key = key.clone();
        move |ev: leptos::ev::Event| {
            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|list| list.get(0)) else {
                return;
            };
            let key = key.clone();
            set_error.set(None);
            set_is_uploading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match upload(file).await {
                    Ok(descriptor) => {
                        if let Ok(value) = serde_json::to_value(&descriptor) {
                            values.update(|bag| bag.set(key, value));
                        }
                        set_is_uploading.set(false);
                    }
                    Err(e) => {
                        set_error.set(Some(format!("Ошибка загрузки: {}", e)));
                        set_is_uploading.set(false);
                    }
                }
            });
        }
    };

    let clear_key = key.clone();
    let clear = move |_| {
        values.update(|bag| bag.remove(&clear_key));
    };

    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}
            {move || match descriptor.get() {
                Some(d) => view! {
                    <div class="media-field__current">
                        <a href=d.url.clone() target="_blank">{d.file_name.clone()}</a>
                        <span class="media-field__meta">
                            {format!("{} · {} байт", d.content_type, d.size)}
                        </span>
                        <button class="media-field__clear" title="Очистить" on:click=clear.clone()>
                            {icon("x")}
                        </button>
                    </div>
                }
                .into_any(),
                None => view! {
                    <label class="media-field__upload">
                        {icon("upload")}
                        {move || if is_uploading.get() { "Загрузка..." } else { "Выбрать файл" }}
                        <input
                            type="file"
                            style="display: none;"
                            on:change=on_file_picked.clone()
                        />
                    </label>
                }
                .into_any(),
            }}
        </div>
    }
}
