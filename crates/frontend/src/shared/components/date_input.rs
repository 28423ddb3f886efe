use leptos::prelude::*;

/// DateInput component with native date picker.
///
/// The wire value is always yyyy-mm-dd (ISO-8601); the browser renders it in
/// locale format. Coercion to the picker's native representation happens here
/// and nowhere else.
#[component]
pub fn DateInput(
    /// The date value in yyyy-mm-dd format
    #[prop(into)]
    value: Signal<String>,
    /// Callback when the date changes (receives yyyy-mm-dd format)
    on_change: impl Fn(String) + 'static,
    #[prop(optional)] style: Option<String>,
) -> impl IntoView {
    let default_style = "padding: 6px 8px; border: 1px solid #ced4da; border-radius: 4px; font-size: 0.875rem; background: #fff; width: 140px;";
    let final_style = style.unwrap_or_else(|| default_style.to_string());

    view! {
        <input
            type="date"
            prop:value=value
            on:input=move |ev| {
                on_change(event_target_value(&ev));
            }
            style=final_style
        />
    }
}

/// Проверка границы: значение из БД должно быть валидным ISO-8601,
/// иначе пикер получает пустую строку
pub fn coerce_iso_date(raw: &str) -> String {
    match chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_iso_date_passes_through() {
        assert_eq!(coerce_iso_date("2026-02-14"), "2026-02-14");
    }

    #[test]
    fn test_garbage_becomes_empty() {
        assert_eq!(coerce_iso_date("14.02.2026"), "");
        assert_eq!(coerce_iso_date(""), "");
    }
}
