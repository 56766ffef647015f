/// Общие утилиты экранов-списков: поиск с debounce и привязка контроллера к сигналам
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use view_model::{ListController, ListSnapshot, RemoteSource, SyncError};

use crate::shared::config::config;
use crate::shared::icons::icon;

/// Byte ranges of `text` matching `filter` case-insensitively.
///
/// Matching runs on the lowercased text, but every range is mapped back
/// to whole characters of `text`, so slicing with it never splits a char.
pub fn match_ranges(text: &str, filter: &str) -> Vec<(usize, usize)> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    // lowered text plus, for each of its bytes, the source char it came from
    let mut haystack = String::with_capacity(text.len());
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (start, c) in text.char_indices() {
        let span = (start, start + c.len_utf8());
        for lower in c.to_lowercase() {
            haystack.push(lower);
            origin.extend(std::iter::repeat(span).take(lower.len_utf8()));
        }
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(&needle) {
        let hit = from + pos;
        let range = (origin[hit].0, origin[hit + needle.len() - 1].1);
        match ranges.last_mut() {
            Some(prev) if prev.1 > range.0 => prev.1 = prev.1.max(range.1),
            _ => ranges.push(range),
        }
        from = hit + needle.len();
    }
    ranges
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last = 0;
    for (start, end) in ranges {
        if start > last {
            parts.push(view! { <span>{text[last..start].to_string()}</span> }.into_any());
        }
        parts.push(view! { <mark class="search-hit">{text[start..end].to_string()}</mark> }.into_any());
        last = end;
    }
    if last < text.len() {
        parts.push(view! { <span>{text[last..].to_string()}</span> }.into_any());
    }
    view! { <>{parts}</> }.into_any()
}

/// Number of pages needed for `len` items; never less than one.
pub fn page_count(len: usize, page_size: u32) -> u32 {
    let size = page_size.max(1) as usize;
    len.div_ceil(size).max(1) as u32
}

/// Items of the 1-based `page`. Pages past the end clamp to the last one.
pub fn page_slice<T: Clone>(items: &[T], page: u32, page_size: u32) -> Vec<T> {
    let size = page_size.max(1) as usize;
    let page = page.clamp(1, page_count(items.len(), page_size)) as usize;
    items.iter().skip((page - 1) * size).take(size).cloned().collect()
}

/// Поле поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Callback с итоговым значением после паузы ввода
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let (input_value, set_input_value) = signal(String::new());
    let pending = StoredValue::new_local(None::<Timeout>);
    let delay = config().list.search_debounce_ms;

    let handle_input = move |value: String| {
        set_input_value.set(value.clone());
        // dropping the previous timeout cancels it
        pending.set_value(Some(Timeout::new(delay, move || on_change.run(value))));
    };

    let clear = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            {icon("search")}
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear title="Clear">
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Контроллер списка, привязанный к компоненту.
///
/// Снимки контроллера публикуются в `snapshot`; сам контроллер живёт в
/// локальном хранилище, так как он не `Send`.
pub struct ListHandle<S: RemoteSource + 'static> {
    pub snapshot: RwSignal<ListSnapshot<S::Record>>,
    controller: StoredValue<ListController<S>, LocalStorage>,
}

impl<S: RemoteSource + 'static> Clone for ListHandle<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: RemoteSource + 'static> Copy for ListHandle<S> {}

impl<S> ListHandle<S>
where
    S: RemoteSource + 'static,
    S::Record: Send + Sync + 'static,
{
    /// Runs an operation on the controller in the background. Failures are
    /// already in the snapshot, so they are only logged here.
    pub fn run<F, Fut, R>(&self, op: F)
    where
        F: FnOnce(ListController<S>) -> Fut + 'static,
        Fut: Future<Output = Result<R, SyncError>> + 'static,
        R: 'static,
    {
        let Some(controller) = self.controller.try_get_value() else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = op(controller).await {
                log::debug!("list operation failed: {}", e);
            }
        });
    }

    /// Full loaded collection. Reactive: re-evaluates on every snapshot.
    pub fn records(&self) -> Vec<S::Record> {
        self.snapshot.track();
        self.controller
            .try_with_value(|c| c.records())
            .unwrap_or_default()
    }

    pub fn refresh(&self) {
        self.run(|c| async move { c.refresh().await });
    }

    pub fn retry(&self) {
        self.run(|c| async move { c.retry().await });
    }
}

/// Подписывает сигнал на контроллер и запускает первую загрузку.
pub fn use_list_controller<S>(controller: ListController<S>) -> ListHandle<S>
where
    S: RemoteSource + 'static,
    S::Record: Send + Sync + 'static,
{
    let snapshot = RwSignal::new(controller.snapshot());
    controller.subscribe(move |snap| {
        // the component may be gone by the time a response arrives
        let _ = snapshot.try_set(snap.clone());
    });
    let handle = ListHandle {
        snapshot,
        controller: StoredValue::new_local(controller),
    };
    handle.run(|c| async move { c.mount().await });
    handle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits<'a>(text: &'a str, filter: &str) -> Vec<&'a str> {
        match_ranges(text, filter)
            .into_iter()
            .map(|(start, end)| &text[start..end])
            .collect()
    }

    #[test]
    fn test_match_ranges_ascii() {
        assert_eq!(match_ranges("Sarah Davis", "SAR"), vec![(0, 3)]);
        assert_eq!(hits("banana", "an"), vec!["an", "an"]);
        assert_eq!(hits("Sarah Davis", "  davis "), vec!["Davis"]);
        assert!(match_ranges("Sarah Davis", "").is_empty());
        assert!(match_ranges("Sarah Davis", "zzz").is_empty());
    }

    #[test]
    fn test_match_ranges_keep_char_boundaries() {
        // same total byte length after lowercasing, shifted offsets inside
        let text = "\u{1E9E}\u{023A}";
        assert_eq!(text.len(), text.to_lowercase().len());
        assert_eq!(match_ranges(text, "\u{2C65}"), vec![(3, 5)]);
        assert_eq!(hits(text, "\u{023A}"), vec!["\u{023A}"]);
        assert_eq!(hits(text, "\u{DF}"), vec!["\u{1E9E}"]);
    }

    #[test]
    fn test_match_ranges_expanding_lowercase() {
        // 'İ' lowercases to two chars
        assert_eq!(hits("İstanbul", "i"), vec!["İ"]);
        assert_eq!(hits("İstanbul", "stan"), vec!["stan"]);
        assert_eq!(hits("Straße", "SSE"), Vec::<&str>::new());
        assert_eq!(hits("Straße", "ße"), vec!["ße"]);
    }

    #[test]
    fn test_page_slice() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(page_count(items.len(), 3), 3);
        assert_eq!(page_count(0, 3), 1);
        assert_eq!(page_slice(&items, 1, 3), vec![1, 2, 3]);
        assert_eq!(page_slice(&items, 3, 3), vec![7]);
        assert_eq!(page_slice(&items, 9, 3), vec![7]);
        assert_eq!(page_slice(&items, 0, 3), vec![1, 2, 3]);
        assert!(page_slice::<u32>(&[], 1, 3).is_empty());
    }
}
