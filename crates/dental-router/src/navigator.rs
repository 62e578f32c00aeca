//! Client-side navigation.
//!
//! The [`Navigator`] owns the current [`View`] and a history backend. Every
//! navigation writes the view's URL to history, re-derives the view from that
//! URL and then calls each registered listener with the result.

use crate::url::{split_url, url_to_view, view_to_url};
use crate::view::View;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// A stack of visited URLs.
pub trait HistoryBackend: Send + Sync {
    /// Current URL (path plus optional query).
    fn current(&self) -> String;
    /// Add an entry, discarding any forward entries.
    fn push(&mut self, url: &str);
    /// Overwrite the current entry.
    fn replace(&mut self, url: &str);
    /// Step back. Returns the new current URL, or `None` at the start.
    fn back(&mut self) -> Option<String>;
    /// Step forward. Returns the new current URL, or `None` at the end.
    fn forward(&mut self) -> Option<String>;
    /// Number of entries.
    fn len(&self) -> usize;
}

/// In-memory history, used for server rendering, the CLI and tests.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl HistoryBackend for MemoryHistory {
    fn current(&self) -> String {
        self.entries[self.index].clone()
    }

    fn push(&mut self, url: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url.to_string());
        self.index = self.entries.len() - 1;
    }

    fn replace(&mut self, url: &str) {
        self.entries[self.index] = url.to_string();
    }

    fn back(&mut self) -> Option<String> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    fn forward(&mut self) -> Option<String> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

type Listener = Arc<dyn Fn(&View) + Send + Sync>;

/// Handle returned by [`Navigator::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

struct State<H> {
    history: H,
    current: View,
    listeners: Vec<(u64, Listener)>,
}

/// Shared navigation state. Clones refer to the same history and listeners.
pub struct Navigator<H: HistoryBackend = MemoryHistory> {
    state: Arc<RwLock<State<H>>>,
    next_id: Arc<AtomicU64>,
}

impl<H: HistoryBackend> Clone for Navigator<H> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl Navigator<MemoryHistory> {
    /// Navigator over in-memory history starting at `url`.
    pub fn in_memory(url: &str) -> Self {
        Self::new(MemoryHistory::new(url))
    }
}

impl<H: HistoryBackend> Navigator<H> {
    pub fn new(history: H) -> Self {
        let current = {
            let url = history.current();
            let (path, query) = split_url(&url);
            url_to_view(path, query)
        };
        Self {
            state: Arc::new(RwLock::new(State {
                history,
                current,
                listeners: Vec::new(),
            })),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// The view currently shown.
    pub fn current_view(&self) -> View {
        match self.state.read() {
            Ok(state) => state.current.clone(),
            Err(poisoned) => poisoned.into_inner().current.clone(),
        }
    }

    /// The URL currently in history.
    pub fn current_url(&self) -> String {
        match self.state.read() {
            Ok(state) => state.history.current(),
            Err(poisoned) => poisoned.into_inner().history.current(),
        }
    }

    pub fn history_len(&self) -> usize {
        match self.state.read() {
            Ok(state) => state.history.len(),
            Err(poisoned) => poisoned.into_inner().history.len(),
        }
    }

    /// Register a listener called after every navigation.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&View) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.with_state(|state| state.listeners.push((id, Arc::new(listener))));
        Subscription(id)
    }

    /// Remove a listener. Returns false if it was already removed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.with_state(|state| {
            let before = state.listeners.len();
            state.listeners.retain(|(id, _)| *id != subscription.0);
            state.listeners.len() != before
        })
    }

    /// Write the view's URL to history and notify listeners.
    ///
    /// The stored view is re-derived from the URL, so listeners see exactly
    /// what a reload of that URL would show.
    pub fn navigate_to_view(&self, view: &View, replace: bool) -> View {
        let url = view_to_url(view);
        tracing::debug!(kind = view.kind(), url = %url, replace, "Navigating");
        self.with_state(|state| {
            if replace {
                state.history.replace(&url);
            } else {
                state.history.push(&url);
            }
        });
        let (path, query) = split_url(&url);
        self.sync_from_location(path, query)
    }

    /// Re-derive the view from a location changed outside the navigator,
    /// such as the browser's back button, and notify listeners.
    pub fn sync_from_location(&self, path: &str, query: &str) -> View {
        let view = url_to_view(path, query);
        let listeners = self.with_state(|state| {
            state.current = view.clone();
            state
                .listeners
                .iter()
                .map(|(_, l)| Arc::clone(l))
                .collect::<Vec<_>>()
        });
        // Called outside the lock so listeners may navigate again.
        for listener in listeners {
            listener(&view);
        }
        view
    }

    /// Step back in history. Returns the restored view, or `None` at the start.
    pub fn back(&self) -> Option<View> {
        let url = self.with_state(|state| state.history.back())?;
        let (path, query) = split_url(&url);
        Some(self.sync_from_location(path, query))
    }

    /// Step forward in history.
    pub fn forward(&self) -> Option<View> {
        let url = self.with_state(|state| state.history.forward())?;
        let (path, query) = split_url(&url);
        Some(self.sync_from_location(path, query))
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State<H>) -> R) -> R {
        match self.state.write() {
            Ok(mut state) => f(&mut state),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder(nav: &Navigator) -> Arc<Mutex<Vec<View>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        nav.subscribe(move |view| sink.lock().unwrap().push(view.clone()));
        seen
    }

    #[test]
    fn test_initial_view_from_url() {
        let nav = Navigator::in_memory("/category/equipment/dental-chairs");
        assert_eq!(
            nav.current_view(),
            View::product_list("Dental Chairs", Some("Equipment"))
        );
    }

    #[test]
    fn test_listener_fires_once_per_navigation() {
        let nav = Navigator::in_memory("/");
        let seen = recorder(&nav);

        nav.navigate_to_view(&View::Promotions, false);
        nav.navigate_to_view(&View::product("DC-1"), false);

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![View::Promotions, View::product("DC-1")]);
        assert_eq!(nav.history_len(), 3);
    }

    #[test]
    fn test_listener_receives_rederived_view() {
        let nav = Navigator::in_memory("/");
        let seen = recorder(&nav);

        // lower-case names come back in canonical form
        nav.navigate_to_view(&View::product_list("dental chairs", Some("equipment")), false);

        assert_eq!(
            seen.lock().unwrap()[0],
            View::product_list("Dental Chairs", Some("Equipment"))
        );
    }

    #[test]
    fn test_replace_does_not_grow_history() {
        let nav = Navigator::in_memory("/");
        nav.navigate_to_view(&View::search("gloves"), false);
        nav.navigate_to_view(&View::search("masks"), true);

        assert_eq!(nav.history_len(), 2);
        assert_eq!(nav.current_url(), "/search?q=masks");
    }

    #[test]
    fn test_back_and_forward() {
        let nav = Navigator::in_memory("/");
        nav.navigate_to_view(&View::Blog, false);
        nav.navigate_to_view(&View::blog_post("post-1"), false);

        let seen = recorder(&nav);
        assert_eq!(nav.back(), Some(View::Blog));
        assert_eq!(nav.back(), Some(View::Home));
        assert_eq!(nav.back(), None);
        assert_eq!(nav.forward(), Some(View::Blog));
        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let nav = Navigator::in_memory("/");
        nav.navigate_to_view(&View::Blog, false);
        nav.back();
        nav.navigate_to_view(&View::Contact, false);

        assert_eq!(nav.history_len(), 2);
        assert_eq!(nav.forward(), None);
    }

    #[test]
    fn test_unsubscribe() {
        let nav = Navigator::in_memory("/");
        let count = Arc::new(AtomicU64::new(0));
        let c = Arc::clone(&count);
        let sub = nav.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        nav.navigate_to_view(&View::Blog, false);
        assert!(nav.unsubscribe(sub));
        assert!(!nav.unsubscribe(sub));
        nav.navigate_to_view(&View::Contact, false);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_sync_from_location() {
        let nav = Navigator::in_memory("/");
        let seen = recorder(&nav);
        let view = nav.sync_from_location("/cart", "canceled=true");
        assert_eq!(view.kind(), "cart");
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let nav = Navigator::in_memory("/");
        let other = nav.clone();
        other.navigate_to_view(&View::Account, false);
        assert_eq!(nav.current_view(), View::Account);
    }
}
