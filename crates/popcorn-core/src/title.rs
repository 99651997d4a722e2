use std::sync::{Arc, Mutex, MutexGuard};

pub const DEFAULT_TITLE: &str = "Popcorn Movies";
pub const LOADING_TITLE: &str = "Loading...";

pub fn movie_title(title: &str) -> String {
    format!("Movie | {}", title)
}

type Listener = Arc<dyn Fn(&str) + Send + Sync>;

/// Window title side channel, shared by the search controller and detail viewer.
#[derive(Clone)]
pub struct TitleBar {
    current: Arc<Mutex<String>>,
    listener: Option<Listener>,
}

impl TitleBar {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(DEFAULT_TITLE.to_string())),
            listener: None,
        }
    }

    /// Call `listener` with every new title, e.g. to mirror it to a terminal.
    pub fn with_listener(listener: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            listener: Some(Arc::new(listener)),
            ..Self::new()
        }
    }

    pub fn set(&self, title: &str) {
        {
            let mut current = self.current_mut();
            if *current == title {
                return;
            }
            *current = title.to_string();
        }
        if let Some(listener) = &self.listener {
            listener(title);
        }
    }

    pub fn reset(&self) {
        self.set(DEFAULT_TITLE);
    }

    pub fn get(&self) -> String {
        self.current_mut().clone()
    }

    fn current_mut(&self) -> MutexGuard<'_, String> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for TitleBar {
    fn default() -> Self {
        Self::new()
    }
}
