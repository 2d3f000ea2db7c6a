use crate::models::release::UpdateError;
use log::info;
use std::sync::Mutex;

/// Sends the user somewhere else: the hosted app or the releases page.
pub trait Navigator {
    fn navigate(&self, url: &str) -> Result<(), UpdateError>;
}

/// Opens URLs in the default browser.
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) -> Result<(), UpdateError> {
        info!("Opening {}", url);
        open::that(url).map_err(|e| UpdateError::NavigationError(format!("{}: {}", url, e)))
    }
}

/// Prints the target instead of opening it.
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, url: &str) -> Result<(), UpdateError> {
        println!("{}", url);
        Ok(())
    }
}

/// Remembers every URL it was asked to open.
#[derive(Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .map(|visited| visited.clone())
            .unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) -> Result<(), UpdateError> {
        self.visited
            .lock()
            .map_err(|e| UpdateError::NavigationError(e.to_string()))?
            .push(url.to_string());
        Ok(())
    }
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn navigate(&self, url: &str) -> Result<(), UpdateError> {
        (**self).navigate(url)
    }
}

impl<N: Navigator + ?Sized> Navigator for Box<N> {
    fn navigate(&self, url: &str) -> Result<(), UpdateError> {
        (**self).navigate(url)
    }
}
