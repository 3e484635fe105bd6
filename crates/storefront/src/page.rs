//! Page seam and banner rendering
//!
//! Actions never touch a display directly. They talk to a [`Page`]: the
//! browser document in the web app, a terminal in the CLI, and
//! [`MemoryPage`] for headless use and tests.

use crate::config::ClientConfig;
use crate::endpoints::NewProduct;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::trace;

/// Default time a banner stays on screen
pub const BANNER_DURATION: Duration = Duration::from_millis(3000);

/// Banner severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The action went through
    Success,
    /// The action failed
    Error,
}

impl Severity {
    /// Lowercase tag used in CSS classes
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient outcome message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    /// Text shown to the user
    pub text: String,
    /// Success or error styling
    pub severity: Severity,
}

impl Banner {
    /// Build a banner
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    /// Class attribute of the rendered element
    #[must_use]
    pub fn css_class(&self) -> String {
        format!("message message-{}", self.severity)
    }
}

/// Where actions render their effects
///
/// Implementations must be safe to share between concurrently running
/// actions; no ordering between them is promised.
pub trait Page: Send + Sync {
    /// Show a transient banner above everything else
    fn show_message(&self, text: &str, severity: Severity);

    /// Ask the user to confirm; `false` cancels the action
    ///
    /// Called synchronously from inside the running action, so an
    /// implementation that waits for input blocks the executor thread until
    /// it is answered. Interactive pages should only be driven one action at
    /// a time.
    fn confirm(&self, question: &str) -> bool;

    /// Leave the current page for `path`
    fn navigate(&self, path: &str);

    /// Reload the current page
    fn reload(&self);

    /// Write the cart counter: text is the count, hidden when zero
    fn set_cart_count(&self, count: usize);

    /// Current contents of the product form
    fn read_product_form(&self) -> NewProduct;

    /// Clear the product form
    fn reset_product_form(&self);
}

/// Stack of visible banners, newest first
///
/// Each banner removes itself after the display duration. Expiry needs a
/// tokio runtime; without one banners stay until cleared.
#[derive(Clone)]
pub struct BannerStack {
    banners: Arc<Mutex<Vec<(u64, Banner)>>>,
    next_id: Arc<AtomicU64>,
    display: Duration,
}

impl BannerStack {
    /// Stack whose banners last `display`
    #[must_use]
    pub fn new(display: Duration) -> Self {
        Self {
            banners: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
            display,
        }
    }

    /// Insert a banner at the top and schedule its removal
    pub fn push(&self, banner: Banner) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.banners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, (id, banner));

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let banners = Arc::clone(&self.banners);
            let display = self.display;
            handle.spawn(async move {
                tokio::time::sleep(display).await;
                banners
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .retain(|(banner_id, _)| *banner_id != id);
                trace!(banner_id = id, "Banner expired");
            });
        }
    }

    /// Banners currently on screen, top first
    #[must_use]
    pub fn visible(&self) -> Vec<Banner> {
        self.banners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, banner)| banner.clone())
            .collect()
    }

    /// Remove every banner
    pub fn clear(&self) {
        self.banners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for BannerStack {
    fn default() -> Self {
        Self::new(BANNER_DURATION)
    }
}

/// Cart counter element state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartCounter {
    /// Text content
    pub text: String,
    /// Whether the element is displayed
    pub visible: bool,
}

impl CartCounter {
    /// Counter showing `count`
    #[must_use]
    pub fn showing(count: usize) -> Self {
        Self {
            text: count.to_string(),
            visible: count > 0,
        }
    }
}

/// Everything that happened on a [`MemoryPage`], in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A banner was shown
    Message(Banner),
    /// The user was asked a question
    Confirm(String),
    /// Navigation to a path
    Navigate(String),
    /// Full reload
    Reload,
    /// Cart counter written
    CartCount(usize),
    /// Product form cleared
    FormReset,
}

/// Headless page
///
/// Keeps banners in a [`BannerStack`], records every effect, and answers
/// confirmations with a preset answer (yes by default).
pub struct MemoryPage {
    banners: BannerStack,
    events: Mutex<Vec<PageEvent>>,
    counter: Mutex<CartCounter>,
    form: Mutex<NewProduct>,
    confirm_answer: AtomicBool,
}

impl MemoryPage {
    /// Page that accepts every confirmation
    #[must_use]
    pub fn new() -> Self {
        Self::with_banner_duration(BANNER_DURATION)
    }

    /// Page whose banners last the configured `banner_duration`
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_banner_duration(config.banner_duration)
    }

    /// Page whose banners last `display`
    #[must_use]
    pub fn with_banner_duration(display: Duration) -> Self {
        Self {
            banners: BannerStack::new(display),
            events: Mutex::new(Vec::new()),
            counter: Mutex::new(CartCounter::default()),
            form: Mutex::new(NewProduct::default()),
            confirm_answer: AtomicBool::new(true),
        }
    }

    /// Answer future confirmations with `answer`
    pub fn answer_confirmations(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::Relaxed);
    }

    /// Fill the product form
    pub fn fill_product_form(&self, product: NewProduct) {
        *self.form.lock().unwrap_or_else(PoisonError::into_inner) = product;
    }

    /// Banners currently visible, top first
    #[must_use]
    pub fn banners(&self) -> Vec<Banner> {
        self.banners.visible()
    }

    /// Every recorded effect
    #[must_use]
    pub fn events(&self) -> Vec<PageEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Paths navigated to
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PageEvent::Navigate(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    /// Number of reloads
    #[must_use]
    pub fn reloads(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, PageEvent::Reload))
            .count()
    }

    /// Cart counter state
    #[must_use]
    pub fn cart_counter(&self) -> CartCounter {
        self.counter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current product form contents
    #[must_use]
    pub fn product_form(&self) -> NewProduct {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, event: PageEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for MemoryPage {
    fn show_message(&self, text: &str, severity: Severity) {
        let banner = Banner::new(text, severity);
        self.banners.push(banner.clone());
        self.record(PageEvent::Message(banner));
    }

    fn confirm(&self, question: &str) -> bool {
        self.record(PageEvent::Confirm(question.to_string()));
        self.confirm_answer.load(Ordering::Relaxed)
    }

    fn navigate(&self, path: &str) {
        self.record(PageEvent::Navigate(path.to_string()));
    }

    fn reload(&self) {
        self.record(PageEvent::Reload);
    }

    fn set_cart_count(&self, count: usize) {
        *self.counter.lock().unwrap_or_else(PoisonError::into_inner) = CartCounter::showing(count);
        self.record(PageEvent::CartCount(count));
    }

    fn read_product_form(&self) -> NewProduct {
        self.product_form()
    }

    fn reset_product_form(&self) {
        *self.form.lock().unwrap_or_else(PoisonError::into_inner) = NewProduct::default();
        self.record(PageEvent::FormReset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_class() {
        assert_eq!(Banner::new("ok", Severity::Success).css_class(), "message message-success");
        assert_eq!(Banner::new("no", Severity::Error).css_class(), "message message-error");
    }

    #[test]
    fn test_cart_counter_visibility() {
        assert_eq!(
            CartCounter::showing(0),
            CartCounter {
                text: "0".to_string(),
                visible: false
            }
        );
        assert_eq!(
            CartCounter::showing(3),
            CartCounter {
                text: "3".to_string(),
                visible: true
            }
        );
    }

    #[test]
    fn test_banners_stack_newest_first_without_runtime() {
        let stack = BannerStack::default();
        stack.push(Banner::new("first", Severity::Success));
        stack.push(Banner::new("second", Severity::Error));

        let texts: Vec<_> = stack.visible().into_iter().map(|b| b.text).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_banner_expires_after_display_duration() {
        let stack = BannerStack::default();
        stack.push(Banner::new("Product added to cart!", Severity::Success));

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert_eq!(stack.visible().len(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(stack.visible().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_banners_expire_independently() {
        let stack = BannerStack::default();
        stack.push(Banner::new("older", Severity::Success));
        tokio::time::sleep(Duration::from_millis(1000)).await;
        stack.push(Banner::new("newer", Severity::Error));

        tokio::time::sleep(Duration::from_millis(2500)).await;
        let texts: Vec<_> = stack.visible().into_iter().map(|b| b.text).collect();
        assert_eq!(texts, vec!["newer"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_banner_duration_from_config() {
        let config = ClientConfig::development().with_banner_duration(Duration::from_millis(500));
        let page = MemoryPage::from_config(&config);
        page.show_message("Item removed from cart", Severity::Success);

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(page.banners().len(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(page.banners().is_empty());
        assert_eq!(page.events().len(), 1);
    }

    #[test]
    fn test_memory_page_records_effects() {
        let page = MemoryPage::new();
        page.answer_confirmations(false);

        assert!(!page.confirm("Sure?"));
        page.set_cart_count(2);
        page.navigate("/login");

        assert_eq!(
            page.events(),
            vec![
                PageEvent::Confirm("Sure?".to_string()),
                PageEvent::CartCount(2),
                PageEvent::Navigate("/login".to_string()),
            ]
        );
        assert!(page.cart_counter().visible);
    }

    #[test]
    fn test_memory_page_form_reset() {
        let page = MemoryPage::new();
        page.fill_product_form(NewProduct {
            name: "Mug".to_string(),
            ..NewProduct::default()
        });
        assert_eq!(page.read_product_form().name, "Mug");

        page.reset_product_form();
        assert_eq!(page.read_product_form(), NewProduct::default());
    }
}
