//! Terminal rendering of page effects

use catchy_cli::output::{format_count, Status};
use catchy_cli::prompt;
use catchy_storefront::endpoints::NewProduct;
use catchy_storefront::{Page, Severity};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Prints banners as status lines and navigations as notes
///
/// The product form is whatever the command line supplied.
pub struct TerminalPage {
    assume_yes: bool,
    form: Mutex<NewProduct>,
}

impl TerminalPage {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            form: Mutex::new(NewProduct::default()),
        }
    }

    #[must_use]
    pub fn with_product_form(self, product: NewProduct) -> Self {
        *self.form.lock().unwrap_or_else(PoisonError::into_inner) = product;
        self
    }
}

impl Page for TerminalPage {
    fn show_message(&self, text: &str, severity: Severity) {
        match severity {
            Severity::Success => Status::success(text),
            Severity::Error => Status::error(text),
        }
    }

    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        prompt::confirm(question).unwrap_or_else(|e| {
            warn!(error = %e, "Could not read confirmation");
            false
        })
    }

    fn navigate(&self, path: &str) {
        Status::note(&format!("open {path}"));
    }

    fn reload(&self) {
        Status::note("reload");
    }

    fn set_cart_count(&self, count: usize) {
        Status::info(&format!("Cart: {}", format_count(count, "item", "items")));
    }

    fn read_product_form(&self) -> NewProduct {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn reset_product_form(&self) {
        *self.form.lock().unwrap_or_else(PoisonError::into_inner) = NewProduct::default();
    }
}
