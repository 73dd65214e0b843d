use crate::catalog::{CatalogClient, CategorySummary, FetchError, Product, ProductField};
use crate::keybindings::KeybindingRegistry;
use crate::store::{CatalogStore, CategoryOption, EditState};
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::borrow::Cow;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Rows moved by PageUp/PageDown before the first frame reports a height.
const DEFAULT_PAGE_SIZE: usize = 10;

// ============================================================================
// Mode and Form State
// ============================================================================

/// What the header/table area is doing with key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the product table.
    Browse,
    /// Typing into the search box; every keystroke refilters.
    Search,
    /// Category dropdown open with the highlighted option index.
    Dropdown { selected: usize },
}

/// Text inputs of the update modal.
///
/// The inputs hold exactly what the user typed; the store's draft holds the
/// parsed values. They differ only while the price input is not a number.
#[derive(Debug, Clone)]
pub struct EditForm {
    pub focused: ProductField,
    inputs: [String; 4],
    /// Inline hint shown under the price input.
    pub field_error: Option<String>,
}

impl EditForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            focused: ProductField::Title,
            inputs: ProductField::ALL.map(|field| product.field_text(field)),
            field_error: None,
        }
    }

    pub fn input(&self, field: ProductField) -> &str {
        &self.inputs[field.index()]
    }

    fn focused_input_mut(&mut self) -> &mut String {
        &mut self.inputs[self.focused.index()]
    }
}

// ============================================================================
// Event Types
// ============================================================================

/// Events from background tasks.
///
/// Fetch results carry the mount generation that spawned them so that a
/// reload can discard anything still in flight from the previous mount.
#[derive(Debug)]
pub enum AppEvent {
    ProductsLoaded {
        generation: u64,
        result: Result<Vec<Product>, FetchError>,
    },
    CategoriesLoaded {
        generation: u64,
        result: Result<Vec<CategorySummary>, FetchError>,
    },
}

// ============================================================================
// App State
// ============================================================================

pub struct App {
    pub store: CatalogStore,
    pub client: CatalogClient,

    /// Category requested from `/products/category/{name}` on every mount.
    pub category_source: String,

    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,
    pub keybindings: KeybindingRegistry,

    pub mode: Mode,
    /// Index into `store.filtered_products()`.
    pub selected_row: usize,
    /// Rows visible in the table, updated on every frame.
    pub page_size: usize,

    /// Present while the update modal is open.
    pub edit_form: Option<EditForm>,
    /// Blocking warning; captures all input until dismissed.
    pub warning: Option<String>,

    pub show_help: bool,
    pub help_scroll_offset: usize,

    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,

    /// Incremented on every mount. Fetch results tagged with an older
    /// generation are dropped by the event handler.
    pub mount_generation: u64,
    pub products_loading: bool,
    pub categories_loading: bool,
    pub spinner_frame: usize,

    products_handle: Option<JoinHandle<()>>,
    categories_handle: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(client: CatalogClient, category_source: impl Into<String>) -> Self {
        Self {
            store: CatalogStore::new(),
            client,
            category_source: category_source.into(),
            theme_variant: ThemeVariant::Dark,
            theme: StyleMap::from_palette(&ThemeVariant::Dark.palette()),
            keybindings: KeybindingRegistry::new(),
            mode: Mode::Browse,
            selected_row: 0,
            page_size: DEFAULT_PAGE_SIZE,
            edit_form: None,
            warning: None,
            show_help: false,
            help_scroll_offset: 0,
            status_message: None,
            needs_redraw: true,
            mount_generation: 0,
            products_loading: false,
            categories_loading: false,
            spinner_frame: 0,
            products_handle: None,
            categories_handle: None,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant. Returns its name for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    // ------------------------------------------------------------------
    // Mount lifecycle
    // ------------------------------------------------------------------

    /// Start a mount: spawn both catalog fetches under a new generation.
    ///
    /// The two requests are independent and may complete in either order.
    pub fn mount(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        self.abort_fetches();
        self.mount_generation = self.mount_generation.wrapping_add(1);
        let generation = self.mount_generation;
        self.products_loading = true;
        self.categories_loading = true;

        tracing::debug!(generation, base = %self.client.base_url(), "Mounting catalog view");

        let client = self.client.clone();
        let tx = event_tx.clone();
        self.products_handle = Some(tokio::spawn(async move {
            let result = client.fetch_all_products().await;
            if let Err(e) = tx.send(AppEvent::ProductsLoaded { generation, result }).await {
                tracing::warn!(error = %e, "Failed to send products (receiver dropped)");
            }
        }));

        let client = self.client.clone();
        let tx = event_tx.clone();
        let category = self.category_source.clone();
        self.categories_handle = Some(tokio::spawn(async move {
            let result = client.fetch_category(&category).await;
            if let Err(e) = tx.send(AppEvent::CategoriesLoaded { generation, result }).await {
                tracing::warn!(error = %e, "Failed to send categories (receiver dropped)");
            }
        }));
    }

    /// Tear down all catalog state and mount again.
    ///
    /// Local edits and deletions are lost, exactly as on a fresh start.
    pub fn reload(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        self.store.reset();
        self.mode = Mode::Browse;
        self.selected_row = 0;
        self.edit_form = None;
        self.warning = None;
        self.mount(event_tx);
    }

    fn abort_fetches(&mut self) {
        for handle in [self.products_handle.take(), self.categories_handle.take()]
            .into_iter()
            .flatten()
        {
            handle.abort();
        }
    }

    pub fn is_loading(&self) -> bool {
        self.products_loading || self.categories_loading
    }

    // ------------------------------------------------------------------
    // Table navigation
    // ------------------------------------------------------------------

    pub fn selected_product(&self) -> Option<&Product> {
        self.store.filtered_products().get(self.selected_row)
    }

    /// Keep `selected_row` inside the visible subset.
    pub fn clamp_selection(&mut self) {
        let len = self.store.filtered_products().len();
        self.selected_row = self.selected_row.min(len.saturating_sub(1));
    }

    pub fn nav_down(&mut self, rows: usize) {
        self.selected_row = self.selected_row.saturating_add(rows);
        self.clamp_selection();
    }

    pub fn nav_up(&mut self, rows: usize) {
        self.selected_row = self.selected_row.saturating_sub(rows);
    }

    // ------------------------------------------------------------------
    // Search and category filter
    // ------------------------------------------------------------------

    pub fn enter_search(&mut self) {
        self.mode = Mode::Search;
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut term = self.store.search_term().to_string();
        term.push(c);
        self.apply_search(term);
    }

    pub fn pop_search_char(&mut self) {
        let mut term = self.store.search_term().to_string();
        if term.pop().is_some() {
            self.apply_search(term);
        }
    }

    /// Leave search mode. `keep` decides whether the term stays applied.
    pub fn exit_search(&mut self, keep: bool) {
        self.mode = Mode::Browse;
        if !keep {
            self.apply_search(String::new());
        }
    }

    fn apply_search(&mut self, term: String) {
        self.store.set_search_term(term);
        self.selected_row = 0;
    }

    /// Open the category dropdown with the active filter highlighted.
    pub fn open_dropdown(&mut self) {
        let filter = self.store.category_filter();
        let selected = self
            .store
            .category_options()
            .iter()
            .position(|o| o.value == filter)
            .unwrap_or(0);
        self.mode = Mode::Dropdown { selected };
    }

    pub fn dropdown_options(&self) -> Vec<CategoryOption> {
        self.store.category_options()
    }

    pub fn move_dropdown(&mut self, down: bool) {
        if let Mode::Dropdown { selected } = self.mode {
            let last = self.dropdown_options().len().saturating_sub(1);
            let selected = if down {
                (selected + 1).min(last)
            } else {
                selected.saturating_sub(1)
            };
            self.mode = Mode::Dropdown { selected };
        }
    }

    /// Apply the highlighted dropdown option and close the dropdown.
    pub fn choose_dropdown(&mut self) {
        if let Mode::Dropdown { selected } = self.mode {
            if let Some(option) = self.dropdown_options().into_iter().nth(selected) {
                self.store.set_category_filter(option.value);
                self.selected_row = 0;
            }
        }
        self.mode = Mode::Browse;
    }

    /// Clear both filters at once.
    pub fn clear_filters(&mut self) {
        self.store.set_search_term("");
        self.store.set_category_filter("");
        self.clamp_selection();
    }

    // ------------------------------------------------------------------
    // Row actions: view, update, delete
    // ------------------------------------------------------------------

    pub fn view_selected(&mut self) {
        if let Some(product) = self.selected_product().cloned() {
            self.store.select_for_view(&product);
        }
    }

    pub fn close_view(&mut self) {
        self.store.close_view();
    }

    /// Open the update modal for `product`.
    pub fn begin_edit(&mut self, product: &Product) {
        self.store.begin_edit(product);
        self.edit_form = Some(EditForm::from_product(product));
    }

    /// Open the update modal for the open detail view, or else the table row.
    pub fn edit_current(&mut self) {
        let product = self
            .store
            .selected_product()
            .or_else(|| self.selected_product())
            .cloned();
        if let Some(product) = product {
            self.begin_edit(&product);
        }
    }

    pub fn focus_next_field(&mut self) {
        if let Some(form) = self.edit_form.as_mut() {
            form.focused = form.focused.next();
        }
    }

    pub fn focus_prev_field(&mut self) {
        if let Some(form) = self.edit_form.as_mut() {
            form.focused = form.focused.prev();
        }
    }

    pub fn push_form_char(&mut self, c: char) {
        self.edit_focused_input(|input| input.push(c));
    }

    pub fn pop_form_char(&mut self) {
        self.edit_focused_input(|input| {
            input.pop();
        });
    }

    /// Apply `edit` to the focused input and push the result into the draft.
    fn edit_focused_input(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(form) = self.edit_form.as_mut() else {
            return;
        };
        edit(form.focused_input_mut());
        let field = form.focused;

        match self.store.update_draft_field(field, form.input(field)) {
            Ok(()) => {
                if field == ProductField::Price {
                    form.field_error = None;
                }
            }
            Err(e) => form.field_error = Some(e.to_string()),
        }
    }

    /// Commit the update modal.
    ///
    /// An invalid price blocks submission with a warning and keeps the form
    /// open; a missing draft surfaces the store's warning.
    pub fn submit_edit_form(&mut self) {
        if let Some(error) = self.edit_form.as_ref().and_then(|f| f.field_error.clone()) {
            self.warning = Some(error);
            return;
        }

        let id = self.store.editing_product().map(|p| p.id);
        match self.store.submit_update() {
            Ok(()) => {
                self.edit_form = None;
                self.clamp_selection();
                if let Some(id) = id {
                    self.set_status(format!("Updated product {} (local only)", id));
                }
            }
            Err(warning) => {
                self.edit_form = None;
                self.warning = Some(warning.to_string());
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.store.cancel_edit();
        self.edit_form = None;
    }

    pub fn is_editing(&self) -> bool {
        self.store.edit_state() == EditState::Editing || self.edit_form.is_some()
    }

    /// Delete the product shown in the detail view, or else the table row.
    pub fn delete_current(&mut self) {
        let id = self
            .store
            .selected_product()
            .or_else(|| self.selected_product())
            .map(|p| p.id);
        if let Some(id) = id {
            if self.store.delete_product(id) {
                self.set_status(format!("Deleted product {} (local only)", id));
            }
            self.clamp_selection();
        }
    }

    pub fn dismiss_warning(&mut self) {
        self.warning = None;
    }

    // ------------------------------------------------------------------
    // Status bar
    // ------------------------------------------------------------------

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

/// Abort in-flight fetches so no task outlives the view it would populate.
impl Drop for App {
    fn drop(&mut self) {
        self.abort_fetches();
        tracing::debug!("Aborted catalog fetches on App drop");
    }
}
