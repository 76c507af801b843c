//! Main application window and navigation structure.
//!
//! This module implements the `KienyejiApplication` which serves as the
//! main entry point for the Libadwaita-based user interface. The window
//! starts on the loader splash and crossfades to the catalog once the boot
//! delay has elapsed.

use std::{cell::RefCell, path::Path, rc::Rc, sync::Arc, time::Duration};

use {
    libadwaita::{
        Application, ApplicationWindow, ToolbarView,
        glib::{JoinHandle, MainContext, Propagation},
        gtk::{
            Box as GtkBox, Orientation::Vertical, PolicyType::Never as PolicyNever,
            ScrolledWindow, Stack, StackTransitionType::Crossfade,
        },
        prelude::{
            AdjustmentExt, AdwApplicationWindowExt, ApplicationExt, ApplicationExtManual, BoxExt,
            GtkApplicationExt, GtkWindowExt,
        },
    },
    tracing::{debug, info},
};

use crate::{
    catalog::Catalog,
    config::{SettingsManager, get_config_path},
    error::{ErrorReporter, ResultExt, StartupError},
    state::{AppState, AppStateEvent, BootSession, PageSelection, ScrollStyleController},
    ui::{
        header_bar::HeaderBar,
        loader_view::LoaderView,
        style::{AdwaitaThemeSink, NavbarStyler, install_app_stylesheet},
        utils::SignalGuard,
        views::CatalogPageView,
    },
};

/// Application identifier.
pub const APPLICATION_ID: &str = "ke.d4kienyeji.Kienyeji";

/// Stack child holding the splash.
const LOADER_CHILD: &str = "loader";

/// Stack child holding the catalog.
const MAIN_CHILD: &str = "main";

/// Main application class with window management.
///
/// The `KienyejiApplication` owns the shared state and the catalog data and
/// builds the window when the application is activated.
pub struct KienyejiApplication {
    /// The main application instance.
    pub app: Application,
    /// Application state manager.
    pub app_state: Arc<AppState>,
    /// Catalog data shown by the pages.
    pub catalog: Arc<Catalog>,
    /// User settings manager.
    pub settings: SettingsManager,
}

impl KienyejiApplication {
    /// Creates a new application instance.
    ///
    /// A broken settings file is reported and replaced by the defaults.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `KienyejiApplication` or an error.
    ///
    /// # Errors
    ///
    /// Returns `StartupError::CatalogError` if the embedded catalog is unusable.
    pub fn new() -> Result<Self, StartupError> {
        let settings = SettingsManager::load_or_default(get_config_path());

        let (theme, timings, catalog_path) = {
            let current = settings.get_settings();
            (current.theme, current.timings(), current.catalog_path.clone())
        };

        let catalog = Catalog::load(catalog_path.as_deref().map(Path::new))?;

        let app_state = AppState::new(theme, Arc::new(AdwaitaThemeSink), timings);

        let app = Application::builder()
            .application_id(APPLICATION_ID)
            .build();

        info!(
            config = ?settings.get_config_path(),
            theme = %theme,
            "Application initialized"
        );

        Ok(KienyejiApplication {
            app,
            app_state: Arc::new(app_state),
            catalog: Arc::new(catalog),
            settings,
        })
    }

    /// Runs the application.
    ///
    /// This method starts the GTK main loop and displays the main window.
    pub fn run(&self) {
        self.app.connect_activate({
            let app_state = self.app_state.clone();
            let catalog = self.catalog.clone();

            move |app| build_ui(app, &app_state, &catalog)
        });

        self.app.run();
    }
}

/// Scrollable area holding the mounted catalog page.
struct CatalogArea {
    /// Scrolled window wrapping the page.
    scrolled: ScrolledWindow,
    /// Parent of the page widget.
    holder: GtkBox,
    /// Currently mounted page.
    mounted: RefCell<Option<CatalogPageView>>,
    /// Catalog data.
    catalog: Arc<Catalog>,
    /// Entrance delay per card position.
    stagger: Duration,
}

impl CatalogArea {
    fn new(catalog: Arc<Catalog>, stagger: Duration) -> Self {
        let holder = GtkBox::builder().orientation(Vertical).build();
        let scrolled = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyNever)
            .vexpand(true)
            .child(&holder)
            .build();

        Self {
            scrolled,
            holder,
            mounted: RefCell::new(None),
            catalog,
            stagger,
        }
    }

    /// Replaces the mounted page with a fresh, entering `page` and scrolls
    /// to the top.
    fn mount(&self, page: PageSelection) {
        self.unmount();

        let view = CatalogPageView::new(page, self.catalog.page(page), self.stagger);
        self.holder.append(&view.widget);
        view.play_mount_entrance();
        *self.mounted.borrow_mut() = Some(view);

        self.scrolled.vadjustment().set_value(0.0);
        self.refresh_entrances();
    }

    fn refresh_entrances(&self) {
        if let Some(view) = self.mounted.borrow().as_ref() {
            view.refresh_entrances(&self.scrolled);
        }
    }

    fn unmount(&self) {
        // Removing the widget can emit adjustment signals that read `mounted`.
        let previous = self.mounted.borrow_mut().take();
        if let Some(previous) = previous {
            self.holder.remove(&previous.widget);
        }
    }
}

/// Everything a window keeps alive until it is closed.
struct WindowResources {
    /// Splash timers, present until boot completes.
    boot: Rc<RefCell<Option<BootSession>>>,
    /// Main-loop tasks forwarding state changes to widgets.
    listeners: Vec<JoinHandle<()>>,
    /// Scroll handlers on the vertical adjustment.
    _scroll_signals: Vec<SignalGuard>,
    /// Mounted catalog page.
    area: Rc<CatalogArea>,
}

impl WindowResources {
    fn release(self) {
        for listener in &self.listeners {
            listener.abort();
        }
        if let Some(session) = self.boot.borrow_mut().take() {
            session.finish();
        }
        self.area.unmount();
        debug!("Window resources released");
    }
}

/// Builds the main user interface.
fn build_ui(app: &Application, app_state: &Arc<AppState>, catalog: &Arc<Catalog>) {
    if let Some(window) = app.active_window() {
        window.present();
        return;
    }

    install_app_stylesheet();
    let timings = app_state.timings();

    let window = ApplicationWindow::builder()
        .application(app)
        .title("D4 KIENYEJI")
        .default_width(1200)
        .default_height(800)
        .build();

    let header_bar = Rc::new(HeaderBar::new(app_state));
    if let Err(e) = header_bar
        .install_breakpoint(&window)
        .add_context("Failed to install the mobile breakpoint")
    {
        ErrorReporter::warn(&e, "Keeping the desktop layout");
    }

    let styler = NavbarStyler::new();
    let scroll = ScrollStyleController::new(timings.scroll_threshold);
    styler.apply(scroll.variant());

    let area = Rc::new(CatalogArea::new(catalog.clone(), timings.entrance_stagger));

    let toolbar_view = ToolbarView::new();
    toolbar_view.add_top_bar(&header_bar.widget);
    toolbar_view.add_top_bar(&header_bar.mobile_menu);
    toolbar_view.set_content(Some(&area.scrolled));

    let stack = Stack::builder().transition_type(Crossfade).build();
    window.set_content(Some(&stack));

    let adjustment = area.scrolled.vadjustment();
    let scroll_signals = vec![
        SignalGuard::new(
            &adjustment,
            adjustment.connect_value_changed({
                let area = area.clone();
                move |adjustment| {
                    if let Some(variant) = scroll.observe(adjustment.value()) {
                        styler.apply(variant);
                    }
                    area.refresh_entrances();
                }
            }),
        ),
        SignalGuard::new(
            &adjustment,
            adjustment.connect_changed({
                let area = area.clone();
                move |_| area.refresh_entrances()
            }),
        ),
    ];

    // Subscribe before the boot timer exists so its completion is never missed.
    let events = app_state.subscribe();
    let boot = Rc::new(RefCell::new(None::<BootSession>));
    let mut listeners = Vec::new();

    if app_state.is_booting() {
        let session = BootSession::start(app_state);
        let loader_view = LoaderView::new(session.current_stage());
        stack.add_named(&loader_view.widget, Some(LOADER_CHILD));

        let stages = session.loader().subscribe();
        listeners.push(MainContext::default().spawn_local(async move {
            while let Ok(stage) = stages.recv().await {
                loader_view.update(stage);
            }
        }));

        *boot.borrow_mut() = Some(session);
        stack.add_named(&toolbar_view, Some(MAIN_CHILD));
        stack.set_visible_child_name(LOADER_CHILD);
    } else {
        stack.add_named(&toolbar_view, Some(MAIN_CHILD));
        stack.set_visible_child_name(MAIN_CHILD);
    }
    area.mount(app_state.current_page());

    listeners.push(MainContext::default().spawn_local({
        let header_bar = header_bar.clone();
        let area = area.clone();
        let boot = boot.clone();
        let stack = stack.clone();
        async move {
            while let Ok(event) = events.recv().await {
                debug!(?event, "State event received");
                header_bar.apply_event(&event);
                match event {
                    AppStateEvent::BootCompleted => {
                        if let Some(session) = boot.borrow_mut().take() {
                            session.finish();
                        }
                        stack.set_visible_child_name(MAIN_CHILD);
                        area.refresh_entrances();
                    }
                    AppStateEvent::PageChanged(page) => {
                        area.mount(page);
                    }
                    AppStateEvent::ThemeChanged(_) | AppStateEvent::MenuToggled(_) => {}
                }
            }
        }
    }));

    let resources = RefCell::new(Some(WindowResources {
        boot,
        listeners,
        _scroll_signals: scroll_signals,
        area,
    }));
    window.connect_close_request(move |_| {
        if let Some(resources) = resources.borrow_mut().take() {
            resources.release();
        }
        Propagation::Proceed
    });

    window.present();
}

#[cfg(test)]
mod tests {
    use crate::ui::application::{APPLICATION_ID, KienyejiApplication};

    #[test]
    fn test_application_id() {
        assert!(APPLICATION_ID.split('.').count() >= 3);
    }

    #[test]
    #[ignore = "Requires GTK display for UI testing"]
    fn test_application_creation() {
        if libadwaita::init().is_err() {
            return;
        }

        let app = KienyejiApplication::new().unwrap();
        assert!(app.app_state.is_booting());
        assert_eq!(app.catalog.chicken.items.len(), 8);
        assert_eq!(app.catalog.catfish.items.len(), 6);
    }
}
