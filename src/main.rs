use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::atomic::Ordering, time::Duration};
use tokio::sync::{mpsc, watch};

use imgtui::api::ImageManagerClient;
use imgtui::config::{self, Config};
use imgtui::log_debug;
use imgtui::model::ui::{PreviewState, PreviewStatus};
use imgtui::model::{Model, Screen};
use imgtui::services::api::{spawn_api_service, ApiRequest, ApiResponse};
use imgtui::services::preview::{load_image_preview, PreviewMetadata};
use imgtui::session::{SessionContext, SessionEvent, SessionStore};
use imgtui::DEBUG_MODE;

mod handlers;
mod ui;

/// Image Manager TUI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to the temp directory (imgtui-debug.log)
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (hjkl, ^D/U, G)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,
}

type PreviewResult = Result<(ratatui_image::protocol::StatefulProtocol, PreviewMetadata), String>;

pub struct App {
    pub model: Model,

    session: SessionContext,
    session_rx: watch::Receiver<SessionEvent>,
    client: ImageManagerClient,
    api_tx: mpsc::UnboundedSender<ApiRequest>,
    api_rx: mpsc::UnboundedReceiver<ApiResponse>,

    image_picker: Option<ratatui_image::picker::Picker>,
    preview_tx: mpsc::UnboundedSender<(String, PreviewResult)>,
    preview_rx: mpsc::UnboundedReceiver<(String, PreviewResult)>,

    /// Decoded image of the open preview (not cloneable, so kept out of Model)
    preview_protocol: Option<ratatui_image::protocol::StatefulProtocol>,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let session = SessionContext::new(SessionStore::new()?);
        let session_rx = session.subscribe();

        let client = ImageManagerClient::new(config.api_base(), config.static_origin(), session.clone());
        log_debug(&format!(
            "API base: {}, static origin: {}",
            config.api_base(),
            config.static_origin()
        ));

        // Spawn API service worker
        let (api_tx, api_rx) = spawn_api_service(client.clone());
        let (preview_tx, preview_rx) = mpsc::unbounded_channel();

        let image_picker = if config.image_preview_enabled {
            Some(create_picker(&config.image_protocol))
        } else {
            log_debug("Image preview disabled in config");
            None
        };

        let mut app = App {
            model: Model::new(config.vim_mode),
            session,
            session_rx,
            client,
            api_tx,
            api_rx,
            image_picker,
            preview_tx,
            preview_rx,
            preview_protocol: None,
        };

        // Restore a persisted session and confirm it with the backend
        match app.session.init() {
            Ok(Some(restored)) => {
                log_debug(&format!("Restored session for {}", restored.user.display_name()));
                app.model.sign_in(restored.user);
                app.send(ApiRequest::FetchCurrentUser);
            }
            Ok(None) => log_debug("No stored session"),
            Err(e) => log_debug(&format!("Failed to restore session: {:#}", e)),
        }

        Ok(app)
    }

    fn send(&self, request: ApiRequest) {
        if let Err(e) = self.api_tx.send(request) {
            log_debug(&format!("API service unavailable: {}", e));
        }
    }

    /// Issue a content load for the current navigation state
    fn reload_content(&mut self) {
        if self.model.screen != Screen::Dashboard {
            return;
        }
        let ticket = self.model.begin_reload();
        log_debug(&format!(
            "DEBUG [Reload]: gen={} folder={:?} search={:?}",
            ticket.generation, ticket.key.folder_id, ticket.key.search
        ));
        self.send(ApiRequest::LoadContent { ticket });
    }

    /// A 401 was seen: drop the session and return to the login screen
    fn expire_session(&mut self) {
        // A late 401 after logout must not replace the logout with an expiry
        if self.model.screen != Screen::Dashboard {
            return;
        }
        self.session.teardown(SessionEvent::Expired);
        self.model.sign_out(SessionEvent::Expired);
        self.preview_protocol = None;
    }

    fn logout(&mut self) {
        self.session.teardown(SessionEvent::SignedOut);
        self.model.sign_out(SessionEvent::SignedOut);
        self.preview_protocol = None;
    }

    /// Session changes made outside the UI loop (401 seen by the client)
    fn handle_session_event(&mut self, event: SessionEvent) {
        if event == SessionEvent::SignedIn || self.model.screen != Screen::Dashboard {
            return;
        }
        log_debug(&format!("Session ended: {:?}", event));
        self.model.sign_out(event);
        self.preview_protocol = None;
    }

    /// Open the preview popup for the highlighted image and load it
    fn open_preview(&mut self) {
        let Some(image) = self.model.selected_image().cloned() else {
            return;
        };
        let Some(picker) = self.image_picker.clone() else {
            self.model.show_toast("Image preview is disabled".to_string());
            return;
        };

        self.preview_protocol = None;
        self.model.ui.preview = Some(PreviewState {
            image_id: image.id.clone(),
            name: image.name.clone(),
            size: image.size,
            status: PreviewStatus::Loading,
        });

        let client = self.client.clone();
        let tx = self.preview_tx.clone();
        tokio::spawn(async move {
            let image_id = image.id.clone();
            let result = load_image_preview(client, image, picker).await;
            let _ = tx.send((image_id, result));
        });
    }

    fn close_preview(&mut self) {
        self.model.ui.preview = None;
        self.preview_protocol = None;
    }

    /// Apply a finished preview load if that image is still being previewed
    fn apply_preview(&mut self, image_id: String, result: PreviewResult) {
        let Some(preview) = self.model.ui.preview.as_mut() else {
            return;
        };
        if preview.image_id != image_id {
            log_debug(&format!("Discarding preview for {}", image_id));
            return;
        }

        match result {
            Ok((protocol, metadata)) => {
                preview.status = PreviewStatus::Ready {
                    dimensions: metadata.dimensions,
                    format: metadata.format,
                };
                self.preview_protocol = Some(protocol);
            }
            Err(message) => {
                log_debug(&format!("Preview of {} failed: {}", image_id, message));
                preview.status = PreviewStatus::Failed(message);
            }
        }
    }
}

/// Detect the terminal graphics protocol, honouring the configured override
fn create_picker(protocol: &str) -> ratatui_image::picker::Picker {
    use ratatui_image::picker::{Picker, ProtocolType};

    let mut picker = match Picker::from_query_stdio() {
        Ok(p) => p,
        Err(e) => {
            log_debug(&format!("Image preview: Failed to detect terminal: {}", e));
            Picker::from_fontsize((8, 16))
        }
    };

    let font_size = picker.font_size();
    log_debug(&format!("Image font size: {}x{}", font_size.0, font_size.1));

    match protocol.to_lowercase().as_str() {
        "auto" => log_debug("Image preview: Auto-detected protocol"),
        "iterm2" => picker.set_protocol_type(ProtocolType::Iterm2),
        "kitty" => picker.set_protocol_type(ProtocolType::Kitty),
        "sixel" => picker.set_protocol_type(ProtocolType::Sixel),
        "halfblocks" => picker.set_protocol_type(ProtocolType::Halfblocks),
        unknown => log_debug(&format!(
            "Image preview: Unknown protocol '{}', using auto-detect",
            unknown
        )),
    }

    picker
}

fn load_config(cli_path: Option<String>) -> Result<Config> {
    let config = match config::find_config_path(cli_path)? {
        Some(path) => {
            log_debug(&format!("Loading config from: {:?}", path));
            Config::load(&path)?
        }
        None => {
            log_debug("No config file found, using defaults");
            Config::default()
        }
    };
    Ok(config.with_api_url_override(std::env::var(config::API_URL_ENV).ok()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    DEBUG_MODE.store(args.debug, Ordering::Relaxed);
    if args.debug {
        log_debug("Debug mode enabled");
    }

    let mut config = load_config(args.config)?;
    if args.vim {
        config.vim_mode = true;
    }

    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.ui.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        if app.model.ui.should_quit {
            break;
        }

        // Process API responses (non-blocking)
        while let Ok(response) = app.api_rx.try_recv() {
            handlers::handle_api_response(app, response);
        }

        while let Ok((image_id, result)) = app.preview_rx.try_recv() {
            app.apply_preview(image_id, result);
        }

        if app.session_rx.has_changed().unwrap_or(false) {
            let event = *app.session_rx.borrow_and_update();
            app.handle_session_event(event);
        }

        // Navigation changed since the last request (or first dashboard frame)
        if app.model.needs_reload() {
            app.reload_content();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handlers::handle_key(app, key).await?;
            }
        }
    }

    Ok(())
}
