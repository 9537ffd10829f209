use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use term_compose::actions::Action;
use term_compose::descriptor::Descriptors;
use term_compose::dialog::{DialogPayload, DialogRequest, DialogResult};
use term_compose::document::{DocumentRef, InMemoryDocuments};
use term_compose::keybindings::{Intent, KeyBindings};
use term_compose::navigator::Navigator;
use term_compose::paint::{self, UiFrame};
use term_compose::registry::Registry;
use term_compose::shell::Shell;
use term_compose::state::InteractionState;
use term_compose::{tracing_sub, widgets};

const DEFAULT_DESCRIPTORS: &str = indoc::indoc! {r#"
    title = "candis"

    [[menus]]
    id = "file"
    label = "File"

    [[menus.items]]
    id = "new"
    label = "New"
    icon = "+"
    action = "document.new"

    [[menus.items]]
    id = "recent"
    label = "Open Recent"

    [menus.items.submenu]
    id = "recent-files"
    label = "Open Recent"

    [[menus.items.submenu.items]]
    id = "iris"
    label = "iris.csv"
    action = "document.open.iris"

    [[menus.items.submenu.items]]
    id = "wine"
    label = "wine.csv"
    action = "document.open.wine"

    [[menus.items]]
    id = "close"
    label = "Close"
    action = "document.close"

    [[menus.items]]
    id = "quit"
    label = "Quit"
    action = "app.quit"

    [[menus]]
    id = "view"
    label = "View"

    [[menus.items]]
    id = "collapse"
    label = "Collapse Tool Box"
    action = "view.collapse_all"

    [[menus]]
    id = "help"
    label = "Help"

    [[menus.items]]
    id = "about"
    label = "About"
    icon = "?"
    action = "app.about"

    [[compartments]]
    id = "data"
    title = "Data"

    [[compartments.tools]]
    id = "create"
    widget_kind = "button"
    params = { type = "button", label = "Create", action = "document.new" }

    [[compartments.tools]]
    id = "source"
    widget_kind = "select"
    params = { type = "select", options = ["CSV", "ARFF", "SQL"], selected = 0 }

    [[compartments]]
    id = "preprocess"
    title = "Preprocess"

    [[compartments.tools]]
    id = "filters"
    widget_kind = "toggle_list"

    [compartments.tools.params]
    type = "toggle_list"

    [[compartments.tools.params.items]]
    id = "normalize"
    label = "Normalize"
    checked = true

    [[compartments.tools.params.items]]
    id = "discretize"
    label = "Discretize"

    [[compartments]]
    id = "model"
    title = "Model"

    [[compartments.tools]]
    id = "folds"
    widget_kind = "slider"
    params = { type = "slider", min = 2, max = 20, value = 10 }

    [[compartments.tools]]
    id = "seed"
    widget_kind = "input"
    params = { type = "input", placeholder = "random seed" }

    [[compartments]]
    id = "visualize"
    title = "Visualization"

    [[compartments.tools]]
    id = "scatter"
    widget_kind = "scatter_plot"
"#};

const WELCOME: &str = "Open the menu bar to get started.\n\n\
    The tool box on the left and these menus are built from descriptors;\n\
    pass --descriptors <PATH> to load your own.";

#[derive(Parser, Debug)]
#[command(
    name = "term-compose",
    version = env!("CARGO_PKG_VERSION"),
    about = "Demo shell composed from UI descriptors"
)]
struct Cli {
    /// TOML descriptor file. The built-in demo descriptors are used when omitted.
    #[arg(short = 'd', long = "descriptors", value_name = "PATH")]
    descriptors: Option<PathBuf>,

    /// Write logs to this file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Input poll interval.
    #[arg(long = "tick-ms", value_name = "MS", default_value_t = 16)]
    tick_ms: u64,
}

struct RunConfig {
    descriptors: Option<PathBuf>,
    log_file: Option<PathBuf>,
    tick: Duration,
}

impl TryFrom<&Cli> for RunConfig {
    type Error = String;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if !(1..=1_000).contains(&cli.tick_ms) {
            return Err("tick-ms must be between 1 and 1000".to_string());
        }
        Ok(Self {
            descriptors: cli.descriptors.clone(),
            log_file: cli.log_file.clone(),
            tick: Duration::from_millis(cli.tick_ms),
        })
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = RunConfig::try_from(&cli)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    tracing_sub::init(config.log_file.as_deref())?;

    // Mount before touching the terminal so descriptor errors print normally.
    let mut app = App::new(&config)?;

    // Log lines written to stderr would land on top of the frame.
    let capture = tracing_sub::stderr_capture();
    capture.start();

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = app.run(&mut terminal, config.tick);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let held_back = capture.finish();
    if !held_back.is_empty() {
        eprint!("{held_back}");
    }
    result
}

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Follow-ups requested from dialog callbacks, which run inside the store
/// and cannot reach the app directly.
enum AppEvent {
    Quit,
    NewDocument(String),
}

struct App {
    shell: Shell,
    navigator: Navigator,
    keys: KeyBindings,
    documents: InMemoryDocuments,
    events: Sender<AppEvent>,
    inbox: Receiver<AppEvent>,
    hints: String,
    status: Option<String>,
    next_id: u64,
    quit: bool,
}

impl App {
    fn new(config: &RunConfig) -> io::Result<Self> {
        let registry = Arc::new(Registry::new());
        widgets::register_builtin(&registry).map_err(io::Error::other)?;

        let descriptors = match &config.descriptors {
            Some(path) => Descriptors::from_path(path).map_err(io::Error::other)?,
            None => Descriptors::from_toml_str(DEFAULT_DESCRIPTORS).map_err(io::Error::other)?,
        };

        let mut documents = InMemoryDocuments::new();
        let welcome = DocumentRef::new("welcome", "text", "Welcome", documents.insert(WELCOME));
        let mut initial = InteractionState::new().with_documents(vec![welcome]);
        if let Some(first) = descriptors.compartments.first() {
            initial = initial.with_expanded([first.id.clone()]);
        }

        let shell = Shell::mount(descriptors, registry, initial).map_err(io::Error::other)?;
        let keys = KeyBindings::default();
        let hints = keys.hint_line(&[
            Intent::OpenMenuBar,
            Intent::FocusNext,
            Intent::Toggle,
            Intent::CloseDocument,
            Intent::Quit,
        ]);
        let (events, inbox) = mpsc::channel();
        Ok(Self {
            shell,
            navigator: Navigator::new(),
            keys,
            documents,
            events,
            inbox,
            hints,
            status: None,
            next_id: 0,
            quit: false,
        })
    }

    fn run(&mut self, terminal: &mut AppTerminal, tick: Duration) -> io::Result<()> {
        while !self.quit {
            terminal.draw(|frame| {
                let mut ui = UiFrame::new(frame);
                let status = self.status.as_deref().unwrap_or(&self.hints);
                paint::paint(
                    &mut ui,
                    self.shell.current_tree(),
                    &self.documents,
                    self.navigator.focus(),
                    status,
                );
            })?;
            if event::poll(tick)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(&key);
            }
            self.drain_events();
        }
        Ok(())
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let Some(intent) = self.keys.intent_for_key(key) else {
            return;
        };
        self.status = None;
        if intent == Intent::Quit {
            self.confirm_quit();
            return;
        }
        let actions = self
            .navigator
            .handle(intent, self.shell.descriptors(), self.shell.state());
        for action in actions {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Command(command) => {
                self.shell.dispatch(Action::Command(command.clone()));
                self.run_command(&command);
            }
            Action::CloseDocument(id) => self.close_document(id),
            other => {
                self.shell.dispatch(other);
            }
        }
    }

    fn run_command(&mut self, command: &str) {
        match command {
            "app.quit" => self.confirm_quit(),
            "app.about" => {
                let request = DialogRequest::message(
                    self.next_dialog_id(),
                    "About",
                    format!(
                        "{} {}\nMenus and tools are composed from descriptors.",
                        self.shell.descriptors().title,
                        env!("CARGO_PKG_VERSION")
                    ),
                );
                self.shell.dispatch(Action::OpenDialog(request));
            }
            "document.new" => self.prompt_new_document(),
            "document.close" => {
                if let Some(id) = self.shell.state().active_document_id() {
                    let id = id.to_string();
                    self.close_document(id);
                }
            }
            "view.collapse_all" => {
                let expanded: Vec<String> = self
                    .shell
                    .state()
                    .expanded_compartment_ids()
                    .iter()
                    .cloned()
                    .collect();
                for id in expanded {
                    self.shell.dispatch(Action::ToggleCompartment(id));
                }
            }
            other => match other.strip_prefix("document.open.") {
                Some(name) => self.open_document(format!("{name}.csv")),
                None => {
                    tracing::info!(command = other, "no handler for command");
                    self.status = Some(format!("no handler for `{other}`"));
                }
            },
        }
    }

    fn confirm_quit(&mut self) {
        let events = self.events.clone();
        let request = DialogRequest::new(
            self.next_dialog_id(),
            "confirm",
            DialogPayload::Confirm {
                title: "Quit".to_string(),
                prompt: "Close the shell?".to_string(),
            },
            move |result| {
                if result == DialogResult::Confirmed {
                    let _ = events.send(AppEvent::Quit);
                }
            },
        );
        self.shell.dispatch(Action::OpenDialog(request));
    }

    fn prompt_new_document(&mut self) {
        let events = self.events.clone();
        let default = format!("untitled-{}.csv", self.next_id + 1);
        let request = DialogRequest::new(
            self.next_dialog_id(),
            "input",
            DialogPayload::Input {
                title: "New document".to_string(),
                prompt: "Name".to_string(),
                default,
            },
            move |result| {
                if let DialogResult::Submitted(name) = result {
                    let _ = events.send(AppEvent::NewDocument(name));
                }
            },
        );
        self.shell.dispatch(Action::OpenDialog(request));
    }

    fn open_document(&mut self, title: String) {
        let handle = self
            .documents
            .insert(format!("{title}\n\n(no rows loaded)"));
        self.next_id += 1;
        let id = format!("doc-{}", self.next_id);
        self.shell.dispatch(Action::OpenDocument(DocumentRef::new(
            id.clone(),
            "csv",
            title,
            handle,
        )));
        self.shell.dispatch(Action::ActivateDocument(id));
    }

    fn close_document(&mut self, id: String) {
        let handle = self
            .shell
            .state()
            .open_documents()
            .iter()
            .find(|doc| doc.id == id)
            .map(|doc| doc.handle);
        self.shell.dispatch(Action::CloseDocument(id));
        if let Some(handle) = handle {
            self.documents.remove(handle);
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.inbox.try_recv() {
            match event {
                AppEvent::Quit => self.quit = true,
                AppEvent::NewDocument(name) => self.open_document(name),
            }
        }
    }

    fn next_dialog_id(&mut self) -> String {
        self.next_id += 1;
        format!("dialog-{}", self.next_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_descriptors_are_valid() {
        let descriptors = Descriptors::from_toml_str(DEFAULT_DESCRIPTORS).unwrap();
        let valid = term_compose::descriptor::validate(descriptors).unwrap();
        assert_eq!(valid.menus.len(), 3);
        assert_eq!(valid.compartments.len(), 4);
    }

    #[test]
    fn tick_is_range_checked() {
        let cli = Cli::parse_from(["term-compose", "--tick-ms", "0"]);
        assert!(RunConfig::try_from(&cli).is_err());
        let cli = Cli::parse_from(["term-compose"]);
        let config = RunConfig::try_from(&cli).unwrap();
        assert_eq!(config.tick, Duration::from_millis(16));
    }

    #[test]
    fn dialog_callbacks_reach_the_app() {
        let config = RunConfig {
            descriptors: None,
            log_file: None,
            tick: Duration::from_millis(16),
        };
        let mut app = App::new(&config).unwrap();
        app.run_command("document.new");
        assert!(app.shell.current_tree().dialog.is_some());
        app.shell
            .dispatch(Action::ResolveDialog(DialogResult::Submitted("wine.csv".into())));
        app.drain_events();
        let active = app.shell.state().active_document().unwrap();
        assert_eq!(active.title, "wine.csv");

        app.run_command("app.quit");
        app.shell.dispatch(Action::ResolveDialog(DialogResult::Confirmed));
        app.drain_events();
        assert!(app.quit);
    }
}
