use crate::appointment::{Appointment, AppointmentDraft};
use crate::cli::{AddArgs, Commands, ConfigActions};
use crate::collection::AppointmentBook;
use crate::config::{get_config_path, Config};
use crate::form::{AppointmentForm, Field, SmartParseOutcome};
use crate::geolocation::{create_locator, describe_position, Locator};
use crate::messages;
use crate::parser::{ParserFactory, SmartParser};
use crate::state::StateManager;
use crate::view;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rustyline::DefaultEditor;

/// The appointment collection plus the store that mirrors it.
///
/// Without a store the session runs purely in memory.
#[derive(Debug, Default)]
pub struct AppState {
    book: AppointmentBook,
    store: Option<StateManager>,
}

impl AppState {
    /// Load the collection once from `store`
    pub fn init(store: Option<StateManager>) -> Self {
        let book = match &store {
            Some(store) => AppointmentBook::from_records(store.load()),
            None => AppointmentBook::new(),
        };
        log::debug!("Loaded {} appointment(s)", book.len());
        Self { book, store }
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn book(&self) -> &AppointmentBook {
        &self.book
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    pub fn add(&mut self, draft: AppointmentDraft) -> Appointment {
        let appointment = self.book.add(draft);
        self.persist();
        appointment
    }

    /// Delete by id; a no-op for unknown ids
    pub fn delete(&mut self, id: &str) -> bool {
        let removed = self.book.remove(id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Mirror the whole collection to the store
    pub fn persist(&self) {
        if let Some(store) = &self.store {
            store.save(self.book.list());
        }
    }
}

/// Open the configured state directory, or fall back to memory
pub fn open_store(config: &Config) -> Option<StateManager> {
    let result = match &config.appointments.storage_dir {
        Some(dir) => StateManager::with_dir(dir),
        None => StateManager::new(),
    };
    match result {
        Ok(store) => Some(store),
        Err(e) => {
            log::warn!("Appointment storage unavailable, continuing in memory: {}", e);
            None
        }
    }
}

/// Whether the interactive loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Application {
    config: Config,
    state: AppState,
    parser: SmartParser,
    locator: Box<dyn Locator>,
    form: AppointmentForm,
}

impl Application {
    pub fn new(config: Config) -> Result<Self> {
        let state = AppState::init(open_store(&config));
        let parser = ParserFactory::create(&config)?;
        let locator = create_locator(&config.geolocation);
        Ok(Self::with_parts(config, state, parser, locator))
    }

    pub fn with_parts(
        config: Config,
        state: AppState,
        parser: SmartParser,
        locator: Box<dyn Locator>,
    ) -> Self {
        Self { config, state, parser, locator, form: AppointmentForm::new() }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn form(&self) -> &AppointmentForm {
        &self.form
    }

    pub async fn run(&mut self) -> Result<()> {
        log::info!("Starting Termin terminal");
        let mut rl = DefaultEditor::new()?;

        println!("{} | {}", messages::APP_TITLE, messages::APP_SUBTITLE);
        println!("{}", messages::FORM_HINT);
        println!("Type 'help' for commands.");
        if !self.state.is_persistent() {
            println!("(appointments are kept in memory for this session only)");
        }

        let prompt = "📅 ";
        loop {
            match rl.readline(prompt) {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    match self.process_line(&line).await {
                        Ok(Flow::Exit) => break,
                        Ok(Flow::Continue) => {}
                        Err(err) => {
                            log::error!("Failed to process command: {:?}", err);
                            println!("{}", err);
                        }
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handle one line of interactive input.
    ///
    /// Lines that don't start with a known command are treated as smart input.
    pub async fn process_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "exit" | "quit" => return Ok(Flow::Exit),
            "help" => println!("{}", view::HELP),
            "smart" | "parse" => self.smart_fill(rest).await,
            "set" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field: Field = name.parse()?;
                self.form.set_field(field, value.trim());
                println!("{}", view::render_form(&self.form));
            }
            "here" | "locate" => {
                if self.form.use_current_location(self.locator.as_ref()).await {
                    println!("{}", view::render_form(&self.form));
                } else {
                    self.print_form_error();
                }
            }
            "form" | "show" => println!("{}", view::render_form(&self.form)),
            "clear" => {
                self.form.clear();
                println!("{}", view::render_form(&self.form));
            }
            "submit" | "save" => match self.form.submit(&mut self.state) {
                Ok(appointment) => println!("{}", view::render_appointment(&appointment)),
                Err(_) => self.print_form_error(),
            },
            "list" => println!("{}", view::render_list(&self.state.book().sorted())),
            "delete" | "remove" => {
                if rest.is_empty() {
                    println!("Usage: delete <id>");
                } else {
                    self.state.delete(rest);
                    println!("{}", view::render_list(&self.state.book().sorted()));
                }
            }
            _ => self.smart_fill(line).await,
        }
        Ok(Flow::Continue)
    }

    async fn smart_fill(&mut self, text: &str) {
        self.form.smart_input = text.to_string();
        println!("{}", messages::SMART_PARSE_IN_PROGRESS);
        match self.form.smart_parse(&self.parser).await {
            SmartParseOutcome::Filled => println!("{}", view::render_form(&self.form)),
            SmartParseOutcome::Busy => {}
            SmartParseOutcome::EmptyInput | SmartParseOutcome::Failed => self.print_form_error(),
        }
    }

    fn print_form_error(&self) {
        if let Some(error) = self.form.error() {
            println!("⚠ {}", error);
        }
    }

    /// Run one non-interactive command
    pub async fn execute(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Add(args) => self.add(args).await,
            Commands::Parse { text, today } => self.parse(&text.join(" "), today).await,
            Commands::List { json } => {
                let sorted = self.state.book().sorted();
                if json {
                    println!("{}", serde_json::to_string_pretty(&sorted)?);
                } else {
                    println!("{}", view::render_list(&sorted));
                }
                Ok(())
            }
            Commands::Delete { id } => {
                if self.state.delete(&id) {
                    println!("Deleted {}", id);
                } else {
                    println!("No appointment with id {}", id);
                }
                Ok(())
            }
            Commands::Locate => {
                let coords = self.locator.locate().await?;
                println!("{}", describe_position(coords));
                Ok(())
            }
            Commands::Config { action } => self.configure(action),
        }
    }

    async fn add(&mut self, args: AddArgs) -> Result<()> {
        if let Some(text) = args.from_text {
            self.form.smart_input = text;
            if self.form.smart_parse(&self.parser).await != SmartParseOutcome::Filled {
                return Err(self.form_error());
            }
        }

        let overrides = [
            (Field::Title, args.title),
            (Field::Date, args.date),
            (Field::Time, args.time),
            (Field::Location, args.location),
            (Field::Notes, args.notes),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                self.form.set_field(field, value);
            }
        }

        if args.here && !self.form.use_current_location(self.locator.as_ref()).await {
            return Err(self.form_error());
        }

        match self.form.submit(&mut self.state) {
            Ok(appointment) => {
                println!("{}", view::render_appointment(&appointment));
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn parse(&mut self, text: &str, today: Option<NaiveDate>) -> Result<()> {
        if text.trim().is_empty() {
            return Err(anyhow!(messages::EMPTY_SMART_INPUT));
        }
        let draft = match today {
            Some(today) => self.parser.parse_on(text, today).await?,
            None => self.parser.parse(text).await?,
        };
        println!("{}", serde_json::to_string_pretty(&draft)?);
        Ok(())
    }

    fn configure(&mut self, action: ConfigActions) -> Result<()> {
        match action {
            ConfigActions::Show => print!("{}", toml::to_string_pretty(&self.config)?),
            ConfigActions::Path => println!("{}", get_config_path()?.display()),
            ConfigActions::Set { key, value } => {
                self.config.set(&key, &value)?;
                self.config.save()?;
                println!("{} = {}", key, value);
            }
        }
        Ok(())
    }

    fn form_error(&self) -> anyhow::Error {
        anyhow!(self.form.error().unwrap_or(messages::SMART_PARSE_FAILED).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geolocation::DisabledLocator;
    use crate::parser::LanguageModel;
    use async_trait::async_trait;
    use serde_json::Value;
    use tempfile::{tempdir, NamedTempFile};

    struct EchoModel(&'static str);

    #[async_trait]
    impl LanguageModel for EchoModel {
        async fn generate(&self, _prompt: &str, _schema: &Value) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    fn app_with(state: AppState, reply: &'static str) -> Application {
        Application::with_parts(
            Config::default(),
            state,
            SmartParser::new(Box::new(EchoModel(reply))),
            Box::new(DisabledLocator),
        )
    }

    const REPLY: &str =
        r#"{"title":"Meeting","date":"2024-06-11","time":"15:00","location":"Star Café"}"#;

    fn draft(title: &str, date: &str, time: &str) -> AppointmentDraft {
        AppointmentDraft {
            title: title.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            location: "Office".to_string(),
            notes: None,
        }
    }

    #[test]
    fn state_reloads_what_was_persisted() -> Result<()> {
        let temp_dir = tempdir()?;
        let mut state = AppState::init(Some(StateManager::with_dir(temp_dir.path())?));
        let kept = state.add(draft("Kept", "2024-06-11", "09:00"));
        let gone = state.add(draft("Gone", "2024-06-12", "10:00"));
        assert!(state.delete(&gone.id));

        let reloaded = AppState::init(Some(StateManager::with_dir(temp_dir.path())?));
        assert_eq!(reloaded.book().list(), &[kept]);
        Ok(())
    }

    #[test]
    fn unusable_storage_dir_falls_back_to_memory() -> Result<()> {
        // A plain file where the state directory should be
        let file = NamedTempFile::new()?;
        let mut config = Config::default();
        config.appointments.storage_dir = Some(file.path().to_path_buf());

        let store = open_store(&config);
        assert!(store.is_none());

        let mut state = AppState::init(store);
        assert!(!state.is_persistent());
        let added = state.add(draft("Offline", "2024-06-11", "09:00"));
        assert_eq!(state.book().len(), 1);
        assert!(state.delete(&added.id));
        assert!(state.book().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn free_text_line_goes_to_smart_parse() -> Result<()> {
        let mut app = app_with(AppState::in_memory(), REPLY);

        assert_eq!(app.process_line("meeting tomorrow 3pm at Star Café").await?, Flow::Continue);
        assert_eq!(app.form().title, "Meeting");
        assert_eq!(app.form().smart_input, "meeting tomorrow 3pm at Star Café");

        app.process_line("set notes bring the contract").await?;
        app.process_line("submit").await?;
        let list = app.state().book().list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].notes.as_deref(), Some("bring the contract"));
        Ok(())
    }

    #[tokio::test]
    async fn text_starting_with_field_name_is_smart_parsed() -> Result<()> {
        let mut app = app_with(AppState::in_memory(), REPLY);

        app.process_line("time with mum tomorrow").await?;
        assert_eq!(app.form().smart_input, "time with mum tomorrow");
        assert_eq!(app.form().title, "Meeting");
        assert_eq!(app.form().time, "15:00");

        app.process_line("set time 9:30").await?;
        assert_eq!(app.form().time, "9:30");
        assert_eq!(app.form().title, "Meeting");
        Ok(())
    }

    #[tokio::test]
    async fn exit_stops_the_loop() -> Result<()> {
        let mut app = app_with(AppState::in_memory(), REPLY);
        assert_eq!(app.process_line("  quit ").await?, Flow::Exit);
        Ok(())
    }

    #[tokio::test]
    async fn add_command_lets_flags_override_parse() -> Result<()> {
        let mut app = app_with(AppState::in_memory(), REPLY);
        let args = AddArgs {
            from_text: Some("meeting tomorrow 3pm".to_string()),
            location: Some("Altona".to_string()),
            ..AddArgs::default()
        };

        app.execute(Commands::Add(args)).await?;
        let added = &app.state().book().list()[0];
        assert_eq!(added.title, "Meeting");
        assert_eq!(added.location, "Altona");
        Ok(())
    }

    #[tokio::test]
    async fn add_without_location_is_rejected() {
        let mut app = app_with(AppState::in_memory(), REPLY);
        let args = AddArgs {
            title: Some("Call".to_string()),
            date: Some("2024-06-11".to_string()),
            time: Some("10:00".to_string()),
            ..AddArgs::default()
        };

        let err = app.execute(Commands::Add(args)).await.unwrap_err();
        assert_eq!(err.to_string(), messages::REQUIRED_FIELDS);
        assert!(app.state().book().is_empty());
    }

    #[tokio::test]
    async fn failed_parse_blocks_add() {
        let mut app = app_with(AppState::in_memory(), "not json");
        let args = AddArgs { from_text: Some("lunch".to_string()), ..AddArgs::default() };

        let err = app.execute(Commands::Add(args)).await.unwrap_err();
        assert_eq!(err.to_string(), messages::SMART_PARSE_FAILED);
        assert!(app.state().book().is_empty());
    }
}
