use std::io::{Write, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::debug;

use crate::db::{DynamoClient, TableInfo};

/// Which screen the browser is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    TableList,
    TableDetail,
    IndexView,
}

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// Fetch this table's schema, then show the detail view
    LoadTable(String),
}

/// Browser state: the table list, the selection, and the active view.
#[derive(Debug)]
pub struct App {
    pub tables: Vec<String>,
    pub selected: usize,
    pub view: View,
    pub table_info: Option<TableInfo>,
    pub error: Option<String>,
    pub region: String,
    pub demo: bool,
}

impl App {
    pub fn new(tables: Vec<String>, region: String, demo: bool) -> Self {
        Self {
            tables,
            selected: 0,
            view: View::TableList,
            table_info: None,
            error: None,
            region,
            demo,
        }
    }

    fn selected_table(&self) -> Option<&str> {
        self.tables.get(self.selected).map(String::as_str)
    }

    /// Translate a key press into a state change plus a follow-up action.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Tab => self.cycle_view(),
            KeyCode::Up | KeyCode::Char('k') => {
                if self.view == View::TableList && self.selected > 0 {
                    self.selected -= 1;
                }
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.view == View::TableList && self.selected + 1 < self.tables.len() {
                    self.selected += 1;
                }
                Action::None
            }
            KeyCode::Enter => {
                if self.view == View::TableList {
                    if let Some(table) = self.selected_table() {
                        let table = table.to_string();
                        self.view = View::TableDetail;
                        return Action::LoadTable(table);
                    }
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn cycle_view(&mut self) -> Action {
        match self.view {
            View::TableList => {
                if let Some(table) = self.selected_table() {
                    let table = table.to_string();
                    self.view = View::TableDetail;
                    return Action::LoadTable(table);
                }
                Action::None
            }
            View::TableDetail => {
                self.view = View::IndexView;
                Action::None
            }
            View::IndexView => {
                self.view = View::TableList;
                Action::None
            }
        }
    }

    /// Render the active view to plain text.
    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return format!("Error: {error}\n\n[q]: Quit");
        }

        match self.view {
            View::TableList => self.render_table_list(),
            View::TableDetail => match &self.table_info {
                Some(info) => format!(
                    "{}\n\n[Tab]: View Indexes [q]: Quit",
                    render_table_detail(info)
                ),
                None => "Loading table data...".to_string(),
            },
            View::IndexView => match &self.table_info {
                Some(info) => format!(
                    "{}\n\n[Tab]: View Tables [q]: Quit",
                    render_index_view(info)
                ),
                None => "Loading table data...".to_string(),
            },
        }
    }

    fn render_table_list(&self) -> String {
        let mut content = String::from("DynamoDB Tables");
        if self.demo {
            content.push_str(" (demo data)");
        }
        content.push_str(&format!("  [{}]\n\n", self.region));

        for (i, table) in self.tables.iter().enumerate() {
            if i == self.selected {
                content.push_str(&format!("> {table}\n"));
            } else {
                content.push_str(&format!("  {table}\n"));
            }
        }

        content.push_str("\n[up/down]: Navigate [Enter]: Select [Tab]: Switch View [q]: Quit");
        content
    }
}

/// Table schema as plain text; also backs the `describe` subcommand output.
pub fn render_table_detail(info: &TableInfo) -> String {
    let mut content = format!("Table: {}\n\n", info.table_name);

    content.push_str("Primary Key:\n");
    for element in &info.key_schema {
        content.push_str(&format!(
            "  {} ({})\n",
            element.attribute_name, element.key_type
        ));
    }

    content.push_str("\nAttributes:\n");
    for (name, attr_type) in &info.attribute_definitions {
        content.push_str(&format!("  {name}: {attr_type}\n"));
    }

    content
}

pub fn render_index_view(info: &TableInfo) -> String {
    let mut content = format!("Indexes: {}\n\n", info.table_name);

    content.push_str("Global Secondary Indexes:\n");
    if info.global_secondary_indexes.is_empty() {
        content.push_str("  None\n");
    } else {
        for index in &info.global_secondary_indexes {
            content.push_str(&format!("  {}:\n", index.index_name));
            for element in &index.key_schema {
                content.push_str(&format!(
                    "    {} ({})\n",
                    element.attribute_name, element.key_type
                ));
            }
        }
    }

    content.push_str("\nLocal Secondary Indexes:\n");
    if info.local_secondary_indexes.is_empty() {
        content.push_str("  None\n");
    } else {
        for index in &info.local_secondary_indexes {
            content.push_str(&format!("  {}:\n", index.index_name));
            for element in &index.key_schema {
                content.push_str(&format!(
                    "    {} ({})\n",
                    element.attribute_name, element.key_type
                ));
            }
        }
    }

    content
}

/// Run the interactive browser until the user quits.
pub async fn run(client: &DynamoClient) -> Result<()> {
    let tables = client.list_tables().await?;
    debug!(count = tables.len(), "starting browser");
    let mut app = App::new(tables, client.region().to_string(), client.is_demo());

    terminal::enable_raw_mode().context("Failed to enable raw terminal mode")?;
    execute!(stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let result = event_loop(&mut app, client).await;

    execute!(stdout(), LeaveAlternateScreen).ok();
    terminal::disable_raw_mode().ok();

    result
}

async fn event_loop(app: &mut App, client: &DynamoClient) -> Result<()> {
    loop {
        draw(app)?;

        if !event::poll(Duration::from_millis(100)).context("Failed to poll terminal events")? {
            continue;
        }

        let Event::Key(key) = event::read().context("Failed to read terminal event")? else {
            continue;
        };

        match app.handle_key(key) {
            Action::Quit => return Ok(()),
            Action::LoadTable(table_name) => {
                match client.describe_table(&table_name).await {
                    Ok(info) => {
                        app.error = None;
                        app.table_info = Some(info);
                    }
                    Err(error) => app.error = Some(error.to_string()),
                }
            }
            Action::None => {}
        }
    }
}

fn draw(app: &App) -> Result<()> {
    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;
    for (row, line) in app.render().lines().enumerate() {
        queue!(out, MoveTo(0, row as u16), Print(line))?;
    }
    out.flush().context("Failed to flush terminal output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{IndexInfo, KeySchemaElement};
    use std::collections::BTreeMap;

    fn sample_table() -> TableInfo {
        TableInfo {
            table_name: "Users".to_string(),
            key_schema: vec![KeySchemaElement {
                attribute_name: "UserID".to_string(),
                key_type: "HASH".to_string(),
            }],
            attribute_definitions: BTreeMap::from([
                ("UserID".to_string(), "S".to_string()),
                ("Email".to_string(), "S".to_string()),
            ]),
            global_secondary_indexes: vec![IndexInfo {
                index_name: "UsernameIndex".to_string(),
                key_schema: vec![KeySchemaElement {
                    attribute_name: "Username".to_string(),
                    key_type: "HASH".to_string(),
                }],
            }],
            local_secondary_indexes: vec![],
        }
    }

    fn sample_app() -> App {
        App::new(
            vec!["Users".to_string(), "Orders".to_string()],
            "us-east-1".to_string(),
            false,
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_table_list_marks_selection() {
        let mut app = sample_app();
        let rendered = app.render();
        assert!(rendered.contains("> Users"));
        assert!(rendered.contains("  Orders"));

        app.handle_key(press(KeyCode::Down));
        let rendered = app.render();
        assert!(rendered.contains("  Users"));
        assert!(rendered.contains("> Orders"));
    }

    #[test]
    fn test_navigation_is_bounded() {
        let mut app = sample_app();
        app.handle_key(press(KeyCode::Up));
        assert_eq!(app.selected, 0);

        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_enter_requests_table_load() {
        let mut app = sample_app();
        let action = app.handle_key(press(KeyCode::Enter));
        assert_eq!(action, Action::LoadTable("Users".to_string()));
        assert_eq!(app.view, View::TableDetail);
    }

    #[test]
    fn test_tab_cycles_views() {
        let mut app = sample_app();
        assert_eq!(app.handle_key(press(KeyCode::Tab)), Action::LoadTable("Users".to_string()));
        assert_eq!(app.view, View::TableDetail);
        assert_eq!(app.handle_key(press(KeyCode::Tab)), Action::None);
        assert_eq!(app.view, View::IndexView);
        assert_eq!(app.handle_key(press(KeyCode::Tab)), Action::None);
        assert_eq!(app.view, View::TableList);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = sample_app();
        assert_eq!(app.handle_key(press(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn test_detail_view_shows_schema() {
        let rendered = render_table_detail(&sample_table());
        assert!(rendered.contains("Table: Users"));
        assert!(rendered.contains("UserID (HASH)"));
        assert!(rendered.contains("Email: S"));
    }

    #[test]
    fn test_index_view_shows_gsi_and_empty_lsi() {
        let rendered = render_index_view(&sample_table());
        assert!(rendered.contains("UsernameIndex"));
        assert!(rendered.contains("Username (HASH)"));
        assert!(rendered.contains("Local Secondary Indexes:\n  None"));
    }

    #[test]
    fn test_detail_view_without_data_shows_loading() {
        let mut app = sample_app();
        app.view = View::TableDetail;
        assert_eq!(app.render(), "Loading table data...");
    }

    #[test]
    fn test_error_state_renders_error() {
        let mut app = sample_app();
        app.error = Some("boom".to_string());
        assert!(app.render().starts_with("Error: boom"));
    }

    #[test]
    fn test_demo_banner() {
        let app = App::new(vec!["Users".to_string()], "us-east-1".to_string(), true);
        assert!(app.render().contains("(demo data)"));
    }
}
