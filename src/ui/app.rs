//! Desktop application state and async plumbing.

use std::future::Future;

use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Layout, RichText};
use egui_phosphor::regular::{
    ARROWS_CLOCKWISE, CHART_BAR, HOUSE, LIST_BULLETS, MAGNIFYING_GLASS, PENCIL, TRASH, USER_PLUS, WRENCH,
};
use tokio::sync::mpsc;

use crate::client::ApiClient;
use crate::config::AppConfig;
use crate::error::Result;
use crate::export;
use crate::models::{DeleteConfirmation, Employee, InsertedId, SalaryReport, ServiceInfo, SkillSearch};

use super::components::colors;
use super::forms::{EmployeeForm, UpdateForm};
use super::{analytics_pages, dashboard, employee_pages, list_page};

/// Page currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Menu,
    Add,
    Find,
    Update,
    List,
    Delete,
    AverageSalary,
    SkillSearch,
}

impl Page {
    pub const OPERATIONS: [Page; 7] = [
        Page::Add,
        Page::Find,
        Page::Update,
        Page::List,
        Page::Delete,
        Page::AverageSalary,
        Page::SkillSearch,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Page::Menu => "Menu",
            Page::Add => "Add Employee",
            Page::Find => "Find Employee",
            Page::Update => "Update Employee",
            Page::List => "List Employees",
            Page::Delete => "Delete Employee",
            Page::AverageSalary => "Average Salary",
            Page::SkillSearch => "Skill Search",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Menu => HOUSE,
            Page::Add => USER_PLUS,
            Page::Find => MAGNIFYING_GLASS,
            Page::Update => PENCIL,
            Page::List => LIST_BULLETS,
            Page::Delete => TRASH,
            Page::AverageSalary => CHART_BAR,
            Page::SkillSearch => WRENCH,
        }
    }
}

/// API reachability as last observed.
#[derive(Debug, Clone, Default)]
pub enum ServerStatus {
    #[default]
    Unknown,
    Online(Vec<String>),
    Offline(String),
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    Connected(ServiceInfo),
    ConnectionFailed(String),

    Created(String, InsertedId),
    Found(Employee),
    LoadedForUpdate(Employee),
    Updated(Employee),
    Deleted(DeleteConfirmation),
    Listed(Vec<Employee>),
    SalaryLoaded(SalaryReport),
    SkillsLoaded(SkillSearch),
    OperationFailed(String),
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Main application state.
pub struct App {
    pub rt: tokio::runtime::Runtime,
    pub api: ApiClient,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    pub current_page: Page,
    pub server_status: ServerStatus,
    pub is_loading: bool,
    pub loading_message: String,

    // Add
    pub add_form: EmployeeForm,
    pub last_inserted: Option<(String, String)>,

    // Find
    pub find_id: String,
    pub found: Option<Employee>,

    // Update
    pub update_form: UpdateForm,

    // Delete
    pub delete_id: String,
    pub show_delete_confirm: bool,

    // List
    pub list_department: String,
    pub employees: Vec<Employee>,
    pub list_loaded: bool,

    // Analytics
    pub salary_report: Option<SalaryReport>,
    pub skill_query: String,
    pub skill_result: Option<SkillSearch>,

    pub log_messages: Vec<LogEntry>,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig, rt: tokio::runtime::Runtime) -> Result<Self> {
        let api = ApiClient::from_config(&config.client)?;
        let (tx, rx) = mpsc::unbounded_channel();

        let mut app = Self {
            rt,
            api,
            tx,
            rx,
            current_page: Page::default(),
            server_status: ServerStatus::default(),
            is_loading: false,
            loading_message: String::new(),
            add_form: EmployeeForm::default(),
            last_inserted: None,
            find_id: String::new(),
            found: None,
            update_form: UpdateForm::default(),
            delete_id: String::new(),
            show_delete_confirm: false,
            list_department: String::new(),
            employees: Vec::new(),
            list_loaded: false,
            salary_report: None,
            skill_query: String::new(),
            skill_result: None,
            log_messages: Vec::new(),
            error_message: None,
            success_message: None,
        };

        app.check_connection();
        Ok(app)
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Surface an error in the dialog and the activity log.
    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.error_message = Some(message.clone());
        self.log_error(message);
    }

    /// Run an API call on the runtime and route its outcome back as a message.
    fn run<T, Fut>(&mut self, label: &str, call: Fut, on_ok: impl FnOnce(T) -> UiMessage + Send + 'static)
    where
        T: Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        self.is_loading = true;
        self.loading_message = label.to_string();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let message = match call.await {
                Ok(value) => on_ok(value),
                Err(e) => UiMessage::OperationFailed(e.to_string()),
            };
            let _ = tx.send(message);
        });
    }

    /// Ping the API root.
    pub fn check_connection(&mut self) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.log_info(format!("Connecting to {}", self.api.base_url()));

        self.rt.spawn(async move {
            let message = match api.service_info().await {
                Ok(info) => UiMessage::Connected(info),
                Err(e) => UiMessage::ConnectionFailed(e.to_string()),
            };
            let _ = tx.send(message);
        });
    }

    pub fn create_employee(&mut self) {
        let payload = match self.add_form.to_create() {
            Ok(payload) => payload,
            Err(e) => return self.show_error(e),
        };
        let api = self.api.clone();
        let employee_id = payload.employee_id.clone();
        self.run(
            "Creating employee...",
            async move { api.create(&payload).await },
            move |inserted| UiMessage::Created(employee_id, inserted),
        );
    }

    pub fn find_employee(&mut self) {
        let employee_id = self.find_id.trim().to_string();
        if employee_id.is_empty() {
            return self.show_error("Enter an employee ID");
        }
        self.found = None;
        let api = self.api.clone();
        self.run(
            "Looking up employee...",
            async move { api.get(&employee_id).await },
            UiMessage::Found,
        );
    }

    pub fn load_for_update(&mut self) {
        let employee_id = self.update_form.employee_id.trim().to_string();
        if employee_id.is_empty() {
            return self.show_error("Enter an employee ID");
        }
        let api = self.api.clone();
        self.run(
            "Loading employee...",
            async move { api.get(&employee_id).await },
            UiMessage::LoadedForUpdate,
        );
    }

    pub fn update_employee(&mut self) {
        let employee_id = self.update_form.employee_id.trim().to_string();
        if employee_id.is_empty() {
            return self.show_error("Enter an employee ID");
        }
        let changes = match self.update_form.to_changes() {
            Ok(changes) => changes,
            Err(e) => return self.show_error(e),
        };
        let api = self.api.clone();
        self.run(
            "Saving changes...",
            async move { api.update(&employee_id, &changes).await },
            UiMessage::Updated,
        );
    }

    /// Ask for confirmation before deleting.
    pub fn request_delete(&mut self) {
        if self.delete_id.trim().is_empty() {
            return self.show_error("Enter an employee ID");
        }
        self.show_delete_confirm = true;
    }

    fn delete_employee(&mut self) {
        let employee_id = self.delete_id.trim().to_string();
        let api = self.api.clone();
        self.run(
            "Deleting employee...",
            async move { api.delete(&employee_id).await },
            UiMessage::Deleted,
        );
    }

    pub fn load_employees(&mut self) {
        let department = self.list_department.trim().to_string();
        let api = self.api.clone();
        self.run(
            "Loading employees...",
            async move { api.list(Some(&department)).await },
            UiMessage::Listed,
        );
    }

    pub fn load_salary_report(&mut self) {
        let api = self.api.clone();
        self.run(
            "Calculating averages...",
            async move { api.average_salary().await },
            UiMessage::SalaryLoaded,
        );
    }

    /// Search by skill; an empty query lists every known skill.
    pub fn search_skill(&mut self) {
        let query = self.skill_query.trim().to_string();
        self.skill_result = None;
        let api = self.api.clone();
        self.run(
            "Searching...",
            async move {
                let skill = (!query.is_empty()).then_some(query.as_str());
                api.search_skill(skill).await
            },
            UiMessage::SkillsLoaded,
        );
    }

    /// Export the loaded employee list to Excel.
    pub fn export_employees(&mut self) {
        let Some(path) = export::show_save_dialog(&export::generate_export_filename("employees")) else {
            return;
        };

        match export::export_employees_to_excel(&self.employees, &path) {
            Ok(()) => {
                self.success_message = Some(format!("Exported to: {}", path.display()));
                self.log_success(format!("Exported {} employees: {}", self.employees.len(), path.display()));
            }
            Err(e) => self.show_error(format!("Export failed: {e}")),
        }
    }

    /// Export the salary report to Excel.
    pub fn export_salary_report(&mut self) {
        let Some(report) = self.salary_report.clone() else {
            return;
        };
        let Some(path) = export::show_save_dialog(&export::generate_export_filename("average_salary")) else {
            return;
        };

        match export::export_salary_report_to_excel(&report, &path) {
            Ok(()) => {
                self.success_message = Some(format!("Exported to: {}", path.display()));
                self.log_success(format!("Exported salary report: {}", path.display()));
            }
            Err(e) => self.show_error(format!("Export failed: {e}")),
        }
    }

    /// Switch page, loading data the target page shows on entry.
    pub fn navigate(&mut self, page: Page) {
        self.current_page = page;
        match page {
            Page::List if !self.list_loaded => self.load_employees(),
            Page::AverageSalary if self.salary_report.is_none() => self.load_salary_report(),
            _ => {}
        }
    }

    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.is_loading = false;
            match msg {
                UiMessage::Connected(info) => {
                    self.log_success(format!("{} ({} collections)", info.message, info.collections.len()));
                    self.server_status = ServerStatus::Online(info.collections);
                }
                UiMessage::ConnectionFailed(e) => {
                    self.log_error(format!("API unreachable: {e}"));
                    self.server_status = ServerStatus::Offline(e);
                }
                UiMessage::Created(employee_id, inserted) => {
                    self.success_message = Some(format!("Employee '{employee_id}' created"));
                    self.log_success(format!("Created {employee_id} ({})", inserted.inserted_id));
                    self.last_inserted = Some((employee_id, inserted.inserted_id));
                    self.add_form.reset();
                    self.list_loaded = false;
                    self.salary_report = None;
                }
                UiMessage::Found(employee) => {
                    self.log_info(format!("Found {}", employee.employee_id));
                    self.found = Some(employee);
                }
                UiMessage::LoadedForUpdate(employee) => {
                    self.log_info(format!("Loaded {} for editing", employee.employee_id));
                    self.update_form.load(employee);
                }
                UiMessage::Updated(employee) => {
                    self.success_message = Some(format!("Employee '{}' updated", employee.employee_id));
                    self.log_success(format!("Updated {}", employee.employee_id));
                    self.update_form.load(employee);
                    self.list_loaded = false;
                    self.salary_report = None;
                }
                UiMessage::Deleted(confirmation) => {
                    self.log_success(confirmation.message.clone());
                    self.success_message = Some(confirmation.message);
                    self.delete_id.clear();
                    self.list_loaded = false;
                    self.salary_report = None;
                }
                UiMessage::Listed(employees) => {
                    self.employees = employees;
                    self.list_loaded = true;
                }
                UiMessage::SalaryLoaded(report) => {
                    self.salary_report = Some(report);
                }
                UiMessage::SkillsLoaded(result) => {
                    self.skill_result = Some(result);
                }
                UiMessage::OperationFailed(e) => self.show_error(e),
            }
        }
    }

    fn show_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("navigation")
            .resizable(false)
            .exact_width(190.0)
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.label(RichText::new("Employee Records").strong().size(16.0));
                ui.add_space(12.0);

                let mut target = None;
                for page in std::iter::once(Page::Menu).chain(Page::OPERATIONS) {
                    let label = format!("{} {}", page.icon(), page.name());
                    if ui.selectable_label(self.current_page == page, label).clicked() {
                        target = Some(page);
                    }
                }
                if let Some(page) = target {
                    self.navigate(page);
                }
            });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let (color, text) = match &self.server_status {
                        ServerStatus::Unknown => (colors::NEUTRAL, "Connecting...".to_string()),
                        ServerStatus::Online(_) => (colors::SUCCESS, "Online".to_string()),
                        ServerStatus::Offline(_) => (colors::WARNING, "Offline".to_string()),
                    };
                    ui.colored_label(color, format!("API {}: {}", self.api.base_url(), text));

                    if matches!(self.server_status, ServerStatus::Offline(_))
                        && ui.small_button(ARROWS_CLOCKWISE).on_hover_text("Retry").clicked()
                    {
                        self.check_connection();
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.is_loading {
                            ui.label(&self.loading_message);
                            ui.spinner();
                        }
                    });
                });
            });
    }

    /// Render modal dialogs (error, success, delete confirmation).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        if let Some(msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }

        if self.show_delete_confirm {
            let employee_id = self.delete_id.trim().to_string();
            egui::Window::new("Delete Employee")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(format!("Permanently delete employee '{employee_id}'?"));
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.show_delete_confirm = false;
                        }
                        if ui.button("Delete").clicked() {
                            self.show_delete_confirm = false;
                            self.log_info(format!("Deleting employee: {employee_id}"));
                            self.delete_employee();
                        }
                    });
                });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_async_results();

        if self.is_loading || matches!(self.server_status, ServerStatus::Unknown) {
            ctx.request_repaint();
        }

        self.show_side_panel(ctx);
        self.show_status_bar(ctx);
        self.show_dialogs(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let back = match self.current_page {
                Page::Menu => {
                    if let Some(next) = dashboard::show(self, ui) {
                        self.navigate(next);
                    }
                    false
                }
                Page::Add => employee_pages::show_add(self, ui),
                Page::Find => employee_pages::show_find(self, ui),
                Page::Update => employee_pages::show_update(self, ui),
                Page::Delete => employee_pages::show_delete(self, ui),
                Page::List => list_page::show(self, ui),
                Page::AverageSalary => analytics_pages::show_average_salary(self, ui),
                Page::SkillSearch => analytics_pages::show_skill_search(self, ui),
            };
            if back {
                self.current_page = Page::Menu;
            }
        });
    }
}
