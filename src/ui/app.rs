//! Main application state and update loop.
//!
//! All server data lives here in per-collection caches. Panels read the
//! caches and call the dispatch methods below; every remote call runs on the
//! tokio runtime and reports back through one unbounded channel that
//! `poll_async_results` drains at the start of each frame. Fetch results
//! carry the sequence number they were issued under, so a stale response can
//! never overwrite a newer page.

use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Datelike, Local, NaiveDate};
use eframe::egui::{self, Color32, RichText};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::api::client::ApiClient;
use crate::api::types::{ApiMessage, ListQuery, Page, StatusChange};
use crate::config::AppConfig;
use crate::error::Result;
use crate::export;
use crate::models::attendance::{AttendanceRecord, CheckPayload};
use crate::models::catalog::{CatalogPayload, Department, JobTitle};
use crate::models::employee::{Employee, EmployeePayload};
use crate::models::leave::{
    LeaveRequest, LeaveRequestPayload, LeaveStatus, LeaveType, LeaveTypePayload,
};
use crate::models::payroll::{GeneratePayslips, Payslip, PayslipStatus, Salary, SalaryPayload};
use crate::models::report::{ReportData, ReportKind};
use crate::store::{Collection, RequestSeq};

use super::components::{self, colors};
use super::forms::{
    CatalogForm, CheckForm, EmployeeForm, LeaveRequestForm, LeaveTypeForm, SalaryForm,
};
use super::{
    attendance_panel, catalog_panel, dashboard, employees_panel, leave_panel, payroll_panel,
    reports_panel, settings_panel,
};

/// Page size requested when filling combo box options.
const PICKER_PAGE_SIZE: u32 = 200;

/// How long a toast stays on screen.
const NOTICE_TTL: Duration = Duration::from_millis(4000);

/// Activity log retention.
const MAX_LOG_ENTRIES: usize = 100;

/// Which panel is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Dashboard,
    Employees,
    Departments,
    JobTitles,
    Attendance,
    Leave,
    Payroll,
    Reports,
    Settings,
}

/// Which catalog collection the shared catalog panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Departments,
    JobTitles,
}

impl CatalogKind {
    pub fn title(self) -> &'static str {
        match self {
            CatalogKind::Departments => "Departments",
            CatalogKind::JobTitles => "Job Titles",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            CatalogKind::Departments => "Department",
            CatalogKind::JobTitles => "Job Title",
        }
    }
}

/// Active tab inside the leave panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaveTab {
    #[default]
    Requests,
    Types,
}

/// Active tab inside the payroll panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayrollTab {
    #[default]
    Salaries,
    Payslips,
}

/// Which collection a finished mutation belongs to. Drives the refetch and
/// which dialog gets closed on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Employee,
    Department,
    JobTitle,
    Attendance,
    LeaveRequest,
    LeaveType,
    Salary,
    Payslip,
}

/// Record queued for deletion, shown in the confirmation dialog.
#[derive(Debug, Clone)]
pub enum DeleteTarget {
    Employee(i64, String),
    Department(i64, String),
    JobTitle(i64, String),
    LeaveType(i64, String),
    LeaveRequest(i64, String),
    Salary(i64, String),
}

impl DeleteTarget {
    pub fn id(&self) -> i64 {
        match self {
            DeleteTarget::Employee(id, _)
            | DeleteTarget::Department(id, _)
            | DeleteTarget::JobTitle(id, _)
            | DeleteTarget::LeaveType(id, _)
            | DeleteTarget::LeaveRequest(id, _)
            | DeleteTarget::Salary(id, _) => *id,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DeleteTarget::Employee(_, name) => format!("employee \"{name}\""),
            DeleteTarget::Department(_, name) => format!("department \"{name}\""),
            DeleteTarget::JobTitle(_, name) => format!("job title \"{name}\""),
            DeleteTarget::LeaveType(_, name) => format!("leave type \"{name}\""),
            DeleteTarget::LeaveRequest(_, name) => format!("leave request for {name}"),
            DeleteTarget::Salary(_, name) => format!("salary record for {name}"),
        }
    }
}

/// Messages sent from spawned tasks back to the UI thread.
pub enum UiMessage {
    EmployeesPage(u64, Result<Page<Employee>>),
    DepartmentsPage(u64, Result<Page<Department>>),
    JobTitlesPage(u64, Result<Page<JobTitle>>),
    AttendancePage(u64, Result<Page<AttendanceRecord>>),
    LeaveRequestsPage(u64, Result<Page<LeaveRequest>>),
    LeaveTypesPage(u64, Result<Page<LeaveType>>),
    SalariesPage(u64, Result<Page<Salary>>),
    PayslipsPage(u64, Result<Page<Payslip>>),

    EmployeeOptions(Result<Vec<Employee>>),
    DepartmentOptions(Result<Vec<Department>>),
    JobTitleOptions(Result<Vec<JobTitle>>),
    LeaveTypeOptions(Result<Vec<LeaveType>>),

    EmployeeDetail(u64, Result<Employee>),
    DepartmentDetail(u64, Result<Department>),
    JobTitleDetail(u64, Result<JobTitle>),
    LeaveTypeDetail(u64, Result<LeaveType>),
    LeaveRequestDetail(u64, Result<LeaveRequest>),
    SalaryDetail(u64, Result<Salary>),

    Mutated(ResourceKind, Result<ApiMessage>),
    ReportLoaded(u64, Result<ReportData>),
    DashboardLoaded(u64, Result<DashboardCounts>),
    ServerTestResult(std::result::Result<(), String>),
}

/// Severity for log entries and toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn color(&self) -> Color32 {
        match self {
            LogLevel::Info => colors::NEUTRAL,
            LogLevel::Success => colors::SUCCESS,
            LogLevel::Warning => colors::WARNING,
            LogLevel::Error => colors::ERROR,
        }
    }
}

/// One line in the activity log.
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

/// Transient toast shown in the corner until its TTL runs out.
pub struct Notice {
    pub level: LogLevel,
    pub text: String,
    pub created: Instant,
}

/// Headline numbers shown on the dashboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardCounts {
    pub employees: u64,
    pub today_attendance: u64,
    pub pending_leaves: u64,
}

/// Date range driving the reports panel.
pub struct ReportFilter {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_input: String,
    pub end_input: String,
}

impl Default for ReportFilter {
    fn default() -> Self {
        let today = Local::now().date_naive();
        let month_start = today.with_day(1).unwrap_or(today);
        let mut filter = Self {
            start_date: month_start,
            end_date: today,
            start_input: String::new(),
            end_input: String::new(),
        };
        filter.sync_inputs();
        filter
    }
}

impl ReportFilter {
    /// Refresh the text inputs from the parsed dates.
    pub fn sync_inputs(&mut self) {
        self.start_input = self.start_date.format("%Y-%m-%d").to_string();
        self.end_input = self.end_date.format("%Y-%m-%d").to_string();
    }

    /// Apply a quick range and refresh the inputs.
    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.start_date = start;
        self.end_date = end;
        self.sync_inputs();
    }
}

pub struct App {
    rt: Runtime,
    api: ApiClient,
    tx: mpsc::UnboundedSender<UiMessage>,
    rx: mpsc::UnboundedReceiver<UiMessage>,

    pub config: AppConfig,
    pub config_path: PathBuf,
    pub config_modified: bool,

    pub current_panel: Panel,

    pub employees: Collection<Employee>,
    pub departments: Collection<Department>,
    pub job_titles: Collection<JobTitle>,
    pub attendance: Collection<AttendanceRecord>,
    pub leave_requests: Collection<LeaveRequest>,
    pub leave_types: Collection<LeaveType>,
    pub salaries: Collection<Salary>,
    pub payslips: Collection<Payslip>,

    pub employee_options: Vec<Employee>,
    pub department_options: Vec<Department>,
    pub job_title_options: Vec<JobTitle>,
    pub leave_type_options: Vec<LeaveType>,

    pub employee_form: EmployeeForm,
    pub catalog_form: CatalogForm,
    pub leave_type_form: LeaveTypeForm,
    pub leave_request_form: LeaveRequestForm,
    pub salary_form: SalaryForm,
    pub check_form: CheckForm,
    detail_seq: RequestSeq,

    pub employee_search: String,
    pub employee_department_filter: Option<i64>,
    pub employee_active_filter: Option<bool>,
    pub department_search: String,
    pub job_title_search: String,
    pub attendance_date_input: String,
    pub attendance_search: String,
    pub leave_tab: LeaveTab,
    pub leave_status_filter: Option<LeaveStatus>,
    pub leave_search: String,
    pub payroll_tab: PayrollTab,
    pub salary_search: String,
    pub payslip_period_filter: String,
    pub payslip_status_filter: Option<PayslipStatus>,

    pub reject_target: Option<(i64, String)>,
    pub reject_reason_input: String,

    pub generate_dialog_open: bool,
    pub pay_period_input: String,

    pub report_kind: ReportKind,
    pub report_filter: ReportFilter,
    pub report_data: ReportData,
    pub report_loading: bool,
    report_seq: RequestSeq,

    pub dashboard_counts: Option<DashboardCounts>,
    dashboard_seq: RequestSeq,

    pub show_delete_confirm: bool,
    pub delete_target: Option<DeleteTarget>,

    pub notices: Vec<Notice>,
    pub log_entries: Vec<LogEntry>,

    pub server_test_status: Option<std::result::Result<(), String>>,
    pub server_testing: bool,
}

impl App {
    pub fn new(rt: Runtime, api: ApiClient, config: AppConfig, config_path: PathBuf) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let today = Local::now().date_naive();

        let mut app = Self {
            rt,
            api,
            tx,
            rx,
            config,
            config_path,
            config_modified: false,
            current_panel: Panel::Dashboard,
            employees: Collection::default(),
            departments: Collection::default(),
            job_titles: Collection::default(),
            attendance: Collection::default(),
            leave_requests: Collection::default(),
            leave_types: Collection::default(),
            salaries: Collection::default(),
            payslips: Collection::default(),
            employee_options: Vec::new(),
            department_options: Vec::new(),
            job_title_options: Vec::new(),
            leave_type_options: Vec::new(),
            employee_form: EmployeeForm::default(),
            catalog_form: CatalogForm::default(),
            leave_type_form: LeaveTypeForm::default(),
            leave_request_form: LeaveRequestForm::default(),
            salary_form: SalaryForm::default(),
            check_form: CheckForm::default(),
            detail_seq: RequestSeq::default(),
            employee_search: String::new(),
            employee_department_filter: None,
            employee_active_filter: None,
            department_search: String::new(),
            job_title_search: String::new(),
            attendance_date_input: today.format("%Y-%m-%d").to_string(),
            attendance_search: String::new(),
            leave_tab: LeaveTab::default(),
            leave_status_filter: None,
            leave_search: String::new(),
            payroll_tab: PayrollTab::default(),
            salary_search: String::new(),
            payslip_period_filter: String::new(),
            payslip_status_filter: None,
            reject_target: None,
            reject_reason_input: String::new(),
            generate_dialog_open: false,
            pay_period_input: String::new(),
            report_kind: ReportKind::Attendance,
            report_filter: ReportFilter::default(),
            report_data: ReportData::None,
            report_loading: false,
            report_seq: RequestSeq::default(),
            dashboard_counts: None,
            dashboard_seq: RequestSeq::default(),
            show_delete_confirm: false,
            delete_target: None,
            notices: Vec::new(),
            log_entries: Vec::new(),
            server_test_status: None,
            server_testing: false,
        };

        app.log_info("Application started");
        app.load_dashboard();
        app
    }

    // ========== Logging and notifications ==========

    fn log(&mut self, level: LogLevel, message: String) {
        match level {
            LogLevel::Error => error!("{}", message),
            LogLevel::Warning => warn!("{}", message),
            _ => info!("{}", message),
        }
        self.log_entries.push(LogEntry {
            timestamp: Local::now(),
            level,
            message,
        });
        if self.log_entries.len() > MAX_LOG_ENTRIES {
            let excess = self.log_entries.len() - MAX_LOG_ENTRIES;
            self.log_entries.drain(..excess);
        }
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message.into());
    }

    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message.into());
    }

    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message.into());
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message.into());
    }

    /// Toast a success and record it in the activity log.
    pub fn notify_success(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.log(LogLevel::Success, text.clone());
        self.notices.push(Notice {
            level: LogLevel::Success,
            text,
            created: Instant::now(),
        });
    }

    /// Toast an error and record it in the activity log.
    pub fn notify_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.log(LogLevel::Error, text.clone());
        self.notices.push(Notice {
            level: LogLevel::Error,
            text,
            created: Instant::now(),
        });
    }

    // ========== Collection loaders ==========

    /// List query for a table page, carrying the configured page size.
    fn page_query(&self, page: u32) -> ListQuery {
        ListQuery::page(page).filter("per_page", self.config.ui.rows_per_page_hint)
    }

    pub fn load_employees(&mut self, page: u32) {
        let seq = self.employees.begin();
        let mut query = self.page_query(page).search(&self.employee_search);
        if let Some(department_id) = self.employee_department_filter {
            query = query.filter("department_id", department_id);
        }
        if let Some(active) = self.employee_active_filter {
            query = query.filter("is_active", active);
        }
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let _ = tx.send(UiMessage::EmployeesPage(seq, api.fetch_list(&query).await));
        });
    }

    pub fn load_departments(&mut self, page: u32) {
        let seq = self.departments.begin();
        let query = self.page_query(page).search(&self.department_search);
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let _ = tx.send(UiMessage::DepartmentsPage(seq, api.fetch_list(&query).await));
        });
    }

    pub fn load_job_titles(&mut self, page: u32) {
        let seq = self.job_titles.begin();
        let query = self.page_query(page).search(&self.job_title_search);
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let _ = tx.send(UiMessage::JobTitlesPage(seq, api.fetch_list(&query).await));
        });
    }

    pub fn load_attendance(&mut self, page: u32) {
        let seq = self.attendance.begin();
        let mut query = self.page_query(page).search(&self.attendance_search);
        if let Some(date) = super::forms::parse_flexible_date(&self.attendance_date_input) {
            query = query.filter("date", date.format("%Y-%m-%d"));
        }
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let _ = tx.send(UiMessage::AttendancePage(seq, api.fetch_list(&query).await));
        });
    }

    pub fn load_leave_requests(&mut self, page: u32) {
        let seq = self.leave_requests.begin();
        let mut query = self.page_query(page).search(&self.leave_search);
        if let Some(status) = self.leave_status_filter {
            query = query.filter("status", status.as_str());
        }
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let _ = tx.send(UiMessage::LeaveRequestsPage(seq, api.fetch_list(&query).await));
        });
    }

    pub fn load_leave_types(&mut self, page: u32) {
        let seq = self.leave_types.begin();
        let query = self.page_query(page);
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let _ = tx.send(UiMessage::LeaveTypesPage(seq, api.fetch_list(&query).await));
        });
    }

    pub fn load_salaries(&mut self, page: u32) {
        let seq = self.salaries.begin();
        let query = self.page_query(page).search(&self.salary_search);
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let _ = tx.send(UiMessage::SalariesPage(seq, api.fetch_list(&query).await));
        });
    }

    pub fn load_payslips(&mut self, page: u32) {
        let seq = self.payslips.begin();
        let mut query = self.page_query(page);
        let period = self.payslip_period_filter.trim();
        if !period.is_empty() {
            query = query.filter("pay_period", period);
        }
        if let Some(status) = self.payslip_status_filter {
            query = query.filter("status", status.as_str());
        }
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let _ = tx.send(UiMessage::PayslipsPage(seq, api.fetch_list(&query).await));
        });
    }

    // ========== Combo box option loaders ==========

    pub fn load_employee_options(&mut self) {
        let query = ListQuery::page(1)
            .filter("per_page", PICKER_PAGE_SIZE)
            .filter("is_active", true);
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let result = api.fetch_list::<Employee>(&query).await.map(|p| p.items);
            let _ = tx.send(UiMessage::EmployeeOptions(result));
        });
    }

    pub fn load_department_options(&mut self) {
        let query = ListQuery::page(1).filter("per_page", PICKER_PAGE_SIZE);
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let result = api.fetch_list::<Department>(&query).await.map(|p| p.items);
            let _ = tx.send(UiMessage::DepartmentOptions(result));
        });
    }

    pub fn load_job_title_options(&mut self) {
        let query = ListQuery::page(1).filter("per_page", PICKER_PAGE_SIZE);
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let result = api.fetch_list::<JobTitle>(&query).await.map(|p| p.items);
            let _ = tx.send(UiMessage::JobTitleOptions(result));
        });
    }

    pub fn load_leave_type_options(&mut self) {
        let query = ListQuery::page(1)
            .filter("per_page", PICKER_PAGE_SIZE)
            .filter("is_active", true);
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let result = api.fetch_list::<LeaveType>(&query).await.map(|p| p.items);
            let _ = tx.send(UiMessage::LeaveTypeOptions(result));
        });
    }

    // ========== Dashboard and reports ==========

    pub fn load_dashboard(&mut self) {
        let seq = self.dashboard_seq.issue();
        let api = self.api.clone();
        let tx = self.tx.clone();
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        self.rt.spawn(async move {
            let result: Result<DashboardCounts> = async {
                let probe = ListQuery::page(1).filter("per_page", 1);
                let employees = api.fetch_list::<Employee>(&probe).await?;
                let attendance = api
                    .fetch_list::<AttendanceRecord>(&probe.clone().filter("date", &today))
                    .await?;
                let pending = api
                    .fetch_list::<LeaveRequest>(
                        &probe.clone().filter("status", LeaveStatus::Pending.as_str()),
                    )
                    .await?;
                Ok(DashboardCounts {
                    employees: employees.pagination.total,
                    today_attendance: attendance.pagination.total,
                    pending_leaves: pending.pagination.total,
                })
            }
            .await;
            let _ = tx.send(UiMessage::DashboardLoaded(seq, result));
        });
    }

    pub fn generate_report(&mut self) {
        if self.report_filter.end_date < self.report_filter.start_date {
            self.notify_error("End date must be on or after the start date");
            return;
        }
        let seq = self.report_seq.issue();
        self.report_loading = true;
        self.log_info(format!(
            "Generating {} report",
            self.report_kind.label().to_lowercase()
        ));

        let kind = self.report_kind;
        let from = self.report_filter.start_date;
        let to = self.report_filter.end_date;
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let result = match kind {
                ReportKind::Attendance => {
                    api.attendance_report(from, to).await.map(ReportData::Attendance)
                }
                ReportKind::Leave => api.leave_report(from, to).await.map(ReportData::Leave),
                ReportKind::Payroll => {
                    api.payroll_report(from, to).await.map(ReportData::Payroll)
                }
            };
            let _ = tx.send(UiMessage::ReportLoaded(seq, result));
        });
    }

    /// Export the generated report rows to an Excel file picked by the user.
    pub fn export_report(&mut self) {
        if self.report_data.is_empty() {
            self.notify_error("Generate a report with at least one row before exporting");
            return;
        }
        let filename = export::generate_report_filename(
            self.report_kind,
            self.report_filter.start_date,
            self.report_filter.end_date,
        );
        let Some(path) = export::show_save_dialog(&filename, &self.config.export.default_dir)
        else {
            return;
        };
        let result = match &self.report_data {
            ReportData::None => return,
            ReportData::Attendance(rows) => export::export_attendance_report_to_excel(rows, &path),
            ReportData::Leave(rows) => export::export_leave_report_to_excel(rows, &path),
            ReportData::Payroll(rows) => export::export_payroll_report_to_excel(rows, &path),
        };
        match result {
            Ok(()) => self.notify_success(format!("Report exported to {}", path.display())),
            Err(e) => self.notify_error(format!("Export failed: {e}")),
        }
    }

    /// Export the currently loaded employee page to an Excel file.
    pub fn export_employees(&mut self) {
        if self.employees.rows.is_empty() {
            self.notify_error("No employees loaded to export");
            return;
        }
        let filename = export::generate_export_filename("employees");
        let Some(path) = export::show_save_dialog(&filename, &self.config.export.default_dir)
        else {
            return;
        };
        match export::export_employees_to_excel(&self.employees.rows, &path) {
            Ok(()) => self.notify_success(format!("Employees exported to {}", path.display())),
            Err(e) => self.notify_error(format!("Export failed: {e}")),
        }
    }

    // ========== Edit dialog detail fetches ==========

    pub fn open_employee_edit(&mut self, id: i64) {
        self.employee_form = EmployeeForm::loading(id);
        let seq = self.detail_seq.issue();
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let _ = tx.send(UiMessage::EmployeeDetail(seq, api.fetch_one(id).await));
        });
    }

    pub fn open_catalog_edit(&mut self, kind: CatalogKind, id: i64) {
        self.catalog_form = CatalogForm::loading(id);
        let seq = self.detail_seq.issue();
        let api = self.api.clone();
        let tx = self.tx.clone();
        match kind {
            CatalogKind::Departments => {
                self.rt.spawn(async move {
                    let _ = tx.send(UiMessage::DepartmentDetail(seq, api.fetch_one(id).await));
                });
            }
            CatalogKind::JobTitles => {
                self.rt.spawn(async move {
                    let _ = tx.send(UiMessage::JobTitleDetail(seq, api.fetch_one(id).await));
                });
            }
        }
    }

    pub fn open_leave_type_edit(&mut self, id: i64) {
        self.leave_type_form = LeaveTypeForm::loading(id);
        let seq = self.detail_seq.issue();
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let _ = tx.send(UiMessage::LeaveTypeDetail(seq, api.fetch_one(id).await));
        });
    }

    pub fn open_leave_request_edit(&mut self, id: i64) {
        self.leave_request_form = LeaveRequestForm::loading(id);
        let seq = self.detail_seq.issue();
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let _ = tx.send(UiMessage::LeaveRequestDetail(seq, api.fetch_one(id).await));
        });
    }

    pub fn open_salary_edit(&mut self, id: i64) {
        self.salary_form = SalaryForm::loading(id);
        let seq = self.detail_seq.issue();
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let _ = tx.send(UiMessage::SalaryDetail(seq, api.fetch_one(id).await));
        });
    }

    // ========== Mutations ==========

    fn spawn_mutation<F>(&mut self, kind: ResourceKind, fut: F)
    where
        F: Future<Output = Result<ApiMessage>> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let _ = tx.send(UiMessage::Mutated(kind, fut.await));
        });
    }

    pub fn save_employee(&mut self, id: Option<i64>, payload: EmployeePayload) {
        let api = self.api.clone();
        self.spawn_mutation(ResourceKind::Employee, async move {
            match id {
                Some(id) => api.update::<Employee, _>(id, &payload).await,
                None => api.create::<Employee, _>(&payload).await,
            }
        });
    }

    pub fn save_catalog(&mut self, kind: CatalogKind, id: Option<i64>, payload: CatalogPayload) {
        let api = self.api.clone();
        match kind {
            CatalogKind::Departments => {
                self.spawn_mutation(ResourceKind::Department, async move {
                    match id {
                        Some(id) => api.update::<Department, _>(id, &payload).await,
                        None => api.create::<Department, _>(&payload).await,
                    }
                });
            }
            CatalogKind::JobTitles => {
                self.spawn_mutation(ResourceKind::JobTitle, async move {
                    match id {
                        Some(id) => api.update::<JobTitle, _>(id, &payload).await,
                        None => api.create::<JobTitle, _>(&payload).await,
                    }
                });
            }
        }
    }

    pub fn save_leave_type(&mut self, id: Option<i64>, payload: LeaveTypePayload) {
        let api = self.api.clone();
        self.spawn_mutation(ResourceKind::LeaveType, async move {
            match id {
                Some(id) => api.update::<LeaveType, _>(id, &payload).await,
                None => api.create::<LeaveType, _>(&payload).await,
            }
        });
    }

    pub fn save_leave_request(&mut self, id: Option<i64>, payload: LeaveRequestPayload) {
        let api = self.api.clone();
        self.spawn_mutation(ResourceKind::LeaveRequest, async move {
            match id {
                Some(id) => api.update::<LeaveRequest, _>(id, &payload).await,
                None => api.create::<LeaveRequest, _>(&payload).await,
            }
        });
    }

    pub fn save_salary(&mut self, id: Option<i64>, payload: SalaryPayload) {
        let api = self.api.clone();
        self.spawn_mutation(ResourceKind::Salary, async move {
            match id {
                Some(id) => api.update::<Salary, _>(id, &payload).await,
                None => api.create::<Salary, _>(&payload).await,
            }
        });
    }

    pub fn approve_leave_request(&mut self, id: i64) {
        self.log_info(format!("Approving leave request #{id}"));
        let api = self.api.clone();
        self.spawn_mutation(ResourceKind::LeaveRequest, async move {
            let change = StatusChange::to(LeaveStatus::Approved.as_str());
            api.change_status::<LeaveRequest>(id, &change).await
        });
    }

    pub fn reject_leave_request(&mut self, id: i64, reason: String) {
        self.log_info(format!("Rejecting leave request #{id}"));
        let api = self.api.clone();
        self.spawn_mutation(ResourceKind::LeaveRequest, async move {
            let change = StatusChange::with_reason(LeaveStatus::Rejected.as_str(), reason);
            api.change_status::<LeaveRequest>(id, &change).await
        });
    }

    pub fn mark_payslip_paid(&mut self, id: i64) {
        self.log_info(format!("Marking payslip #{id} as paid"));
        let api = self.api.clone();
        self.spawn_mutation(ResourceKind::Payslip, async move {
            let change = StatusChange::to(PayslipStatus::Paid.as_str());
            api.change_status::<Payslip>(id, &change).await
        });
    }

    pub fn submit_check(&mut self, checking_out: bool, payload: CheckPayload) {
        let api = self.api.clone();
        self.spawn_mutation(ResourceKind::Attendance, async move {
            if checking_out {
                api.check_out(&payload).await
            } else {
                api.check_in(&payload).await
            }
        });
    }

    pub fn generate_payslips(&mut self, pay_period: String) {
        self.log_info(format!("Generating payslips for {pay_period}"));
        let api = self.api.clone();
        self.spawn_mutation(ResourceKind::Payslip, async move {
            api.create::<Payslip, _>(&GeneratePayslips { pay_period }).await
        });
    }

    // ========== Deletion ==========

    pub fn request_delete(&mut self, target: DeleteTarget) {
        self.delete_target = Some(target);
        self.show_delete_confirm = true;
    }

    pub fn confirm_delete(&mut self) {
        if let Some(target) = self.delete_target.take() {
            self.log_info(format!("Deleting {}", target.describe()));
            let id = target.id();
            let api = self.api.clone();
            match target {
                DeleteTarget::Employee(..) => {
                    self.spawn_mutation(ResourceKind::Employee, async move {
                        api.remove::<Employee>(id).await
                    });
                }
                DeleteTarget::Department(..) => {
                    self.spawn_mutation(ResourceKind::Department, async move {
                        api.remove::<Department>(id).await
                    });
                }
                DeleteTarget::JobTitle(..) => {
                    self.spawn_mutation(ResourceKind::JobTitle, async move {
                        api.remove::<JobTitle>(id).await
                    });
                }
                DeleteTarget::LeaveType(..) => {
                    self.spawn_mutation(ResourceKind::LeaveType, async move {
                        api.remove::<LeaveType>(id).await
                    });
                }
                DeleteTarget::LeaveRequest(..) => {
                    self.spawn_mutation(ResourceKind::LeaveRequest, async move {
                        api.remove::<LeaveRequest>(id).await
                    });
                }
                DeleteTarget::Salary(..) => {
                    self.spawn_mutation(ResourceKind::Salary, async move {
                        api.remove::<Salary>(id).await
                    });
                }
            }
        }
        self.show_delete_confirm = false;
    }

    // ========== Settings ==========

    /// Ping the server named in the settings form, without saving it first.
    pub fn test_server_connection(&mut self) {
        self.server_testing = true;
        self.server_test_status = None;
        self.log_info(format!(
            "Testing connection to {}",
            self.config.server.base_url
        ));

        let api = ApiClient::new(&self.config.server.base_url, Duration::from_secs(5));
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let result = match api.ping().await {
                Ok(true) => Ok(()),
                Ok(false) => Err("Server answered with an error status".to_string()),
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(UiMessage::ServerTestResult(result));
        });
    }

    pub fn save_config(&mut self) {
        match self.config.save(&self.config_path) {
            Ok(()) => {
                self.config_modified = false;
                self.api = ApiClient::new(
                    &self.config.server.base_url,
                    Duration::from_secs(self.config.server.timeout_secs),
                );
                self.notify_success("Settings saved");
            }
            Err(e) => self.notify_error(format!("Failed to save settings: {e}")),
        }
    }

    // ========== Navigation ==========

    /// Switch panels. In-flight fetches of the departing panel are orphaned
    /// so their results cannot land in a panel the user already left, and the
    /// target panel starts its own fresh loads.
    pub fn navigate(&mut self, panel: Panel) {
        match self.current_panel {
            Panel::Dashboard => self.dashboard_seq.invalidate(),
            Panel::Employees => self.employees.invalidate(),
            Panel::Departments => self.departments.invalidate(),
            Panel::JobTitles => self.job_titles.invalidate(),
            Panel::Attendance => self.attendance.invalidate(),
            Panel::Leave => {
                self.leave_requests.invalidate();
                self.leave_types.invalidate();
            }
            Panel::Payroll => {
                self.salaries.invalidate();
                self.payslips.invalidate();
            }
            Panel::Reports => {
                self.report_seq.invalidate();
                self.report_loading = false;
                self.report_data = ReportData::None;
            }
            Panel::Settings => {}
        }

        self.current_panel = panel;
        match panel {
            Panel::Dashboard => self.load_dashboard(),
            Panel::Employees => {
                self.load_employees(1);
                self.load_department_options();
                self.load_job_title_options();
            }
            Panel::Departments => self.load_departments(1),
            Panel::JobTitles => self.load_job_titles(1),
            Panel::Attendance => {
                self.load_attendance(1);
                self.load_employee_options();
            }
            Panel::Leave => {
                self.load_leave_requests(1);
                self.load_leave_types(1);
                self.load_employee_options();
                self.load_leave_type_options();
            }
            Panel::Payroll => {
                self.load_salaries(1);
                self.load_payslips(1);
                self.load_employee_options();
            }
            Panel::Reports => {}
            Panel::Settings => {}
        }
    }

    // ========== Channel draining ==========

    fn close_form_for(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Employee => self.employee_form.reset(),
            ResourceKind::Department | ResourceKind::JobTitle => self.catalog_form.reset(),
            ResourceKind::Attendance => self.check_form.reset(),
            ResourceKind::LeaveRequest => {
                self.leave_request_form.reset();
                self.reject_target = None;
                self.reject_reason_input.clear();
            }
            ResourceKind::LeaveType => self.leave_type_form.reset(),
            ResourceKind::Salary => self.salary_form.reset(),
            ResourceKind::Payslip => {
                self.generate_dialog_open = false;
                self.pay_period_input.clear();
            }
        }
    }

    fn reload_for(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Employee => {
                let page = self.employees.current_page();
                self.load_employees(page);
            }
            ResourceKind::Department => {
                let page = self.departments.current_page();
                self.load_departments(page);
            }
            ResourceKind::JobTitle => {
                let page = self.job_titles.current_page();
                self.load_job_titles(page);
            }
            ResourceKind::Attendance => {
                let page = self.attendance.current_page();
                self.load_attendance(page);
            }
            ResourceKind::LeaveRequest => {
                let page = self.leave_requests.current_page();
                self.load_leave_requests(page);
            }
            ResourceKind::LeaveType => {
                let page = self.leave_types.current_page();
                self.load_leave_types(page);
            }
            ResourceKind::Salary => {
                let page = self.salaries.current_page();
                self.load_salaries(page);
            }
            ResourceKind::Payslip => {
                let page = self.payslips.current_page();
                self.load_payslips(page);
            }
        }
    }

    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::EmployeesPage(seq, result) => match result {
                    Ok(page) => {
                        self.employees.commit(seq, page);
                    }
                    Err(e) => {
                        if self.employees.fail(seq) {
                            self.notify_error(format!("Failed to load employees: {e}"));
                        }
                    }
                },
                UiMessage::DepartmentsPage(seq, result) => match result {
                    Ok(page) => {
                        self.departments.commit(seq, page);
                    }
                    Err(e) => {
                        if self.departments.fail(seq) {
                            self.notify_error(format!("Failed to load departments: {e}"));
                        }
                    }
                },
                UiMessage::JobTitlesPage(seq, result) => match result {
                    Ok(page) => {
                        self.job_titles.commit(seq, page);
                    }
                    Err(e) => {
                        if self.job_titles.fail(seq) {
                            self.notify_error(format!("Failed to load job titles: {e}"));
                        }
                    }
                },
                UiMessage::AttendancePage(seq, result) => match result {
                    Ok(page) => {
                        self.attendance.commit(seq, page);
                    }
                    Err(e) => {
                        if self.attendance.fail(seq) {
                            self.notify_error(format!("Failed to load attendance: {e}"));
                        }
                    }
                },
                UiMessage::LeaveRequestsPage(seq, result) => match result {
                    Ok(page) => {
                        self.leave_requests.commit(seq, page);
                    }
                    Err(e) => {
                        if self.leave_requests.fail(seq) {
                            self.notify_error(format!("Failed to load leave requests: {e}"));
                        }
                    }
                },
                UiMessage::LeaveTypesPage(seq, result) => match result {
                    Ok(page) => {
                        self.leave_types.commit(seq, page);
                    }
                    Err(e) => {
                        if self.leave_types.fail(seq) {
                            self.notify_error(format!("Failed to load leave types: {e}"));
                        }
                    }
                },
                UiMessage::SalariesPage(seq, result) => match result {
                    Ok(page) => {
                        self.salaries.commit(seq, page);
                    }
                    Err(e) => {
                        if self.salaries.fail(seq) {
                            self.notify_error(format!("Failed to load salaries: {e}"));
                        }
                    }
                },
                UiMessage::PayslipsPage(seq, result) => match result {
                    Ok(page) => {
                        self.payslips.commit(seq, page);
                    }
                    Err(e) => {
                        if self.payslips.fail(seq) {
                            self.notify_error(format!("Failed to load payslips: {e}"));
                        }
                    }
                },

                UiMessage::EmployeeOptions(result) => match result {
                    Ok(options) => self.employee_options = options,
                    Err(e) => self.log_error(format!("Failed to load employee options: {e}")),
                },
                UiMessage::DepartmentOptions(result) => match result {
                    Ok(options) => self.department_options = options,
                    Err(e) => self.log_error(format!("Failed to load department options: {e}")),
                },
                UiMessage::JobTitleOptions(result) => match result {
                    Ok(options) => self.job_title_options = options,
                    Err(e) => self.log_error(format!("Failed to load job title options: {e}")),
                },
                UiMessage::LeaveTypeOptions(result) => match result {
                    Ok(options) => self.leave_type_options = options,
                    Err(e) => self.log_error(format!("Failed to load leave type options: {e}")),
                },

                UiMessage::EmployeeDetail(seq, result) => {
                    if self.detail_seq.is_current(seq) {
                        match result {
                            Ok(employee) => self.employee_form.fill(&employee),
                            Err(e) if e.is_not_found() => self.employee_form.mark_missing(),
                            Err(e) => {
                                self.employee_form.reset();
                                self.notify_error(e.to_string());
                            }
                        }
                    }
                }
                UiMessage::DepartmentDetail(seq, result) => {
                    if self.detail_seq.is_current(seq) {
                        match result {
                            Ok(dept) => self.catalog_form.fill_department(&dept),
                            Err(e) if e.is_not_found() => self.catalog_form.mark_missing(),
                            Err(e) => {
                                self.catalog_form.reset();
                                self.notify_error(e.to_string());
                            }
                        }
                    }
                }
                UiMessage::JobTitleDetail(seq, result) => {
                    if self.detail_seq.is_current(seq) {
                        match result {
                            Ok(title) => self.catalog_form.fill_job_title(&title),
                            Err(e) if e.is_not_found() => self.catalog_form.mark_missing(),
                            Err(e) => {
                                self.catalog_form.reset();
                                self.notify_error(e.to_string());
                            }
                        }
                    }
                }
                UiMessage::LeaveTypeDetail(seq, result) => {
                    if self.detail_seq.is_current(seq) {
                        match result {
                            Ok(leave_type) => self.leave_type_form.fill(&leave_type),
                            Err(e) if e.is_not_found() => self.leave_type_form.mark_missing(),
                            Err(e) => {
                                self.leave_type_form.reset();
                                self.notify_error(e.to_string());
                            }
                        }
                    }
                }
                UiMessage::LeaveRequestDetail(seq, result) => {
                    if self.detail_seq.is_current(seq) {
                        match result {
                            Ok(request) => self.leave_request_form.fill(&request),
                            Err(e) if e.is_not_found() => self.leave_request_form.mark_missing(),
                            Err(e) => {
                                self.leave_request_form.reset();
                                self.notify_error(e.to_string());
                            }
                        }
                    }
                }
                UiMessage::SalaryDetail(seq, result) => {
                    if self.detail_seq.is_current(seq) {
                        match result {
                            Ok(salary) => self.salary_form.fill(&salary),
                            Err(e) if e.is_not_found() => self.salary_form.mark_missing(),
                            Err(e) => {
                                self.salary_form.reset();
                                self.notify_error(e.to_string());
                            }
                        }
                    }
                }

                UiMessage::Mutated(kind, result) => match result {
                    Ok(ack) => {
                        self.notify_success(ack.message);
                        self.close_form_for(kind);
                        self.reload_for(kind);
                    }
                    Err(e) => self.notify_error(e.to_string()),
                },

                UiMessage::ReportLoaded(seq, result) => {
                    if self.report_seq.is_current(seq) {
                        self.report_loading = false;
                        match result {
                            Ok(data) => {
                                if data.is_empty() {
                                    self.log_warning("Report has no rows for the selected range");
                                } else {
                                    self.log_info(format!("Report ready with {} rows", data.len()));
                                }
                                self.report_data = data;
                            }
                            Err(e) => self.notify_error(format!("Failed to generate report: {e}")),
                        }
                    }
                }

                UiMessage::DashboardLoaded(seq, result) => {
                    if self.dashboard_seq.is_current(seq) {
                        match result {
                            Ok(counts) => self.dashboard_counts = Some(counts),
                            Err(e) => self.log_error(format!("Failed to load dashboard: {e}")),
                        }
                    }
                }

                UiMessage::ServerTestResult(result) => {
                    self.server_testing = false;
                    match &result {
                        Ok(()) => self.log_success("Server connection test passed"),
                        Err(e) => self.log_error(format!("Server connection test failed: {e}")),
                    }
                    self.server_test_status = Some(result);
                }
            }
        }
    }

    fn is_busy(&self) -> bool {
        self.employees.loading
            || self.departments.loading
            || self.job_titles.loading
            || self.attendance.loading
            || self.leave_requests.loading
            || self.leave_types.loading
            || self.salaries.loading
            || self.payslips.loading
            || self.report_loading
            || self.server_testing
    }

    // ========== Chrome ==========

    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("Server", |ui| {
                    if ui.button("Test Connection").clicked() {
                        self.test_server_connection();
                        ui.close();
                    }
                    if ui.button("Settings").clicked() {
                        self.navigate(Panel::Settings);
                        ui.close();
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Dashboard").clicked() {
                        self.navigate(Panel::Dashboard);
                        ui.close();
                    }
                    if ui.button("Reports").clicked() {
                        self.navigate(Panel::Reports);
                        ui.close();
                    }
                });
            });
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        let busy = self.is_busy();
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(format!("Server: {}", self.config.server.base_url));
                    ui.separator();
                    match &self.server_test_status {
                        Some(Ok(())) => ui.colored_label(colors::SUCCESS, "Connected"),
                        Some(Err(_)) => ui.colored_label(colors::ERROR, "Unreachable"),
                        None => ui.colored_label(colors::NEUTRAL, "Not tested"),
                    };
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if busy {
                            ui.spinner();
                            ui.label("Working...");
                        }
                    });
                });
            });
    }

    fn show_notices(&mut self, ctx: &egui::Context) {
        self.notices.retain(|n| n.created.elapsed() < NOTICE_TTL);
        if self.notices.is_empty() {
            return;
        }
        ctx.request_repaint_after(Duration::from_millis(250));

        egui::Area::new(egui::Id::new("notices"))
            .anchor(egui::Align2::RIGHT_TOP, [-12.0, 40.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for notice in &self.notices {
                    let color = notice.level.color();
                    egui::Frame::new()
                        .fill(ui.style().visuals.extreme_bg_color)
                        .stroke(egui::Stroke::new(1.0, color))
                        .inner_margin(egui::Margin::same(10))
                        .corner_radius(egui::CornerRadius::same(6))
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            ui.colored_label(color, &notice.text);
                        });
                    ui.add_space(6.0);
                }
            });
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if self.show_delete_confirm {
            let description = self
                .delete_target
                .as_ref()
                .map(|t| t.describe())
                .unwrap_or_default();
            let mut confirmed = false;
            let mut cancelled = false;

            egui::Window::new("Confirm Delete")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.add_space(5.0);
                    ui.label(format!("Delete {description}?"));
                    ui.label(RichText::new("This cannot be undone.").weak());
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if components::styled_button(ui, "Cancel").clicked() {
                            cancelled = true;
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let delete = egui::Button::new(
                                RichText::new("Delete").color(Color32::WHITE),
                            )
                            .fill(colors::ERROR);
                            if ui.add(delete).clicked() {
                                confirmed = true;
                            }
                        });
                    });
                });

            if confirmed {
                self.confirm_delete();
            }
            if cancelled {
                self.show_delete_confirm = false;
                self.delete_target = None;
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_async_results();

        if self.is_busy() {
            ctx.request_repaint();
        }

        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);
        self.show_dialogs(ctx);
        self.show_notices(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.current_panel {
            Panel::Dashboard => {
                if let Some(next) = dashboard::show(self, ui) {
                    self.navigate(next);
                }
            }
            Panel::Employees => {
                if employees_panel::show(self, ui) {
                    self.navigate(Panel::Dashboard);
                }
            }
            Panel::Departments => {
                if catalog_panel::show(self, ui, CatalogKind::Departments) {
                    self.navigate(Panel::Dashboard);
                }
            }
            Panel::JobTitles => {
                if catalog_panel::show(self, ui, CatalogKind::JobTitles) {
                    self.navigate(Panel::Dashboard);
                }
            }
            Panel::Attendance => {
                if attendance_panel::show(self, ui) {
                    self.navigate(Panel::Dashboard);
                }
            }
            Panel::Leave => {
                if leave_panel::show(self, ui) {
                    self.navigate(Panel::Dashboard);
                }
            }
            Panel::Payroll => {
                if payroll_panel::show(self, ui) {
                    self.navigate(Panel::Dashboard);
                }
            }
            Panel::Reports => {
                if reports_panel::show(self, ui) {
                    self.navigate(Panel::Dashboard);
                }
            }
            Panel::Settings => {
                if settings_panel::show(self, ui) {
                    self.navigate(Panel::Dashboard);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_filter_defaults_to_current_month() {
        let filter = ReportFilter::default();
        assert!(filter.start_date <= filter.end_date);
        assert_eq!(filter.start_date.day(), 1);
        assert_eq!(
            filter.start_input,
            filter.start_date.format("%Y-%m-%d").to_string()
        );
    }

    #[test]
    fn test_delete_target_description() {
        let target = DeleteTarget::Employee(3, "Ahmed Samir".to_string());
        assert_eq!(target.describe(), "employee \"Ahmed Samir\"");
        assert_eq!(target.id(), 3);
    }
}
