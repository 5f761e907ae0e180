//! Human resources panel: departments, employees, and bonuses.

use chrono::{Datelike, Local, NaiveDate};
use eframe::egui::{RichText, Ui};

use super::components::{
    back_button, checkbox_row, choice_row, date_row, format_amount, number_row, panel_header, password_row, text_row,
};
use super::crud::{CrudPage, EntityForm, PageContext};
use crate::config::UiConfig;
use crate::error::{AppError, Result};
use crate::models::hr::{demo_bonuses, demo_departments, demo_employees};
use crate::models::{Bonus, BonusStatus, Department, Employee};
use crate::table::{Column, FilterOption, Fixed, RecordId};
use crate::validation;

const MIN_PASSWORD_LEN: usize = 6;

/// HR sub-page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HrTab {
    #[default]
    Departments,
    Employees,
    Bonuses,
}

impl HrTab {
    const ALL: [Self; 3] = [Self::Departments, Self::Employees, Self::Bonuses];

    pub fn name(self) -> &'static str {
        match self {
            HrTab::Departments => "Departments",
            HrTab::Employees => "Employees",
            HrTab::Bonuses => "Bonuses",
        }
    }
}

// Departments

fn department_size(d: &Department) -> String {
    let size = match d.employee_count {
        0 => "Empty",
        1..=5 => "Small",
        6..=15 => "Medium",
        _ => "Large",
    };
    size.to_string()
}

pub fn department_columns() -> Vec<Column<Department>> {
    vec![
        Column::field("Code", "code").sortable().fixed(Fixed::Left).width(70.0),
        Column::field("Name", "name").sortable().width(160.0),
        Column::field("Manager", "manager")
            .render(|d: &Department| {
                if d.manager.is_empty() {
                    "(vacant)".to_string()
                } else {
                    d.manager.clone()
                }
            })
            .sortable(),
        Column::field("Location", "location").filters(vec![
            FilterOption::same("Head Office"),
            FilterOption::same("Warehouse A"),
            FilterOption::same("Lab Campus"),
        ]),
        Column::field("Employees", "employee_count").sortable().width(90.0),
        Column::computed("Size", department_size)
            .filters(["Empty", "Small", "Medium", "Large"].into_iter().map(FilterOption::same).collect())
            .fixed(Fixed::Right)
            .width(80.0),
    ]
}

#[derive(Default)]
pub struct DepartmentForm {
    code: String,
    name: String,
    manager: String,
    location: String,
    employee_count: String,
}

impl EntityForm<Department> for DepartmentForm {
    fn from_entity(d: &Department) -> Self {
        Self {
            code: d.code.clone(),
            name: d.name.clone(),
            manager: d.manager.clone(),
            location: d.location.clone(),
            employee_count: d.employee_count.to_string(),
        }
    }

    fn build(&self, id: RecordId) -> Result<Department> {
        let employee_count = validation::count("Employees", &self.employee_count)?;
        Ok(Department {
            id,
            code: validation::required("Code", &self.code)?.to_uppercase(),
            name: validation::required("Name", &self.name)?,
            manager: self.manager.trim().to_string(),
            location: validation::required("Location", &self.location)?,
            employee_count: u32::try_from(employee_count)
                .map_err(|_| AppError::validation("Employees is too large"))?,
        })
    }

    fn show(&mut self, ui: &mut Ui, read_only: bool) {
        text_row(ui, "Code", &mut self.code, read_only);
        text_row(ui, "Name", &mut self.name, read_only);
        text_row(ui, "Manager", &mut self.manager, read_only);
        text_row(ui, "Location", &mut self.location, read_only);
        number_row(ui, "Employees", &mut self.employee_count, read_only);
    }
}

// Employees

pub fn employee_columns() -> Vec<Column<Employee>> {
    vec![
        Column::field("Code", "code").sortable().fixed(Fixed::Left).width(80.0),
        Column::field("Name", "full_name").sortable().width(150.0),
        Column::field("Email", "email").width(200.0),
        Column::field("Department", "department").sortable().filters(vec![
            FilterOption::same("Finance"),
            FilterOption::same("Human Resources"),
            FilterOption::same("Operations"),
            FilterOption::same("Sales"),
            FilterOption::same("Research"),
        ]),
        Column::field("Position", "position"),
        Column::field("Salary", "salary")
            .render(|e: &Employee| format_amount(e.salary))
            .sortable()
            .width(110.0),
        Column::field("Hired", "hire_date").sortable().width(100.0),
        Column::computed("Portal", |e: &Employee| String::from(if e.portal_access { "Yes" } else { "No" })).width(60.0),
        Column::field("Status", "active")
            .filters(vec![FilterOption::same("Active"), FilterOption::same("Inactive")])
            .fixed(Fixed::Right)
            .width(80.0),
    ]
}

pub struct EmployeeForm {
    code: String,
    full_name: String,
    email: String,
    department: String,
    position: String,
    salary: String,
    hire_date: NaiveDate,
    active: bool,
    portal_access: bool,
    password: String,
    confirm_password: String,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            full_name: String::new(),
            email: String::new(),
            department: String::new(),
            position: String::new(),
            salary: String::new(),
            hire_date: Local::now().date_naive(),
            active: true,
            portal_access: false,
            password: String::new(),
            confirm_password: String::new(),
        }
    }
}

impl EntityForm<Employee> for EmployeeForm {
    fn from_entity(e: &Employee) -> Self {
        Self {
            code: e.code.clone(),
            full_name: e.full_name.clone(),
            email: e.email.clone(),
            department: e.department.clone(),
            position: e.position.clone(),
            salary: format!("{:.2}", e.salary),
            hire_date: e.hire_date,
            active: e.active,
            portal_access: e.portal_access,
            password: String::new(),
            confirm_password: String::new(),
        }
    }

    fn build(&self, id: RecordId) -> Result<Employee> {
        let code = validation::required("Code", &self.code)?;
        let full_name = validation::required("Full name", &self.full_name)?;
        let email = validation::email(&self.email)?;

        // A blank password keeps the current portal access.
        let setting_password = !self.password.is_empty() || !self.confirm_password.is_empty();
        if setting_password {
            validation::passwords_match(&self.password, &self.confirm_password)?;
            if self.password.chars().count() < MIN_PASSWORD_LEN {
                return Err(AppError::validation(format!(
                    "Password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
        }

        Ok(Employee {
            id,
            code,
            full_name,
            email,
            department: validation::required("Department", &self.department)?,
            position: self.position.trim().to_string(),
            salary: validation::non_negative_decimal("Salary", &self.salary)?,
            hire_date: self.hire_date,
            active: self.active,
            portal_access: self.portal_access || setting_password,
        })
    }

    fn show(&mut self, ui: &mut Ui, read_only: bool) {
        text_row(ui, "Code", &mut self.code, read_only);
        text_row(ui, "Full name", &mut self.full_name, read_only);
        text_row(ui, "Email", &mut self.email, read_only);
        text_row(ui, "Department", &mut self.department, read_only);
        text_row(ui, "Position", &mut self.position, read_only);
        number_row(ui, "Salary", &mut self.salary, read_only);
        date_row(ui, "Hire date", "employee_hired", &mut self.hire_date, read_only);
        checkbox_row(ui, "Active", &mut self.active, read_only);

        ui.label("Portal access:");
        ui.label(if self.portal_access { "Enabled" } else { "Not set" });
        ui.end_row();

        if !read_only {
            password_row(ui, "New password", &mut self.password, read_only);
            password_row(ui, "Confirm password", &mut self.confirm_password, read_only);
        }
    }
}

// Bonuses

fn bonus_quarter(b: &Bonus) -> String {
    format!("Q{} {}", b.awarded_on.month0() / 3 + 1, b.awarded_on.year())
}

pub fn bonus_columns() -> Vec<Column<Bonus>> {
    vec![
        Column::field("Employee", "employee").sortable().width(150.0),
        Column::field("Reason", "reason").width(200.0),
        Column::field("Amount", "amount")
            .render(|b: &Bonus| format_amount(b.amount))
            .sortable()
            .width(100.0),
        Column::field("Awarded", "awarded_on").sortable().width(100.0),
        Column::computed("Quarter", bonus_quarter).sort_with(|a: &Bonus, b: &Bonus| a.awarded_on.cmp(&b.awarded_on)),
        Column::field("Status", "status")
            .filters(BonusStatus::ALL.iter().map(|s| FilterOption::same(s.label())).collect())
            .fixed(Fixed::Right)
            .width(90.0),
    ]
}

pub struct BonusForm {
    employee: String,
    reason: String,
    amount: String,
    status: BonusStatus,
    awarded_on: NaiveDate,
}

impl Default for BonusForm {
    fn default() -> Self {
        Self {
            employee: String::new(),
            reason: String::new(),
            amount: String::new(),
            status: BonusStatus::Pending,
            awarded_on: Local::now().date_naive(),
        }
    }
}

impl EntityForm<Bonus> for BonusForm {
    fn from_entity(b: &Bonus) -> Self {
        Self {
            employee: b.employee.clone(),
            reason: b.reason.clone(),
            amount: format!("{:.2}", b.amount),
            status: b.status,
            awarded_on: b.awarded_on,
        }
    }

    fn build(&self, id: RecordId) -> Result<Bonus> {
        let amount = validation::non_negative_decimal("Amount", &self.amount)?;
        if amount == 0.0 {
            return Err(AppError::validation("Amount must be greater than zero"));
        }
        Ok(Bonus {
            id,
            employee: validation::required("Employee", &self.employee)?,
            reason: validation::required("Reason", &self.reason)?,
            amount,
            status: self.status,
            awarded_on: self.awarded_on,
        })
    }

    fn show(&mut self, ui: &mut Ui, read_only: bool) {
        text_row(ui, "Employee", &mut self.employee, read_only);
        text_row(ui, "Reason", &mut self.reason, read_only);
        number_row(ui, "Amount", &mut self.amount, read_only);
        choice_row(
            ui,
            "Status",
            "bonus_status",
            &mut self.status,
            &BonusStatus::ALL,
            |s| s.label().to_string(),
            read_only,
        );
        date_row(ui, "Awarded on", "bonus_awarded", &mut self.awarded_on, read_only);
    }
}

pub struct HrPanel {
    tab: HrTab,
    departments: CrudPage<Department, DepartmentForm>,
    employees: CrudPage<Employee, EmployeeForm>,
    bonuses: CrudPage<Bonus, BonusForm>,
}

impl HrPanel {
    pub fn new(config: &UiConfig) -> Self {
        let (page_size, width) = (config.default_page_size, config.modal_width);
        Self {
            tab: HrTab::default(),
            departments: CrudPage::new("Departments", department_columns(), demo_departments())
                .with_layout(page_size, width),
            employees: CrudPage::new("Employees", employee_columns(), demo_employees()).with_layout(page_size, width),
            bonuses: CrudPage::new("Bonuses", bonus_columns(), demo_bonuses()).with_layout(page_size, width),
        }
    }

    pub fn tab(&self) -> HrTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: HrTab) {
        self.tab = tab;
    }

    /// Switch to the employees tab with an empty form open.
    pub fn add_employee(&mut self) {
        self.tab = HrTab::Employees;
        self.employees.open_create();
    }

    pub fn departments(&self) -> &CrudPage<Department, DepartmentForm> {
        &self.departments
    }

    pub fn employees(&self) -> &CrudPage<Employee, EmployeeForm> {
        &self.employees
    }

    pub fn bonuses(&self) -> &CrudPage<Bonus, BonusForm> {
        &self.bonuses
    }

    /// Show the HR panel.
    ///
    /// Returns `true` if the back button was clicked.
    pub fn show(&mut self, ui: &mut Ui, ctx: &mut PageContext<'_>) -> bool {
        let go_back = back_button(ui);
        panel_header(ui, "Human Resources");

        ui.horizontal(|ui| {
            for tab in HrTab::ALL {
                ui.selectable_value(&mut self.tab, tab, RichText::new(tab.name()).size(15.0));
            }
        });
        ui.add_space(10.0);

        match self.tab {
            HrTab::Departments => self.departments.show(ui, ctx),
            HrTab::Employees => self.employees.show(ui, ctx),
            HrTab::Bonuses => self.bonuses.show(ui, ctx),
        }

        go_back
    }
}
