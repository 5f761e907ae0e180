//! Human resources records: departments, employees, and bonuses.

use std::fmt;

use chrono::NaiveDate;

use super::ymd;
use crate::error::{AppError, Result};
use crate::store::Entity;
use crate::table::{CellValue, Record, RecordId};

#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    pub id: RecordId,
    pub code: String,
    pub name: String,
    pub manager: String,
    pub location: String,
    /// Headcount as recorded on the department itself.
    pub employee_count: u32,
}

impl Record for Department {
    const FIELDS: &'static [&'static str] = &["code", "name", "manager", "location", "employee_count"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "code" => CellValue::from(&self.code),
            "name" => CellValue::from(&self.name),
            "manager" => CellValue::from(&self.manager),
            "location" => CellValue::from(&self.location),
            "employee_count" => CellValue::from(self.employee_count),
            _ => CellValue::Empty,
        }
    }
}

impl Entity for Department {
    const NOUN: &'static str = "department";

    fn label(&self) -> String {
        self.name.clone()
    }

    fn delete_guard(&self) -> Result<()> {
        if self.employee_count > 0 {
            return Err(AppError::rejected(format!(
                "Cannot delete department '{}': {} employee(s) still assigned",
                self.name, self.employee_count
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: RecordId,
    pub code: String,
    pub full_name: String,
    pub email: String,
    /// Free-text department name.
    pub department: String,
    pub position: String,
    pub salary: f64,
    pub hire_date: NaiveDate,
    pub active: bool,
    /// Whether a self-service portal password has been set.
    pub portal_access: bool,
}

impl Record for Employee {
    const FIELDS: &'static [&'static str] = &[
        "code",
        "full_name",
        "email",
        "department",
        "position",
        "salary",
        "hire_date",
        "active",
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "code" => CellValue::from(&self.code),
            "full_name" => CellValue::from(&self.full_name),
            "email" => CellValue::from(&self.email),
            "department" => CellValue::from(&self.department),
            "position" => CellValue::from(&self.position),
            "salary" => CellValue::from(self.salary),
            "hire_date" => CellValue::from(self.hire_date),
            "active" => CellValue::from(if self.active { "Active" } else { "Inactive" }),
            _ => CellValue::Empty,
        }
    }
}

impl Entity for Employee {
    const NOUN: &'static str = "employee";

    fn label(&self) -> String {
        self.full_name.clone()
    }
}

/// Approval state of a bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BonusStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl BonusStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for BonusStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bonus {
    pub id: RecordId,
    /// Free-text employee name.
    pub employee: String,
    pub reason: String,
    pub amount: f64,
    pub status: BonusStatus,
    pub awarded_on: NaiveDate,
}

impl Record for Bonus {
    const FIELDS: &'static [&'static str] = &["employee", "reason", "amount", "status", "awarded_on"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "employee" => CellValue::from(&self.employee),
            "reason" => CellValue::from(&self.reason),
            "amount" => CellValue::from(self.amount),
            "status" => CellValue::from(self.status.label()),
            "awarded_on" => CellValue::from(self.awarded_on),
            _ => CellValue::Empty,
        }
    }
}

impl Entity for Bonus {
    const NOUN: &'static str = "bonus";

    fn label(&self) -> String {
        format!("{} for {}", self.reason, self.employee)
    }

    fn delete_guard(&self) -> Result<()> {
        if self.status == BonusStatus::Approved {
            return Err(AppError::rejected("Cannot delete an approved bonus"));
        }
        Ok(())
    }
}

pub fn demo_departments() -> Vec<Department> {
    let dept = |id, code: &str, name: &str, manager: &str, location: &str, employee_count| Department {
        id,
        code: code.to_string(),
        name: name.to_string(),
        manager: manager.to_string(),
        location: location.to_string(),
        employee_count,
    };
    vec![
        dept(1, "FIN", "Finance", "Grace Okafor", "Head Office", 6),
        dept(2, "HR", "Human Resources", "Liam Novak", "Head Office", 4),
        dept(3, "OPS", "Operations", "Mei Tanaka", "Warehouse A", 18),
        dept(4, "SAL", "Sales", "Daniel Reyes", "Head Office", 11),
        dept(5, "RND", "Research", "Ana Costa", "Lab Campus", 0),
        dept(6, "LEG", "Legal", "", "Head Office", 0),
    ]
}

#[rustfmt::skip]
pub fn demo_employees() -> Vec<Employee> {
    let emp = |id, code: &str, name: &str, email: &str, dept: &str, position: &str, salary, hire_date, active| {
        Employee {
            id,
            code: code.to_string(),
            full_name: name.to_string(),
            email: email.to_string(),
            department: dept.to_string(),
            position: position.to_string(),
            salary,
            hire_date,
            active,
            portal_access: active,
        }
    };
    vec![
        emp(1, "E-1001", "Grace Okafor", "grace.okafor@example.com", "Finance", "Finance Manager", 98_000.0, ymd(2017, 2, 13), true),
        emp(2, "E-1002", "Liam Novak", "liam.novak@example.com", "Human Resources", "HR Lead", 84_500.0, ymd(2018, 7, 2), true),
        emp(3, "E-1003", "Mei Tanaka", "mei.tanaka@example.com", "Operations", "Operations Manager", 91_000.0, ymd(2016, 10, 24), true),
        emp(4, "E-1004", "Daniel Reyes", "daniel.reyes@example.com", "Sales", "Sales Director", 105_000.0, ymd(2015, 5, 11), true),
        emp(5, "E-1005", "Ana Costa", "ana.costa@example.com", "Research", "Principal Scientist", 112_000.0, ymd(2020, 1, 6), true),
        emp(6, "E-1006", "Tomas Berg", "tomas.berg@example.com", "Operations", "Forklift Operator", 41_200.0, ymd(2021, 8, 30), true),
        emp(7, "E-1007", "Priya Nair", "priya.nair@example.com", "Finance", "Accountant", 63_750.0, ymd(2019, 4, 15), true),
        emp(8, "E-1008", "Jonas Weber", "jonas.weber@example.com", "Sales", "Account Executive", 58_000.0, ymd(2022, 3, 1), false),
        emp(9, "E-1009", "Sofia Marin", "sofia.marin@example.com", "Sales", "Sales Associate", 47_300.0, ymd(2023, 9, 18), true),
        emp(10, "E-1010", "Kwame Mensah", "kwame.mensah@example.com", "Operations", "Logistics Planner", 55_900.0, ymd(2020, 11, 2), true),
        emp(11, "E-1011", "Elena Petrova", "elena.petrova@example.com", "Human Resources", "Recruiter", 52_400.0, ymd(2021, 2, 22), true),
        emp(12, "E-1012", "Omar Haddad", "omar.haddad@example.com", "Finance", "Payroll Specialist", 57_100.0, ymd(2018, 12, 3), false),
    ]
}

pub fn demo_bonuses() -> Vec<Bonus> {
    let bonus = |id, employee: &str, reason: &str, amount, status, awarded_on| Bonus {
        id,
        employee: employee.to_string(),
        reason: reason.to_string(),
        amount,
        status,
        awarded_on,
    };
    vec![
        bonus(1, "Daniel Reyes", "Q4 sales target", 5_000.0, BonusStatus::Approved, ymd(2024, 1, 12)),
        bonus(2, "Sofia Marin", "New client onboarding", 1_200.0, BonusStatus::Pending, ymd(2024, 2, 5)),
        bonus(3, "Tomas Berg", "Safety record", 600.0, BonusStatus::Approved, ymd(2024, 2, 20)),
        bonus(4, "Priya Nair", "Audit preparation", 1_500.0, BonusStatus::Pending, ymd(2024, 3, 1)),
        bonus(5, "Jonas Weber", "Referral", 800.0, BonusStatus::Rejected, ymd(2024, 3, 8)),
    ]
}
