//! HRIS workload: thirty back-office scenarios, equally weighted.

use crate::error::WorkloadError;
use crate::executor::SqlExecutor;
use crate::params::{
    employee_id, last_name_prefix, pick, year_range, ACTIVE_DATE, HRIS_DEPARTMENTS,
    HRIS_EMPLOYEE_IDS, LAST_NAMES, TITLES,
};
use crate::statement::Statement;
use async_trait::async_trait;
use loadtest_engine::{Action, Catalog, EngineError};
use rand::rngs::StdRng;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HrisAction {
    // Authentication & session
    UserLogin,
    SessionValidation,
    // Dashboard widgets
    TeamBirthdays,
    NewHires,
    MyDeptManager,
    // Employee profile
    ProfileHeader,
    CurrentJob,
    Compensation,
    TitleTimeline,
    TransferTimeline,
    // Payroll
    PayrollBatch,
    PaySlip,
    StalePay,
    HighEarners,
    EquityCheck,
    // Search & talent
    Autocomplete,
    ExactName,
    PeerList,
    Onboarding,
    Veterans,
    // Org chart
    DirectReports,
    AllManagers,
    Headcount,
    TitleRoster,
    // Diversity & inclusion
    GenderSample,
    FlightRisk,
    // Admin
    RawDump,
    IntegrityCheck,
    ExportCsv,
    Heartbeat,
}

pub fn hris_catalog() -> Result<Catalog<HrisAction>, EngineError> {
    Catalog::new(HrisAction::ALL.to_vec())
}

impl HrisAction {
    pub const ALL: [HrisAction; 30] = [
        HrisAction::UserLogin,
        HrisAction::SessionValidation,
        HrisAction::TeamBirthdays,
        HrisAction::NewHires,
        HrisAction::MyDeptManager,
        HrisAction::ProfileHeader,
        HrisAction::CurrentJob,
        HrisAction::Compensation,
        HrisAction::TitleTimeline,
        HrisAction::TransferTimeline,
        HrisAction::PayrollBatch,
        HrisAction::PaySlip,
        HrisAction::StalePay,
        HrisAction::HighEarners,
        HrisAction::EquityCheck,
        HrisAction::Autocomplete,
        HrisAction::ExactName,
        HrisAction::PeerList,
        HrisAction::Onboarding,
        HrisAction::Veterans,
        HrisAction::DirectReports,
        HrisAction::AllManagers,
        HrisAction::Headcount,
        HrisAction::TitleRoster,
        HrisAction::GenderSample,
        HrisAction::FlightRisk,
        HrisAction::RawDump,
        HrisAction::IntegrityCheck,
        HrisAction::ExportCsv,
        HrisAction::Heartbeat,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HrisAction::UserLogin => "[Auth] Login",
            HrisAction::SessionValidation => "[Auth] Validate Active",
            HrisAction::TeamBirthdays => "[Widget] Birthdays",
            HrisAction::NewHires => "[Widget] New Hires",
            HrisAction::MyDeptManager => "[Widget] My Manager",
            HrisAction::ProfileHeader => "[Profile] Header",
            HrisAction::CurrentJob => "[Profile] Current Job",
            HrisAction::Compensation => "[Profile] Current Pay",
            HrisAction::TitleTimeline => "[Profile] Title Hist",
            HrisAction::TransferTimeline => "[Profile] Dept Hist",
            HrisAction::PayrollBatch => "[Payroll] Dept Batch",
            HrisAction::PaySlip => "[Payroll] View Slip",
            HrisAction::StalePay => "[Payroll] Stale Pay",
            HrisAction::HighEarners => "[Payroll] High Earners",
            HrisAction::EquityCheck => "[Payroll] Equity Check",
            HrisAction::Autocomplete => "[Search] Autocomplete",
            HrisAction::ExactName => "[Search] Exact Name",
            HrisAction::PeerList => "[Search] Peer List",
            HrisAction::Onboarding => "[Talent] Onboarding",
            HrisAction::Veterans => "[Talent] Veterans",
            HrisAction::DirectReports => "[Org] Direct Reports",
            HrisAction::AllManagers => "[Org] All Managers",
            HrisAction::Headcount => "[Org] Headcount",
            HrisAction::TitleRoster => "[Org] Title Roster",
            HrisAction::GenderSample => "[D&I] Gender Sample",
            HrisAction::FlightRisk => "[D&I] Flight Risk",
            HrisAction::RawDump => "[Admin] Raw Dump",
            HrisAction::IntegrityCheck => "[Admin] Integrity",
            HrisAction::ExportCsv => "[Admin] Export CSV",
            HrisAction::Heartbeat => "[Sys] Heartbeat",
        }
    }

    pub fn statement<R: Rng + ?Sized>(&self, rng: &mut R) -> Statement {
        match self {
            HrisAction::UserLogin => Statement::new(
                "SELECT emp_no, first_name, last_name, gender, hire_date \
                 FROM employees WHERE emp_no = ?",
            )
            .bind(employee_id(rng, &HRIS_EMPLOYEE_IDS)),

            HrisAction::SessionValidation => Statement::new(
                "SELECT de.dept_no FROM dept_emp de WHERE de.emp_no = ? AND de.to_date = ?",
            )
            .bind(employee_id(rng, &HRIS_EMPLOYEE_IDS))
            .bind(ACTIVE_DATE),

            HrisAction::TeamBirthdays => Statement::new(
                "SELECT first_name, birth_date FROM employees WHERE month(birth_date) = ? LIMIT 5",
            )
            .bind(rng.gen_range(1..=12i64)),

            HrisAction::NewHires => {
                let (start, end) = year_range(rng);
                Statement::new(
                    "SELECT first_name, last_name, hire_date FROM employees \
                     WHERE hire_date BETWEEN ? AND ? ORDER BY hire_date DESC LIMIT 5",
                )
                .bind(start)
                .bind(end)
            }

            HrisAction::MyDeptManager => Statement::new(
                "SELECT e.first_name, e.last_name \
                 FROM dept_manager dm \
                 JOIN employees e ON dm.emp_no = e.emp_no \
                 WHERE dm.dept_no = ? AND dm.to_date = ?",
            )
            .bind(pick(rng, &HRIS_DEPARTMENTS))
            .bind(ACTIVE_DATE),

            HrisAction::ProfileHeader => Statement::new(
                "SELECT first_name, last_name, birth_date, gender FROM employees WHERE emp_no = ?",
            )
            .bind(employee_id(rng, &HRIS_EMPLOYEE_IDS)),

            HrisAction::CurrentJob => Statement::new(
                "SELECT t.title, d.dept_name \
                 FROM titles t \
                 JOIN dept_emp de ON t.emp_no = de.emp_no \
                 JOIN departments d ON de.dept_no = d.dept_no \
                 WHERE t.emp_no = ? AND t.to_date = ? AND de.to_date = ?",
            )
            .bind(employee_id(rng, &HRIS_EMPLOYEE_IDS))
            .bind(ACTIVE_DATE)
            .bind(ACTIVE_DATE),

            HrisAction::Compensation => Statement::new(
                "SELECT salary, from_date FROM salaries WHERE emp_no = ? AND to_date = ?",
            )
            .bind(employee_id(rng, &HRIS_EMPLOYEE_IDS))
            .bind(ACTIVE_DATE),

            HrisAction::TitleTimeline => Statement::new(
                "SELECT title, from_date, to_date FROM titles \
                 WHERE emp_no = ? ORDER BY from_date DESC",
            )
            .bind(employee_id(rng, &HRIS_EMPLOYEE_IDS)),

            HrisAction::TransferTimeline => Statement::new(
                "SELECT d.dept_name, de.from_date, de.to_date \
                 FROM dept_emp de \
                 JOIN departments d ON de.dept_no = d.dept_no \
                 WHERE de.emp_no = ? ORDER BY de.from_date DESC",
            )
            .bind(employee_id(rng, &HRIS_EMPLOYEE_IDS)),

            HrisAction::PayrollBatch => Statement::new(
                "SELECT s.emp_no, s.salary \
                 FROM salaries s \
                 JOIN dept_emp de ON s.emp_no = de.emp_no \
                 WHERE de.dept_no = ? AND s.to_date = ? AND de.to_date = ? \
                 LIMIT 50",
            )
            .bind(pick(rng, &HRIS_DEPARTMENTS))
            .bind(ACTIVE_DATE)
            .bind(ACTIVE_DATE),

            HrisAction::PaySlip => Statement::new(
                "SELECT salary, from_date, to_date FROM salaries WHERE emp_no = ? LIMIT 1",
            )
            .bind(employee_id(rng, &HRIS_EMPLOYEE_IDS)),

            HrisAction::StalePay => Statement::new(
                "SELECT emp_no, salary, from_date FROM salaries \
                 WHERE to_date = ? AND from_date < '1998-01-01' LIMIT 10",
            )
            .bind(ACTIVE_DATE),

            HrisAction::HighEarners => Statement::new(
                "SELECT emp_no, salary FROM salaries WHERE salary > 120000 AND to_date = ? LIMIT 10",
            )
            .bind(ACTIVE_DATE),

            HrisAction::EquityCheck => Statement::new(
                "SELECT s.salary \
                 FROM salaries s \
                 JOIN titles t ON s.emp_no = t.emp_no \
                 WHERE t.title = ? AND s.to_date = ? AND t.to_date = ? \
                 LIMIT 20",
            )
            .bind(pick(rng, &TITLES))
            .bind(ACTIVE_DATE)
            .bind(ACTIVE_DATE),

            HrisAction::Autocomplete => Statement::new(
                "SELECT emp_no, first_name, last_name FROM employees WHERE last_name LIKE ? LIMIT 8",
            )
            .bind(last_name_prefix(rng)),

            HrisAction::ExactName => Statement::new(
                "SELECT emp_no, first_name, last_name, hire_date FROM employees \
                 WHERE last_name = ? LIMIT 20",
            )
            .bind(pick(rng, &LAST_NAMES)),

            HrisAction::PeerList => Statement::new(
                "SELECT e.first_name, e.last_name, t.title \
                 FROM dept_emp de \
                 JOIN employees e ON de.emp_no = e.emp_no \
                 JOIN titles t ON e.emp_no = t.emp_no \
                 WHERE de.dept_no = ? AND de.to_date = ? AND t.to_date = ? \
                 LIMIT 10",
            )
            .bind(pick(rng, &HRIS_DEPARTMENTS))
            .bind(ACTIVE_DATE)
            .bind(ACTIVE_DATE),

            HrisAction::Onboarding => {
                let (start, _) = year_range(rng);
                Statement::new(
                    "SELECT emp_no, first_name, hire_date FROM employees \
                     WHERE hire_date >= ? LIMIT 10",
                )
                .bind(start)
            }

            HrisAction::Veterans => Statement::new(
                "SELECT e.emp_no, e.first_name, e.hire_date \
                 FROM employees e \
                 JOIN dept_emp de ON e.emp_no = de.emp_no \
                 WHERE e.hire_date < '1989-01-01' AND de.to_date = ? \
                 LIMIT 10",
            )
            .bind(ACTIVE_DATE),

            HrisAction::DirectReports => Statement::new(
                "SELECT e.first_name, e.last_name, t.title \
                 FROM dept_emp de \
                 JOIN employees e ON de.emp_no = e.emp_no \
                 JOIN titles t ON de.emp_no = t.emp_no \
                 WHERE de.dept_no = ? AND de.to_date = ? AND t.to_date = ? \
                 LIMIT 15",
            )
            .bind(pick(rng, &HRIS_DEPARTMENTS))
            .bind(ACTIVE_DATE)
            .bind(ACTIVE_DATE),

            HrisAction::AllManagers => Statement::new(
                "SELECT d.dept_name, e.first_name, e.last_name \
                 FROM dept_manager dm \
                 JOIN departments d ON dm.dept_no = d.dept_no \
                 JOIN employees e ON dm.emp_no = e.emp_no \
                 WHERE dm.to_date = ?",
            )
            .bind(ACTIVE_DATE),

            HrisAction::Headcount => Statement::new(
                "SELECT emp_no FROM dept_emp WHERE dept_no = ? AND to_date = ? LIMIT 100",
            )
            .bind(pick(rng, &HRIS_DEPARTMENTS))
            .bind(ACTIVE_DATE),

            HrisAction::TitleRoster => Statement::new(
                "SELECT e.first_name, e.last_name \
                 FROM titles t \
                 JOIN employees e ON t.emp_no = e.emp_no \
                 WHERE t.title = ? AND t.to_date = ? \
                 LIMIT 10",
            )
            .bind("Senior Engineer")
            .bind(ACTIVE_DATE),

            HrisAction::GenderSample => Statement::new(
                "SELECT e.gender, e.emp_no \
                 FROM dept_emp de \
                 JOIN employees e ON de.emp_no = e.emp_no \
                 WHERE de.dept_no = ? AND de.to_date = ? \
                 LIMIT 50",
            )
            .bind(pick(rng, &HRIS_DEPARTMENTS))
            .bind(ACTIVE_DATE),

            HrisAction::FlightRisk => Statement::new(
                "SELECT emp_no, title, from_date FROM titles \
                 WHERE from_date < '1994-01-01' AND to_date = ? \
                 LIMIT 10",
            )
            .bind(ACTIVE_DATE),

            HrisAction::RawDump => Statement::new("SELECT * FROM employees WHERE emp_no = ?")
                .bind(employee_id(rng, &HRIS_EMPLOYEE_IDS)),

            HrisAction::IntegrityCheck => Statement::new(
                "SELECT emp_no FROM employees \
                 WHERE emp_no NOT IN (SELECT emp_no FROM dept_emp) LIMIT 10",
            ),

            HrisAction::ExportCsv => Statement::new(
                "SELECT e.emp_no, e.first_name, e.last_name, t.title, s.salary \
                 FROM employees e \
                 JOIN dept_emp de ON e.emp_no = de.emp_no \
                 JOIN titles t ON e.emp_no = t.emp_no \
                 JOIN salaries s ON e.emp_no = s.emp_no \
                 WHERE de.dept_no = ? \
                 AND de.to_date = ? AND t.to_date = ? AND s.to_date = ? \
                 LIMIT 25",
            )
            .bind(pick(rng, &HRIS_DEPARTMENTS))
            .bind(ACTIVE_DATE)
            .bind(ACTIVE_DATE)
            .bind(ACTIVE_DATE),

            HrisAction::Heartbeat => Statement::new("SELECT 1"),
        }
    }
}

#[async_trait]
impl<E: SqlExecutor> Action<E> for HrisAction {
    type Error = WorkloadError;

    fn label(&self) -> &'static str {
        HrisAction::label(self)
    }

    async fn execute(&self, db: &E, rng: &mut StdRng) -> Result<(), Self::Error> {
        let statement = self.statement(rng);
        db.execute(statement).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::QueryParam;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_equally_weighted() {
        let catalog = hris_catalog().unwrap();

        assert_eq!(catalog.len(), 30);
        for action in HrisAction::ALL {
            assert_eq!(catalog.weight_of(&action), 1);
        }
    }

    #[test]
    fn test_labels_unique() {
        let labels: HashSet<_> = HrisAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels.len(), 30);
    }

    #[test]
    fn test_placeholders_match_params() {
        let mut rng = StdRng::seed_from_u64(42);

        for action in HrisAction::ALL {
            let stmt = action.statement(&mut rng);
            assert_eq!(
                stmt.placeholder_count(),
                stmt.params.len(),
                "{action:?}: {}",
                stmt.sql
            );
        }
    }

    #[test]
    fn test_employee_ids_within_range() {
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..200 {
            for action in [HrisAction::UserLogin, HrisAction::PaySlip, HrisAction::RawDump] {
                let stmt = action.statement(&mut rng);
                match &stmt.params[0] {
                    QueryParam::Int(id) => assert!(HRIS_EMPLOYEE_IDS.contains(id)),
                    other => panic!("Expected employee id, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_birthday_month() {
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let stmt = HrisAction::TeamBirthdays.statement(&mut rng);
            match stmt.params[0] {
                QueryParam::Int(month) => assert!((1..=12).contains(&month)),
                ref other => panic!("Expected month, got {other:?}"),
            }
        }
    }
}
