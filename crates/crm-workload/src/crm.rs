//! CRM workload: authentication, sales, HR and admin modules.

use crate::error::WorkloadError;
use crate::executor::SqlExecutor;
use crate::params::{employee_id, pick, ACTIVE_DATE, CRM_DEPARTMENTS, CRM_EMPLOYEE_IDS};
use crate::statement::Statement;
use async_trait::async_trait;
use loadtest_engine::{Action, Catalog, EngineError};
use rand::rngs::StdRng;
use rand::Rng;

/// One CRM module call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrmAction {
    Login,
    ValidateSession,
    ViewProfile,
    CheckCommission,
    FindTeamLead,
    TitleHistory,
    DeptRoster,
    NewHiresReport,
    SearchUser,
    Heartbeat,
}

/// Catalog order; login and profile views are listed twice for double weight.
pub const CRM_CATALOG: [CrmAction; 12] = [
    CrmAction::Login,
    CrmAction::Login,
    CrmAction::ValidateSession,
    CrmAction::ViewProfile,
    CrmAction::ViewProfile,
    CrmAction::CheckCommission,
    CrmAction::FindTeamLead,
    CrmAction::TitleHistory,
    CrmAction::DeptRoster,
    CrmAction::NewHiresReport,
    CrmAction::SearchUser,
    CrmAction::Heartbeat,
];

pub fn crm_catalog() -> Result<Catalog<CrmAction>, EngineError> {
    Catalog::new(CRM_CATALOG.to_vec())
}

impl CrmAction {
    pub const ALL: [CrmAction; 10] = [
        CrmAction::Login,
        CrmAction::ValidateSession,
        CrmAction::ViewProfile,
        CrmAction::CheckCommission,
        CrmAction::FindTeamLead,
        CrmAction::TitleHistory,
        CrmAction::DeptRoster,
        CrmAction::NewHiresReport,
        CrmAction::SearchUser,
        CrmAction::Heartbeat,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CrmAction::Login => "[Auth] Login",
            CrmAction::ValidateSession => "[Auth] Validate Session",
            CrmAction::ViewProfile => "[Sales] View Profile",
            CrmAction::CheckCommission => "[Sales] Check Commission",
            CrmAction::FindTeamLead => "[Sales] Find Team Lead",
            CrmAction::TitleHistory => "[HR] Title History",
            CrmAction::DeptRoster => "[HR] Dept Roster",
            CrmAction::NewHiresReport => "[HR] New Hires Report",
            CrmAction::SearchUser => "[Admin] Search User",
            CrmAction::Heartbeat => "[Sys] Heartbeat",
        }
    }

    /// Build the statement for one call, drawing arguments from `rng`.
    pub fn statement<R: Rng + ?Sized>(&self, rng: &mut R) -> Statement {
        match self {
            CrmAction::Login => Statement::new(
                "SELECT first_name, last_name, hire_date FROM employees WHERE emp_no = ?",
            )
            .bind(employee_id(rng, &CRM_EMPLOYEE_IDS)),

            CrmAction::ValidateSession => {
                Statement::new("SELECT dept_no FROM dept_emp WHERE emp_no = ? AND to_date = ?")
                    .bind(employee_id(rng, &CRM_EMPLOYEE_IDS))
                    .bind(ACTIVE_DATE)
            }

            CrmAction::ViewProfile => Statement::new(
                "SELECT e.first_name, t.title, s.salary \
                 FROM employees e \
                 JOIN titles t ON e.emp_no = t.emp_no \
                 JOIN salaries s ON e.emp_no = s.emp_no \
                 WHERE e.emp_no = ? AND t.to_date = ? AND s.to_date = ?",
            )
            .bind(employee_id(rng, &CRM_EMPLOYEE_IDS))
            .bind(ACTIVE_DATE)
            .bind(ACTIVE_DATE),

            CrmAction::CheckCommission => {
                Statement::new("SELECT salary FROM salaries WHERE emp_no = ? AND to_date = ?")
                    .bind(employee_id(rng, &CRM_EMPLOYEE_IDS))
                    .bind(ACTIVE_DATE)
            }

            CrmAction::FindTeamLead => {
                Statement::new("SELECT emp_no FROM dept_manager WHERE dept_no = ? AND to_date = ?")
                    .bind(pick(rng, &CRM_DEPARTMENTS))
                    .bind(ACTIVE_DATE)
            }

            CrmAction::TitleHistory => {
                Statement::new("SELECT title, from_date, to_date FROM titles WHERE emp_no = ?")
                    .bind(employee_id(rng, &CRM_EMPLOYEE_IDS))
            }

            CrmAction::DeptRoster => Statement::new(
                "SELECT emp_no FROM dept_emp WHERE dept_no = ? AND to_date = ? LIMIT 20",
            )
            .bind(pick(rng, &CRM_DEPARTMENTS))
            .bind(ACTIVE_DATE),

            CrmAction::NewHiresReport => Statement::new(
                "SELECT emp_no, first_name FROM employees WHERE hire_date > '1999-10-01' LIMIT 10",
            ),

            CrmAction::SearchUser => Statement::new(
                "SELECT emp_no, last_name FROM employees WHERE first_name = 'Georgi'",
            ),

            CrmAction::Heartbeat => Statement::new("SELECT 1"),
        }
    }
}

#[async_trait]
impl<E: SqlExecutor> Action<E> for CrmAction {
    type Error = WorkloadError;

    fn label(&self) -> &'static str {
        CrmAction::label(self)
    }

    async fn execute(&self, db: &E, rng: &mut StdRng) -> Result<(), Self::Error> {
        let statement = self.statement(rng);
        db.execute(statement).await
    }
}
