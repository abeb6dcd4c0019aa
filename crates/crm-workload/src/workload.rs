use clap::ValueEnum;
use std::fmt;

/// Which catalog a run samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Workload {
    /// Pooled CRM simulation (12 weighted entries)
    #[default]
    Crm,
    /// HR back-office scenarios (30 entries)
    Hris,
}

impl Workload {
    pub fn name(&self) -> &'static str {
        match self {
            Workload::Crm => "crm",
            Workload::Hris => "hris",
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
