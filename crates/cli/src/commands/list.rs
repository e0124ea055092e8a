//! List Command

use serde::Serialize;

use restprobe_e2e::Check;

use crate::output::{print_list, OutputFormat, TableDisplay};

/// Check display wrapper for serialization
#[derive(Serialize)]
pub struct CheckDisplay {
    pub name: &'static str,
    pub tag: &'static str,
    pub browser: bool,
}

impl From<Check> for CheckDisplay {
    fn from(check: Check) -> Self {
        Self {
            name: check.name(),
            tag: check.tag(),
            browser: check.needs_browser(),
        }
    }
}

impl TableDisplay for CheckDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Check", "Tag", "Browser"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.to_string(),
            self.tag.to_string(),
            if self.browser { "yes" } else { "no" }.to_string(),
        ]
    }
}

pub fn execute(format: OutputFormat) {
    let checks: Vec<CheckDisplay> = Check::ALL.into_iter().map(CheckDisplay::from).collect();
    print_list(&checks, format);
}
